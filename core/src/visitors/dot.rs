//! Graphviz rendering of a statement tree, for debugging.

use core::fmt::Write;

use crate::nodes::{Node, UnaryOperator};

/// Renders a [`Node`] tree as a `digraph`.
///
/// Each node becomes a record labelled with its kind and, for leaves and
/// operators, a short detail; edges follow [`Node::children`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Dot;

impl Dot {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, node: &Node) -> String {
        let mut out = String::from("digraph \"Arel\" {\nnode [width=0.375,height=0.25,shape=record];\n");
        let mut edges = String::new();
        let mut next_id = 0usize;
        walk(node, &mut next_id, &mut out, &mut edges);
        out.push_str(&edges);
        out.push_str("}\n");
        out
    }
}

fn walk(node: &Node, next_id: &mut usize, out: &mut String, edges: &mut String) -> usize {
    let id = *next_id;
    *next_id += 1;

    let _ = write!(out, "{id} [label=\"<f0>{}", node.kind());
    if let Some(detail) = detail(node) {
        out.push('|');
        push_escaped(&detail, out);
    }
    out.push_str("\"];\n");

    for child in node.children() {
        let child_id = walk(child, next_id, out, edges);
        let _ = writeln!(edges, "{id} -> {child_id};");
    }
    id
}

fn detail(node: &Node) -> Option<String> {
    match node {
        Node::Table(table) => Some(table.qualifier().to_string()),
        Node::TableAlias(alias) => Some(alias.name.to_string()),
        Node::Attribute(attribute) | Node::UnqualifiedColumn(attribute) => {
            Some(format!("{}.{}", attribute.relation.qualifier(), attribute.name))
        }
        Node::SqlLiteral(sql) => Some(sql.to_string()),
        Node::Quoted(value) | Node::Casted { value, .. } => Some(format!("{value:?}")),
        Node::BindParam(param) => param.name.as_ref().map(|name| name.to_string()),
        Node::Unary { op, .. } => Some(match op {
            UnaryOperator::Prefix(op) => op.to_string(),
            other => format!("{other:?}"),
        }),
        Node::Binary { op, .. } => Some(op.as_str().to_string()),
        Node::Function(function) => Some(function.kind.sql_name().to_string()),
        Node::Extract { field, .. } => Some(field.to_string()),
        Node::Cast { type_name, .. } => Some(type_name.to_string()),
        Node::Cte(cte) => Some(cte.name.to_string()),
        Node::NamedWindow(window) => Some(window.name.to_string()),
        _ => None,
    }
}

/// Escapes characters that are structural inside a record label.
fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '{' | '}' | '|' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
}
