//! Free-standing node constructors.
//!
//! ```ignore
//! use arel_core::*;
//!
//! let users = Table::new("users");
//! named_function("COALESCE", [users.attr("nick").into(), quoted("anon")]);
//! cast(users.attr("age"), "TEXT");
//! exists(users.from());
//! ```

use compact_str::CompactString;

use crate::nodes::{
    BindParam, Case, Function, FunctionKind, Node, SelectStatement, UnaryOperator, Window,
};
use crate::value::Value;

/// Raw SQL, rendered verbatim.
pub fn sql(text: impl Into<CompactString>) -> Node {
    Node::SqlLiteral(text.into())
}

/// Bare `*`.
pub fn star() -> Node {
    Node::Star
}

/// A host value rendered as a literal (or bound when compiling).
pub fn quoted(value: impl Into<Value>) -> Node {
    Node::Quoted(value.into())
}

/// A named parameter. Without a value it must be bound on the compiled query
/// before execution.
pub fn bind(name: impl Into<CompactString>, value: Option<Value>) -> Node {
    Node::BindParam(BindParam {
        name: Some(name.into()),
        value,
    })
}

/// `(expr)`
pub fn grouping(expr: impl Into<Node>) -> Node {
    Node::unary(UnaryOperator::Grouping, expr)
}

/// `(a, b, c)`, e.g. the left side of a row comparison.
pub fn tuple<I>(items: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    grouping(Node::List(items.into_iter().map(Into::into).collect()))
}

/// `LATERAL expr`
pub fn lateral(expr: impl Into<Node>) -> Node {
    Node::unary(UnaryOperator::Lateral, expr)
}

fn grouping_element<I>(op: UnaryOperator, items: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Node::unary(op, Node::List(items.into_iter().map(Into::into).collect()))
}

/// `CUBE(a, b)`
pub fn cube<I>(items: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    grouping_element(UnaryOperator::Cube, items)
}

/// `ROLLUP(a, b)`
pub fn rollup<I>(items: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    grouping_element(UnaryOperator::Rollup, items)
}

/// `GROUPING SETS(a, b)`; use [`tuple`] for multi-column sets.
pub fn grouping_set<I>(items: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    grouping_element(UnaryOperator::GroupingSet, items)
}

/// `NAME(args)`
pub fn named_function<I>(name: impl Into<CompactString>, args: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Function::new(
        FunctionKind::Named(name.into()),
        args.into_iter().map(Into::into).collect(),
    )
    .into()
}

/// `CAST(expr AS type_name)`
pub fn cast(expr: impl Into<Node>, type_name: impl Into<CompactString>) -> Node {
    Node::Cast {
        expr: Box::new(expr.into()),
        type_name: type_name.into(),
    }
}

/// `EXTRACT(FIELD FROM expr)`
pub fn extract(expr: impl Into<Node>, field: impl Into<CompactString>) -> Node {
    Node::Extract {
        expr: Box::new(expr.into()),
        field: field.into(),
    }
}

/// `EXISTS (subquery)`
pub fn exists(subquery: impl Into<SelectStatement>) -> Node {
    Function::new(FunctionKind::Exists, vec![Node::from(subquery.into())]).into()
}

/// A searched `CASE WHEN ... END`; start a simple `CASE expr WHEN` with
/// `expr.when(..)` instead.
pub fn case() -> Case {
    Case::new(None)
}

/// An empty window specification.
pub fn window() -> Window {
    Window::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Table;

    #[test]
    fn test_function_and_cast() {
        let users = Table::new("users");
        let node = named_function("COALESCE", [Node::from(users.attr("nick")), quoted("anon")]);
        assert_eq!(node.to_sql().unwrap(), r#"COALESCE("users"."nick", 'anon')"#);
        assert_eq!(
            cast(users.attr("age"), "TEXT").to_sql().unwrap(),
            r#"CAST("users"."age" AS TEXT)"#
        );
    }

    #[test]
    fn test_searched_case() {
        let users = Table::new("users");
        let node: Node = case()
            .when(users.attr("age").lt(18), "minor")
            .r#else("adult")
            .into();
        assert_eq!(
            node.to_sql().unwrap(),
            r#"CASE WHEN "users"."age" < 18 THEN 'minor' ELSE 'adult' END"#
        );
    }

    #[test]
    fn test_simple_case() {
        let users = Table::new("users");
        let node: Node = users.attr("status").when(1, "active").when(2, "banned").into();
        assert_eq!(
            node.to_sql().unwrap(),
            r#"CASE "users"."status" WHEN 1 THEN 'active' WHEN 2 THEN 'banned' END"#
        );
    }

    #[test]
    fn test_grouping_elements() {
        let users = Table::new("users");
        assert_eq!(
            cube([users.attr("a"), users.attr("b")]).to_sql().unwrap(),
            r#"CUBE("users"."a", "users"."b")"#
        );
        assert_eq!(
            grouping_set([tuple([users.attr("a"), users.attr("b")]), Node::from(users.attr("c"))])
                .to_sql()
                .unwrap(),
            r#"GROUPING SETS(("users"."a", "users"."b"), "users"."c")"#
        );
    }

    #[test]
    fn test_extract_uppercases_field() {
        let users = Table::new("users");
        assert_eq!(
            extract(users.attr("created_at"), "year").to_sql().unwrap(),
            r#"EXTRACT(YEAR FROM "users"."created_at")"#
        );
    }
}
