//! SQL compilation.
//!
//! A [`Visitor`] turns a statement tree into SQL text. The provided
//! [`Visitor::visit`] dispatches with one exhaustive `match` to a provided
//! `visit_*` method per construct; a dialect is a type that implements
//! `Visitor` and overrides only what it spells differently.
//!
//! Visitors are stateless. All output goes to the [`Collector`], which
//! decides whether leaf values are inlined or bound.

mod dot;
mod mysql;
mod postgres;
mod quoting;
mod sqlite;
mod to_sql;

pub use dot::Dot;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use quoting::{AnsiQuoting, MySqlQuoting, PostgresQuoting, Quoting, SqliteQuoting};
pub use sqlite::Sqlite;
pub use to_sql::ToSql;

use arel_types::Dialect;

use crate::collectors::{Bind, BindCollector, Collector, CompiledQuery, SqlString};
use crate::error::{ArelError, Result};
use crate::nodes::{
    Attribute, BinaryOperator, Case, Cte, DeleteStatement, Direction, Frame, FrameBound, Function,
    FunctionKind, InsertSource, InsertStatement, Join, JoinConstraint, JoinKind, JoinSource, Lock,
    NamedWindow, Node, NullsOrder, Ordering, Over, PREC_AND, PREC_ATOM, PREC_COMPARISON, PREC_NOT,
    PREC_PREFIX, Restrictable, SelectBody, SelectCore, SelectStatement, SetOperation, SetOperator,
    SetQuantifier, Table, TableAlias, UnaryOperator, UpdateStatement, Window, WindowRef, With,
};
use crate::value::Value;
use crate::{arel_trace_error, arel_trace_sql, profile_render};

// =============================================================================
// Visitor
// =============================================================================

/// Renders nodes into a [`Collector`].
pub trait Visitor: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn quoting(&self) -> &dyn Quoting;

    // ==================== dispatch ====================

    /// Renders any node in expression position. Nested SELECTs are
    /// parenthesized.
    fn visit(&self, node: &Node, out: &mut dyn Collector) -> Result<()> {
        match node {
            Node::Table(table) => self.visit_table(table, out),
            Node::TableAlias(alias) => self.visit_table_alias(alias, out),
            Node::Attribute(attribute) => self.visit_attribute(attribute, out),
            Node::UnqualifiedColumn(attribute) => {
                self.quote_identifier(&attribute.name, out);
                Ok(())
            }
            Node::SqlLiteral(sql) => {
                out.push_str(sql);
                Ok(())
            }
            Node::Quoted(value) => self.visit_value(value, None, out),
            Node::Casted { value, attribute } => self.visit_value(value, Some(attribute), out),
            Node::BindParam(param) => out.add_bind(
                Bind {
                    name: param.name.clone(),
                    value: param.value.clone(),
                },
                self.quoting(),
            ),
            Node::True => {
                out.push_str(self.quoting().quote_bool(true));
                Ok(())
            }
            Node::False => {
                out.push_str(self.quoting().quote_bool(false));
                Ok(())
            }
            Node::Star => {
                out.push_char('*');
                Ok(())
            }
            Node::List(items) => self.visit_list(items, out),
            Node::Unary { op, expr } => self.visit_unary(op, expr, out),
            Node::Binary { op, left, right } => self.visit_binary(op, left, right, out),
            Node::And(children) => self.visit_and(children, out),
            Node::Matches {
                left,
                right,
                escape,
                case_sensitive,
                negated,
            } => self.visit_matches(left, right, escape.as_deref(), *case_sensitive, *negated, out),
            Node::Regexp {
                left,
                right,
                case_sensitive,
                negated,
            } => self.visit_regexp(left, right, *case_sensitive, *negated, out),
            Node::Function(function) => self.visit_function(function, out),
            Node::Extract { expr, field } => self.visit_extract(expr, field, out),
            Node::Cast { expr, type_name } => self.visit_cast(expr, type_name, out),
            Node::Case(case) => self.visit_case(case, out),
            Node::Join(join) => self.visit_join(join, out),
            Node::Ordering(ordering) => self.visit_ordering(ordering, out),
            Node::Over(over) => self.visit_over(over, out),
            Node::Window(window) => self.visit_window(window, out),
            Node::NamedWindow(window) => self.visit_named_window(window, out),
            Node::Cte(cte) => self.visit_cte(cte, out),
            Node::ValuesList(rows) => self.visit_values_list(rows, out),
            Node::SelectStatement(statement) => {
                out.push_char('(');
                self.visit_select_statement(statement, out)?;
                out.push_char(')');
                Ok(())
            }
            Node::InsertStatement(statement) => self.visit_insert_statement(statement, out),
            Node::UpdateStatement(statement) => self.visit_update_statement(statement, out),
            Node::DeleteStatement(statement) => self.visit_delete_statement(statement, out),
        }
    }

    /// Renders a node as a whole statement: a SELECT is not parenthesized.
    fn visit_statement(&self, node: &Node, out: &mut dyn Collector) -> Result<()> {
        match node {
            Node::SelectStatement(statement) => self.visit_select_statement(statement, out),
            other => self.visit(other, out),
        }
    }

    // ==================== helpers ====================

    fn quote_identifier(&self, name: &str, out: &mut dyn Collector) {
        let mut quoted = String::with_capacity(name.len() + 2);
        self.quoting().quote_identifier(name, &mut quoted);
        out.push_str(&quoted);
    }

    /// Renders `node`, parenthesized when it binds looser than
    /// `min_precedence`.
    fn visit_operand(&self, node: &Node, min_precedence: u8, out: &mut dyn Collector) -> Result<()> {
        if node.precedence() < min_precedence {
            out.push_char('(');
            self.visit(node, out)?;
            out.push_char(')');
            Ok(())
        } else {
            self.visit(node, out)
        }
    }

    /// `a, b, c`
    fn visit_list(&self, items: &[Node], out: &mut dyn Collector) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.visit(item, out)?;
        }
        Ok(())
    }

    /// `a AND b AND c`, each operand parenthesized if it binds looser.
    fn visit_conjunction(&self, items: &[Node], out: &mut dyn Collector) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            self.visit_operand(item, PREC_AND, out)?;
        }
        Ok(())
    }

    // ==================== leaves ====================

    fn visit_table(&self, table: &Table, out: &mut dyn Collector) -> Result<()> {
        self.quote_identifier(&table.name, out);
        if let Some(alias) = &table.table_alias {
            out.push_char(' ');
            self.quote_identifier(alias, out);
        }
        Ok(())
    }

    fn visit_table_alias(&self, alias: &TableAlias, out: &mut dyn Collector) -> Result<()> {
        self.visit_operand(&alias.relation, PREC_ATOM, out)?;
        out.push_char(' ');
        self.quote_identifier(&alias.name, out);
        Ok(())
    }

    fn visit_attribute(&self, attribute: &Attribute, out: &mut dyn Collector) -> Result<()> {
        self.quote_identifier(attribute.relation.qualifier(), out);
        out.push_char('.');
        if attribute.name == "*" {
            out.push_char('*');
        } else {
            self.quote_identifier(&attribute.name, out);
        }
        Ok(())
    }

    /// Quoted and casted host values; the collector inlines or binds them.
    fn visit_value(
        &self,
        value: &Value,
        _attribute: Option<&Attribute>,
        out: &mut dyn Collector,
    ) -> Result<()> {
        out.add_bind(Bind::value(value.clone()), self.quoting())
    }

    // ==================== operators ====================

    fn visit_unary(&self, op: &UnaryOperator, expr: &Node, out: &mut dyn Collector) -> Result<()> {
        match op {
            UnaryOperator::Not => {
                out.push_str("NOT ");
                self.visit_operand(expr, PREC_NOT, out)
            }
            UnaryOperator::Grouping => {
                if expr.is_grouping() || matches!(expr, Node::SelectStatement(_)) {
                    self.visit(expr, out)
                } else {
                    out.push_char('(');
                    self.visit(expr, out)?;
                    out.push_char(')');
                    Ok(())
                }
            }
            UnaryOperator::Lateral => {
                out.push_str("LATERAL ");
                self.visit_operand(expr, PREC_ATOM, out)
            }
            UnaryOperator::Cube => self.visit_grouping_function("CUBE", expr, out),
            UnaryOperator::Rollup => self.visit_grouping_function("ROLLUP", expr, out),
            UnaryOperator::GroupingSet => self.visit_grouping_function("GROUPING SETS", expr, out),
            UnaryOperator::Bin => self.visit_bin(expr, out),
            UnaryOperator::Prefix(op) => {
                out.push_str(op);
                self.visit_operand(expr, PREC_PREFIX, out)
            }
        }
    }

    /// Case-sensitive comparison marker; a no-op outside MySQL.
    fn visit_bin(&self, expr: &Node, out: &mut dyn Collector) -> Result<()> {
        self.visit(expr, out)
    }

    /// `CUBE(a, b)`; a grouped or listed argument is not wrapped twice.
    fn visit_grouping_function(&self, name: &str, expr: &Node, out: &mut dyn Collector) -> Result<()> {
        out.push_str(name);
        out.push_char('(');
        match expr {
            Node::Unary {
                op: UnaryOperator::Grouping,
                expr: inner,
            } => self.visit(inner, out)?,
            other => self.visit(other, out)?,
        }
        out.push_char(')');
        Ok(())
    }

    /// SQL spelling of an infix operator.
    fn binary_operator<'a>(&self, op: &'a BinaryOperator) -> &'a str {
        op.as_str()
    }

    fn visit_binary(
        &self,
        op: &BinaryOperator,
        left: &Node,
        right: &Node,
        out: &mut dyn Collector,
    ) -> Result<()> {
        match op {
            BinaryOperator::Equality | BinaryOperator::IsNotDistinctFrom if right.is_null_value() => {
                self.visit_operand(left, PREC_COMPARISON + 1, out)?;
                out.push_str(" IS NULL");
                Ok(())
            }
            BinaryOperator::NotEqual | BinaryOperator::IsDistinctFrom if right.is_null_value() => {
                self.visit_operand(left, PREC_COMPARISON + 1, out)?;
                out.push_str(" IS NOT NULL");
                Ok(())
            }
            BinaryOperator::IsDistinctFrom => self.visit_distinct_from(false, left, right, out),
            BinaryOperator::IsNotDistinctFrom => self.visit_distinct_from(true, left, right, out),
            BinaryOperator::In => self.visit_in(false, left, right, out),
            BinaryOperator::NotIn => self.visit_in(true, left, right, out),
            BinaryOperator::Between => self.visit_between(left, right, out),
            BinaryOperator::Concat => self.visit_concat(left, right, out),
            BinaryOperator::As => {
                self.visit(left, out)?;
                out.push_str(" AS ");
                self.visit(right, out)
            }
            BinaryOperator::Assignment => {
                match left {
                    Node::Attribute(attribute) => self.quote_identifier(&attribute.name, out),
                    other => self.visit(other, out)?,
                }
                out.push_str(" = ");
                self.visit(right, out)
            }
            BinaryOperator::Filter => {
                self.visit_operand(left, PREC_ATOM, out)?;
                out.push_str(" FILTER (WHERE ");
                self.visit(right, out)?;
                out.push_char(')');
                Ok(())
            }
            _ => self.visit_infix(op, left, right, out),
        }
    }

    /// `left op right` with the minimal parentheses.
    fn visit_infix(
        &self,
        op: &BinaryOperator,
        left: &Node,
        right: &Node,
        out: &mut dyn Collector,
    ) -> Result<()> {
        let precedence = op.precedence();
        let left_min = if op.is_comparison() { precedence + 1 } else { precedence };
        let flattens = op.is_associative()
            && matches!(right, Node::Binary { op: right_op, .. } if right_op == op);
        let right_min = if flattens { precedence } else { precedence + 1 };

        self.visit_operand(left, left_min, out)?;
        out.push_char(' ');
        out.push_str(self.binary_operator(op));
        out.push_char(' ');
        self.visit_operand(right, right_min, out)
    }

    /// `IS [NOT] DISTINCT FROM` with a non-NULL right side.
    fn visit_distinct_from(
        &self,
        not_distinct: bool,
        left: &Node,
        right: &Node,
        out: &mut dyn Collector,
    ) -> Result<()> {
        self.visit_operand(left, PREC_COMPARISON + 1, out)?;
        out.push_str(if not_distinct {
            " IS NOT DISTINCT FROM "
        } else {
            " IS DISTINCT FROM "
        });
        self.visit_operand(right, PREC_COMPARISON + 1, out)
    }

    /// `left [NOT] IN (...)`; an empty list collapses to `1=0` / `1=1`.
    fn visit_in(&self, negated: bool, left: &Node, right: &Node, out: &mut dyn Collector) -> Result<()> {
        if let Node::List(items) = right {
            if items.is_empty() {
                out.push_str(if negated { "1=1" } else { "1=0" });
                return Ok(());
            }
        }
        self.visit_operand(left, PREC_COMPARISON + 1, out)?;
        out.push_str(if negated { " NOT IN " } else { " IN " });
        match right {
            Node::List(items) => {
                out.push_char('(');
                self.visit_list(items, out)?;
                out.push_char(')');
                Ok(())
            }
            other => self.visit_operand(other, PREC_ATOM, out),
        }
    }

    /// `left BETWEEN low AND high`
    fn visit_between(&self, left: &Node, right: &Node, out: &mut dyn Collector) -> Result<()> {
        self.visit_operand(left, PREC_COMPARISON + 1, out)?;
        out.push_str(" BETWEEN ");
        match right {
            Node::And(bounds) if bounds.len() == 2 => {
                self.visit_operand(&bounds[0], PREC_COMPARISON + 1, out)?;
                out.push_str(" AND ");
                self.visit_operand(&bounds[1], PREC_COMPARISON + 1, out)
            }
            other => self.visit_operand(other, PREC_ATOM, out),
        }
    }

    fn visit_concat(&self, left: &Node, right: &Node, out: &mut dyn Collector) -> Result<()> {
        self.visit_infix(&BinaryOperator::Concat, left, right, out)
    }

    fn visit_and(&self, children: &[Node], out: &mut dyn Collector) -> Result<()> {
        if children.is_empty() {
            out.push_str("1=1");
            return Ok(());
        }
        self.visit_conjunction(children, out)
    }

    /// Keyword of a `LIKE` match.
    fn like_operator(&self, _case_sensitive: bool, negated: bool) -> &'static str {
        if negated { "NOT LIKE" } else { "LIKE" }
    }

    fn visit_matches(
        &self,
        left: &Node,
        right: &Node,
        escape: Option<&str>,
        case_sensitive: bool,
        negated: bool,
        out: &mut dyn Collector,
    ) -> Result<()> {
        self.visit_operand(left, PREC_COMPARISON + 1, out)?;
        out.push_char(' ');
        out.push_str(self.like_operator(case_sensitive, negated));
        out.push_char(' ');
        self.visit_operand(right, PREC_COMPARISON + 1, out)?;
        if let Some(escape) = escape {
            out.push_str(" ESCAPE ");
            let mut quoted = String::with_capacity(escape.len() + 2);
            self.quoting().quote_string(escape, &mut quoted);
            out.push_str(&quoted);
        }
        Ok(())
    }

    /// Keyword of a regular-expression match; dialects without one fail.
    fn regexp_operator(&self, _case_sensitive: bool, _negated: bool) -> Result<&'static str> {
        Err(ArelError::unsupported(self.dialect(), "regular expression match"))
    }

    fn visit_regexp(
        &self,
        left: &Node,
        right: &Node,
        case_sensitive: bool,
        negated: bool,
        out: &mut dyn Collector,
    ) -> Result<()> {
        let operator = self.regexp_operator(case_sensitive, negated)?;
        self.visit_operand(left, PREC_COMPARISON + 1, out)?;
        out.push_char(' ');
        out.push_str(operator);
        out.push_char(' ');
        self.visit_operand(right, PREC_COMPARISON + 1, out)
    }

    // ==================== functions and expressions ====================

    /// The call without its alias.
    fn visit_function_call(&self, function: &Function, out: &mut dyn Collector) -> Result<()> {
        if function.kind == FunctionKind::Exists {
            out.push_str("EXISTS ");
            for expr in &function.expressions {
                self.visit_operand(expr, PREC_ATOM, out)?;
            }
            return Ok(());
        }
        out.push_str(function.kind.sql_name());
        out.push_char('(');
        if function.distinct {
            out.push_str("DISTINCT ");
        }
        self.visit_list(&function.expressions, out)?;
        out.push_char(')');
        Ok(())
    }

    /// The call plus its explicit alias; implicit aliases only render in
    /// projections.
    fn visit_function(&self, function: &Function, out: &mut dyn Collector) -> Result<()> {
        self.visit_function_call(function, out)?;
        if let Some(alias) = function.alias.as_ref().filter(|alias| !alias.implicit) {
            out.push_str(" AS ");
            out.push_str(&alias.name);
        }
        Ok(())
    }

    /// One SELECT-list item.
    fn visit_projection(&self, node: &Node, out: &mut dyn Collector) -> Result<()> {
        match node {
            Node::Function(function) => {
                self.visit_function_call(function, out)?;
                if let Some(alias) = &function.alias {
                    out.push_str(" AS ");
                    out.push_str(&alias.name);
                }
                Ok(())
            }
            other => self.visit(other, out),
        }
    }

    fn visit_extract(&self, expr: &Node, field: &str, out: &mut dyn Collector) -> Result<()> {
        out.push_str("EXTRACT(");
        out.push_str(&field.to_ascii_uppercase());
        out.push_str(" FROM ");
        self.visit(expr, out)?;
        out.push_char(')');
        Ok(())
    }

    fn visit_cast(&self, expr: &Node, type_name: &str, out: &mut dyn Collector) -> Result<()> {
        out.push_str("CAST(");
        self.visit(expr, out)?;
        out.push_str(" AS ");
        out.push_str(type_name);
        out.push_char(')');
        Ok(())
    }

    fn visit_case(&self, case: &Case, out: &mut dyn Collector) -> Result<()> {
        out.push_str("CASE");
        if let Some(operand) = &case.case {
            out.push_char(' ');
            self.visit(operand, out)?;
        }
        for (condition, result) in &case.conditions {
            out.push_str(" WHEN ");
            self.visit(condition, out)?;
            out.push_str(" THEN ");
            self.visit(result, out)?;
        }
        if let Some(default) = &case.default {
            out.push_str(" ELSE ");
            self.visit(default, out)?;
        }
        out.push_str(" END");
        Ok(())
    }

    // ==================== ordering and windows ====================

    fn visit_ordering(&self, ordering: &Ordering, out: &mut dyn Collector) -> Result<()> {
        self.visit(&ordering.expr, out)?;
        out.push_char(' ');
        out.push_str(ordering.direction.as_str());
        match ordering.nulls {
            Some(NullsOrder::First) => out.push_str(" NULLS FIRST"),
            Some(NullsOrder::Last) => out.push_str(" NULLS LAST"),
            None => {}
        }
        Ok(())
    }

    fn visit_over(&self, over: &Over, out: &mut dyn Collector) -> Result<()> {
        self.visit_operand(&over.expr, PREC_ATOM, out)?;
        out.push_str(" OVER ");
        match &over.window {
            WindowRef::Empty => {
                out.push_str("()");
                Ok(())
            }
            WindowRef::Named(name) => {
                self.quote_identifier(name, out);
                Ok(())
            }
            WindowRef::Inline(window) => self.visit_window(window, out),
        }
    }

    /// `(PARTITION BY .. ORDER BY .. frame)`
    fn visit_window(&self, window: &Window, out: &mut dyn Collector) -> Result<()> {
        out.push_char('(');
        let mut space = false;
        if !window.partitions.is_empty() {
            out.push_str("PARTITION BY ");
            self.visit_list(&window.partitions, out)?;
            space = true;
        }
        if !window.orders.is_empty() {
            if space {
                out.push_char(' ');
            }
            out.push_str("ORDER BY ");
            self.visit_list(&window.orders, out)?;
            space = true;
        }
        if let Some(frame) = &window.frame {
            if space {
                out.push_char(' ');
            }
            self.visit_frame(frame, out)?;
        }
        out.push_char(')');
        Ok(())
    }

    fn visit_frame(&self, frame: &Frame, out: &mut dyn Collector) -> Result<()> {
        out.push_str(frame.units.as_str());
        match frame.end {
            Some(end) => {
                out.push_str(" BETWEEN ");
                push_frame_bound(frame.start, out);
                out.push_str(" AND ");
                push_frame_bound(end, out);
            }
            None => {
                out.push_char(' ');
                push_frame_bound(frame.start, out);
            }
        }
        Ok(())
    }

    fn visit_named_window(&self, window: &NamedWindow, out: &mut dyn Collector) -> Result<()> {
        self.quote_identifier(&window.name, out);
        out.push_str(" AS ");
        self.visit_window(&window.window, out)
    }

    // ==================== joins ====================

    /// Keyword introducing a structured join.
    fn join_keyword(&self, kind: JoinKind) -> Result<&'static str> {
        kind.keyword()
            .ok_or(ArelError::unsupported(self.dialect(), "keyword for a raw join"))
    }

    fn visit_join(&self, join: &Join, out: &mut dyn Collector) -> Result<()> {
        if join.kind == JoinKind::String {
            return self.visit(&join.relation, out);
        }
        out.push_str(self.join_keyword(join.kind)?);
        out.push_char(' ');
        self.visit(&join.relation, out)?;
        match &join.constraint {
            Some(JoinConstraint::On(predicate)) => {
                out.push_str(" ON ");
                self.visit(predicate, out)
            }
            Some(JoinConstraint::Using(columns)) => {
                out.push_str(" USING (");
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.quote_identifier(column, out);
                }
                out.push_char(')');
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// The relation and its joins, space separated.
    fn visit_join_source(&self, source: &JoinSource, out: &mut dyn Collector) -> Result<()> {
        let mut first = true;
        if let Some(left) = &source.left {
            self.visit(left, out)?;
            first = false;
        }
        for join in &source.right {
            if !first {
                out.push_char(' ');
            }
            self.visit_join(join, out)?;
            first = false;
        }
        Ok(())
    }

    // ==================== SELECT ====================

    fn visit_with(&self, with: &With, out: &mut dyn Collector) -> Result<()> {
        out.push_str(if with.recursive { "WITH RECURSIVE " } else { "WITH " });
        for (i, cte) in with.ctes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.visit_cte(cte, out)?;
        }
        out.push_char(' ');
        Ok(())
    }

    fn visit_cte(&self, cte: &Cte, out: &mut dyn Collector) -> Result<()> {
        self.quote_identifier(&cte.name, out);
        out.push_str(" AS ");
        match cte.materialized {
            Some(true) => out.push_str("MATERIALIZED "),
            Some(false) => out.push_str("NOT MATERIALIZED "),
            None => {}
        }
        self.visit_operand(&cte.relation, PREC_ATOM, out)
    }

    fn visit_values_list(&self, rows: &[Vec<Node>], out: &mut dyn Collector) -> Result<()> {
        out.push_str("VALUES ");
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_char('(');
            self.visit_list(row, out)?;
            out.push_char(')');
        }
        Ok(())
    }

    fn visit_set_quantifier(&self, quantifier: &SetQuantifier, out: &mut dyn Collector) -> Result<()> {
        match quantifier {
            SetQuantifier::All => out.push_str(" ALL"),
            SetQuantifier::Distinct => out.push_str(" DISTINCT"),
            SetQuantifier::DistinctOn(_) => {
                return Err(ArelError::unsupported(self.dialect(), "DISTINCT ON"));
            }
        }
        Ok(())
    }

    fn visit_select_core(&self, core: &SelectCore, out: &mut dyn Collector) -> Result<()> {
        out.push_str("SELECT");
        if !core.optimizer_hints.is_empty() {
            out.push_str(" /*+ ");
            for (i, hint) in core.optimizer_hints.iter().enumerate() {
                if i > 0 {
                    out.push_char(' ');
                }
                out.push_str(&sanitize_comment(hint));
            }
            out.push_str(" */");
        }
        if let Some(quantifier) = &core.set_quantifier {
            self.visit_set_quantifier(quantifier, out)?;
        }

        out.push_char(' ');
        if core.projections.is_empty() {
            out.push_char('*');
        }
        for (i, projection) in core.projections.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.visit_projection(projection, out)?;
        }

        if core.source.left.is_none() && !core.source.right.is_empty() {
            return Err(ArelError::incomplete("SELECT", "joins without a FROM relation"));
        }
        if !core.source.is_empty() {
            out.push_str(" FROM ");
            self.visit_join_source(&core.source, out)?;
        }
        if !core.wheres.is_empty() {
            out.push_str(" WHERE ");
            self.visit_conjunction(&core.wheres, out)?;
        }
        if !core.groups.is_empty() {
            out.push_str(" GROUP BY ");
            self.visit_list(&core.groups, out)?;
        }
        if !core.havings.is_empty() {
            out.push_str(" HAVING ");
            self.visit_conjunction(&core.havings, out)?;
        }
        if !core.windows.is_empty() {
            out.push_str(" WINDOW ");
            for (i, window) in core.windows.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.visit_named_window(window, out)?;
            }
        }
        for comment in &core.comment {
            out.push_str(" /* ");
            out.push_str(&sanitize_comment(comment));
            out.push_str(" */");
        }
        Ok(())
    }

    /// `left OP right`. Plain sides are parenthesized; a nested compound
    /// with the same operator is flattened (only on the left for EXCEPT),
    /// any other nested compound is parenthesized.
    fn visit_set_operation(&self, operation: &SetOperation, out: &mut dyn Collector) -> Result<()> {
        self.visit_compound_operand(&operation.left, operation.op, true, out)?;
        out.push_char(' ');
        out.push_str(operation.op.as_str());
        out.push_char(' ');
        self.visit_compound_operand(&operation.right, operation.op, false, out)
    }

    fn visit_compound_operand(
        &self,
        statement: &SelectStatement,
        parent: SetOperator,
        is_left: bool,
        out: &mut dyn Collector,
    ) -> Result<()> {
        match &statement.body {
            SelectBody::Compound(inner)
                if !statement.has_modifiers()
                    && inner.op == parent
                    && (is_left || parent != SetOperator::Except) =>
            {
                self.visit_set_operation(inner, out)
            }
            _ => {
                out.push_char('(');
                self.visit_select_statement(statement, out)?;
                out.push_char(')');
                Ok(())
            }
        }
    }

    fn visit_limit_offset(
        &self,
        limit: Option<&Node>,
        offset: Option<&Node>,
        out: &mut dyn Collector,
    ) -> Result<()> {
        if let Some(limit) = limit {
            out.push_str(" LIMIT ");
            self.visit(limit, out)?;
        }
        if let Some(offset) = offset {
            out.push_str(" OFFSET ");
            self.visit(offset, out)?;
        }
        Ok(())
    }

    fn visit_lock(&self, lock: &Lock, out: &mut dyn Collector) -> Result<()> {
        match lock {
            Lock::ForUpdate => out.push_str(" FOR UPDATE"),
            Lock::Raw(sql) => {
                out.push_char(' ');
                out.push_str(sql);
            }
        }
        Ok(())
    }

    fn visit_orders(&self, orders: &[Node], out: &mut dyn Collector) -> Result<()> {
        if !orders.is_empty() {
            out.push_str(" ORDER BY ");
            self.visit_list(orders, out)?;
        }
        Ok(())
    }

    /// A full SELECT, unparenthesized.
    fn visit_select_statement(&self, statement: &SelectStatement, out: &mut dyn Collector) -> Result<()> {
        if let Some(with) = &statement.with {
            self.visit_with(with, out)?;
        }
        match &statement.body {
            SelectBody::Core(core) => self.visit_select_core(core, out)?,
            SelectBody::Compound(operation) => self.visit_set_operation(operation, out)?,
        }
        self.visit_orders(&statement.orders, out)?;
        self.visit_limit_offset(statement.limit.as_ref(), statement.offset.as_ref(), out)?;
        if let Some(lock) = &statement.lock {
            self.visit_lock(lock, out)?;
        }
        Ok(())
    }

    // ==================== DML ====================

    /// Rendered after the column list when there is nothing to insert.
    fn visit_default_values(&self, out: &mut dyn Collector) -> Result<()> {
        out.push_str(" DEFAULT VALUES");
        Ok(())
    }

    /// The query an UPDATE or DELETE restricts its key to, as in
    /// `key IN (subselect)`.
    fn key_subselect(&self, _key: &Node, subselect: SelectStatement) -> SelectStatement {
        subselect
    }

    fn visit_insert_statement(&self, statement: &InsertStatement, out: &mut dyn Collector) -> Result<()> {
        let relation = statement
            .relation
            .as_ref()
            .ok_or(ArelError::incomplete("INSERT", "no target relation"))?;
        out.push_str("INSERT INTO ");
        self.quote_identifier(&relation.name, out);
        if !statement.columns.is_empty() {
            out.push_str(" (");
            for (i, column) in statement.columns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.quote_identifier(&column.name, out);
            }
            out.push_char(')');
        }
        match &statement.source {
            Some(InsertSource::Values(rows)) => {
                out.push_char(' ');
                self.visit_values_list(rows, out)
            }
            Some(InsertSource::Select(select)) => {
                out.push_char(' ');
                self.visit_select_statement(select, out)
            }
            None if statement.columns.is_empty() => self.visit_default_values(out),
            None => Err(ArelError::incomplete("INSERT", "columns without values")),
        }
    }

    fn visit_update_statement(&self, statement: &UpdateStatement, out: &mut dyn Collector) -> Result<()> {
        render_update(self, statement, out)
    }

    fn visit_delete_statement(&self, statement: &DeleteStatement, out: &mut dyn Collector) -> Result<()> {
        render_delete(self, statement, out)
    }
}

/// The target of an UPDATE or DELETE.
pub(crate) fn target_relation<'a>(source: &'a JoinSource, kind: &'static str) -> Result<&'a Node> {
    source
        .left
        .as_deref()
        .ok_or(ArelError::incomplete(kind, "no target relation"))
}

/// `UPDATE relation SET ... WHERE ...`, moving joins, ordering and limits
/// into a key sub-select.
pub(crate) fn render_update<V: Visitor + ?Sized>(
    visitor: &V,
    statement: &UpdateStatement,
    out: &mut dyn Collector,
) -> Result<()> {
    let relation = target_relation(&statement.relation, "UPDATE")?;
    if statement.values.is_empty() {
        return Err(ArelError::incomplete("UPDATE", "no SET assignments"));
    }
    let restriction = key_restriction(visitor, statement, "UPDATE")?;

    out.push_str("UPDATE ");
    visitor.visit(relation, out)?;
    out.push_str(" SET ");
    visitor.visit_list(&statement.values, out)?;
    visit_restriction(visitor, restriction.as_ref(), &statement.wheres, out)
}

/// `DELETE FROM relation WHERE ...`, with the same rewrite as
/// [`render_update`].
pub(crate) fn render_delete<V: Visitor + ?Sized>(
    visitor: &V,
    statement: &DeleteStatement,
    out: &mut dyn Collector,
) -> Result<()> {
    let relation = target_relation(&statement.relation, "DELETE")?;
    let restriction = key_restriction(visitor, statement, "DELETE")?;

    out.push_str("DELETE FROM ");
    visitor.visit(relation, out)?;
    visit_restriction(visitor, restriction.as_ref(), &statement.wheres, out)
}

fn push_frame_bound(bound: FrameBound, out: &mut dyn Collector) {
    match bound {
        FrameBound::UnboundedPreceding => out.push_str("UNBOUNDED PRECEDING"),
        FrameBound::Preceding(n) => {
            out.push_str(&n.to_string());
            out.push_str(" PRECEDING");
        }
        FrameBound::CurrentRow => out.push_str("CURRENT ROW"),
        FrameBound::Following(n) => {
            out.push_str(&n.to_string());
            out.push_str(" FOLLOWING");
        }
        FrameBound::UnboundedFollowing => out.push_str("UNBOUNDED FOLLOWING"),
    }
}

/// Strips comment delimiters so user text cannot close the comment early.
fn sanitize_comment(text: &str) -> String {
    let mut sanitized = text.to_string();
    while sanitized.contains("/*") || sanitized.contains("*/") {
        sanitized = sanitized.replace("/*", "").replace("*/", "");
    }
    sanitized.trim().to_string()
}

/// For UPDATE/DELETE with joins, ordering or limits, the equivalent
/// `key IN (SELECT key FROM ... )` predicate. `None` when the statement can
/// be rendered as is.
pub(crate) fn key_restriction<V: Visitor + ?Sized, S: Restrictable>(
    visitor: &V,
    statement: &S,
    kind: &'static str,
) -> Result<Option<Node>> {
    if !statement.needs_subselect() {
        return Ok(None);
    }
    let key = statement
        .key()
        .ok_or(ArelError::incomplete(kind, "joins, ORDER BY or LIMIT require a key"))?;

    let core = SelectCore {
        projections: vec![key.clone()],
        wheres: statement.wheres().to_vec(),
        source: statement.source().clone(),
        ..SelectCore::default()
    };
    let subselect = SelectStatement {
        body: SelectBody::Core(Box::new(core)),
        orders: statement.orders().to_vec(),
        limit: statement.limit().cloned(),
        offset: statement.offset().cloned(),
        ..SelectStatement::default()
    };
    let subselect = visitor.key_subselect(key, subselect);
    Ok(Some(Node::binary(BinaryOperator::In, key.clone(), subselect)))
}

fn visit_restriction<V: Visitor + ?Sized>(
    visitor: &V,
    restriction: Option<&Node>,
    wheres: &[Node],
    out: &mut dyn Collector,
) -> Result<()> {
    match restriction {
        Some(predicate) => {
            out.push_str(" WHERE ");
            visitor.visit(predicate, out)
        }
        None if wheres.is_empty() => Ok(()),
        None => {
            out.push_str(" WHERE ");
            visitor.visit_conjunction(wheres, out)
        }
    }
}

// =============================================================================
// Dialect selection
// =============================================================================

static TO_SQL: ToSql = ToSql;
static POSTGRES: Postgres = Postgres;
static MYSQL: MySql = MySql;
static SQLITE: Sqlite = Sqlite;

/// The visitor that renders `dialect`.
pub fn visitor_for(dialect: Dialect) -> &'static dyn Visitor {
    match dialect {
        Dialect::Generic => &TO_SQL,
        Dialect::PostgreSQL => &POSTGRES,
        Dialect::MySQL => &MYSQL,
        Dialect::SQLite => &SQLITE,
    }
}

/// Adds [`visitor`](DialectExt::visitor) to [`Dialect`].
pub trait DialectExt {
    fn visitor(self) -> &'static dyn Visitor;
}

impl DialectExt for Dialect {
    fn visitor(self) -> &'static dyn Visitor {
        visitor_for(self)
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Renders with inline literals.
pub(crate) fn render_sql<F>(visitor: &dyn Visitor, render: F) -> Result<String>
where
    F: FnOnce(&dyn Visitor, &mut dyn Collector) -> Result<()>,
{
    profile_render!("to_sql");
    let mut collector = SqlString::new();
    match render(visitor, &mut collector) {
        Ok(()) => {
            let sql = collector.into_string();
            arel_trace_sql!(visitor.dialect(), sql, 0);
            Ok(sql)
        }
        Err(error) => {
            arel_trace_error!(visitor.dialect(), error);
            Err(error)
        }
    }
}

/// Renders with placeholders in the visitor dialect's style.
pub(crate) fn render_compiled<F>(visitor: &dyn Visitor, render: F) -> Result<CompiledQuery>
where
    F: FnOnce(&dyn Visitor, &mut dyn Collector) -> Result<()>,
{
    profile_render!("compile");
    let mut collector = BindCollector::new();
    match render(visitor, &mut collector) {
        Ok(()) => {
            let query = collector.finish(visitor.dialect().placeholder_style());
            arel_trace_sql!(visitor.dialect(), query.sql(), query.binds().len());
            Ok(query)
        }
        Err(error) => {
            arel_trace_error!(visitor.dialect(), error);
            Err(error)
        }
    }
}

impl Node {
    /// Renders the node with the generic dialect and inline literals.
    pub fn to_sql(&self) -> Result<String> {
        self.to_sql_with(&TO_SQL)
    }

    pub fn to_sql_in(&self, dialect: Dialect) -> Result<String> {
        self.to_sql_with(visitor_for(dialect))
    }

    pub fn to_sql_with(&self, visitor: &dyn Visitor) -> Result<String> {
        render_sql(visitor, |visitor, out| visitor.visit_statement(self, out))
    }

    /// Renders the node as parameterized SQL for `dialect`.
    pub fn compile(&self, dialect: Dialect) -> Result<CompiledQuery> {
        self.compile_with(visitor_for(dialect))
    }

    pub fn compile_with(&self, visitor: &dyn Visitor) -> Result<CompiledQuery> {
        render_compiled(visitor, |visitor, out| visitor.visit_statement(self, out))
    }

    /// Graphviz rendering of the tree.
    pub fn to_dot(&self) -> String {
        Dot::new().render(self)
    }
}
