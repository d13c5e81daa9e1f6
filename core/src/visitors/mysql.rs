use arel_types::Dialect;

use super::{MySqlQuoting, Quoting, Visitor, render_delete, render_update, target_relation};
use crate::collectors::Collector;
use crate::error::{ArelError, Result};
use crate::nodes::{
    DeleteStatement, JoinKind, JoinSource, Node, NullsOrder, Ordering, PREC_COMPARISON,
    PREC_PREFIX, Restrictable, SelectBody, SelectCore, SelectStatement, TableAlias,
    UpdateStatement,
};

/// Largest row count MySQL accepts; stands in for a missing LIMIT.
const MAX_ROWS: &str = "18446744073709551615";

/// Name of the derived table wrapping a key sub-select.
const DERIVED_TABLE: &str = "__arel_temp";

/// MySQL rejects ORDER BY / LIMIT on a multi-table UPDATE or DELETE and has
/// no OFFSET there at all.
fn renders_natively<S: Restrictable>(statement: &S) -> bool {
    let joined = !statement.source().right.is_empty();
    let ordered_or_limited = !statement.orders().is_empty() || statement.limit().is_some();
    statement.offset().is_none() && !(joined && ordered_or_limited)
}

/// MySQL: backtick identifiers, `<=>`, `CONCAT()`, and native ORDER BY /
/// LIMIT on UPDATE and DELETE.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Visitor for MySql {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn quoting(&self) -> &dyn Quoting {
        &MySqlQuoting
    }

    fn visit_bin(&self, expr: &Node, out: &mut dyn Collector) -> Result<()> {
        out.push_str("BINARY ");
        self.visit_operand(expr, PREC_PREFIX, out)
    }

    /// `a <=> b` is MySQL's NULL-safe equality.
    fn visit_distinct_from(
        &self,
        not_distinct: bool,
        left: &Node,
        right: &Node,
        out: &mut dyn Collector,
    ) -> Result<()> {
        if !not_distinct {
            out.push_str("NOT ");
        }
        self.visit_operand(left, PREC_COMPARISON + 1, out)?;
        out.push_str(" <=> ");
        self.visit_operand(right, PREC_COMPARISON + 1, out)
    }

    fn visit_concat(&self, left: &Node, right: &Node, out: &mut dyn Collector) -> Result<()> {
        out.push_str("CONCAT(");
        self.visit(left, out)?;
        out.push_str(", ");
        self.visit(right, out)?;
        out.push_char(')');
        Ok(())
    }

    fn like_operator(&self, case_sensitive: bool, negated: bool) -> &'static str {
        match (case_sensitive, negated) {
            (true, false) => "LIKE BINARY",
            (true, true) => "NOT LIKE BINARY",
            (false, false) => "LIKE",
            (false, true) => "NOT LIKE",
        }
    }

    fn regexp_operator(&self, _case_sensitive: bool, negated: bool) -> Result<&'static str> {
        Ok(if negated { "NOT REGEXP" } else { "REGEXP" })
    }

    fn join_keyword(&self, kind: JoinKind) -> Result<&'static str> {
        match kind {
            JoinKind::FullOuter => Err(ArelError::unsupported(self.dialect(), "FULL OUTER JOIN")),
            other => other
                .keyword()
                .ok_or(ArelError::unsupported(self.dialect(), "keyword for a raw join")),
        }
    }

    /// MySQL sorts NULLs first ascending; an explicit placement is emulated
    /// with a leading `IS [NOT] NULL` sort key.
    fn visit_ordering(&self, ordering: &Ordering, out: &mut dyn Collector) -> Result<()> {
        match ordering.nulls {
            Some(NullsOrder::First) => {
                self.visit_operand(&ordering.expr, PREC_COMPARISON + 1, out)?;
                out.push_str(" IS NOT NULL, ");
            }
            Some(NullsOrder::Last) => {
                self.visit_operand(&ordering.expr, PREC_COMPARISON + 1, out)?;
                out.push_str(" IS NULL, ");
            }
            None => {}
        }
        self.visit(&ordering.expr, out)?;
        out.push_char(' ');
        out.push_str(ordering.direction.as_str());
        Ok(())
    }

    fn visit_limit_offset(
        &self,
        limit: Option<&Node>,
        offset: Option<&Node>,
        out: &mut dyn Collector,
    ) -> Result<()> {
        match limit {
            Some(limit) => {
                out.push_str(" LIMIT ");
                self.visit(limit, out)?;
            }
            None if offset.is_some() => {
                out.push_str(" LIMIT ");
                out.push_str(MAX_ROWS);
            }
            None => {}
        }
        if let Some(offset) = offset {
            out.push_str(" OFFSET ");
            self.visit(offset, out)?;
        }
        Ok(())
    }

    fn visit_default_values(&self, out: &mut dyn Collector) -> Result<()> {
        out.push_str(" () VALUES ()");
        Ok(())
    }

    /// MySQL cannot use LIMIT inside `IN (...)` nor read the table being
    /// changed, so the key sub-select is read through a derived table.
    fn key_subselect(&self, key: &Node, subselect: SelectStatement) -> SelectStatement {
        let column = match key {
            Node::Attribute(attribute) => attribute.unqualified(),
            other => other.clone(),
        };
        let derived = TableAlias {
            relation: Box::new(subselect.into()),
            name: DERIVED_TABLE.into(),
        };
        SelectStatement {
            body: SelectBody::Core(Box::new(SelectCore {
                projections: vec![column],
                source: JoinSource::new(derived),
                ..SelectCore::default()
            })),
            ..SelectStatement::default()
        }
    }

    /// Joins, or ORDER BY and LIMIT, render in place. Together, or with an
    /// OFFSET, they go through the key sub-select.
    fn visit_update_statement(&self, statement: &UpdateStatement, out: &mut dyn Collector) -> Result<()> {
        if !renders_natively(statement) {
            return render_update(self, statement, out);
        }
        target_relation(&statement.relation, "UPDATE")?;
        if statement.values.is_empty() {
            return Err(ArelError::incomplete("UPDATE", "no SET assignments"));
        }

        out.push_str("UPDATE ");
        self.visit_join_source(&statement.relation, out)?;
        out.push_str(" SET ");
        self.visit_list(&statement.values, out)?;
        if !statement.wheres.is_empty() {
            out.push_str(" WHERE ");
            self.visit_conjunction(&statement.wheres, out)?;
        }
        self.visit_orders(&statement.orders, out)?;
        self.visit_limit_offset(statement.limit.as_ref(), None, out)
    }

    /// A joined DELETE names its target before `FROM`.
    fn visit_delete_statement(&self, statement: &DeleteStatement, out: &mut dyn Collector) -> Result<()> {
        if !renders_natively(statement) {
            return render_delete(self, statement, out);
        }
        let relation = target_relation(&statement.relation, "DELETE")?;

        out.push_str("DELETE ");
        if !statement.relation.right.is_empty() {
            match relation {
                Node::Table(table) => self.quote_identifier(table.qualifier(), out),
                other => self.visit(other, out)?,
            }
            out.push_char(' ');
        }
        out.push_str("FROM ");
        self.visit_join_source(&statement.relation, out)?;
        if !statement.wheres.is_empty() {
            out.push_str(" WHERE ");
            self.visit_conjunction(&statement.wheres, out)?;
        }
        self.visit_orders(&statement.orders, out)?;
        self.visit_limit_offset(statement.limit.as_ref(), None, out)
    }
}
