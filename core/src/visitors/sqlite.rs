use arel_types::Dialect;

use super::{Quoting, SqliteQuoting, Visitor};
use crate::collectors::Collector;
use crate::error::{ArelError, Result};
use crate::nodes::{Lock, Node, PREC_COMPARISON, SelectBody, SelectStatement, SetOperator};

/// SQLite: `IS` for NULL-safe comparison, `1`/`0` booleans, no row locks
/// and no parentheses around compound operands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Visitor for Sqlite {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn quoting(&self) -> &dyn Quoting {
        &SqliteQuoting
    }

    fn visit_distinct_from(
        &self,
        not_distinct: bool,
        left: &Node,
        right: &Node,
        out: &mut dyn Collector,
    ) -> Result<()> {
        self.visit_operand(left, PREC_COMPARISON + 1, out)?;
        out.push_str(if not_distinct { " IS " } else { " IS NOT " });
        self.visit_operand(right, PREC_COMPARISON + 1, out)
    }

    fn regexp_operator(&self, _case_sensitive: bool, negated: bool) -> Result<&'static str> {
        Ok(if negated { "NOT REGEXP" } else { "REGEXP" })
    }

    fn visit_extract(&self, _expr: &Node, _field: &str, _out: &mut dyn Collector) -> Result<()> {
        Err(ArelError::unsupported(self.dialect(), "EXTRACT"))
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
            None if offset.is_some() => out.push_str(" LIMIT -1"),
            None => {}
        }
        if let Some(offset) = offset {
            out.push_str(" OFFSET ");
            self.visit(offset, out)?;
        }
        Ok(())
    }

    fn visit_lock(&self, _lock: &Lock, _out: &mut dyn Collector) -> Result<()> {
        Ok(())
    }

    /// Compound operands are written bare. The left side may itself be a
    /// compound; the right side must be a single core. Neither side may
    /// carry its own ORDER BY, LIMIT, OFFSET or WITH.
    fn visit_compound_operand(
        &self,
        statement: &SelectStatement,
        _parent: SetOperator,
        is_left: bool,
        out: &mut dyn Collector,
    ) -> Result<()> {
        if statement.has_modifiers() {
            return Err(ArelError::unsupported(
                self.dialect(),
                "ORDER BY, LIMIT or WITH on a compound select operand",
            ));
        }
        match &statement.body {
            SelectBody::Core(core) => self.visit_select_core(core, out),
            SelectBody::Compound(operation) if is_left => self.visit_set_operation(operation, out),
            SelectBody::Compound(_) => Err(ArelError::unsupported(
                self.dialect(),
                "nested compound select on the right of a set operation",
            )),
        }
    }
}
