use arel_types::Dialect;

use super::{PostgresQuoting, Quoting, Visitor};
use crate::collectors::Collector;
use crate::error::Result;
use crate::nodes::{BinaryOperator, SetQuantifier};

/// PostgreSQL: `ILIKE`, `~` regular expressions, `DISTINCT ON` and `$n`
/// placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Visitor for Postgres {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }

    fn quoting(&self) -> &dyn Quoting {
        &PostgresQuoting
    }

    fn binary_operator<'a>(&self, op: &'a BinaryOperator) -> &'a str {
        match op {
            BinaryOperator::BitwiseXor => "#",
            other => other.as_str(),
        }
    }

    fn like_operator(&self, case_sensitive: bool, negated: bool) -> &'static str {
        match (case_sensitive, negated) {
            (true, false) => "LIKE",
            (true, true) => "NOT LIKE",
            (false, false) => "ILIKE",
            (false, true) => "NOT ILIKE",
        }
    }

    fn regexp_operator(&self, case_sensitive: bool, negated: bool) -> Result<&'static str> {
        Ok(match (case_sensitive, negated) {
            (true, false) => "~",
            (false, false) => "~*",
            (true, true) => "!~",
            (false, true) => "!~*",
        })
    }

    fn visit_set_quantifier(&self, quantifier: &SetQuantifier, out: &mut dyn Collector) -> Result<()> {
        match quantifier {
            SetQuantifier::All => out.push_str(" ALL"),
            SetQuantifier::Distinct => out.push_str(" DISTINCT"),
            SetQuantifier::DistinctOn(exprs) => {
                out.push_str(" DISTINCT ON (");
                self.visit_list(exprs, out)?;
                out.push_char(')');
            }
        }
        Ok(())
    }
}
