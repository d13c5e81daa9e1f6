use arel_types::Dialect;

use super::{AnsiQuoting, Quoting, Visitor};

/// Dialect-neutral SQL with double-quoted identifiers.
///
/// Every rendering rule comes from the provided methods of [`Visitor`];
/// the dialect visitors start from the same rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToSql;

impl Visitor for ToSql {
    fn dialect(&self) -> Dialect {
        Dialect::Generic
    }

    fn quoting(&self) -> &dyn Quoting {
        &AnsiQuoting
    }
}
