//! Fluent statement builders.
//!
//! A manager owns one statement tree. Mutators change it in place and
//! return `&mut Self` for chaining; rendering borrows the tree immutably, so
//! a manager can be cloned and the clones extended independently.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteManager;
pub use insert::InsertManager;
pub use select::SelectManager;
pub use update::UpdateManager;

use crate::error::{ArelError, Result};
use crate::nodes::{Join, JoinConstraint, JoinKind, JoinSource, Node, Table};
use crate::value::Value;

/// Adds `to_sql*`, `compile*` and `to_dot` to a manager. The manager must
/// provide `fn check(&self) -> Result<()>` for builder-state errors.
macro_rules! impl_render {
    ($manager:ty, $visit:ident) => {
        impl $manager {
            /// Renders with the generic dialect and inline literals.
            pub fn to_sql(&self) -> $crate::error::Result<String> {
                self.to_sql_in(arel_types::Dialect::Generic)
            }

            pub fn to_sql_in(&self, dialect: arel_types::Dialect) -> $crate::error::Result<String> {
                self.to_sql_with($crate::visitors::visitor_for(dialect))
            }

            pub fn to_sql_with(
                &self,
                visitor: &dyn $crate::visitors::Visitor,
            ) -> $crate::error::Result<String> {
                self.check()?;
                $crate::visitors::render_sql(visitor, |visitor, out| visitor.$visit(&self.ast, out))
            }

            /// Renders parameterized SQL in `dialect`'s placeholder style.
            pub fn compile(
                &self,
                dialect: arel_types::Dialect,
            ) -> $crate::error::Result<$crate::collectors::CompiledQuery> {
                self.compile_with($crate::visitors::visitor_for(dialect))
            }

            pub fn compile_with(
                &self,
                visitor: &dyn $crate::visitors::Visitor,
            ) -> $crate::error::Result<$crate::collectors::CompiledQuery> {
                self.check()?;
                $crate::visitors::render_compiled(visitor, |visitor, out| {
                    visitor.$visit(&self.ast, out)
                })
            }

            /// Graphviz rendering of the statement tree.
            pub fn to_dot(&self) -> String {
                $crate::nodes::Node::from(self.ast.clone()).to_dot()
            }
        }
    };
}

pub(crate) use impl_render;

//------------------------------------------------------------------------------
// Shared join handling
//------------------------------------------------------------------------------

/// Appends a join; raw SQL relations become string joins.
pub(crate) fn push_join(source: &mut JoinSource, relation: Node, kind: JoinKind) {
    let kind = match relation {
        Node::SqlLiteral(_) => JoinKind::String,
        _ => kind,
    };
    source.right.push(Join::new(kind, relation));
}

/// Constrains the most recent join. A second `on` is ANDed with the first.
pub(crate) fn constrain(source: &mut JoinSource, predicate: Node) -> Result<()> {
    let join = last_structured_join(source)?;
    join.constraint = Some(JoinConstraint::On(match join.constraint.take() {
        Some(JoinConstraint::On(existing)) => existing.and(predicate),
        _ => predicate,
    }));
    Ok(())
}

/// Replaces the constraint of the most recent join with `USING (columns)`.
pub(crate) fn constrain_using(source: &mut JoinSource, columns: Vec<compact_str::CompactString>) -> Result<()> {
    let join = last_structured_join(source)?;
    join.constraint = Some(JoinConstraint::Using(columns));
    Ok(())
}

fn last_structured_join(source: &mut JoinSource) -> Result<&mut Join> {
    let join = source.right.last_mut().ok_or(ArelError::NoJoinToConstrain)?;
    if join.kind == JoinKind::String {
        return Err(ArelError::RawJoinConstraint);
    }
    Ok(join)
}

/// Row counts beyond `i64::MAX` are clamped; no database accepts more.
pub(crate) fn row_count(n: u64) -> Node {
    Node::Quoted(Value::Integer(i64::try_from(n).unwrap_or(i64::MAX)))
}

//------------------------------------------------------------------------------
// Table shortcuts
//------------------------------------------------------------------------------

impl Table {
    /// A fresh `SELECT ... FROM self`.
    pub fn from(&self) -> SelectManager {
        let mut manager = SelectManager::new();
        manager.from(self);
        manager
    }

    pub fn project<I>(&self, projections: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let mut manager = self.from();
        manager.project(projections);
        manager
    }

    pub fn r#where(&self, predicate: impl Into<Node>) -> SelectManager {
        let mut manager = self.from();
        manager.r#where(predicate);
        manager
    }

    pub fn order<I>(&self, orders: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let mut manager = self.from();
        manager.order(orders);
        manager
    }

    pub fn group<I>(&self, groups: I) -> SelectManager
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let mut manager = self.from();
        manager.group(groups);
        manager
    }

    pub fn having(&self, predicate: impl Into<Node>) -> SelectManager {
        let mut manager = self.from();
        manager.having(predicate);
        manager
    }

    pub fn take(&self, limit: u64) -> SelectManager {
        let mut manager = self.from();
        manager.take(limit);
        manager
    }

    pub fn skip(&self, offset: u64) -> SelectManager {
        let mut manager = self.from();
        manager.skip(offset);
        manager
    }

    /// `FROM self INNER JOIN relation`, to be constrained with `on`.
    pub fn join(&self, relation: impl Into<Node>) -> SelectManager {
        let mut manager = self.from();
        manager.join(relation);
        manager
    }

    /// `FROM self LEFT OUTER JOIN relation`, to be constrained with `on`.
    pub fn outer_join(&self, relation: impl Into<Node>) -> SelectManager {
        let mut manager = self.from();
        manager.outer_join(relation);
        manager
    }
}
