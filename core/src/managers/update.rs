use super::{constrain, impl_render, push_join, row_count};
use crate::error::Result;
use crate::nodes::{Attribute, BinaryOperator, JoinKind, Node, Operand, UpdateStatement};

/// Builds an UPDATE.
///
/// Joins, `order`, `take` and `skip` need a [`key`](UpdateManager::key):
/// the statement is rewritten to
/// `UPDATE t SET ... WHERE key IN (SELECT key FROM ...)`. MySQL keeps a join,
/// or ORDER BY and LIMIT, in place as long as they are not combined and
/// there is no OFFSET.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateManager {
    ast: UpdateStatement,
}

impl UpdateManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Sets the target relation.
    pub fn table(&mut self, relation: impl Into<Node>) -> &mut Self {
        self.ast.relation.left = Some(Box::new(relation.into()));
        self
    }

    pub fn join(&mut self, relation: impl Into<Node>) -> &mut Self {
        self.join_with(relation, JoinKind::Inner)
    }

    pub fn join_with(&mut self, relation: impl Into<Node>, kind: JoinKind) -> &mut Self {
        push_join(&mut self.ast.relation, relation.into(), kind);
        self
    }

    pub fn on(&mut self, predicate: impl Into<Node>) -> Result<&mut Self> {
        constrain(&mut self.ast.relation, predicate.into())?;
        Ok(self)
    }

    /// Appends `column = value` assignments.
    pub fn set<I, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (Attribute, V)>,
        V: Into<Operand>,
    {
        for (column, value) in pairs {
            let value = Into::<Operand>::into(value).quoted_for(&Node::Attribute(column.clone()));
            self.ast
                .values
                .push(Node::binary(BinaryOperator::Assignment, column.unqualified(), value));
        }
        self
    }

    /// Appends a hand-written assignment such as `"count = count + 1"`.
    pub fn set_raw(&mut self, sql: &str) -> &mut Self {
        self.ast.values.push(Node::from(sql));
        self
    }

    pub fn r#where(&mut self, predicate: impl Into<Node>) -> &mut Self {
        self.ast.wheres.push(predicate.into());
        self
    }

    pub fn order<I>(&mut self, orders: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.ast.orders.extend(orders.into_iter().map(Into::into));
        self
    }

    pub fn take(&mut self, limit: u64) -> &mut Self {
        self.ast.limit = Some(row_count(limit));
        self
    }

    pub fn skip(&mut self, offset: u64) -> &mut Self {
        self.ast.offset = Some(row_count(offset));
        self
    }

    /// The column identifying rows for the sub-select rewrite.
    pub fn key(&mut self, key: impl Into<Node>) -> &mut Self {
        self.ast.key = Some(key.into());
        self
    }

    pub fn ast(&self) -> &UpdateStatement {
        &self.ast
    }

    pub fn into_ast(self) -> UpdateStatement {
        self.ast
    }
}

impl_render!(UpdateManager, visit_update_statement);

impl From<UpdateManager> for Node {
    fn from(manager: UpdateManager) -> Self {
        manager.ast.into()
    }
}
