use super::{constrain, impl_render, push_join, row_count};
use crate::error::Result;
use crate::nodes::{DeleteStatement, JoinKind, Node};

/// Builds a DELETE, with the same join/limit rewrite rules as
/// [`UpdateManager`](super::UpdateManager).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteManager {
    ast: DeleteStatement,
}

impl DeleteManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Sets the relation rows are deleted from.
    pub fn from(&mut self, relation: impl Into<Node>) -> &mut Self {
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

    pub fn key(&mut self, key: impl Into<Node>) -> &mut Self {
        self.ast.key = Some(key.into());
        self
    }

    pub fn ast(&self) -> &DeleteStatement {
        &self.ast
    }

    pub fn into_ast(self) -> DeleteStatement {
        self.ast
    }
}

impl_render!(DeleteManager, visit_delete_statement);

impl From<DeleteManager> for Node {
    fn from(manager: DeleteManager) -> Self {
        manager.ast.into()
    }
}
