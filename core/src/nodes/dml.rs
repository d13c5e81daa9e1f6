//! INSERT, UPDATE and DELETE statement containers.

use super::{Attribute, JoinSource, Node, SelectStatement, Table};

/// Where the inserted rows come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InsertSource {
    /// `VALUES (...), (...)`
    Values(Vec<Vec<Node>>),
    /// `SELECT ...`
    Select(Box<SelectStatement>),
}

/// `INSERT INTO relation (columns) source`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InsertStatement {
    pub relation: Option<Table>,
    pub columns: Vec<Attribute>,
    pub source: Option<InsertSource>,
}

/// `UPDATE relation SET values WHERE wheres`
///
/// `orders`, `limit` and `offset` render natively on MySQL; other dialects
/// move them, together with any joins, into a `key IN (SELECT key ...)`
/// sub-select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UpdateStatement {
    pub relation: JoinSource,
    /// `Assignment` binaries
    pub values: Vec<Node>,
    pub wheres: Vec<Node>,
    pub orders: Vec<Node>,
    pub limit: Option<Node>,
    pub offset: Option<Node>,
    pub key: Option<Node>,
}

/// `DELETE FROM relation WHERE wheres`, with the same sub-select rewrite
/// rules as [`UpdateStatement`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeleteStatement {
    pub relation: JoinSource,
    pub wheres: Vec<Node>,
    pub orders: Vec<Node>,
    pub limit: Option<Node>,
    pub offset: Option<Node>,
    pub key: Option<Node>,
}

/// Shared accessors for the UPDATE/DELETE sub-select rewrite.
pub(crate) trait Restrictable {
    fn source(&self) -> &JoinSource;
    fn wheres(&self) -> &[Node];
    fn orders(&self) -> &[Node];
    fn limit(&self) -> Option<&Node>;
    fn offset(&self) -> Option<&Node>;
    fn key(&self) -> Option<&Node>;

    fn needs_subselect(&self) -> bool {
        !self.source().right.is_empty()
            || !self.orders().is_empty()
            || self.limit().is_some()
            || self.offset().is_some()
    }
}

macro_rules! impl_restrictable {
    ($($ty:ty),+) => {
        $(
            impl Restrictable for $ty {
                fn source(&self) -> &JoinSource {
                    &self.relation
                }
                fn wheres(&self) -> &[Node] {
                    &self.wheres
                }
                fn orders(&self) -> &[Node] {
                    &self.orders
                }
                fn limit(&self) -> Option<&Node> {
                    self.limit.as_ref()
                }
                fn offset(&self) -> Option<&Node> {
                    self.offset.as_ref()
                }
                fn key(&self) -> Option<&Node> {
                    self.key.as_ref()
                }
            }
        )+
    };
}

impl_restrictable!(UpdateStatement, DeleteStatement);

impl From<InsertStatement> for Node {
    fn from(statement: InsertStatement) -> Self {
        Node::InsertStatement(Box::new(statement))
    }
}

impl From<UpdateStatement> for Node {
    fn from(statement: UpdateStatement) -> Self {
        Node::UpdateStatement(Box::new(statement))
    }
}

impl From<DeleteStatement> for Node {
    fn from(statement: DeleteStatement) -> Self {
        Node::DeleteStatement(Box::new(statement))
    }
}
