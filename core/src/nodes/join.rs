//! Join nodes and the FROM clause they hang off.

use compact_str::CompactString;

use super::Node;

// =============================================================================
// Join Kind
// =============================================================================

/// The type of JOIN operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
    /// A hand-written join fragment rendered verbatim
    String,
}

impl JoinKind {
    /// Keyword preceding the joined relation, `None` for raw joins.
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            JoinKind::Inner => Some("INNER JOIN"),
            JoinKind::LeftOuter => Some("LEFT OUTER JOIN"),
            JoinKind::RightOuter => Some("RIGHT OUTER JOIN"),
            JoinKind::FullOuter => Some("FULL OUTER JOIN"),
            JoinKind::Cross => Some("CROSS JOIN"),
            JoinKind::String => None,
        }
    }
}

/// `ON predicate` or `USING (columns)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinConstraint {
    On(Node),
    Using(Vec<CompactString>),
}

// =============================================================================
// Join
// =============================================================================

/// One join appended to a [`JoinSource`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Join {
    pub kind: JoinKind,
    pub relation: Node,
    pub constraint: Option<JoinConstraint>,
}

impl Join {
    pub fn new(kind: JoinKind, relation: impl Into<Node>) -> Self {
        Self {
            kind,
            relation: relation.into(),
            constraint: None,
        }
    }

    /// A raw join fragment such as `"INNER JOIN posts USING (user_id)"`.
    pub fn raw(sql: impl Into<CompactString>) -> Self {
        Self::new(JoinKind::String, Node::SqlLiteral(sql.into()))
    }

    pub fn on(mut self, predicate: impl Into<Node>) -> Self {
        self.constraint = Some(JoinConstraint::On(predicate.into()));
        self
    }
}

impl From<Join> for Node {
    fn from(join: Join) -> Self {
        Node::Join(Box::new(join))
    }
}

/// The FROM relation plus its joins, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JoinSource {
    pub left: Option<Box<Node>>,
    pub right: Vec<Join>,
}

impl JoinSource {
    pub fn new(left: impl Into<Node>) -> Self {
        Self {
            left: Some(Box::new(left.into())),
            right: Vec::new(),
        }
    }

    /// Returns `true` when there is neither a relation nor a join.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_empty()
    }

    /// Adds a relation: joins are appended, anything else replaces the FROM
    /// relation.
    pub fn push(&mut self, relation: Node) {
        match relation {
            Node::Join(join) => self.right.push(*join),
            other => self.left = Some(Box::new(other)),
        }
    }
}
