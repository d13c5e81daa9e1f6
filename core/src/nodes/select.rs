//! SELECT statement containers.

use compact_str::CompactString;

use super::{JoinSource, NamedWindow, Node};

// =============================================================================
// SelectCore
// =============================================================================

/// `DISTINCT`, `ALL` or PostgreSQL's `DISTINCT ON (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetQuantifier {
    All,
    Distinct,
    DistinctOn(Vec<Node>),
}

/// One `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ... WINDOW ...`
/// block. `wheres` and `havings` are implicit conjunctions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectCore {
    pub projections: Vec<Node>,
    pub wheres: Vec<Node>,
    pub groups: Vec<Node>,
    pub havings: Vec<Node>,
    pub source: JoinSource,
    pub set_quantifier: Option<SetQuantifier>,
    pub windows: Vec<NamedWindow>,
    pub comment: Vec<CompactString>,
    pub optimizer_hints: Vec<CompactString>,
}

// =============================================================================
// Set operations
// =============================================================================

/// Compound select operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::UnionAll => "UNION ALL",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Except => "EXCEPT",
        }
    }
}

/// `left <op> right`, both sides full statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetOperation {
    pub op: SetOperator,
    pub left: Box<SelectStatement>,
    pub right: Box<SelectStatement>,
}

/// Either a single core or a compound of two statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectBody {
    Core(Box<SelectCore>),
    Compound(SetOperation),
}

impl Default for SelectBody {
    fn default() -> Self {
        SelectBody::Core(Box::default())
    }
}

// =============================================================================
// Statement-level clauses
// =============================================================================

/// Row locking clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lock {
    /// `FOR UPDATE`
    ForUpdate,
    /// A hand-written clause such as `FOR SHARE SKIP LOCKED`
    Raw(CompactString),
}

/// A common table expression: `"name" AS [NOT] [MATERIALIZED] (relation)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cte {
    pub name: CompactString,
    pub relation: Node,
    pub materialized: Option<bool>,
}

impl Cte {
    pub fn new(name: impl Into<CompactString>, relation: impl Into<Node>) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            materialized: None,
        }
    }

    pub fn materialized(mut self) -> Self {
        self.materialized = Some(true);
        self
    }

    pub fn not_materialized(mut self) -> Self {
        self.materialized = Some(false);
        self
    }

    /// A reference to the CTE usable as a FROM relation.
    pub fn table(&self) -> super::Table {
        super::Table::new(self.name.clone())
    }
}

impl From<Cte> for Node {
    fn from(cte: Cte) -> Self {
        Node::Cte(Box::new(cte))
    }
}

/// `WITH [RECURSIVE] cte, ...`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct With {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

// =============================================================================
// SelectStatement
// =============================================================================

/// A full SELECT: optional CTEs, a body, and the statement-level ORDER BY,
/// LIMIT, OFFSET and lock that apply to the body as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectStatement {
    pub with: Option<With>,
    pub body: SelectBody,
    pub orders: Vec<Node>,
    pub limit: Option<Node>,
    pub offset: Option<Node>,
    pub lock: Option<Lock>,
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single core, or `None` for a compound statement.
    pub fn core(&self) -> Option<&SelectCore> {
        match &self.body {
            SelectBody::Core(core) => Some(core.as_ref()),
            SelectBody::Compound(_) => None,
        }
    }

    pub fn core_mut(&mut self) -> Option<&mut SelectCore> {
        match &mut self.body {
            SelectBody::Core(core) => Some(core.as_mut()),
            SelectBody::Compound(_) => None,
        }
    }

    /// Returns `true` when anything besides the body is set.
    pub fn has_modifiers(&self) -> bool {
        self.with.is_some()
            || !self.orders.is_empty()
            || self.limit.is_some()
            || self.offset.is_some()
            || self.lock.is_some()
    }

    /// Number of columns the statement projects. `*` and empty projection
    /// lists count as unknown.
    pub fn arity(&self) -> Option<usize> {
        match &self.body {
            SelectBody::Core(core) => {
                let star = core.projections.iter().any(|p| match p {
                    Node::Star => true,
                    Node::Attribute(attr) => attr.name == "*",
                    _ => false,
                });
                if core.projections.is_empty() || star {
                    None
                } else {
                    Some(core.projections.len())
                }
            }
            SelectBody::Compound(op) => op.left.arity(),
        }
    }
}

impl From<SelectStatement> for Node {
    fn from(statement: SelectStatement) -> Self {
        Node::SelectStatement(Box::new(statement))
    }
}
