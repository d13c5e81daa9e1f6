use super::Node;

/// Sort direction of an [`Ordering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    pub const fn reverse(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// Explicit placement of NULLs in an ORDER BY item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    pub const fn reverse(self) -> Self {
        match self {
            NullsOrder::First => NullsOrder::Last,
            NullsOrder::Last => NullsOrder::First,
        }
    }
}

/// `expr ASC|DESC [NULLS FIRST|LAST]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ordering {
    pub expr: Node,
    pub direction: Direction,
    pub nulls: Option<NullsOrder>,
}

impl Ordering {
    pub fn new(expr: impl Into<Node>, direction: Direction) -> Self {
        Self {
            expr: expr.into(),
            direction,
            nulls: None,
        }
    }

    /// Flips both the direction and the NULL placement.
    pub fn reverse(mut self) -> Self {
        self.direction = self.direction.reverse();
        self.nulls = self.nulls.map(NullsOrder::reverse);
        self
    }
}

impl From<Ordering> for Node {
    fn from(ordering: Ordering) -> Self {
        Node::Ordering(Box::new(ordering))
    }
}
