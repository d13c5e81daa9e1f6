use super::{Node, Operand};

/// `CASE [operand] WHEN .. THEN .. [ELSE ..] END`
///
/// ```ignore
/// users.attr("status")
///     .when(1, "active")
///     .r#else("inactive")
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Case {
    pub case: Option<Node>,
    pub conditions: Vec<(Node, Node)>,
    pub default: Option<Node>,
}

impl Case {
    pub fn new(case: Option<Node>) -> Self {
        Self {
            case,
            conditions: Vec::new(),
            default: None,
        }
    }

    /// Adds a `WHEN condition THEN result` arm.
    pub fn when(mut self, condition: impl Into<Operand>, result: impl Into<Operand>) -> Self {
        let condition: Operand = condition.into();
        let result: Operand = result.into();
        self.conditions.push((condition.into_node(), result.into_node()));
        self
    }

    /// Sets the `ELSE` arm.
    pub fn r#else(mut self, result: impl Into<Operand>) -> Self {
        let result: Operand = result.into();
        self.default = Some(result.into_node());
        self
    }
}

impl From<Case> for Node {
    fn from(case: Case) -> Self {
        Node::Case(Box::new(case))
    }
}
