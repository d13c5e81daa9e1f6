//! Right-hand operands of predications and arithmetic.

use compact_str::CompactString;

use super::{Attribute, Node};
use crate::Value;

/// Either an already-built node or a host value that still has to be quoted.
///
/// Host values compared against an [`Attribute`] become `Casted` nodes that
/// remember the column, anything else becomes `Quoted`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Node(Node),
    Value(Value),
}

impl Operand {
    /// Converts to a node without attribute context.
    pub fn into_node(self) -> Node {
        match self {
            Operand::Node(node) => node,
            Operand::Value(value) => Node::Quoted(value),
        }
    }

    /// Converts to a node quoted for comparison with `left`.
    pub fn quoted_for(self, left: &Node) -> Node {
        match (self, left) {
            (Operand::Node(node), _) => node,
            (Operand::Value(value), Node::Attribute(attribute)) => Node::Casted {
                value,
                attribute: attribute.clone(),
            },
            (Operand::Value(value), _) => Node::Quoted(value),
        }
    }

    /// Returns `true` for a NULL host value.
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Value(Value::Null))
    }
}

impl From<Node> for Operand {
    fn from(node: Node) -> Self {
        Operand::Node(node)
    }
}

impl From<&Node> for Operand {
    fn from(node: &Node) -> Self {
        Operand::Node(node.clone())
    }
}

impl From<Attribute> for Operand {
    fn from(attribute: Attribute) -> Self {
        Operand::Node(Node::Attribute(attribute))
    }
}

impl From<&Attribute> for Operand {
    fn from(attribute: &Attribute) -> Self {
        Operand::Node(Node::Attribute(attribute.clone()))
    }
}

impl From<super::Function> for Operand {
    fn from(function: super::Function) -> Self {
        Operand::Node(function.into())
    }
}

impl From<super::Case> for Operand {
    fn from(case: super::Case) -> Self {
        Operand::Node(case.into())
    }
}

impl From<super::SelectStatement> for Operand {
    fn from(statement: super::SelectStatement) -> Self {
        Operand::Node(statement.into())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        Operand::Value(value.map_or(Value::Null, Into::into))
    }
}

macro_rules! impl_operand_from_value {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Operand {
                #[inline]
                fn from(value: $t) -> Self {
                    Operand::Value(Value::from(value))
                }
            }
        )+
    };
}

impl_operand_from_value!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    bool,
    f32,
    f64,
    &str,
    &String,
    String,
    CompactString,
    Vec<u8>,
    &[u8],
);

#[cfg(feature = "chrono")]
impl_operand_from_value!(chrono::NaiveDate, chrono::NaiveDateTime);

#[cfg(feature = "uuid")]
impl_operand_from_value!(uuid::Uuid);
