//! Aggregate and named SQL functions.

use compact_str::CompactString;

use super::Node;

/// Which function a [`Function`] node calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Count,
    Sum,
    Max,
    Min,
    Avg,
    /// `EXISTS (subquery)`
    Exists,
    /// Any other function, called by name (`COALESCE`, `LOWER`, ...)
    Named(CompactString),
}

impl FunctionKind {
    /// SQL spelling of the function name.
    pub fn sql_name(&self) -> &str {
        match self {
            FunctionKind::Count => "COUNT",
            FunctionKind::Sum => "SUM",
            FunctionKind::Max => "MAX",
            FunctionKind::Min => "MIN",
            FunctionKind::Avg => "AVG",
            FunctionKind::Exists => "EXISTS",
            FunctionKind::Named(name) => name,
        }
    }

    /// Prefix of the implicit projection alias (`avg_id`).
    pub const fn alias_prefix(&self) -> Option<&'static str> {
        match self {
            FunctionKind::Count => Some("count"),
            FunctionKind::Sum => Some("sum"),
            FunctionKind::Max => Some("max"),
            FunctionKind::Min => Some("min"),
            FunctionKind::Avg => Some("avg"),
            FunctionKind::Exists | FunctionKind::Named(_) => None,
        }
    }
}

/// Result-column alias of a function call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionAlias {
    pub name: CompactString,
    /// Implicit aliases are derived from the argument column and only render
    /// when the call is projected directly.
    pub implicit: bool,
}

/// A function call: `NAME([DISTINCT] args...) [AS alias]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub kind: FunctionKind,
    pub expressions: Vec<Node>,
    pub distinct: bool,
    pub alias: Option<FunctionAlias>,
}

impl Function {
    pub fn new(kind: FunctionKind, expressions: Vec<Node>) -> Self {
        Self {
            kind,
            expressions,
            distinct: false,
            alias: None,
        }
    }

    /// An aggregate over one expression. When the expression is a plain
    /// column the call gets the implicit alias `{fn}_{column}`, with the
    /// column name lowercased and reduced to word characters.
    pub(crate) fn aggregate(kind: FunctionKind, expr: Node, distinct: bool) -> Self {
        let alias = match (&expr, kind.alias_prefix()) {
            (Node::Attribute(attr), Some(prefix)) if attr.name != "*" => {
                let column = alias_word(&attr.name);
                (!column.is_empty()).then(|| FunctionAlias {
                    name: compact_str::format_compact!("{}_{}", prefix, column),
                    implicit: true,
                })
            }
            _ => None,
        };
        Self {
            kind,
            expressions: vec![expr],
            distinct,
            alias,
        }
    }

    /// Sets an explicit alias, replacing any implicit one.
    pub fn with_alias(mut self, name: impl Into<CompactString>) -> Self {
        self.alias = Some(FunctionAlias {
            name: name.into(),
            implicit: false,
        });
        self
    }
}

/// `"Unit Price"` becomes `unit_price`: runs of anything but ASCII letters,
/// digits and `_` collapse to one `_`, trimmed at both ends.
fn alias_word(name: &str) -> CompactString {
    let mut word = CompactString::default();
    let mut gap = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if gap && !word.is_empty() {
                word.push('_');
            }
            gap = false;
            word.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    word
}

impl From<Function> for Node {
    fn from(function: Function) -> Self {
        Node::Function(Box::new(function))
    }
}
