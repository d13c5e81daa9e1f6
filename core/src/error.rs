use arel_types::Dialect;
use compact_str::CompactString;
use thiserror::Error;

/// Errors raised while building or rendering a statement tree.
///
/// Construction errors surface from the builder call that detected them,
/// builder-state errors surface when an incomplete statement is rendered, and
/// dialect errors surface from the visitor the first time it meets a
/// construct the dialect cannot express.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArelError {
    /// A membership sub-select projects a different number of columns than
    /// the expression it is compared against
    #[error("IN sub-select must project {expected} column(s), but projects {found}")]
    SubqueryArity { expected: usize, found: usize },

    /// `on` was called before any join was added
    #[error("cannot add a join constraint: no join has been started")]
    NoJoinToConstrain,

    /// `on` was called right after a raw string join
    #[error("cannot add a join constraint to a raw string join")]
    RawJoinConstraint,

    /// A statement is missing a part required to render it
    #[error("{statement} statement is incomplete: {missing}")]
    Incomplete {
        statement: &'static str,
        missing: &'static str,
    },

    /// A clause that only applies to a single SELECT core was added to a
    /// compound (UNION/INTERSECT/EXCEPT) statement
    #[error("cannot add {clause} to a compound select; alias it as a subquery first")]
    CompoundMutation { clause: &'static str },

    /// A named bind parameter was rendered without a value
    #[error("bind parameter `{0}` has no value")]
    UnboundParameter(CompactString),

    /// A host integer does not fit SQL's signed 64-bit integer
    #[error("integer {0} is out of range for a 64-bit SQL integer")]
    IntegerOutOfRange(CompactString),

    /// The dialect has no rendering rule for a construct
    #[error("{feature} is not supported by the {dialect} dialect")]
    Unsupported {
        dialect: Dialect,
        feature: &'static str,
    },
}

impl ArelError {
    /// Shorthand for [`ArelError::Incomplete`].
    pub const fn incomplete(statement: &'static str, missing: &'static str) -> Self {
        ArelError::Incomplete { statement, missing }
    }

    /// Shorthand for [`ArelError::Unsupported`].
    pub const fn unsupported(dialect: Dialect, feature: &'static str) -> Self {
        ArelError::Unsupported { dialect, feature }
    }
}

/// Result type for arel operations
pub type Result<T> = core::result::Result<T, ArelError>;
