//! Comparison, pattern, membership and range predicates.
//!
//! Every predicate exists as a free function taking the left-hand
//! expression, and as an inherent method on [`Attribute`] and [`Node`]
//! generated by [`impl_predications!`]:
//!
//! ```ignore
//! use arel_core::predications::*;
//!
//! let users = Table::new("users");
//! eq(users.attr("id"), 10);          // "users"."id" = 10
//! users.attr("id").eq(10);           // same node
//! users.attr("id").eq_any([1, 2]);   // ("users"."id" = 1 OR "users"."id" = 2)
//! users.attr("id").eq(None::<i32>);  // "users"."id" IS NULL
//! ```
//!
//! Host values compared against an attribute are wrapped in `Casted`, so the
//! visitor knows which column they belong to.

use core::ops::{Bound, RangeBounds};

use compact_str::CompactString;

use crate::error::{ArelError, Result};
use crate::nodes::{
    Attribute, BinaryOperator, Case, Function, FunctionKind, Node, Operand, SelectStatement,
};

// =============================================================================
// Comparison
// =============================================================================

fn compare(op: BinaryOperator, left: Node, right: Operand) -> Node {
    let right = right.quoted_for(&left);
    Node::binary(op, left, right)
}

macro_rules! comparison_fns {
    ($($(#[$meta:meta])* $name:ident => $op:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(left: impl Into<Node>, right: impl Into<Operand>) -> Node {
                compare(BinaryOperator::$op, left.into(), right.into())
            }
        )+
    };
}

comparison_fns! {
    /// `left = right`, or `left IS NULL` when `right` is NULL
    eq => Equality,
    /// `left != right`, or `left IS NOT NULL` when `right` is NULL
    not_eq => NotEqual,
    /// `left > right`
    gt => GreaterThan,
    /// `left >= right`
    gteq => GreaterThanOrEqual,
    /// `left < right`
    lt => LessThan,
    /// `left <= right`
    lteq => LessThanOrEqual,
    /// `left IS DISTINCT FROM right`
    is_distinct_from => IsDistinctFrom,
    /// `left IS NOT DISTINCT FROM right`
    is_not_distinct_from => IsNotDistinctFrom,
    /// `left @> right`
    contains => Contains,
    /// `left && right`
    overlaps => Overlaps,
    /// `left || right`
    concat => Concat,
}

// =============================================================================
// Pattern matching
// =============================================================================

/// Case-insensitive `LIKE`.
pub fn matches(left: impl Into<Node>, pattern: impl Into<Operand>) -> Node {
    matches_with(left, pattern, None, false)
}

/// Case-insensitive `NOT LIKE`.
pub fn does_not_match(left: impl Into<Node>, pattern: impl Into<Operand>) -> Node {
    does_not_match_with(left, pattern, None, false)
}

/// `LIKE` with an optional `ESCAPE` character and explicit case sensitivity.
pub fn matches_with(
    left: impl Into<Node>,
    pattern: impl Into<Operand>,
    escape: Option<&str>,
    case_sensitive: bool,
) -> Node {
    pattern_match(left.into(), pattern.into(), escape, case_sensitive, false)
}

/// `NOT LIKE` with an optional `ESCAPE` character and explicit case
/// sensitivity.
pub fn does_not_match_with(
    left: impl Into<Node>,
    pattern: impl Into<Operand>,
    escape: Option<&str>,
    case_sensitive: bool,
) -> Node {
    pattern_match(left.into(), pattern.into(), escape, case_sensitive, true)
}

fn pattern_match(
    left: Node,
    pattern: Operand,
    escape: Option<&str>,
    case_sensitive: bool,
    negated: bool,
) -> Node {
    let right = pattern.quoted_for(&left);
    Node::Matches {
        left: Box::new(left),
        right: Box::new(right),
        escape: escape.map(CompactString::from),
        case_sensitive,
        negated,
    }
}

/// Case-sensitive regular-expression match.
pub fn matches_regexp(left: impl Into<Node>, pattern: impl Into<Operand>) -> Node {
    regexp(left.into(), pattern.into(), true, false)
}

/// Regular-expression match with explicit case sensitivity.
pub fn matches_regexp_with(
    left: impl Into<Node>,
    pattern: impl Into<Operand>,
    case_sensitive: bool,
) -> Node {
    regexp(left.into(), pattern.into(), case_sensitive, false)
}

/// Negated case-sensitive regular-expression match.
pub fn does_not_match_regexp(left: impl Into<Node>, pattern: impl Into<Operand>) -> Node {
    regexp(left.into(), pattern.into(), true, true)
}

fn regexp(left: Node, pattern: Operand, case_sensitive: bool, negated: bool) -> Node {
    let right = pattern.quoted_for(&left);
    Node::Regexp {
        left: Box::new(left),
        right: Box::new(right),
        case_sensitive,
        negated,
    }
}

// =============================================================================
// Membership
// =============================================================================

fn membership<I>(op: BinaryOperator, left: Node, values: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Operand>,
{
    let items = values
        .into_iter()
        .map(|value| Into::<Operand>::into(value).quoted_for(&left))
        .collect();
    Node::binary(op, left, Node::List(items))
}

/// `left IN (values...)`; an empty list renders `1=0`.
pub fn r#in<I>(left: impl Into<Node>, values: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Operand>,
{
    membership(BinaryOperator::In, left.into(), values)
}

/// `left NOT IN (values...)`; an empty list renders `1=1`.
pub fn not_in<I>(left: impl Into<Node>, values: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Operand>,
{
    membership(BinaryOperator::NotIn, left.into(), values)
}

fn subquery_membership(
    op: BinaryOperator,
    left: Node,
    subquery: SelectStatement,
) -> Result<Node> {
    let expected = left.arity();
    match subquery.arity() {
        Some(found) if found != expected => Err(ArelError::SubqueryArity { expected, found }),
        _ => Ok(Node::binary(op, left, subquery)),
    }
}

/// `left IN (SELECT ...)`.
///
/// Fails with [`ArelError::SubqueryArity`] when the sub-select projects a
/// different number of columns than `left` (a [`tuple`](crate::tuple) has
/// one column per element).
pub fn in_subquery(left: impl Into<Node>, subquery: impl Into<SelectStatement>) -> Result<Node> {
    subquery_membership(BinaryOperator::In, left.into(), subquery.into())
}

/// `left NOT IN (SELECT ...)`, checked like [`in_subquery`].
pub fn not_in_subquery(
    left: impl Into<Node>,
    subquery: impl Into<SelectStatement>,
) -> Result<Node> {
    subquery_membership(BinaryOperator::NotIn, left.into(), subquery.into())
}

// =============================================================================
// Ranges
// =============================================================================

fn bound_value<T: Clone + Into<Operand>>(bound: Bound<&T>) -> Bound<Operand> {
    match bound {
        Bound::Included(v) => Bound::Included(v.clone().into()),
        Bound::Excluded(v) => Bound::Excluded(v.clone().into()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

/// Range test built from any Rust range:
///
/// | range    | SQL                          |
/// |----------|------------------------------|
/// | `a..=b`  | `x BETWEEN a AND b`          |
/// | `a..b`   | `x >= a AND x < b`           |
/// | `a..`    | `x >= a`                     |
/// | `..b`    | `x < b`                      |
/// | `..=b`   | `x <= b`                     |
/// | `..`     | `1=1`                        |
pub fn between<T, R>(left: impl Into<Node>, range: R) -> Node
where
    T: Clone + Into<Operand>,
    R: RangeBounds<T>,
{
    let left = left.into();
    let start = bound_value(range.start_bound());
    let end = bound_value(range.end_bound());
    match (start, end) {
        (Bound::Unbounded, Bound::Unbounded) => not_in(left, core::iter::empty::<Operand>()),
        (Bound::Included(low), Bound::Included(high)) => {
            let low = low.quoted_for(&left);
            let high = high.quoted_for(&left);
            Node::binary(BinaryOperator::Between, left, Node::And(vec![low, high]))
        }
        (start, Bound::Unbounded) => lower_bound(left, start),
        (Bound::Unbounded, end) => upper_bound(left, end),
        (start, end) => lower_bound(left.clone(), start).and(upper_bound(left, end)),
    }
}

/// Negation of [`between`]: `(x < a OR x > b)` and its half-open variants.
/// `..` renders `1=0`.
pub fn not_between<T, R>(left: impl Into<Node>, range: R) -> Node
where
    T: Clone + Into<Operand>,
    R: RangeBounds<T>,
{
    let left = left.into();
    let start = bound_value(range.start_bound());
    let end = bound_value(range.end_bound());
    let below = match start {
        Bound::Included(v) => Some(lt(left.clone(), v)),
        Bound::Excluded(v) => Some(lteq(left.clone(), v)),
        Bound::Unbounded => None,
    };
    let above = match end {
        Bound::Included(v) => Some(gt(left.clone(), v)),
        Bound::Excluded(v) => Some(gteq(left.clone(), v)),
        Bound::Unbounded => None,
    };
    match (below, above) {
        (Some(below), Some(above)) => below.or(above),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => r#in(left, core::iter::empty::<Operand>()),
    }
}

fn lower_bound(left: Node, bound: Bound<Operand>) -> Node {
    match bound {
        Bound::Included(v) => gteq(left, v),
        Bound::Excluded(v) => gt(left, v),
        Bound::Unbounded => not_in(left, core::iter::empty::<Operand>()),
    }
}

fn upper_bound(left: Node, bound: Bound<Operand>) -> Node {
    match bound {
        Bound::Included(v) => lteq(left, v),
        Bound::Excluded(v) => lt(left, v),
        Bound::Unbounded => not_in(left, core::iter::empty::<Operand>()),
    }
}

// =============================================================================
// Any / All
// =============================================================================

/// `(p(v1) OR p(v2) OR ...)`; no values renders `1=0`.
pub fn grouping_any<T>(left: &Node, values: impl IntoIterator<Item = T>, predicate: impl Fn(Node, T) -> Node) -> Node {
    let mut predicates = values.into_iter().map(|value| predicate(left.clone(), value));
    match predicates.next() {
        Some(first) => predicates
            .fold(first, |acc, next| Node::binary(BinaryOperator::Or, acc, next))
            .grouping(),
        None => r#in(left.clone(), core::iter::empty::<Operand>()),
    }
}

/// `(p(v1) AND p(v2) AND ...)`; no values renders `1=1`.
pub fn grouping_all<T>(left: &Node, values: impl IntoIterator<Item = T>, predicate: impl Fn(Node, T) -> Node) -> Node {
    let predicates: Vec<Node> = values
        .into_iter()
        .map(|value| predicate(left.clone(), value))
        .collect();
    if predicates.is_empty() {
        not_in(left.clone(), core::iter::empty::<Operand>())
    } else {
        Node::And(predicates).grouping()
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// `COUNT(expr)`
pub fn count(expr: impl Into<Node>) -> Node {
    Function::aggregate(FunctionKind::Count, expr.into(), false).into()
}

/// `COUNT(DISTINCT expr)`
pub fn count_distinct(expr: impl Into<Node>) -> Node {
    Function::aggregate(FunctionKind::Count, expr.into(), true).into()
}

/// `SUM(expr)`
pub fn sum(expr: impl Into<Node>) -> Node {
    Function::aggregate(FunctionKind::Sum, expr.into(), false).into()
}

/// `MAX(expr)`
pub fn maximum(expr: impl Into<Node>) -> Node {
    Function::aggregate(FunctionKind::Max, expr.into(), false).into()
}

/// `MIN(expr)`
pub fn minimum(expr: impl Into<Node>) -> Node {
    Function::aggregate(FunctionKind::Min, expr.into(), false).into()
}

/// `AVG(expr)`
pub fn average(expr: impl Into<Node>) -> Node {
    Function::aggregate(FunctionKind::Avg, expr.into(), false).into()
}

// =============================================================================
// Method generation
// =============================================================================

/// Generates the predication methods on an expression type.
///
/// Methods borrow `self` so a column can be reused across predicates.
macro_rules! impl_predications {
    ($ty:ty) => {
        impl $ty {
            impl_predications!(@binary $ty;
                eq, not_eq, gt, gteq, lt, lteq,
                is_distinct_from, is_not_distinct_from,
                contains, overlaps, concat,
                matches, does_not_match,
                matches_regexp, does_not_match_regexp
            );

            impl_predications!(@any_all $ty;
                eq, not_eq, gt, gteq, lt, lteq, matches, does_not_match
            );

            impl_predications!(@aggregate $ty;
                count, count_distinct, sum, maximum, minimum, average
            );

            pub fn matches_with(
                &self,
                pattern: impl Into<Operand>,
                escape: Option<&str>,
                case_sensitive: bool,
            ) -> Node {
                matches_with(self.clone(), pattern, escape, case_sensitive)
            }

            pub fn does_not_match_with(
                &self,
                pattern: impl Into<Operand>,
                escape: Option<&str>,
                case_sensitive: bool,
            ) -> Node {
                does_not_match_with(self.clone(), pattern, escape, case_sensitive)
            }

            pub fn matches_regexp_with(&self, pattern: impl Into<Operand>, case_sensitive: bool) -> Node {
                matches_regexp_with(self.clone(), pattern, case_sensitive)
            }

            pub fn r#in<I>(&self, values: I) -> Node
            where
                I: IntoIterator,
                I::Item: Into<Operand>,
            {
                r#in(self.clone(), values)
            }

            pub fn not_in<I>(&self, values: I) -> Node
            where
                I: IntoIterator,
                I::Item: Into<Operand>,
            {
                not_in(self.clone(), values)
            }

            /// `(self IN (..) OR self IN (..) ...)`, one list per item.
            pub fn in_any<I, L>(&self, lists: I) -> Node
            where
                I: IntoIterator<Item = L>,
                L: IntoIterator,
                L::Item: Into<Operand>,
            {
                grouping_any(&Node::from(self.clone()), lists, |left, list| r#in(left, list))
            }

            /// `(self IN (..) AND self IN (..) ...)`, one list per item.
            pub fn in_all<I, L>(&self, lists: I) -> Node
            where
                I: IntoIterator<Item = L>,
                L: IntoIterator,
                L::Item: Into<Operand>,
            {
                grouping_all(&Node::from(self.clone()), lists, |left, list| r#in(left, list))
            }

            /// `(self NOT IN (..) OR self NOT IN (..) ...)`, one list per item.
            pub fn not_in_any<I, L>(&self, lists: I) -> Node
            where
                I: IntoIterator<Item = L>,
                L: IntoIterator,
                L::Item: Into<Operand>,
            {
                grouping_any(&Node::from(self.clone()), lists, |left, list| not_in(left, list))
            }

            /// `(self NOT IN (..) AND self NOT IN (..) ...)`, one list per item.
            pub fn not_in_all<I, L>(&self, lists: I) -> Node
            where
                I: IntoIterator<Item = L>,
                L: IntoIterator,
                L::Item: Into<Operand>,
            {
                grouping_all(&Node::from(self.clone()), lists, |left, list| not_in(left, list))
            }

            pub fn in_subquery(&self, subquery: impl Into<SelectStatement>) -> Result<Node> {
                in_subquery(self.clone(), subquery)
            }

            pub fn not_in_subquery(&self, subquery: impl Into<SelectStatement>) -> Result<Node> {
                not_in_subquery(self.clone(), subquery)
            }

            pub fn between<T, R>(&self, range: R) -> Node
            where
                T: Clone + Into<Operand>,
                R: RangeBounds<T>,
            {
                between(self.clone(), range)
            }

            pub fn not_between<T, R>(&self, range: R) -> Node
            where
                T: Clone + Into<Operand>,
                R: RangeBounds<T>,
            {
                not_between(self.clone(), range)
            }

            /// Starts `CASE self WHEN value THEN result`.
            pub fn when(&self, value: impl Into<Operand>, result: impl Into<Operand>) -> Case {
                Case::new(Some(self.clone().into())).when(value, result)
            }
        }
    };

    (@binary $ty:ty; $($name:ident),+) => {
        $(
            pub fn $name(&self, right: impl Into<Operand>) -> Node {
                $name(self.clone(), right)
            }
        )+
    };

    (@any_all $ty:ty; $($name:ident),+) => {
        paste::paste! {
            $(
                pub fn [<$name _any>]<I>(&self, values: I) -> Node
                where
                    I: IntoIterator,
                    I::Item: Into<Operand>,
                {
                    grouping_any(&Node::from(self.clone()), values, |left, value| $name(left, value))
                }

                pub fn [<$name _all>]<I>(&self, values: I) -> Node
                where
                    I: IntoIterator,
                    I::Item: Into<Operand>,
                {
                    grouping_all(&Node::from(self.clone()), values, |left, value| $name(left, value))
                }
            )+
        }
    };

    (@aggregate $ty:ty; $($name:ident),+) => {
        $(
            pub fn $name(&self) -> Node {
                $name(self.clone())
            }
        )+
    };
}

impl_predications!(Attribute);
impl_predications!(Node);

// =============================================================================
// Attribute-only helpers
// =============================================================================

impl Attribute {
    /// `self ASC`
    pub fn asc(&self) -> Node {
        Node::from(self.clone()).asc()
    }

    /// `self DESC`
    pub fn desc(&self) -> Node {
        Node::from(self.clone()).desc()
    }

    /// `self AS name`
    pub fn alias(&self, name: impl Into<CompactString>) -> Node {
        Node::from(self.clone()).alias(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Table;

    #[test]
    fn test_free_function_matches_method() {
        let users = Table::new("users");
        assert_eq!(eq(users.attr("id"), 1), users.attr("id").eq(1));
        assert_eq!(gt(&users.attr("id"), 1), users.attr("id").gt(1));
    }

    #[test]
    fn test_values_are_casted_against_attributes() {
        let users = Table::new("users");
        match users.attr("name").eq("bob") {
            Node::Binary { right, .. } => assert!(matches!(*right, Node::Casted { .. })),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_values_are_quoted_against_expressions() {
        let node = Node::SqlLiteral("lower(name)".into()).eq("bob");
        match node {
            Node::Binary { right, .. } => assert!(matches!(*right, Node::Quoted(_))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_any_is_left_nested_or_in_grouping() {
        let id = Table::new("users").attr("id");
        let expected = Node::binary(
            BinaryOperator::Or,
            Node::binary(BinaryOperator::Or, id.eq(1), id.eq(2)),
            id.eq(3),
        )
        .grouping();
        assert_eq!(id.eq_any([1, 2, 3]), expected);
    }

    #[test]
    fn test_all_is_grouped_and() {
        let id = Table::new("users").attr("id");
        assert_eq!(
            id.gt_all([1, 2]),
            Node::And(vec![id.gt(1), id.gt(2)]).grouping()
        );
    }

    #[test]
    fn test_subquery_arity_is_checked() {
        let users = Table::new("users");
        let mut statement = SelectStatement::new();
        if let Some(core) = statement.core_mut() {
            core.projections.push(users.attr("id").into());
            core.projections.push(users.attr("name").into());
        }
        let err = users.attr("id").in_subquery(statement.clone()).unwrap_err();
        assert_eq!(err, ArelError::SubqueryArity { expected: 1, found: 2 });

        let pair = crate::tuple([users.attr("id"), users.attr("name")]);
        assert!(pair.in_subquery(statement).is_ok());
    }

    #[test]
    fn test_between_shapes() {
        let age = Table::new("users").attr("age");
        assert!(matches!(
            age.between(18..=65),
            Node::Binary {
                op: BinaryOperator::Between,
                ..
            }
        ));
        assert_eq!(age.between(18..), age.gteq(18));
        assert_eq!(age.between(..65), age.lt(65));
        assert_eq!(age.between(18..65), age.gteq(18).and(age.lt(65)));
    }
}
