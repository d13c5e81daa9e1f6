//! The statement tree.
//!
//! Every SQL construct is a variant of the closed [`Node`] enum. Nodes are
//! plain values: they compare and hash structurally, `clone()` is a deep
//! copy, and nothing in here knows how to render itself. Rendering lives in
//! [`crate::visitors`].

mod case;
mod dml;
mod function;
mod join;
mod operand;
mod ordering;
mod select;
mod table;
mod window;

pub use case::Case;
pub(crate) use dml::Restrictable;
pub use dml::{DeleteStatement, InsertSource, InsertStatement, UpdateStatement};
pub use function::{Function, FunctionAlias, FunctionKind};
pub use join::{Join, JoinConstraint, JoinKind, JoinSource};
pub use operand::Operand;
pub use ordering::{Direction, NullsOrder, Ordering};
pub use select::{
    Cte, Lock, SelectBody, SelectCore, SelectStatement, SetOperation, SetOperator, SetQuantifier,
    With,
};
pub use table::{Attribute, Table, TableAlias};
pub use window::{Frame, FrameBound, FrameUnits, NamedWindow, Over, Window, WindowRef};

use compact_str::CompactString;

use crate::Value;

// =============================================================================
// Operators
// =============================================================================

/// Operators of [`Node::Unary`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `NOT expr`
    Not,
    /// `(expr)`
    Grouping,
    /// `LATERAL expr`
    Lateral,
    /// `CUBE(expr)`
    Cube,
    /// `ROLLUP(expr)`
    Rollup,
    /// `GROUPING SETS(expr)`
    GroupingSet,
    /// `BINARY expr` on MySQL, the bare expression elsewhere
    Bin,
    /// Any other prefix operator, e.g. `~`
    Prefix(CompactString),
}

/// Operators of [`Node::Binary`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Equality,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    IsDistinctFrom,
    IsNotDistinctFrom,
    In,
    NotIn,
    /// Right side is `And([low, high])`
    Between,
    Contains,
    Overlaps,
    Or,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Concat,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseShiftLeft,
    BitwiseShiftRight,
    /// Any other infix operator, e.g. `->>`
    Infix(CompactString),
    /// `expr AS name`
    As,
    /// `column = value` inside `SET`
    Assignment,
    /// `aggregate FILTER (WHERE predicate)`
    Filter,
}

// Binding strength, tightest first.
pub(crate) const PREC_ATOM: u8 = 100;
pub(crate) const PREC_PREFIX: u8 = 90;
pub(crate) const PREC_MULTIPLICATIVE: u8 = 80;
pub(crate) const PREC_ADDITIVE: u8 = 70;
pub(crate) const PREC_OTHER_INFIX: u8 = 60;
pub(crate) const PREC_COMPARISON: u8 = 50;
pub(crate) const PREC_NOT: u8 = 40;
pub(crate) const PREC_AND: u8 = 30;
pub(crate) const PREC_OR: u8 = 20;

impl BinaryOperator {
    /// Generic SQL spelling.
    pub fn as_str(&self) -> &str {
        match self {
            BinaryOperator::Equality => "=",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::IsDistinctFrom => "IS DISTINCT FROM",
            BinaryOperator::IsNotDistinctFrom => "IS NOT DISTINCT FROM",
            BinaryOperator::In => "IN",
            BinaryOperator::NotIn => "NOT IN",
            BinaryOperator::Between => "BETWEEN",
            BinaryOperator::Contains => "@>",
            BinaryOperator::Overlaps => "&&",
            BinaryOperator::Or => "OR",
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Concat => "||",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseShiftLeft => "<<",
            BinaryOperator::BitwiseShiftRight => ">>",
            BinaryOperator::Infix(op) => op,
            BinaryOperator::As => "AS",
            BinaryOperator::Assignment => "=",
            BinaryOperator::Filter => "FILTER",
        }
    }

    pub const fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Or => PREC_OR,
            BinaryOperator::Equality
            | BinaryOperator::NotEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual
            | BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::IsDistinctFrom
            | BinaryOperator::IsNotDistinctFrom
            | BinaryOperator::In
            | BinaryOperator::NotIn
            | BinaryOperator::Between
            | BinaryOperator::Contains
            | BinaryOperator::Overlaps => PREC_COMPARISON,
            BinaryOperator::Addition | BinaryOperator::Subtraction => PREC_ADDITIVE,
            BinaryOperator::Multiplication | BinaryOperator::Division => PREC_MULTIPLICATIVE,
            BinaryOperator::Concat
            | BinaryOperator::BitwiseAnd
            | BinaryOperator::BitwiseOr
            | BinaryOperator::BitwiseXor
            | BinaryOperator::BitwiseShiftLeft
            | BinaryOperator::BitwiseShiftRight
            | BinaryOperator::Infix(_) => PREC_OTHER_INFIX,
            BinaryOperator::As | BinaryOperator::Assignment | BinaryOperator::Filter => PREC_ATOM,
        }
    }

    /// `a op (b op c)` may drop its parentheses.
    pub const fn is_associative(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Or
                | BinaryOperator::Addition
                | BinaryOperator::Multiplication
                | BinaryOperator::Concat
                | BinaryOperator::BitwiseAnd
                | BinaryOperator::BitwiseOr
                | BinaryOperator::BitwiseXor
        )
    }

    /// Comparisons never chain, so operands of equal strength are wrapped on
    /// both sides.
    pub const fn is_comparison(&self) -> bool {
        self.precedence() == PREC_COMPARISON
    }
}

// =============================================================================
// Node
// =============================================================================

/// A named parameter slot, optionally carrying its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindParam {
    pub name: Option<CompactString>,
    pub value: Option<Value>,
}

/// Every construct of the statement tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Table(Table),
    TableAlias(TableAlias),
    Attribute(Attribute),
    /// A column rendered without its relation
    UnqualifiedColumn(Attribute),
    /// Raw SQL, rendered verbatim
    SqlLiteral(CompactString),
    /// A host value without column context
    Quoted(Value),
    /// A host value compared against `attribute`
    Casted { value: Value, attribute: Attribute },
    BindParam(BindParam),
    True,
    False,
    /// Bare `*`
    Star,
    /// `a, b, c`; parenthesized where used as an operand
    List(Vec<Node>),
    Unary {
        op: UnaryOperator,
        expr: Box<Node>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Conjunction of all children
    And(Vec<Node>),
    /// `LIKE` / `ILIKE` and their negations
    Matches {
        left: Box<Node>,
        right: Box<Node>,
        escape: Option<CompactString>,
        case_sensitive: bool,
        negated: bool,
    },
    /// Regular-expression match
    Regexp {
        left: Box<Node>,
        right: Box<Node>,
        case_sensitive: bool,
        negated: bool,
    },
    Function(Box<Function>),
    /// `EXTRACT(field FROM expr)`
    Extract {
        expr: Box<Node>,
        field: CompactString,
    },
    /// `CAST(expr AS type_name)`
    Cast {
        expr: Box<Node>,
        type_name: CompactString,
    },
    Case(Box<Case>),
    Join(Box<Join>),
    Ordering(Box<Ordering>),
    Over(Box<Over>),
    Window(Box<Window>),
    NamedWindow(Box<NamedWindow>),
    Cte(Box<Cte>),
    /// `VALUES (..), (..)`
    ValuesList(Vec<Vec<Node>>),
    SelectStatement(Box<SelectStatement>),
    InsertStatement(Box<InsertStatement>),
    UpdateStatement(Box<UpdateStatement>),
    DeleteStatement(Box<DeleteStatement>),
}

impl Node {
    // ==================== constructors ====================

    #[inline]
    pub fn unary(op: UnaryOperator, expr: impl Into<Node>) -> Self {
        Node::Unary {
            op,
            expr: Box::new(expr.into()),
        }
    }

    #[inline]
    pub fn binary(op: BinaryOperator, left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Node::Binary {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// `(expr)`
    pub fn grouping(self) -> Self {
        Node::unary(UnaryOperator::Grouping, self)
    }

    // ==================== boolean combinators ====================

    /// `self AND other`
    pub fn and(self, other: impl Into<Node>) -> Self {
        Node::And(vec![self, other.into()])
    }

    /// `(self OR other)`; the disjunction is always grouped so it keeps its
    /// meaning when later ANDed.
    pub fn or(self, other: impl Into<Node>) -> Self {
        Node::binary(BinaryOperator::Or, self, other).grouping()
    }

    /// `NOT self`
    pub fn not(self) -> Self {
        Node::unary(UnaryOperator::Not, self)
    }

    // ==================== projection helpers ====================

    /// `self AS name`. On a function call the alias becomes the call's own,
    /// replacing any implicit alias.
    pub fn alias(self, name: impl Into<CompactString>) -> Self {
        match self {
            Node::Function(function) => (*function).with_alias(name).into(),
            other => Node::binary(BinaryOperator::As, other, Node::SqlLiteral(name.into())),
        }
    }

    /// `self OVER (window)`
    pub fn over(self, window: impl Into<WindowRef>) -> Self {
        Node::Over(Box::new(Over {
            expr: self,
            window: window.into(),
        }))
    }

    /// `self OVER "name"`
    pub fn over_named(self, name: impl Into<CompactString>) -> Self {
        self.over(WindowRef::Named(name.into()))
    }

    /// `self OVER ()`
    pub fn over_empty(self) -> Self {
        self.over(WindowRef::Empty)
    }

    /// `self FILTER (WHERE predicate)`
    pub fn filter(self, predicate: impl Into<Node>) -> Self {
        Node::binary(BinaryOperator::Filter, self, predicate)
    }

    // ==================== ordering ====================

    pub fn asc(self) -> Self {
        Ordering::new(self, Direction::Asc).into()
    }

    pub fn desc(self) -> Self {
        Ordering::new(self, Direction::Desc).into()
    }

    /// Places NULLs first; a non-ordering node is ordered ascending first.
    pub fn nulls_first(self) -> Self {
        self.with_nulls(NullsOrder::First)
    }

    /// Places NULLs last; a non-ordering node is ordered ascending first.
    pub fn nulls_last(self) -> Self {
        self.with_nulls(NullsOrder::Last)
    }

    /// Flips an ordering; any other node is ordered descending.
    pub fn reverse(self) -> Self {
        match self {
            Node::Ordering(ordering) => (*ordering).reverse().into(),
            other => other.desc(),
        }
    }

    fn with_nulls(self, nulls: NullsOrder) -> Self {
        let mut ordering = match self {
            Node::Ordering(ordering) => *ordering,
            other => Ordering::new(other, Direction::Asc),
        };
        ordering.nulls = Some(nulls);
        ordering.into()
    }

    // ==================== inspection ====================

    /// Binding strength used for parenthesization; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Node::Binary { op, .. } => op.precedence(),
            Node::And(children) => match children.as_slice() {
                [] => PREC_ATOM,
                [only] => only.precedence(),
                _ => PREC_AND,
            },
            Node::Unary { op, .. } => match op {
                UnaryOperator::Not => PREC_NOT,
                UnaryOperator::Prefix(_) | UnaryOperator::Bin => PREC_PREFIX,
                _ => PREC_ATOM,
            },
            Node::Matches { .. } | Node::Regexp { .. } => PREC_COMPARISON,
            _ => PREC_ATOM,
        }
    }

    /// Returns `true` for a quoted or casted NULL.
    pub fn is_null_value(&self) -> bool {
        matches!(
            self,
            Node::Quoted(Value::Null) | Node::Casted { value: Value::Null, .. }
        )
    }

    /// Returns `true` for `(expr)`.
    pub fn is_grouping(&self) -> bool {
        matches!(
            self,
            Node::Unary {
                op: UnaryOperator::Grouping,
                ..
            }
        )
    }

    /// Number of values this expression produces when compared with `IN`.
    pub fn arity(&self) -> usize {
        match self {
            Node::Unary {
                op: UnaryOperator::Grouping,
                expr,
            } => expr.arity(),
            Node::List(items) => items.len(),
            _ => 1,
        }
    }

    /// Short type name, used by the graphviz visitor.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Table(_) => "Table",
            Node::TableAlias(_) => "TableAlias",
            Node::Attribute(_) => "Attribute",
            Node::UnqualifiedColumn(_) => "UnqualifiedColumn",
            Node::SqlLiteral(_) => "SqlLiteral",
            Node::Quoted(_) => "Quoted",
            Node::Casted { .. } => "Casted",
            Node::BindParam(_) => "BindParam",
            Node::True => "True",
            Node::False => "False",
            Node::Star => "Star",
            Node::List(_) => "List",
            Node::Unary { .. } => "Unary",
            Node::Binary { .. } => "Binary",
            Node::And(_) => "And",
            Node::Matches { .. } => "Matches",
            Node::Regexp { .. } => "Regexp",
            Node::Function(_) => "Function",
            Node::Extract { .. } => "Extract",
            Node::Cast { .. } => "Cast",
            Node::Case(_) => "Case",
            Node::Join(_) => "Join",
            Node::Ordering(_) => "Ordering",
            Node::Over(_) => "Over",
            Node::Window(_) => "Window",
            Node::NamedWindow(_) => "NamedWindow",
            Node::Cte(_) => "Cte",
            Node::ValuesList(_) => "ValuesList",
            Node::SelectStatement(_) => "SelectStatement",
            Node::InsertStatement(_) => "InsertStatement",
            Node::UpdateStatement(_) => "UpdateStatement",
            Node::DeleteStatement(_) => "DeleteStatement",
        }
    }

    /// Direct child nodes in rendering order.
    pub fn children(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        match self {
            Node::Table(_)
            | Node::Attribute(_)
            | Node::UnqualifiedColumn(_)
            | Node::SqlLiteral(_)
            | Node::Quoted(_)
            | Node::Casted { .. }
            | Node::BindParam(_)
            | Node::True
            | Node::False
            | Node::Star => {}
            Node::TableAlias(alias) => out.push(alias.relation.as_ref()),
            Node::List(items) | Node::And(items) => out.extend(items),
            Node::Unary { expr, .. } | Node::Extract { expr, .. } | Node::Cast { expr, .. } => {
                out.push(expr.as_ref())
            }
            Node::Binary { left, right, .. }
            | Node::Matches { left, right, .. }
            | Node::Regexp { left, right, .. } => {
                out.push(left.as_ref());
                out.push(right.as_ref());
            }
            Node::Function(function) => out.extend(&function.expressions),
            Node::Case(case) => {
                out.extend(case.case.as_ref());
                for (when, then) in &case.conditions {
                    out.push(when);
                    out.push(then);
                }
                out.extend(case.default.as_ref());
            }
            Node::Join(join) => push_join(&mut out, join),
            Node::Ordering(ordering) => out.push(&ordering.expr),
            Node::Over(over) => {
                out.push(&over.expr);
                if let WindowRef::Inline(window) = &over.window {
                    push_window(&mut out, window);
                }
            }
            Node::Window(window) => push_window(&mut out, window),
            Node::NamedWindow(named) => push_window(&mut out, &named.window),
            Node::Cte(cte) => out.push(&cte.relation),
            Node::ValuesList(rows) => out.extend(rows.iter().flatten()),
            Node::SelectStatement(statement) => push_select(&mut out, statement),
            Node::InsertStatement(insert) => match &insert.source {
                Some(InsertSource::Values(rows)) => out.extend(rows.iter().flatten()),
                Some(InsertSource::Select(select)) => push_select(&mut out, select),
                None => {}
            },
            Node::UpdateStatement(update) => {
                push_source(&mut out, &update.relation);
                out.extend(&update.values);
                out.extend(&update.wheres);
                out.extend(&update.orders);
                out.extend(update.limit.as_ref());
                out.extend(update.offset.as_ref());
            }
            Node::DeleteStatement(delete) => {
                push_source(&mut out, &delete.relation);
                out.extend(&delete.wheres);
                out.extend(&delete.orders);
                out.extend(delete.limit.as_ref());
                out.extend(delete.offset.as_ref());
            }
        }
        out
    }
}

fn push_join<'a>(out: &mut Vec<&'a Node>, join: &'a Join) {
    out.push(&join.relation);
    if let Some(JoinConstraint::On(predicate)) = &join.constraint {
        out.push(predicate);
    }
}

fn push_window<'a>(out: &mut Vec<&'a Node>, window: &'a Window) {
    out.extend(&window.partitions);
    out.extend(&window.orders);
}

fn push_source<'a>(out: &mut Vec<&'a Node>, source: &'a JoinSource) {
    out.extend(source.left.as_deref());
    for join in &source.right {
        push_join(out, join);
    }
}

fn push_select<'a>(out: &mut Vec<&'a Node>, statement: &'a SelectStatement) {
    if let Some(with) = &statement.with {
        out.extend(with.ctes.iter().map(|cte| &cte.relation));
    }
    match &statement.body {
        SelectBody::Core(core) => {
            out.extend(&core.projections);
            push_source(out, &core.source);
            out.extend(&core.wheres);
            out.extend(&core.groups);
            out.extend(&core.havings);
            for named in &core.windows {
                push_window(out, &named.window);
            }
        }
        SelectBody::Compound(operation) => {
            push_select(out, &operation.left);
            push_select(out, &operation.right);
        }
    }
    out.extend(&statement.orders);
    out.extend(statement.limit.as_ref());
    out.extend(statement.offset.as_ref());
}

// =============================================================================
// Conversions and operator sugar
// =============================================================================

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

/// Raw SQL, as accepted by `project("*")` or `r#where("id = 1")`.
impl From<&str> for Node {
    fn from(sql: &str) -> Self {
        Node::SqlLiteral(sql.into())
    }
}

impl From<String> for Node {
    fn from(sql: String) -> Self {
        Node::SqlLiteral(sql.into())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        if value { Node::True } else { Node::False }
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}

impl From<Operand> for Node {
    fn from(operand: Operand) -> Self {
        operand.into_node()
    }
}

impl core::ops::BitAnd for Node {
    type Output = Node;

    fn bitand(self, rhs: Node) -> Node {
        self.and(rhs)
    }
}

impl core::ops::BitOr for Node {
    type Output = Node;

    fn bitor(self, rhs: Node) -> Node {
        self.or(rhs)
    }
}

impl core::ops::Not for Node {
    type Output = Node;

    fn not(self) -> Node {
        Node::not(self)
    }
}
