//! Window specifications and the OVER clause.
//!
//! ```ignore
//! users.attr("salary").sum().over(
//!     Window::new()
//!         .partition_by([users.attr("dept")])
//!         .order_by([users.attr("salary").desc()])
//!         .rows_between(FrameBound::UnboundedPreceding, FrameBound::CurrentRow),
//! )
//! ```

use compact_str::CompactString;

use super::Node;

// =============================================================================
// Frame Bounds
// =============================================================================

/// Specifies a bound for a window frame (ROWS/RANGE BETWEEN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameBound {
    /// UNBOUNDED PRECEDING
    UnboundedPreceding,
    /// N PRECEDING
    Preceding(u64),
    /// CURRENT ROW
    CurrentRow,
    /// N FOLLOWING
    Following(u64),
    /// UNBOUNDED FOLLOWING
    UnboundedFollowing,
}

/// `ROWS` or `RANGE` framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameUnits {
    Rows,
    Range,
}

impl FrameUnits {
    pub const fn as_str(self) -> &'static str {
        match self {
            FrameUnits::Rows => "ROWS",
            FrameUnits::Range => "RANGE",
        }
    }
}

/// A frame clause. Without an `end` the frame renders in its short form
/// (`ROWS UNBOUNDED PRECEDING`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub units: FrameUnits,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

// =============================================================================
// Window
// =============================================================================

/// The content inside `OVER (...)` or `WINDOW name AS (...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Window {
    pub partitions: Vec<Node>,
    pub orders: Vec<Node>,
    pub frame: Option<Frame>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends PARTITION BY expressions.
    pub fn partition_by<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.partitions.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Appends ORDER BY expressions.
    pub fn order_by<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.orders.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// `ROWS <start>`
    pub fn rows(self, start: FrameBound) -> Self {
        self.framed(FrameUnits::Rows, start, None)
    }

    /// `ROWS BETWEEN <start> AND <end>`
    pub fn rows_between(self, start: FrameBound, end: FrameBound) -> Self {
        self.framed(FrameUnits::Rows, start, Some(end))
    }

    /// `RANGE <start>`
    pub fn range(self, start: FrameBound) -> Self {
        self.framed(FrameUnits::Range, start, None)
    }

    /// `RANGE BETWEEN <start> AND <end>`
    pub fn range_between(self, start: FrameBound, end: FrameBound) -> Self {
        self.framed(FrameUnits::Range, start, Some(end))
    }

    fn framed(mut self, units: FrameUnits, start: FrameBound, end: Option<FrameBound>) -> Self {
        self.frame = Some(Frame { units, start, end });
        self
    }
}

/// A window declared in the SELECT's `WINDOW` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedWindow {
    pub name: CompactString,
    pub window: Window,
}

impl NamedWindow {
    pub fn new(name: impl Into<CompactString>, window: Window) -> Self {
        Self {
            name: name.into(),
            window,
        }
    }
}

/// What follows `OVER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WindowRef {
    /// `OVER ()`
    Empty,
    /// `OVER "name"`
    Named(CompactString),
    /// `OVER (PARTITION BY ...)`
    Inline(Window),
}

impl From<Window> for WindowRef {
    fn from(window: Window) -> Self {
        WindowRef::Inline(window)
    }
}

impl From<&NamedWindow> for WindowRef {
    fn from(window: &NamedWindow) -> Self {
        WindowRef::Named(window.name.clone())
    }
}

/// `expr OVER window`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Over {
    pub expr: Node,
    pub window: WindowRef,
}
