use core::fmt;

/// Stable identity of a column inside a [`crate::ColumnModel`].
///
/// Ids are arena slots: they are never reused after a column is removed, so a stale id resolves
/// to `None` instead of silently pointing at a different column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnId(pub(crate) u32);

impl ColumnId {
    pub fn index(self) -> u32 {
        self.0
    }

    pub(crate) fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which edge of the viewport a column is pinned to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrozenSide {
    #[default]
    None,
    Left,
    Right,
}

impl FrozenSide {
    pub fn is_frozen(self) -> bool {
        self != Self::None
    }
}

/// The three runs a visible column can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    LeftFrozen,
    Scrolling,
    RightFrozen,
}

/// Which edge of a frozen cell carries the drop-shadow affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShadowPosition {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Row height mode for a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowHeight {
    /// Every cell is measured and arranged at this height.
    Fixed(f64),
    /// Row height is the tallest measured cell.
    #[default]
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Why a layout request was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutReason {
    ViewportResized,
    Scrolled,
    ColumnWidthChanged,
    ColumnVisibilityChanged,
    ColumnsChanged,
    FrozenChanged,
    OptionsChanged,
}

/// A coalesced layout request.
///
/// Several mutations between two passes fold into one request; `reasons` records all of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutRequest {
    bits: u8,
}

impl LayoutRequest {
    pub fn new(reason: LayoutReason) -> Self {
        let mut r = Self::default();
        r.insert(reason);
        r
    }

    pub fn insert(&mut self, reason: LayoutReason) {
        self.bits |= Self::bit(reason);
    }

    pub fn contains(&self, reason: LayoutReason) -> bool {
        self.bits & Self::bit(reason) != 0
    }

    pub fn merge(&mut self, other: LayoutRequest) {
        self.bits |= other.bits;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// `true` when only the scroll offset changed, so column widths can be reused as-is.
    pub fn is_scroll_only(&self) -> bool {
        self.bits == Self::bit(LayoutReason::Scrolled)
    }

    fn bit(reason: LayoutReason) -> u8 {
        1 << (reason as u8)
    }
}
