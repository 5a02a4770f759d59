use alloc::vec::Vec;

use crate::{ColumnId, ColumnModel, FrozenSide, Segment};

/// A visible column placed on the row's x axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSlot {
    pub id: ColumnId,
    pub segment: Segment,
    /// Index within its segment, in display order.
    pub index: usize,
    /// Left edge in viewport coordinates.
    pub left: f64,
    /// Display width.
    pub width: f64,
    pub actual_width: f64,
}

impl ColumnSlot {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Visible columns split into left-frozen, scrolling and right-frozen runs, with every column's
/// left edge resolved for one horizontal offset.
///
/// - Left-frozen columns start at x = 0 and never move.
/// - Right-frozen columns are stacked from `viewport_width - right_inset` towards the left.
/// - Scrolling columns sit on the scrolling edge, which starts at `-horizontal_offset` and advances
///   over every visible column in display order. Scrolling columns may slide under a frozen run;
///   they are clipped, not moved.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrozenPartition {
    left: Vec<ColumnSlot>,
    middle: Vec<ColumnSlot>,
    right: Vec<ColumnSlot>,
    frozen_left_edge: f64,
    frozen_right_edge: f64,
    scrolling_end: f64,
    total_width: f64,
    viewport_width: f64,
    horizontal_offset: f64,
}

impl FrozenPartition {
    pub fn compute(
        columns: &ColumnModel,
        viewport_width: f64,
        horizontal_offset: f64,
        right_inset: f64,
    ) -> Self {
        debug_assert!(
            columns.check_frozen_contiguity().is_ok(),
            "frozen columns are interleaved with scrolling columns"
        );

        let visible: Vec<(ColumnId, FrozenSide, f64, f64)> = columns
            .visible()
            .map(|c| (c.id(), c.frozen(), c.display_width(), c.actual_width()))
            .collect();

        // Longest Left-tagged prefix and Right-tagged suffix; anything else scrolls.
        let right_start = visible.len()
            - visible
                .iter()
                .rev()
                .take_while(|c| c.1 == FrozenSide::Right)
                .count();
        let left_end = visible[..right_start]
            .iter()
            .take_while(|c| c.1 == FrozenSide::Left)
            .count();

        let mut out = Self {
            viewport_width,
            horizontal_offset,
            ..Self::default()
        };

        let mut frozen_edge = 0.0;
        let mut scrolling_edge = -horizontal_offset;
        for (i, &(id, _, width, actual)) in visible[..left_end].iter().enumerate() {
            out.left.push(ColumnSlot {
                id,
                segment: Segment::LeftFrozen,
                index: i,
                left: frozen_edge,
                width,
                actual_width: actual,
            });
            frozen_edge += width;
            scrolling_edge += width;
        }
        out.frozen_left_edge = frozen_edge;

        for (i, &(id, _, width, actual)) in visible[left_end..right_start].iter().enumerate() {
            out.middle.push(ColumnSlot {
                id,
                segment: Segment::Scrolling,
                index: i,
                left: scrolling_edge,
                width,
                actual_width: actual,
            });
            scrolling_edge += width;
        }
        out.scrolling_end = scrolling_edge;

        let right_run = &visible[right_start..];
        let mut right_edge = viewport_width - right_inset;
        out.right.reserve(right_run.len());
        for (i, &(id, _, width, actual)) in right_run.iter().enumerate().rev() {
            right_edge -= width;
            out.right.push(ColumnSlot {
                id,
                segment: Segment::RightFrozen,
                index: i,
                left: right_edge,
                width,
                actual_width: actual,
            });
        }
        out.right.reverse();
        out.frozen_right_edge = right_edge;

        out.total_width = visible.iter().map(|c| c.2).sum();
        out
    }

    /// Left-frozen run, display order.
    pub fn left(&self) -> &[ColumnSlot] {
        &self.left
    }

    /// Scrolling run, display order.
    pub fn middle(&self) -> &[ColumnSlot] {
        &self.middle
    }

    /// Right-frozen run, display order.
    pub fn right(&self) -> &[ColumnSlot] {
        &self.right
    }

    /// Right edge of the left-frozen run.
    pub fn frozen_left_edge(&self) -> f64 {
        self.frozen_left_edge
    }

    /// Left edge of the right-frozen run.
    pub fn frozen_right_edge(&self) -> f64 {
        self.frozen_right_edge
    }

    /// Where the scrolling run ends; the filler cell starts here.
    pub fn scrolling_end(&self) -> f64 {
        self.scrolling_end
    }

    /// Sum of visible display widths.
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.horizontal_offset
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.middle.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All slots in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSlot> + '_ {
        self.left
            .iter()
            .chain(self.middle.iter())
            .chain(self.right.iter())
    }

    pub fn slot(&self, id: ColumnId) -> Option<&ColumnSlot> {
        self.iter().find(|s| s.id == id)
    }

    /// Topmost column under viewport x: frozen runs cover the scrolling run.
    pub fn column_at(&self, x: f64) -> Option<ColumnId> {
        if x < 0.0 || !x.is_finite() || x >= self.viewport_width {
            return None;
        }
        let hit = |slots: &[ColumnSlot]| {
            let i = slots.partition_point(|s| s.right() <= x);
            slots.get(i).filter(|s| s.left <= x).map(|s| s.id)
        };
        if x < self.frozen_left_edge {
            return hit(&self.left);
        }
        if !self.right.is_empty() && x >= self.frozen_right_edge {
            return hit(&self.right);
        }
        hit(&self.middle)
    }
}
