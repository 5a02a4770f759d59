use alloc::vec::Vec;

use crate::{ColumnId, ColumnSlot, FrozenPartition, Segment};

/// How much of the scrolling run a row materializes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Materialize {
    /// Only scrolling columns intersecting the visible window.
    #[default]
    Windowed,
    /// Every column. Used for the priming row so the content width estimate is accurate.
    All,
}

/// A contiguous range of scrolling columns (indexes into [`FrozenPartition::middle`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnWindow {
    pub start: usize,
    pub end: usize, // exclusive
}

impl ColumnWindow {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// `true` when a scrolling column with edges `[left, right)` shows at least one pixel between the
/// left-frozen run and the viewport's right edge.
pub fn is_in_window(left: f64, right: f64, frozen_left_edge: f64, viewport_width: f64) -> bool {
    right > frozen_left_edge && left < viewport_width && right > 0.0
}

/// Selects the scrolling columns to materialize.
///
/// `middle` must be the scrolling run with edges already shifted by the horizontal offset (as
/// produced by [`FrozenPartition`]). Edges grow monotonically, so the selection is one contiguous
/// window located by binary search. Columns that slide under the right-frozen run are still
/// selected; the clip hides them.
pub fn select_visible(middle: &[ColumnSlot], frozen_left_edge: f64, viewport_width: f64) -> ColumnWindow {
    let floor = frozen_left_edge.max(0.0);
    let start = middle.partition_point(|s| s.right() <= floor);
    let end = middle.partition_point(|s| s.left < viewport_width);
    ColumnWindow {
        start,
        end: end.max(start),
    }
}

/// Column virtualization over one [`FrozenPartition`].
///
/// Frozen columns are always materialized. The result is a pure function of the partition, so
/// every row laid out against the same partition materializes the same columns.
#[derive(Clone, Copy, Debug)]
pub struct ColumnVirtualizer<'a> {
    partition: &'a FrozenPartition,
    window: ColumnWindow,
}

impl<'a> ColumnVirtualizer<'a> {
    pub fn new(partition: &'a FrozenPartition) -> Self {
        let window = select_visible(
            partition.middle(),
            partition.frozen_left_edge(),
            partition.viewport_width(),
        );
        Self { partition, window }
    }

    pub fn partition(&self) -> &'a FrozenPartition {
        self.partition
    }

    /// The windowed selection of scrolling columns.
    pub fn visible_window(&self) -> ColumnWindow {
        self.window
    }

    pub fn window(&self, materialize: Materialize) -> ColumnWindow {
        match materialize {
            Materialize::Windowed => self.window,
            Materialize::All => ColumnWindow {
                start: 0,
                end: self.partition.middle().len(),
            },
        }
    }

    pub fn is_materialized(&self, slot: &ColumnSlot, materialize: Materialize) -> bool {
        match slot.segment {
            Segment::LeftFrozen | Segment::RightFrozen => true,
            Segment::Scrolling => self.window(materialize).contains(slot.index),
        }
    }

    /// Visits materialized columns in display order without allocating.
    pub fn for_each_materialized(&self, materialize: Materialize, mut f: impl FnMut(&ColumnSlot)) {
        let window = self.window(materialize);
        let middle = self.partition.middle();
        for slot in self.partition.left() {
            f(slot);
        }
        for slot in &middle[window.start.min(middle.len())..window.end.min(middle.len())] {
            f(slot);
        }
        for slot in self.partition.right() {
            f(slot);
        }
    }

    /// Collects materialized column ids into `out` (clears `out` first).
    pub fn collect_materialized(&self, materialize: Materialize, out: &mut Vec<ColumnId>) {
        out.clear();
        self.for_each_materialized(materialize, |slot| out.push(slot.id));
    }
}
