use alloc::vec::Vec;

use crate::{ColumnId, ColumnWidth, FrozenSide, LayoutError, LayoutOptions};

/// One grid column.
///
/// Columns are owned by a [`ColumnModel`]; configuration goes through the model's setters so the
/// model can validate bounds and frozen contiguity before committing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    id: ColumnId,
    width: ColumnWidth,
    min_width: Option<f64>,
    max_width: Option<f64>,
    frozen: FrozenSide,
    visible: bool,

    actual_width: f64,
    display_width: f64,
    header_desired_width: f64,

    initial_width_determined: bool,
    needs_measure: bool,
}

impl Column {
    fn new(id: ColumnId, width: ColumnWidth) -> Self {
        Self {
            id,
            width,
            min_width: None,
            max_width: None,
            frozen: FrozenSide::None,
            visible: true,
            actual_width: 0.0,
            display_width: 0.0,
            header_desired_width: 0.0,
            initial_width_determined: false,
            needs_measure: true,
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn width(&self) -> ColumnWidth {
        self.width
    }

    /// The explicitly configured minimum, if any.
    pub fn min_width(&self) -> Option<f64> {
        self.min_width
    }

    /// The explicitly configured maximum, if any.
    pub fn max_width(&self) -> Option<f64> {
        self.max_width
    }

    pub fn frozen(&self) -> FrozenSide {
        self.frozen
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_frozen()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Resolved width, always within [`Column::effective_min_width`, `Column::effective_max_width`].
    pub fn actual_width(&self) -> f64 {
        self.actual_width
    }

    /// Pixel-snapped width used when arranging cells.
    pub fn display_width(&self) -> f64 {
        self.display_width
    }

    pub fn header_desired_width(&self) -> f64 {
        self.header_desired_width
    }

    /// `false` until the column has been arranged once with its measured width.
    pub fn initial_width_determined(&self) -> bool {
        self.initial_width_determined
    }

    pub fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    /// Minimum width after falling back to the grid default; star columns are kept strictly
    /// positive.
    pub fn effective_min_width(&self, options: &LayoutOptions) -> f64 {
        let min = self.min_width.unwrap_or(options.min_column_width);
        if self.width.is_star() {
            min.max(options.min_star_column_width)
        } else {
            min
        }
    }

    pub fn effective_max_width(&self, options: &LayoutOptions) -> f64 {
        self.max_width.unwrap_or(options.max_column_width)
    }

    /// `(min, max)` with `min <= max` guaranteed.
    ///
    /// Setters reject inverted explicit bounds, but an explicit bound combined with a grid default
    /// can still invert; in that case `max` is raised to `min`.
    pub fn effective_bounds(&self, options: &LayoutOptions) -> (f64, f64) {
        let min = self.effective_min_width(options);
        let max = self.effective_max_width(options);
        if min > max {
            lwarn!(
                column = self.id.index(),
                min,
                max,
                "inverted column width bounds; raising max to min"
            );
            return (min, min);
        }
        (min, max)
    }

    pub(crate) fn set_resolved(&mut self, actual: f64) {
        self.actual_width = actual;
    }

    pub(crate) fn set_display_width(&mut self, display: f64) {
        self.display_width = display;
    }

    pub(crate) fn mark_width_determined(&mut self) {
        self.initial_width_determined = true;
        self.needs_measure = false;
    }

    fn invalidate(&mut self) {
        self.needs_measure = true;
        self.initial_width_determined = false;
    }
}

/// The ordered set of grid columns.
///
/// Columns live in an arena indexed by [`ColumnId`]; `order` holds the display order. Removing a
/// column empties its slot rather than shifting the arena, so ids stay stable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnModel {
    slots: Vec<Option<Column>>,
    order: Vec<ColumnId>,
    dirty: bool,
}

impl ColumnModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns (visible or not).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: ColumnId) -> Option<&Column> {
        self.slots.get(id.slot()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.slots.get_mut(id.slot()).and_then(Option::as_mut)
    }

    fn column_mut(&mut self, id: ColumnId) -> Result<&mut Column, LayoutError> {
        self.get_mut(id).ok_or(LayoutError::UnknownColumn(id))
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        self.get(id).is_some()
    }

    /// Column ids in display order.
    pub fn ids(&self) -> &[ColumnId] {
        &self.order
    }

    pub fn display_index(&self, id: ColumnId) -> Option<usize> {
        self.order.iter().position(|&c| c == id)
    }

    /// All columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> + '_ {
        self.order.iter().filter_map(move |&id| self.get(id))
    }

    /// Visible columns in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Column> + '_ {
        self.iter().filter(|c| c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn visible_star_count(&self) -> usize {
        self.visible().filter(|c| c.width.is_star()).count()
    }

    pub fn last_visible(&self) -> Option<ColumnId> {
        self.visible().last().map(Column::id)
    }

    /// Sum of the display widths of all visible columns.
    pub fn total_display_width(&self) -> f64 {
        self.visible().map(|c| c.display_width).sum()
    }

    /// Sum of the actual widths of all visible columns.
    pub fn total_actual_width(&self) -> f64 {
        self.visible().map(|c| c.actual_width).sum()
    }

    /// `true` when a configuration change happened since the last [`ColumnModel::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Appends a column at the end of the display order.
    pub fn push(&mut self, width: ColumnWidth) -> Result<ColumnId, LayoutError> {
        width.validate()?;
        let id = ColumnId(self.slots.len() as u32);
        self.slots.push(Some(Column::new(id, width)));
        self.order.push(id);
        if let Err(err) = self.check_frozen_contiguity() {
            self.slots.pop();
            self.order.pop();
            return Err(err);
        }
        self.dirty = true;
        Ok(id)
    }

    /// Inserts a column at `display_index`, shifting later columns right.
    pub fn insert(&mut self, display_index: usize, width: ColumnWidth) -> Result<ColumnId, LayoutError> {
        if display_index > self.order.len() {
            return Err(LayoutError::DisplayIndexOutOfRange {
                index: display_index,
                len: self.order.len(),
            });
        }
        width.validate()?;
        let id = ColumnId(self.slots.len() as u32);
        self.slots.push(Some(Column::new(id, width)));
        self.order.insert(display_index, id);
        if let Err(err) = self.check_frozen_contiguity() {
            self.slots.pop();
            self.order.remove(display_index);
            return Err(err);
        }
        self.dirty = true;
        Ok(id)
    }

    /// Removes a column. Its id is never handed out again.
    pub fn remove(&mut self, id: ColumnId) -> Option<Column> {
        let column = self.slots.get_mut(id.slot())?.take()?;
        self.order.retain(|&c| c != id);
        self.dirty = true;
        Some(column)
    }

    /// Moves a column to a new display index.
    pub fn move_to(&mut self, id: ColumnId, display_index: usize) -> Result<(), LayoutError> {
        let from = self
            .display_index(id)
            .ok_or(LayoutError::UnknownColumn(id))?;
        if display_index >= self.order.len() {
            return Err(LayoutError::DisplayIndexOutOfRange {
                index: display_index,
                len: self.order.len(),
            });
        }
        if from == display_index {
            return Ok(());
        }
        let prev = self.order.clone();
        let moved = self.order.remove(from);
        self.order.insert(display_index, moved);
        if let Err(err) = self.check_frozen_contiguity() {
            self.order = prev;
            return Err(err);
        }
        self.dirty = true;
        Ok(())
    }

    pub fn set_width(&mut self, id: ColumnId, width: ColumnWidth) -> Result<(), LayoutError> {
        width.validate()?;
        let column = self.column_mut(id)?;
        if column.width == width {
            return Ok(());
        }
        column.width = width;
        column.invalidate();
        self.dirty = true;
        Ok(())
    }

    pub fn set_min_width(&mut self, id: ColumnId, min: Option<f64>) -> Result<(), LayoutError> {
        let column = self.column_mut(id)?;
        Self::check_bounds(id, min, column.max_width)?;
        column.min_width = min;
        column.invalidate();
        self.dirty = true;
        Ok(())
    }

    pub fn set_max_width(&mut self, id: ColumnId, max: Option<f64>) -> Result<(), LayoutError> {
        let column = self.column_mut(id)?;
        Self::check_bounds(id, column.min_width, max)?;
        column.max_width = max;
        column.invalidate();
        self.dirty = true;
        Ok(())
    }

    pub fn set_bounds(&mut self, id: ColumnId, min: Option<f64>, max: Option<f64>) -> Result<(), LayoutError> {
        let column = self.column_mut(id)?;
        Self::check_bounds(id, min, max)?;
        column.min_width = min;
        column.max_width = max;
        column.invalidate();
        self.dirty = true;
        Ok(())
    }

    pub fn set_visible(&mut self, id: ColumnId, visible: bool) -> Result<(), LayoutError> {
        let column = self.column_mut(id)?;
        if column.visible == visible {
            return Ok(());
        }
        column.visible = visible;
        if let Err(err) = self.check_frozen_contiguity() {
            if let Some(column) = self.get_mut(id) {
                column.visible = !visible;
            }
            return Err(err);
        }
        self.dirty = true;
        Ok(())
    }

    pub fn set_frozen(&mut self, id: ColumnId, side: FrozenSide) -> Result<(), LayoutError> {
        let column = self.column_mut(id)?;
        let prev = column.frozen;
        if prev == side {
            return Ok(());
        }
        column.frozen = side;
        if let Err(err) = self.check_frozen_contiguity() {
            if let Some(column) = self.get_mut(id) {
                column.frozen = prev;
            }
            return Err(err);
        }
        self.dirty = true;
        Ok(())
    }

    /// Freezes the first `left` visible columns to the left edge and the last `right` visible
    /// columns to the right edge; every other column is unfrozen.
    pub fn set_frozen_counts(&mut self, left: usize, right: usize) -> Result<(), LayoutError> {
        let visible: Vec<ColumnId> = self.visible().map(Column::id).collect();
        if left.saturating_add(right) > visible.len() {
            return Err(LayoutError::FrozenCountOutOfRange {
                left,
                right,
                visible: visible.len(),
            });
        }
        for slot in self.slots.iter_mut().flatten() {
            slot.frozen = FrozenSide::None;
        }
        let right_start = visible.len() - right;
        for (i, &id) in visible.iter().enumerate() {
            let side = if i < left {
                FrozenSide::Left
            } else if i >= right_start {
                FrozenSide::Right
            } else {
                FrozenSide::None
            };
            if let Some(column) = self.get_mut(id) {
                column.frozen = side;
            }
        }
        self.dirty = true;
        Ok(())
    }

    pub fn left_frozen_count(&self) -> usize {
        self.visible()
            .filter(|c| c.frozen == FrozenSide::Left)
            .count()
    }

    pub fn right_frozen_count(&self) -> usize {
        self.visible()
            .filter(|c| c.frozen == FrozenSide::Right)
            .count()
    }

    /// Records the header collaborator's desired width for `Auto` / `SizeToHeader` columns.
    pub fn set_header_desired_width(&mut self, id: ColumnId, width: f64) -> Result<(), LayoutError> {
        if !width.is_finite() || width < 0.0 {
            return Err(LayoutError::InvalidWidth(width));
        }
        let column = self.column_mut(id)?;
        if column.header_desired_width == width {
            return Ok(());
        }
        column.header_desired_width = width;
        if column.width.is_auto_like() {
            column.needs_measure = true;
            self.dirty = true;
        }
        Ok(())
    }

    /// Flags a column for re-measurement, e.g. after its auto-size record was reset.
    pub fn invalidate_measure(&mut self, id: ColumnId) -> Result<(), LayoutError> {
        self.column_mut(id)?.invalidate();
        self.dirty = true;
        Ok(())
    }

    /// Visible columns whose width has not been settled by an arrange pass yet.
    pub fn pending_measure_count(&self) -> usize {
        self.visible().filter(|c| c.needs_measure).count()
    }

    /// Checks that left-frozen columns form a prefix and right-frozen columns a suffix of the
    /// visible sequence.
    pub fn check_frozen_contiguity(&self) -> Result<(), LayoutError> {
        // 0 = in left prefix, 1 = in scrolling run, 2 = in right suffix
        let mut stage = 0u8;
        for column in self.visible() {
            let next = match column.frozen {
                FrozenSide::Left => 0,
                FrozenSide::None => 1,
                FrozenSide::Right => 2,
            };
            if next < stage {
                return Err(LayoutError::FrozenNotContiguous);
            }
            stage = next;
        }
        Ok(())
    }

    fn check_bounds(id: ColumnId, min: Option<f64>, max: Option<f64>) -> Result<(), LayoutError> {
        for v in [min, max].into_iter().flatten() {
            if v.is_nan() || v < 0.0 || v == f64::NEG_INFINITY {
                return Err(LayoutError::InvalidWidth(v));
            }
        }
        if let Some(min) = min {
            if !min.is_finite() {
                return Err(LayoutError::InvalidWidth(min));
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(LayoutError::InvalidBounds {
                    column: id,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}
