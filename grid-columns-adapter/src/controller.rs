use grid_columns::{Align, ColumnId, ColumnSlot, ColumnVirtualizer, GridLayout, LayoutOptions};

/// A horizontal scroll-bar interaction reported by the toolkit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollEvent {
    /// Left arrow button.
    SmallDecrement,
    /// Right arrow button.
    SmallIncrement,
    /// Thumb drag, track click or any other change that already carries the new value.
    Value(f64),
}

/// A framework-neutral controller that wraps a `grid_columns::GridLayout` and turns toolkit
/// scroll input into horizontal offsets.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_width` when the cells area is resized
/// - `on_wheel` / `on_scroll_event` / `on_scroll` when the user scrolls
///
/// Arrow-button steps are column based and read the partition of the last layout (or
/// `GridLayout::resolve_columns`), i.e. what is currently on screen.
#[derive(Clone, Debug)]
pub struct ScrollController {
    grid: GridLayout,
}

impl ScrollController {
    pub fn new(options: LayoutOptions) -> Self {
        Self::from_layout(GridLayout::new(options))
    }

    pub fn from_layout(grid: GridLayout) -> Self {
        Self { grid }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.grid
    }

    pub fn layout_mut(&mut self) -> &mut GridLayout {
        &mut self.grid
    }

    pub fn into_layout(self) -> GridLayout {
        self.grid
    }

    pub fn on_viewport_width(&mut self, width: f64) {
        self.grid.set_viewport_width(width);
    }

    /// Call this when the UI reports a horizontal offset change.
    ///
    /// Returns `true` when the offset moved.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        let offset = self.grid.clamp_horizontal_offset(offset);
        self.update_offset(offset)
    }

    /// Applies a wheel/touchpad delta. Positive `delta_x` scrolls towards the start.
    pub fn on_wheel(&mut self, delta_x: f64) -> bool {
        if delta_x == 0.0 || !delta_x.is_finite() {
            return false;
        }
        self.on_scroll(self.grid.horizontal_offset() - delta_x)
    }

    /// Applies a scroll-bar interaction.
    pub fn on_scroll_event(&mut self, event: ScrollEvent) -> bool {
        let current = self.grid.horizontal_offset();
        let target = match event {
            ScrollEvent::SmallIncrement => current + self.small_scroll_increase(),
            ScrollEvent::SmallDecrement => current - self.small_scroll_decrease(),
            ScrollEvent::Value(value) => value,
        };
        atrace!(?event, current, target, "ScrollController::on_scroll_event");
        self.on_scroll(target)
    }

    /// The first scrolling column that is at least partly visible, with the width of its part
    /// hidden underneath the left-frozen run.
    pub fn first_visible_scrolling_column(&self) -> Option<(ColumnId, f64)> {
        let (slot, hidden) = self.first_visible_slot()?;
        Some((slot.id, hidden))
    }

    /// Distance the right arrow button scrolls: the rest of the first visible scrolling column.
    pub fn small_scroll_increase(&self) -> f64 {
        match self.first_visible_slot() {
            Some((slot, hidden)) => (slot.width - hidden).max(0.0),
            None => 0.0,
        }
    }

    /// Distance the left arrow button scrolls.
    ///
    /// A partly hidden first column is revealed; otherwise the whole previous column comes into
    /// view. Zero at the start of the scrolling run.
    pub fn small_scroll_decrease(&self) -> f64 {
        let partition = self.grid.partition();
        let window = ColumnVirtualizer::new(partition).visible_window();
        if window.is_empty() {
            return 0.0;
        }
        let middle = partition.middle();
        let Some(first) = middle.get(window.start) else {
            return 0.0;
        };
        let hidden = hidden_width(first, partition.frozen_left_edge());
        if hidden > 0.0 {
            return hidden;
        }
        match window.start.checked_sub(1).and_then(|i| middle.get(i)) {
            Some(previous) => previous.width,
            None => 0.0,
        }
    }

    /// Scrolls a column into view immediately.
    ///
    /// Returns the applied offset, or `None` if the column is unknown or hidden.
    pub fn scroll_column_into_view(&mut self, column: ColumnId, align: Align) -> Option<f64> {
        self.grid.scroll_column_into_view(column, align)
    }

    fn first_visible_slot(&self) -> Option<(ColumnSlot, f64)> {
        let partition = self.grid.partition();
        let window = ColumnVirtualizer::new(partition).visible_window();
        if window.is_empty() {
            return None;
        }
        let slot = *partition.middle().get(window.start)?;
        Some((slot, hidden_width(&slot, partition.frozen_left_edge())))
    }

    fn update_offset(&mut self, offset: f64) -> bool {
        if are_close(self.grid.horizontal_offset(), offset) {
            return false;
        }
        self.grid.set_horizontal_offset(offset);
        true
    }
}

fn hidden_width(slot: &ColumnSlot, frozen_left_edge: f64) -> f64 {
    (frozen_left_edge - slot.left).clamp(0.0, slot.width)
}

fn are_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let eps = (a.abs() + b.abs() + 10.0) * f64::EPSILON;
    (a - b).abs() < eps
}
