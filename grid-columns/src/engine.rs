use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell;
use core::fmt;

use crate::{
    Align, Arrangeable, CellLayoutPass, Column, ColumnId, ColumnModel, ColumnWidth, FrozenPartition,
    FrozenSide, LayoutContext, LayoutError, LayoutOptions, LayoutReason, LayoutRequest, Measurable,
    MeasuredWidths, Row, Segment, WidthResolver,
};

/// Callback invoked when a mutation requires a new layout pass.
pub type LayoutRequestCallback = Arc<dyn Fn(&GridLayout, LayoutRequest) + Send + Sync>;

/// Where the auto-size feedback loop is within one layout request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// First measure of the request.
    #[default]
    Initial,
    /// Auto-sized widths changed during the first measure; every row is measured once more.
    Reconciling,
    /// Arranged.
    Done,
}

/// Resolved widths handed to the column-header collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedWidth {
    pub id: ColumnId,
    pub actual_width: f64,
    pub display_width: f64,
}

/// Summary of one [`GridLayout::layout`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOutput {
    /// The request that was served.
    pub request: LayoutRequest,
    /// 1, or 2 when the auto-size reconcile pass ran.
    pub measure_passes: usize,
    /// Sum of the visible display widths.
    pub total_width: f64,
    pub filler_width: f64,
    /// Offset the rows were arranged at. Differs from the requested offset when the scroll range
    /// shrank; the scroll collaborator should adopt it.
    pub horizontal_offset: f64,
    pub max_horizontal_offset: f64,
    pub horizontal_scrollbar_visible: bool,
}

/// A headless column-layout engine for one grid.
///
/// `GridLayout` owns the column model and all layout state; it holds no UI objects. Your adapter
/// feeds it viewport width and horizontal offset, then calls [`GridLayout::layout`] with the rows
/// it displays, a [`Measurable`] for cell content and an [`Arrangeable`] sink.
///
/// Every mutation raises a [`LayoutRequest`]; use [`GridLayout::batch_update`] to fold several
/// mutations into one notification.
///
/// For wheel, scroll-bar and arrow-button input, see the `grid-columns-adapter` crate.
#[derive(Clone)]
pub struct GridLayout {
    options: LayoutOptions,
    columns: ColumnModel,
    measured: MeasuredWidths,
    viewport_width: f64,
    horizontal_offset: f64,
    partition: FrozenPartition,
    phase: Phase,
    pending: LayoutRequest,

    on_layout_request: Option<LayoutRequestCallback>,
    notify_depth: cell::Cell<usize>,
    notify_pending: cell::Cell<LayoutRequest>,
}

impl fmt::Debug for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridLayout")
            .field("options", &self.options)
            .field("columns", &self.columns)
            .field("viewport_width", &self.viewport_width)
            .field("horizontal_offset", &self.horizontal_offset)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl GridLayout {
    pub fn new(options: LayoutOptions) -> Self {
        Self::with_columns(options, ColumnModel::new())
    }

    /// Creates a layout over an existing column model.
    pub fn with_columns(options: LayoutOptions, columns: ColumnModel) -> Self {
        ldebug!(columns = columns.len(), "GridLayout::new");
        Self {
            options,
            columns,
            measured: MeasuredWidths::new(),
            viewport_width: 0.0,
            horizontal_offset: 0.0,
            partition: FrozenPartition::default(),
            phase: Phase::Initial,
            pending: LayoutRequest::new(LayoutReason::ColumnsChanged),
            on_layout_request: None,
            notify_depth: cell::Cell::new(0),
            notify_pending: cell::Cell::new(LayoutRequest::default()),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        if self.options == options {
            return;
        }
        self.options = options;
        ltrace!(
            star_sizing = self.options.star_sizing,
            layout_rounding = self.options.layout_rounding,
            "GridLayout::set_options"
        );
        self.request(LayoutReason::OptionsChanged);
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut LayoutOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_layout_request(
        &mut self,
        on_layout_request: Option<impl Fn(&GridLayout, LayoutRequest) + Send + Sync + 'static>,
    ) {
        self.on_layout_request = on_layout_request.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self, request: LayoutRequest) {
        if let Some(cb) = &self.on_layout_request {
            cb(self, request);
        }
    }

    fn request(&mut self, reason: LayoutReason) {
        self.pending.insert(reason);
        let request = LayoutRequest::new(reason);
        if self.notify_depth.get() > 0 {
            let mut batched = self.notify_pending.get();
            batched.merge(request);
            self.notify_pending.set(batched);
            return;
        }
        self.notify_now(request);
    }

    /// Batches multiple updates into a single layout-request notification.
    ///
    /// Adding a dozen columns one by one would otherwise notify a dozen times; inside a batch the
    /// reasons are merged and reported once when the outermost batch returns.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 {
            let batched = self.notify_pending.replace(LayoutRequest::default());
            if !batched.is_empty() {
                ltrace!("GridLayout::batch_update: notifying coalesced request");
                self.notify_now(batched);
            }
        }
    }

    /// Reasons accumulated since the last layout pass.
    pub fn pending_request(&self) -> LayoutRequest {
        self.pending
    }

    pub fn needs_layout(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    // Columns

    pub fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn measured_widths(&self) -> &MeasuredWidths {
        &self.measured
    }

    fn checked(&mut self, result: Result<(), LayoutError>, reason: LayoutReason) -> Result<(), LayoutError> {
        if result.is_ok() && self.columns.is_dirty() {
            self.request(reason);
        }
        result
    }

    pub fn add_column(&mut self, width: ColumnWidth) -> Result<ColumnId, LayoutError> {
        let id = self.columns.push(width)?;
        self.request(LayoutReason::ColumnsChanged);
        Ok(id)
    }

    pub fn insert_column(&mut self, display_index: usize, width: ColumnWidth) -> Result<ColumnId, LayoutError> {
        let id = self.columns.insert(display_index, width)?;
        self.request(LayoutReason::ColumnsChanged);
        Ok(id)
    }

    pub fn remove_column(&mut self, id: ColumnId) -> Option<Column> {
        let column = self.columns.remove(id)?;
        self.measured.reset(id);
        self.request(LayoutReason::ColumnsChanged);
        Some(column)
    }

    pub fn move_column(&mut self, id: ColumnId, display_index: usize) -> Result<(), LayoutError> {
        let result = self.columns.move_to(id, display_index);
        self.checked(result, LayoutReason::ColumnsChanged)
    }

    /// Changes a column's width spec. Its auto-size record starts over.
    pub fn set_column_width(&mut self, id: ColumnId, width: ColumnWidth) -> Result<(), LayoutError> {
        let prev = self.columns.get(id).map(Column::width);
        let result = self.columns.set_width(id, width);
        if result.is_ok() && prev != Some(width) {
            self.measured.reset(id);
        }
        self.checked(result, LayoutReason::ColumnWidthChanged)
    }

    pub fn set_column_min_width(&mut self, id: ColumnId, min: Option<f64>) -> Result<(), LayoutError> {
        let result = self.columns.set_min_width(id, min);
        self.checked(result, LayoutReason::ColumnWidthChanged)
    }

    pub fn set_column_max_width(&mut self, id: ColumnId, max: Option<f64>) -> Result<(), LayoutError> {
        let result = self.columns.set_max_width(id, max);
        self.checked(result, LayoutReason::ColumnWidthChanged)
    }

    pub fn set_column_bounds(&mut self, id: ColumnId, min: Option<f64>, max: Option<f64>) -> Result<(), LayoutError> {
        let result = self.columns.set_bounds(id, min, max);
        self.checked(result, LayoutReason::ColumnWidthChanged)
    }

    pub fn set_column_visible(&mut self, id: ColumnId, visible: bool) -> Result<(), LayoutError> {
        let result = self.columns.set_visible(id, visible);
        self.checked(result, LayoutReason::ColumnVisibilityChanged)
    }

    pub fn set_column_frozen(&mut self, id: ColumnId, side: FrozenSide) -> Result<(), LayoutError> {
        let result = self.columns.set_frozen(id, side);
        self.checked(result, LayoutReason::FrozenChanged)
    }

    pub fn set_frozen_counts(&mut self, left: usize, right: usize) -> Result<(), LayoutError> {
        let result = self.columns.set_frozen_counts(left, right);
        self.checked(result, LayoutReason::FrozenChanged)
    }

    pub fn set_header_desired_width(&mut self, id: ColumnId, width: f64) -> Result<(), LayoutError> {
        let result = self.columns.set_header_desired_width(id, width);
        self.checked(result, LayoutReason::ColumnWidthChanged)
    }

    /// Forgets the measured content width of one column.
    pub fn reset_auto_width(&mut self, id: ColumnId) -> Result<(), LayoutError> {
        self.columns.invalidate_measure(id)?;
        self.measured.reset(id);
        self.request(LayoutReason::ColumnWidthChanged);
        Ok(())
    }

    /// Forgets every measured content width, e.g. after the data source was replaced.
    pub fn reset_auto_widths(&mut self) {
        let ids: Vec<ColumnId> = self.columns.ids().to_vec();
        for id in ids {
            let _ = self.columns.invalidate_measure(id);
        }
        self.measured.clear();
        self.request(LayoutReason::ColumnWidthChanged);
    }

    // Viewport

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Sets the viewport width. `f64::INFINITY` means unconstrained; NaN and negative values are
    /// treated as zero.
    pub fn set_viewport_width(&mut self, width: f64) {
        let width = if width.is_nan() { 0.0 } else { width.max(0.0) };
        if self.viewport_width == width {
            return;
        }
        self.viewport_width = width;
        self.request(LayoutReason::ViewportResized);
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.horizontal_offset
    }

    /// Sets the horizontal scroll offset as reported by the scroll collaborator.
    pub fn set_horizontal_offset(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        if self.horizontal_offset == offset {
            return;
        }
        self.horizontal_offset = offset;
        self.request(LayoutReason::Scrolled);
    }

    pub fn set_horizontal_offset_clamped(&mut self, offset: f64) {
        self.set_horizontal_offset(self.clamp_horizontal_offset(offset));
    }

    pub fn set_viewport_and_offset(&mut self, viewport_width: f64, offset: f64) {
        self.batch_update(|g| {
            g.set_viewport_width(viewport_width);
            g.set_horizontal_offset(offset);
        });
    }

    /// Width available to columns: the viewport minus the right inset.
    pub fn available_width(&self) -> f64 {
        (self.viewport_width - self.options.right_inset).max(0.0)
    }

    /// `true` when star columns share the available width proportionally.
    pub fn uses_star_sizing(&self) -> bool {
        self.options.star_sizing && self.viewport_width.is_finite() && self.columns.visible_star_count() > 0
    }

    /// Sum of the visible display widths as of the last resolution.
    pub fn total_width(&self) -> f64 {
        self.columns.total_display_width()
    }

    pub fn max_horizontal_offset(&self) -> f64 {
        let available = self.available_width();
        if !available.is_finite() {
            return 0.0;
        }
        (self.total_width() - available).max(0.0)
    }

    pub fn clamp_horizontal_offset(&self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_horizontal_offset())
    }

    pub fn horizontal_scrollbar_visible(&self) -> bool {
        self.max_horizontal_offset() > 0.0
    }

    /// The partition produced by the last resolution.
    pub fn partition(&self) -> &FrozenPartition {
        &self.partition
    }

    /// Per-pass inputs derived from the current state.
    pub fn context(&self) -> LayoutContext {
        LayoutContext {
            viewport_width: self.viewport_width,
            horizontal_offset: self.horizontal_offset,
            uses_star_sizing: self.uses_star_sizing(),
            row_height: self.options.row_height,
            right_inset: self.options.right_inset,
            horizontal_scrollbar_visible: self.horizontal_scrollbar_visible(),
            max_horizontal_offset: self.max_horizontal_offset(),
        }
    }

    /// Visits resolved widths of the visible columns in display order.
    pub fn for_each_column_width(&self, mut f: impl FnMut(ResolvedWidth)) {
        for column in self.columns.visible() {
            f(ResolvedWidth {
                id: column.id(),
                actual_width: column.actual_width(),
                display_width: column.display_width(),
            });
        }
    }

    /// Collects resolved widths for header sync into `out` (clears `out` first).
    pub fn column_widths(&self, out: &mut Vec<ResolvedWidth>) {
        out.clear();
        self.for_each_column_width(|w| out.push(w));
    }

    /// Topmost column under viewport x, as of the last resolution.
    pub fn column_at(&self, x: f64) -> Option<ColumnId> {
        self.partition.column_at(x)
    }

    /// Left edge of a visible column in content coordinates (offset 0), as of the last
    /// resolution.
    pub fn column_content_left(&self, id: ColumnId) -> Option<f64> {
        let slot = self.partition.slot(id)?;
        Some(match slot.segment {
            Segment::Scrolling => slot.left + self.partition.horizontal_offset(),
            Segment::LeftFrozen | Segment::RightFrozen => slot.left,
        })
    }

    /// The horizontal offset that brings a scrolling column into the unobscured region between
    /// the frozen runs.
    ///
    /// Frozen columns are always in view, so they return the current offset. Returns `None` for
    /// unknown or hidden columns.
    pub fn scroll_column_into_view_offset(&self, id: ColumnId, align: Align) -> Option<f64> {
        let slot = self.partition.slot(id)?;
        if slot.segment != Segment::Scrolling {
            return Some(self.horizontal_offset);
        }
        let region_start = self.partition.frozen_left_edge();
        let region_end = self.partition.frozen_right_edge();
        let start = slot.left + self.partition.horizontal_offset();
        let end = start + slot.width;

        let target = match align {
            Align::Start => start - region_start,
            Align::End => end - region_end,
            Align::Center => (start + end) / 2.0 - (region_start + region_end) / 2.0,
            Align::Auto => {
                let left = start - self.horizontal_offset;
                let right = end - self.horizontal_offset;
                if left >= region_start && right <= region_end {
                    self.horizontal_offset
                } else if left < region_start {
                    start - region_start
                } else {
                    end - region_end
                }
            }
        };
        Some(self.clamp_horizontal_offset(target))
    }

    /// Scrolls a column into view. Returns the applied offset.
    pub fn scroll_column_into_view(&mut self, id: ColumnId, align: Align) -> Option<f64> {
        let offset = self.scroll_column_into_view_offset(id, align)?;
        self.set_horizontal_offset(offset);
        Some(offset)
    }

    // Layout

    /// Resolves column widths and the frozen partition without touching rows.
    ///
    /// Useful for header-only layouts; [`GridLayout::layout`] calls this itself.
    pub fn resolve_columns(&mut self) -> &FrozenPartition {
        let uses_star_sizing = self.uses_star_sizing();
        let available = self.available_width();
        WidthResolver::new(&self.options).resolve_widths(
            &mut self.columns,
            available,
            &self.measured,
            uses_star_sizing,
        );
        self.columns.take_dirty();
        self.repartition();
        ldebug!(
            available,
            uses_star_sizing,
            total = self.partition.total_width(),
            "GridLayout::resolve_columns"
        );
        &self.partition
    }

    fn repartition(&mut self) {
        self.partition = FrozenPartition::compute(
            &self.columns,
            self.viewport_width,
            self.horizontal_offset,
            self.options.right_inset,
        );
    }

    /// Pulls the offset back into the scroll range after widths shrank or the viewport grew.
    fn clamp_offset_to_range(&mut self) {
        let clamped = self.clamp_horizontal_offset(self.horizontal_offset);
        if clamped == self.horizontal_offset {
            return;
        }
        ldebug!(
            from = self.horizontal_offset,
            to = clamped,
            "GridLayout::layout: offset past scroll range; clamped"
        );
        self.horizontal_offset = clamped;
        self.repartition();
    }

        fn actual_widths(&self) -> Vec<f64> {
        self.columns.visible().map(Column::actual_width).collect()
    }

    /// Runs one layout request: resolve widths, partition, measure every row (once more if
    /// auto-sized widths changed), then arrange every row.
    ///
    /// `rows` are the rows currently displayed. Scroll-only requests reuse the resolved widths.
    pub fn layout(
        &mut self,
        rows: &mut [Row],
        content: &mut impl Measurable,
        sink: &mut impl Arrangeable,
    ) -> LayoutOutput {
        let request = core::mem::take(&mut self.pending);
        ltrace!(rows = rows.len(), scroll_only = request.is_scroll_only(), "GridLayout::layout");

        if request.is_scroll_only() && !self.columns.is_dirty() && self.columns.pending_measure_count() == 0 {
            self.repartition();
        } else {
            self.resolve_columns();
        }
        self.clamp_offset_to_range();

        self.phase = Phase::Initial;
        let mut measure_passes = 0;
        loop {
            measure_passes += 1;
            let context = self.context();
            let pass = CellLayoutPass::new(&self.columns, &self.partition, &context, &self.options);
            let mut grew = false;
            for row in rows.iter_mut() {
                grew |= pass.measure_row(row, content, &mut self.measured).widths_grew;
            }
            if !grew {
                break;
            }

            let before = self.actual_widths();
            self.resolve_columns();
            self.clamp_offset_to_range();
            let changed = before != self.actual_widths();
            match self.phase {
                Phase::Initial if changed => {
                    ldebug!("GridLayout::layout: auto-sized widths changed; reconciling");
                    self.phase = Phase::Reconciling;
                }
                Phase::Reconciling if changed => {
                    // Arrange with what we have; the next request picks up the growth.
                    ldebug!("GridLayout::layout: widths still growing; deferring to next request");
                    self.request(LayoutReason::ColumnWidthChanged);
                    break;
                }
                _ => break,
            }
        }

        let context = self.context();
        let pass = CellLayoutPass::new(&self.columns, &self.partition, &context, &self.options);
        for row in rows.iter_mut() {
            pass.arrange_row(row, sink);
        }

        let ids: Vec<ColumnId> = self.columns.visible().map(Column::id).collect();
        for id in ids {
            if let Some(column) = self.columns.get_mut(id) {
                column.mark_width_determined();
            }
        }
        self.phase = Phase::Done;

        LayoutOutput {
            request,
            measure_passes,
            total_width: self.total_width(),
            filler_width: context.filler_width(self.columns.total_actual_width()),
            horizontal_offset: self.horizontal_offset,
            max_horizontal_offset: context.max_horizontal_offset,
            horizontal_scrollbar_visible: context.horizontal_scrollbar_visible,
        }
    }
}
