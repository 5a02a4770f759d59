use crate::{
    Cell, ClipCalculator, ColumnId, ColumnModel, ColumnVirtualizer, FillerCell, FrozenPartition,
    LayoutContext, LayoutOptions, Materialize, MeasuredWidths, Rect, Row, RowHeight, Segment,
    ShadowPosition, Size,
};

/// Measures cell content. Implemented by the row-rendering collaborator.
///
/// Any `FnMut(usize, ColumnId, Size) -> Size` closure is a `Measurable` that reports an empty
/// filler.
pub trait Measurable {
    /// Desired size of the cell at (`row_index`, `column`) within `constraint`.
    fn measure_cell(&mut self, row_index: usize, column: ColumnId, constraint: Size) -> Size;

    fn measure_filler(&mut self, _row_index: usize, _constraint: Size) -> Size {
        Size::default()
    }
}

impl<F> Measurable for F
where
    F: FnMut(usize, ColumnId, Size) -> Size,
{
    fn measure_cell(&mut self, row_index: usize, column: ColumnId, constraint: Size) -> Size {
        self(row_index, column, constraint)
    }
}

/// Receives final cell placement. `()` ignores everything.
pub trait Arrangeable {
    fn arrange_cell(&mut self, row_index: usize, cell: &Cell);

    fn arrange_filler(&mut self, _row_index: usize, _filler: &FillerCell) {}
}

impl Arrangeable for () {
    fn arrange_cell(&mut self, _row_index: usize, _cell: &Cell) {}
}

/// What measuring one row produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowMeasure {
    pub desired_height: f64,
    /// Some auto-sized column's measured width grew while measuring this row.
    pub widths_grew: bool,
    pub measured_cells: usize,
}

/// Measure and arrange for a single row against one resolved partition.
///
/// The same pass value is reused for every row of a layout request.
#[derive(Clone, Copy, Debug)]
pub struct CellLayoutPass<'a> {
    columns: &'a ColumnModel,
    partition: &'a FrozenPartition,
    context: &'a LayoutContext,
    options: &'a LayoutOptions,
    virtualizer: ColumnVirtualizer<'a>,
}

impl<'a> CellLayoutPass<'a> {
    pub fn new(
        columns: &'a ColumnModel,
        partition: &'a FrozenPartition,
        context: &'a LayoutContext,
        options: &'a LayoutOptions,
    ) -> Self {
        Self {
            columns,
            partition,
            context,
            options,
            virtualizer: ColumnVirtualizer::new(partition),
        }
    }

    pub fn virtualizer(&self) -> &ColumnVirtualizer<'a> {
        &self.virtualizer
    }

    /// Full materialization for the priming row, windowed otherwise.
    pub fn materialize_for(&self, row_index: usize) -> Materialize {
        if self.options.prime_first_row && row_index == 0 {
            Materialize::All
        } else {
            Materialize::Windowed
        }
    }

    /// Measures every materialized cell of `row`, feeding auto-sized widths into `sizer`.
    ///
    /// Cells of columns outside the window are flagged invisible and skipped. Visible columns
    /// without a cell in `row` are recorded in [`Row::missing_columns`].
    pub fn measure_row(
        &self,
        row: &mut Row,
        content: &mut impl Measurable,
        sizer: &mut MeasuredWidths,
    ) -> RowMeasure {
        let row_index = row.index;
        let materialize = self.materialize_for(row_index);
        let measure_height = self.context.measure_height();
        let uses_star_sizing = self.context.uses_star_sizing;

        row.missing_columns.clear();
        // Cells outside the visible columns stay hidden.
        let ids: alloc::vec::Vec<ColumnId> = row.cells().iter().map(|c| c.column).collect();
        for id in ids {
            let shown = self
                .partition
                .slot(id)
                .is_some_and(|s| self.virtualizer.is_materialized(s, materialize));
            if let Some(cell) = row.cell_mut(id) {
                cell.is_visible = shown;
            }
        }

        let mut out = RowMeasure::default();
        let mut height: f64 = 0.0;
        self.virtualizer.for_each_materialized(materialize, |slot| {
            if row.cell(slot.id).is_none() {
                lwarn!(
                    row = row_index,
                    column = slot.id.index(),
                    "row has no cell for visible column; skipping"
                );
                row.missing_columns.push(slot.id);
                return;
            }
            let Some(column) = self.columns.get(slot.id) else {
                return;
            };

            let width = column.width();
            let auto_grow = width.grows_from_cells() || (width.is_star() && !uses_star_sizing);
            let mut cell_height = None;
            if auto_grow {
                let max = column.effective_bounds(self.options).1;
                let desired = content.measure_cell(row_index, slot.id, Size::new(max, measure_height));
                if sizer.observe(slot.id, desired.width) {
                    out.widths_grew = true;
                }
                if !uses_star_sizing {
                    cell_height = Some(desired.height);
                }
            }
            let cell_height = match cell_height {
                Some(h) => h,
                None => {
                    content
                        .measure_cell(row_index, slot.id, Size::new(slot.width, measure_height))
                        .height
                }
            };
            out.measured_cells += 1;
            if cell_height.is_finite() {
                height = height.max(cell_height);
            }
        });

        let resolved_height = match self.context.row_height {
            RowHeight::Fixed(h) => h,
            RowHeight::Auto => height,
        };
        content.measure_filler(row_index, Size::new(f64::INFINITY, resolved_height));

        row.desired_height = resolved_height;
        row.needs_measure = false;
        out.desired_height = resolved_height;
        ltrace!(
            row = row_index,
            cells = out.measured_cells,
            height = resolved_height,
            "measure_row"
        );
        out
    }

    /// Places every materialized cell of `row`, computes clips and frozen shadows, then places
    /// the filler. Each placed cell is handed to `sink`.
    pub fn arrange_row(&self, row: &mut Row, sink: &mut impl Arrangeable) {
        let row_index = row.index;
        let row_height = match self.context.row_height {
            RowHeight::Fixed(h) => h,
            RowHeight::Auto => row.desired_height,
        };
        let clipper = ClipCalculator::new(
            self.partition.frozen_left_edge(),
            self.partition.frozen_right_edge(),
            row_height,
            self.options.rounding(),
        );
        let last_left = self.partition.left().len().checked_sub(1);
        let offset = self.context.horizontal_offset;
        let right_shadow = self.context.horizontal_scrollbar_visible && self.context.can_scroll_right();

        for slot in self.partition.iter() {
            let Some(cell) = row.cell_mut(slot.id) else {
                continue;
            };
            if !cell.is_visible {
                continue;
            }
            let (frozen, shadow, position) = match slot.segment {
                Segment::LeftFrozen => (
                    true,
                    Some(slot.index) == last_left && offset > 0.0,
                    Some(ShadowPosition::Right),
                ),
                Segment::RightFrozen => (true, slot.index == 0 && right_shadow, Some(ShadowPosition::Left)),
                Segment::Scrolling => (false, false, None),
            };
            cell.bounds = Rect::new(slot.left, 0.0, slot.width, row_height);
            cell.clip = clipper.compute_clip(frozen, slot.width, slot.left, slot.right());
            cell.is_frozen = frozen;
            cell.shows_frozen_shadow = shadow;
            cell.shadow_position = position;
            sink.arrange_cell(row_index, cell);
        }

        let filler_width = self.context.filler_width(self.columns.total_actual_width());
        row.filler = FillerCell {
            bounds: Rect::new(self.partition.scrolling_end(), 0.0, filler_width, row_height),
            is_visible: filler_width > 0.0,
        };
        sink.arrange_filler(row_index, &row.filler);
    }
}
