// Example: frozen columns, column virtualization and clipping while scrolling horizontally.
use grid_columns::{Arrangeable, Cell, ColumnId, ColumnWidth, GridLayout, LayoutOptions, Row, Size};

struct Printer;

impl Arrangeable for Printer {
    fn arrange_cell(&mut self, row_index: usize, cell: &Cell) {
        println!(
            "  row {row_index} column {}: x={} w={} clip={:?} frozen={} shadow={}",
            cell.column,
            cell.bounds.x,
            cell.bounds.width,
            cell.clip,
            cell.is_frozen,
            cell.shows_frozen_shadow
        );
    }
}

fn main() {
    let mut g = GridLayout::new(LayoutOptions::default().with_prime_first_row(false));
    for w in [60.0, 120.0, 120.0, 120.0, 120.0, 120.0, 80.0] {
        g.add_column(ColumnWidth::Pixel(w)).expect("valid column");
    }
    g.set_frozen_counts(1, 1).expect("enough visible columns");
    g.set_viewport_width(400.0);

    let mut rows = vec![Row::for_columns(1, g.columns())];
    let mut content = |_row: usize, _column: ColumnId, constraint: Size| Size::new(constraint.width, 20.0);

    for offset in [0.0, 75.0, 1_000.0] {
        g.set_horizontal_offset_clamped(offset);
        let out = g.layout(&mut rows, &mut content, &mut Printer);
        println!(
            "offset={} max_offset={} scrollbar={}",
            g.horizontal_offset(),
            out.max_horizontal_offset,
            out.horizontal_scrollbar_visible
        );
    }

    println!("column under x=200: {:?}", g.column_at(200.0));
}
