// Example: resolve a mix of fixed, content-sized and star columns and print header widths.
use grid_columns::{ColumnId, ColumnWidth, GridLayout, LayoutOptions, Row, Size};

fn main() {
    let mut g = GridLayout::new(LayoutOptions::default());
    g.batch_update(|g| {
        for spec in ["48", "auto", "*", "2*"] {
            let width: ColumnWidth = spec.parse().expect("valid width spec");
            g.add_column(width).expect("valid column");
        }
        g.set_viewport_width(640.0);
    });

    let mut rows: Vec<Row> = (0..3).map(|i| Row::for_columns(i, g.columns())).collect();
    let mut content = |row: usize, _column: ColumnId, constraint: Size| {
        Size::new(constraint.width.min(60.0 + 10.0 * row as f64), 22.0)
    };
    let out = g.layout(&mut rows, &mut content, &mut ());
    println!("measure_passes={} total_width={}", out.measure_passes, out.total_width);

    let mut widths = Vec::new();
    g.column_widths(&mut widths);
    for w in &widths {
        let spec = g.column(w.id).map(|c| c.width().to_string()).unwrap_or_default();
        println!(
            "column {} ({spec}): actual={:.3} display={}",
            w.id, w.actual_width, w.display_width
        );
    }
    println!("filler_width={}", out.filler_width);
}
