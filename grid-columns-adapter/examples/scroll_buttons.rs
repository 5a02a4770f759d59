use grid_columns::{ColumnWidth, FrozenSide};
use grid_columns_adapter::{ScrollController, ScrollEvent};

fn main() {
    // Example: drive the horizontal offset from scroll-bar arrow buttons and the wheel.
    //
    // The adapter flow is typically:
    // 1) forward the toolkit event to the controller
    // 2) run a layout pass (here only `resolve_columns`, since there are no rows)
    // 3) push the new offset back to the real scroll bar
    let mut c = ScrollController::new(Default::default());
    let grid = c.layout_mut();
    for i in 0..12 {
        let id = grid.add_column(ColumnWidth::Pixel(70.0 + 10.0 * (i % 3) as f64)).expect("valid column");
        if i == 0 {
            grid.set_column_frozen(id, FrozenSide::Left).expect("frozen prefix");
        }
    }
    grid.set_viewport_width(360.0);
    grid.resolve_columns();

    let events = [
        ScrollEvent::SmallIncrement,
        ScrollEvent::SmallIncrement,
        ScrollEvent::Value(215.0),
        ScrollEvent::SmallDecrement,
        ScrollEvent::SmallDecrement,
    ];
    for event in events {
        let moved = c.on_scroll_event(event);
        c.layout_mut().resolve_columns();
        println!(
            "{event:?}: moved={moved} off={} first={:?}",
            c.layout().horizontal_offset(),
            c.first_visible_scrolling_column()
        );
    }

    c.on_wheel(-1_000.0);
    println!(
        "wheel: off={} max={}",
        c.layout().horizontal_offset(),
        c.layout().max_horizontal_offset()
    );
}
