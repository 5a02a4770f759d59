use crate::*;

use grid_columns::{Align, ColumnId, ColumnWidth, GridLayout, LayoutOptions};

fn uniform_grid(count: usize, width: f64, viewport: f64) -> (GridLayout, Vec<ColumnId>) {
    let mut g = GridLayout::new(LayoutOptions::default());
    let ids = (0..count)
        .map(|_| g.add_column(ColumnWidth::Pixel(width)).unwrap())
        .collect();
    g.set_viewport_width(viewport);
    g.resolve_columns();
    (g, ids)
}

fn scroll_and_resolve(c: &mut ScrollController, event: ScrollEvent) -> bool {
    let moved = c.on_scroll_event(event);
    c.layout_mut().resolve_columns();
    moved
}

#[test]
fn arrow_buttons_step_by_column() {
    let (g, ids) = uniform_grid(10, 100.0, 300.0);
    let mut c = ScrollController::from_layout(g);

    assert_eq!(c.first_visible_scrolling_column(), Some((ids[0], 0.0)));
    assert_eq!(c.small_scroll_decrease(), 0.0);
    assert!(!scroll_and_resolve(&mut c, ScrollEvent::SmallDecrement));

    assert!(scroll_and_resolve(&mut c, ScrollEvent::SmallIncrement));
    assert_eq!(c.layout().horizontal_offset(), 100.0);

    c.on_scroll(130.0);
    c.layout_mut().resolve_columns();
    assert_eq!(c.first_visible_scrolling_column(), Some((ids[1], 30.0)));
    assert_eq!(c.small_scroll_increase(), 70.0);
    assert_eq!(c.small_scroll_decrease(), 30.0);

    assert!(scroll_and_resolve(&mut c, ScrollEvent::SmallDecrement));
    assert_eq!(c.layout().horizontal_offset(), 100.0);
    // Column 1 is now flush with the left edge, so the whole of column 0 comes back.
    assert_eq!(c.small_scroll_decrease(), 100.0);

    assert!(scroll_and_resolve(&mut c, ScrollEvent::SmallIncrement));
    assert_eq!(c.layout().horizontal_offset(), 200.0);
}

#[test]
fn arrow_steps_measure_against_the_frozen_edge() {
    let (mut g, ids) = uniform_grid(10, 100.0, 300.0);
    g.set_frozen_counts(1, 0).unwrap();
    g.resolve_columns();
    let mut c = ScrollController::from_layout(g);

    assert_eq!(c.first_visible_scrolling_column(), Some((ids[1], 0.0)));
    assert_eq!(c.small_scroll_decrease(), 0.0);

    c.on_scroll(40.0);
    c.layout_mut().resolve_columns();
    assert_eq!(c.first_visible_scrolling_column(), Some((ids[1], 40.0)));
    assert_eq!(c.small_scroll_increase(), 60.0);
    assert!(scroll_and_resolve(&mut c, ScrollEvent::SmallIncrement));
    assert_eq!(c.layout().horizontal_offset(), 100.0);
    assert_eq!(c.first_visible_scrolling_column(), Some((ids[2], 0.0)));
}

#[test]
fn last_step_is_clamped_to_scroll_range() {
    let (g, _) = uniform_grid(5, 100.0, 350.0);
    let mut c = ScrollController::from_layout(g);
    assert_eq!(c.layout().max_horizontal_offset(), 150.0);

    assert!(scroll_and_resolve(&mut c, ScrollEvent::SmallIncrement));
    assert!(scroll_and_resolve(&mut c, ScrollEvent::SmallIncrement));
    assert_eq!(c.layout().horizontal_offset(), 150.0);
    assert!(!scroll_and_resolve(&mut c, ScrollEvent::SmallIncrement));
}

#[test]
fn wheel_deltas_are_clamped() {
    let (g, _) = uniform_grid(10, 100.0, 300.0);
    let mut c = ScrollController::from_layout(g);

    assert!(!c.on_wheel(40.0));
    assert_eq!(c.layout().horizontal_offset(), 0.0);
    assert!(c.on_wheel(-50.0));
    assert_eq!(c.layout().horizontal_offset(), 50.0);
    assert!(c.on_wheel(-10_000.0));
    assert_eq!(c.layout().horizontal_offset(), 700.0);
    assert!(!c.on_wheel(f64::NAN));
}

#[test]
fn scroll_bar_values_are_clamped_and_near_equal_values_ignored() {
    let (g, ids) = uniform_grid(10, 100.0, 300.0);
    let mut c = ScrollController::from_layout(g);

    assert!(c.on_scroll_event(ScrollEvent::Value(250.0)));
    assert!(!c.on_scroll(250.0 + 5e-14));
    assert!(c.on_scroll_event(ScrollEvent::Value(1e9)));
    assert_eq!(c.layout().horizontal_offset(), 700.0);
    assert!(c.on_scroll(-5.0));
    assert_eq!(c.layout().horizontal_offset(), 0.0);

    c.layout_mut().resolve_columns();
    assert_eq!(c.scroll_column_into_view(ids[6], Align::End), Some(400.0));
    assert_eq!(c.layout().horizontal_offset(), 400.0);
}
