use alloc::vec::Vec;

use crate::{Column, ColumnId, ColumnModel, ColumnWidth, LayoutOptions, MeasuredWidths};

/// Computes every visible column's actual and display width.
///
/// Resolution runs in three steps:
/// 1. Pixel and content-sized columns are clamped into their bounds.
/// 2. Star columns share what is left, proportionally to their weights. Columns whose share falls
///    outside their bounds are pinned to the bound and the rest is re-shared among the others,
///    at most once per visible column.
/// 3. Display widths are derived from the running left edge so rounded edges never drift.
///
/// Nothing is written to the model until every width is known. Hidden columns keep their last
/// resolved widths.
#[derive(Clone, Copy, Debug)]
pub struct WidthResolver<'a> {
    options: &'a LayoutOptions,
}

#[derive(Clone, Copy, Debug)]
struct StarSlot {
    pos: usize,
    weight: f64,
    min: f64,
    max: f64,
}

impl<'a> WidthResolver<'a> {
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self { options }
    }

    /// Resolves widths and returns the total actual width of the visible columns.
    ///
    /// `uses_star_sizing` enables proportional distribution. When it is `false`, star columns are
    /// sized from their measured content like `Auto`. An infinite `available_width` always caps
    /// star columns at [`LayoutOptions::max_star_column_width`].
    pub fn resolve_widths(
        &self,
        columns: &mut ColumnModel,
        available_width: f64,
        measured: &MeasuredWidths,
        uses_star_sizing: bool,
    ) -> f64 {
        let options = self.options;
        let mut scratch: Vec<(ColumnId, f64)> = Vec::with_capacity(columns.len());
        let mut stars: Vec<StarSlot> = Vec::new();
        let mut fixed_total = 0.0;

        for column in columns.visible() {
            debug_assert!(
                match (column.min_width(), column.max_width()) {
                    (Some(min), Some(max)) => min <= max,
                    _ => true,
                },
                "column {} has min width > max width",
                column.id()
            );
            let (min, max) = column.effective_bounds(options);
            let width = match column.width() {
                ColumnWidth::Pixel(v) => v.clamp(min, max),
                ColumnWidth::Auto | ColumnWidth::SizeToCells | ColumnWidth::SizeToHeader => {
                    desired_width(column, measured).clamp(min, max)
                }
                ColumnWidth::Star(weight) => {
                    if !available_width.is_finite() {
                        options.max_star_column_width.clamp(min, max)
                    } else if uses_star_sizing {
                        stars.push(StarSlot {
                            pos: scratch.len(),
                            weight,
                            min,
                            max,
                        });
                        scratch.push((column.id(), min));
                        continue;
                    } else {
                        desired_width(column, measured).clamp(min, max)
                    }
                }
            };
            fixed_total += width;
            scratch.push((column.id(), width));
        }

        if !stars.is_empty() {
            let budget = scratch.len();
            distribute_stars(&mut scratch, &stars, available_width - fixed_total, budget);
        }

        let mut total = 0.0;
        for &(id, width) in &scratch {
            if let Some(column) = columns.get_mut(id) {
                column.set_resolved(width);
            }
            total += width;
        }
        self.apply_display_widths(columns);

        ltrace!(
            available_width,
            total,
            stars = stars.len(),
            "resolve_widths"
        );
        total
    }

    /// Recomputes display widths from actual widths along the running left edge.
    pub fn apply_display_widths(&self, columns: &mut ColumnModel) {
        let rounding = self.options.rounding();
        let ids: Vec<(ColumnId, f64)> = columns
            .visible()
            .map(|c| (c.id(), c.actual_width()))
            .collect();
        let mut left = 0.0;
        for (id, actual) in ids {
            if let Some(column) = columns.get_mut(id) {
                column.set_display_width(rounding.rounded_width(left, actual));
            }
            left += actual;
        }
    }
}

/// The content-derived width a column asks for before clamping.
pub fn desired_width(column: &Column, measured: &MeasuredWidths) -> f64 {
    let cells = measured.get(column.id()).unwrap_or(0.0);
    match column.width() {
        ColumnWidth::SizeToCells => cells,
        ColumnWidth::SizeToHeader => column.header_desired_width(),
        ColumnWidth::Pixel(v) => v,
        ColumnWidth::Auto | ColumnWidth::Star(_) => cells.max(column.header_desired_width()),
    }
}

fn distribute_stars(scratch: &mut [(ColumnId, f64)], stars: &[StarSlot], remaining: f64, budget: usize) {
    let mut free: Vec<StarSlot> = stars.to_vec();
    let mut settled = 0.0;
    let mut iterations = 0usize;

    while !free.is_empty() {
        iterations += 1;
        let share_of = remaining - settled;
        let weight_sum: f64 = free.iter().map(|s| s.weight).sum();

        let mut next = Vec::with_capacity(free.len());
        for slot in &free {
            let share = if weight_sum > 0.0 {
                share_of * slot.weight / weight_sum
            } else {
                0.0
            };
            let candidate = share.clamp(slot.min, slot.max);
            scratch[slot.pos].1 = candidate;
            if candidate == share {
                next.push(*slot);
            } else {
                settled += candidate;
            }
        }

        if next.len() == free.len() {
            break;
        }
        if iterations >= budget {
            lwarn!(
                iterations,
                unsettled = next.len(),
                "star distribution did not converge; keeping last widths"
            );
            break;
        }
        free = next;
    }
}
