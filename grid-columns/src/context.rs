use crate::RowHeight;

/// Per-pass inputs shared by every row laid out in one request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutContext {
    pub viewport_width: f64,
    pub horizontal_offset: f64,
    /// Star columns share the available width proportionally.
    pub uses_star_sizing: bool,
    pub row_height: RowHeight,
    /// Reserved at the right edge before right-frozen columns start.
    pub right_inset: f64,
    pub horizontal_scrollbar_visible: bool,
    pub max_horizontal_offset: f64,
}

impl LayoutContext {
    pub fn new(viewport_width: f64, horizontal_offset: f64) -> Self {
        Self {
            viewport_width,
            horizontal_offset,
            uses_star_sizing: false,
            row_height: RowHeight::Auto,
            right_inset: 0.0,
            horizontal_scrollbar_visible: false,
            max_horizontal_offset: 0.0,
        }
    }

    /// Height rows are measured against: infinite in auto mode.
    pub fn measure_height(&self) -> f64 {
        match self.row_height {
            RowHeight::Fixed(h) => h,
            RowHeight::Auto => f64::INFINITY,
        }
    }

    /// `true` while the offset has not reached the end of the scroll range.
    ///
    /// Offsets are compared at three decimals so accumulated float error at the end of the range
    /// does not keep the right-frozen shadow on.
    pub fn can_scroll_right(&self) -> bool {
        less_at_3_decimals(self.horizontal_offset, self.max_horizontal_offset)
    }

    /// Leftover width the filler cell absorbs once the columns took `total_actual_width`.
    ///
    /// Measured against actual widths so that columns plus filler add up to the available width
    /// even when it is fractional. Zero for an unconstrained viewport.
    pub fn filler_width(&self, total_actual_width: f64) -> f64 {
        let available = self.viewport_width - self.right_inset;
        if !available.is_finite() {
            return 0.0;
        }
        let leftover = available - total_actual_width;
        if leftover <= 0.0 || are_close(available, total_actual_width) {
            0.0
        } else {
            leftover
        }
    }
}

pub(crate) fn less_at_3_decimals(a: f64, b: f64) -> bool {
    (a * 1000.0).round() < (b * 1000.0).round()
}

/// Equal within a few ulps, scaled by magnitude.
pub(crate) fn are_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let eps = (a.abs() + b.abs() + 10.0) * f64::EPSILON;
    (a - b).abs() < eps
}
