use crate::RowHeight;

/// Default minimum width for columns that do not set their own.
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 20.0;

/// Star columns never shrink below this, so a zero-width star column still exists in layout.
pub const MIN_STAR_COLUMN_WIDTH: f64 = 0.001;

/// Width star columns grow to when the available width is unbounded.
pub const MAX_STAR_COLUMN_WIDTH: f64 = 10_000.0;

/// Configuration for [`crate::GridLayout`].
///
/// All fields are plain values so the options can be cloned, compared and (with
/// `feature = "serde"`) persisted. Use the `with_*` builders or set fields directly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Minimum width for columns without an explicit minimum.
    pub min_column_width: f64,
    /// Maximum width for columns without an explicit maximum.
    pub max_column_width: f64,
    /// Lower bound applied to every star column's effective minimum.
    pub min_star_column_width: f64,
    /// Width star columns take when the viewport width is infinite.
    pub max_star_column_width: f64,

    pub row_height: RowHeight,

    /// Enables proportional distribution for star columns when the viewport width is finite.
    ///
    /// When disabled, star columns are sized from their measured content like `Auto`.
    pub star_sizing: bool,

    /// Snap column edges to device pixels so adjacent columns never leave seams.
    pub layout_rounding: bool,
    /// Device pixels per layout unit (e.g. 2.0 on a HiDPI display).
    pub layout_scale: f64,

    /// Fully materialize row 0 so the total content width is accurate before virtualization.
    pub prime_first_row: bool,

    /// Space reserved at the right edge of the viewport before right-frozen columns start.
    pub right_inset: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_column_width: f64::INFINITY,
            min_star_column_width: MIN_STAR_COLUMN_WIDTH,
            max_star_column_width: MAX_STAR_COLUMN_WIDTH,
            row_height: RowHeight::Auto,
            star_sizing: true,
            layout_rounding: true,
            layout_scale: 1.0,
            prime_first_row: true,
            right_inset: 0.0,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_width_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_column_width = min;
        self.max_column_width = max;
        self
    }

    pub fn with_max_star_column_width(mut self, width: f64) -> Self {
        self.max_star_column_width = width;
        self
    }

    pub fn with_row_height(mut self, row_height: RowHeight) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_star_sizing(mut self, enabled: bool) -> Self {
        self.star_sizing = enabled;
        self
    }

    pub fn with_layout_rounding(mut self, enabled: bool) -> Self {
        self.layout_rounding = enabled;
        self
    }

    pub fn with_layout_scale(mut self, scale: f64) -> Self {
        self.layout_scale = scale;
        self
    }

    pub fn with_prime_first_row(mut self, enabled: bool) -> Self {
        self.prime_first_row = enabled;
        self
    }

    pub fn with_right_inset(mut self, inset: f64) -> Self {
        self.right_inset = inset;
        self
    }

    pub(crate) fn rounding(&self) -> LayoutRounding {
        LayoutRounding {
            enabled: self.layout_rounding,
            scale: if self.layout_scale > 0.0 && self.layout_scale.is_finite() {
                self.layout_scale
            } else {
                1.0
            },
        }
    }
}

/// Pixel snapping used for display widths and clip rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutRounding {
    pub enabled: bool,
    pub scale: f64,
}

impl LayoutRounding {
    pub const NONE: Self = Self {
        enabled: false,
        scale: 1.0,
    };

    /// Rounds to layout pixels when rounding is enabled.
    pub fn round(&self, v: f64) -> f64 {
        if self.enabled { self.snap(v) } else { v }
    }

    /// Always rounds to device pixels.
    pub fn snap(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return v;
        }
        (v * self.scale).round() / self.scale
    }

    /// Width of `[left, left + width)` after both edges are rounded.
    pub fn rounded_width(&self, left: f64, width: f64) -> f64 {
        if !self.enabled {
            return width;
        }
        self.snap(left + width) - self.snap(left)
    }
}
