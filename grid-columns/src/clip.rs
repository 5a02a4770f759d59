use crate::{LayoutRounding, Rect};

/// Computes the visible part of a scrolling cell that slid underneath a frozen run.
///
/// Cells may be transparent, so overlap cannot be left to z-order; the obscured strip is clipped
/// away instead. Clip rectangles are in cell-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipCalculator {
    frozen_left_edge: f64,
    frozen_right_edge: f64,
    row_height: f64,
    rounding: LayoutRounding,
}

impl ClipCalculator {
    pub fn new(frozen_left_edge: f64, frozen_right_edge: f64, row_height: f64, rounding: LayoutRounding) -> Self {
        Self {
            frozen_left_edge,
            frozen_right_edge,
            row_height,
            rounding,
        }
    }

    /// Returns `None` when nothing has to be clipped.
    ///
    /// Frozen cells are never clipped. Offsets and widths are floored at zero and snapped to
    /// device pixels.
    pub fn compute_clip(&self, frozen: bool, width: f64, cell_left: f64, cell_right: f64) -> Option<Rect> {
        if frozen {
            return None;
        }
        let left_overlap = self.frozen_left_edge - cell_left;
        let right_overlap = cell_right - self.frozen_right_edge;
        let snap = |v: f64| self.rounding.snap(v);

        let (x, w) = match (left_overlap > 0.0, right_overlap > 0.0) {
            (true, true) => (
                snap(width.min(left_overlap)),
                snap((width - left_overlap - right_overlap).max(0.0)),
            ),
            (true, false) => {
                let x = snap(width.min(left_overlap));
                (x, snap((width - x).max(0.0)))
            }
            (false, true) => {
                let hidden = snap(width.min(right_overlap));
                (0.0, snap((width - hidden).max(0.0)))
            }
            (false, false) => return None,
        };
        Some(Rect::new(x, 0.0, w, self.row_height))
    }
}
