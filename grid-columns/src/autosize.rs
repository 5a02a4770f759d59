use std::collections::HashMap;

use crate::ColumnId;

/// Grow-only record of the widest measured cell per column.
///
/// Every row's measure pass reports into the same accumulator, which is how all rows converge on
/// one width for an auto-sized column. Widths only grow until the column is reset, so scrolling
/// vertically never makes a column jitter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasuredWidths {
    widths: HashMap<ColumnId, f64>,
}

impl MeasuredWidths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ColumnId) -> Option<f64> {
        self.widths.get(&id).copied()
    }

    /// Records a measured width. Returns `true` if the column's desired width grew.
    pub fn observe(&mut self, id: ColumnId, width: f64) -> bool {
        if !width.is_finite() || width < 0.0 {
            return false;
        }
        match self.widths.get_mut(&id) {
            Some(cur) if *cur >= width => false,
            Some(cur) => {
                *cur = width;
                true
            }
            None => {
                self.widths.insert(id, width);
                true
            }
        }
    }

    /// Sets a width directly, replacing any measured value.
    pub fn set(&mut self, id: ColumnId, width: f64) {
        self.widths.insert(id, width.max(0.0));
    }

    pub fn reset(&mut self, id: ColumnId) {
        self.widths.remove(&id);
    }

    pub fn clear(&mut self) {
        self.widths.clear();
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, f64)> + '_ {
        self.widths.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(ColumnId, f64)> for MeasuredWidths {
    fn from_iter<T: IntoIterator<Item = (ColumnId, f64)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (id, w) in iter {
            out.set(id, w);
        }
        out
    }
}
