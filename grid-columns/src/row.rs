use alloc::vec::Vec;

use crate::{ColumnId, ColumnModel, Rect, ShadowPosition};

/// Layout state of one cell, written by the arrange pass.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub column: ColumnId,
    /// Row-local bounds. `bounds.width` is the column's display width.
    pub bounds: Rect,
    /// Cell-local clip; `None` means the cell is fully shown.
    pub clip: Option<Rect>,
    pub is_frozen: bool,
    pub shows_frozen_shadow: bool,
    /// Edge the frozen shadow renders on. `None` for scrolling cells.
    pub shadow_position: Option<ShadowPosition>,
    /// Materialized in the last pass. Hidden cells keep their previous bounds.
    pub is_visible: bool,
}

impl Cell {
    pub fn new(column: ColumnId) -> Self {
        Self {
            column,
            bounds: Rect::default(),
            clip: None,
            is_frozen: false,
            shows_frozen_shadow: false,
            shadow_position: None,
            is_visible: false,
        }
    }
}

/// The synthetic trailing cell that absorbs leftover horizontal space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillerCell {
    pub bounds: Rect,
    /// `false` when the columns fill (or overflow) the viewport.
    pub is_visible: bool,
}

/// One grid row: a cell per column plus the filler.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub index: usize,
    cells: Vec<Cell>,
    pub filler: FillerCell,
    /// Cached so the row keeps its height while columns virtualize in and out.
    pub desired_height: f64,
    pub needs_measure: bool,
    /// Visible columns that had no cell in this row during the last pass.
    pub missing_columns: Vec<ColumnId>,
}

impl Row {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            needs_measure: true,
            ..Self::default()
        }
    }

    /// A row with one cell for every column of `columns`, in display order.
    pub fn for_columns(index: usize, columns: &ColumnModel) -> Self {
        let mut row = Self::new(index);
        row.cells = columns.ids().iter().map(|&id| Cell::new(id)).collect();
        row
    }

    /// Adds cells for new columns and drops cells whose column was removed. Returns `true` if
    /// anything changed. Cells are reordered to follow the model's display order.
    pub fn sync_cells(&mut self, columns: &ColumnModel) -> bool {
        let changed = self.cells.len() != columns.len()
            || self
                .cells
                .iter()
                .map(|c| c.column)
                .ne(columns.ids().iter().copied());
        if !changed {
            return false;
        }

        let mut old = core::mem::take(&mut self.cells);
        self.cells = columns
            .ids()
            .iter()
            .map(|&id| match old.iter().position(|c| c.column == id) {
                Some(i) => old.swap_remove(i),
                None => Cell::new(id),
            })
            .collect();
        self.needs_measure = true;
        true
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, column: ColumnId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column == column)
    }

    pub fn cell_mut(&mut self, column: ColumnId) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.column == column)
    }

    /// Adds a cell for `column` unless one exists.
    pub fn insert_cell(&mut self, column: ColumnId) {
        if self.cell(column).is_none() {
            self.cells.push(Cell::new(column));
            self.needs_measure = true;
        }
    }

    pub fn remove_cell(&mut self, column: ColumnId) -> Option<Cell> {
        let i = self.cells.iter().position(|c| c.column == column)?;
        self.needs_measure = true;
        Some(self.cells.remove(i))
    }

    /// Materialized cells, in the order they are stored.
    pub fn visible_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|c| c.is_visible)
    }

    /// Clears the cached height, e.g. before the row is reused for another item.
    pub fn recycle(&mut self, index: usize) {
        self.index = index;
        self.desired_height = 0.0;
        self.needs_measure = true;
        self.missing_columns.clear();
    }
}
