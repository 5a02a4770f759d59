use crate::ColumnId;

/// Configuration errors reported by [`crate::ColumnModel`] and [`crate::GridLayout`] setters.
///
/// A setter that returns an error leaves the model untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("column {0} does not exist")]
    UnknownColumn(ColumnId),

    #[error("column {column}: min width {min} is greater than max width {max}")]
    InvalidBounds { column: ColumnId, min: f64, max: f64 },

    #[error("width value {0} must be finite and non-negative")]
    InvalidWidth(f64),

    #[error("left-frozen columns must be a contiguous prefix and right-frozen columns a contiguous suffix of the visible columns")]
    FrozenNotContiguous,

    #[error("display index {index} is out of range for {len} columns")]
    DisplayIndexOutOfRange { index: usize, len: usize },

    #[error("{left} left-frozen and {right} right-frozen columns exceed the {visible} visible columns")]
    FrozenCountOutOfRange {
        left: usize,
        right: usize,
        visible: usize,
    },
}

/// Error returned when parsing a [`crate::ColumnWidth`] from a string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid column width `{input}`")]
pub struct ParseColumnWidthError {
    pub(crate) input: String,
}

impl ParseColumnWidthError {
    pub fn input(&self) -> &str {
        &self.input
    }
}
