//! A headless column-layout engine for data grids.
//!
//! For adapter-level utilities (wheel, scroll-bar and arrow-button input), see the
//! `grid-columns-adapter` crate.
//!
//! This crate computes where every cell of a row goes:
//! - column widths from fixed, content-sized and star (proportional) specs, within min/max bounds
//! - left- and right-frozen column runs that stay put while the middle scrolls
//! - which scrolling columns are inside the viewport (column virtualization)
//! - clip rectangles for cells that slide underneath a frozen run
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport width and horizontal scroll offset
//! - cell measurement (via [`Measurable`])
//! - a sink for final cell placement (via [`Arrangeable`])
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod autosize;
mod clip;
mod column;
mod context;
mod engine;
mod error;
mod length;
mod options;
mod partition;
mod pass;
mod resolve;
mod row;
mod types;
mod virtualize;


pub use autosize::MeasuredWidths;
pub use clip::ClipCalculator;
pub use column::{Column, ColumnModel};
pub use context::LayoutContext;
pub use engine::{GridLayout, LayoutOutput, LayoutRequestCallback, Phase, ResolvedWidth};
pub use error::{LayoutError, ParseColumnWidthError};
pub use length::ColumnWidth;
pub use options::{
    DEFAULT_MIN_COLUMN_WIDTH, LayoutOptions, LayoutRounding, MAX_STAR_COLUMN_WIDTH,
    MIN_STAR_COLUMN_WIDTH,
};
pub use partition::{ColumnSlot, FrozenPartition};
pub use pass::{Arrangeable, CellLayoutPass, Measurable, RowMeasure};
pub use resolve::{WidthResolver, desired_width};
pub use row::{Cell, FillerCell, Row};
pub use types::{
    Align, ColumnId, FrozenSide, LayoutReason, LayoutRequest, Rect, RowHeight, Segment,
    ShadowPosition, Size,
};
pub use virtualize::{ColumnVirtualizer, ColumnWindow, Materialize, is_in_window, select_visible};
