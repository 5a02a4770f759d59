//! Adapter utilities for the `grid-columns` crate.
//!
//! The `grid-columns` crate is UI-agnostic and focuses on the core layout math and state. This
//! crate turns toolkit scroll input into horizontal offsets the way a data grid expects:
//!
//! - wheel/touchpad deltas, clamped to the scroll range
//! - column-wise arrow-button steps (reveal the partly hidden column, or the previous one)
//! - scroll-bar value changes and scroll-column-into-view
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;

#[cfg(test)]
mod tests;

pub use controller::{ScrollController, ScrollEvent};
