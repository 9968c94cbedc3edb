//! Headless view projections for the Flutter layer.
//!
//! # Responsibility
//! - Shape session state into the exact rows/lines the UI renders.
//! - Keep rendering decisions (placeholders, markers, labels) inside core.

pub mod detail;
pub mod list;
