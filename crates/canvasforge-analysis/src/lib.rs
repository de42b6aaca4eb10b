//! # CanvasForge Analysis
//!
//! Read-only statistics over a shape list: totals, per-type counts, colors in
//! use, and an anchor-based bounding box.

pub mod stats;

pub use stats::{analyze, BoundingBox, CanvasStats};
