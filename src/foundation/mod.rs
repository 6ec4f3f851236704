//! Geometry, colors, hashing and the error taxonomy shared by every layer.

/// Points, rects, normalized frame rects and colors.
pub mod core;
/// Crate error type and result alias.
pub mod error;
/// Small integer and hashing helpers.
pub mod math;
