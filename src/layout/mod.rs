//! Mosaic layout: pick the split tree and solve it for a container.

/// Solving a photo set into pixel rects.
pub mod solver;
/// Candidate split trees.
pub mod tree;
