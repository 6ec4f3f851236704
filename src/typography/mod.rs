//! Text measurement, size fitting and the poster text stack.

/// Block placement for price, location, title and description.
pub mod compose;
/// Descending font-size search with greedy wrapping.
pub mod fit;
/// Measuring and shaping lines.
pub mod measure;
