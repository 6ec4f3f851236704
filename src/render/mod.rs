//! Painting a plan into a raster and encoding it.

/// Plan painting and export entry points.
pub mod compositor;
/// `vello_cpu` surface.
pub mod cpu;
/// JPEG and PNG export.
pub mod encode;
/// Trailing debounce for live previews.
pub mod preview;
/// Drawing surface capability.
pub mod surface;
