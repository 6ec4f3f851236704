//! Poster geometry, theme, planning and the editing session.

/// JSON poster documents.
pub mod document;
/// Canonical canvas geometry.
pub mod metrics;
/// Resolution-independent paint plan.
pub mod plan;
/// Photos, text and gestures for one poster being edited.
pub mod session;
/// Color palettes.
pub mod theme;
