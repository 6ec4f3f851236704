//! Pointer and touch manipulation of photo frames.

/// Drag, resize and pinch state machine.
pub mod gesture;
/// Edge snapping against the container and other frames.
pub mod snap;
