//! Photo decoding, identity and batch loading.

/// Image bytes to premultiplied RGBA8.
pub mod decode;
/// Generation-checked parallel photo batches.
pub mod loader;
/// Photo sources, frame identity and the frame set.
pub mod photo;
