//! Vitrine composes listing posters from up to four photos and four text fields.
//!
//! # Pipeline overview
//!
//! 1. **Load**: photo bytes are decoded in one parallel batch into a [`FrameSet`].
//! 2. **Solve**: the mosaic solver picks the split tree that covers the most area and
//!    yields a normalized rect per frame.
//! 3. **Edit** (optional): drag, resize and pinch gestures adjust those rects, with
//!    snapping and clamping to the container.
//! 4. **Plan**: photo rects and the fitted text stack are placed on the canonical
//!    canvas as a [`PosterPlan`]. A preview is the same plan scaled uniformly.
//! 5. **Paint and encode**: the plan is painted into a [`Surface`] and exported as JPEG
//!    (final) or PNG (preview).
//!
//! Solving, fitting and planning are pure and deterministic. All pixels are
//! premultiplied RGBA8 until encoding.
#![forbid(unsafe_code)]

/// Photo decoding, identity and batch loading.
pub mod assets;
/// Geometry, colors and errors.
pub mod foundation;
/// Pointer and touch manipulation of frames.
pub mod interaction;
/// Mosaic layout solving.
pub mod layout;
/// Poster geometry, theme, plan and session.
pub mod poster;
/// Surfaces, compositor and encoders.
pub mod render;
/// Text measurement and fitting.
pub mod typography;

pub use assets::decode::{DecodedPhoto, decode_photo};
pub use assets::loader::{LoadTicket, PhotoLoader};
pub use assets::photo::{FrameId, FrameSet, MAX_PHOTOS, PhotoFrame, PhotoSource};
pub use foundation::core::{NormalizedRect, Point, Rect, Rgba8, Size};
pub use foundation::error::{VitrineError, VitrineResult};
pub use interaction::gesture::{
    ContainerMetrics, GestureEffect, GestureKind, HitTarget, IgnoreReason,
    ManipulationConfig, ManipulationController, PointerInput, TouchPoint,
};
pub use interaction::snap::{snap_and_clamp, snap_axis};
pub use layout::solver::{LayoutRect, LayoutSolution, solve};
pub use poster::document::{FontPaths, PosterDocument};
pub use poster::metrics::PosterMetrics;
pub use poster::plan::{PlannedFrame, PosterPlan};
pub use poster::session::PosterSession;
pub use poster::theme::{ThemeChoice, ThemePalette};
pub use render::compositor::{compose_poster, paint_plan, rasterize_plan, render_preview};
pub use render::cpu::CpuSurface;
pub use render::encode::{
    DEFAULT_JPEG_QUALITY, ExportFormat, ExportSettings, ExportedPoster, JPEG_QUALITY_ENV,
    RasterImage,
};
pub use render::preview::{PreviewScheduler, PreviewTicket};
pub use render::surface::{DisplayList, Surface, SurfaceOp};
pub use typography::compose::{
    BlockRole, ComposedTypography, PosterText, TextRun, TypographyLimits, compose_typography,
};
pub use typography::fit::{FitBox, TypographyFit, fit_block, fit_single_line};
pub use typography::measure::{
    FixedAdvance, FontBook, FontSources, FontSpec, FontStyle, FontWeight, TextMeasure,
};
