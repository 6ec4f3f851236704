use crate::{
    assets::photo::FrameSet,
    foundation::error::VitrineResult,
    poster::{metrics::PosterMetrics, plan::PosterPlan, theme::ThemePalette},
    render::{
        cpu::CpuSurface,
        encode::{ExportSettings, ExportedPoster, RasterImage, encode},
        surface::Surface,
    },
    typography::{
        compose::PosterText,
        measure::{FixedAdvance, FontBook, TextMeasure},
    },
};

/// Paint `plan` into `surface`.
///
/// Order: canvas, photo region, frames (cover image then border) in render order,
/// text card, text runs, divider. Frames missing from `frames` are skipped.
pub fn paint_plan<S: Surface>(
    surface: &mut S,
    plan: &PosterPlan,
    palette: &ThemePalette,
    frames: &FrameSet,
    draw_text: bool,
) -> VitrineResult<()> {
    surface.fill_rect(plan.canvas.to_rect(), palette.background)?;
    surface.fill_rect(plan.photo_region, palette.muted)?;

    for planned in &plan.frames {
        let Some(frame) = frames.get(planned.id) else {
            tracing::warn!(frame = %planned.id, "planned frame is no longer loaded");
            continue;
        };
        surface.draw_image_cover(planned.rect, planned.id, &frame.photo)?;
        surface.stroke_rect(planned.rect, plan.border_width, palette.border)?;
    }

    surface.fill_rect(plan.card, palette.card)?;

    if draw_text {
        for run in plan.typography.text_runs() {
            surface.draw_text(&run, palette.text_color(run.role))?;
        }
    }
    if let Some(divider) = plan.typography.divider {
        surface.fill_rect(divider, palette.border)?;
    }
    Ok(())
}

/// Rasterize `plan` on the CPU. Text is skipped when no fonts are given.
pub fn rasterize_plan(
    plan: &PosterPlan,
    palette: &ThemePalette,
    frames: &FrameSet,
    fonts: Option<&mut FontBook>,
) -> VitrineResult<RasterImage> {
    let (width, height) = plan.pixel_size();
    let draw_text = fonts.is_some();
    if !draw_text && !plan.typography.text_runs().is_empty() {
        tracing::warn!("no fonts loaded; poster text is not drawn");
    }
    let mut surface = CpuSurface::new(width, height, fonts)?;
    paint_plan(&mut surface, plan, palette, frames, draw_text)?;
    surface.finish()
}

fn build_plan(
    frames: &FrameSet,
    text: &PosterText,
    photo_area_width: f64,
    metrics: &PosterMetrics,
    fonts: Option<&mut FontBook>,
) -> PosterPlan {
    let mut fallback = FixedAdvance::default();
    let measure: &mut dyn TextMeasure = match fonts {
        Some(book) => book,
        None => &mut fallback,
    };
    PosterPlan::build(metrics, frames, photo_area_width, text, measure)
}

/// Compose and encode the final poster at canonical resolution.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(level = "debug", skip_all, fields(frames = frames.len(), format = ?settings.format))]
pub fn compose_poster(
    frames: &FrameSet,
    text: &PosterText,
    palette: &ThemePalette,
    photo_area_width: f64,
    metrics: &PosterMetrics,
    mut fonts: Option<&mut FontBook>,
    settings: &ExportSettings,
) -> VitrineResult<ExportedPoster> {
    metrics.validate()?;
    let plan = build_plan(frames, text, photo_area_width, metrics, fonts.as_deref_mut());
    let raster = rasterize_plan(&plan, palette, frames, fonts)?;
    let exported = encode(&raster, settings)?;
    tracing::debug!(
        width = exported.width,
        height = exported.height,
        bytes = exported.bytes.len(),
        "poster exported"
    );
    Ok(exported)
}

/// Render a PNG preview `preview_height` pixels tall from the scaled canonical plan.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(level = "debug", skip_all, fields(preview_height = preview_height))]
pub fn render_preview(
    frames: &FrameSet,
    text: &PosterText,
    palette: &ThemePalette,
    photo_area_width: f64,
    metrics: &PosterMetrics,
    mut fonts: Option<&mut FontBook>,
    preview_height: f64,
) -> VitrineResult<ExportedPoster> {
    metrics.validate()?;
    let plan = build_plan(frames, text, photo_area_width, metrics, fonts.as_deref_mut())
        .for_height(preview_height);
    let raster = rasterize_plan(&plan, palette, frames, fonts)?;
    encode(&raster, &ExportSettings::png())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
