use crate::{
    assets::photo::{FrameId, FrameSet},
    foundation::core::{Rect, Size},
    poster::metrics::PosterMetrics,
    typography::{
        compose::{ComposedTypography, PosterText, compose_typography},
        measure::TextMeasure,
    },
};

/// A frame placed in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlannedFrame {
    pub id: FrameId,
    pub rect: Rect,
}

/// Everything needed to paint one poster at one resolution.
///
/// Built once at canonical resolution; a preview is the same plan uniformly scaled.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PosterPlan {
    pub canvas: Size,
    pub photo_region: Rect,
    /// Frames in render order.
    pub frames: Vec<PlannedFrame>,
    pub card: Rect,
    pub border_width: f64,
    pub typography: ComposedTypography,
}

impl PosterPlan {
    #[tracing::instrument(level = "debug", skip_all, fields(frames = frames.len(), photo_area_width = photo_area_width))]
    pub fn build(
        metrics: &PosterMetrics,
        frames: &FrameSet,
        photo_area_width: f64,
        text: &PosterText,
        measure: &mut dyn TextMeasure,
    ) -> Self {
        let photo_region = metrics.photo_region(photo_area_width);
        let card = metrics.text_card(photo_region);
        let typography = compose_typography(
            measure,
            text,
            metrics.text_region(card),
            &metrics.typography,
        );
        let frames = frames
            .iter()
            .map(|f| PlannedFrame {
                id: f.id,
                rect: f.layout.to_pixels(photo_region),
            })
            .collect();

        Self {
            canvas: metrics.canvas_size(),
            photo_region,
            frames,
            card,
            border_width: metrics.border_width,
            typography,
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            canvas: self.canvas * factor,
            photo_region: self.photo_region.scale_from_origin(factor),
            frames: self
                .frames
                .iter()
                .map(|f| PlannedFrame {
                    id: f.id,
                    rect: f.rect.scale_from_origin(factor),
                })
                .collect(),
            card: self.card.scale_from_origin(factor),
            border_width: self.border_width * factor,
            typography: self.typography.scaled(factor),
        }
    }

    /// Scale so the canvas is `height` pixels tall.
    pub fn for_height(&self, height: f64) -> Self {
        if self.canvas.height <= 0.0 {
            return self.clone();
        }
        self.scaled(height / self.canvas.height)
    }

    /// Integer raster size, rounded.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.canvas.width.round().max(0.0) as u32,
            self.canvas.height.round().max(0.0) as u32,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poster/plan.rs"]
mod tests;
