use crate::{
    foundation::{
        core::{Rect, Size},
        error::{VitrineError, VitrineResult},
    },
    typography::compose::TypographyLimits,
};

/// Canonical poster geometry shared by preview and export.
///
/// All lengths are canonical pixels; a preview scales the finished plan instead of
/// re-deriving anything from these values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PosterMetrics {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Outer margin around the photo region and the text card.
    pub padding: f64,
    /// Horizontal gap between the photo region and the text card.
    pub gutter: f64,
    /// Largest share of the inner width offered to the photo solver.
    pub photo_width_share: f64,
    pub border_width: f64,
    /// Inset of the text stack inside its card.
    pub card_padding: f64,
    pub typography: TypographyLimits,
}

impl Default for PosterMetrics {
    fn default() -> Self {
        Self {
            canvas_width: 1600,
            canvas_height: 1000,
            padding: 48.0,
            gutter: 40.0,
            photo_width_share: 0.6,
            border_width: 2.0,
            card_padding: 40.0,
            typography: TypographyLimits::default(),
        }
    }
}

impl PosterMetrics {
    pub fn canvas_size(&self) -> Size {
        Size::new(f64::from(self.canvas_width), f64::from(self.canvas_height))
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_size().to_rect()
    }

    /// Largest area the solver may fill.
    pub fn photo_container(&self) -> Rect {
        let inner_width = (f64::from(self.canvas_width) - 2.0 * self.padding).max(0.0);
        let x0 = self.padding;
        let y0 = self.padding;
        Rect::new(
            x0,
            y0,
            x0 + inner_width * self.photo_width_share,
            (f64::from(self.canvas_height) - self.padding).max(y0),
        )
    }

    /// The photo region actually used, `photo_area_width` wide.
    pub fn photo_region(&self, photo_area_width: f64) -> Rect {
        let container = self.photo_container();
        let width = photo_area_width.clamp(0.0, container.width());
        Rect::new(container.x0, container.y0, container.x0 + width, container.y1)
    }

    /// Card to the right of `photo_region`, taking all remaining width.
    pub fn text_card(&self, photo_region: Rect) -> Rect {
        let x1 = f64::from(self.canvas_width) - self.padding;
        let x0 = (photo_region.x1 + self.gutter).min(x1);
        Rect::new(x0, photo_region.y0, x1, photo_region.y1)
    }

    pub fn text_region(&self, card: Rect) -> Rect {
        let inset = self.card_padding.min(card.width() / 2.0).min(card.height() / 2.0);
        card.inset(-inset)
    }

    pub fn validate(&self) -> VitrineResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(VitrineError::validation("canvas size must be non-zero"));
        }
        if self.canvas_width > u32::from(u16::MAX) || self.canvas_height > u32::from(u16::MAX) {
            return Err(VitrineError::validation("canvas size exceeds 65535 pixels"));
        }
        for (name, v) in [
            ("padding", self.padding),
            ("gutter", self.gutter),
            ("border_width", self.border_width),
            ("card_padding", self.card_padding),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(VitrineError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !(self.photo_width_share > 0.0 && self.photo_width_share <= 1.0) {
            return Err(VitrineError::validation(
                "photo_width_share must be in (0, 1]",
            ));
        }
        let container = self.photo_container();
        if container.width() <= 0.0 || container.height() <= 0.0 {
            return Err(VitrineError::validation(
                "padding leaves no room for the photo region",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poster/metrics.rs"]
mod tests;
