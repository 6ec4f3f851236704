use crate::{
    assets::{decode::DecodedPhoto, photo::FrameId},
    foundation::{
        core::{Rect, Rgba8, Size},
        error::VitrineResult,
    },
    typography::compose::TextRun,
};

/// 2D drawing target the compositor paints into.
///
/// Coordinates are surface pixels with the origin at the top-left.
pub trait Surface {
    type Output;

    fn size(&self) -> Size;

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> VitrineResult<()>;

    /// Stroke drawn inside `rect`, `width` pixels thick.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) -> VitrineResult<()> {
        for edge in border_edges(rect, width) {
            self.fill_rect(edge, color)?;
        }
        Ok(())
    }

    /// Draw `photo` scaled to cover `rect`, center-cropped on the overflowing axis.
    fn draw_image_cover(
        &mut self,
        rect: Rect,
        frame: FrameId,
        photo: &DecodedPhoto,
    ) -> VitrineResult<()>;

    fn draw_text(&mut self, run: &TextRun, color: Rgba8) -> VitrineResult<()>;

    fn finish(self) -> VitrineResult<Self::Output>;
}

/// The part of an `image`-sized picture visible when it covers a `target`-shaped box.
pub fn cover_crop(image: Size, target: Size) -> Rect {
    if image.width <= 0.0 || image.height <= 0.0 || target.width <= 0.0 || target.height <= 0.0 {
        return image.to_rect();
    }
    let scale = (target.width / image.width).max(target.height / image.height);
    let visible = Size::new(target.width / scale, target.height / scale);
    let x0 = (image.width - visible.width) / 2.0;
    let y0 = (image.height - visible.height) / 2.0;
    Rect::new(x0, y0, x0 + visible.width, y0 + visible.height)
}

/// Four edge strips of a `width`-thick inner border. Empty for a non-positive width.
pub fn border_edges(rect: Rect, width: f64) -> Vec<Rect> {
    let w = width.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if w <= 0.0 {
        return Vec::new();
    }
    vec![
        Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + w),
        Rect::new(rect.x0, rect.y1 - w, rect.x1, rect.y1),
        Rect::new(rect.x0, rect.y0 + w, rect.x0 + w, rect.y1 - w),
        Rect::new(rect.x1 - w, rect.y0 + w, rect.x1, rect.y1 - w),
    ]
}

/// One recorded paint call.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Fill { rect: Rect, color: Rgba8 },
    Image { rect: Rect, frame: FrameId, crop: Rect },
    Text { run: TextRun, color: Rgba8 },
}

/// Surface that records paint calls instead of rasterizing them.
#[derive(Clone, Debug)]
pub struct DisplayList {
    size: Size,
    ops: Vec<SurfaceOp>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }
}

impl Surface for DisplayList {
    type Output = Vec<SurfaceOp>;

    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> VitrineResult<()> {
        self.ops.push(SurfaceOp::Fill { rect, color });
        Ok(())
    }

    fn draw_image_cover(
        &mut self,
        rect: Rect,
        frame: FrameId,
        photo: &DecodedPhoto,
    ) -> VitrineResult<()> {
        let image = Size::new(f64::from(photo.width), f64::from(photo.height));
        self.ops.push(SurfaceOp::Image {
            rect,
            frame,
            crop: cover_crop(image, rect.size()),
        });
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun, color: Rgba8) -> VitrineResult<()> {
        self.ops.push(SurfaceOp::Text {
            run: run.clone(),
            color,
        });
        Ok(())
    }

    fn finish(self) -> VitrineResult<Self::Output> {
        Ok(self.ops)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
