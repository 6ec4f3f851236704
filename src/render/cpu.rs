use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::{decode::DecodedPhoto, photo::FrameId},
    foundation::{
        core::{Rect, Rgba8, Size},
        error::{VitrineError, VitrineResult},
    },
    render::{
        encode::RasterImage,
        surface::{Surface, cover_crop},
    },
    typography::{
        compose::TextRun,
        measure::{FontBook, FontStyle, FontWeight},
    },
};

/// [`Surface`] rasterized on the CPU with `vello_cpu`.
///
/// Text needs a [`FontBook`]; without one, [`Surface::draw_text`] fails.
pub struct CpuSurface<'f> {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    fonts: Option<&'f mut FontBook>,
    image_cache: HashMap<FrameId, vello_cpu::Image>,
    font_cache: HashMap<(FontWeight, FontStyle), vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for CpuSurface<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fonts", &self.fonts.is_some())
            .finish()
    }
}

impl<'f> CpuSurface<'f> {
    pub fn new(width: u32, height: u32, fonts: Option<&'f mut FontBook>) -> VitrineResult<Self> {
        if width == 0 || height == 0 {
            return Err(VitrineError::surface(format!(
                "surface size {width}x{height} is empty"
            )));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| VitrineError::surface("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| VitrineError::surface("surface height exceeds u16"))?;

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            width: width_u16,
            height: height_u16,
            fonts,
            image_cache: HashMap::new(),
            font_cache: HashMap::new(),
        })
    }

    fn image_paint_for(
        &mut self,
        frame: FrameId,
        photo: &DecodedPhoto,
    ) -> VitrineResult<vello_cpu::Image> {
        if let Some(paint) = self.image_cache.get(&frame) {
            return Ok(paint.clone());
        }
        let pixmap = photo_to_pixmap(photo)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(frame, paint.clone());
        Ok(paint)
    }
}

impl Surface for CpuSurface<'_> {
    type Output = RasterImage;

    fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> VitrineResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn draw_image_cover(
        &mut self,
        rect: Rect,
        frame: FrameId,
        photo: &DecodedPhoto,
    ) -> VitrineResult<()> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Ok(());
        }
        let paint = self.image_paint_for(frame, photo)?;
        let image = Size::new(f64::from(photo.width), f64::from(photo.height));
        let crop = cover_crop(image, rect.size());
        let scale = rect.width() / crop.width();

        // Image space to canvas: the crop rect lands exactly on `rect`.
        self.ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0))
                * vello_cpu::kurbo::Affine::scale(scale)
                * vello_cpu::kurbo::Affine::translate((-crop.x0, -crop.y0)),
        );
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&rect_to_cpu(crop));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun, color: Rgba8) -> VitrineResult<()> {
        let Some(fonts) = self.fonts.as_deref_mut() else {
            return Err(VitrineError::surface("no fonts loaded for text rendering"));
        };
        if run.text.is_empty() || run.font.size <= 0.0 {
            return Ok(());
        }

        let layout = fonts.layout_line(&run.text, &run.font, color);
        let key = (run.font.weight, run.font.style);
        let font = match self.font_cache.get(&key) {
            Some(font) => font.clone(),
            None => {
                let bytes = fonts.face_bytes(&run.font).as_ref().clone();
                let font =
                    vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
                self.font_cache.insert(key, font.clone());
                font
            }
        };

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((run.origin.x, run.baseline)));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let brush = glyph_run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Glyph positions are relative to the layout top; shift onto the baseline.
                let baseline = glyph_run.baseline();
                let glyphs = glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(glyph_run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn finish(mut self) -> VitrineResult<RasterImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(RasterImage {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn photo_to_pixmap(photo: &DecodedPhoto) -> VitrineResult<vello_cpu::Pixmap> {
    let w: u16 = photo
        .width
        .try_into()
        .map_err(|_| VitrineError::surface("photo width exceeds u16"))?;
    let h: u16 = photo
        .height
        .try_into()
        .map_err(|_| VitrineError::surface("photo height exceeds u16"))?;
    if photo.rgba8_premul.len() != photo.width as usize * photo.height as usize * 4 {
        return Err(VitrineError::surface("photo byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = photo
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
