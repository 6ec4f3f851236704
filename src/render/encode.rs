use std::io::Cursor;

use crate::foundation::{
    error::{VitrineError, VitrineResult},
    math::unpremul_u8,
};

pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Environment variable overriding [`ExportSettings::jpeg_quality`].
pub const JPEG_QUALITY_ENV: &str = "VITRINE_JPEG_QUALITY";

/// A finished raster, premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Premultiplied RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            for c in &mut px[..3] {
                *c = unpremul_u8(*c, a);
            }
        }
        out
    }

    fn to_rgba_image(&self) -> VitrineResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| VitrineError::encode("raster byte length does not match its size"))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Final export.
    #[default]
    Jpeg,
    /// Lossless previews.
    Png,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    /// 1..=100; only used for JPEG.
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExportSettings {
    pub fn png() -> Self {
        Self {
            format: ExportFormat::Png,
            ..Self::default()
        }
    }

    /// Apply [`JPEG_QUALITY_ENV`] if it is set.
    pub fn with_env_overrides(self) -> Self {
        self.with_quality_override(std::env::var(JPEG_QUALITY_ENV).ok().as_deref())
    }

    /// Apply a textual quality override; invalid values are logged and ignored.
    pub fn with_quality_override(mut self, value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return self;
        };
        match raw.trim().parse::<u8>() {
            Ok(q) if (1..=100).contains(&q) => self.jpeg_quality = q,
            _ => tracing::warn!(value = raw, "ignoring invalid {JPEG_QUALITY_ENV}"),
        }
        self
    }
}

/// An encoded poster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedPoster {
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

pub fn encode(image: &RasterImage, settings: &ExportSettings) -> VitrineResult<ExportedPoster> {
    let bytes = match settings.format {
        ExportFormat::Jpeg => encode_jpeg(image, settings.jpeg_quality)?,
        ExportFormat::Png => encode_png(image)?,
    };
    Ok(ExportedPoster {
        width: image.width,
        height: image.height,
        format: settings.format,
        bytes,
    })
}

/// Lossy export; alpha is dropped after unpremultiplying.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> VitrineResult<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(image.to_rgba_image()?).to_rgb8();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(|e| VitrineError::encode(format!("jpeg: {e}")))?;
    Ok(buf)
}

pub fn encode_png(image: &RasterImage) -> VitrineResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(image.to_rgba_image()?)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| VitrineError::encode(format!("png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
