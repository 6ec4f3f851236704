use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::photo::{MAX_PHOTOS, PhotoSource},
    foundation::{
        core::NormalizedRect,
        error::{VitrineError, VitrineResult},
    },
    poster::theme::{ThemeChoice, ThemePalette},
    typography::{compose::PosterText, measure::FontSources},
};

/// Font files for text rendering; paths are relative to the document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontPaths {
    pub regular: PathBuf,
    #[serde(default)]
    pub bold: Option<PathBuf>,
    #[serde(default)]
    pub italic: Option<PathBuf>,
}

/// JSON description of one poster, as consumed by the command line tool.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PosterDocument {
    /// Photo files in ordinal order; paths are relative to the document.
    #[serde(default)]
    pub photos: Vec<PathBuf>,
    #[serde(default)]
    pub text: PosterText,
    #[serde(default)]
    pub theme: ThemeChoice,
    /// Overrides the `theme` preset.
    #[serde(default)]
    pub palette: Option<ThemePalette>,
    #[serde(default)]
    pub fonts: Option<FontPaths>,
    /// Manual layouts by photo ordinal; `null` keeps the solved layout.
    #[serde(default)]
    pub layouts: Vec<Option<NormalizedRect>>,
}

impl PosterDocument {
    pub fn from_json_str(s: &str) -> VitrineResult<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_path(path: &Path) -> VitrineResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read poster document {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> VitrineResult<()> {
        if self.photos.len() > MAX_PHOTOS {
            return Err(VitrineError::validation(format!(
                "at most {MAX_PHOTOS} photos are supported, got {}",
                self.photos.len()
            )));
        }
        if self.layouts.len() > self.photos.len() {
            return Err(VitrineError::validation(format!(
                "{} layouts given for {} photos",
                self.layouts.len(),
                self.photos.len()
            )));
        }
        for (i, layout) in self.layouts.iter().enumerate() {
            let Some(r) = layout else { continue };
            let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
            if !finite || r.width <= 0.0 || r.height <= 0.0 || !r.is_within_bounds() {
                return Err(VitrineError::validation(format!(
                    "layout {i} must have positive size and lie inside the photo region"
                )));
            }
        }
        Ok(())
    }

    pub fn palette(&self) -> ThemePalette {
        self.palette.unwrap_or_else(|| self.theme.palette())
    }

    /// Read every photo, resolving relative paths against `base`.
    pub fn photo_sources(&self, base: &Path) -> VitrineResult<Vec<PhotoSource>> {
        self.photos
            .iter()
            .map(|p| PhotoSource::from_path(&resolve(base, p)))
            .collect()
    }

    /// Read the configured font files, if any.
    pub fn font_sources(&self, base: &Path) -> VitrineResult<Option<FontSources>> {
        let Some(fonts) = &self.fonts else {
            return Ok(None);
        };
        let read = |p: &PathBuf| -> VitrineResult<Arc<Vec<u8>>> {
            let path = resolve(base, p);
            let bytes =
                std::fs::read(&path).with_context(|| format!("read font {}", path.display()))?;
            Ok(Arc::new(bytes))
        };
        Ok(Some(FontSources {
            regular: read(&fonts.regular)?,
            bold: fonts.bold.as_ref().map(read).transpose()?,
            italic: fonts.italic.as_ref().map(read).transpose()?,
        }))
    }
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poster/document.rs"]
mod tests;
