use std::{borrow::Cow, sync::Arc};

use crate::foundation::{
    core::Rgba8,
    error::{VitrineError, VitrineResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Font weight used by a text block.
pub enum FontWeight {
    /// Body weight.
    #[default]
    Regular,
    /// Heading weight.
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Font slant used by a text block.
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Full font description handed to a [`TextMeasure`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size: f64,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub style: FontStyle,
}

impl FontSpec {
    /// Build a spec.
    pub fn new(size: f64, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            size,
            weight,
            style,
        }
    }
}

/// Text measurement capability: rendered width of a single unwrapped line.
pub trait TextMeasure {
    /// Width in pixels of `text` set in `font`.
    fn measure(&mut self, text: &str, font: &FontSpec) -> f64;
}

/// Deterministic measure: every character advances `advance_em × size`.
///
/// Bold text is slightly wider. Useful for headless sizing and tests where no font
/// files are available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance per character in ems.
    pub advance_em: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f64 {
        let weight = match font.weight {
            FontWeight::Regular => 1.0,
            FontWeight::Bold => 1.08,
        };
        text.chars().count() as f64 * self.advance_em * font.size * weight
    }
}

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font files backing a [`FontBook`]; bold and italic fall back to regular.
#[derive(Clone, Debug)]
pub struct FontSources {
    /// Regular face bytes (required).
    pub regular: Arc<Vec<u8>>,
    /// Bold face bytes.
    pub bold: Option<Arc<Vec<u8>>>,
    /// Italic face bytes.
    pub italic: Option<Arc<Vec<u8>>>,
}

struct Face {
    bytes: Arc<Vec<u8>>,
    family: String,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Face {
    fn load(bytes: Arc<Vec<u8>>) -> VitrineResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            VitrineError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| VitrineError::validation("registered font family has no name"))?
            .to_string();
        Ok(Self {
            bytes,
            family,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    fn layout_line(&mut self, text: &str, size: f32, brush: TextBrush) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Parley-backed text shaping over caller-supplied font files.
///
/// Each face gets its own font context holding exactly one family, so family lookup
/// never depends on system fonts.
pub struct FontBook {
    regular: Face,
    bold: Option<Face>,
    italic: Option<Face>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("regular", &self.regular.family)
            .field("bold", &self.bold.as_ref().map(|f| &f.family))
            .field("italic", &self.italic.as_ref().map(|f| &f.family))
            .finish()
    }
}

impl FontBook {
    /// Register every provided face.
    pub fn new(sources: FontSources) -> VitrineResult<Self> {
        let regular = Face::load(sources.regular)?;
        let bold = sources.bold.map(Face::load).transpose()?;
        let italic = sources.italic.map(Face::load).transpose()?;
        tracing::debug!(
            regular = %regular.family,
            bold = bold.is_some(),
            italic = italic.is_some(),
            "font book ready"
        );
        Ok(Self {
            regular,
            bold,
            italic,
        })
    }

    fn face_mut(&mut self, font: &FontSpec) -> &mut Face {
        let wanted = match (font.weight, font.style) {
            (FontWeight::Bold, _) => self.bold.as_mut(),
            (_, FontStyle::Italic) => self.italic.as_mut(),
            _ => None,
        };
        match wanted {
            Some(face) => face,
            None => &mut self.regular,
        }
    }

    /// Shape one unwrapped line.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Rgba8,
    ) -> parley::Layout<TextBrush> {
        self.face_mut(font)
            .layout_line(text, font.size as f32, color.into())
    }

    /// Raw bytes of the face used for `font`, for glyph rasterization.
    pub fn face_bytes(&mut self, font: &FontSpec) -> Arc<Vec<u8>> {
        self.face_mut(font).bytes.clone()
    }
}

impl TextMeasure for FontBook {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f64 {
        if text.is_empty() || font.size <= 0.0 {
            return 0.0;
        }
        let layout = self.layout_line(text, font, Rgba8::rgb(0, 0, 0));
        f64::from(layout.width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typography/measure.rs"]
mod tests;
