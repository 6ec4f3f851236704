use crate::{foundation::core::Rgba8, typography::compose::BlockRole};

/// The seven color tokens a poster is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThemePalette {
    /// Canvas behind everything.
    pub background: Rgba8,
    /// Text panel fill.
    pub card: Rgba8,
    /// Photo region fill behind the frames.
    pub muted: Rgba8,
    /// Title and description text.
    pub foreground: Rgba8,
    /// Location text.
    pub muted_foreground: Rgba8,
    /// Price text.
    pub primary: Rgba8,
    /// Frame borders and the divider.
    pub border: Rgba8,
}

impl ThemePalette {
    /// Warm off-white palette.
    pub const fn light() -> Self {
        Self {
            background: Rgba8::rgb(0xfa, 0xf8, 0xf5),
            card: Rgba8::rgb(0xff, 0xff, 0xff),
            muted: Rgba8::rgb(0xee, 0xeb, 0xe6),
            foreground: Rgba8::rgb(0x1c, 0x1a, 0x17),
            muted_foreground: Rgba8::rgb(0x6b, 0x66, 0x5e),
            primary: Rgba8::rgb(0xb4, 0x53, 0x09),
            border: Rgba8::rgb(0xdd, 0xd8, 0xd0),
        }
    }

    /// Near-black palette with an amber accent.
    pub const fn dark() -> Self {
        Self {
            background: Rgba8::rgb(0x12, 0x11, 0x10),
            card: Rgba8::rgb(0x1d, 0x1b, 0x19),
            muted: Rgba8::rgb(0x2a, 0x27, 0x24),
            foreground: Rgba8::rgb(0xf5, 0xf2, 0xed),
            muted_foreground: Rgba8::rgb(0xa8, 0xa1, 0x97),
            primary: Rgba8::rgb(0xf5, 0x9e, 0x0b),
            border: Rgba8::rgb(0x3a, 0x36, 0x31),
        }
    }

    /// Token used for text of `role`.
    pub fn text_color(&self, role: BlockRole) -> Rgba8 {
        match role {
            BlockRole::Price => self.primary,
            BlockRole::Location => self.muted_foreground,
            BlockRole::Title | BlockRole::Description => self.foreground,
        }
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::light()
    }
}

/// Palette named in a poster document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

impl ThemeChoice {
    /// The seven tokens this choice stands for.
    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Light => ThemePalette::light(),
            Self::Dark => ThemePalette::dark(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poster/theme.rs"]
mod tests;
