use crate::foundation::error::{VitrineError, VitrineResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Tolerance for float drift when checking normalized bounds.
pub const RECT_EPSILON: f64 = 1e-6;

/// Decimal places kept by [`NormalizedRect::normalized`].
pub const LAYOUT_DECIMALS: i32 = 4;

/// Position and size as fractions of a reference container.
///
/// After [`NormalizedRect::clamped`] the rect satisfies `0 <= x`, `0 <= y`,
/// `x + width <= 1 + ε` and `y + height <= 1 + ε`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl NormalizedRect {
    /// Construct from raw fractions.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole container.
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Right edge (`x + width`).
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Round every component to [`LAYOUT_DECIMALS`] places.
    pub fn normalized(self) -> Self {
        Self {
            x: round_to_decimals(self.x, LAYOUT_DECIMALS),
            y: round_to_decimals(self.y, LAYOUT_DECIMALS),
            width: round_to_decimals(self.width, LAYOUT_DECIMALS),
            height: round_to_decimals(self.height, LAYOUT_DECIMALS),
        }
    }

    /// Clamp size into `[0, 1]` and position into `[0, 1 - size]`.
    pub fn clamped(self) -> Self {
        let width = finite_or(self.width, 0.0).clamp(0.0, 1.0);
        let height = finite_or(self.height, 0.0).clamp(0.0, 1.0);
        Self {
            x: finite_or(self.x, 0.0).clamp(0.0, 1.0 - width),
            y: finite_or(self.y, 0.0).clamp(0.0, 1.0 - height),
            width,
            height,
        }
    }

    /// Whether the rect satisfies the container bounds within [`RECT_EPSILON`].
    pub fn is_within_bounds(self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= 1.0 + RECT_EPSILON
            && self.bottom() <= 1.0 + RECT_EPSILON
    }

    /// Map into pixel space of `region`.
    pub fn to_pixels(self, region: Rect) -> Rect {
        let w = region.width();
        let h = region.height();
        let x0 = region.x0 + self.x * w;
        let y0 = region.y0 + self.y * h;
        Rect::new(x0, y0, x0 + self.width * w, y0 + self.height * h)
    }

    /// Express a pixel rect as fractions of `region`. A degenerate region maps to zero.
    pub fn from_pixels(rect: Rect, region: Rect) -> Self {
        let w = region.width();
        let h = region.height();
        if w <= 0.0 || h <= 0.0 {
            return Self::default();
        }
        Self {
            x: (rect.x0 - region.x0) / w,
            y: (rect.y0 - region.y0) / h,
            width: rect.width() / w,
            height: rect.height() / h,
        }
    }
}

/// Round `value` to `decimals` places.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serializes as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> VitrineResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || VitrineError::validation(format!("invalid hex color '{s}'"));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(bad()),
        }
    }

    /// Format as lowercase hex; alpha is omitted when opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = VitrineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
