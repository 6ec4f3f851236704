use crate::typography::measure::{FontSpec, FontStyle, FontWeight, TextMeasure};

/// Line height multiplier used by single-line fits.
pub const SINGLE_LINE_HEIGHT: f64 = 1.2;

/// Step between candidate font sizes.
const FONT_SIZE_STEP: f64 = 1.0;

/// Smallest font size a range may be normalized to.
const MIN_FONT_SIZE_FLOOR: f64 = 1.0;

/// Hard constraints for one wrapped text block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitBox {
    /// Widest allowed line in pixels.
    pub max_width: f64,
    /// Tallest allowed block in pixels.
    pub max_height: f64,
    /// Line cap; later text is dropped.
    pub max_lines: usize,
    /// First candidate size.
    pub max_font_size: f64,
    /// Last candidate size and overflow fallback.
    pub min_font_size: f64,
    /// Weight to measure with.
    pub weight: FontWeight,
    /// Slant to measure with.
    pub style: FontStyle,
    /// Line height as a multiple of font size.
    pub line_height_multiplier: f64,
}

/// Chosen size and wrapping for one block.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypographyFit {
    /// Font size in pixels.
    pub font_size: f64,
    /// Distance between consecutive baselines in pixels.
    pub line_height: f64,
    /// Wrapped lines; blank paragraphs appear as empty strings.
    pub lines: Vec<String>,
}

impl TypographyFit {
    /// Height of all lines stacked.
    pub fn block_height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }

    /// Uniformly scale every metric.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            font_size: self.font_size * factor,
            line_height: self.line_height * factor,
            lines: self.lines.clone(),
        }
    }
}

/// Pick the largest font size whose wrapped block fits `fit_box`.
///
/// Falls back to `min_font_size` with its (possibly overflowing) wrap.
#[tracing::instrument(level = "trace", skip(measure, text), fields(chars = text.len()))]
pub fn fit_block(measure: &mut dyn TextMeasure, text: &str, fit_box: &FitBox) -> TypographyFit {
    let (max_size, min_size) = normalized_range(fit_box.max_font_size, fit_box.min_font_size);
    let multiplier = fit_box.line_height_multiplier.max(0.0);

    for size in candidate_sizes(max_size, min_size) {
        let font = FontSpec::new(size, fit_box.weight, fit_box.style);
        let lines = wrap_text(measure, text, fit_box.max_width, fit_box.max_lines, &font);
        let line_height = size * multiplier;
        if lines.len() as f64 * line_height <= fit_box.max_height + 1e-9 {
            return TypographyFit {
                font_size: size,
                line_height,
                lines,
            };
        }
    }

    let font = FontSpec::new(min_size, fit_box.weight, fit_box.style);
    TypographyFit {
        font_size: min_size,
        line_height: min_size * multiplier,
        lines: wrap_text(measure, text, fit_box.max_width, fit_box.max_lines, &font),
    }
}

/// Largest size at which `text` fits on one line of `max_width`.
pub fn fit_single_line(
    measure: &mut dyn TextMeasure,
    text: &str,
    max_width: f64,
    max_font_size: f64,
    min_font_size: f64,
    weight: FontWeight,
    style: FontStyle,
) -> TypographyFit {
    let (max_size, min_size) = normalized_range(max_font_size, min_font_size);
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let size = candidate_sizes(max_size, min_size)
        .find(|&size| measure.measure(&line, &FontSpec::new(size, weight, style)) <= max_width)
        .unwrap_or(min_size);

    TypographyFit {
        font_size: size,
        line_height: size * SINGLE_LINE_HEIGHT,
        lines: vec![line],
    }
}

/// Paragraph-aware greedy word wrap.
///
/// Every `\n` starts a paragraph; an empty paragraph becomes an empty line. A word
/// wider than `max_width` gets a line of its own. Stops after `max_lines` lines.
pub fn wrap_text(
    measure: &mut dyn TextMeasure,
    text: &str,
    max_width: f64,
    max_lines: usize,
    font: &FontSpec,
) -> Vec<String> {
    let mut lines = Vec::new();
    if max_lines == 0 {
        return lines;
    }

    'paragraphs: for paragraph in text.split('\n') {
        let mut words = paragraph.split_whitespace().peekable();
        if words.peek().is_none() {
            lines.push(String::new());
            if lines.len() >= max_lines {
                break;
            }
            continue;
        }

        let mut current = String::new();
        for word in words {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.measure(&candidate, font) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                if lines.len() >= max_lines {
                    break 'paragraphs;
                }
                current.push_str(word);
            }
        }
        lines.push(current);
        if lines.len() >= max_lines {
            break;
        }
    }
    lines
}

fn normalized_range(max: f64, min: f64) -> (f64, f64) {
    let max = max.max(MIN_FONT_SIZE_FLOOR);
    let min = if min.is_nan() {
        max
    } else {
        min.clamp(MIN_FONT_SIZE_FLOOR, max)
    };
    (max, min)
}

fn candidate_sizes(max: f64, min: f64) -> impl Iterator<Item = f64> {
    let steps = ((max - min) / FONT_SIZE_STEP).floor() as usize;
    (0..=steps).map(move |k| max - k as f64 * FONT_SIZE_STEP)
}

#[cfg(test)]
#[path = "../../tests/unit/typography/fit.rs"]
mod tests;
