use crate::{
    foundation::core::{Point, Rect},
    typography::{
        fit::{FitBox, TypographyFit, fit_block, fit_single_line},
        measure::{FontSpec, FontStyle, FontWeight, TextMeasure},
    },
};

const ELLIPSIS: char = '\u{2026}';

/// Share of the font size above the baseline when placing a line in its box.
const ASCENT_SHARE: f64 = 0.8;

/// Baseline of a line of `font_size` text centered in a line box.
fn baseline_in(top: f64, line_height: f64, font_size: f64) -> f64 {
    top + (line_height - font_size) / 2.0 + font_size * ASCENT_SHARE
}

/// Text fields shown on the poster.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PosterText {
    /// Headline, wrapped over up to three lines.
    pub title: String,
    /// Right-aligned on the top line.
    pub price: String,
    /// Left of the price, truncated with an ellipsis.
    pub location: String,
    /// Body text; blank lines separate paragraphs.
    pub description: String,
}

/// Size ranges, caps and margins for the text stack, in canonical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TypographyLimits {
    /// Largest price size tried.
    pub price_max_font_size: f64,
    /// Smallest price size, kept even if the line still overflows.
    pub price_min_font_size: f64,
    /// Share of the region width the price may occupy.
    pub price_max_width_share: f64,
    /// Largest location size tried.
    pub location_max_font_size: f64,
    /// Smallest location size.
    pub location_min_font_size: f64,
    /// Longest location kept, ellipsis included.
    pub location_max_chars: usize,
    /// Horizontal gap between location and price.
    pub top_line_gap: f64,
    /// Largest title size tried.
    pub title_max_font_size: f64,
    /// Smallest title size.
    pub title_min_font_size: f64,
    /// Lines the title may wrap onto.
    pub title_max_lines: usize,
    /// Title line height as a multiple of its font size.
    pub title_line_height: f64,
    /// Share of the region height the title may occupy.
    pub title_height_share: f64,
    /// Title top margin as a multiple of the top line height.
    pub title_margin_factor: f64,
    /// Gap between the title and the divider.
    pub divider_margin: f64,
    /// Divider height.
    pub divider_thickness: f64,
    /// Gap between the divider and the description.
    pub description_margin: f64,
    /// Largest description size tried.
    pub description_max_font_size: f64,
    /// Smallest description size.
    pub description_min_font_size: f64,
    /// Line cap for the wrapped description.
    pub description_max_lines: usize,
    /// Description line height as a multiple of its font size.
    pub description_line_height: f64,
    /// Below this share of its budget the description is re-fit once at a larger size.
    pub backfill_threshold: f64,
    /// Ceiling for the backfill re-fit.
    pub backfill_max_font_size: f64,
    /// Paragraphs kept; the rest fold into the last one.
    pub max_paragraphs: usize,
    /// Paragraph gap as a multiple of the description line height.
    pub paragraph_gap_factor: f64,
}

impl Default for TypographyLimits {
    fn default() -> Self {
        Self {
            price_max_font_size: 48.0,
            price_min_font_size: 22.0,
            price_max_width_share: 0.5,
            location_max_font_size: 28.0,
            location_min_font_size: 16.0,
            location_max_chars: 34,
            top_line_gap: 16.0,
            title_max_font_size: 56.0,
            title_min_font_size: 28.0,
            title_max_lines: 3,
            title_line_height: 1.12,
            title_height_share: 0.45,
            title_margin_factor: 0.5,
            divider_margin: 24.0,
            divider_thickness: 1.0,
            description_margin: 28.0,
            description_max_font_size: 44.0,
            description_min_font_size: 16.0,
            description_max_lines: 60,
            description_line_height: 1.3,
            backfill_threshold: 0.65,
            backfill_max_font_size: 64.0,
            max_paragraphs: 8,
            paragraph_gap_factor: 0.6,
        }
    }
}

/// Which field a block renders; also selects its palette color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    Price,
    Location,
    Title,
    Description,
}

/// Horizontal alignment of a block's lines within its frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// One fitted block and where it sits.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBlock {
    pub role: BlockRole,
    pub fit: TypographyFit,
    /// Placement box; its height is the fitted block height.
    pub frame: Rect,
    pub align: TextAlign,
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Measured width of each line in `fit.lines`.
    pub line_widths: Vec<f64>,
}

impl TextBlock {
    #[allow(clippy::too_many_arguments)]
    fn place(
        measure: &mut dyn TextMeasure,
        role: BlockRole,
        fit: TypographyFit,
        origin: Point,
        width: f64,
        align: TextAlign,
        weight: FontWeight,
        style: FontStyle,
    ) -> Self {
        let font = FontSpec::new(fit.font_size, weight, style);
        let line_widths: Vec<f64> = fit
            .lines
            .iter()
            .map(|line| measure.measure(line, &font))
            .collect();
        let frame = Rect::new(
            origin.x,
            origin.y,
            origin.x + width,
            origin.y + fit.block_height(),
        );
        Self {
            role,
            fit,
            frame,
            align,
            weight,
            style,
            line_widths,
        }
    }

    /// Font the block was fitted at.
    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.fit.font_size, self.weight, self.style)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            fit: self.fit.scaled(factor),
            frame: self.frame.scale_from_origin(factor),
            line_widths: self.line_widths.iter().map(|w| w * factor).collect(),
            ..self.clone()
        }
    }

    fn line_x(&self, index: usize) -> f64 {
        match self.align {
            TextAlign::Left => self.frame.x0,
            TextAlign::Right => {
                self.frame.x1 - self.line_widths.get(index).copied().unwrap_or_default()
            }
        }
    }
}

/// A single line ready to paint: `origin` is the top-left of its line box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub role: BlockRole,
    pub text: String,
    pub origin: Point,
    pub font: FontSpec,
    pub line_height: f64,
    /// Absolute y of the baseline glyphs sit on.
    pub baseline: f64,
}

/// The complete text stack of one poster.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComposedTypography {
    pub region: Rect,
    pub price: Option<TextBlock>,
    pub location: Option<TextBlock>,
    pub title: Option<TextBlock>,
    pub divider: Option<Rect>,
    pub description: Option<TextBlock>,
    /// Description lines regrouped by blank-line separators.
    pub paragraphs: Vec<Vec<String>>,
    pub paragraph_gap: f64,
}

impl ComposedTypography {
    /// Uniformly scale every metric, e.g. by `preview_height / canonical_height`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            region: self.region.scale_from_origin(factor),
            price: self.price.as_ref().map(|b| b.scaled(factor)),
            location: self.location.as_ref().map(|b| b.scaled(factor)),
            title: self.title.as_ref().map(|b| b.scaled(factor)),
            divider: self.divider.map(|d| d.scale_from_origin(factor)),
            description: self.description.as_ref().map(|b| b.scaled(factor)),
            paragraphs: self.paragraphs.clone(),
            paragraph_gap: self.paragraph_gap * factor,
        }
    }

    /// Every non-empty line in paint order.
    pub fn text_runs(&self) -> Vec<TextRun> {
        let mut runs = Vec::new();

        // Price and location share one line box, so they share its baseline.
        let top_line: Vec<&TextBlock> = [&self.price, &self.location]
            .into_iter()
            .flatten()
            .collect();
        let top_height = top_line
            .iter()
            .map(|b| b.fit.line_height)
            .fold(0.0, f64::max);
        let top_size = top_line
            .iter()
            .map(|b| b.fit.font_size)
            .fold(0.0, f64::max);
        for block in top_line {
            let Some(line) = block.fit.lines.first().filter(|l| !l.is_empty()) else {
                continue;
            };
            runs.push(TextRun {
                role: block.role,
                text: line.clone(),
                origin: Point::new(block.line_x(0), block.frame.y0),
                font: block.font(),
                line_height: top_height,
                baseline: baseline_in(block.frame.y0, top_height, top_size),
            });
        }

        if let Some(block) = &self.title {
            let font = block.font();
            for (i, line) in block.fit.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let top = block.frame.y0 + i as f64 * block.fit.line_height;
                runs.push(TextRun {
                    role: block.role,
                    text: line.clone(),
                    origin: Point::new(block.line_x(i), top),
                    font,
                    line_height: block.fit.line_height,
                    baseline: baseline_in(top, block.fit.line_height, font.size),
                });
            }
        }

        if let Some(block) = &self.description {
            let font = block.font();
            let mut y = block.frame.y0;
            for (p, paragraph) in self.paragraphs.iter().enumerate() {
                if p > 0 {
                    y += self.paragraph_gap;
                }
                for line in paragraph {
                    runs.push(TextRun {
                        role: BlockRole::Description,
                        text: line.clone(),
                        origin: Point::new(block.frame.x0, y),
                        font,
                        line_height: block.fit.line_height,
                        baseline: baseline_in(y, block.fit.line_height, font.size),
                    });
                    y += block.fit.line_height;
                }
            }
        }
        runs
    }
}

/// Stack price/location, title, divider and description inside `region`.
#[tracing::instrument(level = "debug", skip(measure, text, limits))]
pub fn compose_typography(
    measure: &mut dyn TextMeasure,
    text: &PosterText,
    region: Rect,
    limits: &TypographyLimits,
) -> ComposedTypography {
    let width = region.width().max(0.0);
    let available = region.height().max(0.0);
    let mut y = region.y0;

    let price = non_empty(&text.price).map(|price| {
        let fit = fit_single_line(
            measure,
            price,
            width * limits.price_max_width_share,
            limits.price_max_font_size,
            limits.price_min_font_size,
            FontWeight::Bold,
            FontStyle::Normal,
        );
        let font = FontSpec::new(fit.font_size, FontWeight::Bold, FontStyle::Normal);
        let price_width = fit
            .lines
            .first()
            .map(|line| measure.measure(line, &font))
            .unwrap_or_default()
            .min(width);
        TextBlock::place(
            measure,
            BlockRole::Price,
            fit,
            Point::new(region.x1 - price_width, y),
            price_width,
            TextAlign::Right,
            FontWeight::Bold,
            FontStyle::Normal,
        )
    });

    let location = non_empty(&text.location).map(|location| {
        let reserved = price
            .as_ref()
            .map(|p| p.frame.width() + limits.top_line_gap)
            .unwrap_or_default();
        let max_width = (width - reserved).max(0.0);
        let truncated = truncate_chars(location, limits.location_max_chars);
        let fit = fit_single_line(
            measure,
            &truncated,
            max_width,
            limits.location_max_font_size,
            limits.location_min_font_size,
            FontWeight::Regular,
            FontStyle::Italic,
        );
        TextBlock::place(
            measure,
            BlockRole::Location,
            fit,
            Point::new(region.x0, y),
            max_width,
            TextAlign::Left,
            FontWeight::Regular,
            FontStyle::Italic,
        )
    });

    let top_line_height = [&price, &location]
        .into_iter()
        .flatten()
        .map(|b| b.fit.line_height)
        .fold(0.0, f64::max);
    y += top_line_height;

    let title = non_empty(&text.title).map(|title| {
        if top_line_height > 0.0 {
            let reference = price
                .as_ref()
                .map(|p| p.fit.line_height)
                .unwrap_or(top_line_height);
            y += reference * limits.title_margin_factor;
        }
        let fit = fit_block(
            measure,
            title,
            &FitBox {
                max_width: width,
                max_height: available * limits.title_height_share,
                max_lines: limits.title_max_lines,
                max_font_size: limits.title_max_font_size,
                min_font_size: limits.title_min_font_size,
                weight: FontWeight::Bold,
                style: FontStyle::Normal,
                line_height_multiplier: limits.title_line_height,
            },
        );
        let block = TextBlock::place(
            measure,
            BlockRole::Title,
            fit,
            Point::new(region.x0, y),
            width,
            TextAlign::Left,
            FontWeight::Bold,
            FontStyle::Normal,
        );
        y = block.frame.y1;
        block
    });

    let divider = (y > region.y0).then(|| {
        y += limits.divider_margin;
        let rect = Rect::new(region.x0, y, region.x1, y + limits.divider_thickness);
        y = rect.y1 + limits.description_margin;
        rect
    });

    let mut paragraphs = Vec::new();
    let mut paragraph_gap = 0.0;
    let description = non_empty(&text.description).map(|description| {
        let budget = (region.y1 - y).max(0.0);
        let mut fit_box = FitBox {
            max_width: width,
            max_height: budget,
            max_lines: limits.description_max_lines,
            max_font_size: limits.description_max_font_size,
            min_font_size: limits.description_min_font_size,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            line_height_multiplier: limits.description_line_height,
        };
        let mut fit = fit_block(measure, description, &fit_box);

        let line_count = fit.lines.len();
        if line_count > 0 && fit.block_height() < budget * limits.backfill_threshold {
            let ceiling = (budget / line_count as f64 / limits.description_line_height)
                .floor()
                .min(limits.backfill_max_font_size);
            if ceiling > fit.font_size {
                tracing::trace!(from = fit.font_size, ceiling, "description backfill");
                fit_box.max_font_size = ceiling;
                fit_box.min_font_size = fit.font_size;
                fit = fit_block(measure, description, &fit_box);
            }
        }

        paragraphs = regroup_paragraphs(&fit.lines, limits.max_paragraphs);
        paragraph_gap = fit.line_height * limits.paragraph_gap_factor;
        TextBlock::place(
            measure,
            BlockRole::Description,
            fit,
            Point::new(region.x0, y),
            width,
            TextAlign::Left,
            FontWeight::Regular,
            FontStyle::Normal,
        )
    });

    ComposedTypography {
        region,
        price,
        location,
        title,
        divider,
        description,
        paragraphs,
        paragraph_gap,
    }
}

/// Split fitted lines on blank lines; paragraphs past `max_paragraphs` join the last one.
pub(crate) fn regroup_paragraphs(lines: &[String], max_paragraphs: usize) -> Vec<Vec<String>> {
    let mut paragraphs: Vec<Vec<String>> = Vec::new();
    let mut current = Vec::new();
    for line in lines {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.clone());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let cap = max_paragraphs.max(1);
    if paragraphs.len() > cap {
        let overflow: Vec<String> = paragraphs.drain(cap..).flatten().collect();
        if let Some(last) = paragraphs.last_mut() {
            last.extend(overflow);
        }
    }
    paragraphs
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push(ELLIPSIS);
    out
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
#[path = "../../tests/unit/typography/compose.rs"]
mod tests;
