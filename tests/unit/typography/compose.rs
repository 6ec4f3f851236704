use super::*;
use crate::typography::measure::FixedAdvance;

fn region() -> Rect {
    Rect::new(100.0, 50.0, 660.0, 890.0)
}

fn listing() -> PosterText {
    PosterText {
        title: "Sunlit loft".to_string(),
        price: "$1,250".to_string(),
        location: "Lisbon, Portugal".to_string(),
        description: "Short note.".to_string(),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_fields_produce_no_blocks() {
    let mut m = FixedAdvance::default();
    let c = compose_typography(
        &mut m,
        &PosterText::default(),
        region(),
        &TypographyLimits::default(),
    );
    assert!(c.price.is_none());
    assert!(c.location.is_none());
    assert!(c.title.is_none());
    assert!(c.divider.is_none());
    assert!(c.description.is_none());
    assert!(c.paragraphs.is_empty());
    assert!(c.text_runs().is_empty());
}

#[test]
fn blocks_stack_in_order_with_fixed_margins() {
    let mut m = FixedAdvance::default();
    let limits = TypographyLimits::default();
    let c = compose_typography(&mut m, &listing(), region(), &limits);

    let price = c.price.as_ref().unwrap();
    let location = c.location.as_ref().unwrap();
    let title = c.title.as_ref().unwrap();
    let divider = c.divider.unwrap();
    let description = c.description.as_ref().unwrap();

    assert_eq!(price.fit.font_size, 48.0);
    assert_eq!(price.align, TextAlign::Right);
    assert!(close(price.frame.x1, 660.0));
    assert!(price.frame.width() <= region().width() * 0.5);

    assert_eq!(location.fit.font_size, 28.0);
    assert_eq!(location.style, FontStyle::Italic);
    assert!(close(location.frame.x0, 100.0));
    assert!(close(location.frame.y0, price.frame.y0));
    assert!(location.frame.x1 + limits.top_line_gap <= price.frame.x0 + 1e-9);

    let top = 50.0 + price.fit.line_height;
    assert!(close(title.frame.y0, top + 0.5 * price.fit.line_height));
    assert_eq!(title.fit.font_size, 56.0);
    assert_eq!(title.fit.lines.len(), 1);

    assert!(close(divider.y0, title.frame.y1 + 24.0));
    assert!(close(divider.height(), 1.0));
    assert!(close(divider.width(), region().width()));
    assert!(close(description.frame.y0, divider.y1 + 28.0));
}

#[test]
fn long_location_is_truncated_with_ellipsis() {
    let mut m = FixedAdvance::default();
    let text = PosterText {
        location: "x".repeat(50),
        ..PosterText::default()
    };
    let c = compose_typography(&mut m, &text, region(), &TypographyLimits::default());
    let line = &c.location.unwrap().fit.lines[0];
    assert_eq!(line.chars().count(), 34);
    assert!(line.ends_with('\u{2026}'));
}

#[test]
fn underfilled_description_is_backfilled_once() {
    let mut m = FixedAdvance::default();
    let c = compose_typography(&mut m, &listing(), region(), &TypographyLimits::default());
    let description = c.description.unwrap();
    // 44px leaves most of the budget empty; the backfill ceiling caps at 64.
    assert_eq!(description.fit.font_size, 64.0);
    assert_eq!(description.fit.lines, vec!["Short note."]);
}

#[test]
fn description_paragraphs_are_capped_and_folded() {
    let mut m = FixedAdvance::default();
    let body = (1..=10)
        .map(|i| format!("p{i}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    let text = PosterText {
        description: body,
        ..PosterText::default()
    };
    let c = compose_typography(&mut m, &text, region(), &TypographyLimits::default());

    assert!(c.divider.is_none());
    let description = c.description.as_ref().unwrap();
    assert!(close(description.frame.y0, 50.0));
    assert_eq!(c.paragraphs.len(), 8);
    assert_eq!(c.paragraphs[7], vec!["p8", "p9", "p10"]);
    assert!(close(c.paragraph_gap, description.fit.line_height * 0.6));

    let runs = c.text_runs();
    assert_eq!(runs.len(), 10);
    assert!(close(
        runs[1].origin.y,
        runs[0].origin.y + description.fit.line_height + c.paragraph_gap
    ));
    // Folded paragraphs run on without a gap.
    assert!(close(
        runs[8].origin.y,
        runs[7].origin.y + description.fit.line_height
    ));
}

#[test]
fn regroup_skips_repeated_blank_lines() {
    let lines: Vec<String> = ["a", "", "", "b", "c", ""]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        regroup_paragraphs(&lines, 8),
        vec![vec!["a".to_string()], vec!["b".to_string(), "c".to_string()]]
    );
    assert_eq!(
        regroup_paragraphs(&lines, 1),
        vec![vec!["a".to_string(), "b".to_string(), "c".to_string()]]
    );
}

#[test]
fn truncation_counts_characters() {
    assert_eq!(truncate_chars("short", 34), "short");
    assert_eq!(truncate_chars("abcdef", 4), "abc\u{2026}");
    assert_eq!(truncate_chars("ab  cdef", 5), "ab\u{2026}");
}

#[test]
fn price_run_is_right_aligned() {
    let mut m = FixedAdvance::default();
    let c = compose_typography(&mut m, &listing(), region(), &TypographyLimits::default());
    let runs = c.text_runs();
    let price = runs.iter().find(|r| r.role == BlockRole::Price).unwrap();
    let width = m.measure(&price.text, &price.font);
    assert!(close(price.origin.x + width, 660.0));
}

#[test]
fn scaling_matches_a_uniform_transform() {
    let mut m = FixedAdvance::default();
    let c = compose_typography(&mut m, &listing(), region(), &TypographyLimits::default());
    let half = c.scaled(0.5);

    assert_eq!(half.region, region().scale_from_origin(0.5));
    assert_eq!(half.divider, c.divider.map(|d| d.scale_from_origin(0.5)));
    assert!(close(half.paragraph_gap, c.paragraph_gap * 0.5));

    let full_runs = c.text_runs();
    let half_runs = half.text_runs();
    assert_eq!(full_runs.len(), half_runs.len());
    for (a, b) in full_runs.iter().zip(&half_runs) {
        assert_eq!(a.text, b.text);
        assert!((a.origin.x * 0.5 - b.origin.x).abs() < 1e-6);
        assert!((a.origin.y * 0.5 - b.origin.y).abs() < 1e-6);
        assert!(close(a.font.size * 0.5, b.font.size));
        assert!(close(a.line_height * 0.5, b.line_height));
    }
}

#[test]
fn price_and_location_share_a_baseline() {
    let mut m = FixedAdvance::default();
    let c = compose_typography(&mut m, &listing(), region(), &TypographyLimits::default());
    let runs = c.text_runs();

    let price = runs.iter().find(|r| r.role == BlockRole::Price).unwrap();
    let location = runs.iter().find(|r| r.role == BlockRole::Location).unwrap();
    assert!(price.font.size > location.font.size);
    assert_eq!(price.baseline, location.baseline);
    assert_eq!(price.line_height, location.line_height);
    assert!(price.baseline > price.origin.y);
    assert!(price.baseline < price.origin.y + price.line_height);

    let title = runs.iter().find(|r| r.role == BlockRole::Title).unwrap();
    assert!(title.baseline > price.origin.y + price.line_height);
}
