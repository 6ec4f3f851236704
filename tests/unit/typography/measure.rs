use super::*;

#[test]
fn fixed_advance_scales_with_size_and_weight() {
    let mut m = FixedAdvance::default();
    let regular = FontSpec::new(20.0, FontWeight::Regular, FontStyle::Normal);
    let bold = FontSpec::new(20.0, FontWeight::Bold, FontStyle::Normal);
    assert_eq!(m.measure("abcd", &regular), 40.0);
    assert!(m.measure("abcd", &bold) > 40.0);
    assert_eq!(m.measure("", &regular), 0.0);
    // Counts characters, not bytes.
    assert_eq!(m.measure("éé", &regular), 20.0);
}

#[test]
fn font_book_rejects_non_font_bytes() {
    let err = FontBook::new(FontSources {
        regular: Arc::new(b"definitely not a font".to_vec()),
        bold: None,
        italic: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("validation error"));
}

#[test]
fn brush_converts_from_palette_color() {
    let b: TextBrush = Rgba8::rgb(1, 2, 3).into();
    assert_eq!(
        b,
        TextBrush {
            r: 1,
            g: 2,
            b: 3,
            a: 255
        }
    );
}
