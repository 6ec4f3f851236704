use super::*;
use crate::typography::{
    compose::BlockRole,
    measure::FontSpec,
};
use crate::foundation::core::Point;

fn photo(width: u32, height: u32, pixels: &[[u8; 4]]) -> DecodedPhoto {
    DecodedPhoto {
        width,
        height,
        rgba8_premul: Arc::new(pixels.iter().flatten().copied().collect()),
    }
}

#[test]
fn new_rejects_empty_and_oversized_surfaces() {
    assert!(matches!(
        CpuSurface::new(0, 10, None),
        Err(VitrineError::Surface(_))
    ));
    assert!(matches!(
        CpuSurface::new(10, 70_000, None),
        Err(VitrineError::Surface(_))
    ));
    let s = CpuSurface::new(16, 8, None).unwrap();
    assert_eq!(s.size(), Size::new(16.0, 8.0));
}

#[test]
fn fills_cover_whole_pixels() {
    let mut s = CpuSurface::new(8, 8, None).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::rgb(255, 255, 255))
        .unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0), Rgba8::rgb(255, 0, 0))
        .unwrap();
    let img = s.finish().unwrap();

    assert_eq!((img.width, img.height), (8, 8));
    assert_eq!(img.data.len(), 8 * 8 * 4);
    assert_eq!(img.pixel(1, 3), Some([255, 0, 0, 255]));
    assert_eq!(img.pixel(6, 3), Some([255, 255, 255, 255]));
}

#[test]
fn stroke_draws_only_the_border() {
    let mut s = CpuSurface::new(10, 10, None).unwrap();
    s.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, Rgba8::rgb(0, 0, 255))
        .unwrap();
    let img = s.finish().unwrap();
    assert_eq!(img.pixel(0, 5), Some([0, 0, 255, 255]));
    assert_eq!(img.pixel(9, 9), Some([0, 0, 255, 255]));
    assert_eq!(img.pixel(5, 5), Some([0, 0, 0, 0]));
}

#[test]
fn image_cover_shows_the_center_crop() {
    // Three columns into a square: only the middle column is visible.
    let strip = photo(
        3,
        1,
        &[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]],
    );
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    s.draw_image_cover(Rect::new(0.0, 0.0, 4.0, 4.0), FrameId(1), &strip)
        .unwrap();
    let img = s.finish().unwrap();

    for (x, y) in [(1, 1), (2, 2), (1, 3)] {
        let [r, g, b, a] = img.pixel(x, y).unwrap();
        assert_eq!(a, 255);
        assert!(g > r && g > b, "pixel ({x},{y}) = {:?}", [r, g, b, a]);
    }
}

#[test]
fn image_paint_is_cached_per_frame() {
    let solid = photo(2, 2, &[[10, 20, 30, 255]; 4]);
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    s.draw_image_cover(Rect::new(0.0, 0.0, 2.0, 2.0), FrameId(5), &solid)
        .unwrap();
    s.draw_image_cover(Rect::new(2.0, 2.0, 4.0, 4.0), FrameId(5), &solid)
        .unwrap();
    assert_eq!(s.image_cache.len(), 1);
    let img = s.finish().unwrap();
    assert_eq!(img.pixel(3, 3), Some([10, 20, 30, 255]));
    assert_eq!(img.pixel(3, 0), Some([0, 0, 0, 0]));
}

#[test]
fn mismatched_photo_bytes_are_rejected() {
    let broken = DecodedPhoto {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![0; 8]),
    };
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    let err = s
        .draw_image_cover(Rect::new(0.0, 0.0, 4.0, 4.0), FrameId(2), &broken)
        .unwrap_err();
    assert!(matches!(err, VitrineError::Surface(_)));
}

#[test]
fn text_without_fonts_is_an_error() {
    let run = TextRun {
        role: BlockRole::Title,
        text: "Loft".to_string(),
        origin: Point::new(0.0, 0.0),
        font: FontSpec::new(12.0, FontWeight::Bold, FontStyle::Normal),
        line_height: 14.0,
        baseline: 10.6,
    };
    let mut s = CpuSurface::new(32, 16, None).unwrap();
    let err = s.draw_text(&run, Rgba8::rgb(0, 0, 0)).unwrap_err();
    assert!(matches!(err, VitrineError::Surface(_)));
}
