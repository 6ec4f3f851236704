use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> RasterImage {
    RasterImage {
        width,
        height,
        data: px.repeat((width * height) as usize),
    }
}

#[test]
fn jpeg_export_keeps_dimensions() {
    let img = solid(8, 4, [200, 40, 10, 255]);
    let bytes = encode_jpeg(&img, 92).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 4));
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg
    );
}

#[test]
fn png_export_is_lossless_and_unpremultiplied() {
    let img = solid(2, 2, [64, 32, 0, 128]);
    let out = encode(&img, &ExportSettings::png()).unwrap();
    assert_eq!(out.format, ExportFormat::Png);
    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
    let px = decoded.get_pixel(1, 1).0;
    assert_eq!(px[3], 128);
    assert_eq!(px[0], unpremul_u8(64, 128));
    assert_eq!(px[1], unpremul_u8(32, 128));
}

#[test]
fn mismatched_raster_fails_to_encode() {
    let img = RasterImage {
        width: 4,
        height: 4,
        data: vec![0; 7],
    };
    assert!(matches!(
        encode_png(&img),
        Err(VitrineError::Encode(_))
    ));
}

#[test]
fn quality_override_accepts_only_valid_values() {
    let base = ExportSettings::default();
    assert_eq!(base.jpeg_quality, 92);
    assert_eq!(base.with_quality_override(Some("75")).jpeg_quality, 75);
    assert_eq!(base.with_quality_override(Some(" 100 ")).jpeg_quality, 100);
    assert_eq!(base.with_quality_override(Some("0")).jpeg_quality, 92);
    assert_eq!(base.with_quality_override(Some("high")).jpeg_quality, 92);
    assert_eq!(base.with_quality_override(None).jpeg_quality, 92);
}

#[test]
fn pixel_reads_are_bounds_checked() {
    let img = solid(2, 1, [1, 2, 3, 4]);
    assert_eq!(img.pixel(1, 0), Some([1, 2, 3, 4]));
    assert_eq!(img.pixel(2, 0), None);
}
