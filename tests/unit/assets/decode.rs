use std::io::Cursor;

use super::*;

fn png(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_reports_size_and_premultiplies() {
    let photo = decode_photo(&png(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!((photo.width, photo.height), (1, 1));
    assert_eq!(
        photo.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn transparent_pixels_clear_color() {
    let photo = decode_photo(&png(2, 1, [10, 20, 30, 0])).unwrap();
    assert!(photo.rgba8_premul.iter().all(|&b| b == 0));
}

#[test]
fn aspect_ratio_is_width_over_height() {
    let photo = decode_photo(&png(4, 2, [0, 0, 0, 255])).unwrap();
    assert_eq!(photo.aspect_ratio(), 2.0);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_photo(b"not an image").is_err());
}
