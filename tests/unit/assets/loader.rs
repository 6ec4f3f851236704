use std::io::Cursor;

use super::*;

fn png_source(name: &str, width: u32, height: u32) -> PhotoSource {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    PhotoSource::new(name, buf)
}

#[test]
fn current_batch_produces_frames_in_order() {
    let loader = PhotoLoader::new();
    let ticket = loader.begin();
    let frames = loader
        .load_batch(
            ticket,
            vec![png_source("wide.png", 4, 2), png_source("tall.png", 2, 4)],
        )
        .unwrap()
        .unwrap();

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].ordinal, 0);
    assert_eq!(frames[0].aspect_ratio, 2.0);
    assert_eq!(frames[1].ordinal, 1);
    assert_eq!(frames[1].aspect_ratio, 0.5);
    assert_ne!(frames[0].id, frames[1].id);
}

#[test]
fn superseded_batch_is_discarded() {
    let loader = PhotoLoader::new();
    let stale = loader.begin();
    let fresh = loader.clone().begin();

    assert!(!loader.is_current(stale));
    assert!(loader.is_current(fresh));
    assert!(fresh.generation() > stale.generation());

    let out = loader
        .load_batch(stale, vec![png_source("a.png", 2, 2)])
        .unwrap();
    assert!(out.is_none());
}

#[test]
fn one_bad_photo_abandons_the_batch() {
    let loader = PhotoLoader::with_threads(2).unwrap();
    let ticket = loader.begin();
    let err = loader
        .load_batch(
            ticket,
            vec![
                png_source("ok.png", 2, 2),
                PhotoSource::new("broken.jpg", b"garbage".to_vec()),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, VitrineError::LayoutPreparation(_)));
    assert!(err.to_string().contains("broken.jpg"));
}

#[test]
fn oversized_batch_is_rejected() {
    let loader = PhotoLoader::new();
    let ticket = loader.begin();
    let sources = (0..5).map(|i| png_source(&format!("{i}.png"), 1, 1)).collect();
    assert!(matches!(
        loader.load_batch(ticket, sources),
        Err(VitrineError::Validation(_))
    ));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(PhotoLoader::with_threads(0).is_err());
}

#[test]
fn decode_failure_of_a_superseded_batch_is_dropped() {
    let loader = PhotoLoader::new();
    let ticket = loader.begin();
    let sources = vec![
        png_source("ok.png", 2, 2),
        PhotoSource::new("broken.jpg", b"garbage".to_vec()),
    ];
    let decoded = loader.decode_all(&sources);
    assert!(decoded.is_err());

    // A newer batch starts while the old one is still decoding.
    let _newer = loader.clone().begin();
    assert!(loader.publish(ticket, sources, decoded).unwrap().is_none());
}
