use super::*;
use crate::layout::solver::solve;

fn decoded(width: u32, height: u32) -> DecodedPhoto {
    DecodedPhoto {
        width,
        height,
        rgba8_premul: Arc::new(vec![0; (width * height * 4) as usize]),
    }
}

fn frame(name: &str, ordinal: usize, width: u32, height: u32) -> PhotoFrame {
    PhotoFrame::new(
        PhotoSource::new(name, vec![ordinal as u8; 16]),
        ordinal,
        decoded(width, height),
    )
}

#[test]
fn frame_id_is_stable_and_position_sensitive() {
    let source = PhotoSource::new("a.jpg", vec![1u8; 10]);
    assert_eq!(FrameId::derive(&source, 0), FrameId::derive(&source, 0));
    assert_ne!(FrameId::derive(&source, 0), FrameId::derive(&source, 1));

    let stamped = source.clone().with_modified(1_700_000_000);
    assert_ne!(FrameId::derive(&source, 0), FrameId::derive(&stamped, 0));

    let renamed = PhotoSource::new("b.jpg", vec![1u8; 10]);
    assert_ne!(FrameId::derive(&source, 0), FrameId::derive(&renamed, 0));
    assert_eq!(FrameId(0xab).to_string(), "00000000000000ab");
}

#[test]
fn frame_reads_natural_size() {
    let f = frame("p.png", 0, 300, 200);
    assert_eq!((f.natural_width, f.natural_height), (300, 200));
    assert_eq!(f.aspect_ratio, 1.5);
    assert_eq!(f.layout, NormalizedRect::full());
}

#[test]
fn frame_set_rejects_too_many_photos() {
    let frames = (0..5).map(|i| frame("x", i, 10, 10)).collect();
    assert!(FrameSet::new(frames).is_err());
}

#[test]
fn focus_reorders_without_moving_geometry() {
    let mut set = FrameSet::new(vec![frame("a", 0, 10, 10), frame("b", 1, 20, 10)]).unwrap();
    let first = set.iter().next().unwrap().id;
    let before = set.get(first).unwrap().layout;

    assert!(set.focus(first));
    assert_eq!(set.iter().last().unwrap().id, first);
    assert_eq!(set.get(first).unwrap().layout, before);
    assert!(!set.focus(FrameId(42)));

    // Solver order follows ordinals, not render order.
    assert_eq!(set.aspect_ratios(), vec![1.0, 2.0]);
}

#[test]
fn apply_solution_normalizes_against_used_width() {
    let mut set = FrameSet::new(vec![frame("a", 0, 10, 10), frame("b", 1, 10, 10)]).unwrap();
    let a = set.by_ordinal()[0].id;
    let b = set.by_ordinal()[1].id;
    set.focus(a);

    let solution = solve(&set.aspect_ratios(), 1000.0, 600.0);
    set.apply_solution(&solution, 600.0);

    assert_eq!(
        set.get(a).unwrap().layout,
        NormalizedRect::new(0.0, 0.0833, 0.5, 0.8333)
    );
    assert_eq!(
        set.get(b).unwrap().layout,
        NormalizedRect::new(0.5, 0.0833, 0.5, 0.8333)
    );
}

#[test]
fn removing_a_frame_releases_its_source() {
    let bytes: Arc<[u8]> = vec![7u8; 32].into();
    let source = PhotoSource {
        name: "shared.jpg".into(),
        bytes: Arc::clone(&bytes),
        modified: None,
    };
    let f = PhotoFrame::new(source, 0, decoded(2, 2));
    let id = f.id;
    let mut set = FrameSet::new(vec![f]).unwrap();
    assert_eq!(Arc::strong_count(&bytes), 2);

    drop(set.remove(id));
    assert_eq!(Arc::strong_count(&bytes), 1);
    assert!(set.is_empty());
    assert!(set.remove(id).is_none());
}

#[test]
fn from_path_reads_file_identity() {
    let dir = std::env::temp_dir().join(format!("vitrine-photo-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sample.bin");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();

    let source = PhotoSource::from_path(&path).unwrap();
    assert_eq!(source.name, "sample.bin");
    assert_eq!(&*source.bytes, &[1u8, 2, 3]);
    assert!(source.modified.is_some());

    std::fs::remove_dir_all(&dir).unwrap();
    assert!(PhotoSource::from_path(&path).is_err());
}
