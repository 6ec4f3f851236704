use super::*;

#[test]
fn cover_crop_trims_the_overflowing_axis() {
    // Wide image into a square: crop left and right equally.
    assert_eq!(
        cover_crop(Size::new(200.0, 100.0), Size::new(50.0, 50.0)),
        Rect::new(50.0, 0.0, 150.0, 100.0)
    );
    // Tall image into a wide box: crop top and bottom.
    assert_eq!(
        cover_crop(Size::new(100.0, 400.0), Size::new(200.0, 100.0)),
        Rect::new(0.0, 175.0, 100.0, 225.0)
    );
    // Matching aspect keeps everything.
    assert_eq!(
        cover_crop(Size::new(300.0, 200.0), Size::new(30.0, 20.0)),
        Rect::new(0.0, 0.0, 300.0, 200.0)
    );
    // Degenerate target keeps everything.
    assert_eq!(
        cover_crop(Size::new(300.0, 200.0), Size::ZERO),
        Rect::new(0.0, 0.0, 300.0, 200.0)
    );
}

#[test]
fn border_edges_stay_inside_and_do_not_overlap() {
    let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
    let edges = border_edges(rect, 2.0);
    assert_eq!(edges.len(), 4);
    let area: f64 = edges.iter().map(|e| e.area()).sum();
    let inner = rect.inset(-2.0);
    assert!((area - (rect.area() - inner.area())).abs() < 1e-9);
    for e in &edges {
        assert_eq!(e.intersect(rect), *e);
    }
    assert!(border_edges(rect, 0.0).is_empty());
}

#[test]
fn default_stroke_records_four_fills() {
    let mut list = DisplayList::new(Size::new(100.0, 100.0));
    list.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0, Rgba8::rgb(1, 2, 3))
        .unwrap();
    let ops = list.finish().unwrap();
    assert_eq!(ops.len(), 4);
    assert!(ops.iter().all(|op| matches!(
        op,
        SurfaceOp::Fill { color, .. } if *color == Rgba8::rgb(1, 2, 3)
    )));
}
