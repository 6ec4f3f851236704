use super::*;

fn r(v: f64) -> f64 {
    round_to_decimals(v, LAYOUT_DECIMALS)
}

#[test]
fn snaps_to_container_edges() {
    assert_eq!(snap_axis(0.015, 0.3, [], 0.02), 0.0);
    assert_eq!(snap_axis(0.69, 0.3, [], 0.02), 0.7);
    assert_eq!(snap_axis(0.4, 0.3, [], 0.02), 0.4);
}

#[test]
fn snaps_to_other_frame_edges_exactly() {
    let other = (0.25, 0.5);
    // Own start onto other start.
    assert_eq!(snap_axis(0.26, 0.2, [other], 0.02), 0.25);
    // Own start onto other end.
    assert_eq!(snap_axis(0.74, 0.1, [other], 0.02), 0.75);
    // Own end onto other start.
    assert_eq!(snap_axis(0.06, 0.2, [other], 0.02), r(0.25 - 0.2));
    // Own end onto other end.
    assert_eq!(snap_axis(0.56, 0.2, [other], 0.02), r(0.75 - 0.2));
}

#[test]
fn nearest_target_wins() {
    // 0.3 and 0.32 are both within reach of 0.315; 0.32 is closer.
    let others = [(0.3, 0.1), (0.32, 0.1)];
    assert_eq!(snap_axis(0.315, 0.05, others, 0.02), 0.32);
}

#[test]
fn snap_and_clamp_keeps_size_and_bounds() {
    let other = NormalizedRect::new(0.5, 0.1, 0.4, 0.4);
    let dragged = NormalizedRect::new(0.51, 0.95, 0.2, 0.2);
    let out = snap_and_clamp(dragged, &[other], 0.02);
    assert_eq!(out.x, 0.5);
    assert_eq!(out.y, 0.8);
    assert_eq!((out.width, out.height), (0.2, 0.2));
    assert!(out.is_within_bounds());
}

#[test]
fn snapped_edges_are_already_at_layout_precision() {
    // 0.1 + 0.2 is not 0.3 in floating point.
    let other = (0.1, 0.2);
    let abutting = snap_axis(0.305, 0.2, [other], 0.02);
    assert_eq!(abutting, r(0.1 + 0.2));
    assert_eq!(r(abutting), abutting);

    let before = snap_axis(0.23, 0.17, [(0.1, 0.3)], 0.02);
    assert_eq!(before, r(0.1 + 0.3 - 0.17));
    assert_eq!(r(before), before);
}
