use super::*;

#[test]
fn tree_counts_follow_catalan_times_orientations() {
    assert!(enumerate_trees(&[]).is_empty());
    assert_eq!(enumerate_trees(&[0]).len(), 1);
    assert_eq!(enumerate_trees(&[0, 1]).len(), 2);
    // Catalan(2) = 2 shapes, 2^2 orientations.
    assert_eq!(enumerate_trees(&[0, 1, 2]).len(), 8);
    // Catalan(3) = 5 shapes, 2^3 orientations.
    assert_eq!(enumerate_trees(&[0, 1, 2, 3]).len(), 40);
    assert!(
        enumerate_trees(&[2, 0, 1])
            .iter()
            .all(|t| t.leaf_count() == 3)
    );
}

#[test]
fn permutations_are_lexicographic_and_complete() {
    let p = permutations(3);
    assert_eq!(p.len(), 6);
    assert_eq!(p[0], vec![0, 1, 2]);
    assert_eq!(p[5], vec![2, 1, 0]);
    assert_eq!(permutations(4).len(), 24);
}

#[test]
fn ratios_combine_side_by_side_and_stacked() {
    let ratios = [1.0, 1.0];
    let side = SplitTree::Split {
        axis: SplitAxis::Vertical,
        first: Box::new(SplitTree::Leaf(0)),
        second: Box::new(SplitTree::Leaf(1)),
    };
    let stacked = SplitTree::Split {
        axis: SplitAxis::Horizontal,
        first: Box::new(SplitTree::Leaf(0)),
        second: Box::new(SplitTree::Leaf(1)),
    };
    assert_eq!(side.ratio(&ratios), 2.0);
    assert_eq!(stacked.ratio(&ratios), 0.5);
}

#[test]
fn degenerate_ratios_are_floored() {
    assert_eq!(leaf_ratio(0.0), MIN_LEAF_RATIO);
    assert_eq!(leaf_ratio(-3.0), MIN_LEAF_RATIO);
    assert_eq!(leaf_ratio(f64::NAN), MIN_LEAF_RATIO);
    assert_eq!(leaf_ratio(1.5), 1.5);
}

#[test]
fn place_tiles_bounds_without_gaps() {
    let ratios = [2.0, 1.0, 1.0];
    let tree = SplitTree::Split {
        axis: SplitAxis::Horizontal,
        first: Box::new(SplitTree::Leaf(0)),
        second: Box::new(SplitTree::Split {
            axis: SplitAxis::Vertical,
            first: Box::new(SplitTree::Leaf(1)),
            second: Box::new(SplitTree::Leaf(2)),
        }),
    };
    // 2 stacked over (1|1 = 2) gives ratio 1.
    assert_eq!(tree.ratio(&ratios), 1.0);
    let mut out = Vec::new();
    tree.place(&ratios, Rect::new(0.0, 0.0, 100.0, 100.0), &mut out);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], (0, Rect::new(0.0, 0.0, 100.0, 50.0)));
    assert_eq!(out[1], (1, Rect::new(0.0, 50.0, 50.0, 100.0)));
    assert_eq!(out[2], (2, Rect::new(50.0, 50.0, 100.0, 100.0)));
    let area: f64 = out.iter().map(|(_, r)| r.area()).sum();
    assert!((area - 10_000.0).abs() < 1e-9);
}
