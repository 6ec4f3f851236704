//! Guillotine split trees over an ordered sequence of photo indices.

use kurbo::Rect;

/// Smallest intrinsic ratio a leaf may contribute.
pub const MIN_LEAF_RATIO: f64 = 0.1;

/// Orientation of one guillotine cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SplitAxis {
    /// Children sit side by side and share the full height.
    Vertical,
    /// Children are stacked and share the full width.
    Horizontal,
}

/// Binary guillotine partition; leaves hold original photo indices.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitTree {
    /// One photo.
    Leaf(usize),
    /// One cut with two sub-partitions.
    Split {
        /// Cut orientation.
        axis: SplitAxis,
        /// Left (or top) part.
        first: Box<SplitTree>,
        /// Right (or bottom) part.
        second: Box<SplitTree>,
    },
}

impl SplitTree {
    /// Intrinsic width/height ratio of the partition.
    pub fn ratio(&self, aspect_ratios: &[f64]) -> f64 {
        match self {
            Self::Leaf(idx) => leaf_ratio(aspect_ratios.get(*idx).copied().unwrap_or(1.0)),
            Self::Split {
                axis,
                first,
                second,
            } => {
                let a = first.ratio(aspect_ratios);
                let b = second.ratio(aspect_ratios);
                match axis {
                    SplitAxis::Vertical => a + b,
                    SplitAxis::Horizontal => 1.0 / (1.0 / a + 1.0 / b),
                }
            }
        }
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Split { first, second, .. } => first.leaf_count() + second.leaf_count(),
        }
    }

    /// Lay the tree out inside `bounds`, pushing one `(index, rect)` per leaf.
    ///
    /// `bounds` is expected to already have the tree's own ratio.
    pub fn place(&self, aspect_ratios: &[f64], bounds: Rect, out: &mut Vec<(usize, Rect)>) {
        match self {
            Self::Leaf(idx) => out.push((*idx, bounds)),
            Self::Split {
                axis,
                first,
                second,
            } => {
                let a = first.ratio(aspect_ratios);
                let b = second.ratio(aspect_ratios);
                match axis {
                    SplitAxis::Vertical => {
                        let split_x = bounds.x0 + bounds.width() * (a / (a + b));
                        first.place(
                            aspect_ratios,
                            Rect::new(bounds.x0, bounds.y0, split_x, bounds.y1),
                            out,
                        );
                        second.place(
                            aspect_ratios,
                            Rect::new(split_x, bounds.y0, bounds.x1, bounds.y1),
                            out,
                        );
                    }
                    SplitAxis::Horizontal => {
                        let inv_a = 1.0 / a;
                        let inv_b = 1.0 / b;
                        let split_y = bounds.y0 + bounds.height() * (inv_a / (inv_a + inv_b));
                        first.place(
                            aspect_ratios,
                            Rect::new(bounds.x0, bounds.y0, bounds.x1, split_y),
                            out,
                        );
                        second.place(
                            aspect_ratios,
                            Rect::new(bounds.x0, split_y, bounds.x1, bounds.y1),
                            out,
                        );
                    }
                }
            }
        }
    }
}

/// Floor a raw aspect ratio so degenerate photos never collapse into slivers.
pub fn leaf_ratio(aspect_ratio: f64) -> f64 {
    if aspect_ratio.is_finite() && aspect_ratio > MIN_LEAF_RATIO {
        aspect_ratio
    } else {
        MIN_LEAF_RATIO
    }
}

/// Every guillotine tree over `order`, keeping the sequence order of leaves.
///
/// Split points are chosen independently at every level and each cut is emitted in
/// both orientations, vertical first.
pub fn enumerate_trees(order: &[usize]) -> Vec<SplitTree> {
    match order {
        [] => Vec::new(),
        [only] => vec![SplitTree::Leaf(*only)],
        _ => {
            let mut out = Vec::new();
            for k in 1..order.len() {
                let lefts = enumerate_trees(&order[..k]);
                let rights = enumerate_trees(&order[k..]);
                for left in &lefts {
                    for right in &rights {
                        for axis in [SplitAxis::Vertical, SplitAxis::Horizontal] {
                            out.push(SplitTree::Split {
                                axis,
                                first: Box::new(left.clone()),
                                second: Box::new(right.clone()),
                            });
                        }
                    }
                }
            }
            out
        }
    }
}

/// All orderings of `0..n` in lexicographic order.
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(n);
    let mut used = vec![false; n];
    permute_into(n, &mut current, &mut used, &mut out);
    out
}

fn permute_into(n: usize, current: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Vec<usize>>) {
    if current.len() == n {
        out.push(current.clone());
        return;
    }
    for i in 0..n {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(i);
        permute_into(n, current, used, out);
        current.pop();
        used[i] = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;
