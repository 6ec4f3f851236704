use kurbo::Rect;

use crate::layout::tree::{SplitAxis, SplitTree, enumerate_trees, leaf_ratio, permutations};

/// Largest photo count searched exhaustively (factorial in the count).
pub const MAX_EXHAUSTIVE_PHOTOS: usize = 4;

/// Narrowest single-photo width as a share of the container.
pub const SINGLE_MIN_WIDTH_SHARE: f64 = 0.25;

/// One placed photo in solver pixel units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutRect {
    /// Index into the aspect-ratio input.
    pub index: usize,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl LayoutRect {
    fn from_rect(index: usize, r: Rect) -> Self {
        Self {
            index,
            x: r.x0,
            y: r.y0,
            width: r.width(),
            height: r.height(),
        }
    }

    /// As a `kurbo` rect.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Covered area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Best partition found plus the horizontal extent it occupies.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutSolution {
    /// Rects sorted by original index, left edge of the bounding box at 0.
    pub rects: Vec<LayoutRect>,
    /// Width actually used, never more than the offered container width.
    pub used_width: f64,
}

impl LayoutSolution {
    /// Sum of rect areas.
    pub fn total_area(&self) -> f64 {
        self.rects.iter().map(LayoutRect::area).sum()
    }
}

/// Partition a `container_width x container_height` area among photos of the given
/// aspect ratios so the covered area is maximal.
///
/// Never fails: zero, negative or NaN ratios are floored.
#[tracing::instrument(level = "debug", skip(aspect_ratios), fields(n = aspect_ratios.len()))]
pub fn solve(aspect_ratios: &[f64], container_width: f64, container_height: f64) -> LayoutSolution {
    let w = container_width.max(0.0);
    let h = container_height.max(0.0);

    match aspect_ratios.len() {
        0 => LayoutSolution {
            rects: Vec::new(),
            used_width: w,
        },
        1 => {
            let min_w = w * SINGLE_MIN_WIDTH_SHARE;
            let only = LayoutRect {
                index: 0,
                x: 0.0,
                y: 0.0,
                width: (h * leaf_ratio(aspect_ratios[0])).clamp(min_w, w),
                height: h,
            };
            finalize(vec![only], w)
        }
        n => {
            let trees: Vec<SplitTree> = if n <= MAX_EXHAUSTIVE_PHOTOS {
                permutations(n)
                    .iter()
                    .flat_map(|order| enumerate_trees(order))
                    .collect()
            } else {
                tracing::warn!(
                    photos = n,
                    max = MAX_EXHAUSTIVE_PHOTOS,
                    "photo count above exhaustive bound; falling back to fixed tree shapes"
                );
                heuristic_orders(aspect_ratios)
                    .iter()
                    .flat_map(|order| heuristic_trees(order))
                    .collect()
            };

            let candidates = trees.len();
            let mut best: Option<(f64, Vec<LayoutRect>)> = None;
            for tree in &trees {
                let rects = layout_tree(tree, aspect_ratios, w, h);
                let area: f64 = rects.iter().map(LayoutRect::area).sum();
                // First candidate keeps priority on ties.
                let improves = match &best {
                    None => true,
                    Some((best_area, _)) => area > *best_area * (1.0 + 1e-12),
                };
                if improves {
                    best = Some((area, rects));
                }
            }
            tracing::debug!(candidates, "mosaic search finished");

            let rects = best.map(|(_, r)| r).unwrap_or_default();
            finalize(rects, w)
        }
    }
}

/// Fit `tree` to the container: the root ratio picks the limiting dimension and the
/// used region is centered on the other axis.
fn layout_tree(tree: &SplitTree, aspect_ratios: &[f64], w: f64, h: f64) -> Vec<LayoutRect> {
    let root = tree.ratio(aspect_ratios);
    let bounds = if h <= 0.0 || root > w / h {
        let used_h = w / root;
        let y = (h - used_h) * 0.5;
        Rect::new(0.0, y, w, y + used_h)
    } else {
        let used_w = h * root;
        let x = (w - used_w) * 0.5;
        Rect::new(x, 0.0, x + used_w, h)
    };

    let mut placed = Vec::with_capacity(tree.leaf_count());
    tree.place(aspect_ratios, bounds, &mut placed);
    placed
        .into_iter()
        .map(|(idx, r)| LayoutRect::from_rect(idx, r))
        .collect()
}

fn finalize(mut rects: Vec<LayoutRect>, container_width: f64) -> LayoutSolution {
    if rects.is_empty() {
        return LayoutSolution {
            rects,
            used_width: container_width,
        };
    }
    rects.sort_by_key(|r| r.index);

    let min_x = rects.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
    let max_x = rects
        .iter()
        .map(|r| r.x + r.width)
        .fold(f64::NEG_INFINITY, f64::max);
    for r in &mut rects {
        r.x -= min_x;
    }

    LayoutSolution {
        rects,
        used_width: (max_x - min_x).min(container_width),
    }
}

/// Row, column and two alternating balanced trees over `order`.
fn heuristic_trees(order: &[usize]) -> Vec<SplitTree> {
    let chain = |axis: SplitAxis| {
        let mut iter = order.iter().rev();
        let mut acc = iter.next().map(|&i| SplitTree::Leaf(i));
        for &i in iter {
            acc = acc.map(|rest| SplitTree::Split {
                axis,
                first: Box::new(SplitTree::Leaf(i)),
                second: Box::new(rest),
            });
        }
        acc
    };
    [
        chain(SplitAxis::Vertical),
        chain(SplitAxis::Horizontal),
        balanced_tree(order, SplitAxis::Vertical),
        balanced_tree(order, SplitAxis::Horizontal),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn balanced_tree(order: &[usize], axis: SplitAxis) -> Option<SplitTree> {
    match order {
        [] => None,
        [only] => Some(SplitTree::Leaf(*only)),
        _ => {
            let mid = order.len() / 2;
            let next = match axis {
                SplitAxis::Vertical => SplitAxis::Horizontal,
                SplitAxis::Horizontal => SplitAxis::Vertical,
            };
            Some(SplitTree::Split {
                axis,
                first: Box::new(balanced_tree(&order[..mid], next)?),
                second: Box::new(balanced_tree(&order[mid..], next)?),
            })
        }
    }
}

fn heuristic_orders(aspect_ratios: &[f64]) -> Vec<Vec<usize>> {
    let identity: Vec<usize> = (0..aspect_ratios.len()).collect();
    let mut sorted = identity.clone();
    sorted.sort_by(|&a, &b| {
        leaf_ratio(aspect_ratios[b]).total_cmp(&leaf_ratio(aspect_ratios[a]))
    });
    if sorted == identity {
        vec![identity]
    } else {
        vec![identity, sorted]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
