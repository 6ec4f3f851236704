use crate::foundation::core::{LAYOUT_DECIMALS, NormalizedRect, round_to_decimals};

/// Snap a position on one axis.
///
/// Targets are the container edges (`0`, `1 - size`) and, for every other span,
/// its start, its end, `start - size` and `end - size`. The nearest target within
/// `threshold` is returned exactly; otherwise `position` is returned unchanged.
///
/// Targets are rounded to [`LAYOUT_DECIMALS`] so a snapped value survives
/// [`NormalizedRect::normalized`] without drifting off the edge it met.
pub fn snap_axis(
    position: f64,
    size: f64,
    others: impl IntoIterator<Item = (f64, f64)>,
    threshold: f64,
) -> f64 {
    let mut targets = vec![0.0, 1.0 - size];
    for (start, other_size) in others {
        let end = start + other_size;
        targets.extend([start, end, start - size, end - size]);
    }

    let mut best: Option<(f64, f64)> = None;
    for target in targets {
        let target = round_to_decimals(target, LAYOUT_DECIMALS);
        let distance = (position - target).abs();
        if distance > threshold {
            continue;
        }
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, target));
        }
    }
    best.map_or(position, |(_, target)| target)
}

/// Snap both axes independently against `others`, then clamp into the container.
pub fn snap_and_clamp(
    rect: NormalizedRect,
    others: &[NormalizedRect],
    threshold: f64,
) -> NormalizedRect {
    let x = snap_axis(
        rect.x,
        rect.width,
        others.iter().map(|o| (o.x, o.width)),
        threshold,
    );
    let y = snap_axis(
        rect.y,
        rect.height,
        others.iter().map(|o| (o.y, o.height)),
        threshold,
    );
    NormalizedRect { x, y, ..rect }.clamped()
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/snap.rs"]
mod tests;
