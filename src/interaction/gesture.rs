use crate::{
    assets::photo::{FrameId, FrameSet},
    foundation::core::{NormalizedRect, Point, Rect},
    interaction::snap::snap_and_clamp,
};

/// Tunables for direct manipulation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ManipulationConfig {
    /// Snap distance in normalized units.
    pub snap_threshold: f64,
    /// Smallest frame width reachable by resize or pinch, in container pixels.
    pub min_frame_width_px: f64,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 0.02,
            min_frame_width_px: 80.0,
        }
    }
}

/// Pixel size of the photo container gestures are measured against.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerMetrics {
    pub width: f64,
    pub height: f64,
}

impl ContainerMetrics {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Part of a frame under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Body,
    ResizeHandle,
}

/// One pointer event, in container pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub pointer_id: u64,
    pub position: Point,
}

impl PointerInput {
    pub fn new(pointer_id: u64, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            position: Point::new(x, y),
        }
    }
}

/// One touch contact, in container pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// State captured when a gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Drag {
        pointer_id: u64,
        origin: Point,
        start: NormalizedRect,
    },
    Resize {
        pointer_id: u64,
        origin: Point,
        start: NormalizedRect,
    },
    Pinch {
        start_distance: f64,
        /// Frame center in container pixels, held fixed while pinching.
        center: Point,
        start_width_px: f64,
    },
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Drag { .. } => GestureKind::Drag,
            Self::Resize { .. } => GestureKind::Resize,
            Self::Pinch { .. } => GestureKind::Pinch,
        }
    }

    fn pointer_id(&self) -> Option<u64> {
        match *self {
            Self::Drag { pointer_id, .. } | Self::Resize { pointer_id, .. } => Some(pointer_id),
            Self::Pinch { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Drag,
    Resize,
    Pinch,
}

/// The single in-flight gesture and the frame it is bound to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveGesture {
    pub frame: FrameId,
    pub gesture: Gesture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another gesture already owns the input stream.
    GestureInProgress,
    /// Event came from a pointer the active gesture did not capture.
    PointerMismatch,
    NoActiveGesture,
    UnknownFrame,
    NotEnoughTouches,
    DegenerateContainer,
}

/// Outcome of feeding one event to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEffect {
    Started { frame: FrameId, kind: GestureKind },
    Updated { frame: FrameId, layout: NormalizedRect },
    Ended { frame: FrameId, kind: GestureKind },
    Ignored(IgnoreReason),
}

/// Turns pointer and touch events into frame layout edits.
///
/// Exactly one gesture is active at a time. Every written layout is snapped (drag
/// and pinch), rounded to four decimals and clamped into the container.
#[derive(Clone, Debug, Default)]
pub struct ManipulationController {
    config: ManipulationConfig,
    active: Option<ActiveGesture>,
}

impl ManipulationController {
    pub fn new(config: ManipulationConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    pub fn active(&self) -> Option<&ActiveGesture> {
        self.active.as_ref()
    }

    /// Drop any in-flight gesture without touching geometry.
    pub fn reset(&mut self) {
        self.active = None;
    }

    pub fn pointer_down(
        &mut self,
        frames: &FrameSet,
        frame: FrameId,
        target: HitTarget,
        input: PointerInput,
    ) -> GestureEffect {
        if self.active.is_some() {
            return GestureEffect::Ignored(IgnoreReason::GestureInProgress);
        }
        let Some(f) = frames.get(frame) else {
            return GestureEffect::Ignored(IgnoreReason::UnknownFrame);
        };

        let gesture = match target {
            HitTarget::Body => Gesture::Drag {
                pointer_id: input.pointer_id,
                origin: input.position,
                start: f.layout,
            },
            HitTarget::ResizeHandle => Gesture::Resize {
                pointer_id: input.pointer_id,
                origin: input.position,
                start: f.layout,
            },
        };
        self.start(frame, gesture)
    }

    pub fn pointer_move(
        &mut self,
        frames: &mut FrameSet,
        input: PointerInput,
        container: ContainerMetrics,
    ) -> GestureEffect {
        let Some(active) = self.active else {
            return GestureEffect::Ignored(IgnoreReason::NoActiveGesture);
        };
        match active.gesture.pointer_id() {
            None => return GestureEffect::Ignored(IgnoreReason::GestureInProgress),
            Some(id) if id != input.pointer_id => {
                return GestureEffect::Ignored(IgnoreReason::PointerMismatch);
            }
            Some(_) => {}
        }
        if container.is_degenerate() {
            return GestureEffect::Ignored(IgnoreReason::DegenerateContainer);
        }
        let Some(aspect_ratio) = frames.get(active.frame).map(|f| f.aspect_ratio) else {
            self.active = None;
            return GestureEffect::Ignored(IgnoreReason::UnknownFrame);
        };

        let candidate = match active.gesture {
            Gesture::Drag { origin, start, .. } => {
                let moved = NormalizedRect {
                    x: start.x + (input.position.x - origin.x) / container.width,
                    y: start.y + (input.position.y - origin.y) / container.height,
                    ..start
                };
                snap_and_clamp(
                    moved,
                    &other_layouts(frames, active.frame),
                    self.config.snap_threshold,
                )
            }
            Gesture::Resize { origin, start, .. } => {
                let min_width = self.config.min_frame_width_px / container.width;
                let max_width = (1.0 - start.x)
                    .min((1.0 - start.y) * container.height * aspect_ratio / container.width);
                let width = (start.width + (input.position.x - origin.x) / container.width)
                    .clamp(min_width.min(max_width), max_width);
                NormalizedRect {
                    width,
                    height: width * container.width / aspect_ratio / container.height,
                    ..start
                }
            }
            Gesture::Pinch { .. } => return GestureEffect::Ignored(IgnoreReason::GestureInProgress),
        };

        commit(frames, active.frame, candidate)
    }

    pub fn pointer_up(&mut self, input: PointerInput) -> GestureEffect {
        self.release(input)
    }

    pub fn pointer_cancel(&mut self, input: PointerInput) -> GestureEffect {
        self.release(input)
    }

    /// Begin a pinch when at least two touches rest on `frame`.
    ///
    /// A drag or resize already running on the same frame is replaced.
    pub fn touch_start(
        &mut self,
        frames: &FrameSet,
        frame: FrameId,
        touches: &[TouchPoint],
        container: ContainerMetrics,
    ) -> GestureEffect {
        let [a, b, ..] = touches else {
            return GestureEffect::Ignored(IgnoreReason::NotEnoughTouches);
        };
        if let Some(active) = self.active {
            let preempts = active.frame == frame && active.gesture.kind() != GestureKind::Pinch;
            if !preempts {
                return GestureEffect::Ignored(IgnoreReason::GestureInProgress);
            }
            tracing::trace!(frame = %frame, "pinch preempts pointer gesture");
            self.active = None;
        }
        if container.is_degenerate() {
            return GestureEffect::Ignored(IgnoreReason::DegenerateContainer);
        }
        let Some(f) = frames.get(frame) else {
            return GestureEffect::Ignored(IgnoreReason::UnknownFrame);
        };

        let px = f.layout.to_pixels(container_rect(container));
        self.start(
            frame,
            Gesture::Pinch {
                start_distance: a.position.distance(b.position),
                center: px.center(),
                start_width_px: px.width(),
            },
        )
    }

    pub fn touch_move(
        &mut self,
        frames: &mut FrameSet,
        touches: &[TouchPoint],
        container: ContainerMetrics,
    ) -> GestureEffect {
        let Some(active) = self.active else {
            return GestureEffect::Ignored(IgnoreReason::NoActiveGesture);
        };
        let Gesture::Pinch {
            start_distance,
            center,
            start_width_px,
        } = active.gesture
        else {
            return GestureEffect::Ignored(IgnoreReason::GestureInProgress);
        };
        let [a, b, ..] = touches else {
            return GestureEffect::Ignored(IgnoreReason::NotEnoughTouches);
        };
        if container.is_degenerate() || start_distance <= 0.0 {
            return GestureEffect::Ignored(IgnoreReason::DegenerateContainer);
        }
        let Some(aspect_ratio) = frames.get(active.frame).map(|f| f.aspect_ratio) else {
            self.active = None;
            return GestureEffect::Ignored(IgnoreReason::UnknownFrame);
        };

        let scale = a.position.distance(b.position) / start_distance;
        let half_w = center.x.min(container.width - center.x).max(0.0);
        let half_h = center.y.min(container.height - center.y).max(0.0);
        let max_width = (2.0 * half_w).min(2.0 * half_h * aspect_ratio);
        let min_width = self.config.min_frame_width_px.min(max_width);
        let width = (start_width_px * scale).clamp(min_width, max_width);
        let height = width / aspect_ratio;

        let resized = NormalizedRect::new(
            (center.x - width / 2.0) / container.width,
            (center.y - height / 2.0) / container.height,
            width / container.width,
            height / container.height,
        );
        let candidate = snap_and_clamp(
            resized,
            &other_layouts(frames, active.frame),
            self.config.snap_threshold,
        );
        commit(frames, active.frame, candidate)
    }

    /// End a pinch once fewer than two touches remain.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> GestureEffect {
        match self.active {
            Some(active) if active.gesture.kind() == GestureKind::Pinch => {
                if remaining.len() >= 2 {
                    return GestureEffect::Ignored(IgnoreReason::GestureInProgress);
                }
                self.active = None;
                GestureEffect::Ended {
                    frame: active.frame,
                    kind: GestureKind::Pinch,
                }
            }
            Some(_) => GestureEffect::Ignored(IgnoreReason::GestureInProgress),
            None => GestureEffect::Ignored(IgnoreReason::NoActiveGesture),
        }
    }

    fn start(&mut self, frame: FrameId, gesture: Gesture) -> GestureEffect {
        let kind = gesture.kind();
        tracing::debug!(frame = %frame, ?kind, "gesture started");
        self.active = Some(ActiveGesture { frame, gesture });
        GestureEffect::Started { frame, kind }
    }

    fn release(&mut self, input: PointerInput) -> GestureEffect {
        let Some(active) = self.active else {
            return GestureEffect::Ignored(IgnoreReason::NoActiveGesture);
        };
        if active.gesture.pointer_id() != Some(input.pointer_id) {
            return GestureEffect::Ignored(IgnoreReason::PointerMismatch);
        }
        self.active = None;
        GestureEffect::Ended {
            frame: active.frame,
            kind: active.gesture.kind(),
        }
    }
}

fn container_rect(container: ContainerMetrics) -> Rect {
    Rect::new(0.0, 0.0, container.width, container.height)
}

fn other_layouts(frames: &FrameSet, frame: FrameId) -> Vec<NormalizedRect> {
    frames
        .iter()
        .filter(|f| f.id != frame)
        .map(|f| f.layout)
        .collect()
}

fn commit(frames: &mut FrameSet, frame: FrameId, candidate: NormalizedRect) -> GestureEffect {
    let layout = candidate.normalized().clamped();
    match frames.get_mut(frame) {
        Some(f) => {
            f.layout = layout;
            GestureEffect::Updated { frame, layout }
        }
        None => GestureEffect::Ignored(IgnoreReason::UnknownFrame),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/gesture.rs"]
mod tests;
