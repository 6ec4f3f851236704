use crate::{
    assets::{
        loader::{LoadTicket, PhotoLoader},
        photo::{FrameId, FrameSet, PhotoFrame, PhotoSource},
    },
    foundation::{core::NormalizedRect, error::VitrineResult},
    interaction::gesture::{
        ContainerMetrics, GestureEffect, HitTarget, ManipulationConfig, ManipulationController,
        PointerInput, TouchPoint,
    },
    layout::solver::{LayoutSolution, solve},
    poster::{metrics::PosterMetrics, plan::PosterPlan, theme::ThemePalette},
    render::{
        compositor::{compose_poster, render_preview},
        encode::{ExportSettings, ExportedPoster},
    },
    typography::{
        compose::PosterText,
        measure::{FontBook, TextMeasure},
    },
};

/// One editing session: the photo set, its layout, the text and the gesture state.
#[derive(Debug)]
pub struct PosterSession {
    metrics: PosterMetrics,
    loader: PhotoLoader,
    controller: ManipulationController,
    frames: FrameSet,
    photo_area_width: f64,
    text: PosterText,
}

impl PosterSession {
    pub fn new(metrics: PosterMetrics, config: ManipulationConfig) -> VitrineResult<Self> {
        metrics.validate()?;
        Ok(Self {
            photo_area_width: metrics.photo_container().width(),
            metrics,
            loader: PhotoLoader::new(),
            controller: ManipulationController::new(config),
            frames: FrameSet::default(),
            text: PosterText::default(),
        })
    }

    /// Decode on a dedicated loader, e.g. one with its own thread pool.
    pub fn with_loader(mut self, loader: PhotoLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn metrics(&self) -> &PosterMetrics {
        &self.metrics
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn text(&self) -> &PosterText {
        &self.text
    }

    pub fn set_text(&mut self, text: PosterText) {
        self.text = text;
    }

    /// Width of the photo region chosen by the last solve.
    pub fn photo_area_width(&self) -> f64 {
        self.photo_area_width
    }

    /// Canonical pixel size of the photo region gestures are measured in.
    pub fn container(&self) -> ContainerMetrics {
        let region = self.metrics.photo_region(self.photo_area_width);
        ContainerMetrics::new(region.width(), region.height())
    }

    pub fn loader(&self) -> &PhotoLoader {
        &self.loader
    }

    /// Start a batch; the ticket can travel to a worker running [`PhotoLoader::load_batch`].
    pub fn begin_load(&self) -> LoadTicket {
        self.loader.begin()
    }

    /// Publish a decoded batch unless a newer batch has started since `ticket`.
    ///
    /// Replaces every frame, drops any in-flight gesture and solves a fresh layout.
    pub fn install(&mut self, ticket: LoadTicket, frames: Vec<PhotoFrame>) -> VitrineResult<bool> {
        if !self.loader.is_current(ticket) {
            tracing::debug!(generation = ticket.generation(), "stale batch not installed");
            return Ok(false);
        }
        self.frames = FrameSet::new(frames)?;
        self.controller.reset();
        self.solve_layout();
        Ok(true)
    }

    /// Decode and install `sources` in one call.
    pub fn load_photos(&mut self, sources: Vec<PhotoSource>) -> VitrineResult<bool> {
        let ticket = self.begin_load();
        match self.loader.load_batch(ticket, sources)? {
            Some(frames) => self.install(ticket, frames),
            None => Ok(false),
        }
    }

    /// Solve from the current aspect ratios and overwrite every frame layout.
    pub fn solve_layout(&mut self) -> LayoutSolution {
        let container = self.metrics.photo_container();
        let solution = solve(
            &self.frames.aspect_ratios(),
            container.width(),
            container.height(),
        );
        self.frames.apply_solution(&solution, container.height());
        self.photo_area_width = solution.used_width;
        solution
    }

    /// Discard manual edits; identical to a fresh solve of the current photos.
    pub fn reset_layout(&mut self) -> LayoutSolution {
        self.controller.reset();
        self.solve_layout()
    }

    /// Apply stored layouts by ordinal; `None` keeps the solved layout.
    pub fn apply_layouts(&mut self, layouts: &[Option<NormalizedRect>]) {
        let ids: Vec<FrameId> = self.frames.by_ordinal().iter().map(|f| f.id).collect();
        for (id, layout) in ids.into_iter().zip(layouts) {
            if let (Some(layout), Some(frame)) = (layout, self.frames.get_mut(id)) {
                frame.layout = layout.normalized().clamped();
            }
        }
    }

    pub fn remove_photo(&mut self, id: FrameId) -> Option<PhotoFrame> {
        let removed = self.frames.remove(id)?;
        self.controller.reset();
        self.solve_layout();
        Some(removed)
    }

    /// Drop every photo. Pending batches are superseded too.
    pub fn clear(&mut self) {
        self.loader.begin();
        self.controller.reset();
        self.frames.clear();
        self.solve_layout();
    }

    pub fn focus(&mut self, id: FrameId) -> bool {
        self.frames.focus(id)
    }

    pub fn pointer_down(
        &mut self,
        frame: FrameId,
        target: HitTarget,
        input: PointerInput,
    ) -> GestureEffect {
        self.controller
            .pointer_down(&self.frames, frame, target, input)
    }

    pub fn pointer_move(&mut self, input: PointerInput, container: ContainerMetrics) -> GestureEffect {
        self.controller
            .pointer_move(&mut self.frames, input, container)
    }

    pub fn pointer_up(&mut self, input: PointerInput) -> GestureEffect {
        self.controller.pointer_up(input)
    }

    pub fn pointer_cancel(&mut self, input: PointerInput) -> GestureEffect {
        self.controller.pointer_cancel(input)
    }

    pub fn touch_start(
        &mut self,
        frame: FrameId,
        touches: &[TouchPoint],
        container: ContainerMetrics,
    ) -> GestureEffect {
        self.controller
            .touch_start(&self.frames, frame, touches, container)
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint], container: ContainerMetrics) -> GestureEffect {
        self.controller
            .touch_move(&mut self.frames, touches, container)
    }

    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> GestureEffect {
        self.controller.touch_end(remaining)
    }

    /// Canonical-resolution plan used for export.
    pub fn plan(&self, measure: &mut dyn TextMeasure) -> PosterPlan {
        PosterPlan::build(
            &self.metrics,
            &self.frames,
            self.photo_area_width,
            &self.text,
            measure,
        )
    }

    /// The export plan scaled to `preview_height`.
    pub fn preview_plan(&self, measure: &mut dyn TextMeasure, preview_height: f64) -> PosterPlan {
        self.plan(measure).for_height(preview_height)
    }

    /// Paint and encode the poster at canonical resolution.
    pub fn export(
        &self,
        palette: &ThemePalette,
        fonts: Option<&mut FontBook>,
        settings: &ExportSettings,
    ) -> VitrineResult<ExportedPoster> {
        compose_poster(
            &self.frames,
            &self.text,
            palette,
            self.photo_area_width,
            &self.metrics,
            fonts,
            settings,
        )
    }

    /// PNG preview `preview_height` pixels tall.
    pub fn preview(
        &self,
        palette: &ThemePalette,
        fonts: Option<&mut FontBook>,
        preview_height: f64,
    ) -> VitrineResult<ExportedPoster> {
        render_preview(
            &self.frames,
            &self.text,
            palette,
            self.photo_area_width,
            &self.metrics,
            fonts,
            preview_height,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poster/session.rs"]
mod tests;
