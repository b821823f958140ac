//! Geometry and animation core: one rotating vector, its circle, its
//! projections and the cosine trace, all driven by a single angle.
//!
//! The host owns a [`PhasorView`], forwards size and visibility changes to
//! it, awaits [`PhasorView::next_tick`] and calls [`PhasorView::draw`] with
//! any [`Surface`] after each tick.

pub mod clock;
pub mod frame;
pub mod paint;
pub mod path;
pub mod projector;
pub mod renderer;
pub mod surface;
pub mod wave;

pub use clock::AngleClock;
pub use frame::{SceneLayout, SurfaceExtent};
pub use paint::SceneMetrics;
pub use surface::Surface;

use std::time::Duration;
use tracing::debug;

use crate::color::Resources;
use paint::SceneStyles;
use renderer::SceneRenderer;
use wave::WaveSampler;

pub const DEFAULT_LABEL: &str = "指数函数与旋转矢量";
pub const DEFAULT_CAPTION: &str = "贝塞尔曲线";

/// Everything needed to build a [`PhasorView`].
#[derive(Debug, Clone)]
pub struct SceneSettings {
    pub initial_angle: f32,
    pub step_degrees: f32,
    pub period: Duration,
    pub samples: usize,
    pub phase_step: f32,
    pub metrics: SceneMetrics,
    pub label: String,
    pub caption: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            initial_angle: 10.0,
            step_degrees: clock::DEFAULT_STEP_DEGREES,
            period: clock::DEFAULT_PERIOD,
            samples: wave::DEFAULT_SAMPLES,
            phase_step: wave::DEFAULT_PHASE_STEP,
            metrics: SceneMetrics::default(),
            label: DEFAULT_LABEL.to_string(),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

/// Host-facing view: lifecycle callbacks in, draw calls out.
pub struct PhasorView {
    clock: AngleClock,
    layout: SceneLayout,
    renderer: SceneRenderer,
}

impl PhasorView {
    /// Styles are resolved from `resources` here, once.
    pub fn new(settings: SceneSettings, resources: &dyn Resources) -> Self {
        let styles = SceneStyles::new(resources, &settings.metrics);
        let renderer = SceneRenderer::new(
            WaveSampler::new(settings.samples, settings.phase_step),
            settings.metrics,
            styles,
            settings.label,
            settings.caption,
        );
        Self {
            clock: AngleClock::new(settings.initial_angle, settings.step_degrees, settings.period),
            layout: SceneLayout::default(),
            renderer,
        }
    }

    pub fn angle(&self) -> f32 {
        self.clock.angle()
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    /// Recompute radius and viewport centers. Negative sizes clamp to 0.
    pub fn on_size_changed(&mut self, width: f32, height: f32) {
        let extent = SurfaceExtent::new(width, height);
        self.layout = SceneLayout::from_extent(extent, self.renderer.metrics().margin);
        debug!(
            width = extent.width,
            height = extent.height,
            radius = self.layout.radius,
            "size changed"
        );
    }

    pub fn on_visible(&mut self) {
        debug!("visible");
        self.clock.start();
    }

    pub fn on_hidden(&mut self) {
        debug!("hidden");
        self.clock.stop();
    }

    /// Resolves after the next tick has advanced the angle; the caller
    /// should redraw. Never resolves while hidden.
    pub async fn next_tick(&mut self) -> f32 {
        self.clock.tick().await
    }

    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let angle = self.clock.angle();
        self.renderer.render(surface, &self.layout, angle);
    }
}
