use tracing::info;

use crate::{
    BuildOutcome, Canvas, CircleCommand, Color, Paint, RenderGraph, Result, RippleConfig,
    RippleScheduler,
};

/// Host-facing ripple component.
///
/// Owns the resolved configuration, the shared paint and the scheduler, and
/// translates layout and frame callbacks from the host container into
/// scheduler calls.
#[derive(Debug)]
pub struct RippleBackground {
    config: RippleConfig,
    scheduler: RippleScheduler,
    render: RenderGraph,
    container: (f32, f32),
}

impl RippleBackground {
    /// Validates the configuration and creates an unbuilt background.
    pub fn new(config: RippleConfig) -> Result<Self> {
        config.validate()?;
        let render = RenderGraph::new(Paint::from_config(&config));
        Ok(Self {
            config,
            scheduler: RippleScheduler::new(),
            render,
            container: (0.0, 0.0),
        })
    }

    /// Layout notification from the host.
    ///
    /// The first measurable size builds the rings; later sizes only move the
    /// ring center, the ring geometry stays frozen.
    pub fn on_measure(&mut self, width: f32, height: f32) -> Result<BuildOutcome> {
        self.container = (width, height);
        let outcome = self.scheduler.build(self.container, &self.config)?;
        if outcome == BuildOutcome::Built {
            info!(width, height, rings = self.config.ring_count, "ripple background measured");
        }
        Ok(outcome)
    }

    pub fn start_ripple_animation(&mut self) {
        self.scheduler.start();
    }

    pub fn stop_ripple_animation(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_ripple_animation_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn start(&mut self) {
        self.start_ripple_animation();
    }

    pub fn stop(&mut self) {
        self.stop_ripple_animation();
    }

    pub fn is_running(&self) -> bool {
        self.is_ripple_animation_running()
    }

    pub fn set_color(&mut self, color: Color) {
        self.render.set_color(color);
    }

    /// Frame callback from the host clock.
    pub fn on_frame(&mut self, delta_ms: f64) {
        self.scheduler.advance(delta_ms);
    }

    /// Circles to paint for the current frame.
    pub fn frame(&self) -> Vec<CircleCommand> {
        self.render.commands(&self.scheduler, self.container)
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> usize {
        self.render.draw(canvas, &self.scheduler, self.container)
    }

    /// Ring radius: derived from the container once measured, the configured
    /// value before that.
    pub fn radius(&self) -> f32 {
        self.scheduler
            .geometry()
            .map_or(self.config.base_radius, |geometry| geometry.radius)
    }

    /// Expansion factor: derived from the container once measured, the
    /// configured value before that.
    pub fn scale(&self) -> f32 {
        self.scheduler
            .geometry()
            .map_or(self.config.scale_factor, |geometry| geometry.scale)
    }

    pub fn paint(&self) -> &Paint {
        self.render.paint()
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &RippleScheduler {
        &self.scheduler
    }
}
