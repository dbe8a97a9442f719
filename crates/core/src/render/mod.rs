use serde::{Deserialize, Serialize};

use crate::{
    geometry::ring_draw_radius, Color, FillMode, Geometry, RingTrack, RippleConfig,
    RippleScheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// Shared paint used for every ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
}

impl Paint {
    pub fn from_config(config: &RippleConfig) -> Self {
        let style = match config.fill_mode {
            FillMode::Filled => PaintStyle::Fill,
            FillMode::Stroked => PaintStyle::Stroke,
        };
        Self {
            color: config.color,
            style,
            stroke_width: config.effective_stroke_width(),
        }
    }
}

/// One circle to paint, in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCommand {
    pub ring: usize,
    pub center: (f32, f32),
    pub radius: f32,
    /// Side of the box the ring is centered in.
    pub box_size: f32,
    pub opacity: f32,
    /// Paint color with the ring opacity folded into its alpha.
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
}

/// Draw primitive supplied by the host.
pub trait Canvas {
    fn draw_circle(&mut self, circle: &CircleCommand);
}

/// Canvas that simply keeps every command it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub circles: Vec<CircleCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_circle(&mut self, circle: &CircleCommand) {
        self.circles.push(*circle);
    }
}

/// Single draw routine shared by all rings.
#[derive(Debug, Clone)]
pub struct RenderGraph {
    paint: Paint,
}

impl RenderGraph {
    pub fn new(paint: Paint) -> Self {
        Self { paint }
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Takes effect on the next draw, whatever state the scheduler is in.
    pub fn set_color(&mut self, color: Color) {
        self.paint.color = color;
    }

    /// Circles for every visible ring that currently has something to show.
    pub fn commands(&self, scheduler: &RippleScheduler, container: (f32, f32)) -> Vec<CircleCommand> {
        let Some(geometry) = scheduler.geometry() else {
            return Vec::new();
        };
        scheduler
            .tracks()
            .iter()
            .filter_map(|track| self.circle_for(track, geometry, container))
            .collect()
    }

    pub fn draw<C: Canvas>(
        &self,
        canvas: &mut C,
        scheduler: &RippleScheduler,
        container: (f32, f32),
    ) -> usize {
        let commands = self.commands(scheduler, container);
        for command in &commands {
            canvas.draw_circle(command);
        }
        commands.len()
    }

    fn circle_for(
        &self,
        track: &RingTrack,
        geometry: &Geometry,
        container: (f32, f32),
    ) -> Option<CircleCommand> {
        if !track.visible {
            return None;
        }
        let sample = track.current?;
        if sample.opacity <= 0.0 {
            return None;
        }
        let (width, height) = container;
        Some(CircleCommand {
            ring: track.index,
            center: geometry.ring_center(width, height),
            radius: ring_draw_radius(sample.radius, self.paint.stroke_width),
            box_size: geometry.box_size,
            opacity: sample.opacity,
            color: self.paint.color.with_opacity(sample.opacity),
            style: self.paint.style,
            stroke_width: self.paint.stroke_width,
        })
    }
}
