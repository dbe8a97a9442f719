//! Core library for ripple backgrounds.
//!
//! A ripple background draws a handful of concentric rings that expand and
//! fade from the center of a host container, evenly staggered so they read as
//! a continuous wave. The crate is split the same way the work flows:
//! geometry is derived from the measured container, the scheduler owns one
//! track per ring and samples it against elapsed time, and the render graph
//! turns samples into circles for whatever canvas the host provides.

pub mod background;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod scheduler;
pub mod timeline;

pub use background::RippleBackground;
pub use config::{Color, FillMode, RippleConfig};
pub use error::{Result, RippleError};
pub use geometry::Geometry;
pub use render::{Canvas, CircleCommand, Paint, PaintStyle, RecordingCanvas, RenderGraph};
pub use scheduler::{BuildOutcome, Lifecycle, RingSample, RingTrack, RippleScheduler};
pub use timeline::{ease_out, PlaybackClock, RepeatingTween};
