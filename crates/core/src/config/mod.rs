use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Result, RippleError};

pub const DEFAULT_RING_COUNT: u32 = 6;
pub const DEFAULT_DURATION_MS: u32 = 3000;
pub const DEFAULT_SCALE_FACTOR: f32 = 6.0;
/// Upper bound on `ring_count`; each ring owns a track and a draw call per frame.
pub const MAX_RING_COUNT: u32 = 256;

/// Packed 32-bit ARGB color shared by every ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Returns the color with its alpha channel multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let alpha = (self.alpha() as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self::from_argb(alpha, self.red(), self.green(), self.blue())
    }
}

impl FromStr for Color {
    type Err = RippleError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || RippleError::InvalidColor(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let packed = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            6 => Ok(Self(0xFF00_0000 | packed)),
            8 => Ok(Self(packed)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = RippleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// How each ring is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Solid discs. The stroke width is ignored.
    #[default]
    Filled,
    /// Outlined circles using the configured stroke width.
    Stroked,
}

/// Resolved ripple configuration, supplied once per background.
///
/// `color`, `stroke_width` and `base_radius` are required; the remaining
/// fields fall back to the documented defaults when absent from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RippleConfig {
    pub color: Color,
    pub stroke_width: f32,
    pub base_radius: f32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
    #[serde(default = "default_ring_count")]
    pub ring_count: u32,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
    #[serde(default)]
    pub fill_mode: FillMode,
}

fn default_duration_ms() -> u32 {
    DEFAULT_DURATION_MS
}

fn default_ring_count() -> u32 {
    DEFAULT_RING_COUNT
}

fn default_scale_factor() -> f32 {
    DEFAULT_SCALE_FACTOR
}

impl RippleConfig {
    /// Creates a configuration with the required values and default timing.
    pub fn new(color: Color, stroke_width: f32, base_radius: f32) -> Self {
        Self {
            color,
            stroke_width,
            base_radius,
            duration_ms: DEFAULT_DURATION_MS,
            ring_count: DEFAULT_RING_COUNT,
            scale_factor: DEFAULT_SCALE_FACTOR,
            fill_mode: FillMode::default(),
        }
    }

    pub fn with_ring_count(mut self, ring_count: u32) -> Self {
        self.ring_count = ring_count;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Stroke width actually used for drawing. Filled rings never stroke.
    pub fn effective_stroke_width(&self) -> f32 {
        match self.fill_mode {
            FillMode::Filled => 0.0,
            FillMode::Stroked => self.stroke_width,
        }
    }

    /// Rejects values the engine cannot animate.
    pub fn validate(&self) -> Result<()> {
        if self.ring_count == 0 || self.ring_count > MAX_RING_COUNT {
            return Err(RippleError::config(format!(
                "ring_count must be between 1 and {MAX_RING_COUNT}, got {}",
                self.ring_count
            )));
        }
        if self.duration_ms == 0 {
            return Err(RippleError::config("duration_ms must be positive"));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(RippleError::config(format!(
                "stroke_width must be a non-negative number, got {}",
                self.stroke_width
            )));
        }
        if !self.base_radius.is_finite() || self.base_radius < 0.0 {
            return Err(RippleError::config(format!(
                "base_radius must be a non-negative number, got {}",
                self.base_radius
            )));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(RippleError::config(format!(
                "scale_factor must be a positive number, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }
}
