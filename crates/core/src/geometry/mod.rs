use serde::Serialize;

/// Divisor applied to the shorter container side to obtain the ring radius.
const RADIUS_DIVISOR: f32 = 7.0;
/// Fully expanded rings span a third of the shorter container side.
const EXPANDED_DIVISOR: f32 = 3.0;

/// Ring dimensions derived from the measured container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub radius: f32,
    pub scale: f32,
    /// Side of the square box each ring is drawn in.
    pub box_size: f32,
}

impl Geometry {
    /// Derives ring geometry from the container size.
    ///
    /// Returns `None` while the container is not measurable (either side is
    /// zero, negative or not finite) so callers can defer the build.
    pub fn compute(width: f32, height: f32) -> Option<Self> {
        if !width.is_finite() || !height.is_finite() {
            return None;
        }
        let min_dimension = width.min(height);
        if min_dimension <= 0.0 {
            return None;
        }

        let radius = min_dimension / RADIUS_DIVISOR;
        let scale = min_dimension / (EXPANDED_DIVISOR * radius);
        Some(Self {
            radius,
            scale,
            box_size: 2.0 * radius * scale,
        })
    }

    /// Radius of a ring at the end of its cycle.
    pub fn max_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Whether rings visibly grow over a cycle.
    pub fn expands(&self) -> bool {
        self.scale > 1.0
    }

    /// Top-left corner of the ring box when centered in the container.
    pub fn ring_origin(&self, width: f32, height: f32) -> (f32, f32) {
        (
            (width - self.box_size) * 0.5,
            (height - self.box_size) * 0.5,
        )
    }

    /// Center of every ring in container coordinates.
    pub fn ring_center(&self, width: f32, height: f32) -> (f32, f32) {
        let (x, y) = self.ring_origin(width, height);
        let half = self.box_size * 0.5;
        (x + half, y + half)
    }
}

/// Radius handed to the circle primitive so a stroke stays inside the ring.
pub fn ring_draw_radius(radius: f32, stroke_width: f32) -> f32 {
    (radius - stroke_width * 0.5).max(0.0)
}
