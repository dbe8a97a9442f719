//! Time keeping and delayed, endlessly restarting interpolation.
//!
//! Everything here is a pure function of elapsed time so the host can drive
//! it from any frame clock, or tests can sample it directly.

/// Elapsed animation time, advanced by the host once per frame.
#[derive(Debug, Default, Clone)]
pub struct PlaybackClock {
    pub elapsed_ms: f64,
}

impl PlaybackClock {
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() {
            self.elapsed_ms = (self.elapsed_ms + delta_ms).max(0.0);
        }
    }
}

/// Decelerating curve `1 - (1 - t)^2` over `[0, 1]`.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Interpolation from `from` to `to` that waits `delay_ms` once, then runs
/// for `duration_ms` and jumps back to `from` forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatingTween {
    pub from: f32,
    pub to: f32,
    pub delay_ms: f64,
    pub duration_ms: f64,
}

impl RepeatingTween {
    pub fn new(from: f32, to: f32, delay_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            delay_ms,
            duration_ms,
        }
    }

    /// Linear progress through the current cycle, or `None` before the delay
    /// has elapsed.
    pub fn progress_at(&self, elapsed_ms: f64) -> Option<f32> {
        let local = elapsed_ms - self.delay_ms;
        if local < 0.0 {
            return None;
        }
        if self.duration_ms <= 0.0 {
            return Some(1.0);
        }
        Some((local.rem_euclid(self.duration_ms) / self.duration_ms) as f32)
    }

    /// Eased value at `elapsed_ms`, or `None` before the delay has elapsed.
    pub fn sample(&self, elapsed_ms: f64) -> Option<f32> {
        self.progress_at(elapsed_ms)
            .map(|progress| self.value_at_progress(progress))
    }

    pub fn value_at_progress(&self, progress: f32) -> f32 {
        let eased = ease_out(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Value the tween settles on when ended early.
    pub fn end_value(&self) -> f32 {
        self.to
    }
}
