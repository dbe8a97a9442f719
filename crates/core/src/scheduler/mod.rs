use tracing::{debug, trace};

use crate::{Geometry, PlaybackClock, RepeatingTween, Result, RippleConfig};

/// Where the scheduler is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Geometry is unknown and no tracks exist.
    #[default]
    Unbuilt,
    /// Geometry and tracks are frozen, the loop is idle.
    Built,
    /// The animation loop is active.
    Running,
}

/// Result of a [`RippleScheduler::build`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Geometry was computed and the ring tracks were created.
    Built,
    /// The scheduler was already built; nothing changed.
    AlreadyBuilt,
    /// The container is not measurable yet; try again on the next layout.
    Deferred,
}

/// Radius and opacity of a ring at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSample {
    pub radius: f32,
    pub opacity: f32,
}

/// Animation schedule of a single ring.
#[derive(Debug, Clone)]
pub struct RingTrack {
    pub index: usize,
    pub start_delay_ms: f64,
    pub radius: RepeatingTween,
    pub opacity: RepeatingTween,
    pub visible: bool,
    /// Sample produced by the most recent frame, if the ring has started.
    pub current: Option<RingSample>,
}

impl RingTrack {
    fn new(index: usize, start_delay_ms: f64, duration_ms: f64, geometry: &Geometry) -> Self {
        Self {
            index,
            start_delay_ms,
            radius: RepeatingTween::new(
                geometry.radius,
                geometry.max_radius(),
                start_delay_ms,
                duration_ms,
            ),
            opacity: RepeatingTween::new(1.0, 0.0, start_delay_ms, duration_ms),
            visible: false,
            current: None,
        }
    }

    /// Samples both sub-animations at `elapsed_ms` after start.
    pub fn sample(&self, elapsed_ms: f64) -> Option<RingSample> {
        let progress = self.radius.progress_at(elapsed_ms)?;
        Some(RingSample {
            radius: self.radius.value_at_progress(progress),
            opacity: self.opacity.value_at_progress(progress),
        })
    }

    pub fn radius_range(&self) -> (f32, f32) {
        (self.radius.from, self.radius.to)
    }

    fn settle(&mut self) {
        self.current = Some(RingSample {
            radius: self.radius.end_value(),
            opacity: self.opacity.end_value(),
        });
    }
}

/// Start delay of every ring, spread evenly over one cycle.
pub fn stagger_delays(duration_ms: u32, ring_count: u32) -> Vec<f64> {
    if ring_count == 0 {
        return Vec::new();
    }
    let step = f64::from(duration_ms) / f64::from(ring_count);
    (0..ring_count).map(|i| f64::from(i) * step).collect()
}

/// Owns the ring tracks and drives their staggered loop.
#[derive(Debug, Default)]
pub struct RippleScheduler {
    lifecycle: Lifecycle,
    geometry: Option<Geometry>,
    tracks: Vec<RingTrack>,
    clock: PlaybackClock,
}

impl RippleScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes geometry and creates the ring tracks.
    ///
    /// Only acts from [`Lifecycle::Unbuilt`]; later calls are ignored so the
    /// geometry stays frozen across relayouts.
    pub fn build(&mut self, container: (f32, f32), config: &RippleConfig) -> Result<BuildOutcome> {
        if self.lifecycle != Lifecycle::Unbuilt {
            trace!(lifecycle = ?self.lifecycle, "ignoring build, already built");
            return Ok(BuildOutcome::AlreadyBuilt);
        }
        config.validate()?;

        let (width, height) = container;
        let Some(geometry) = Geometry::compute(width, height) else {
            debug!(width, height, "container not measurable, deferring build");
            return Ok(BuildOutcome::Deferred);
        };

        let duration_ms = f64::from(config.duration_ms);
        self.tracks = stagger_delays(config.duration_ms, config.ring_count)
            .into_iter()
            .enumerate()
            .map(|(index, delay)| RingTrack::new(index, delay, duration_ms, &geometry))
            .collect();
        self.geometry = Some(geometry);
        self.clock.reset();
        self.lifecycle = Lifecycle::Built;

        debug!(
            radius = geometry.radius,
            scale = geometry.scale,
            rings = self.tracks.len(),
            "built ripple tracks"
        );
        if !geometry.expands() {
            debug!(scale = geometry.scale, "rings will not visibly expand");
        }
        Ok(BuildOutcome::Built)
    }

    /// Shows every ring and starts the loop from time zero.
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Built {
            trace!(lifecycle = ?self.lifecycle, "ignoring start");
            return;
        }
        for track in &mut self.tracks {
            track.visible = true;
            track.current = None;
        }
        self.clock.reset();
        self.lifecycle = Lifecycle::Running;
        debug!(rings = self.tracks.len(), "ripple animation started");
    }

    /// Ends the loop at once, leaving each ring on its final frame.
    pub fn stop(&mut self) {
        if self.lifecycle != Lifecycle::Running {
            trace!(lifecycle = ?self.lifecycle, "ignoring stop");
            return;
        }
        for track in &mut self.tracks {
            track.settle();
        }
        self.lifecycle = Lifecycle::Built;
        debug!(elapsed_ms = self.clock.elapsed_ms, "ripple animation stopped");
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn tracks(&self) -> &[RingTrack] {
        &self.tracks
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed_ms
    }

    /// Host frame tick. Advances the loop and refreshes every ring's sample.
    pub fn advance(&mut self, delta_ms: f64) -> &[RingTrack] {
        if self.lifecycle == Lifecycle::Running {
            self.clock.advance(delta_ms);
            let elapsed = self.clock.elapsed_ms;
            for track in &mut self.tracks {
                track.current = track.sample(elapsed);
            }
        }
        &self.tracks
    }

    /// Samples every ring at `elapsed_ms` without touching scheduler state.
    pub fn sample_at(&self, elapsed_ms: f64) -> Vec<Option<RingSample>> {
        self.tracks
            .iter()
            .map(|track| track.sample(elapsed_ms))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, FillMode};

    fn config(rings: u32) -> RippleConfig {
        RippleConfig::new(Color(0xFF00_99CC), 2.0, 64.0).with_ring_count(rings)
    }

    fn built(rings: u32) -> RippleScheduler {
        let mut scheduler = RippleScheduler::new();
        let outcome = scheduler.build((700.0, 700.0), &config(rings)).unwrap();
        assert_eq!(outcome, BuildOutcome::Built);
        scheduler
    }

    #[test]
    fn stagger_is_even_and_within_one_cycle() {
        for rings in [1, 2, 3, 6, 7, 5000] {
            let delays = stagger_delays(3000, rings);
            let step = 3000.0 / f64::from(rings);

            assert_eq!(delays.len(), rings as usize);
            assert_eq!(delays[0], 0.0);
            for (i, delay) in delays.iter().enumerate() {
                assert!((delay - i as f64 * step).abs() < 1e-9);
                assert!(*delay < 3000.0);
            }
            assert!(delays.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn tracks_use_stagger_and_geometry() {
        let scheduler = built(6);
        let tracks = scheduler.tracks();

        assert_eq!(tracks.len(), 6);
        assert_eq!(tracks[3].start_delay_ms, 1500.0);
        assert!(tracks.iter().all(|track| !track.visible));
        assert_eq!(tracks[0].radius_range(), (100.0, 100.0 * (700.0 / 300.0)));
        assert_eq!((tracks[0].opacity.from, tracks[0].opacity.to), (1.0, 0.0));
    }

    #[test]
    fn build_is_idempotent() {
        let mut scheduler = built(4);
        let geometry = *scheduler.geometry().unwrap();

        let outcome = scheduler.build((200.0, 50.0), &config(9)).unwrap();
        assert_eq!(outcome, BuildOutcome::AlreadyBuilt);
        assert_eq!(scheduler.geometry(), Some(&geometry));
        assert_eq!(scheduler.tracks().len(), 4);

        scheduler.start();
        let outcome = scheduler.build((700.0, 700.0), &config(4)).unwrap();
        assert_eq!(outcome, BuildOutcome::AlreadyBuilt);
        assert!(scheduler.is_running());
    }

    #[test]
    fn degenerate_container_defers_build() {
        let mut scheduler = RippleScheduler::new();
        for size in [(0.0, 0.0), (0.0, 300.0), (300.0, -1.0)] {
            let outcome = scheduler.build(size, &config(6)).unwrap();
            assert_eq!(outcome, BuildOutcome::Deferred);
            assert_eq!(scheduler.lifecycle(), Lifecycle::Unbuilt);
            assert!(scheduler.geometry().is_none());
            assert!(scheduler.tracks().is_empty());
        }

        assert_eq!(
            scheduler.build((300.0, 300.0), &config(6)).unwrap(),
            BuildOutcome::Built
        );
    }

    #[test]
    fn invalid_config_fails_build() {
        let mut scheduler = RippleScheduler::new();
        assert!(scheduler.build((300.0, 300.0), &config(0)).is_err());
        assert_eq!(scheduler.lifecycle(), Lifecycle::Unbuilt);
    }

    #[test]
    fn running_flag_follows_start_and_stop() {
        let mut scheduler = RippleScheduler::new();
        assert!(!scheduler.is_running());

        scheduler.start();
        assert!(!scheduler.is_running(), "start before build is a no-op");

        let mut scheduler = built(3);
        assert!(!scheduler.is_running());
        scheduler.start();
        assert!(scheduler.is_running());
        scheduler.start();
        assert!(scheduler.is_running());
        scheduler.stop();
        assert!(!scheduler.is_running());
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.lifecycle(), Lifecycle::Built);
    }

    #[test]
    fn restart_after_stop_resumes() {
        for rings in [1, 6, 32] {
            let mut scheduler = built(rings);
            scheduler.start();
            scheduler.advance(1234.0);
            scheduler.stop();
            scheduler.start();

            assert!(scheduler.is_running());
            assert_eq!(scheduler.elapsed_ms(), 0.0);
            assert!(scheduler.tracks().iter().all(|track| track.visible));
            scheduler.advance(16.0);
            assert!(scheduler.tracks()[0].current.is_some());
        }
    }

    #[test]
    fn start_shows_every_ring() {
        let mut scheduler = built(6);
        scheduler.start();
        assert!(scheduler.tracks().iter().all(|track| track.visible));
    }

    #[test]
    fn advance_samples_only_started_rings() {
        let mut scheduler = built(6);
        scheduler.start();
        let tracks = scheduler.advance(500.0);

        assert!(tracks[0].current.is_some());
        assert!(tracks[1].current.is_some());
        assert!(tracks[2].current.is_none());
        assert_eq!(tracks[1].current.unwrap().opacity, 1.0);
        assert_eq!(tracks[1].current.unwrap().radius, 100.0);
    }

    #[test]
    fn advance_is_ignored_while_idle() {
        let mut scheduler = built(2);
        scheduler.advance(500.0);
        assert_eq!(scheduler.elapsed_ms(), 0.0);
        assert!(scheduler.tracks().iter().all(|track| track.current.is_none()));
    }

    #[test]
    fn frames_after_stop_do_not_move_rings() {
        let mut scheduler = built(6);
        scheduler.start();
        scheduler.advance(1750.0);
        scheduler.stop();

        let elapsed = scheduler.elapsed_ms();
        let settled: Vec<Option<RingSample>> =
            scheduler.tracks().iter().map(|track| track.current).collect();

        scheduler.advance(16.0);
        scheduler.advance(900.0);

        assert_eq!(scheduler.elapsed_ms(), elapsed);
        let after: Vec<Option<RingSample>> =
            scheduler.tracks().iter().map(|track| track.current).collect();
        assert_eq!(after, settled);
        assert!(after.iter().all(|sample| sample.unwrap().opacity == 0.0));
    }

    #[test]
    fn rejects_oversized_ring_count_before_allocating() {
        let mut scheduler = RippleScheduler::new();
        assert!(scheduler.build((700.0, 700.0), &config(u32::MAX)).is_err());
        assert!(scheduler.tracks().is_empty());
        assert_eq!(scheduler.lifecycle(), Lifecycle::Unbuilt);
    }

    #[test]
    fn rings_expand_and_fade_over_a_cycle() {
        let scheduler = built(1);
        let track = &scheduler.tracks()[0];
        let (min, max) = track.radius_range();

        let start = track.sample(0.0).unwrap();
        let middle = track.sample(1500.0).unwrap();
        let late = track.sample(2999.0).unwrap();

        assert_eq!(start, RingSample { radius: min, opacity: 1.0 });
        assert!(middle.radius > start.radius && middle.radius < max);
        assert!(middle.opacity < 1.0 && middle.opacity > 0.0);
        assert!(late.radius > middle.radius);
        assert!(late.opacity < middle.opacity);

        // Ease-out: more than half the growth happens in the first half.
        assert!(middle.radius - min > (max - min) * 0.5);
    }

    #[test]
    fn staggered_rings_form_a_wave() {
        let scheduler = built(6);
        let samples = scheduler.sample_at(2900.0);

        assert!(samples.iter().all(Option::is_some));
        let radii: Vec<f32> = samples.iter().map(|s| s.unwrap().radius).collect();
        // Rings that started earlier are further out.
        assert!(radii.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn stop_settles_rings_on_final_frame() {
        let mut scheduler = built(3);
        scheduler.start();
        scheduler.advance(100.0);
        scheduler.stop();

        for track in scheduler.tracks() {
            let settled = track.current.unwrap();
            assert_eq!(settled.opacity, 0.0);
            assert_eq!(settled.radius, track.radius_range().1);
        }
    }

    #[test]
    fn filled_config_builds_same_schedule() {
        let mut filled = RippleScheduler::new();
        let mut stroked = RippleScheduler::new();
        filled.build((400.0, 400.0), &config(6)).unwrap();
        stroked
            .build((400.0, 400.0), &config(6).with_fill_mode(FillMode::Stroked))
            .unwrap();

        assert_eq!(filled.geometry(), stroked.geometry());
        assert_eq!(filled.sample_at(750.0), stroked.sample_at(750.0));
    }
}
