use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Sum of all clamped deltas so far, in seconds.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Number of ticks before this one.
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots for a render loop.
///
/// Delta time is clamped so a stalled or minimized window does not hand the
/// simulation a multi-second step, and a tight loop never sees zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        Self::starting_at(Instant::now(), dt_min, dt_max)
    }

    fn starting_at(start: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: start,
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Moves the baseline to now without producing a frame.
    ///
    /// Used when the loop resumes after suspension so the gap is not counted.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.elapsed += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
