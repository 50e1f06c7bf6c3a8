use std::time::Instant;

/// Frame timing context: turns wall-clock ticks into `dt` seconds.
///
/// The first tick yields `0.0` so the opening frame never moves anything.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick.
    #[inline]
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let dt = self
            .last
            .map_or(0.0, |prev| now.saturating_duration_since(prev).as_secs_f64());
        self.last = Some(now);
        dt
    }
}
