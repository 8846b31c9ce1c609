use std::time::{Duration, Instant};

/// A frame-driven timer.
///
/// The clock starts on the first [`tick`](Self::tick) after creation, so a
/// value set between frames is always visible for the full duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    started: Option<Instant>,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: None,
        }
    }

    /// Advances the timer and returns `true` once it has run out.
    pub fn tick(&mut self, now: Instant) -> bool {
        let started = *self.started.get_or_insert(now);
        now.saturating_duration_since(started) >= self.duration
    }
}
