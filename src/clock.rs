//! Frame clock with a delta-time spike guard
//!
//! One invocation per display refresh: `dt = min(now - last, max_delta)`.
//! A tab switch or GC pause otherwise shows up as one giant delta that
//! teleports every entity; the clamp turns it into a single slow frame.
//! The clock always advances even while the run is paused at a menu, so
//! resuming never produces a catch-up burst.

/// Computes clamped per-frame deltas from a monotonic millisecond timestamp.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_delta_ms: f32,
}

impl FrameClock {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last: None,
            max_delta_ms,
        }
    }

    /// Advance the clock to `now_ms` and return the clamped delta in ms.
    /// The first call returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        self.last = Some(now_ms);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new(34.0);
        assert_eq!(clock.tick(1000.0), 0.0);
    }

    #[test]
    fn test_normal_delta() {
        let mut clock = FrameClock::new(34.0);
        clock.tick(1000.0);
        assert!((clock.tick(1016.7) - 16.7).abs() < 0.01);
    }

    #[test]
    fn test_spike_is_clamped() {
        let mut clock = FrameClock::new(34.0);
        clock.tick(1000.0);
        // 5 second stall collapses into one max-length frame
        assert_eq!(clock.tick(6000.0), 34.0);
        // and the clock still advanced, so the next frame is normal
        assert!((clock.tick(6016.0) - 16.0).abs() < 0.01);
    }

    #[test]
    fn test_backwards_time_yields_zero() {
        let mut clock = FrameClock::new(34.0);
        clock.tick(1000.0);
        assert_eq!(clock.tick(900.0), 0.0);
    }
}
