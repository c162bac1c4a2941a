/// Seconds between water ticks unless configured otherwise.
pub const DEFAULT_TICK_INTERVAL: f32 = 0.1;

/// Fixed-interval trigger driven by frame time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaterClock {
    pub interval: f32,
    pub accumulated: f32,
}

impl Default for WaterClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl WaterClock {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    /// Adds `dt` seconds and reports whether a tick is due. Fires at most
    /// once per call; leftover time carries over, capped at one interval.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt > 0.0 {
            self.accumulated += dt;
        }
        if self.accumulated >= self.interval {
            self.accumulated = (self.accumulated - self.interval).min(self.interval);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut clock = WaterClock::new(0.1);
        assert!(!clock.advance(0.04));
        assert!(!clock.advance(0.04));
        assert!(clock.advance(0.04));
        assert!(!clock.advance(0.0));
    }

    #[test]
    fn long_frame_fires_once() {
        let mut clock = WaterClock::new(0.1);
        assert!(clock.advance(1.0));
        // carry is capped at one interval
        assert!(clock.advance(0.0));
        assert!(!clock.advance(0.0));
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut clock = WaterClock::default();
        assert!(!clock.advance(-5.0));
        assert_eq!(clock.accumulated, 0.0);
    }
}
