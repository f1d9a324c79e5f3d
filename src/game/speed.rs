use std::time::Duration;

use super::config::GameConfig;

/// Tick interval of the game loop
///
/// Starts at the base interval and shrinks by a fixed step per food eaten,
/// never dropping below the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed {
    interval: Duration,
    base: Duration,
    step: Duration,
    min: Duration,
}

impl Speed {
    pub fn new(base: Duration, step: Duration, min: Duration) -> Self {
        Self {
            interval: base.max(min),
            base,
            step,
            min,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.base_tick(), config.tick_step(), config.min_tick())
    }

    /// Current tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Shorten the interval by one step, floored at the minimum
    ///
    /// Returns true if the interval actually changed.
    pub fn accelerate(&mut self) -> bool {
        let next = self.interval.saturating_sub(self.step).max(self.min);
        let changed = next != self.interval;
        self.interval = next;
        changed
    }

    pub fn reset(&mut self) {
        self.interval = self.base.max(self.min);
    }

    pub fn is_at_minimum(&self) -> bool {
        self.interval == self.min
    }

    /// Number of steps taken from the base interval, for display
    pub fn level(&self) -> u32 {
        if self.step.is_zero() {
            return 0;
        }
        let gained = self.base.saturating_sub(self.interval);
        (gained.as_nanos() / self.step.as_nanos()) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_speed() -> Speed {
        Speed::from_config(&GameConfig::default())
    }

    #[test]
    fn test_starts_at_base() {
        let speed = default_speed();
        assert_eq!(speed.interval(), Duration::from_millis(150));
        assert_eq!(speed.level(), 0);
    }

    #[test]
    fn test_accelerate_by_step() {
        let mut speed = default_speed();
        assert!(speed.accelerate());
        assert_eq!(speed.interval(), Duration::from_millis(148));
        assert!(speed.accelerate());
        assert_eq!(speed.interval(), Duration::from_millis(146));
        assert_eq!(speed.level(), 2);
    }

    #[test]
    fn test_floor_at_minimum() {
        let mut speed = default_speed();
        for _ in 0..50 {
            speed.accelerate();
        }
        assert_eq!(speed.interval(), Duration::from_millis(50));
        assert!(speed.is_at_minimum());

        let mut previous = speed.interval();
        for _ in 0..10 {
            assert!(!speed.accelerate());
            assert!(speed.interval() <= previous);
            assert_eq!(speed.interval(), Duration::from_millis(50));
            previous = speed.interval();
        }
    }

    #[test]
    fn test_floor_with_uneven_step() {
        let mut speed = Speed::new(
            Duration::from_millis(55),
            Duration::from_millis(3),
            Duration::from_millis(50),
        );
        speed.accelerate();
        assert_eq!(speed.interval(), Duration::from_millis(52));
        speed.accelerate();
        assert_eq!(speed.interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_reset() {
        let mut speed = default_speed();
        speed.accelerate();
        speed.reset();
        assert_eq!(speed.interval(), Duration::from_millis(150));
    }
}
