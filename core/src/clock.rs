//! Autosave clock — accumulates elapsed time and reports how many
//! whole save periods have passed.

use std::time::Duration;

/// Shortest autosave period the clock accepts.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveClock {
    pub period:  Duration,
    accumulated: Duration,
    pub fired:   u64,
    pub paused:  bool,
}

impl AutosaveClock {
    /// A clock with the given period, starting paused.
    /// Periods shorter than `MIN_PERIOD` (including zero) are raised to it.
    pub fn new(period: Duration) -> Self {
        let period = if period < MIN_PERIOD {
            log::warn!("autosave period {period:?} too short, using {MIN_PERIOD:?}");
            MIN_PERIOD
        } else {
            period
        };
        Self {
            period,
            accumulated: Duration::ZERO,
            fired: 0,
            paused: true,
        }
    }

    /// Feed elapsed time. Returns how many whole periods came due.
    /// While paused, time does not accumulate.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        if self.paused {
            return 0;
        }
        let total = self.accumulated.saturating_add(elapsed).as_nanos();
        let period = self.period.as_nanos();
        let remainder = total % period;
        self.accumulated = Duration::new(
            (remainder / NANOS_PER_SEC) as u64,
            (remainder % NANOS_PER_SEC) as u32,
        );
        let due = u64::try_from(total / period).unwrap_or(u64::MAX);
        self.fired = self.fired.saturating_add(due);
        due
    }

    /// Time left until the next tick.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulated)
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_whole_period() {
        let mut clock = AutosaveClock::new(Duration::from_secs(5));
        clock.resume();
        assert_eq!(clock.advance(Duration::from_secs(4)), 0);
        assert_eq!(clock.advance(Duration::from_secs(1)), 1);
        assert_eq!(clock.advance(Duration::from_secs(12)), 2);
        assert_eq!(clock.until_next(), Duration::from_secs(3));
        assert_eq!(clock.fired, 3);
    }

    #[test]
    fn paused_clock_ignores_time() {
        let mut clock = AutosaveClock::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_secs(1)), 0);
        clock.resume();
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
    }

    #[test]
    fn huge_elapsed_is_counted_not_looped() {
        let mut clock = AutosaveClock::new(Duration::from_secs(5));
        clock.resume();
        assert_eq!(clock.advance(Duration::from_secs(86_400)), 17_280);

        let due = clock.advance(Duration::from_millis(u64::MAX));
        assert_eq!(due, u64::MAX / 5_000);
        assert_eq!(clock.until_next(), Duration::from_millis(5_000 - u64::MAX % 5_000));
    }

    #[test]
    fn zero_period_is_raised_to_minimum() {
        let mut clock = AutosaveClock::new(Duration::ZERO);
        assert_eq!(clock.period, MIN_PERIOD);
        clock.resume();
        assert_eq!(clock.advance(Duration::from_millis(3)), 3);
    }
}
