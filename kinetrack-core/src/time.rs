//! Time handling for the pipeline
//!
//! Timestamps come from the sensor events themselves, so the pipeline never
//! reads a clock on its own. [`TickGate`] turns a sample-driven stream into a
//! rate-limited tick stream.

/// Timestamp in milliseconds (sensor event time, monotonic within a session)
pub type Timestamp = u64;

/// Rate limiter that opens at most once per interval
///
/// The first call to [`TickGate::try_tick`] always opens. After that the gate
/// opens again only once `interval_ms` has passed since the last opening.
/// Timestamps that go backwards (sensor clock reset) never open the gate
/// until time catches up again.
#[derive(Debug, Clone)]
pub struct TickGate {
    interval_ms: u64,
    last_tick: Option<Timestamp>,
}

impl TickGate {
    /// Create gate with minimum spacing between ticks
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_tick: None,
        }
    }

    /// Try to open the gate at `now`.
    ///
    /// Returns the elapsed milliseconds since the previous tick when it opens.
    /// The first tick reports the nominal interval.
    pub fn try_tick(&mut self, now: Timestamp) -> Option<u64> {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                Some(self.interval_ms)
            }
            Some(last) => {
                let elapsed = now.saturating_sub(last);
                if now >= last && elapsed >= self.interval_ms {
                    self.last_tick = Some(now);
                    Some(elapsed)
                } else {
                    None
                }
            }
        }
    }

    /// Time of the last opening
    pub fn last_tick(&self) -> Option<Timestamp> {
        self.last_tick
    }

    /// Configured interval
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Forget the last tick; the next call opens immediately
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_always_opens() {
        let mut gate = TickGate::new(1000);
        assert_eq!(gate.try_tick(5_000), Some(1000));
        assert_eq!(gate.last_tick(), Some(5_000));
    }

    #[test]
    fn rate_limited() {
        let mut gate = TickGate::new(1000);
        assert!(gate.try_tick(0).is_some());

        // 50 Hz samples inside the first second are absorbed
        for t in (20..1000).step_by(20) {
            assert!(gate.try_tick(t).is_none());
        }

        assert_eq!(gate.try_tick(1000), Some(1000));
        assert_eq!(gate.try_tick(2300), Some(1300));
    }

    #[test]
    fn backwards_time_does_not_tick() {
        let mut gate = TickGate::new(1000);
        gate.try_tick(10_000);
        assert!(gate.try_tick(500).is_none());
        assert_eq!(gate.last_tick(), Some(10_000));
    }

    #[test]
    fn reset_reopens() {
        let mut gate = TickGate::new(1000);
        gate.try_tick(0);
        gate.reset();
        assert_eq!(gate.try_tick(10), Some(1000));
    }
}
