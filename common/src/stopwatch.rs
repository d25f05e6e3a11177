use crate::{CommonError, MonotonicClock, SystemClock, TimeUnit};
use std::time::Duration;

/// High resolution elapsed time accumulator.
///
/// The accumulator has no notion of "running". Every call to [`Accumulator::tick`]
/// adds the time passed since the previous tick (or since construction / the
/// last [`Accumulator::reset`]) to the running total. Callers that want to pause
/// simply stop ticking.
///
/// All bookkeeping is done in integer nanoseconds, conversion to floating
/// point happens only when reading.
#[derive(Debug)]
pub struct Accumulator<C: MonotonicClock = SystemClock> {
    clock: C,
    elapsed_total: u64,
    last_delta: u64,
    reference_instant: u64,
}

impl Accumulator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::default())
    }
}

impl Default for Accumulator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MonotonicClock> Accumulator<C> {
    pub fn with_clock(clock: C) -> Self {
        let reference_instant = clock.now_nanos();
        Accumulator {
            clock,
            elapsed_total: 0,
            last_delta: 0,
            reference_instant,
        }
    }

    /// Measure the time since the previous tick and add it to the total
    pub fn tick(&mut self) {
        let now = self.clock.now_nanos();
        let delta = now.saturating_sub(self.reference_instant);
        self.last_delta = delta;
        self.reference_instant = self.reference_instant.max(now);
        self.elapsed_total = self.elapsed_total.saturating_add(delta);
        tracing::trace!(
            "tick: delta {}ns, total {}ns",
            self.last_delta,
            self.elapsed_total
        );
    }

    /// Return the total elapsed time in `unit`, e.g. "ms" or "min"
    pub fn elapsed(&self, unit: &str) -> Result<f64, CommonError> {
        let unit: TimeUnit = unit.parse()?;
        Ok(self.elapsed_in(unit))
    }

    /// Return the total elapsed time in `unit`
    pub fn elapsed_in(&self, unit: TimeUnit) -> f64 {
        unit.convert(self.elapsed_total)
    }

    /// Zero the counters and take "now" as the new reference point
    pub fn reset(&mut self) {
        self.elapsed_total = 0;
        self.last_delta = 0;
        self.reference_instant = self.clock.now_nanos();
        tracing::debug!("accumulator reset");
    }

    pub fn elapsed_nanos(&self) -> u64 {
        self.elapsed_total
    }

    pub fn elapsed_duration(&self) -> Duration {
        Duration::from_nanos(self.elapsed_total)
    }

    pub fn last_delta_nanos(&self) -> u64 {
        self.last_delta
    }

    pub fn last_delta(&self) -> Duration {
        Duration::from_nanos(self.last_delta)
    }

    pub fn reference_nanos(&self) -> u64 {
        self.reference_instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use std::cell::Cell;
    use test_case::test_case;

    fn accumulator() -> (Accumulator<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        (Accumulator::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_new_accumulator_is_zero() {
        let (acc, _clock) = accumulator();
        assert_eq!(acc.elapsed_nanos(), 0);
        assert_eq!(acc.last_delta_nanos(), 0);
        assert_eq!(acc.elapsed("ns").unwrap(), 0.0);
    }

    #[test]
    fn test_ticks_sum_deltas() {
        let (mut acc, clock) = accumulator();
        let deltas = [5u64, 0, 1_000, 16_000_000, 3, 999_999_999];
        let mut expected = 0u64;
        let mut prev_total = 0u64;
        for delta in deltas {
            clock.advance_nanos(delta);
            acc.tick();
            expected += delta;
            assert_eq!(acc.last_delta_nanos(), delta);
            assert_eq!(acc.elapsed_nanos(), expected);
            assert!(acc.elapsed_nanos() >= prev_total);
            assert_eq!(acc.reference_nanos(), clock.now_nanos());
            prev_total = acc.elapsed_nanos();
        }
    }

    #[test]
    fn test_time_before_tick_is_not_visible() {
        let (mut acc, clock) = accumulator();
        clock.advance_nanos(100);
        assert_eq!(acc.elapsed_nanos(), 0);
        acc.tick();
        assert_eq!(acc.elapsed_nanos(), 100);
    }

    #[test]
    fn test_one_hour_conversions() {
        let (mut acc, clock) = accumulator();
        clock.advance_nanos(3_600_000_000_000);
        acc.tick();
        assert_eq!(acc.elapsed_nanos(), 3_600_000_000_000);
        assert_eq!(acc.elapsed("h").unwrap(), 1.0);
        assert_eq!(acc.elapsed("min").unwrap(), 60.0);
        assert_eq!(acc.elapsed("s").unwrap(), 3600.0);
        assert_eq!(acc.elapsed_duration(), Duration::from_secs(3600));
    }

    #[test_case("ns", 1.0; "ns")]
    #[test_case("us", 1_000.0; "us")]
    #[test_case("ms", 1_000_000.0; "ms")]
    #[test_case("s", 1_000_000_000.0; "s")]
    #[test_case("min", 60_000_000_000.0; "min")]
    #[test_case("h", 3_600_000_000_000.0; "h")]
    #[test_case("d", 86_400_000_000_000.0; "d")]
    fn test_elapsed_matches_factor(unit: &str, factor: f64) {
        let (mut acc, clock) = accumulator();
        clock.advance_nanos(123_456_789_012);
        acc.tick();
        let expected = 123_456_789_012f64 / factor;
        let value = acc.elapsed(unit).unwrap();
        assert!((value - expected).abs() <= expected.abs() * f64::EPSILON);
    }

    #[test_case("sec"; "sec")]
    #[test_case("hours"; "hours")]
    #[test_case(""; "empty")]
    fn test_elapsed_unknown_unit(unit: &str) {
        let (acc, _clock) = accumulator();
        let err = acc.elapsed(unit).unwrap_err();
        assert!(err.is_unknown_unit(unit));
    }

    #[test]
    fn test_elapsed_is_idempotent() {
        let (mut acc, clock) = accumulator();
        clock.advance_nanos(42_000);
        acc.tick();
        clock.advance_nanos(1_000_000);
        let first = acc.elapsed("us").unwrap();
        let second = acc.elapsed("us").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 42.0);
    }

    #[test]
    fn test_reset() {
        let (mut acc, clock) = accumulator();
        clock.advance_nanos(10_000);
        acc.tick();
        clock.advance_nanos(500);
        acc.reset();
        assert_eq!(acc.elapsed_nanos(), 0);
        assert_eq!(acc.last_delta_nanos(), 0);
        assert_eq!(acc.elapsed("ns").unwrap(), 0.0);
        assert_eq!(acc.reference_nanos(), clock.now_nanos());

        // counting restarts from the reset point
        clock.advance_nanos(7);
        acc.tick();
        assert_eq!(acc.elapsed_nanos(), 7);
    }

    /// Clock whose reading can be moved anywhere, including backwards
    struct SteppingClock {
        now: Cell<u64>,
    }

    impl MonotonicClock for &SteppingClock {
        fn now_nanos(&self) -> u64 {
            self.now.get()
        }
    }

    #[test]
    fn test_clock_going_backwards() {
        let clock = SteppingClock { now: Cell::new(0) };
        let mut acc = Accumulator::with_clock(&clock);
        clock.now.set(1_000);
        acc.tick();
        assert_eq!(acc.elapsed_nanos(), 1_000);

        clock.now.set(400);
        acc.tick();
        assert_eq!(acc.last_delta_nanos(), 0);
        assert_eq!(acc.elapsed_nanos(), 1_000);
        assert_eq!(acc.reference_nanos(), 1_000);

        // measuring resumes once the clock passes the reference point again
        clock.now.set(1_250);
        acc.tick();
        assert_eq!(acc.last_delta_nanos(), 250);
        assert_eq!(acc.elapsed_nanos(), 1_250);
    }

    #[test]
    fn test_system_clock_accumulates() {
        let mut acc = Accumulator::new();
        let mut prev = 0;
        for _ in 0..100 {
            acc.tick();
            assert!(acc.elapsed_nanos() >= prev);
            prev = acc.elapsed_nanos();
        }
    }
}
