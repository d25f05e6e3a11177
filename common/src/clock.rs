use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of monotonic nanosecond readings. Successive calls never return a
/// smaller value
pub trait MonotonicClock {
    fn now_nanos(&self) -> u64;
}

/// Monotonic clock backed by `std::time::Instant`. Readings are nanoseconds
/// since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl MonotonicClock for SystemClock {
    fn now_nanos(&self) -> u64 {
        self.origin
            .elapsed()
            .as_nanos()
            .try_into()
            .unwrap_or(u64::MAX)
    }
}

/// A clock that only moves when told to. Clones share the same reading
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.advance_nanos(by.as_nanos().try_into().unwrap_or(u64::MAX));
    }

    pub fn advance_nanos(&self, nanos: u64) {
        let _ = self
            .now
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |now| {
                Some(now.saturating_add(nanos))
            });
    }
}

impl MonotonicClock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::default();
        let mut prev = clock.now_nanos();
        for _ in 0..1000 {
            let now = clock.now_nanos();
            assert!(now >= prev);
            prev = now;
        }
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::default();
        let other = clock.clone();
        clock.advance(Duration::from_millis(5));
        other.advance_nanos(1);
        assert_eq!(clock.now_nanos(), 5_000_001);
        assert_eq!(other.now_nanos(), 5_000_001);
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::default();
        clock.advance_nanos(u64::MAX);
        clock.advance_nanos(10);
        assert_eq!(clock.now_nanos(), u64::MAX);
    }
}
