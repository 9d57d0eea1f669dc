//! Time abstraction traits for platform-agnostic timing.
//!
//! The game core never sleeps or blocks. The host drives it by calling
//! service methods at its own tick rate (e.g. once per rendered frame) and
//! the core reads the current instant from a [`TimeSource`]. Tick spacing
//! may be irregular; all timing decisions are made from elapsed durations,
//! never from an assumed frame length.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant. Must be monotonic.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Returns `ZERO` when `earlier` is not actually earlier (saturating).
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// An epoch-tagged one-shot deadline.
///
/// The game schedules at most one of these at a time (the inter-round
/// pause). The epoch is the value of the game's run counter at scheduling
/// time; a deadline whose epoch no longer matches belongs to a superseded
/// round and must be discarded without firing.
#[derive(Debug, Clone, Copy)]
pub struct Scheduled<I: TimeInstant> {
    at: I,
    epoch: u32,
}

impl<I: TimeInstant> Scheduled<I> {
    /// Creates a deadline `delay_ms` after `now`, tagged with `epoch`.
    ///
    /// On instant overflow the deadline degrades to `now` (fires on the
    /// next service call) rather than wrapping.
    pub fn after(now: I, delay_ms: u64, epoch: u32) -> Self {
        let delay = I::Duration::from_millis(delay_ms);
        Self {
            at: now.checked_add(delay).unwrap_or(now),
            epoch,
        }
    }

    /// Returns true if this deadline has elapsed and still belongs to the
    /// given epoch.
    pub fn is_due(&self, now: I, current_epoch: u32) -> bool {
        self.epoch == current_epoch && self.at.duration_since(now).as_millis() == 0
    }

    /// Returns true if this deadline was scheduled by a superseded epoch.
    pub fn is_stale(&self, current_epoch: u32) -> bool {
        self.epoch != current_epoch
    }

    /// Time remaining until the deadline, ZERO if already due.
    pub fn remaining(&self, now: I) -> I::Duration {
        self.at.duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TestDuration(u64);

    impl TimeDuration for TestDuration {
        const ZERO: Self = TestDuration(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            TestDuration(millis)
        }

        fn saturating_sub(self, other: Self) -> Self {
            TestDuration(self.0.saturating_sub(other.0))
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TestInstant(u64);

    impl TimeInstant for TestInstant {
        type Duration = TestDuration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            TestDuration(self.0.saturating_sub(earlier.0))
        }

        fn checked_add(self, duration: Self::Duration) -> Option<Self> {
            self.0.checked_add(duration.0).map(TestInstant)
        }
    }

    #[test]
    fn deadline_fires_at_or_after_its_instant() {
        let deadline = Scheduled::after(TestInstant(100), 650, 1);
        assert!(!deadline.is_due(TestInstant(100), 1));
        assert!(!deadline.is_due(TestInstant(749), 1));
        assert!(deadline.is_due(TestInstant(750), 1));
        assert!(deadline.is_due(TestInstant(9999), 1));
    }

    #[test]
    fn deadline_from_another_epoch_never_fires() {
        let deadline = Scheduled::after(TestInstant(100), 650, 1);
        assert!(!deadline.is_due(TestInstant(9999), 2));
        assert!(deadline.is_stale(2));
        assert!(!deadline.is_stale(1));
    }

    #[test]
    fn remaining_counts_down_and_saturates() {
        let deadline = Scheduled::after(TestInstant(0), 650, 0);
        assert_eq!(deadline.remaining(TestInstant(0)), TestDuration(650));
        assert_eq!(deadline.remaining(TestInstant(400)), TestDuration(250));
        assert_eq!(deadline.remaining(TestInstant(651)), TestDuration(0));
    }

    #[test]
    fn instant_overflow_degrades_to_immediate() {
        let deadline = Scheduled::after(TestInstant(u64::MAX), 650, 0);
        assert!(deadline.is_due(TestInstant(u64::MAX), 0));
    }
}
