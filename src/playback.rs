//! Timed sequence playback engine.
//!
//! [`Playback`] steps through a sequence one signal at a time, paced by
//! elapsed wall time rather than tick count, so irregular host tick spacing
//! never reorders or double-fires emissions. The engine does not hold the
//! sequence itself; it tracks indices and timing, and the caller maps
//! [`PlaybackEvent::Emit`] indices to actual signals. This keeps one owner
//! for the sequence (the game controller) and makes replay trivially
//! non-mutating.

use crate::MIN_STEP_INTERVAL_MS;
use crate::time::{TimeDuration, TimeInstant};

/// Result of servicing a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackEvent {
    /// Not enough time has elapsed; nothing to do yet.
    Waiting,

    /// Emit the signal at this sequence index now.
    Emit(usize),

    /// Playback finished. Returned exactly once, after the final signal's
    /// interval has elapsed; subsequent service calls return `Waiting`.
    Complete,
}

/// Plays a sequence of `len` signals at a fixed interval.
///
/// At most one signal is emitted per [`service`](Playback::service) call,
/// strictly in index order. The requested interval is clamped up to
/// [`MIN_STEP_INTERVAL_MS`] so no level is unplayably fast.
#[derive(Debug, Clone, Copy)]
pub struct Playback<I: TimeInstant> {
    len: usize,
    interval: I::Duration,
    next_index: usize,
    last_emit: Option<I>,
    finished: bool,
}

impl<I: TimeInstant> Playback<I> {
    /// Creates a playback for a sequence of `len` signals.
    pub fn new(len: usize, step_interval_ms: u64) -> Self {
        Self {
            len,
            interval: I::Duration::from_millis(step_interval_ms.max(MIN_STEP_INTERVAL_MS)),
            next_index: 0,
            last_emit: None,
            finished: false,
        }
    }

    /// Advances the playback to instant `now`.
    ///
    /// The first call emits index 0 immediately. Each later emit waits for
    /// the full interval since the previous one, including the completion
    /// event, which fires only after the final signal has been visible for
    /// its interval.
    pub fn service(&mut self, now: I) -> PlaybackEvent {
        if self.finished {
            return PlaybackEvent::Waiting;
        }

        let Some(last_emit) = self.last_emit else {
            // Degenerate empty sequence: nothing to emit, complete at once.
            if self.len == 0 {
                self.finished = true;
                return PlaybackEvent::Complete;
            }
            self.last_emit = Some(now);
            self.next_index = 1;
            return PlaybackEvent::Emit(0);
        };

        let elapsed = now.duration_since(last_emit);
        if elapsed.as_millis() < self.interval.as_millis() {
            return PlaybackEvent::Waiting;
        }

        if self.next_index < self.len {
            let index = self.next_index;
            self.next_index += 1;
            self.last_emit = Some(now);
            PlaybackEvent::Emit(index)
        } else {
            self.finished = true;
            PlaybackEvent::Complete
        }
    }

    /// Time until the next emit (or completion) would fire, ZERO if due.
    pub fn remaining(&self, now: I) -> I::Duration {
        match self.last_emit {
            None => I::Duration::ZERO,
            Some(last_emit) => self
                .interval
                .saturating_sub(now.duration_since(last_emit)),
        }
    }

    /// True once `Complete` has been returned.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
