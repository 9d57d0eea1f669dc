//! Shared test infrastructure for signal-recall integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use signal_recall::{
    GameEffects, Level, LevelCatalog, RecallGame, Signal, SignalSource, TimeDuration, TimeInstant,
    TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

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

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: std::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: std::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Recording Effects Port
// ============================================================================

/// One recorded effect invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Signal(Signal),
    LevelAdvanced(u16),
    RunWon(u32),
    RunLost(u32),
}

/// Effects implementation that records every invocation.
///
/// Clones share the same log, so tests keep one handle and move the other
/// into the game.
#[derive(Clone, Default)]
pub struct EffectLog {
    events: Rc<RefCell<Vec<Effect>>>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Effect> {
        self.events.borrow().clone()
    }

    /// Only the signal-emit effects, in order
    pub fn signals(&self) -> Vec<Signal> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Effect::Signal(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn contains(&self, effect: Effect) -> bool {
        self.events.borrow().contains(&effect)
    }
}

impl GameEffects for EffectLog {
    fn signal(&mut self, signal: Signal) {
        self.events.borrow_mut().push(Effect::Signal(signal));
    }

    fn level_advanced(&mut self, level: &Level) {
        self.events
            .borrow_mut()
            .push(Effect::LevelAdvanced(level.ordinal));
    }

    fn run_won(&mut self, final_score: u32) {
        self.events.borrow_mut().push(Effect::RunWon(final_score));
    }

    fn run_lost(&mut self, final_score: u32) {
        self.events.borrow_mut().push(Effect::RunLost(final_score));
    }
}

// ============================================================================
// Scripted Signal Source
// ============================================================================

/// Signal source that cycles through a fixed script, for deterministic
/// sequence contents.
pub struct ScriptedSignals {
    script: Vec<Signal>,
    next: usize,
}

impl ScriptedSignals {
    pub fn new(script: &[Signal]) -> Self {
        assert!(!script.is_empty());
        Self {
            script: script.to_vec(),
            next: 0,
        }
    }
}

impl SignalSource for ScriptedSignals {
    fn next_signal(&mut self) -> Signal {
        let signal = self.script[self.next % self.script.len()];
        self.next += 1;
        signal
    }
}

// ============================================================================
// Standard Fixtures
// ============================================================================

/// Three-level catalog used by most game tests
pub const LEVELS: [Level; 3] = [
    Level::new(1, 3, 800),
    Level::new(2, 4, 650),
    Level::new(3, 5, 500),
];

/// Game type used by most tests: plenty of sequence capacity
pub type TestGame<'t, 'c> =
    RecallGame<'t, 'c, TestInstant, EffectLog, MockTimeSource, ScriptedSignals, 16>;

pub fn catalog() -> LevelCatalog<'static> {
    LevelCatalog::new(&LEVELS).unwrap()
}

/// Builds a game with the standard catalog and the given signal script
pub fn game_with_script<'t>(
    timer: &'t MockTimeSource,
    log: EffectLog,
    script: &[Signal],
) -> TestGame<'t, 'static> {
    RecallGame::new(log, timer, ScriptedSignals::new(script), catalog())
}

/// Services the game until playback finishes, advancing time by
/// `step_ms` per tick
pub fn finish_playback(game: &mut TestGame<'_, '_>, timer: &MockTimeSource, step_ms: u64) {
    let mut guard = 0;
    while game.is_playing_back() {
        timer.advance(step_ms);
        game.service();
        guard += 1;
        assert!(guard < 1000, "playback never completed");
    }
}

/// Submits every signal of the current sequence in order
pub fn submit_whole_sequence(game: &mut TestGame<'_, '_>) {
    for signal in game.sequence().to_vec() {
        game.submit(signal);
    }
}
