//! Round state machine for the memory-sequence game.
//!
//! Provides [`RecallGame`] which owns all game state (screen, score, level,
//! sequence, input cursor) and orchestrates sequence playback and player
//! input validation. Also defines the [`GameEffects`] trait through which
//! the core reaches its presentation collaborators.
//!
//! The controller is poll-driven: the host delivers player events through
//! [`submit`](RecallGame::submit) / [`replay`](RecallGame::replay) and calls
//! [`service`](RecallGame::service) at its tick rate to advance playback
//! and scheduled pauses. Nothing blocks.

use heapless::Vec;

use crate::command::GameCommand;
use crate::level::{Level, LevelCatalog};
use crate::playback::{Playback, PlaybackEvent};
use crate::signal::{Signal, SignalSource};
use crate::time::{Scheduled, TimeInstant, TimeSource};
use crate::{ADVANCE_PAUSE_MS, ROUND_SCORE_BONUS};

/// Trait for the presentation-layer effects the core invokes.
///
/// Implementations render pads, play tones, show scores. They are called
/// from within game transitions and must not block; handle any rendering
/// errors internally - these methods cannot fail.
pub trait GameEffects {
    /// A signal should be presented (pad flash, tone).
    ///
    /// Fired once per sequence element during playback, in order, and once
    /// for every accepted player submission regardless of correctness.
    fn signal(&mut self, signal: Signal);

    /// A round was completed on a non-final level; the run continues at
    /// `level` after a short pause.
    fn level_advanced(&mut self, level: &Level);

    /// The final level was completed. The run is over; `final_score` is the
    /// score to display.
    fn run_won(&mut self, final_score: u32);

    /// The player mismatched a signal. The run is over; implementations
    /// typically play failure feedback alongside the final score.
    fn run_lost(&mut self, final_score: u32);
}

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Menu,
    LevelSelect,
    Playing,
    GameOver,
    Victory,
}

/// Sub-mode within the `Playing` screen.
///
/// One enum instead of independent `is_playing_back`/`accepting_input`
/// flags, so the machine acting and the player acting are mutually
/// exclusive by construction. `Idle` covers non-Playing screens and the
/// inter-round pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Neither playback nor input is active.
    Idle,
    /// The engine is playing the sequence; player input is discarded.
    PlayingBack,
    /// Waiting on the player to reproduce the sequence.
    AcceptingInput,
}

/// Timing information returned by service operations.
///
/// Indicates when the game needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Nothing is scheduled; service again after the next player event or
    /// navigation call.
    Idle,

    /// A playback emit or scheduled pause is pending. Service again after
    /// this delay (servicing earlier or later is harmless).
    Delay(D),
}

/// Errors for caller contract violations.
///
/// Normal game flow (mismatches, ignored input) never produces errors;
/// these arise only from navigation calls made on the wrong screen or
/// configuration the game cannot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// Operation called from an invalid screen.
    InvalidScreen {
        /// Human-readable description of valid screen(s).
        expected: &'static str,
        /// The actual current screen.
        actual: Screen,
    },

    /// Level index out of catalog range.
    UnknownLevel { index: usize, catalog_len: usize },

    /// The sequence would outgrow the game's capacity `N` before the final
    /// catalog level.
    CapacityExceeded { required: usize, capacity: usize },
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidScreen { expected, actual } => {
                write!(
                    f,
                    "invalid screen: expected {}, but game is on {:?}",
                    expected, actual
                )
            }
            GameError::UnknownLevel { index, catalog_len } => {
                write!(
                    f,
                    "level index {} out of range for catalog of {} levels",
                    index, catalog_len
                )
            }
            GameError::CapacityExceeded { required, capacity } => {
                write!(
                    f,
                    "run would grow the sequence to {} signals, capacity is {}",
                    required, capacity
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// The round state machine.
///
/// Owns score, level progression, the current sequence, and the playback
/// engine; reaches the outside world only through the [`GameEffects`] port
/// and the [`TimeSource`]. One instance per session.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `'c` - Lifetime of the level catalog
/// * `I` - Time instant type
/// * `E` - Effects implementation type
/// * `T` - Time source implementation type
/// * `G` - Signal source implementation type
/// * `N` - Maximum sequence length (must cover the catalog's final growth)
pub struct RecallGame<'t, 'c, I, E, T, G, const N: usize>
where
    I: TimeInstant,
    E: GameEffects,
    T: TimeSource<I>,
    G: SignalSource,
{
    effects: E,
    time_source: &'t T,
    signals: G,
    catalog: LevelCatalog<'c>,
    screen: Screen,
    phase: Phase,
    level_index: usize,
    score: u32,
    sequence: Vec<Signal, N>,
    cursor: usize,
    playback: Option<Playback<I>>,
    pending_playback: Option<Scheduled<I>>,
    epoch: u32,
}

impl<'t, 'c, I, E, T, G, const N: usize> RecallGame<'t, 'c, I, E, T, G, N>
where
    I: TimeInstant,
    E: GameEffects,
    T: TimeSource<I>,
    G: SignalSource,
{
    /// Creates a new game on the menu screen.
    pub fn new(effects: E, time_source: &'t T, signals: G, catalog: LevelCatalog<'c>) -> Self {
        Self {
            effects,
            time_source,
            signals,
            catalog,
            screen: Screen::Menu,
            phase: Phase::Idle,
            level_index: 0,
            score: 0,
            sequence: Vec::new(),
            cursor: 0,
            playback: None,
            pending_playback: None,
            epoch: 0,
        }
    }

    /// Handles a game command by dispatching to the appropriate method.
    ///
    /// Convenience for event-queue hosts. Player-event commands
    /// (`Submit`, `Replay`) never fail; navigation commands propagate
    /// their screen checks.
    pub fn handle_command(
        &mut self,
        command: GameCommand,
    ) -> Result<ServiceTiming<I::Duration>, GameError> {
        match command {
            GameCommand::StartRun(level_index) => self.start_run(level_index),
            GameCommand::Submit(signal) => {
                self.submit(signal);
                Ok(self.timing())
            }
            GameCommand::Replay => Ok(self.replay()),
            GameCommand::ToMenu => {
                self.to_menu()?;
                Ok(ServiceTiming::Idle)
            }
            GameCommand::ToLevelSelect => {
                self.to_level_select()?;
                Ok(ServiceTiming::Idle)
            }
        }
    }

    /// Starts a fresh run at the given catalog level.
    ///
    /// Resets the score, generates a new sequence of the level's length and
    /// begins playback (the first signal is emitted before this returns).
    /// Valid from `Menu` and `LevelSelect`.
    ///
    /// # Errors
    /// * `InvalidScreen` - called outside `Menu`/`LevelSelect`
    /// * `UnknownLevel` - index out of catalog range
    /// * `CapacityExceeded` - the catalog's final growth would not fit `N`
    pub fn start_run(
        &mut self,
        level_index: usize,
    ) -> Result<ServiceTiming<I::Duration>, GameError> {
        match self.screen {
            Screen::Menu | Screen::LevelSelect => {}
            actual => {
                return Err(GameError::InvalidScreen {
                    expected: "Menu or LevelSelect",
                    actual,
                });
            }
        }

        let Some(level) = self.catalog.get(level_index).copied() else {
            return Err(GameError::UnknownLevel {
                index: level_index,
                catalog_len: self.catalog.len(),
            });
        };

        // One signal is appended per advance, so the run peaks at the final
        // level. Checking here means growth pushes cannot fail mid-run.
        let required = level.sequence_length + (self.catalog.len() - 1 - level_index);
        if required > N {
            return Err(GameError::CapacityExceeded {
                required,
                capacity: N,
            });
        }

        // Invalidate any pending deadline from an abandoned round.
        self.epoch = self.epoch.wrapping_add(1);
        self.pending_playback = None;
        self.score = 0;
        self.level_index = level_index;
        self.sequence = self.signals.generate(level.sequence_length);
        self.screen = Screen::Playing;
        self.begin_playback(level.step_interval_ms);

        Ok(self.service())
    }

    /// Advances playback and any scheduled pause to the current instant.
    ///
    /// Call at your tick rate (e.g. once per frame) while the returned
    /// timing is `Delay`. Emits at most one signal per call regardless of
    /// how overdue the tick is.
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        let now = self.time_source.now();

        if let Some(pending) = self.pending_playback {
            if pending.is_stale(self.epoch) {
                // Deadline from a superseded round; drop without firing.
                self.pending_playback = None;
            } else if pending.is_due(now, self.epoch) {
                self.pending_playback = None;
                let interval = self.current_level().step_interval_ms;
                self.begin_playback(interval);
            } else {
                return ServiceTiming::Delay(pending.remaining(now));
            }
        }

        if let Some(playback) = self.playback.as_mut() {
            match playback.service(now) {
                PlaybackEvent::Emit(index) => {
                    let remaining = playback.remaining(now);
                    self.effects.signal(self.sequence[index]);
                    ServiceTiming::Delay(remaining)
                }
                PlaybackEvent::Complete => {
                    self.playback = None;
                    self.phase = Phase::AcceptingInput;
                    self.cursor = 0;
                    ServiceTiming::Idle
                }
                PlaybackEvent::Waiting => ServiceTiming::Delay(playback.remaining(now)),
            }
        } else {
            ServiceTiming::Idle
        }
    }

    /// Submits a player-selected signal.
    ///
    /// Only meaningful on the `Playing` screen while input is being
    /// accepted; at any other moment the event is silently discarded, never
    /// queued. This is the debounce policy: input during playback or the
    /// inter-round pause has no observable effect.
    ///
    /// An accepted submission always fires the signal feedback effect, then
    /// is compared against the sequence: a mismatch ends the run
    /// (`GameOver`), a match advances the cursor and, on the last position,
    /// the level.
    pub fn submit(&mut self, signal: Signal) {
        if self.screen != Screen::Playing || self.phase != Phase::AcceptingInput {
            return;
        }

        self.effects.signal(signal);

        if signal != self.sequence[self.cursor] {
            self.phase = Phase::Idle;
            self.playback = None;
            self.pending_playback = None;
            self.screen = Screen::GameOver;
            self.effects.run_lost(self.score);
            return;
        }

        self.cursor += 1;
        if self.cursor == self.sequence.len() {
            self.advance_or_win();
        }
    }

    /// Re-plays the current sequence from the start.
    ///
    /// Strictly idempotent with respect to progression: score, level and
    /// sequence contents are untouched; the input cursor is reset to 0 when
    /// the replay completes. Silently ignored unless input is currently
    /// being accepted, under the same policy as [`submit`](Self::submit).
    pub fn replay(&mut self) -> ServiceTiming<I::Duration> {
        if self.screen != Screen::Playing || self.phase != Phase::AcceptingInput {
            return self.timing();
        }

        let interval = self.current_level().step_interval_ms;
        self.begin_playback(interval);
        self.service()
    }

    /// Returns to the menu, abandoning any in-flight round.
    ///
    /// Valid from `Playing`, `LevelSelect`, `GameOver` and `Victory`.
    /// Cancels pending playback and scheduled pauses; the score is simply
    /// dropped (nothing is persisted).
    pub fn to_menu(&mut self) -> Result<(), GameError> {
        match self.screen {
            Screen::Playing | Screen::LevelSelect | Screen::GameOver | Screen::Victory => {
                self.abandon_round();
                self.screen = Screen::Menu;
                Ok(())
            }
            actual => Err(GameError::InvalidScreen {
                expected: "Playing, LevelSelect, GameOver, or Victory",
                actual,
            }),
        }
    }

    /// Goes to the level select screen, abandoning any in-flight round.
    ///
    /// Valid from `Menu`, `Playing`, `GameOver` and `Victory`.
    pub fn to_level_select(&mut self) -> Result<(), GameError> {
        match self.screen {
            Screen::Menu | Screen::Playing | Screen::GameOver | Screen::Victory => {
                self.abandon_round();
                self.screen = Screen::LevelSelect;
                Ok(())
            }
            actual => Err(GameError::InvalidScreen {
                expected: "Menu, Playing, GameOver, or Victory",
                actual,
            }),
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current sub-mode within `Playing`.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while the engine is driving playback.
    pub fn is_playing_back(&self) -> bool {
        self.phase == Phase::PlayingBack
    }

    /// True while player input is being accepted.
    pub fn is_accepting_input(&self) -> bool {
        self.phase == Phase::AcceptingInput
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Index of the current catalog level.
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// The current catalog level.
    pub fn level(&self) -> &'c Level {
        self.current_level()
    }

    /// The current sequence (empty outside a run).
    pub fn sequence(&self) -> &[Signal] {
        &self.sequence
    }

    /// Position of the next expected player input.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Timing hint without advancing anything.
    pub fn timing(&self) -> ServiceTiming<I::Duration> {
        let now = self.time_source.now();
        if let Some(pending) = &self.pending_playback {
            if !pending.is_stale(self.epoch) {
                return ServiceTiming::Delay(pending.remaining(now));
            }
        }
        if let Some(playback) = &self.playback {
            return ServiceTiming::Delay(playback.remaining(now));
        }
        ServiceTiming::Idle
    }

    /// Scores the completed round, then either ends the run in victory or
    /// grows the sequence by one signal and schedules the next playback.
    fn advance_or_win(&mut self) {
        self.score += ROUND_SCORE_BONUS;

        if self.catalog.is_last(self.level_index) {
            self.phase = Phase::Idle;
            self.playback = None;
            self.pending_playback = None;
            self.screen = Screen::Victory;
            self.effects.run_won(self.score);
            return;
        }

        self.level_index += 1;
        // Classic growth rule: previous signals retained, one appended.
        // Capacity was reserved in start_run.
        let _ = self.sequence.push(self.signals.next_signal());
        self.phase = Phase::Idle;
        let now = self.time_source.now();
        self.pending_playback = Some(Scheduled::after(now, ADVANCE_PAUSE_MS, self.epoch));
        let level = self.current_level();
        self.effects.level_advanced(level);
    }

    fn begin_playback(&mut self, step_interval_ms: u64) {
        self.phase = Phase::PlayingBack;
        self.cursor = 0;
        self.playback = Some(Playback::new(self.sequence.len(), step_interval_ms));
    }

    fn abandon_round(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.playback = None;
        self.pending_playback = None;
        self.phase = Phase::Idle;
        self.sequence.clear();
        self.cursor = 0;
    }

    fn current_level(&self) -> &'c Level {
        // level_index is validated by start_run and only incremented while
        // is_last is false, so the lookup cannot miss.
        self.catalog.get(self.level_index).unwrap()
    }
}
