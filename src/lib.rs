#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Signal`**: One of the four colored pads, with a canonical display color
//! - **`SignalSource`**: Trait for sequence generation (uniform random or scripted)
//! - **`Level` / `LevelCatalog`**: Validated read-only difficulty configuration
//! - **`Playback`**: Steps a sequence one signal at a time, paced by elapsed time
//! - **`RecallGame`**: The round state machine owning score, level and sequence
//! - **`GameEffects`**: Trait the core calls out to for pad/tone/outcome effects
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`GameCommand`**: Commands for event-queue style hosts
//!
//! The core is poll-driven and never blocks: hosts call
//! [`RecallGame::service`] at their tick rate and deliver player events as
//! they arrive. All timing tolerates irregular tick spacing.

pub mod command;
pub mod game;
pub mod level;
pub mod playback;
pub mod signal;
pub mod time;

pub use command::GameCommand;
pub use game::{GameEffects, GameError, Phase, RecallGame, Screen, ServiceTiming};
pub use level::{CatalogError, Level, LevelCatalog};
pub use playback::{Playback, PlaybackEvent};
pub use signal::{RandomSignalSource, Signal, SignalSource};
pub use time::{Scheduled, TimeDuration, TimeInstant, TimeSource};

/// Lower bound on the playback interval, guarding against unplayably fast
/// levels. The effective interval is `max(MIN_STEP_INTERVAL_MS, requested)`.
pub const MIN_STEP_INTERVAL_MS: u64 = 150;

/// Pause between completing a round and playing back the grown sequence.
pub const ADVANCE_PAUSE_MS: u64 = 650;

/// Score awarded for each completed round.
pub const ROUND_SCORE_BONUS: u32 = 100;
