//! Command-based control for the game.

use crate::signal::Signal;

/// Commands for driving the game from an event queue.
///
/// Dispatched by [`RecallGame::handle_command`](crate::RecallGame::handle_command).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameCommand {
    /// Start a fresh run at the given catalog level index.
    StartRun(usize),
    /// Player selected a signal.
    Submit(Signal),
    /// Player asked to hear the current sequence again.
    Replay,
    /// Return to the menu.
    ToMenu,
    /// Go to level select.
    ToLevelSelect,
}
