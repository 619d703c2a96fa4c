//! The agent-facing boundary: one synchronous choose-move call.
//!
//! The game engine hands over a board snapshot, the color to move, and a
//! millisecond allowance; it gets back one move in absolute coordinates.
//! Nothing persists between calls except the random stream: the position
//! and the search tree are rebuilt per request and dropped afterwards.

use std::time::Duration;

use crate::board::BoardView;
use crate::constants::{DEFAULT_SEED, TIME_RESERVE_MS};
use crate::mcts::Searcher;
use crate::moves::BoardMove;
use crate::position::{Player, Position, SnapshotError};

/// Monte Carlo Pentago player.
pub struct MonteCarloPlayer {
    searcher: Searcher,
}

impl Default for MonteCarloPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MonteCarloPlayer {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            searcher: Searcher::new(seed),
        }
    }

    /// Pick a move for `to_move` within the given allowance.
    ///
    /// A fixed reserve is held back from the allowance so the answer is
    /// out the door before the clock runs dry. Fails only when the
    /// snapshot's dimensions do not fit the packed layout; the caller
    /// then falls back to its generic move selection.
    pub fn choose_move<V: BoardView + ?Sized>(
        &mut self,
        view: &V,
        to_move: Player,
        time_ms: u64,
    ) -> Result<BoardMove, SnapshotError> {
        let mut pos = Position::from_view(view)?;
        let budget = Duration::from_millis(time_ms.saturating_sub(TIME_RESERVE_MS));
        let chosen = self.searcher.choose_timed(&mut pos, to_move, budget);
        Ok(chosen.to_board_move())
    }

    /// Simulations completed by the last search.
    pub fn simulations(&self) -> u32 {
        self.searcher.simulations()
    }

    /// Win ratio the last search attributed to its chosen move.
    pub fn win_rate(&self) -> f64 {
        self.searcher.win_rate()
    }
}
