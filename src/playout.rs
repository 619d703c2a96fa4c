//! Random playouts for position evaluation.
//!
//! A rollout applies uniformly random legal moves, alternating the mover,
//! until the position is decided or drawn. No move ordering, heuristics,
//! or caching; the tree above the rollout is where knowledge accumulates.

use crate::position::{Outcome, Player, Position};

/// Play a position out to its end with random moves.
///
/// Takes the position by value: `Position` is small and `Copy`, so the
/// caller's state is untouched and nothing has to be unwound afterwards.
/// Always runs to a terminal state; Pentago fills the board in at most 36
/// placements, so no depth cap is needed.
pub fn rollout(rng: &mut fastrand::Rng, mut pos: Position, mut to_move: Player) -> Outcome {
    loop {
        match pos.winner(to_move) {
            Outcome::Undecided => {}
            decided => return decided,
        }
        let moves = pos.legal_moves();
        let mv = moves[rng.usize(..moves.len())];
        pos.apply(mv, to_move);
        to_move = to_move.opponent();
    }
}
