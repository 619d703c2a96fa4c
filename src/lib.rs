//! Pentago-MCTS: a Monte Carlo Tree Search player for Pentago.
//!
//! Pentago is played on a 6x6 board split into four 3x3 quadrants. A move
//! places a marker on an empty cell and then rotates one quadrant by a
//! quarter turn; five in a row wins. This crate picks moves for one side
//! under a per-move time allowance, searching over a bit-packed board in
//! which quadrant rotation is an offset change rather than a bit shuffle.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, bit tables, search parameters
//! - [`moves`] - Move descriptors and coordinate mapping
//! - [`position`] - Bit-packed board state, apply/undo, win detection
//! - [`board`] - Generic boundary board and the snapshot trait
//! - [`playout`] - Random game simulation for position evaluation
//! - [`mcts`] - Search tree and driver
//! - [`player`] - The choose-move entry point
//!
//! ## Example
//!
//! ```
//! use pentago_mcts::board::Board;
//! use pentago_mcts::player::MonteCarloPlayer;
//! use pentago_mcts::position::Player;
//!
//! let mut board = Board::new(6);
//! let mut player = MonteCarloPlayer::with_seed(42);
//!
//! // 50 ms to decide; the chosen move applies cleanly.
//! let mv = player.choose_move(&board, Player::White, 50).unwrap();
//! assert!(board.apply(mv, Player::White));
//! ```

pub mod board;
pub mod constants;
pub mod mcts;
pub mod moves;
pub mod player;
pub mod playout;
pub mod position;
