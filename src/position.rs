//! Bit-packed Pentago position and move execution.
//!
//! Each quadrant stores, per player, four stacked 9-bit occupancy planes
//! in one `u64`: projection `p` holds the quadrant contents rotated `p`
//! quarter turns clockwise. Placing a marker ORs a precomputed mask that
//! sets the cell in all four projections at once, so rotating a quadrant
//! never permutes bits. It only bumps the quadrant's active offset, which
//! selects the projection the rest of the engine reads.
//!
//! `apply` and `undo` are exact inverses and carry no validation: the
//! search applies and reverts moves millions of times per request, and a
//! mismatched undo corrupts the planes undetectably. Callers uphold the
//! pairing.

use std::fmt;

use crate::board::BoardView;
use crate::constants::{
    CELL_BITS, CELLS, FULL_BOARD, LINES, N, PLACE_MASKS, PLANE_MASK, QCELLS, QUADRANTS, ROT_POW,
    SPINS,
};
use crate::moves::{Move, Rotation, to_quadrant};

/// Marker color. Doubles as a plane index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }
}

/// Result of a winner query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Game still running
    Undecided,
    /// Board full, no line for either player
    Draw,
    /// Five in a row for this player
    Won(Player),
}

/// Snapshot dimensions the packed layout cannot represent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The layout assumes a 6x6 board split into four 3x3 quadrants.
    UnsupportedSize(usize),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::UnsupportedSize(size) => {
                write!(f, "unsupported board size {size}, packed layout needs {N}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// A Pentago position.
///
/// Small and `Copy`: rollouts run on a stack copy while tree descent
/// mutates the original through `apply`/`undo` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Stacked projections per player and quadrant
    planes: [[u64; QUADRANTS]; 2],
    /// Active projection per quadrant, 0..4
    offsets: [u8; QUADRANTS],
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Empty board, all offsets zero.
    pub fn new() -> Self {
        Position {
            planes: [[0; QUADRANTS]; 2],
            offsets: [0; QUADRANTS],
        }
    }

    /// Build a position from an external snapshot.
    ///
    /// Fails fast when the snapshot dimensions do not match the packed
    /// layout; the caller is expected to keep a slower generic fallback
    /// for such boards. Every existing marker is copied into all four
    /// rotation projections of its quadrant.
    pub fn from_view<V: BoardView + ?Sized>(view: &V) -> Result<Self, SnapshotError> {
        if view.size() != N {
            return Err(SnapshotError::UnsupportedSize(view.size()));
        }
        let mut pos = Position::new();
        for row in 0..N {
            for col in 0..N {
                if let Some(player) = view.owner(row, col) {
                    let (quadrant, cell) = to_quadrant(row, col);
                    pos.planes[player as usize][quadrant] |= PLACE_MASKS[cell];
                }
            }
        }
        Ok(pos)
    }

    /// The 9-bit plane a quadrant currently shows for one player.
    fn view_plane(&self, player: Player, quadrant: usize) -> u64 {
        (self.planes[player as usize][quadrant] >> (QCELLS * self.offsets[quadrant] as usize))
            & PLANE_MASK
    }

    /// Base-frame cell behind view-frame `cell` at the current offset.
    fn base_cell(&self, quadrant: usize, cell: usize) -> usize {
        ROT_POW[(4 - self.offsets[quadrant] as usize) & 3][cell]
    }

    /// Execute a move: set the placement bit in all four projections,
    /// then advance the rotated quadrant's offset (+1 mod 4 clockwise,
    /// +3 mod 4 counter-clockwise).
    ///
    /// The placement cell must be empty; this is not checked.
    pub fn apply(&mut self, mv: Move, mover: Player) {
        let quadrant = mv.quadrant as usize;
        let base = self.base_cell(quadrant, mv.cell as usize);
        self.planes[mover as usize][quadrant] |= PLACE_MASKS[base];

        let spin = mv.spin as usize;
        self.offsets[spin] = (self.offsets[spin] + mv.rotation.offset_step()) & 3;
    }

    /// Exact inverse of [`apply`](Self::apply): revert the rotation
    /// first, then clear the placement bit computed against the restored
    /// offset. Must be called with the `(mv, mover)` just applied.
    pub fn undo(&mut self, mv: Move, mover: Player) {
        let spin = mv.spin as usize;
        self.offsets[spin] = (self.offsets[spin] + mv.rotation.inverse().offset_step()) & 3;

        let quadrant = mv.quadrant as usize;
        let base = self.base_cell(quadrant, mv.cell as usize);
        self.planes[mover as usize][quadrant] &= !PLACE_MASKS[base];
    }

    /// Every legal move: one entry per empty cell, rotated quadrant, and
    /// direction, in a fixed ascending order. Placement legality and
    /// rotation choice are independent, so the count is always
    /// empty cells times 8.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(CELLS * SPINS);
        for quadrant in 0..QUADRANTS {
            let occupied =
                self.view_plane(Player::White, quadrant) | self.view_plane(Player::Black, quadrant);
            for cell in 0..QCELLS {
                if occupied & (1u64 << cell) != 0 {
                    continue;
                }
                for spin in 0..QUADRANTS {
                    for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
                        moves.push(Move {
                            quadrant: quadrant as u8,
                            cell: cell as u8,
                            spin: spin as u8,
                            rotation,
                        });
                    }
                }
            }
        }
        moves
    }

    /// The whole-board occupancy of one player under the current offsets.
    fn projected(&self, player: Player) -> u64 {
        let mut board = 0u64;
        for quadrant in 0..QUADRANTS {
            let mut plane = self.view_plane(player, quadrant);
            while plane != 0 {
                let cell = plane.trailing_zeros() as usize;
                board |= CELL_BITS[quadrant][cell];
                plane &= plane - 1;
            }
        }
        board
    }

    /// Test for five in a row along rows, columns, and diagonals, using
    /// the quadrants' current offsets.
    ///
    /// A rotation can complete lines for both colors at once; in that
    /// case the player who just moved, i.e. the one who is NOT
    /// `next_to_move`, takes the win. A full board with no line is a
    /// draw, distinct from undecided.
    pub fn winner(&self, next_to_move: Player) -> Outcome {
        let white = self.projected(Player::White);
        let black = self.projected(Player::Black);
        match (has_line(white), has_line(black)) {
            (true, true) => Outcome::Won(next_to_move.opponent()),
            (true, false) => Outcome::Won(Player::White),
            (false, true) => Outcome::Won(Player::Black),
            (false, false) => {
                if (white | black) == FULL_BOARD {
                    Outcome::Draw
                } else {
                    Outcome::Undecided
                }
            }
        }
    }

    /// Per-cell owner query in the current view frame.
    pub fn owner(&self, row: usize, col: usize) -> Option<Player> {
        let (quadrant, cell) = to_quadrant(row, col);
        let bit = 1u64 << cell;
        if self.view_plane(Player::White, quadrant) & bit != 0 {
            Some(Player::White)
        } else if self.view_plane(Player::Black, quadrant) & bit != 0 {
            Some(Player::Black)
        } else {
            None
        }
    }

    /// Active rotation offset of a quadrant.
    pub fn offset(&self, quadrant: usize) -> u8 {
        self.offsets[quadrant]
    }
}

fn has_line(board: u64) -> bool {
    LINES.iter().any(|&line| board & line == line)
}

/// A position is itself a valid snapshot of its current view.
impl BoardView for Position {
    fn size(&self) -> usize {
        N
    }

    fn owner(&self, row: usize, col: usize) -> Option<Player> {
        Position::owner(self, row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::to_board;

    fn mv(quadrant: u8, cell: u8, spin: u8, rotation: Rotation) -> Move {
        Move {
            quadrant,
            cell,
            spin,
            rotation,
        }
    }

    #[test]
    fn test_empty_position() {
        let pos = Position::new();
        for row in 0..N {
            for col in 0..N {
                assert_eq!(pos.owner(row, col), None);
            }
        }
        assert_eq!(pos.winner(Player::White), Outcome::Undecided);
    }

    #[test]
    fn test_placement_visible_in_view() {
        let mut pos = Position::new();
        // Place in quadrant 3 cell 4 (board 4,4), rotate quadrant 0.
        pos.apply(mv(3, 4, 0, Rotation::Clockwise), Player::Black);
        assert_eq!(pos.owner(4, 4), Some(Player::Black));
        assert_eq!(pos.offset(0), 1);
        assert_eq!(pos.offset(3), 0);
    }

    #[test]
    fn test_rotation_moves_marker() {
        let mut pos = Position::new();
        // Marker in the top-left corner of quadrant 0; a clockwise turn
        // of that same quadrant carries it to the top-right corner.
        pos.apply(mv(0, 0, 0, Rotation::Clockwise), Player::White);
        assert_eq!(pos.owner(0, 0), None);
        assert_eq!(pos.owner(0, 2), Some(Player::White));

        // Three more clockwise turns of quadrant 0 bring it home.
        pos.apply(mv(3, 0, 0, Rotation::Clockwise), Player::Black);
        pos.apply(mv(3, 1, 0, Rotation::Clockwise), Player::White);
        pos.apply(mv(3, 2, 0, Rotation::Clockwise), Player::Black);
        assert_eq!(pos.offset(0), 0);
        assert_eq!(pos.owner(0, 0), Some(Player::White));
    }

    #[test]
    fn test_counter_clockwise_cancels_clockwise() {
        let mut pos = Position::new();
        pos.apply(mv(1, 5, 2, Rotation::Clockwise), Player::White);
        pos.apply(mv(1, 3, 2, Rotation::CounterClockwise), Player::Black);
        assert_eq!(pos.offset(2), 0);
        let (row, col) = to_board(1, 5);
        assert_eq!(pos.owner(row, col), Some(Player::White));
    }

    #[test]
    fn test_apply_undo_roundtrip() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut pos = Position::new();
        let mut applied = Vec::new();
        let mut mover = Player::White;

        for _ in 0..20 {
            let moves = pos.legal_moves();
            let chosen = moves[rng.usize(..moves.len())];
            pos.apply(chosen, mover);
            applied.push((chosen, mover));
            mover = mover.opponent();

            // Immediate pair restores bit-for-bit equality.
            let before = pos;
            let probe = pos.legal_moves()[0];
            pos.apply(probe, mover);
            pos.undo(probe, mover);
            assert_eq!(pos, before);
        }

        // Unwinding the whole game restores the empty position.
        for (chosen, who) in applied.into_iter().rev() {
            pos.undo(chosen, who);
        }
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn test_legal_move_count() {
        let mut pos = Position::new();
        assert_eq!(pos.legal_moves().len(), CELLS * SPINS);

        pos.apply(mv(0, 4, 2, Rotation::Clockwise), Player::White);
        assert_eq!(pos.legal_moves().len(), (CELLS - 1) * SPINS);

        pos.apply(mv(2, 0, 0, Rotation::CounterClockwise), Player::Black);
        assert_eq!(pos.legal_moves().len(), (CELLS - 2) * SPINS);
    }

    #[test]
    fn test_row_win_without_rotation() {
        // White holds (0,1)..(0,4); placing at (0,5) completes the run.
        // The spin targets an empty quadrant, so the line survives it and
        // the winner query reports White straight away.
        let mut pos = Position::new();
        for col in 1..5 {
            let (q, cell) = to_quadrant(0, col);
            pos.planes[Player::White as usize][q] |= PLACE_MASKS[cell];
        }
        assert_eq!(pos.winner(Player::Black), Outcome::Undecided);

        let (q, cell) = to_quadrant(0, 5);
        pos.apply(mv(q as u8, cell as u8, 2, Rotation::Clockwise), Player::White);
        assert_eq!(pos.winner(Player::Black), Outcome::Won(Player::White));
    }

    #[test]
    fn test_column_and_diagonal_wins() {
        let mut col_pos = Position::new();
        for row in 0..5 {
            let (q, cell) = to_quadrant(row, 2);
            col_pos.planes[Player::Black as usize][q] |= PLACE_MASKS[cell];
        }
        assert_eq!(col_pos.winner(Player::White), Outcome::Won(Player::Black));

        let mut diag_pos = Position::new();
        for i in 0..5 {
            let (q, cell) = to_quadrant(i + 1, i + 1);
            diag_pos.planes[Player::White as usize][q] |= PLACE_MASKS[cell];
        }
        assert_eq!(diag_pos.winner(Player::Black), Outcome::Won(Player::White));
    }

    #[test]
    fn test_simultaneous_lines_credit_previous_mover() {
        let mut pos = Position::new();
        for col in 0..5 {
            let (q, cell) = to_quadrant(0, col);
            pos.planes[Player::White as usize][q] |= PLACE_MASKS[cell];
            let (q, cell) = to_quadrant(5, col);
            pos.planes[Player::Black as usize][q] |= PLACE_MASKS[cell];
        }
        assert_eq!(pos.winner(Player::White), Outcome::Won(Player::Black));
        assert_eq!(pos.winner(Player::Black), Outcome::Won(Player::White));
    }

    #[test]
    fn test_full_board_draw() {
        // Blocks of two alternate so no row, column, or diagonal carries
        // a run of five for either color.
        let mut pos = Position::new();
        for row in 0..N {
            for col in 0..N {
                let player = if (row + col / 2) % 2 == 0 {
                    Player::White
                } else {
                    Player::Black
                };
                let (q, cell) = to_quadrant(row, col);
                pos.planes[player as usize][q] |= PLACE_MASKS[cell];
            }
        }
        assert_eq!(pos.winner(Player::White), Outcome::Draw);
        assert_eq!(pos.winner(Player::Black), Outcome::Draw);
    }

    #[test]
    fn test_from_view_roundtrip() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut pos = Position::new();
        let mut mover = Player::White;
        for _ in 0..12 {
            let moves = pos.legal_moves();
            pos.apply(moves[rng.usize(..moves.len())], mover);
            mover = mover.opponent();
        }

        // Re-snapshotting normalizes offsets but must preserve the view.
        let copy = Position::from_view(&pos).unwrap();
        for row in 0..N {
            for col in 0..N {
                assert_eq!(copy.owner(row, col), pos.owner(row, col));
            }
        }
        assert_eq!(copy.offset(0), 0);
    }
}
