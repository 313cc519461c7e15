//! Win and tie detection.
//!
//! Everything here is a pure function of a board snapshot and is evaluated
//! from scratch after every move.

use crate::board::{Board, Marker};
use crate::constants::TRIPLES;

/// Outcome of evaluating a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Ongoing,
    Win(Marker),
    Tie,
}

/// True if `marker` holds all three cells of any row, column or diagonal.
pub fn has_won(board: &Board, marker: Marker) -> bool {
    TRIPLES
        .iter()
        .any(|line| line.iter().all(|&i| board.marker_at(i) == Some(marker)))
}

/// Evaluate the board. A full board with a completed line is a win.
pub fn verdict(board: &Board) -> Verdict {
    for marker in [Marker::X, Marker::O] {
        if has_won(board, marker) {
            return Verdict::Win(marker);
        }
    }
    if board.is_full() {
        Verdict::Tie
    } else {
        Verdict::Ongoing
    }
}
