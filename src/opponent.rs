//! Rule-based computer opponent.
//!
//! The heuristic looks one ply ahead and picks the first rule that applies:
//!
//! 1. Win now if any empty cell completes a line for us.
//! 2. Block the first cell that would complete a line for the opponent.
//! 3. Take the center.
//! 4. Take a random free corner (only with [`TieBreak::CornersFirst`]).
//! 5. Take any random free cell.
//!
//! Rules 1 and 2 scan cells in index order, so they are deterministic.
//! Probing is done on a copy of the board; the caller's board is never
//! touched.

use crate::board::{Board, Marker};
use crate::constants::{CENTER, CORNERS};
use crate::error::NoMovesAvailable;
use crate::rules::has_won;

/// How the heuristic breaks ties once rules 1-3 do not apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Random free corner first, then any random free cell.
    #[default]
    CornersFirst,
    /// Any random free cell.
    Uniform,
}

/// The computer player's move chooser.
#[derive(Clone, Debug)]
pub struct Heuristic {
    marker: Marker,
    tie_break: TieBreak,
    rng: fastrand::Rng,
}

impl Heuristic {
    pub fn new(marker: Marker, tie_break: TieBreak, rng: fastrand::Rng) -> Self {
        Self {
            marker,
            tie_break,
            rng,
        }
    }

    /// A heuristic with a fixed seed, for reproducible play.
    pub fn seeded(marker: Marker, tie_break: TieBreak, seed: u64) -> Self {
        Self::new(marker, tie_break, fastrand::Rng::with_seed(seed))
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Pick an empty cell for this heuristic's marker.
    pub fn choose_move(&mut self, board: &Board) -> Result<usize, NoMovesAvailable> {
        if board.is_full() {
            return Err(NoMovesAvailable);
        }

        if let Some(pt) = winning_cell(board, self.marker) {
            return Ok(pt);
        }
        if let Some(pt) = winning_cell(board, self.marker.opponent()) {
            return Ok(pt);
        }
        if board.is_empty_at(CENTER) {
            return Ok(CENTER);
        }

        if self.tie_break == TieBreak::CornersFirst {
            let corners: Vec<usize> = CORNERS
                .into_iter()
                .filter(|&i| board.is_empty_at(i))
                .collect();
            if let Some(pt) = self.rng.choice(corners) {
                return Ok(pt);
            }
        }

        let free: Vec<usize> = board.empty_cells().collect();
        self.rng.choice(free).ok_or(NoMovesAvailable)
    }
}

/// First empty cell where placing `marker` completes a line.
pub fn winning_cell(board: &Board, marker: Marker) -> Option<usize> {
    board.empty_cells().find(|&pt| {
        let mut probe = *board;
        probe.apply(pt, marker).is_ok() && has_won(&probe, marker)
    })
}
