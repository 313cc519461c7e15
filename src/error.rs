//! Error types for move validation and the computer opponent.

use derive_more::Display;

use crate::board::Marker;

/// A move that cannot be applied. Always recoverable: the board is left
/// untouched and the move is requested again.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// Input that does not look like `row,col`.
    #[display("Invalid format {_0:?}. Use 'row,col' (e.g., '1,2')")]
    Malformed(String),

    /// A 1-based coordinate outside the board.
    #[display("Invalid input ({row},{col}). Rows and columns must be 1-3.")]
    CoordinateOutOfRange { row: i32, col: i32 },

    /// A flat cell index outside `0..9`.
    #[display("Cell index {index} is outside the board")]
    IndexOutOfRange { index: usize },

    /// The target cell already holds a marker.
    #[display("That cell is taken. Try again.")]
    Occupied { index: usize },

    /// The match already reached a win or a tie.
    #[display("The match is already over")]
    MatchOver,
}

impl std::error::Error for MoveError {}

/// The opponent was asked for a move on a full board.
///
/// The session checks for a terminal board before every turn, so this only
/// surfaces on a broken caller and is treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("No moves available: the board is full")]
pub struct NoMovesAvailable;

impl std::error::Error for NoMovesAvailable {}

/// Both players of a session were given the same marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Both players hold marker {_0}")]
pub struct SeatConflict(pub Marker);

impl std::error::Error for SeatConflict {}
