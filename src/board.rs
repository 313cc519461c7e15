//! The 3x3 board, its markers, and move validation.

use std::fmt;

use crate::constants::{CELLS, SIDE};
use crate::error::MoveError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    X,
    O,
}

impl Marker {
    /// The other player's marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    /// Seat number: 0 for X, 1 for O.
    pub fn seat(self) -> usize {
        match self {
            Marker::X => 0,
            Marker::O => 1,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::X => write!(f, "X"),
            Marker::O => write!(f, "O"),
        }
    }
}

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Marker),
}

/// A user-facing board coordinate, 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Convert to a flat cell index, rejecting anything outside `1..=3`.
    pub fn to_index(self) -> Result<usize, MoveError> {
        let side = SIDE as i32;
        if !(1..=side).contains(&self.row) || !(1..=side).contains(&self.col) {
            return Err(MoveError::CoordinateOutOfRange {
                row: self.row,
                col: self.col,
            });
        }
        Ok(((self.row - 1) * side + (self.col - 1)) as usize)
    }

    /// The 1-based coordinate of a flat cell index.
    pub fn from_index(index: usize) -> Self {
        Self {
            row: (index / SIDE) as i32 + 1,
            col: (index % SIDE) as i32 + 1,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Nine cells in row-major order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at `index`, or `None` outside the board.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// The marker at `index`, if any.
    pub fn marker_at(&self, index: usize) -> Option<Marker> {
        match self.get(index) {
            Some(Cell::Taken(m)) => Some(m),
            _ => None,
        }
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Cell::Empty)
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
    }

    /// Check that `index` names an empty cell on the board.
    pub fn validate(&self, index: usize) -> Result<usize, MoveError> {
        match self.get(index) {
            None => Err(MoveError::IndexOutOfRange { index }),
            Some(Cell::Taken(_)) => Err(MoveError::Occupied { index }),
            Some(Cell::Empty) => Ok(index),
        }
    }

    /// Place `marker` on `index`. A rejected move leaves the board unchanged.
    pub fn apply(&mut self, index: usize, marker: Marker) -> Result<(), MoveError> {
        let index = self.validate(index)?;
        self.cells[index] = Cell::Taken(marker);
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                let ch = match self.cells[row * SIDE + col] {
                    Cell::Taken(Marker::X) => 'X',
                    Cell::Taken(Marker::O) => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch}")?;
                if col + 1 < SIDE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
