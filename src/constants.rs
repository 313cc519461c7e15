//! Board geometry and fixed game constants.
//!
//! Cells are addressed by a flat index `0..CELLS` in row-major order, so
//! index `i` sits at row `i / SIDE`, column `i % SIDE`. Users see 1-based
//! rows and columns.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows (and columns) on the board.
pub const SIDE: usize = 3;

/// Total number of cells.
pub const CELLS: usize = SIDE * SIDE;

/// Index of the center cell.
pub const CENTER: usize = 4;

/// Indices of the four corner cells.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Every winning line: 3 rows, 3 columns, 2 diagonals.
pub const TRIPLES: [[usize; 3]; 8] = [
    [0, 1, 2], // rows
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6], // columns
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8], // diagonals
    [2, 4, 6],
];

// =============================================================================
// Session Defaults
// =============================================================================

/// Words that end the session when typed at a move prompt (case-insensitive).
pub const QUIT_WORDS: &[&str] = &["q", "quit", "exit"];

/// Default names in a two-player session.
pub const DEFAULT_PLAYER_X: &str = "Player 1";
pub const DEFAULT_PLAYER_O: &str = "Player 2";

/// Default human name when playing against the computer.
pub const DEFAULT_SOLO_NAME: &str = "Player";

/// Display name of the computer-controlled player.
pub const COMPUTER_NAME: &str = "Computer";

/// Matches played by the `demo` command when none is given.
pub const DEMO_MATCHES: u32 = 3;
