//! A console Tic Tac Toe game with a rule-based computer opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, winning lines, default names
//! - [`board`] - Board state, markers, coordinates, move validation
//! - [`rules`] - Win and tie detection
//! - [`opponent`] - Fixed-priority computer heuristic
//! - [`game`] - Per-match state machine, players, scores
//! - [`session`] - Turn acquisition, replay loop, front-end traits
//! - [`console`] - Terminal front end
//! - [`config`] - Session settings
//! - [`error`] - Move and opponent errors
//!
//! ## Example
//!
//! ```
//! use tic_tac_toe::board::{Board, Marker};
//! use tic_tac_toe::opponent::{Heuristic, TieBreak};
//! use tic_tac_toe::rules::{verdict, Verdict};
//!
//! let mut board = Board::new();
//! board.apply(0, Marker::X).unwrap();
//!
//! let mut computer = Heuristic::seeded(Marker::O, TieBreak::CornersFirst, 1);
//! let reply = computer.choose_move(&board).unwrap();
//! assert_eq!(reply, 4);
//!
//! board.apply(reply, Marker::O).unwrap();
//! assert_eq!(verdict(&board), Verdict::Ongoing);
//! ```

pub mod board;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod opponent;
pub mod rules;
pub mod session;
