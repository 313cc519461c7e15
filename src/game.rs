//! Players, scores, and the per-match state machine.
//!
//! A [`Match`] starts at `AwaitingMove(X)`. Each accepted move re-evaluates
//! the board: a win or a full board moves it to `Terminal`, anything else
//! hands the turn to the other marker. Rejected moves change nothing.

use std::fmt;

use crate::board::{Board, Marker};
use crate::error::MoveError;
use crate::opponent::Heuristic;
use crate::rules::{Verdict, verdict};

/// How a finished match ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Marker),
    Tie,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchState {
    AwaitingMove(Marker),
    Terminal(Outcome),
}

/// A single applied move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub marker: Marker,
    pub index: usize,
}

/// One game from an empty board to a win or a tie.
#[derive(Clone, Debug)]
pub struct Match {
    board: Board,
    state: MatchState,
    history: Vec<Move>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            state: MatchState::AwaitingMove(Marker::X),
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Moves applied so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The marker to move, or `None` once the match is over.
    pub fn active(&self) -> Option<Marker> {
        match self.state {
            MatchState::AwaitingMove(m) => Some(m),
            MatchState::Terminal(_) => None,
        }
    }

    /// Apply a move for the active marker and return the new state.
    pub fn play(&mut self, index: usize) -> Result<MatchState, MoveError> {
        let marker = self.active().ok_or(MoveError::MatchOver)?;
        self.board.apply(index, marker)?;
        self.history.push(Move { marker, index });

        self.state = match verdict(&self.board) {
            Verdict::Ongoing => MatchState::AwaitingMove(marker.opponent()),
            Verdict::Win(m) => MatchState::Terminal(Outcome::Win(m)),
            Verdict::Tie => MatchState::Terminal(Outcome::Tie),
        };
        Ok(self.state)
    }
}

/// Who decides a player's moves.
#[derive(Clone, Debug)]
pub enum Controller {
    Human,
    Computer(Heuristic),
}

/// A named participant holding one marker for the whole session.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub marker: Marker,
    pub controller: Controller,
}

impl Player {
    pub fn human(name: impl Into<String>, marker: Marker) -> Self {
        Self {
            name: name.into(),
            marker,
            controller: Controller::Human,
        }
    }

    /// A computer player; the heuristic plays the same marker.
    pub fn computer(name: impl Into<String>, heuristic: Heuristic) -> Self {
        Self {
            name: name.into(),
            marker: heuristic.marker(),
            controller: Controller::Computer(heuristic),
        }
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.controller, Controller::Computer(_))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.marker)
    }
}

/// Win counts per seat, kept across replays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    entries: [(String, u32); 2],
}

impl Scoreboard {
    /// Zeroed scores for the X and O players.
    pub fn new(x_name: impl Into<String>, o_name: impl Into<String>) -> Self {
        Self {
            entries: [(x_name.into(), 0), (o_name.into(), 0)],
        }
    }

    /// Credit the winner; ties leave the scores alone.
    pub fn record(&mut self, outcome: Outcome) {
        if let Outcome::Win(m) = outcome {
            self.entries[m.seat()].1 += 1;
        }
    }

    pub fn wins_for(&self, marker: Marker) -> u32 {
        self.entries[marker.seat()].1
    }

    /// Wins for the first seat with this display name.
    pub fn wins(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }

    /// `(name, marker, wins)` in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Marker, u32)> + '_ {
        [Marker::X, Marker::O].into_iter().map(|m| {
            let (name, wins) = &self.entries[m.seat()];
            (name.as_str(), m, *wins)
        })
    }
}
