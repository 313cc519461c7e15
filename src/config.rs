//! Session settings gathered from the command line.

use std::fmt;

use crate::opponent::TieBreak;

/// Who plays the O seat.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    TwoPlayers,
    VsComputer,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::TwoPlayers => write!(f, "two players"),
            GameMode::VsComputer => write!(f, "vs computer"),
        }
    }
}

/// Everything a session needs before the first prompt.
///
/// Unset fields are asked for interactively.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub mode: Option<GameMode>,
    pub player_x: Option<String>,
    pub player_o: Option<String>,
    pub seed: Option<u64>,
    pub tie_break: TieBreak,
    pub color: bool,
    pub clear_screen: bool,
}

impl Settings {
    /// Random source for a computer player; `salt` separates the two seats
    /// when both are computers.
    pub fn rng(&self, salt: u64) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(salt)),
            None => fastrand::Rng::new(),
        }
    }
}
