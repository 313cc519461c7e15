//! Turn acquisition, the replay loop, and the seams to the outside world.
//!
//! The session owns both players and the scoreboard. Each match gets a fresh
//! [`Match`]; scores carry over until the session ends. Front ends plug in
//! through three traits:
//!
//! - [`MoveSource`] - human moves (or a quit signal)
//! - [`DisplaySink`] - board renders, errors, results
//! - [`SessionControl`] - mode, names, and the replay decision

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::board::{Board, Coordinate, Marker};
use crate::config::{GameMode, Settings};
use crate::constants::{COMPUTER_NAME, DEFAULT_PLAYER_O, DEFAULT_PLAYER_X, DEFAULT_SOLO_NAME};
use crate::error::{MoveError, SeatConflict};
use crate::game::{Controller, Match, MatchState, Outcome, Player, Scoreboard};
use crate::opponent::Heuristic;

/// One answer from a human at the move prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HumanInput {
    Quit,
    At(Coordinate),
    Unparsable(String),
}

/// Supplies human moves. Blocks until the player answers.
pub trait MoveSource {
    fn next_input(&mut self, board: &Board, player: &Player) -> Result<HumanInput>;
}

/// Receives everything the players should see.
pub trait DisplaySink {
    /// Called before every move with the current board and the player to move.
    fn show_turn(&mut self, board: &Board, players: &[Player; 2], active: &Player) -> Result<()>;

    /// A rejected move; the same player is asked again.
    fn invalid_move(&mut self, err: &MoveError) -> Result<()>;

    /// Final board, verdict, and the scores after crediting the winner.
    fn match_over(
        &mut self,
        board: &Board,
        players: &[Player; 2],
        outcome: Outcome,
        scores: &Scoreboard,
    ) -> Result<()>;

    /// The player declined a replay.
    fn farewell(&mut self, scores: &Scoreboard) -> Result<()>;

    /// The player quit mid-match.
    fn quit(&mut self) -> Result<()>;
}

/// Session-level questions. `None` means the input ended.
pub trait SessionControl {
    fn choose_mode(&mut self) -> Result<Option<GameMode>>;

    /// Ask for a name; a blank answer selects the default.
    fn player_name(&mut self, label: &str) -> Result<Option<String>>;

    fn replay(&mut self) -> Result<bool>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchEnd {
    Finished(Outcome),
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Replay declined after the last match.
    Completed,
    Quit,
}

pub struct Session {
    players: [Player; 2],
    scores: Scoreboard,
    matches: u32,
}

impl Session {
    /// Seat the two players by marker, in either argument order.
    pub fn new(a: Player, b: Player) -> Result<Self, SeatConflict> {
        if a.marker == b.marker {
            return Err(SeatConflict(a.marker));
        }
        let players = if a.marker.seat() == 0 { [a, b] } else { [b, a] };
        let scores = Scoreboard::new(players[0].name.clone(), players[1].name.clone());
        Ok(Self {
            players,
            scores,
            matches: 0,
        })
    }

    /// Build a session from settings, asking for whatever is missing.
    ///
    /// Returns `None` if the input ends before setup completes.
    #[instrument(skip_all)]
    pub fn setup<F: SessionControl>(io: &mut F, settings: &Settings) -> Result<Option<Self>> {
        let mode = match settings.mode {
            Some(mode) => mode,
            None => match io.choose_mode()? {
                Some(mode) => mode,
                None => return Ok(None),
            },
        };

        let session = match mode {
            GameMode::TwoPlayers => {
                let preset = settings.player_x.as_deref();
                let Some(x) = ask_name(io, preset, "Player 1 name (X)", DEFAULT_PLAYER_X)? else {
                    return Ok(None);
                };
                let preset = settings.player_o.as_deref();
                let Some(o) = ask_name(io, preset, "Player 2 name (O)", DEFAULT_PLAYER_O)? else {
                    return Ok(None);
                };
                Session::new(Player::human(x, Marker::X), Player::human(o, Marker::O))?
            }
            GameMode::VsComputer => {
                let preset = settings.player_x.as_deref();
                let Some(x) = ask_name(io, preset, "Your name (X)", DEFAULT_SOLO_NAME)? else {
                    return Ok(None);
                };
                let heuristic = Heuristic::new(Marker::O, settings.tie_break, settings.rng(1));
                Session::new(
                    Player::human(x, Marker::X),
                    Player::computer(COMPUTER_NAME, heuristic),
                )?
            }
        };

        info!(%mode, x = %session.players[0], o = %session.players[1], "session ready");
        Ok(Some(session))
    }

    /// Two computer players, for demos.
    pub fn computers(settings: &Settings) -> Result<Self, SeatConflict> {
        let x = Heuristic::new(Marker::X, settings.tie_break, settings.rng(0));
        let o = Heuristic::new(Marker::O, settings.tie_break, settings.rng(1));
        Session::new(
            Player::computer(format!("{COMPUTER_NAME} X"), x),
            Player::computer(format!("{COMPUTER_NAME} O"), o),
        )
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Matches finished so far.
    pub fn matches_played(&self) -> u32 {
        self.matches
    }

    /// Play matches until the players decline a replay or quit.
    #[instrument(skip_all)]
    pub fn run<F>(&mut self, io: &mut F) -> Result<SessionEnd>
    where
        F: MoveSource + DisplaySink + SessionControl,
    {
        loop {
            if self.play_match(io)? == MatchEnd::Quit {
                info!(matches = self.matches, "session quit");
                io.quit()?;
                return Ok(SessionEnd::Quit);
            }
            if !io.replay()? {
                info!(matches = self.matches, "session complete");
                io.farewell(&self.scores)?;
                return Ok(SessionEnd::Completed);
            }
        }
    }

    /// Play one match on a fresh board and credit the winner.
    #[instrument(skip_all, fields(match_no = self.matches + 1))]
    pub fn play_match<F>(&mut self, io: &mut F) -> Result<MatchEnd>
    where
        F: MoveSource + DisplaySink,
    {
        let mut game = Match::new();
        loop {
            let marker = match game.state() {
                MatchState::AwaitingMove(marker) => marker,
                MatchState::Terminal(outcome) => {
                    self.scores.record(outcome);
                    self.matches += 1;
                    info!(?outcome, moves = game.history().len(), "match over");
                    io.match_over(game.board(), &self.players, outcome, &self.scores)?;
                    return Ok(MatchEnd::Finished(outcome));
                }
            };

            let seat = marker.seat();
            io.show_turn(game.board(), &self.players, &self.players[seat])?;

            let computed = match &mut self.players[seat].controller {
                Controller::Computer(heuristic) => Some(heuristic.choose_move(game.board())?),
                Controller::Human => None,
            };
            match computed {
                Some(pt) => {
                    game.play(pt)?;
                }
                None => {
                    if !human_turn(io, &mut game, &self.players[seat])? {
                        return Ok(MatchEnd::Quit);
                    }
                }
            }
            if let Some(last) = game.history().last() {
                debug!(marker = %last.marker, index = last.index, "move applied");
            }
        }
    }
}

/// Ask until the human makes a legal move. Returns `false` on quit.
fn human_turn<F>(io: &mut F, game: &mut Match, player: &Player) -> Result<bool>
where
    F: MoveSource + DisplaySink,
{
    loop {
        let index = match io.next_input(game.board(), player)? {
            HumanInput::Quit => return Ok(false),
            HumanInput::At(coord) => coord.to_index(),
            HumanInput::Unparsable(text) => Err(MoveError::Malformed(text)),
        };
        match index.and_then(|pt| game.play(pt)) {
            Ok(_) => return Ok(true),
            Err(err) => {
                debug!(%err, player = %player.name, "move rejected");
                io.invalid_move(&err)?;
            }
        }
    }
}

fn ask_name<F: SessionControl>(
    io: &mut F,
    preset: Option<&str>,
    label: &str,
    default: &str,
) -> Result<Option<String>> {
    let answer = match preset {
        Some(name) => Some(name.to_string()),
        None => io.player_name(label)?,
    };
    Ok(answer.map(|name| {
        let name = name.trim();
        if name.is_empty() {
            default.to_string()
        } else {
            name.to_string()
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::opponent::TieBreak;

    /// Front end fed from queues, recording what it was shown.
    #[derive(Default)]
    struct Scripted {
        inputs: VecDeque<HumanInput>,
        names: VecDeque<String>,
        modes: VecDeque<GameMode>,
        replays: VecDeque<bool>,
        turns: Vec<Board>,
        errors: Vec<MoveError>,
        outcomes: Vec<Outcome>,
        farewells: usize,
        quits: usize,
    }

    impl Scripted {
        fn moves(coords: &[(i32, i32)]) -> Self {
            Self {
                inputs: coords
                    .iter()
                    .map(|&(r, c)| HumanInput::At(Coordinate::new(r, c)))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl MoveSource for Scripted {
        fn next_input(&mut self, _board: &Board, _player: &Player) -> Result<HumanInput> {
            Ok(self.inputs.pop_front().unwrap_or(HumanInput::Quit))
        }
    }

    impl DisplaySink for Scripted {
        fn show_turn(&mut self, board: &Board, _: &[Player; 2], _: &Player) -> Result<()> {
            self.turns.push(*board);
            Ok(())
        }

        fn invalid_move(&mut self, err: &MoveError) -> Result<()> {
            self.errors.push(err.clone());
            Ok(())
        }

        fn match_over(
            &mut self,
            _: &Board,
            _: &[Player; 2],
            outcome: Outcome,
            _: &Scoreboard,
        ) -> Result<()> {
            self.outcomes.push(outcome);
            Ok(())
        }

        fn farewell(&mut self, _: &Scoreboard) -> Result<()> {
            self.farewells += 1;
            Ok(())
        }

        fn quit(&mut self) -> Result<()> {
            self.quits += 1;
            Ok(())
        }
    }

    impl SessionControl for Scripted {
        fn choose_mode(&mut self) -> Result<Option<GameMode>> {
            Ok(self.modes.pop_front())
        }

        fn player_name(&mut self, _label: &str) -> Result<Option<String>> {
            Ok(self.names.pop_front())
        }

        fn replay(&mut self) -> Result<bool> {
            Ok(self.replays.pop_front().unwrap_or(false))
        }
    }

    fn two_humans() -> Session {
        Session::new(
            Player::human("Ann", Marker::X),
            Player::human("Bob", Marker::O),
        )
        .unwrap()
    }

    #[test]
    fn test_human_win_scores_once() {
        let mut session = two_humans();
        let mut io = Scripted::moves(&[(1, 1), (2, 2), (1, 2), (2, 3), (1, 3)]);

        assert_eq!(
            session.play_match(&mut io).unwrap(),
            MatchEnd::Finished(Outcome::Win(Marker::X))
        );
        assert_eq!(session.scores().wins("Ann"), Some(1));
        assert_eq!(session.scores().wins("Bob"), Some(0));
        assert_eq!(io.turns.len(), 5);
        assert!(io.turns[0] == Board::new());
    }

    #[test]
    fn test_invalid_moves_are_retried() {
        let mut session = two_humans();
        let mut io = Scripted::moves(&[(1, 1), (1, 1), (4, 2), (2, 2)]);
        io.inputs.insert(2, HumanInput::Unparsable("nope".into()));

        assert_eq!(session.play_match(&mut io).unwrap(), MatchEnd::Quit);
        assert_eq!(
            io.errors,
            vec![
                MoveError::Occupied { index: 0 },
                MoveError::Malformed("nope".into()),
                MoveError::CoordinateOutOfRange { row: 4, col: 2 },
            ]
        );
        // X at 1,1 and O at 2,2; the third turn was shown before the quit.
        assert_eq!(io.turns.len(), 3);
        assert_eq!(io.turns[2].marker_at(4), Some(Marker::O));
        assert_eq!(session.scores().wins_for(Marker::X), 0);
        assert_eq!(session.matches_played(), 0);
    }

    #[test]
    fn test_run_replays_and_keeps_scores() {
        let mut session = two_humans();
        let first = [(1, 1), (2, 2), (1, 2), (2, 3), (1, 3)];
        let second = [(1, 1), (2, 1), (1, 2), (2, 2), (3, 3), (2, 3)];
        let mut io = Scripted::moves(&[&first[..], &second[..]].concat());
        io.replays = VecDeque::from([true, false]);

        assert_eq!(session.run(&mut io).unwrap(), SessionEnd::Completed);
        assert_eq!(
            io.outcomes,
            vec![Outcome::Win(Marker::X), Outcome::Win(Marker::O)]
        );
        assert_eq!(session.scores().wins("Ann"), Some(1));
        assert_eq!(session.scores().wins("Bob"), Some(1));
        assert_eq!(session.matches_played(), 2);
        assert_eq!(io.farewells, 1);
        // Second match starts again from an empty board.
        assert_eq!(io.turns[5], Board::new());
    }

    #[test]
    fn test_quit_ends_session_without_scoring() {
        let mut session = two_humans();
        let mut io = Scripted::moves(&[(1, 1)]);

        assert_eq!(session.run(&mut io).unwrap(), SessionEnd::Quit);
        assert_eq!(io.quits, 1);
        assert_eq!(io.farewells, 0);
        assert!(io.outcomes.is_empty());
    }

    #[test]
    fn test_computer_answers_with_center() {
        let mut session = Session::new(
            Player::human("Ann", Marker::X),
            Player::computer("Computer", Heuristic::seeded(Marker::O, TieBreak::CornersFirst, 5)),
        )
        .unwrap();
        let mut io = Scripted::moves(&[(1, 1)]);

        assert_eq!(session.play_match(&mut io).unwrap(), MatchEnd::Quit);
        // Turn 3 shows X at 0 and the computer's reply in the center.
        assert_eq!(io.turns.len(), 3);
        assert_eq!(io.turns[2].marker_at(0), Some(Marker::X));
        assert_eq!(io.turns[2].marker_at(4), Some(Marker::O));
    }

    #[test]
    fn test_players_seated_by_marker() {
        let mut session = Session::new(
            Player::human("Bob", Marker::O),
            Player::human("Ann", Marker::X),
        )
        .unwrap();
        assert_eq!(session.players()[0].name, "Ann");
        assert_eq!(session.players()[1].name, "Bob");

        let mut io = Scripted::moves(&[(1, 1), (2, 2), (1, 2), (2, 3), (1, 3)]);
        assert_eq!(
            session.play_match(&mut io).unwrap(),
            MatchEnd::Finished(Outcome::Win(Marker::X))
        );
        assert_eq!(session.scores().wins("Ann"), Some(1));
        assert_eq!(session.scores().wins("Bob"), Some(0));
    }

    #[test]
    fn test_same_marker_twice_is_rejected() {
        let seated = Session::new(
            Player::human("Ann", Marker::X),
            Player::human("Bob", Marker::X),
        );
        assert!(matches!(seated, Err(SeatConflict(Marker::X))));
    }

    #[test]
    fn test_computers_play_to_the_end() {
        let settings = Settings {
            seed: Some(11),
            ..Settings::default()
        };
        let mut session = Session::computers(&settings).unwrap();
        let mut io = Scripted::default();
        for _ in 0..10 {
            let end = session.play_match(&mut io).unwrap();
            assert!(matches!(end, MatchEnd::Finished(_)));
        }
        assert_eq!(session.matches_played(), 10);
        assert!(io.inputs.is_empty());
    }

    #[test]
    fn test_setup_two_players_with_defaults() {
        let mut io = Scripted {
            modes: VecDeque::from([GameMode::TwoPlayers]),
            names: VecDeque::from(["  ".to_string(), "Bob".to_string()]),
            ..Scripted::default()
        };
        let session = Session::setup(&mut io, &Settings::default()).unwrap().unwrap();
        assert_eq!(session.players()[0].name, DEFAULT_PLAYER_X);
        assert_eq!(session.players()[1].name, "Bob");
        assert!(!session.players()[1].is_computer());
    }

    #[test]
    fn test_setup_vs_computer_from_settings() {
        let mut io = Scripted::default();
        let settings = Settings {
            mode: Some(GameMode::VsComputer),
            player_x: Some("Ann".into()),
            ..Settings::default()
        };
        let session = Session::setup(&mut io, &settings).unwrap().unwrap();
        assert_eq!(session.players()[0].name, "Ann");
        assert_eq!(session.players()[1].name, COMPUTER_NAME);
        assert!(session.players()[1].is_computer());
    }

    #[test]
    fn test_setup_stops_when_input_ends() {
        let mut io = Scripted::default();
        assert!(Session::setup(&mut io, &Settings::default()).unwrap().is_none());
    }
}
