//! Terminal front end.
//!
//! [`Console`] implements every session seam over a line-oriented reader and
//! a writer, so it runs on stdin/stdout in the binary and on in-memory
//! buffers in tests. Colors and screen clearing go through crossterm and can
//! both be switched off.

use std::fmt;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::num::IntErrorKind;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};

use crate::board::{Board, Cell, Coordinate, Marker};
use crate::config::{GameMode, Settings};
use crate::constants::{QUIT_WORDS, SIDE};
use crate::error::MoveError;
use crate::game::{Outcome, Player, Scoreboard};
use crate::session::{DisplaySink, HumanInput, MoveSource, SessionControl};

const RULE_WIDTH: usize = 50;

fn is_quit_word(text: &str) -> bool {
    QUIT_WORDS.iter().any(|w| text.trim().eq_ignore_ascii_case(w))
}

/// One side of `row,col`. Numbers too large for `i32` saturate, so they
/// still report as out of range rather than malformed.
fn parse_axis(text: &str) -> Option<i32> {
    match text.trim().parse::<i32>() {
        Ok(v) => Some(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i32::MAX),
            IntErrorKind::NegOverflow => Some(i32::MIN),
            _ => None,
        },
    }
}

/// Parse one answer at the move prompt: a quit word or `row,col`.
pub fn parse_move(text: &str) -> HumanInput {
    let text = text.trim();
    if is_quit_word(text) {
        return HumanInput::Quit;
    }
    let coord = text
        .split_once(',')
        .and_then(|(row, col)| Some(Coordinate::new(parse_axis(row)?, parse_axis(col)?)));
    match coord {
        Some(coord) => HumanInput::At(coord),
        None => HumanInput::Unparsable(text.to_string()),
    }
}

pub struct Console<R, W> {
    input: R,
    out: W,
    color: bool,
    clear_screen: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process's stdin and stdout.
    pub fn stdio(settings: &Settings) -> Self {
        Console::new(io::stdin().lock(), io::stdout(), settings)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, settings: &Settings) -> Self {
        Self {
            input,
            out,
            color: settings.color,
            clear_screen: settings.clear_screen,
        }
    }

    /// Give back the writer, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Title shown once at startup.
    pub fn banner(&mut self) -> Result<()> {
        self.clear()?;
        let title = self.paint("TIC TAC TOE", Color::Cyan);
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}\n", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn paint(&self, text: impl fmt::Display, color: Color) -> String {
        if self.color {
            text.to_string().with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_marker(&self, marker: Marker) -> String {
        match marker {
            Marker::X => self.paint(marker, Color::Green),
            Marker::O => self.paint(marker, Color::Blue),
        }
    }

    fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn header(&mut self, players: &[Player; 2]) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        let title = self.paint("TIC TAC TOE", Color::Cyan);
        let names = self.paint(
            format!("{} vs {}", players[0], players[1]),
            Color::Yellow,
        );
        writeln!(self.out, "\n{rule}")?;
        writeln!(self.out, "    {title}  -  {names}")?;
        writeln!(self.out, "{rule}\n")?;
        Ok(())
    }

    fn grid(&mut self, board: &Board) -> Result<()> {
        writeln!(self.out, "    1       2       3")?;
        writeln!(self.out, "  ┌───────┬───────┬───────┐")?;
        for row in 0..SIDE {
            let cells: Vec<String> = (0..SIDE)
                .map(|col| match board.get(row * SIDE + col) {
                    Some(Cell::Taken(m)) => format!("   {}   ", self.paint_marker(m)),
                    _ => " ".repeat(7),
                })
                .collect();
            writeln!(self.out, "{} │{}│", row + 1, cells.join("│"))?;
            if row + 1 < SIDE {
                writeln!(self.out, "  ├───────┼───────┼───────┤")?;
            }
        }
        writeln!(self.out, "  └───────┴───────┴───────┘\n")?;
        Ok(())
    }

    fn score_lines(&mut self, scores: &Scoreboard, with_markers: bool) -> Result<()> {
        for (name, marker, wins) in scores.iter() {
            if with_markers {
                writeln!(self.out, "  {name} ({marker}): {wins}")?;
            } else {
                writeln!(self.out, "  {name}: {wins}")?;
            }
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> MoveSource for Console<R, W> {
    fn next_input(&mut self, _board: &Board, player: &Player) -> Result<HumanInput> {
        let prompt = format!(
            "{}'s turn ({}) - Enter move (row,col): ",
            player.name, player.marker
        );
        Ok(match self.ask(&prompt)? {
            Some(line) => parse_move(&line),
            None => HumanInput::Quit,
        })
    }
}

impl<R: BufRead, W: Write> DisplaySink for Console<R, W> {
    fn show_turn(&mut self, board: &Board, players: &[Player; 2], active: &Player) -> Result<()> {
        self.clear()?;
        self.header(players)?;
        let marker = self.paint_marker(active.marker);
        let status = self.paint(format!("Current Turn: {}: ", active.name), Color::Magenta);
        writeln!(self.out, "\n{status}{marker}\n")?;
        self.grid(board)
    }

    fn invalid_move(&mut self, err: &MoveError) -> Result<()> {
        let msg = self.paint(err, Color::Red);
        writeln!(self.out, "{msg}")?;
        Ok(())
    }

    fn match_over(
        &mut self,
        board: &Board,
        players: &[Player; 2],
        outcome: Outcome,
        scores: &Scoreboard,
    ) -> Result<()> {
        self.clear()?;
        self.header(players)?;
        self.grid(board)?;
        let verdict = match outcome {
            Outcome::Win(m) => {
                let winner = &players[m.seat()];
                self.paint(format!("{winner} wins!"), Color::Green)
            }
            Outcome::Tie => self.paint("It's a tie!", Color::Yellow),
        };
        writeln!(self.out, "{verdict}\n")?;
        let heading = self.paint("Match Score:", Color::Magenta);
        writeln!(self.out, "{heading}")?;
        self.score_lines(scores, true)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn farewell(&mut self, scores: &Scoreboard) -> Result<()> {
        writeln!(self.out, "\nThanks for playing!")?;
        writeln!(self.out, "Final Scores:")?;
        self.score_lines(scores, false)?;
        self.out.flush()?;
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        writeln!(self.out, "Exiting game. Goodbye!")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> SessionControl for Console<R, W> {
    fn choose_mode(&mut self) -> Result<Option<GameMode>> {
        loop {
            let Some(answer) = self.ask("Choose mode:\n1. Two Players\n2. Play vs AI\nSelect (1-2): ")?
            else {
                return Ok(None);
            };
            if is_quit_word(&answer) {
                return Ok(None);
            }
            match answer.as_str() {
                "1" => return Ok(Some(GameMode::TwoPlayers)),
                "2" => return Ok(Some(GameMode::VsComputer)),
                _ => {
                    let msg = self.paint("Invalid choice. Enter 1 or 2.", Color::Red);
                    writeln!(self.out, "{msg}")?;
                }
            }
        }
    }

    fn player_name(&mut self, label: &str) -> Result<Option<String>> {
        self.ask(&format!("{label}: "))
    }

    fn replay(&mut self) -> Result<bool> {
        let answer = self.ask("Play again? (y/n): ")?;
        Ok(matches!(
            answer.map(|a| a.to_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }
}
