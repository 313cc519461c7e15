//! Console Tic Tac Toe.
//!
//! ## Usage
//!
//! - `tic-tac-toe` - Play interactively (same as `play`)
//! - `tic-tac-toe play --mode vs-computer --player-x Ann` - Skip the prompts
//! - `tic-tac-toe demo --matches 5` - Watch the computer play itself
//!
//! Set `RUST_LOG=debug` to log every move to stderr.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tic_tac_toe::config::{GameMode, Settings};
use tic_tac_toe::console::Console;
use tic_tac_toe::constants::DEMO_MATCHES;
use tic_tac_toe::opponent::TieBreak;
use tic_tac_toe::session::{DisplaySink, Session};

/// Tic Tac Toe in the terminal, against a friend or the computer
#[derive(Parser)]
#[command(name = "tic-tac-toe")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: PlayOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session
    Play(PlayOptions),
    /// Watch two computer players
    Demo(DemoOptions),
}

#[derive(Args, Clone, Default)]
struct PlayOptions {
    /// Game mode; asked interactively when omitted
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Name of the X player
    #[arg(long)]
    player_x: Option<String>,

    /// Name of the O player (two-player mode only)
    #[arg(long)]
    player_o: Option<String>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// How the computer picks among equally good cells
    #[arg(long, value_enum, default_value_t = TieBreakArg::CornersFirst)]
    tie_break: TieBreakArg,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Do not clear the screen between turns
    #[arg(long)]
    no_clear: bool,
}

#[derive(Args, Clone)]
struct DemoOptions {
    /// Number of matches to play
    #[arg(long, default_value_t = DEMO_MATCHES)]
    matches: u32,

    /// Seed for both computers' random choices
    #[arg(long)]
    seed: Option<u64>,

    /// How the computers pick among equally good cells
    #[arg(long, value_enum, default_value_t = TieBreakArg::CornersFirst)]
    tie_break: TieBreakArg,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum ModeArg {
    TwoPlayers,
    VsComputer,
}

#[derive(Copy, Clone, Default, ValueEnum)]
enum TieBreakArg {
    #[default]
    CornersFirst,
    Uniform,
}

impl PlayOptions {
    fn settings(&self) -> Settings {
        Settings {
            mode: self.mode.map(|m| match m {
                ModeArg::TwoPlayers => GameMode::TwoPlayers,
                ModeArg::VsComputer => GameMode::VsComputer,
            }),
            player_x: self.player_x.clone(),
            player_o: self.player_o.clone(),
            seed: self.seed,
            tie_break: self.tie_break.into(),
            color: !self.no_color,
            clear_screen: !self.no_clear,
        }
    }
}

impl DemoOptions {
    /// Demo output is a transcript, so the screen is never cleared.
    fn settings(&self) -> Settings {
        Settings {
            seed: self.seed,
            tie_break: self.tie_break.into(),
            color: !self.no_color,
            clear_screen: false,
            ..Settings::default()
        }
    }
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::CornersFirst => TieBreak::CornersFirst,
            TieBreakArg::Uniform => TieBreak::Uniform,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(options)) => play(&options.settings()),
        Some(Commands::Demo(options)) => run_demo(options.matches, &options.settings()),
        None => play(&cli.options.settings()),
    }
}

fn play(settings: &Settings) -> Result<()> {
    let mut console = Console::stdio(settings);
    console.banner()?;

    let Some(mut session) = Session::setup(&mut console, settings)? else {
        info!("quit during setup");
        return console.quit();
    };
    session.run(&mut console)?;
    Ok(())
}

fn run_demo(matches: u32, settings: &Settings) -> Result<()> {
    let mut console = Console::stdio(settings);
    let mut session = Session::computers(settings)?;

    println!("Playing {matches} computer-vs-computer matches\n");
    for _ in 0..matches {
        session.play_match(&mut console)?;
    }
    console.farewell(session.scores())
}
