//! Interactive terminal game loop.
//!
//! The loop waits on two things at once: the next line of input and the
//! session's next deadline. An overdue deadline always wins over input, and
//! input runs due tasks before it is applied. The board is redrawn after
//! each step.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};
use vanishing_core::{
    Cue, GameClock, GameConfig, GameSession, PlayerId, Position, RandomSource, SessionEvent,
    SessionSnapshot, Status, Termination,
};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place on a cell.
    Cell(Position),
    /// Start over.
    Reset,
    /// Leave the game.
    Quit,
    /// Blank line; just redraw.
    Redraw,
    /// Anything else.
    Unknown,
}

impl Input {
    /// Parses a cell number (1-9), a cell label, `reset` or `quit`.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Input::Redraw,
            "reset" | "r" => Input::Reset,
            "quit" | "q" | "exit" => Input::Quit,
            _ => Position::from_label_or_number(trimmed)
                .map(Input::Cell)
                .unwrap_or(Input::Unknown),
        }
    }
}

const HELP: &str = "Enter a cell (1-9 or a name like \"center\"), \"reset\" or \"quit\".";

/// What the loop does after an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Redraw the board.
    Redraw,
    /// Print a message, then redraw.
    Message(String),
    /// Leave the game.
    Quit,
}

/// Applies one input line at time `now`.
///
/// Tasks already due run first, so a move typed after the clock ran out is
/// reported as game over instead of being played.
pub fn handle_input<R: RandomSource>(
    game: &mut GameSession<R>,
    input: Input,
    now: Duration,
) -> Step {
    let ran = game.advance(now);
    debug!(ran, ?input, "Handling input");
    match input {
        Input::Quit => Step::Quit,
        Input::Reset => {
            game.reset(now);
            Step::Redraw
        }
        Input::Cell(position) => match game.submit_move(position.to_index(), now) {
            Ok(_) => Step::Redraw,
            Err(err) => Step::Message(err.to_string()),
        },
        Input::Redraw => Step::Redraw,
        Input::Unknown => Step::Message(HELP.to_string()),
    }
}

/// Plays one interactive session on stdin/stdout until the player quits.
#[instrument(skip(config), fields(vs_computer = *config.vs_computer()))]
pub async fn play(config: GameConfig, seed: Option<u64>) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let start = Instant::now();
    let mut game = GameSession::new(config, rng, Duration::ZERO);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    println!("{}", render(&game.snapshot(), game.config()));

    loop {
        let deadline = game.next_deadline();
        tokio::select! {
            biased;

            _ = sleep_until(start + deadline.unwrap_or_default()), if deadline.is_some() => {
                let ran = game.advance(start.elapsed());
                debug!(ran, "Deadline reached");
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    info!("Input closed");
                    break;
                };
                match handle_input(&mut game, Input::parse(&line), start.elapsed()) {
                    Step::Quit => break,
                    Step::Message(message) => println!("{}", message),
                    Step::Redraw => {}
                }
            }
        }

        for event in game.drain_events() {
            announce(&event, game.config());
        }
        println!("{}", render(&game.snapshot(), game.config()));
    }

    info!("Leaving game");
    Ok(())
}

fn announce(event: &SessionEvent, config: &GameConfig) {
    if let Some(cue) = event.cue() {
        debug!(?cue, "Sound cue");
        if cue == Cue::Win {
            print!("\x07");
        }
    }
    match event {
        SessionEvent::BonusCredited { player, seconds } => {
            println!("+{}s quick-move bonus for {}!", seconds, config.player(*player).name());
        }
        SessionEvent::SessionReset => println!("New game."),
        _ => {}
    }
}

/// Formats seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Renders the board and status lines for a snapshot.
pub fn render(snapshot: &SessionSnapshot, config: &GameConfig) -> String {
    let name = move |player: PlayerId| config.player(player).name().as_str();
    let mut out = format!("\n{}\n\n", snapshot.board.display());

    match snapshot.clock {
        GameClock::Unbounded => {}
        GameClock::Shared { remaining } => {
            out.push_str(&format!("Time left: {}\n", format_clock(remaining)));
        }
        GameClock::PerPlayer {
            player_one,
            player_two,
        } => {
            out.push_str(&format!(
                "{} {} | {} {}\n",
                name(PlayerId::One),
                format_clock(player_one),
                name(PlayerId::Two),
                format_clock(player_two)
            ));
        }
    }

    let status = match snapshot.status {
        Status::AwaitingMove(player) if config.is_computer(player) => {
            format!("{} is thinking...", name(player))
        }
        Status::AwaitingMove(player) => {
            let turn = format!("{}'s turn ({})", name(player), snapshot.next_glyph);
            match snapshot.quick_move_remaining.filter(|s| *s > 0) {
                Some(seconds) => format!("{} - move within {}s for a bonus", turn, seconds),
                None => turn,
            }
        }
        Status::Terminal(Termination::Won(line)) => format!("{} wins!", name(line.owner)),
        Status::Terminal(Termination::TimeExpired { loser }) => {
            format!("Time's up! {} wins!", name(loser.other()))
        }
    };
    out.push_str(&status);
    out
}
