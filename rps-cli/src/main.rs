//! Rock-Paper-Scissors in the terminal.
//!
//! Moves are read from stdin one per line; the best win streak is kept in a
//! small JSON file between runs.

mod command;
mod output;

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use command::{parse_command, read_input_line, Command, InputLine, HELP};
use output::{scoreboard_line, JsonSink, SessionSummary, TerminalSink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rps_core::config::DEFAULT_THINK_DELAY;
use rps_core::presentation::leaderboard_line;
use rps_core::{Difficulty, GameConfig, GameSession, JsonFileStore, PresentationSink};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rps")]
#[command(about = "Play Rock-Paper-Scissors against the computer")]
struct Args {
    /// Opponent difficulty: easy, normal or hard
    #[arg(short, long, env = "RPS_DIFFICULTY", default_value = "normal")]
    difficulty: Difficulty,

    /// Pause between showing the moves and showing the result, in milliseconds
    #[arg(long, env = "RPS_DELAY_MS", default_value_t = DEFAULT_THINK_DELAY.as_millis() as u64)]
    delay_ms: u64,

    /// File the best win streak is persisted in
    #[arg(long, env = "RPS_STORE", default_value = "rps-best-streak.json")]
    store: PathBuf,

    /// Seed for the opponent's random choices (reproducible games)
    #[arg(long, env = "RPS_SEED")]
    seed: Option<u64>,

    /// Emit one JSON object per round instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", text)?;
    stdout.flush()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = GameConfig::default()
        .with_difficulty(args.difficulty)
        .with_think_delay(Duration::from_millis(args.delay_ms));
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new(JsonFileStore::new(&args.store), rng, config);
    info!(
        store = %session.store().path().display(),
        difficulty = %session.difficulty(),
        think_delay = ?session.config().think_delay,
        "starting session"
    );
    let mut sink: Box<dyn PresentationSink> = if args.json {
        Box::new(JsonSink::new(io::stdout()))
    } else {
        Box::new(TerminalSink::new(io::stdout()))
    };
    let interactive = !args.json;

    if interactive {
        println!("{}", leaderboard_line(session.best_streak()));
        println!("Difficulty: {}  (type `help` for commands)", session.difficulty());
    }

    let mut input = io::stdin().lock();
    loop {
        if interactive {
            prompt("> ").context("failed to write prompt")?;
        }
        let line = match read_input_line(&mut input).context("failed to read from stdin")? {
            Some(InputLine::Text(line)) => line,
            Some(InputLine::Undecodable(len)) => {
                if interactive {
                    println!("input is not valid UTF-8");
                } else {
                    warn!(bytes = len, "ignoring input that is not valid UTF-8");
                }
                continue;
            }
            None => break,
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                if interactive {
                    println!("{}", e);
                } else {
                    warn!(input = %line.trim(), error = %e, "ignoring input");
                }
                continue;
            }
        };
        debug!(?command, "command received");

        match command {
            Command::Play(player_move) => {
                let report = session
                    .play_round(player_move, &mut *sink, &mut |d: Duration| {
                        thread::sleep(d)
                    })
                    .context("round could not be played")?;
                debug!(round = report.round, outcome = %report.outcome, "round complete");
            }
            Command::SetDifficulty(difficulty) => {
                session.set_difficulty(difficulty);
                if interactive {
                    println!("Difficulty: {}", difficulty);
                }
            }
            Command::Score => {
                if interactive {
                    println!("{}", scoreboard_line(&session.state()));
                    println!("{}", leaderboard_line(session.best_streak()));
                }
            }
            Command::Help => {
                if interactive {
                    println!("{}", HELP);
                }
            }
            Command::Quit => break,
        }
    }

    let summary = SessionSummary::new(session.history(), session.best_streak());
    if args.json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({ "summary": summary }))
                .context("failed to serialize summary")?
        );
    } else {
        println!();
        println!("{}", summary.render());
    }

    Ok(())
}
