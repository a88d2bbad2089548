//! Self-play game generation CLI.
//!
//! Plays tic-tac-toe games from the empty board and writes one JSON record
//! per game to stdout or a file. With `--position`, searches a single
//! position instead and prints the search result as JSON.
//!
//! Logs go to stderr; set `RUST_LOG` to adjust verbosity (default `info`).
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::protocol::parse_board;
use tictactoe_engine::search::{search, SearchConfig};
use tictactoe_engine::selfplay::{self, Policy, SelfPlayConfig, Tally};

/// Plays tic-tac-toe against itself and records the games as JSONL.
#[derive(Parser, Debug)]
#[command(name = "selfplay", version, about, long_about = None)]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Policy for X: optimal or random
    #[arg(long = "x", default_value_t = Policy::Optimal)]
    x_policy: Policy,

    /// Policy for O: optimal or random
    #[arg(long = "o", default_value_t = Policy::Optimal)]
    o_policy: Policy,

    /// Number of parallel game threads
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Evaluate root moves in parallel during each search
    #[arg(long)]
    parallel_search: bool,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Search this position (e.g. "XX./OO./...") instead of playing games
    #[arg(long)]
    position: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut out: Box<dyn Write + Send> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    if let Some(position) = &cli.position {
        return run_position(position, cli.parallel_search, &mut out);
    }

    let config = SelfPlayConfig {
        num_games: cli.games,
        x_policy: cli.x_policy,
        o_policy: cli.o_policy,
        threads: cli.threads,
        seed: cli.seed,
        parallel_search: cli.parallel_search,
    };
    info!(
        games = config.num_games,
        x = %config.x_policy,
        o = %config.o_policy,
        threads = config.threads,
        "starting self-play"
    );

    let start = Instant::now();
    let mut tally = Tally::default();
    let mut write_result = Ok(());
    selfplay::run_self_play_with_callback(&config, |game| {
        tally.add(&game);
        if write_result.is_ok() {
            write_result = selfplay::write_game_json(&game, &mut out);
        }
    })?;
    write_result.context("failed to write output")?;
    out.flush().context("failed to flush output")?;

    info!(
        x_wins = tally.x_wins,
        o_wins = tally.o_wins,
        draws = tally.draws,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "completed {} games",
        tally.total()
    );
    Ok(())
}

/// Searches one position and writes the result as a JSON line.
fn run_position(position: &str, parallel: bool, out: &mut dyn Write) -> Result<()> {
    let board = parse_board(position).context("invalid position")?;
    let result = search(&board, &SearchConfig { parallel })?;
    serde_json::to_writer(&mut *out, &result)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
