//! Self-play game generation.
//!
//! Plays complete games from the empty board with a configurable policy for
//! each side, recording every ply. Optimal play on both sides always ends in
//! a draw, and an optimal player never loses to a random one, which makes
//! self-play a useful end-to-end check of the search.

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::board::{initial_state, Move, Player, CELL_COUNT};
use crate::error::GameError;
use crate::eval::{is_terminal, outcome, utility, Outcome};
use crate::movegen::random_move;
use crate::protocol::encode_board;
use crate::resolve::apply_move;
use crate::search::{search, SearchConfig};

/// Errors that can stop a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// How a side chooses its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Plays the minimax move.
    Optimal,
    /// Plays a uniformly random legal move.
    Random,
}

/// Returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy '{0}', expected 'optimal' or 'random'")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimal" => Ok(Policy::Optimal),
            "random" => Ok(Policy::Random),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Optimal => f.write_str("optimal"),
            Policy::Random => f.write_str("random"),
        }
    }
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Policy for the first player.
    pub x_policy: Policy,
    /// Policy for the second player.
    pub o_policy: Policy,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Evaluate root moves in parallel during each search.
    pub parallel_search: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 1,
            x_policy: Policy::Optimal,
            o_policy: Policy::Optimal,
            threads: 1,
            seed: 0,
            parallel_search: false,
        }
    }
}

impl SelfPlayConfig {
    /// Returns the policy that moves for `player`.
    pub fn policy_for(&self, player: Player) -> Policy {
        match player {
            Player::X => self.x_policy,
            Player::O => self.o_policy,
        }
    }

    fn rng_for_game(&self, game_id: usize) -> SmallRng {
        if self.seed != 0 {
            SmallRng::seed_from_u64(self.seed.wrapping_add(game_id as u64))
        } else {
            SmallRng::from_entropy()
        }
    }
}

/// A single recorded ply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyRecord {
    /// Notation of the board before the move.
    pub position: String,
    pub player: Player,
    #[serde(rename = "move")]
    pub mv: Move,
    /// Minimax value of the position, present when the mover searched.
    pub score: Option<i32>,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// All plies in order.
    pub plies: Vec<PlyRecord>,
    pub outcome: Outcome,
    /// Final score from X's perspective.
    pub utility: i32,
    /// Notation of the terminal board.
    pub final_position: String,
}

/// Win/draw counts over a set of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl Tally {
    /// Counts one finished game.
    pub fn add(&mut self, game: &GameRecord) {
        match game.outcome {
            Outcome::XWins => self.x_wins += 1,
            Outcome::OWins => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
    }

    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Plays one game from the initial state until it is decided.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut impl Rng,
) -> Result<GameRecord, GameError> {
    let search_config = SearchConfig {
        parallel: config.parallel_search,
    };
    let mut board = initial_state();
    let mut plies = Vec::with_capacity(CELL_COUNT);

    while !is_terminal(&board) {
        let player = board.current_player();
        let (mv, score) = match config.policy_for(player) {
            Policy::Optimal => {
                let result = search(&board, &search_config)?;
                (result.best_move, Some(result.score))
            }
            Policy::Random => (random_move(&board, rng), None),
        };
        let mv = mv.ok_or_else(|| GameError::invalid_state("no legal move on an ongoing board"))?;

        trace!(game_id, ?player, %mv, ?score, "ply");
        plies.push(PlyRecord {
            position: encode_board(&board),
            player,
            mv,
            score,
        });
        board = apply_move(&board, mv)?;
    }

    Ok(GameRecord {
        game_id,
        plies,
        outcome: outcome(&board),
        utility: utility(&board)?,
        final_position: encode_board(&board),
    })
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon and
/// the returned records are in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally (e.g. write to disk)
/// rather than waiting for all games to finish.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game)
    }
}

fn log_game(game: &GameRecord, completed: usize, total: usize, started: Instant) {
    info!(
        game_id = game.game_id,
        outcome = ?game.outcome,
        plies = game.plies.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "game {}/{} finished",
        completed,
        total
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = config.rng_for_game(i);
        let started = Instant::now();
        let game = play_game(config, i, &mut rng)?;
        log_game(&game, i + 1, config.num_games, started);
        on_game(game);
    }
    Ok(())
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let (tx, rx) = mpsc::channel::<Result<GameRecord, GameError>>();
    let worker_config = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..worker_config.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = worker_config.rng_for_game(i);
                    let started = Instant::now();
                    let game = play_game(&worker_config, i, &mut rng);
                    if let Ok(game) = &game {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(game, n, worker_config.num_games, started);
                    }
                    // The receiver is gone only if an earlier game failed.
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the calling thread and pass to callback.
    for game in rx {
        on_game(game?);
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one JSON line.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parse_board;

    #[test]
    fn optimal_self_play_is_a_draw() {
        let config = SelfPlayConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let game = play_game(&config, 0, &mut rng).unwrap();
        assert_eq!(game.outcome, Outcome::Draw);
        assert_eq!(game.utility, 0);
        assert_eq!(game.plies.len(), 9);
        assert!(game.plies.iter().all(|p| p.score == Some(0)));
    }

    #[test]
    fn plies_alternate_and_replay() {
        let config = SelfPlayConfig {
            x_policy: Policy::Random,
            o_policy: Policy::Random,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&config, 3, &mut rng).unwrap();
        assert_eq!(game.game_id, 3);

        let mut board = initial_state();
        for (i, ply) in game.plies.iter().enumerate() {
            let expected = if i % 2 == 0 { Player::X } else { Player::O };
            assert_eq!(ply.player, expected);
            assert_eq!(ply.score, None);
            assert_eq!(parse_board(&ply.position).unwrap(), board);
            board = apply_move(&board, ply.mv).unwrap();
        }
        assert_eq!(encode_board(&board), game.final_position);
        assert!(is_terminal(&board));
    }

    #[test]
    fn optimal_x_never_loses_to_random() {
        let config = SelfPlayConfig {
            num_games: 8,
            o_policy: Policy::Random,
            seed: 11,
            ..Default::default()
        };
        let games = run_self_play(&config).unwrap();
        assert_eq!(games.len(), 8);
        assert!(games.iter().all(|g| g.outcome != Outcome::OWins));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = SelfPlayConfig {
            num_games: 3,
            x_policy: Policy::Random,
            o_policy: Policy::Random,
            seed: 99,
            ..Default::default()
        };
        let a = run_self_play(&config).unwrap();
        let b = run_self_play(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_run_produces_correct_count() {
        let config = SelfPlayConfig {
            num_games: 6,
            x_policy: Policy::Random,
            o_policy: Policy::Optimal,
            threads: 2,
            seed: 77,
            ..Default::default()
        };
        let games = run_self_play(&config).unwrap();
        assert_eq!(games.len(), 6);
        let mut ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..6).collect::<Vec<_>>());
        assert!(games.iter().all(|g| g.outcome != Outcome::XWins));
    }

    #[test]
    fn jsonl_output_is_valid() {
        let config = SelfPlayConfig {
            num_games: 2,
            x_policy: Policy::Random,
            o_policy: Policy::Random,
            seed: 55,
            ..Default::default()
        };
        let games = run_self_play(&config).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        for (line, game) in lines.iter().zip(&games) {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("plies").is_some(), "Should contain plies");
            assert!(value["plies"][0].get("move").is_some(), "Should contain move");
            let parsed: GameRecord = serde_json::from_str(line).unwrap();
            assert_eq!(&parsed, game);
        }
    }

    #[test]
    fn tally_counts_outcomes() {
        let config = SelfPlayConfig {
            num_games: 5,
            x_policy: Policy::Random,
            o_policy: Policy::Random,
            seed: 5,
            ..Default::default()
        };
        let games = run_self_play(&config).unwrap();
        let mut tally = Tally::default();
        for g in &games {
            tally.add(g);
        }
        assert_eq!(tally.total(), 5);
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("optimal".parse::<Policy>(), Ok(Policy::Optimal));
        assert_eq!("Random".parse::<Policy>(), Ok(Policy::Random));
        assert_eq!(
            "greedy".parse::<Policy>(),
            Err(UnknownPolicy("greedy".to_string()))
        );
        assert_eq!(Policy::Random.to_string(), "random");
    }
}
