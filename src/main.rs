//! Match CLI for Azul
//!
//! Plays a series of games between two agents and reports each result plus
//! an aggregate summary, as text or JSON lines.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use azul::display::format_outcome;
use azul::search::{play_game, Agent, GameRecord, MctsAgent, MctsConfig, RandomAgent};
use azul::{Outcome, NUM_PLAYERS};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Random,
    Mcts,
}

/// Play Azul matches between two agents
#[derive(Parser, Debug)]
#[command(name = "azul-mcts")]
#[command(about = "Play Azul games between MCTS and random agents", long_about = None)]
struct Args {
    /// How many games to play
    #[arg(short = 'n', long, default_value_t = 10)]
    games: usize,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Agent playing as player 0
    #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
    player1: AgentKind,

    /// Agent playing as player 1
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    player2: AgentKind,

    /// MCTS iterations per move
    #[arg(long, default_value_t = 1000)]
    iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = 1.4)]
    exploration: f64,

    /// Per-move time limit for MCTS, in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Root-parallel MCTS workers
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Print one JSON object per game and a JSON summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log round and game events (shorthand for --log-level debug)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Log filter used when RUST_LOG is unset, e.g. "info" or "azul_search=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: usize,
    wins: [usize; NUM_PLAYERS],
    draws: usize,
    mean_scores: [f64; NUM_PLAYERS],
    mean_turns: f64,
}

impl Summary {
    fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: records.len(),
            ..Default::default()
        };
        if records.is_empty() {
            return summary;
        }
        let n = records.len() as f64;
        for record in records {
            match record.outcome {
                Outcome::Winner(p) => summary.wins[p as usize] += 1,
                Outcome::Draw => summary.draws += 1,
            }
            for p in 0..NUM_PLAYERS {
                summary.mean_scores[p] += record.scores[p] as f64 / n;
            }
            summary.mean_turns += record.turns as f64 / n;
        }
        summary
    }
}

fn mcts_config(args: &Args) -> MctsConfig {
    let mut config = MctsConfig::default()
        .with_iterations(args.iterations)
        .with_exploration(args.exploration)
        .with_workers(args.workers);
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }
    config
}

fn build_agent(kind: AgentKind, config: &MctsConfig) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::new()),
        AgentKind::Mcts => Box::new(MctsAgent::new(config.clone())),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_filter = if args.verbose { "debug" } else { args.log_level.as_str() };
    initialize_logging(log_filter)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, games = args.games, "starting matches");
    let mut rng = StdRng::seed_from_u64(seed);

    let config = mcts_config(&args);
    let mut first = build_agent(args.player1, &config);
    let mut second = build_agent(args.player2, &config);

    let mut records = Vec::with_capacity(args.games);
    for game_idx in 0..args.games {
        let record = play_game([first.as_mut(), second.as_mut()], &mut rng)
            .with_context(|| format!("game {game_idx} failed"))?;

        if args.json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!(
                "game {:>3}: {} {:>3} - {:>3} {}  ({}, {} rounds, {} turns)",
                game_idx,
                record.players[0],
                record.scores[0],
                record.scores[1],
                record.players[1],
                format_outcome(record.outcome),
                record.rounds,
                record.turns
            );
        }
        records.push(record);
    }

    let summary = Summary::from_records(&records);
    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "\n{} games: {} wins {}, {} wins {}, {} draws",
            summary.games,
            first.name(),
            summary.wins[0],
            second.name(),
            summary.wins[1],
            summary.draws
        );
        println!(
            "mean scores: {:.1} - {:.1}, mean turns {:.1}",
            summary.mean_scores[0], summary.mean_scores[1], summary.mean_turns
        );
    }

    Ok(())
}

fn initialize_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter {default_filter:?}"))?,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
    Ok(())
}
