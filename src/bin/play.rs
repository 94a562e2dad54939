//! Interactive CLI to play Azul against the MCTS agent
//!
//! Usage: cargo run --bin play [--iterations 2000] [--human-second]

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use azul::display::{display_board, format_action, BOLD, DIM, RESET};
use azul::search::{Agent, AgentError, MctsAgent, MctsConfig};
use azul::{apply_action, legal_actions, setup_game, Action, GameState, Outcome, Transition};

/// Play Azul against the MCTS agent
#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Play Azul against the MCTS agent", long_about = None)]
struct Args {
    /// MCTS iterations per AI move (more = stronger but slower)
    #[arg(long, default_value_t = 2000)]
    iterations: u32,

    /// Per-move time limit for the AI, in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Root-parallel MCTS workers
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Play as player 1 (AI goes first) instead of player 0
    #[arg(long)]
    human_second: bool,

    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

/// Reads moves from stdin by their index in the legal move list
struct HumanAgent<R> {
    input: R,
}

impl<R: BufRead> Agent for HumanAgent<R> {
    fn name(&self) -> &str {
        "human"
    }

    fn select_action(
        &mut self,
        state: &GameState,
        _rng: &mut dyn RngCore,
    ) -> Result<Action, AgentError> {
        let actions = legal_actions(state);
        if actions.is_empty() {
            return Err(AgentError::NoLegalActions);
        }

        println!("{BOLD}Your legal moves:{RESET}");
        for (i, action) in actions.iter().enumerate() {
            println!("  {}: {}", i, format_action(action));
        }

        loop {
            print!("\n{BOLD}Enter move number:{RESET} ");
            io::stdout()
                .flush()
                .map_err(|e| AgentError::Input(e.to_string()))?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| AgentError::Input(e.to_string()))?;
            if read == 0 {
                return Err(AgentError::Input("end of input".to_string()));
            }

            let line = line.trim();
            if line == "q" || line == "quit" {
                return Err(AgentError::Input("quit".to_string()));
            }

            match line.parse::<usize>() {
                Ok(idx) if idx < actions.len() => return Ok(actions[idx]),
                Ok(_) => println!("Invalid move number. Enter 0-{}", actions.len() - 1),
                Err(_) => println!("Please enter a number (or 'q' to quit)"),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = MctsConfig::default()
        .with_iterations(args.iterations)
        .with_workers(args.workers);
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }
    let mut ai = MctsAgent::new(config);
    let mut human = HumanAgent {
        input: io::stdin().lock(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let human_player: u8 = if args.human_second { 1 } else { 0 };

    let mut state = setup_game(&mut rng);

    println!("\n{BOLD}Welcome to Azul!{RESET}  (seed {seed})");
    println!(
        "You are Player {} ({})",
        human_player,
        if human_player == 0 { "first" } else { "second" }
    );
    println!("Type 'q' to quit at any time.\n");

    loop {
        display_board(&state, Some(human_player));

        let action = if state.current_player == human_player {
            match human.select_action(&state, &mut rng) {
                Ok(action) => action,
                Err(AgentError::Input(reason)) => {
                    println!("\nGoodbye! ({reason})");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        } else {
            println!("{DIM}AI is thinking...{RESET}");
            let action = ai
                .select_action(&state, &mut rng)
                .context("AI failed to choose a move")?;
            println!("AI plays: {}", format_action(&action));
            action
        };

        match apply_action(&mut state, action, &mut rng).context("move rejected")? {
            Transition::TurnPassed => {}
            Transition::RoundEnded { next_round } => {
                println!("\n{BOLD}Round over.{RESET} Starting round {next_round}.");
            }
            Transition::GameOver(outcome) => {
                display_board(&state, Some(human_player));
                let scores = state.scores();
                println!("\n{BOLD}═══════════════════════════════════════{RESET}");
                println!("{BOLD}                GAME OVER{RESET}");
                println!("{BOLD}═══════════════════════════════════════{RESET}");
                println!("Your score: {}", scores[human_player as usize]);
                println!("AI score:   {}", scores[1 - human_player as usize]);

                match outcome {
                    Outcome::Winner(p) if p == human_player => {
                        println!("\n{BOLD}You win!{RESET}")
                    }
                    Outcome::Winner(_) => println!("\n{DIM}AI wins. Better luck next time!{RESET}"),
                    Outcome::Draw => println!("\n{BOLD}It's a tie!{RESET}"),
                }
                return Ok(());
            }
        }
    }
}
