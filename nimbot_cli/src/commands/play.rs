use anyhow::{Context, Result, bail};
use clap::{self, Parser};
use nimbot::{
    evaluator,
    policy::{Difficulty, Selection},
    position::Position,
    session::{Session, SessionState, Side},
};
use rand::{SeedableRng, rngs::StdRng};
use std::io::{BufRead, Write, stdin, stdout};

/// Play Nim against the engine. Whoever takes the last item wins.
#[derive(Parser, Debug)]
pub struct Args {
    /// Starting pile sizes, e.g. `3,4,5`
    #[arg(long, default_value = "3,4,5")]
    piles: Position,

    /// Strength of the engine
    #[arg(long, default_value_t = Difficulty::Hard)]
    difficulty: Difficulty,

    /// Probability in [0, 1] of the engine playing the optimal move. Overrides --difficulty
    #[arg(long, default_value = None)]
    optimal_probability: Option<f64>,

    /// Seed for the engine's random moves. Random seed otherwise
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    /// Let the engine make the first move
    #[arg(long)]
    ai_first: bool,
}

pub fn run(args: Args) -> Result<()> {
    let optimal_probability = args
        .optimal_probability
        .unwrap_or_else(|| args.difficulty.optimal_probability());
    if !(0.0..=1.0).contains(&optimal_probability) {
        bail!(
            "Optimal probability must be between 0 and 1, got {}",
            optimal_probability
        );
    }
    if args.piles.is_over() {
        bail!("Starting position {} has no items to take", args.piles);
    }
    evaluator::check_search_limits(&args.piles)
        .with_context(|| format!("Cannot play from {}", args.piles))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let first = if args.ai_first { Side::Ai } else { Side::Human };
    let mut session = Session::with_first_mover(args.piles, optimal_probability, first);
    log::info!(
        "Starting {} with optimal probability {}",
        session.position(),
        optimal_probability
    );

    println!("On your turn remove any number of items from ONE pile.");
    println!("Enter the pile index and the amount, e.g. `0 2`.");
    println!("The player who takes the last item wins.");

    let mut lines = stdin().lock().lines();
    loop {
        match session.state() {
            SessionState::GameOver { winner } => {
                println!();
                println!("Final piles: {}", session.position());
                match winner {
                    Side::Human => println!("You took the last item and won!"),
                    Side::Ai => println!("The AI took the last item and won!"),
                }
                return Ok(());
            }
            SessionState::HumanTurn => {
                println!();
                println!("Current piles: {}", session.position());
                print!(
                    "Your move (pile 0-{}, amount): ",
                    session.position().piles().len() - 1
                );
                stdout().flush().context("Could not write prompt")?;

                let Some(line) = lines.next() else {
                    bail!("Input closed before the game was over");
                };
                let line = line.context("Could not read move")?;
                match session.submit_human_input(&line) {
                    Ok(mv) => println!("You removed {} from pile {}", mv.amount, mv.pile),
                    Err(err) => println!(">> {}. Please try again.", err),
                }
            }
            SessionState::AiTurn => {
                println!();
                println!("Current piles: {}", session.position());
                let selection = session
                    .ai_move(&mut rng)
                    .context("Engine could not find a move")?;
                let mv = selection.into_move();
                let how = match selection {
                    Selection::Optimal(_) => "thinking",
                    Selection::Random(_) => "guessing",
                };
                println!(
                    "AI ({}) removed {} from pile {}",
                    how, mv.amount, mv.pile
                );
            }
        }
    }
}
