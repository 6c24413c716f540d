use anyhow::{Context, Result, bail};
use clap::{self, Parser};
use nimbot::{
    evaluator::{self, Evaluator},
    position::Position,
    value::{GameValue, Perspective},
};
use rayon::prelude::*;

/// Check the solver against the nim sum rule on every small position.
///
/// Positions are split between threads, each thread has its own evaluator.
#[derive(Parser, Debug)]
pub struct Args {
    /// Check positions with 1 up to that many piles
    #[arg(long, default_value_t = 4)]
    piles: usize,

    /// Largest pile size
    #[arg(long, default_value_t = 4)]
    max_pile: u32,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let largest = Position::new(vec![args.max_pile; args.piles]);
    evaluator::check_search_limits(&largest)
        .with_context(|| format!("Cannot verify up to {}", largest))?;

    let positions = (1..=args.piles)
        .flat_map(|pile_count| Position::enumerate(pile_count, args.max_pile))
        .collect::<Vec<_>>();
    log::info!("Checking {} positions", positions.len());

    let mismatches = positions
        .par_iter()
        .map_init(Evaluator::new, |evaluator, position| {
            let value = evaluator.evaluate(position, Perspective::Maximizing);
            let expected = if position.nim_sum().is_zero() {
                GameValue::Loss
            } else {
                GameValue::Win
            };
            (value != expected).then(|| (position.clone(), value, expected))
        })
        .flatten()
        .collect::<Vec<_>>();

    for (position, value, expected) in &mismatches {
        eprintln!("{}: got {}, expected {}", position, value, expected);
    }
    if !mismatches.is_empty() {
        bail!(
            "{} of {} positions disagree with the nim sum",
            mismatches.len(),
            positions.len()
        );
    }

    println!("All {} positions agree with the nim sum", positions.len());
    Ok(())
}
