use crate::io::FileOrStdout;
use anyhow::{Context, Result};
use clap::{self, Parser};
use nimbot::{
    evaluator::{self, Evaluator},
    nimber::Nimber,
    policy,
    position::{Move, Position},
    value::{GameValue, Perspective},
};
use serde::Serialize;
use std::io::Write;

/// Solve a position for the player to move
#[derive(Parser, Debug)]
pub struct Args {
    /// Pile sizes, e.g. `3,4,5`
    position: Position,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Where to write the report
    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

#[derive(Debug, Clone, Serialize)]
struct Report {
    position: Position,
    value: GameValue,
    best_move: Option<Move>,
    best_move_value: Option<GameValue>,
    nim_sum: Nimber,
    memo_entries: usize,
}

pub fn run(args: Args) -> Result<()> {
    evaluator::check_search_limits(&args.position)
        .with_context(|| format!("Cannot solve {}", args.position))?;

    let mut evaluator = Evaluator::new();
    let value = evaluator.evaluate(&args.position, Perspective::Maximizing);
    let best = policy::best_move_with_value(&mut evaluator, &args.position);
    let report = Report {
        nim_sum: args.position.nim_sum(),
        position: args.position,
        value,
        best_move: best.map(|(mv, _)| mv),
        best_move_value: best.map(|(_, value)| value),
        memo_entries: evaluator.transposition_table().len(),
    };
    log::debug!("{:?}", report);

    let mut output = args
        .output
        .create()
        .with_context(|| format!("Could not open {}", args.output))?;
    if args.json {
        serde_json::to_writer(&mut output, &report)?;
        writeln!(output)?;
    } else {
        writeln!(output, "Position: {}", report.position)?;
        writeln!(output, "Player to move: {}", report.value)?;
        match report.best_move {
            Some(mv) => writeln!(output, "Best move: remove {} from pile {}", mv.amount, mv.pile)?,
            None => writeln!(output, "Best move: none, the game is over")?,
        }
        writeln!(output, "Nim sum: {}", report.nim_sum)?;
        writeln!(output, "Positions solved: {}", report.memo_entries)?;
    }
    output.flush()?;

    Ok(())
}
