//! Move selection on top of the [`Evaluator`]

use crate::{
    evaluator::Evaluator,
    position::{Move, Position},
    transposition_table::TranspositionTable,
    value::{GameValue, Perspective},
};
use rand::{Rng, seq::IndexedRandom};
use std::{fmt::Display, str::FromStr};

/// Best move for the side to move together with its value, or `None` if the game is over
///
/// Moves are scanned in [`Position::generate_moves`] order and the first move with the highest
/// value wins, so in a lost position the first legal move is returned.
pub fn best_move_with_value<TT>(
    evaluator: &mut Evaluator<TT>,
    position: &Position,
) -> Option<(Move, GameValue)>
where
    TT: TranspositionTable,
{
    let mut best: Option<(Move, GameValue)> = None;
    for (mv, child) in position.children() {
        let value = evaluator.evaluate(&child, Perspective::Minimizing);
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((mv, value));
        }
        if value == GameValue::Win {
            break;
        }
    }
    best
}

/// Best move for the side to move, or `None` if the game is over
#[inline]
pub fn best_move<TT>(evaluator: &mut Evaluator<TT>, position: &Position) -> Option<Move>
where
    TT: TranspositionTable,
{
    best_move_with_value(evaluator, position).map(|(mv, _)| mv)
}

/// Uniformly random legal move, or `None` if the game is over
pub fn random_move<R>(position: &Position, rng: &mut R) -> Option<Move>
where
    R: Rng + ?Sized,
{
    position.generate_moves().choose(rng).copied()
}

/// Move picked by [`mixed_choice`] tagged with the branch that picked it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Move returned by [`best_move`]
    Optimal(Move),

    /// Move drawn uniformly from all legal moves
    Random(Move),
}

impl Selection {
    /// Selected move regardless of the branch
    #[inline]
    pub const fn into_move(self) -> Move {
        match self {
            Selection::Optimal(mv) | Selection::Random(mv) => mv,
        }
    }

    /// Check if the move came from the optimal branch
    #[inline]
    pub const fn is_optimal(&self) -> bool {
        matches!(self, Selection::Optimal(_))
    }
}

/// With probability `optimal_probability` play [`best_move`], otherwise a [`random_move`]
///
/// Exactly one uniform sample decides the branch. Probabilities outside `[0, 1]` behave like
/// the nearest bound. The random branch may still pick the optimal move.
pub fn mixed_choice<TT, R>(
    evaluator: &mut Evaluator<TT>,
    position: &Position,
    rng: &mut R,
    optimal_probability: f64,
) -> Option<Selection>
where
    TT: TranspositionTable,
    R: Rng + ?Sized,
{
    if position.is_over() {
        return None;
    }

    let roll: f64 = rng.random();
    let selection = if roll < optimal_probability {
        best_move(evaluator, position).map(Selection::Optimal)
    } else {
        random_move(position, rng).map(Selection::Random)
    };
    log::debug!("Position {}: roll {:.3} -> {:?}", position, roll, selection);
    selection
}

/// Move chosen by [`mixed_choice`] without the branch tag
#[inline]
pub fn mixed_policy<TT, R>(
    evaluator: &mut Evaluator<TT>,
    position: &Position,
    rng: &mut R,
    optimal_probability: f64,
) -> Option<Move>
where
    TT: TranspositionTable,
    R: Rng + ?Sized,
{
    mixed_choice(evaluator, position, rng, optimal_probability).map(Selection::into_move)
}

/// Named strength of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Always random
    Easy,

    /// Optimal half of the time
    Medium,

    /// Always optimal
    Hard,
}

impl Difficulty {
    /// Probability of playing the optimal move
    #[inline]
    pub const fn optimal_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.0,
            Difficulty::Medium => 0.5,
            Difficulty::Hard => 1.0,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err("Parse error: expected one of easy, medium, hard"),
        }
    }
}
