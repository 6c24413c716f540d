//! Memoized game tree search
//!
//! Values are always measured from the [maximizing](Perspective::Maximizing) side, i.e. the
//! engine. At a maximizing node the engine is to move and picks the best child, at a
//! minimizing node the opponent is to move and picks the worst child for the engine.
//!
//! The search recurses on the call stack. Every move removes at least one item, so the depth
//! never exceeds [`Position::total`] of the root and the number of distinct nodes is bounded
//! by [`Position::state_space_size`]. [`check_search_limits`] rejects positions past
//! [`MAX_TOTAL_ITEMS`] or [`MAX_STATE_SPACE`], larger games would need an explicit work stack
//! and a bounded table.

use crate::{
    position::Position,
    transposition_table::{MemoTable, TranspositionTable},
    value::{GameValue, Perspective},
};
use std::{error::Error, fmt::Display};

/// Largest [`Position::total`] accepted by [`check_search_limits`], i.e. the deepest recursion
pub const MAX_TOTAL_ITEMS: u64 = 2048;

/// Largest [`Position::state_space_size`] accepted by [`check_search_limits`]
///
/// The memo table holds at most twice that many entries.
pub const MAX_STATE_SPACE: u64 = 1 << 20;

/// Position too large to be solved by exhaustive search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimitError {
    /// Recursion would be deeper than [`MAX_TOTAL_ITEMS`]
    TooManyItems {
        /// Items in the position
        total: u64,
    },

    /// More than [`MAX_STATE_SPACE`] reachable positions, `None` if the count overflows
    StateSpaceTooLarge {
        /// Reachable positions
        size: Option<u64>,
    },
}

impl Display for SearchLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchLimitError::TooManyItems { total } => write!(
                f,
                "Position has {} items, at most {} can be searched",
                total, MAX_TOTAL_ITEMS
            ),
            SearchLimitError::StateSpaceTooLarge { size: Some(size) } => write!(
                f,
                "Position reaches {} positions, at most {} can be searched",
                size, MAX_STATE_SPACE
            ),
            SearchLimitError::StateSpaceTooLarge { size: None } => write!(
                f,
                "Position reaches more than {} positions, at most {} can be searched",
                u64::MAX,
                MAX_STATE_SPACE
            ),
        }
    }
}

impl Error for SearchLimitError {}

/// Check that `position` can be solved within [`MAX_TOTAL_ITEMS`] and [`MAX_STATE_SPACE`]
///
/// # Errors
///
/// Fails if either limit is exceeded.
pub fn check_search_limits(position: &Position) -> Result<(), SearchLimitError> {
    let total = position.total();
    if total > MAX_TOTAL_ITEMS {
        return Err(SearchLimitError::TooManyItems { total });
    }
    match position.state_space_size() {
        Some(size) if size <= MAX_STATE_SPACE => Ok(()),
        size => Err(SearchLimitError::StateSpaceTooLarge { size }),
    }
}

/// Exhaustive Nim solver owning its transposition table
#[derive(Debug, Clone, Default)]
pub struct Evaluator<TT = MemoTable> {
    transposition_table: TT,
}

impl Evaluator<MemoTable> {
    /// Create new evaluator with an empty memo table
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<TT> Evaluator<TT>
where
    TT: TranspositionTable,
{
    /// Create new evaluator on top of the given transposition table
    #[inline]
    pub const fn with_transposition_table(transposition_table: TT) -> Self {
        Self {
            transposition_table,
        }
    }

    /// Get the underlying transposition table
    #[inline]
    pub const fn transposition_table(&self) -> &TT {
        &self.transposition_table
    }

    /// Value of `position` for the engine when `perspective` is about to move
    pub fn evaluate(&mut self, position: &Position, perspective: Perspective) -> GameValue {
        if position.is_over() {
            return GameValue::terminal(perspective);
        }

        if let Some(value) = self
            .transposition_table
            .lookup_position(position, perspective)
        {
            return value;
        }

        // There are only two values, so once the best one is found no other move can change it
        let mut value = perspective.worst();
        for (_, child) in position.children() {
            let child_value = self.evaluate(&child, perspective.opposite());
            value = perspective.prefer(value, child_value);
            if value == perspective.best() {
                break;
            }
        }

        self.transposition_table
            .insert_position(position.clone(), perspective, value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transposition_table::NoTranspositionTable;
    use quickcheck::QuickCheck;

    #[test]
    fn terminal_position() {
        let mut evaluator = Evaluator::new();
        let empty = Position::new(vec![0, 0, 0]);
        assert_eq!(
            evaluator.evaluate(&empty, Perspective::Maximizing),
            GameValue::Loss
        );
        assert_eq!(
            evaluator.evaluate(&empty, Perspective::Minimizing),
            GameValue::Win
        );
        assert!(evaluator.transposition_table().is_empty());
    }

    #[test]
    fn losing_position() {
        let mut evaluator = Evaluator::new();
        assert_eq!(
            evaluator.evaluate(&Position::new(vec![1, 1]), Perspective::Maximizing),
            GameValue::Loss
        );
    }

    #[test]
    fn winning_position() {
        let mut evaluator = Evaluator::new();
        assert_eq!(
            evaluator.evaluate(&Position::new(vec![3, 4, 5]), Perspective::Maximizing),
            GameValue::Win
        );
        assert_eq!(
            evaluator.evaluate(&Position::new(vec![3, 4, 5]), Perspective::Minimizing),
            GameValue::Loss
        );
    }

    #[test]
    fn single_pile_is_always_won() {
        let mut evaluator = Evaluator::new();
        for n in 1..=10 {
            assert_eq!(
                evaluator.evaluate(&Position::new(vec![n]), Perspective::Maximizing),
                GameValue::Win
            );
        }
    }

    #[test]
    fn minimax_duality() {
        let test = |position: Position| {
            let mut evaluator = Evaluator::new();
            let value = evaluator.evaluate(&position, Perspective::Maximizing);
            if position.is_over() {
                assert_eq!(value, GameValue::Loss);
                return;
            }

            // Engine wins iff some move leaves the opponent in a position the engine still wins,
            // which is the same as leaving a position lost for whoever moves next
            let children = position.children().map(|(_, child)| child).collect::<Vec<_>>();
            let via_opponent = children
                .iter()
                .any(|child| evaluator.evaluate(child, Perspective::Minimizing) == GameValue::Win);
            let via_mover = children
                .iter()
                .any(|child| evaluator.evaluate(child, Perspective::Maximizing) == GameValue::Loss);

            assert_eq!(value == GameValue::Win, via_opponent);
            assert_eq!(value == GameValue::Win, via_mover);
        };
        QuickCheck::new().quickcheck(test as fn(Position));
    }

    #[test]
    fn perspectives_are_symmetric() {
        let test = |position: Position| {
            let mut evaluator = Evaluator::new();
            assert_eq!(
                evaluator.evaluate(&position, Perspective::Minimizing),
                evaluator
                    .evaluate(&position, Perspective::Maximizing)
                    .opposite()
            );
        };
        QuickCheck::new().quickcheck(test as fn(Position));
    }

    #[test]
    fn agrees_with_nim_sum() {
        let test = |position: Position| {
            let mut evaluator = Evaluator::new();
            let value = evaluator.evaluate(&position, Perspective::Maximizing);
            assert_eq!(value == GameValue::Loss, position.nim_sum().is_zero());
        };
        QuickCheck::new().quickcheck(test as fn(Position));
    }

    #[test]
    fn memoization_does_not_change_values() {
        let test = |position: Position, perspective: Perspective| {
            let mut memoized = Evaluator::new();
            let mut plain = Evaluator::with_transposition_table(NoTranspositionTable::new());
            assert_eq!(
                memoized.evaluate(&position, perspective),
                plain.evaluate(&position, perspective)
            );
        };
        QuickCheck::new().quickcheck(test as fn(Position, Perspective));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let test = |position: Position, perspective: Perspective| {
            let mut evaluator = Evaluator::new();
            let first = evaluator.evaluate(&position, perspective);
            let snapshot = evaluator.transposition_table().clone();
            let second = evaluator.evaluate(&position, perspective);

            assert_eq!(first, second);
            assert_eq!(evaluator.transposition_table(), &snapshot);
        };
        QuickCheck::new().quickcheck(test as fn(Position, Perspective));
    }

    #[test]
    fn search_limits() {
        assert_eq!(check_search_limits(&Position::new(vec![3, 4, 5])), Ok(()));
        assert_eq!(
            check_search_limits(&Position::new(vec![MAX_TOTAL_ITEMS as u32])),
            Ok(())
        );
        assert_eq!(
            check_search_limits(&Position::new(vec![60_000])),
            Err(SearchLimitError::TooManyItems { total: 60_000 })
        );
        assert_eq!(
            check_search_limits(&Position::new(vec![100, 100, 100, 100])),
            Err(SearchLimitError::StateSpaceTooLarge {
                size: Some(101 * 101 * 101 * 101)
            })
        );
        assert_eq!(
            check_search_limits(&Position::new(vec![1; 64])),
            Err(SearchLimitError::StateSpaceTooLarge { size: None })
        );
    }

    #[test]
    fn memo_table_stays_within_bound() {
        let mut evaluator = Evaluator::new();
        let position = Position::new(vec![3, 4, 5]);
        evaluator.evaluate(&position, Perspective::Maximizing);
        evaluator.evaluate(&position, Perspective::Minimizing);

        let bound = 2 * position.state_space_size().unwrap() as usize;
        assert!(!evaluator.transposition_table().is_empty());
        assert!(evaluator.transposition_table().len() <= bound);

        for (position, perspective, value) in evaluator.transposition_table().iter() {
            assert!(!position.is_over());
            assert_eq!(
                value == GameValue::Win,
                (perspective == Perspective::Maximizing) != position.nim_sum().is_zero()
            );
        }
    }
}
