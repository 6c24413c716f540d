//! Values produced by the game tree search

use std::fmt::Display;

/// Side whose benefit a value is measured from at a given search node
///
/// [`Perspective::Maximizing`] is the engine itself, it flips on every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Perspective {
    Maximizing,
    Minimizing,
}

impl Perspective {
    /// Perspective after one move
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Perspective {
        match self {
            Perspective::Maximizing => Perspective::Minimizing,
            Perspective::Minimizing => Perspective::Maximizing,
        }
    }

    /// Value the side at this node starts from before looking at any move
    #[inline(always)]
    pub const fn worst(self) -> GameValue {
        match self {
            Perspective::Maximizing => GameValue::Loss,
            Perspective::Minimizing => GameValue::Win,
        }
    }

    /// Value that cannot be improved upon at this node
    #[inline(always)]
    pub const fn best(self) -> GameValue {
        self.opposite().worst()
    }

    /// Keep the better of two values for the side at this node
    #[inline(always)]
    pub fn prefer(self, lhs: GameValue, rhs: GameValue) -> GameValue {
        match self {
            Perspective::Maximizing => lhs.max(rhs),
            Perspective::Minimizing => lhs.min(rhs),
        }
    }
}

/// Outcome of a position measured from the maximizing side
///
/// Ordered so that `Loss < Win`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum GameValue {
    Loss,
    Win,
}

impl GameValue {
    /// The same outcome seen by the other side
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> GameValue {
        match self {
            GameValue::Loss => GameValue::Win,
            GameValue::Win => GameValue::Loss,
        }
    }

    /// Value of a position with no items left
    ///
    /// The opponent took the last item, so whoever is to move there has lost.
    #[inline]
    pub const fn terminal(perspective: Perspective) -> GameValue {
        perspective.worst()
    }
}

impl Display for GameValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameValue::Loss => write!(f, "loss"),
            GameValue::Win => write!(f, "win"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};

    impl Arbitrary for Perspective {
        fn arbitrary(g: &mut Gen) -> Self {
            if Arbitrary::arbitrary(g) {
                Perspective::Maximizing
            } else {
                Perspective::Minimizing
            }
        }
    }

    #[test]
    fn win_is_greater_than_loss() {
        assert!(GameValue::Win > GameValue::Loss);
    }

    #[test]
    fn terminal_is_lost_for_side_to_move() {
        assert_eq!(GameValue::terminal(Perspective::Maximizing), GameValue::Loss);
        assert_eq!(GameValue::terminal(Perspective::Minimizing), GameValue::Win);
    }

    #[test]
    fn best_and_worst_are_opposite() {
        fn prop(perspective: Perspective) -> bool {
            perspective.best() == perspective.worst().opposite()
                && perspective.opposite().opposite() == perspective
                && perspective.prefer(perspective.worst(), perspective.best()) == perspective.best()
        }
        quickcheck::quickcheck(prop as fn(Perspective) -> bool);
    }
}
