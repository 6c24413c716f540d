//! Nim positions and the rules for moving between them

use crate::{
    display,
    nimber::Nimber,
    parsing::{Parser, impl_from_str_via_parser, lexeme, try_option},
};
use itertools::Itertools;
use std::{error::Error, fmt::Display};

/// Pile sizes of a Nim game
///
/// Positions are never mutated, every move produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    piles: Vec<u32>,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::brackets(f, |f| display::commas(f, &self.piles))
    }
}

impl Position {
    /// Create a position with the given pile sizes
    #[inline]
    pub const fn new(piles: Vec<u32>) -> Self {
        Self { piles }
    }

    /// Pile sizes
    #[inline]
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// Number of items left in all piles
    ///
    /// Every move strictly decreases it, so it bounds the length of any game and the recursion
    /// depth of the evaluator.
    #[inline]
    pub fn total(&self) -> u64 {
        self.piles.iter().map(|&pile| u64::from(pile)).sum()
    }

    /// Check if every pile is empty
    #[inline]
    pub fn is_over(&self) -> bool {
        self.piles.iter().all(|&pile| pile == 0)
    }

    /// All legal moves, ordered by pile index and then by amount
    pub fn generate_moves(&self) -> Vec<Move> {
        self.moves().collect()
    }

    fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.piles
            .iter()
            .enumerate()
            .flat_map(|(pile, &count)| (1..=count).map(move |amount| Move { pile, amount }))
    }

    /// Position after making `mv`
    ///
    /// # Errors
    ///
    /// Fails if the pile does not exist or the amount is not between one and the pile size.
    pub fn apply_move(&self, mv: Move) -> Result<Position, MoveError> {
        let Some(&available) = self.piles.get(mv.pile) else {
            return Err(MoveError::PileOutOfRange {
                pile: mv.pile,
                piles: self.piles.len(),
            });
        };
        if mv.amount == 0 || mv.amount > available {
            return Err(MoveError::InvalidAmount {
                pile: mv.pile,
                amount: mv.amount,
                available,
            });
        }
        Ok(self.after_legal_move(mv))
    }

    /// Every legal move paired with the position it leads to, in [`Position::generate_moves`]
    /// order
    ///
    /// Generated lazily, nothing is allocated for moves that are never visited.
    pub fn children(&self) -> impl Iterator<Item = (Move, Position)> + '_ {
        self.moves().map(move |mv| (mv, self.after_legal_move(mv)))
    }

    fn after_legal_move(&self, mv: Move) -> Position {
        let mut piles = self.piles.clone();
        piles[mv.pile] -= mv.amount;
        Position { piles }
    }

    /// Nim sum of all piles. Zero iff the position is lost for the player to move.
    pub fn nim_sum(&self) -> Nimber {
        self.piles.iter().copied().map(Nimber::new).sum()
    }

    /// Number of positions reachable from this one, itself included, or `None` on overflow
    ///
    /// A memo table filled from this position never holds more than twice that many entries.
    pub fn state_space_size(&self) -> Option<u64> {
        self.piles
            .iter()
            .try_fold(1u64, |acc, &pile| acc.checked_mul(u64::from(pile) + 1))
    }

    /// All positions with `pile_count` piles of at most `max_pile` items each
    pub fn enumerate(pile_count: usize, max_pile: u32) -> impl Iterator<Item = Position> {
        (0..pile_count)
            .map(move |_| 0..=max_pile)
            .multi_cartesian_product()
            .map(Position::new)
    }

    fn parse<'p>(p: Parser<'p>) -> Option<(Parser<'p>, Position)> {
        let p = p.trim_whitespace();
        let (p, bracketed) = match p.parse_ascii_char('[') {
            Some(p) => (p, true),
            None => (p, false),
        };

        let (mut p, first) = try_option!(lexeme!(p, Parser::parse_u32));
        let mut piles = vec![first];
        while let Some((rest, pile)) = lexeme!(p.skip_separator(), Parser::parse_u32) {
            piles.push(pile);
            p = rest;
        }

        if bracketed {
            p = try_option!(p.parse_ascii_char(']')).trim_whitespace();
        }
        Some((p, Position::new(piles)))
    }
}

impl_from_str_via_parser!(Position);

/// Removal of `amount` items from the pile at index `pile`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    /// Index of the pile to take from
    pub pile: usize,

    /// Number of items to take
    pub amount: u32,
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.pile, self.amount)
    }
}

impl Move {
    /// Create new move
    #[inline]
    pub const fn new(pile: usize, amount: u32) -> Self {
        Self { pile, amount }
    }

    fn parse<'p>(p: Parser<'p>) -> Option<(Parser<'p>, Move)> {
        let (p, pile) = try_option!(lexeme!(p, Parser::parse_u32));
        let (p, amount) = try_option!(lexeme!(p.skip_separator(), Parser::parse_u32));
        Some((p, Move::new(pile as usize, amount)))
    }
}

impl_from_str_via_parser!(Move);

/// Reason a move cannot be made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Pile index past the last pile
    PileOutOfRange {
        /// Requested pile
        pile: usize,

        /// Number of piles in the position
        piles: usize,
    },

    /// Amount is zero or larger than the pile
    InvalidAmount {
        /// Requested pile
        pile: usize,

        /// Requested amount
        amount: u32,

        /// Items in the pile
        available: u32,
    },
}

impl Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::PileOutOfRange { pile, piles } => {
                write!(f, "Illegal move: pile {} does not exist ({} piles)", pile, piles)
            }
            MoveError::InvalidAmount {
                pile,
                amount,
                available,
            } => write!(
                f,
                "Illegal move: cannot take {} from pile {} holding {}",
                amount, pile, available
            ),
        }
    }
}

impl Error for MoveError {}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = usize::arbitrary(g) % 4 + 1;
        Position::new((0..len).map(|_| u32::arbitrary(g) % 5).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.piles
                .shrink()
                .filter(|piles| !piles.is_empty())
                .map(Position::new),
        )
    }
}
