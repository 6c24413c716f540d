//! Transposition table for solved positions

use crate::{
    position::Position,
    value::{GameValue, Perspective},
};
use std::{collections::HashMap, fmt::Debug};

/// Interface of a transposition table
pub trait TranspositionTable {
    /// Lookup a position value if exists
    fn lookup_position(&self, position: &Position, perspective: Perspective) -> Option<GameValue>;

    /// Save position and its game value
    fn insert_position(&mut self, position: Position, perspective: Perspective, value: GameValue);
}

/// Cache of solved `(position, perspective)` pairs owned by a single evaluator
///
/// Entries are never evicted. Starting from a position `p` the table holds at most
/// `2 * p.state_space_size()` entries.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MemoTable {
    maximizing: HashMap<Position, GameValue, ahash::RandomState>,
    minimizing: HashMap<Position, GameValue, ahash::RandomState>,
}

impl MemoTable {
    /// Create new empty memo table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of saved positions
    #[inline]
    pub fn len(&self) -> usize {
        self.maximizing.len() + self.minimizing.len()
    }

    /// Check if table stores any position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.maximizing.is_empty() && self.minimizing.is_empty()
    }

    /// Iterate over all saved entries in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&Position, Perspective, GameValue)> {
        let maximizing = self
            .maximizing
            .iter()
            .map(|(position, value)| (position, Perspective::Maximizing, *value));
        let minimizing = self
            .minimizing
            .iter()
            .map(|(position, value)| (position, Perspective::Minimizing, *value));
        maximizing.chain(minimizing)
    }

    fn values(
        &self,
        perspective: Perspective,
    ) -> &HashMap<Position, GameValue, ahash::RandomState> {
        match perspective {
            Perspective::Maximizing => &self.maximizing,
            Perspective::Minimizing => &self.minimizing,
        }
    }

    fn values_mut(
        &mut self,
        perspective: Perspective,
    ) -> &mut HashMap<Position, GameValue, ahash::RandomState> {
        match perspective {
            Perspective::Maximizing => &mut self.maximizing,
            Perspective::Minimizing => &mut self.minimizing,
        }
    }
}

impl Debug for MemoTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoTable")
            .field("maximizing", &self.maximizing.len())
            .field("minimizing", &self.minimizing.len())
            .finish()
    }
}

impl TranspositionTable for MemoTable {
    #[inline]
    fn lookup_position(&self, position: &Position, perspective: Perspective) -> Option<GameValue> {
        self.values(perspective).get(position).copied()
    }

    #[inline]
    fn insert_position(&mut self, position: Position, perspective: Perspective, value: GameValue) {
        self.values_mut(perspective).insert(position, value);
    }
}

/// Dummy transposition table that does not store anythning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoTranspositionTable;

impl NoTranspositionTable {
    #[inline]
    /// Create new dummy transposition table
    pub const fn new() -> Self {
        Self
    }
}

impl TranspositionTable for NoTranspositionTable {
    #[inline]
    fn lookup_position(&self, _position: &Position, _perspective: Perspective) -> Option<GameValue> {
        None
    }

    #[inline]
    fn insert_position(&mut self, _position: Position, _perspective: Perspective, _value: GameValue) {
    }
}
