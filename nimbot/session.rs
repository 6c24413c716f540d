//! Turn-by-turn game between a human and the engine
//!
//! ```text
//! HumanTurn --legal human move--> AiTurn --engine move--> HumanTurn
//!     \                              /
//!      `---> GameOver { winner } <--'   (after the move that empties the last pile)
//! ```
//!
//! Rejected input never changes the position or the state.

use crate::{
    evaluator::Evaluator,
    policy::{self, Selection},
    position::{Move, MoveError, Position},
};
use rand::Rng;
use std::{error::Error, fmt::Display, str::FromStr};

/// Participant of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Side {
    Human,
    Ai,
}

impl Side {
    /// The other participant
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }

    const fn to_move(self) -> SessionState {
        match self {
            Side::Human => SessionState::HumanTurn,
            Side::Ai => SessionState::AiTurn,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Human => write!(f, "Human"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// Waiting for the human to submit a move
    HumanTurn,

    /// Waiting for the engine to pick a move
    AiTurn,

    /// All piles are empty. Absorbing.
    GameOver {
        /// Side that took the last item
        winner: Side,
    },
}

impl Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::HumanTurn => write!(f, "it is the human's turn"),
            SessionState::AiTurn => write!(f, "it is the AI's turn"),
            SessionState::GameOver { winner } => write!(f, "the game is over, {} won", winner),
        }
    }
}

/// Reason a submitted turn was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// Input is not two non-negative integers
    Malformed(&'static str),

    /// Move breaks the rules in the current position
    Illegal(MoveError),

    /// It is not this side's turn, or the game is over
    OutOfTurn(SessionState),
}

impl Display for TurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnError::Malformed(reason) => write!(f, "Invalid input: {}", reason),
            TurnError::Illegal(err) => write!(f, "{}", err),
            TurnError::OutOfTurn(state) => write!(f, "Not your turn: {}", state),
        }
    }
}

impl Error for TurnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TurnError::Illegal(err) => Some(err),
            TurnError::Malformed(_) | TurnError::OutOfTurn(_) => None,
        }
    }
}

impl From<MoveError> for TurnError {
    fn from(err: MoveError) -> Self {
        TurnError::Illegal(err)
    }
}

/// Game of a human against the engine
#[derive(Debug, Clone)]
pub struct Session {
    position: Position,
    state: SessionState,
    optimal_probability: f64,
    history: Vec<(Side, Move)>,
    evaluator: Evaluator,
}

impl Session {
    /// Start a game where the human moves first
    ///
    /// The engine plays optimally with probability `optimal_probability` and randomly otherwise.
    #[inline]
    pub fn new(position: Position, optimal_probability: f64) -> Self {
        Self::with_first_mover(position, optimal_probability, Side::Human)
    }

    /// Start a game where `first` moves first
    ///
    /// If `position` is already empty `first` has nothing to take and has lost.
    pub fn with_first_mover(position: Position, optimal_probability: f64, first: Side) -> Self {
        let state = if position.is_over() {
            SessionState::GameOver {
                winner: first.opposite(),
            }
        } else {
            first.to_move()
        };

        Self {
            position,
            state,
            optimal_probability,
            history: Vec::new(),
            evaluator: Evaluator::new(),
        }
    }

    /// Current position
    #[inline]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Current state
    #[inline]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Winner once the game is over
    #[inline]
    pub const fn winner(&self) -> Option<Side> {
        match self.state {
            SessionState::GameOver { winner } => Some(winner),
            SessionState::HumanTurn | SessionState::AiTurn => None,
        }
    }

    /// All moves made so far, oldest first
    #[inline]
    pub fn history(&self) -> &[(Side, Move)] {
        &self.history
    }

    /// Parse a `pile amount` line typed by the human and play it
    ///
    /// # Errors
    ///
    /// See [`Session::human_move`], additionally fails with [`TurnError::Malformed`] if the input
    /// cannot be parsed.
    pub fn submit_human_input(&mut self, input: &str) -> Result<Move, TurnError> {
        let mv = Move::from_str(input).map_err(TurnError::Malformed)?;
        self.human_move(mv)?;
        Ok(mv)
    }

    /// Play a human move
    ///
    /// # Errors
    ///
    /// Fails if it is not the human's turn or the move is illegal.
    pub fn human_move(&mut self, mv: Move) -> Result<SessionState, TurnError> {
        if self.state != SessionState::HumanTurn {
            return Err(TurnError::OutOfTurn(self.state));
        }
        let position = self.position.apply_move(mv)?;
        Ok(self.advance(Side::Human, mv, position))
    }

    /// Let the engine pick and play a move
    ///
    /// Returns `None` without touching the session unless it is the engine's turn.
    pub fn ai_move<R>(&mut self, rng: &mut R) -> Option<Selection>
    where
        R: Rng + ?Sized,
    {
        if self.state != SessionState::AiTurn {
            return None;
        }

        let selection = policy::mixed_choice(
            &mut self.evaluator,
            &self.position,
            rng,
            self.optimal_probability,
        )?;
        let mv = selection.into_move();
        match self.position.apply_move(mv) {
            Ok(position) => {
                self.advance(Side::Ai, mv, position);
                Some(selection)
            }
            Err(err) => {
                log::error!("Policy produced illegal move {}: {}", mv, err);
                None
            }
        }
    }

    fn advance(&mut self, side: Side, mv: Move, position: Position) -> SessionState {
        log::debug!("{} plays {}: {} -> {}", side, mv, self.position, position);
        self.history.push((side, mv));
        self.state = if position.is_over() {
            SessionState::GameOver { winner: side }
        } else {
            side.opposite().to_move()
        };
        self.position = position;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Difficulty;
    use rand::{SeedableRng, rngs::StdRng};

    fn start() -> Session {
        Session::new(
            Position::new(vec![3, 4, 5]),
            Difficulty::Hard.optimal_probability(),
        )
    }

    #[test]
    fn human_moves_first() {
        assert_eq!(start().state(), SessionState::HumanTurn);
        assert_eq!(
            Session::with_first_mover(Position::new(vec![1]), 1.0, Side::Ai).state(),
            SessionState::AiTurn
        );
    }

    #[test]
    fn empty_start_is_over() {
        let session = Session::new(Position::new(vec![0, 0]), 1.0);
        assert_eq!(session.winner(), Some(Side::Ai));
    }

    #[test]
    fn rejected_input_keeps_state() {
        let mut session = start();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            session.submit_human_input("two three"),
            Err(TurnError::Malformed(_))
        ));
        assert!(matches!(
            session.submit_human_input("3 1"),
            Err(TurnError::Illegal(MoveError::PileOutOfRange { .. }))
        ));
        assert!(matches!(
            session.submit_human_input("0 4"),
            Err(TurnError::Illegal(MoveError::InvalidAmount { .. }))
        ));
        assert!(matches!(
            session.submit_human_input("0 0"),
            Err(TurnError::Illegal(MoveError::InvalidAmount { .. }))
        ));
        assert_eq!(session.ai_move(&mut rng), None);

        assert_eq!(session.state(), SessionState::HumanTurn);
        assert_eq!(session.position(), &Position::new(vec![3, 4, 5]));
        assert!(session.history().is_empty());
    }

    #[test]
    fn turns_alternate() {
        let mut session = start();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(session.submit_human_input("2 5"), Ok(Move::new(2, 5)));
        assert_eq!(session.state(), SessionState::AiTurn);
        assert_eq!(
            session.human_move(Move::new(0, 1)),
            Err(TurnError::OutOfTurn(SessionState::AiTurn))
        );

        // [3, 4, 0] has nim sum 7, the engine answers with [3, 3, 0]
        assert_eq!(
            session.ai_move(&mut rng),
            Some(Selection::Optimal(Move::new(1, 1)))
        );
        assert_eq!(session.state(), SessionState::HumanTurn);
        assert_eq!(session.position(), &Position::new(vec![3, 3, 0]));
        assert_eq!(
            session.history(),
            &[(Side::Human, Move::new(2, 5)), (Side::Ai, Move::new(1, 1))]
        );
    }

    #[test]
    fn optimal_engine_punishes_any_mistake() {
        let mut rng = StdRng::seed_from_u64(3);
        let start_position = Position::new(vec![3, 4, 5]);
        let mistakes = start_position
            .generate_moves()
            .into_iter()
            .filter(|&mv| !start_position.apply_move(mv).unwrap().nim_sum().is_zero());
        for first_human_move in mistakes {
            let mut session = start();
            session.human_move(first_human_move).unwrap();
            while session.winner().is_none() {
                session.ai_move(&mut rng).unwrap();
                if session.winner().is_some() {
                    break;
                }
                // Human always takes one item from the first non-empty pile
                let pile = session
                    .position()
                    .piles()
                    .iter()
                    .position(|&pile| pile > 0)
                    .unwrap();
                session.human_move(Move::new(pile, 1)).unwrap();
            }
            assert_eq!(session.winner(), Some(Side::Ai));
            assert!(session.position().is_over());
        }
    }

    #[test]
    fn error_messages() {
        let mut session = Session::new(Position::new(vec![1]), 1.0);
        session.human_move(Move::new(0, 1)).unwrap();
        let err = session.human_move(Move::new(0, 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not your turn: the game is over, Human won"
        );
        assert_eq!(
            TurnError::OutOfTurn(SessionState::AiTurn).to_string(),
            "Not your turn: it is the AI's turn"
        );
        assert_eq!(
            TurnError::Illegal(MoveError::PileOutOfRange { pile: 3, piles: 1 }).to_string(),
            "Illegal move: pile 3 does not exist (1 piles)"
        );
    }

    #[test]
    fn last_mover_wins() {
        let mut session = Session::new(Position::new(vec![0, 2]), 1.0);
        session.submit_human_input("1 2").unwrap();
        assert_eq!(
            session.state(),
            SessionState::GameOver {
                winner: Side::Human
            }
        );

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(session.ai_move(&mut rng), None);
        assert_eq!(
            session.human_move(Move::new(1, 1)),
            Err(TurnError::OutOfTurn(SessionState::GameOver {
                winner: Side::Human
            }))
        );
    }
}
