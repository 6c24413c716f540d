//! Exhaustive solver for normal-play Nim.
//!
//! The [evaluator](crate::evaluator::Evaluator) computes the exact value of any
//! [position](crate::position::Position) by memoized game tree search, the
//! [policy](crate::policy) module turns those values into moves, and
//! [`Session`](crate::session::Session) drives a human against the engine.

#![warn(missing_docs)]

pub mod evaluator;
pub mod nimber;
pub mod parsing;
pub mod policy;
pub mod position;
pub mod session;
pub mod transposition_table;
pub mod value;

mod display;
