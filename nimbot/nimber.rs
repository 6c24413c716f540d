//! Nimber is a number that represents a Nim heap of a given size.
//!
//! The engine itself never uses nimbers, positions are solved by search. They are kept as an
//! independent oracle: a Nim position is lost for the player to move iff its nim sum is zero.

use auto_ops::impl_op_ex;
use std::{fmt::Display, iter::Sum};

/// Number that represents a Nim heap of given size.
///
/// Addition is overloaded to Nim sum.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nimber(u32);

impl Nimber {
    /// Construct new nimber
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Check if the nimber is zero, i.e. a loss for the player to move
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// xor is correct, that's how nimbers additon works
impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });

impl Sum for Nimber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nimber(0), |acc, n| acc + n)
    }
}

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            write!(f, "0")
        } else if self.0 == 1 {
            write!(f, "*")
        } else {
            write!(f, "*{}", self.0)
        }
    }
}

#[test]
fn nim_sum_is_xor() {
    assert_eq!(Nimber(3) + Nimber(4) + Nimber(5), Nimber(2));
    assert_eq!(Nimber(1) + Nimber(1), Nimber(0));
    assert_eq!(
        [1, 4, 5].into_iter().map(Nimber::new).sum::<Nimber>(),
        Nimber(0)
    );
    assert_eq!(std::iter::empty::<Nimber>().sum::<Nimber>(), Nimber(0));
}

#[test]
fn display() {
    assert_eq!(Nimber(0).to_string(), "0");
    assert_eq!(Nimber(1).to_string(), "*");
    assert_eq!(Nimber(6).to_string(), "*6");
}
