//! Called-number record for one round.
//!
//! Keeps emission order (for the ball history) and a bitset for O(1)
//! "has this been called" checks. Storage is stack-only.

use arrayvec::ArrayVec;

use crate::error::{BingoError, Result};
use crate::types::{BingoLetter, MAX_BALL};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CalledSequence {
    order: ArrayVec<u8, { MAX_BALL as usize }>,
    /// Bit `n` set when ball `n` has been called.
    seen: u128,
}

impl CalledSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ball. Each ball may be called at most once.
    pub fn push(&mut self, number: u8) -> Result<()> {
        if number == 0 || number > MAX_BALL {
            return Err(BingoError::BallOutOfRange(number));
        }
        if self.contains(number) {
            return Err(BingoError::AlreadyCalled(number));
        }
        // Capacity is 75 and duplicates are rejected above, so this cannot overflow.
        self.order.push(number);
        self.seen |= 1u128 << number;
        Ok(())
    }

    pub fn contains(&self, number: u8) -> bool {
        number <= MAX_BALL && self.seen & (1u128 << number) != 0
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Most recent call
    pub fn last(&self) -> Option<u8> {
        self.order.last().copied()
    }

    /// Calls in emission order
    pub fn as_slice(&self) -> &[u8] {
        &self.order
    }

    /// Calls under one letter, in emission order
    pub fn by_letter(&self, letter: BingoLetter) -> impl Iterator<Item = u8> + '_ {
        self.order
            .iter()
            .copied()
            .filter(move |&n| BingoLetter::from_number(n) == Some(letter))
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen = 0;
    }
}
