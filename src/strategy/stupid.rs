//! A single bad strategy to show how they are written.

use std::fmt::Display;

use crate::{
    strategy::{Feedback, Strategy},
    Result, StrategyError,
};

use super::dict_aware::ALPHABET;

/// A Hangman strategy that guesses the alphabet in order.
///
/// This exists to show how [`Strategy`](super::Strategy) is implemented and
/// to give the [test harness](crate::Harness) a baseline. It ignores all
/// feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stupid {
    next: usize,
}

impl Stupid {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for Stupid {
    fn new_game(&mut self, _word_lengths: &[usize], _max_incorrect: u32) -> Result<()> {
        self.next = 0;
        Ok(())
    }

    fn guess(&mut self) -> Result<char> {
        let mut letters = ALPHABET;
        let letter = letters
            .nth(self.next)
            .ok_or(StrategyError::OutOfLetters)?;
        self.next += 1;
        Ok(letter)
    }

    fn feedback(&mut self, _feedback: &Feedback) -> Result<()> {
        Ok(())
    }

    fn version(&self) -> &'static str {
        "0.10"
    }
}

impl Display for Stupid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hangman_rs::Stupid")
    }
}
