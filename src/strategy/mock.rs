use std::fmt::Display;

use crate::{
    strategy::{Feedback, Strategy},
    Result, StrategyError,
};

/// A strategy that replays a fixed list of guesses.
#[derive(Debug, Clone)]
pub(crate) struct Mock {
    guesses: Option<Vec<char>>,
    next: usize,
}

impl Mock {
    pub(crate) fn new(guesses: impl Into<Option<Vec<char>>>) -> Self {
        Self {
            guesses: guesses.into(),
            next: 0,
        }
    }
}

impl Strategy for Mock {
    fn new_game(&mut self, _word_lengths: &[usize], _max_incorrect: u32) -> Result<()> {
        self.next = 0;
        Ok(())
    }

    fn guess(&mut self) -> Result<char> {
        let guesses: &[char] = match &self.guesses {
            None => &['e', 't', 'a', 'o', 'i', 'n', 's', 'h', 'r', 'd', 'l', 'u'],
            Some(v) => v.as_slice(),
        };

        let letter = guesses
            .get(self.next)
            .copied()
            .ok_or(StrategyError::OutOfLetters)?;
        self.next += 1;
        Ok(letter)
    }

    fn feedback(&mut self, _feedback: &Feedback) -> Result<()> {
        Ok(())
    }

    fn version(&self) -> &'static str {
        "1.2.4"
    }
}

impl Display for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mock {:?}", self.guesses)
    }
}
