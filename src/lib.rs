#![doc = include_str!("../README.md")]

use thiserror::Error;

pub mod strategy;
pub use strategy::Strategy;

pub mod words;
pub use words::Dictionary;

pub mod harness;
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

/// A [`Result`](std::result::Result) defaulting to [`HangmanError`].
pub type Result<T, E = HangmanError> = std::result::Result<T, E>;

/// The errors that `hangman_rs` can produce.
#[derive(Debug, Error)]
pub enum HangmanError {
    #[error("puzzle encountered error")]
    Puzzle {
        #[from]
        kind: PuzzleError,
    },

    #[error("strategy encountered error")]
    Strategy {
        #[from]
        kind: StrategyError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[error("cannot compare a strategy with itself")]
    SelfComparison,

    #[error("could not compute statistics for the comparison")]
    Stats,

    #[error("the test harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    /// The secret word given to [`Puzzle::new()`](strategy::Puzzle::new())
    /// has no letters.
    #[error("the secret word is empty")]
    EmptySecret,

    /// The letter was already guessed during this game.
    #[error("the letter '{0}' was already guessed")]
    RepeatedGuess(char),

    /// The puzzle is already solved or has run out of incorrect guesses.
    #[error("the puzzle does not accept any more guesses")]
    OutOfGuesses,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    /// A guess or feedback arrived before [`Strategy::new_game()`].
    #[error("no game has been started")]
    NoGame,

    /// [`Strategy::new_game()`] was called without any word lengths.
    #[error("a game needs at least one word length")]
    NoWordLength,

    /// Every letter the strategy could offer has already been guessed.
    #[error("no unguessed letters remain")]
    OutOfLetters,

    /// Feedback named a position outside the secret word.
    #[error("position {position} is outside a word of length {length}")]
    PositionOutOfBounds { position: usize, length: usize },

    /// Feedback said the letter was correct but revealed no positions.
    #[error("the letter '{0}' was reported correct without any positions")]
    MissingPositions(char),
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no strategies have been added to the harness")]
    NoStrategiesAdded,

    #[error("there are no answers to build puzzles from")]
    NoPuzzles,

    #[cfg(feature = "serde")]
    #[error("trouble serializing the record")]
    Serde(#[from] serde_json::Error),
}
