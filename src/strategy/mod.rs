//! Tools for defining Hangman strategies.

use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{HangmanError, PuzzleError, Result, StrategyError};

pub mod dict_aware;
pub use dict_aware::DictAware;

pub mod stupid;
pub use stupid::Stupid;

#[cfg(test)]
pub(crate) mod mock;

/// Lowercases a single letter.
pub(crate) fn normalize(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}

/// What the game reveals after a guess.
///
/// `positions` holds one list per secret word. A single-word game always
/// reports exactly one list: the zero-based indices where `letter` occurs,
/// or an empty list when the guess was wrong.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Feedback {
    pub letter: char,
    pub correct: bool,
    pub positions: Vec<Vec<usize>>,
}

impl Feedback {
    /// Creates feedback for a single-word game.
    pub fn new(letter: char, correct: bool, positions: Vec<usize>) -> Self {
        Feedback {
            letter,
            correct,
            positions: vec![positions],
        }
    }

    /// Returns the positions revealed in the first word.
    pub fn first_positions(&self) -> &[usize] {
        self.positions.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A specific Hangman puzzle to solve.
///
/// The puzzle knows the secret word and how many incorrect guesses it will
/// tolerate. It grades each guess with [`check()`](Puzzle::check()) and can
/// drive a whole game against a [`Strategy`] with [`play()`](Puzzle::play()).
///
/// # Examples
///
/// ```rust
/// use hangman_rs::strategy::{Attempts, Puzzle};
///
/// let puzzle = Puzzle::new("otter", 6)?;
/// let mut attempts = Attempts::new();
///
/// let feedback = puzzle.check('t', &mut attempts)?;
/// assert!(feedback.correct);
/// assert_eq!(feedback.first_positions(), &[1, 2]);
/// assert_eq!(puzzle.revealed(&attempts), "_tt__");
///
/// let feedback = puzzle.check('q', &mut attempts)?;
/// assert!(!feedback.correct);
/// assert_eq!(attempts.incorrect(), 1);
/// #
/// # Ok::<_, hangman_rs::HangmanError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Puzzle {
    secret: Arc<str>,
    max_incorrect: u32,
}

impl Puzzle {
    /// Creates a new puzzle from a secret word.
    ///
    /// Returns an error if the word is empty.
    pub fn new(secret: &str, max_incorrect: u32) -> Result<Self> {
        let secret = secret.trim().to_lowercase();
        if secret.is_empty() {
            return Err(PuzzleError::EmptySecret.into());
        }

        Ok(Puzzle {
            secret: secret.into(),
            max_incorrect,
        })
    }

    /// Gets the secret word.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Gets the number of characters in the secret word.
    pub fn word_length(&self) -> usize {
        self.secret.chars().count()
    }

    /// Gets the number of incorrect guesses that ends the game.
    pub fn max_incorrect(&self) -> u32 {
        self.max_incorrect
    }

    /// Checks a guessed letter and returns the positions it occupies.
    ///
    /// The guess is recorded in `attempts`. Guessing a letter twice, or
    /// guessing once the game has been won or lost, returns an error and
    /// leaves `attempts` unchanged.
    pub fn check(&self, letter: char, attempts: &mut Attempts) -> Result<Feedback> {
        let letter = normalize(letter);

        if self.solved(attempts) || self.failed(attempts) {
            return Err(PuzzleError::OutOfGuesses.into());
        }

        if attempts.guesses.contains(&letter) {
            return Err(PuzzleError::RepeatedGuess(letter).into());
        }

        let positions: Vec<usize> = self
            .secret
            .chars()
            .enumerate()
            .filter(|&(_, c)| c == letter)
            .map(|(i, _)| i)
            .collect();
        let correct = !positions.is_empty();

        attempts.push(letter, correct);

        Ok(Feedback::new(letter, correct, positions))
    }

    /// Returns true if every letter of the secret has been guessed.
    pub fn solved(&self, attempts: &Attempts) -> bool {
        self.secret.chars().all(|c| attempts.guesses.contains(&c))
    }

    /// Returns true if the incorrect guesses have reached the limit.
    pub fn failed(&self, attempts: &Attempts) -> bool {
        attempts.incorrect >= self.max_incorrect
    }

    /// Returns the secret with unguessed letters replaced by `_`.
    pub fn revealed(&self, attempts: &Attempts) -> String {
        self.secret
            .chars()
            .map(|c| if attempts.guesses.contains(&c) { c } else { '_' })
            .collect()
    }

    /// Plays a full game against `strategy`.
    ///
    /// The game ends when the secret is revealed, when the incorrect guesses
    /// reach the limit, or when the strategy has no letters left to offer.
    pub fn play(&self, strategy: &mut dyn Strategy) -> Result<Attempts> {
        let mut attempts = Attempts::new();
        strategy.new_game(&[self.word_length()], self.max_incorrect)?;

        while !self.solved(&attempts) && !self.failed(&attempts) {
            let letter = match strategy.guess() {
                Ok(letter) => letter,
                Err(HangmanError::Strategy {
                    kind: StrategyError::OutOfLetters,
                }) => break,
                Err(e) => return Err(e),
            };
            let feedback = self.check(letter, &mut attempts)?;
            strategy.feedback(&feedback)?;
        }

        Ok(attempts)
    }
}

/// The letters guessed during one game of Hangman, in order.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attempts {
    guesses: Vec<char>,
    incorrect: u32,
}

impl Attempts {
    /// Creates a new, empty [`Attempts`].
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, letter: char, correct: bool) {
        self.guesses.push(letter);
        if !correct {
            self.incorrect += 1;
        }
    }

    /// Returns the guessed letters in order.
    pub fn guesses(&self) -> &[char] {
        &self.guesses
    }

    /// Returns the number of incorrect guesses.
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }
}

impl Display for Attempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for letter in &self.guesses {
            write!(f, "{}", letter)?;
        }
        write!(f, " ({} wrong)", self.incorrect)
    }
}

/// Trait defining a Hangman guessing strategy.
///
/// A game engine drives a strategy through three calls: it starts a game with
/// [`new_game()`](Strategy::new_game()), then alternates between asking for a
/// [`guess()`](Strategy::guess()) and reporting the outcome through
/// [`feedback()`](Strategy::feedback()). [`Puzzle::play()`] does exactly this.
///
/// The test harness will use [`Display`] to format the name of the strategy,
/// so do not use linebreaks.
///
/// # Examples
///
/// ```rust
/// use std::fmt::Display;
/// use hangman_rs::{Result, Strategy, strategy::{Feedback, Puzzle}};
///
/// #[derive(Debug, Default)]
/// struct Vowels {
///     next: usize,
/// }
///
/// impl Display for Vowels {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "Vowels")
///     }
/// }
///
/// impl Strategy for Vowels {
///     fn new_game(&mut self, _word_lengths: &[usize], _max_incorrect: u32) -> Result<()> {
///         self.next = 0;
///         Ok(())
///     }
///
///     fn guess(&mut self) -> Result<char> {
///         let letter = "aeiou".chars().nth(self.next).unwrap_or('z');
///         self.next += 1;
///         Ok(letter)
///     }
///
///     fn feedback(&mut self, _feedback: &Feedback) -> Result<()> {
///         Ok(())
///     }
///
///     fn version(&self) -> &'static str {
///         "0.1.0"
///     }
/// }
///
/// let attempts = Puzzle::new("ae", 2)?.play(&mut Vowels::default())?;
/// assert_eq!(attempts.guesses(), &['a', 'e']);
/// #
/// # Ok::<_, hangman_rs::HangmanError>(())
/// ```
pub trait Strategy: Display + Debug + Send {
    /// Resets all per-game state for a new game.
    ///
    /// `word_lengths` holds the length of each secret word. Single-word
    /// strategies only look at the first entry.
    fn new_game(&mut self, word_lengths: &[usize], max_incorrect: u32) -> Result<()>;

    /// Returns the next letter to try.
    ///
    /// Must never return a letter already guessed in this game.
    fn guess(&mut self) -> Result<char>;

    /// Informs the strategy of the outcome of a guess.
    fn feedback(&mut self, feedback: &Feedback) -> Result<()>;

    /// Provides a version for this strategy.
    ///
    /// You should ensure that this changes each time you update the logic of
    /// the strategy in order to produce meaningful comparisons.
    fn version(&self) -> &'static str;
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! puzzle_test {
        (I $puzzle:ident, $attempts:ident, $count:ident; $guess:expr, $works:expr, $res:expr) => {{
            if $works {
                let feedback = $puzzle.check($guess, &mut $attempts)?;
                $count += 1;
                assert_eq!($attempts.guesses().len(), $count);
                assert_eq!(feedback.correct, $puzzle.secret().contains(feedback.letter));
                assert_eq!($puzzle.revealed(&$attempts), $res);
            } else {
                assert!($puzzle.check($guess, &mut $attempts).is_err());
                assert_eq!($attempts.guesses().len(), $count);
            }
        }};

        ($fn_name:ident[max = $max:expr, $answer:expr => $( [$guess:expr, $works:expr, $res:expr] );*]) => {
            puzzle_test! { $fn_name [max = $max, $answer => $( [$guess, $works, $res] );*] {} }
        };

        ($fn_name:ident[max = $max:expr, $answer:expr => $( [$guess:expr, $works:expr, $res:expr] );*] $other:block) => {
            #[test]
            fn $fn_name() -> Result<()> {
                let puzzle = Puzzle::new($answer, $max)?;
                let mut attempts = Attempts::new();
                let mut count = 0;

                $(puzzle_test!(I puzzle, attempts, count; $guess, $works, $res);)*

                $other

                Ok(())
            }
        };
    }

    puzzle_test! { reveals_every_position [max = 6, "banana" =>
        ['a', true, "_a_a_a"];
        ['n', true, "_anana"];
        ['b', true, "banana"]]
    }

    puzzle_test! { repeated_guess_rejected [max = 6, "cat" =>
        ['c', true, "c__"];
        ['c', false, ""];
        ['x', true, "c__"];
        ['x', false, ""]]
    }

    puzzle_test! { uppercase_guess_is_normalized [max = 6, "Dog" =>
        ['D', true, "d__"];
        ['d', false, ""]]
    }

    puzzle_test! { no_guesses_after_failure [max = 2, "ox" =>
        ['a', true, "__"];
        ['b', true, "__"];
        ['o', false, ""]]
    }

    puzzle_test! { no_guesses_after_solving [max = 6, "aa" =>
        ['a', true, "aa"];
        ['b', false, ""]]
    }

    puzzle_test! { apostrophes_are_letters [max = 6, "can't" =>
        ['\'', true, "___'_"];
        ['n', true, "__n'_"]]
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(matches!(
            Puzzle::new("  ", 6),
            Err(HangmanError::Puzzle {
                kind: PuzzleError::EmptySecret
            })
        ));
    }

    #[test]
    fn word_length_counts_chars() -> Result<()> {
        assert_eq!(Puzzle::new("café", 6)?.word_length(), 4);
        assert_eq!(Puzzle::new(" can't ", 6)?.word_length(), 5);
        Ok(())
    }

    #[test]
    fn wrong_guesses_count() -> Result<()> {
        let puzzle = Puzzle::new("ox", 3)?;
        let mut attempts = Attempts::new();
        puzzle.check('a', &mut attempts)?;
        puzzle.check('o', &mut attempts)?;
        puzzle.check('b', &mut attempts)?;
        assert_eq!(attempts.incorrect(), 2);
        assert!(!puzzle.failed(&attempts));
        puzzle.check('c', &mut attempts)?;
        assert!(puzzle.failed(&attempts));
        assert_eq!(format!("{}", attempts), "aobc (3 wrong)");
        Ok(())
    }

    #[test]
    fn play_stops_at_limit() -> Result<()> {
        let puzzle = Puzzle::new("zzz", 4)?;
        let mut strategy = Stupid::new();
        let attempts = puzzle.play(&mut strategy)?;
        assert_eq!(attempts.guesses(), &['a', 'b', 'c', 'd']);
        assert!(puzzle.failed(&attempts));
        assert!(!puzzle.solved(&attempts));
        Ok(())
    }

    #[test]
    fn play_solves() -> Result<()> {
        let puzzle = Puzzle::new("bad", 6)?;
        let mut strategy = Stupid::new();
        let attempts = puzzle.play(&mut strategy)?;
        assert_eq!(attempts.guesses(), &['a', 'b', 'c', 'd']);
        assert_eq!(attempts.incorrect(), 1);
        assert!(puzzle.solved(&attempts));
        Ok(())
    }

    #[test]
    fn play_ends_when_strategy_runs_dry() -> Result<()> {
        // the strategy never offers '#', so it gives up once a-z are spent
        let puzzle = Puzzle::new("#", 100)?;
        let attempts = puzzle.play(&mut Stupid::new())?;
        assert_eq!(attempts.guesses().len(), 26);
        assert!(!puzzle.solved(&attempts));
        Ok(())
    }

    #[test]
    fn single_word_feedback() {
        let feedback = Feedback::new('a', true, vec![0, 2]);
        assert_eq!(feedback.first_positions(), &[0, 2]);
        let empty = Feedback {
            letter: 'a',
            correct: false,
            positions: Vec::new(),
        };
        assert!(empty.first_positions().is_empty());
    }
}
