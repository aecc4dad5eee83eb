//! A strategy that narrows the dictionary down to words matching the game.

use std::fmt::Display;

use log::{debug, trace};

use crate::{
    strategy::{normalize, Feedback, Strategy},
    words::Dictionary,
    Result, StrategyError,
};

pub mod candidates;
pub use candidates::Candidates;

pub mod ranking;
pub use ranking::{Ranking, ALPHABET};

/// A Hangman strategy that guesses the letter found in the most candidate
/// words.
///
/// At the start of each game, `DictAware` collects every dictionary word with
/// the length of the secret. Each guess is the unguessed letter contained in
/// the most of those words; when letters tie, the one ranked last wins.
/// Feedback then narrows the candidates: a correct guess keeps the words with
/// the letter at every revealed position, and a wrong guess drops every word
/// containing the letter.
///
/// If the candidates run out, or none of them contain an unguessed letter,
/// the strategy falls back to the first unguessed letter of `a` through `z`.
///
/// # Examples
///
/// ```rust
/// use hangman_rs::{Dictionary, Strategy, strategy::{DictAware, Feedback}};
///
/// let mut strategy = DictAware::new(Dictionary::new(["cat", "cot", "cut", "dog"]));
/// strategy.new_game(&[3], 6)?;
///
/// // 'c' and 't' are both in three words, and 't' ranks after 'c'
/// assert_eq!(strategy.guess()?, 't');
///
/// strategy.feedback(&Feedback::new('t', false, vec![]))?;
/// assert_eq!(strategy.candidates().unwrap().len(), 1);
/// assert_eq!(strategy.guess()?, 'o');
/// #
/// # Ok::<_, hangman_rs::HangmanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DictAware {
    dictionary: Dictionary,
    game: Option<Game>,
}

/// Everything `DictAware` knows about the game in progress.
#[derive(Debug, Clone)]
struct Game {
    word_length: usize,
    candidates: Candidates,
    guessed: Vec<char>,
    ranking: Ranking,
}

impl DictAware {
    /// Creates the strategy over a dictionary.
    ///
    /// No game is in progress until [`new_game()`](Strategy::new_game()) is
    /// called.
    pub fn new(dictionary: Dictionary) -> Self {
        DictAware {
            dictionary,
            game: None,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Gets the length of the secret word in the current game.
    pub fn word_length(&self) -> Option<usize> {
        self.game.as_ref().map(|g| g.word_length)
    }

    /// Gets the words that could still be the secret.
    pub fn candidates(&self) -> Option<&Candidates> {
        self.game.as_ref().map(|g| &g.candidates)
    }

    /// Gets the letters guessed so far this game, in order.
    pub fn guessed(&self) -> &[char] {
        match &self.game {
            Some(game) => &game.guessed,
            None => &[],
        }
    }

    /// Gets the current ranking of unguessed letters.
    pub fn ranking(&self) -> Option<&Ranking> {
        self.game.as_ref().map(|g| &g.ranking)
    }
}

impl Strategy for DictAware {
    fn new_game(&mut self, word_lengths: &[usize], max_incorrect: u32) -> Result<()> {
        let &word_length = word_lengths.first().ok_or(StrategyError::NoWordLength)?;

        let candidates = Candidates::of_length(&self.dictionary, word_length);
        let ranking = Ranking::compute(candidates.iter(), &[]);
        debug!(
            "new game: {} candidates of length {}, {} wrong guesses allowed",
            candidates.len(),
            word_length,
            max_incorrect
        );

        self.game = Some(Game {
            word_length,
            candidates,
            guessed: Vec::new(),
            ranking,
        });

        Ok(())
    }

    fn guess(&mut self) -> Result<char> {
        let game = self.game.as_mut().ok_or(StrategyError::NoGame)?;

        let letter = match game.ranking.select() {
            Some(letter) => letter,
            None => {
                let mut letters = ALPHABET;
                let fallback = letters
                    .find(|c| !game.guessed.contains(c))
                    .ok_or(StrategyError::OutOfLetters)?;
                debug!(
                    "no candidate word has an unguessed letter, falling back to '{}'",
                    fallback
                );
                fallback
            }
        };

        trace!(
            "guessing '{}' ({} of {} candidates)",
            letter,
            game.ranking.count(letter),
            game.candidates.len()
        );

        game.guessed.push(letter);
        game.ranking.remove(letter);

        Ok(letter)
    }

    fn feedback(&mut self, feedback: &Feedback) -> Result<()> {
        let game = self.game.as_mut().ok_or(StrategyError::NoGame)?;
        let letter = normalize(feedback.letter);
        let positions = feedback.first_positions();

        if feedback.correct {
            if positions.is_empty() {
                return Err(StrategyError::MissingPositions(letter).into());
            }
            if let Some(&position) = positions.iter().find(|&&p| p >= game.word_length) {
                return Err(StrategyError::PositionOutOfBounds {
                    position,
                    length: game.word_length,
                }
                .into());
            }
        }

        if !game.guessed.contains(&letter) {
            game.guessed.push(letter);
        }

        let before = game.candidates.len();
        if feedback.correct {
            game.candidates.retain_at(letter, positions);
        } else {
            game.candidates.retain_without(letter);
        }
        debug!(
            "'{}' {} narrowed candidates from {} to {}",
            letter,
            if feedback.correct { "hit" } else { "missed" },
            before,
            game.candidates.len()
        );

        if game.candidates.is_empty() {
            debug!("no candidate words remain");
        }

        game.ranking = Ranking::compute(game.candidates.iter(), &game.guessed);

        Ok(())
    }

    fn version(&self) -> &'static str {
        "1.0.0"
    }
}

impl Display for DictAware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hangman_rs::DictAware")
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::{strategy::Puzzle, HangmanError, Strategy};

    fn scenario() -> Result<DictAware> {
        let mut strategy = DictAware::new(Dictionary::new(["CAT", "COT", "CUT", "DOG"]));
        strategy.new_game(&[3], 6)?;
        Ok(strategy)
    }

    fn words(strategy: &DictAware) -> Vec<&str> {
        strategy.candidates().unwrap().iter().collect()
    }

    #[test]
    fn starts_with_words_of_length() -> Result<()> {
        let strategy = scenario()?;
        assert_eq!(strategy.word_length(), Some(3));
        assert_eq!(words(&strategy), ["cat", "cot", "cut", "dog"]);
        assert!(strategy.guessed().is_empty());
        Ok(())
    }

    #[test]
    fn first_guess_breaks_tie_to_last() -> Result<()> {
        let mut strategy = scenario()?;
        let ranking = strategy.ranking().unwrap();
        assert_eq!(ranking.count('c'), 3);
        assert_eq!(ranking.count('t'), 3);
        assert_eq!(ranking.count('o'), 2);
        assert_eq!(ranking.count('d'), 1);

        assert_eq!(strategy.guess()?, 't');
        assert_eq!(strategy.guessed(), &['t']);
        assert!(!strategy.ranking().unwrap().contains('t'));
        Ok(())
    }

    #[test]
    fn correct_feedback_keeps_matches() -> Result<()> {
        let mut strategy = scenario()?;
        strategy.feedback(&Feedback::new('C', true, vec![0]))?;
        assert_eq!(words(&strategy), ["cat", "cot", "cut"]);
        assert_eq!(strategy.guessed(), &['c']);
        assert!(!strategy.ranking().unwrap().contains('c'));
        assert_eq!(strategy.guess()?, 't');
        Ok(())
    }

    #[test]
    fn wrong_feedback_without_matches_changes_nothing() -> Result<()> {
        let mut strategy = scenario()?;
        strategy.feedback(&Feedback::new('z', false, vec![]))?;
        assert_eq!(words(&strategy), ["cat", "cot", "cut", "dog"]);
        assert_eq!(strategy.guessed(), &['z']);
        Ok(())
    }

    #[test]
    fn wrong_feedback_ignores_positions() -> Result<()> {
        let mut strategy = scenario()?;
        strategy.feedback(&Feedback::new('o', false, vec![7, 8]))?;
        assert_eq!(words(&strategy), ["cat", "cut"]);
        Ok(())
    }

    #[test]
    fn feedback_does_not_duplicate_guess() -> Result<()> {
        let mut strategy = scenario()?;
        let letter = strategy.guess()?;
        strategy.feedback(&Feedback::new(letter, true, vec![2]))?;
        assert_eq!(strategy.guessed(), &['t']);
        assert_eq!(words(&strategy), ["cat", "cot", "cut"]);
        Ok(())
    }

    #[test]
    fn new_game_discards_everything() -> Result<()> {
        let mut strategy = DictAware::new(Dictionary::new(["cat", "cot", "cut", "dog", "bird"]));
        strategy.new_game(&[3], 6)?;
        strategy.guess()?;
        strategy.feedback(&Feedback::new('d', true, vec![0]))?;
        assert_eq!(words(&strategy), ["dog"]);

        strategy.new_game(&[4], 6)?;
        assert_eq!(strategy.word_length(), Some(4));
        assert!(strategy.guessed().is_empty());
        assert_eq!(words(&strategy), ["bird"]);
        assert_eq!(strategy.ranking().unwrap().count('b'), 1);

        strategy.new_game(&[3], 6)?;
        assert_eq!(words(&strategy), ["cat", "cot", "cut", "dog"]);
        Ok(())
    }

    #[test]
    fn only_first_word_length_is_used() -> Result<()> {
        let mut strategy = DictAware::new(Dictionary::new(["cat", "bird"]));
        strategy.new_game(&[4, 3], 6)?;
        assert_eq!(words(&strategy), ["bird"]);
        Ok(())
    }

    #[test]
    fn requires_a_game() {
        let mut strategy = DictAware::new(Dictionary::new(["cat"]));
        assert!(matches!(
            strategy.guess(),
            Err(HangmanError::Strategy {
                kind: StrategyError::NoGame
            })
        ));
        assert!(matches!(
            strategy.feedback(&Feedback::new('a', false, vec![])),
            Err(HangmanError::Strategy {
                kind: StrategyError::NoGame
            })
        ));
        assert!(matches!(
            strategy.new_game(&[], 6),
            Err(HangmanError::Strategy {
                kind: StrategyError::NoWordLength
            })
        ));
    }

    #[test]
    fn malformed_feedback_is_rejected() -> Result<()> {
        let mut strategy = scenario()?;

        let res = strategy.feedback(&Feedback::new('c', true, vec![0, 3]));
        assert!(matches!(
            res,
            Err(HangmanError::Strategy {
                kind: StrategyError::PositionOutOfBounds {
                    position: 3,
                    length: 3
                }
            })
        ));

        let res = strategy.feedback(&Feedback::new('c', true, vec![]));
        assert!(matches!(
            res,
            Err(HangmanError::Strategy {
                kind: StrategyError::MissingPositions('c')
            })
        ));

        // nothing changed
        assert_eq!(words(&strategy), ["cat", "cot", "cut", "dog"]);
        assert!(strategy.guessed().is_empty());
        Ok(())
    }

    #[test]
    fn empty_candidates_fall_back_to_alphabet() -> Result<()> {
        let mut strategy = DictAware::new(Dictionary::new(["cat"]));
        strategy.new_game(&[5], 6)?;
        assert!(strategy.candidates().unwrap().is_empty());
        assert_eq!(strategy.guess()?, 'a');
        assert_eq!(strategy.guess()?, 'b');

        strategy.feedback(&Feedback::new('e', false, vec![]))?;
        assert_eq!(strategy.guess()?, 'c');
        assert_eq!(strategy.guess()?, 'd');
        assert_eq!(strategy.guess()?, 'f');
        Ok(())
    }

    #[test]
    fn exhausted_candidates_fall_back_to_alphabet() -> Result<()> {
        let mut strategy = DictAware::new(Dictionary::new(["aa"]));
        strategy.new_game(&[2], 6)?;
        assert_eq!(strategy.guess()?, 'a');
        strategy.feedback(&Feedback::new('a', true, vec![0, 1]))?;
        assert_eq!(words(&strategy), ["aa"]);
        assert_eq!(strategy.guess()?, 'b');
        Ok(())
    }

    #[test]
    fn runs_out_of_letters() -> Result<()> {
        let mut strategy = DictAware::new(Dictionary::new(["ab"]));
        strategy.new_game(&[2], 30)?;
        for _ in 0..26 {
            strategy.guess()?;
        }
        assert!(matches!(
            strategy.guess(),
            Err(HangmanError::Strategy {
                kind: StrategyError::OutOfLetters
            })
        ));
        Ok(())
    }

    #[test]
    fn instances_do_not_share_state() -> Result<()> {
        let dictionary = Dictionary::new(["cat", "cot", "cut", "dog"]);
        let mut first = DictAware::new(dictionary.clone());
        let mut second = DictAware::new(dictionary);
        first.new_game(&[3], 6)?;
        second.new_game(&[3], 6)?;

        first.feedback(&Feedback::new('o', false, vec![]))?;
        let mut third = first.clone();
        third.feedback(&Feedback::new('a', false, vec![]))?;

        assert_eq!(words(&first), ["cat", "cut"]);
        assert_eq!(words(&second), ["cat", "cot", "cut", "dog"]);
        assert_eq!(words(&third), ["cut"]);
        assert!(second.guessed().is_empty());
        Ok(())
    }

    #[test]
    fn solves_known_word() -> Result<()> {
        let dictionary = Dictionary::new(["cat", "cot", "cut", "dog", "bat", "hat"]);
        let puzzle = Puzzle::new("cot", 6)?;
        let attempts = puzzle.play(&mut DictAware::new(dictionary))?;
        assert!(puzzle.solved(&attempts));
        assert_eq!(attempts.guesses(), &['t', 'c', 'u', 'o']);
        assert_eq!(attempts.incorrect(), 1);
        Ok(())
    }

    proptest! {
        #[test]
        fn games_stay_consistent(
            words in prop::collection::vec("[a-f]{4}", 1..40),
            pick in any::<prop::sample::Index>(),
        ) {
            let dictionary = Dictionary::new(&words);
            let secret = pick.get(dictionary.words()).to_string();
            let puzzle = Puzzle::new(&secret, 26).unwrap();

            let mut strategy = DictAware::new(dictionary);
            strategy.new_game(&[4], 26).unwrap();
            let mut attempts = crate::strategy::Attempts::new();

            while !puzzle.solved(&attempts) {
                let before = strategy.candidates().unwrap().len();
                let guessed = strategy.guessed().len();

                let letter = strategy.guess().unwrap();
                prop_assert!(!strategy.guessed()[..guessed].contains(&letter));
                prop_assert_eq!(strategy.guessed().len(), guessed + 1);

                let feedback = puzzle.check(letter, &mut attempts).unwrap();
                strategy.feedback(&feedback).unwrap();

                let candidates = strategy.candidates().unwrap();
                prop_assert!(candidates.len() <= before);
                prop_assert!(candidates.contains(&secret));
                for c in strategy.guessed() {
                    prop_assert!(!strategy.ranking().unwrap().contains(*c));
                }
            }

            prop_assert_eq!(strategy.guessed(), attempts.guesses());
        }
    }
}
