//! The working set of words still consistent with a game.

use std::sync::Arc;

use crate::words::Dictionary;

/// The dictionary words that could still be the secret.
///
/// The set only ever shrinks: it starts as every word of the right length
/// and each piece of feedback filters it further.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Candidates {
    words: Vec<Arc<str>>,
}

impl Candidates {
    /// Collects the words of `dictionary` with exactly `length` characters.
    ///
    /// The result is empty when no word has that length.
    pub fn of_length(dictionary: &Dictionary, length: usize) -> Self {
        Candidates {
            words: dictionary.of_length(length).cloned().collect(),
        }
    }

    /// Keeps only the words with `letter` at every one of `positions`.
    ///
    /// Occurrences of `letter` at other positions do not matter.
    pub fn retain_at(&mut self, letter: char, positions: &[usize]) {
        self.words.retain(|word| {
            positions
                .iter()
                .all(|&p| word.chars().nth(p) == Some(letter))
        });
    }

    /// Drops every word that contains `letter` anywhere.
    pub fn retain_without(&mut self, letter: char) {
        self.words.retain(|word| !word.contains(letter));
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.as_ref() == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_ref())
    }
}
