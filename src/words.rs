//! Dictionaries of words that puzzles and strategies draw from.

use std::{fs, ops::Deref, path::Path, sync::Arc};

use itertools::Itertools;

use crate::Result;

/// An immutable set of lowercase words.
///
/// Cloning a [`Dictionary`] is cheap: every clone shares the same words, so
/// one dictionary can back any number of strategies at once.
///
/// # Examples
///
/// ```rust
/// use hangman_rs::Dictionary;
///
/// let dictionary = Dictionary::new(["Cat", "dog", "cat", ""]);
/// assert_eq!(dictionary.len(), 2);
/// assert_eq!(&*dictionary.words()[0], "cat");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dictionary {
    words: Arc<[Arc<str>]>,
}

impl Dictionary {
    /// Creates a dictionary from any list of words.
    ///
    /// Words are trimmed and lowercased. Blank entries and duplicates are
    /// dropped, and the result is sorted.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .sorted_unstable()
            .dedup()
            .map(Arc::<str>::from)
            .collect();

        Dictionary { words }
    }

    /// Parses a dictionary with one word per line.
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Reads a dictionary file with one word per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Returns the words in sorted order.
    pub fn words(&self) -> &[Arc<str>] {
        &self.words
    }

    /// Returns the words with exactly `length` characters.
    pub fn of_length(&self, length: usize) -> impl Iterator<Item = &Arc<str>> {
        self.words
            .iter()
            .filter(move |w| w.chars().count() == length)
    }
}

impl Deref for Dictionary {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}
