//! Ranking letters by how many candidate words contain them.

use std::{collections::BTreeMap, ops::RangeInclusive};

use itertools::Itertools;

/// The letters every ranking starts from with a count of zero.
///
/// Characters outside this range still get counted when a word contains
/// them.
pub const ALPHABET: RangeInclusive<char> = 'a'..='z';

/// Unguessed letters ordered by word frequency.
///
/// A letter's count is the number of candidate words containing it at least
/// once. Letters are sorted by descending count, and letters with equal
/// counts stay in ascending character order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranking {
    order: Vec<(char, u32)>,
}

impl Ranking {
    /// Builds a ranking from scratch over `words`, leaving out `guessed`.
    pub fn compute<'a>(words: impl IntoIterator<Item = &'a str>, guessed: &[char]) -> Self {
        let mut counts: BTreeMap<char, u32> = ALPHABET.map(|c| (c, 0)).collect();

        for word in words {
            for c in word.chars().unique() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }

        // sorted_by is stable, so ties keep the map's ascending order
        let order = counts
            .into_iter()
            .filter(|(c, _)| !guessed.contains(c))
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .collect();

        Ranking { order }
    }

    /// Picks the letter to guess next.
    ///
    /// This is the letter with the highest count. When several letters share
    /// that count, the one ranked last among them wins. Returns [`None`] when
    /// no letter has a positive count.
    pub fn select(&self) -> Option<char> {
        self.order
            .iter()
            .filter(|&&(_, n)| n > 0)
            .max_by_key(|&&(_, n)| n)
            .map(|&(c, _)| c)
    }

    /// Drops `letter` from the ranking.
    pub fn remove(&mut self, letter: char) {
        self.order.retain(|&(c, _)| c != letter);
    }

    /// Gets the count for `letter`, which is zero for letters never seen.
    pub fn count(&self, letter: char) -> u32 {
        self.order
            .iter()
            .find(|&&(c, _)| c == letter)
            .map_or(0, |&(_, n)| n)
    }

    pub fn contains(&self, letter: char) -> bool {
        self.order.iter().any(|&(c, _)| c == letter)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.order.iter().copied()
    }
}
