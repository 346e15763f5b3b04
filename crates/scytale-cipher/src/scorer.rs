//! Dictionary scorer
//!
//! Fitness of a candidate plaintext: the fraction of its words found in the
//! dictionary. Pure function of (text, dictionary).

use crate::alphabet;
use crate::{Dictionary, Result};

/// Minimum percentage of dictionary words for text to count as English
pub const DEFAULT_ENGLISH_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy)]
pub struct Scorer<'d> {
    dictionary: &'d Dictionary,
}

impl<'d> Scorer<'d> {
    /// Fails with `EmptyDictionary` when there is nothing to score against
    pub fn new(dictionary: &'d Dictionary) -> Result<Self> {
        dictionary.require_words()?;
        Ok(Self { dictionary })
    }

    pub fn dictionary(&self) -> &'d Dictionary {
        self.dictionary
    }

    /// (recognised words, total words)
    pub fn word_counts(&self, text: &str) -> (usize, usize) {
        alphabet::words(text).fold((0, 0), |(found, total), word| {
            if self.dictionary.contains(word) {
                (found + 1, total + 1)
            } else {
                (found, total + 1)
            }
        })
    }

    /// Score in `[0.0, 1.0]`; text without words scores 0.0
    pub fn score(&self, text: &str) -> f64 {
        match self.word_counts(text) {
            (_, 0) => 0.0,
            (found, total) => found as f64 / total as f64,
        }
    }

    /// True if at least one word is recognised and at least
    /// `threshold_percent` of all words are.
    pub fn is_english(&self, text: &str, threshold_percent: f64) -> bool {
        let (found, total) = self.word_counts(text);
        found > 0 && (found as f64 / total as f64) * 100.0 >= threshold_percent
    }
}
