//! Word dictionary
//!
//! An immutable set of lowercase words, built once and then shared by
//! reference with the scorer, the pattern index and the crackers.

use crate::alphabet;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const BUILTIN_WORDS: &str = include_str!("../data/english.txt");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build from any word iterator. Words are trimmed and lower-cased;
    /// anything that is not purely alphabetic is dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        let mut skipped = 0usize;

        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if alphabet::is_word(word) {
                set.insert(word.to_ascii_lowercase());
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("Skipped {} non-alphabetic dictionary entries", skipped);
        }

        Self { words: set }
    }

    /// Parse a newline-separated word list
    pub fn parse(list: &str) -> Result<Self> {
        let dictionary = Self::from_words(list.lines());
        if dictionary.is_empty() {
            return Err(Error::EmptyDictionary);
        }
        Ok(dictionary)
    }

    /// Load a word list file (one word per line)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }

        let dictionary = Self::from_words(lines);
        if dictionary.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        debug!("Loaded {} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// The bundled English word list (about 77,000 words, contractions
    /// written without the apostrophe)
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_WORDS.lines())
    }

    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(|c| c.is_ascii_uppercase()) {
            self.words.contains(&word.to_ascii_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Fail with `EmptyDictionary` unless there is at least one word
    pub fn require_words(&self) -> Result<()> {
        if self.is_empty() {
            Err(Error::EmptyDictionary)
        } else {
            Ok(())
        }
    }
}
