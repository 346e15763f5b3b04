//! Word patterns
//!
//! A pattern replaces each letter of a word with the rank of that letter's
//! first occurrence: "hello" -> 0.1.2.2.3, "that" -> 0.1.2.0. Two words can
//! be images of each other under one substitution key only if their patterns
//! are equal.

use crate::Dictionary;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(Vec<u8>);

impl Pattern {
    /// Pattern of `word`, case-insensitive
    pub fn of(word: &str) -> Self {
        let mut seen: Vec<char> = Vec::new();
        let ranks = word
            .chars()
            .map(|c| {
                let c = c.to_ascii_lowercase();
                match seen.iter().position(|&s| s == c) {
                    Some(rank) => rank as u8,
                    None => {
                        seen.push(c);
                        (seen.len() - 1) as u8
                    }
                }
            })
            .collect();
        Self(ranks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct letters
    pub fn distinct(&self) -> usize {
        self.0.iter().max().map(|&m| m as usize + 1).unwrap_or(0)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|r| r.to_string()).collect();
        f.write_str(&parts.join("."))
    }
}

/// Dictionary words grouped by pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternIndex {
    groups: BTreeMap<Pattern, BTreeSet<String>>,
}

impl PatternIndex {
    pub fn build(dictionary: &Dictionary) -> Self {
        let mut groups: BTreeMap<Pattern, BTreeSet<String>> = BTreeMap::new();
        for word in dictionary.iter() {
            groups.entry(Pattern::of(word)).or_default().insert(word.to_string());
        }
        Self { groups }
    }

    /// Words sharing `pattern`, in lexicographic order
    pub fn candidates(&self, pattern: &Pattern) -> Option<&BTreeSet<String>> {
        self.groups.get(pattern)
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
