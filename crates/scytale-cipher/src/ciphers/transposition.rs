use super::{Codec, KeySpace};
use crate::{CipherType, Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of grid columns. Valid for a message of length `n` when `1 <= key < n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TranspositionKey(usize);

impl TranspositionKey {
    pub fn new(columns: usize) -> Result<Self> {
        if columns == 0 {
            return Err(Error::InvalidKey("Transposition key must be at least 1".into()));
        }
        Ok(Self(columns))
    }

    pub fn columns(&self) -> usize {
        self.0
    }

    fn check(&self, len: usize) -> Result<()> {
        if self.0 >= len {
            return Err(Error::InvalidKey(format!(
                "Transposition key {} must be smaller than the message length {}",
                self.0, len
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TranspositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TranspositionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let columns: usize = s.trim().parse().map_err(|_| {
            Error::InvalidKey(format!("Transposition key must be a positive number, got '{}'", s))
        })?;
        Self::new(columns)
    }
}

/// Columnar transposition.
///
/// The message (spaces included) is written row by row into a grid `key`
/// columns wide and read back column by column. Only the last row may be
/// short, so the first `len % key` columns hold one more character than the
/// rest.
pub struct Transposition;

/// Source positions in ciphertext order: column 0 top to bottom, then column 1...
fn read_order(len: usize, columns: usize) -> impl Iterator<Item = usize> {
    (0..columns).flat_map(move |col| (col..len).step_by(columns))
}

impl Codec for Transposition {
    type Key = TranspositionKey;

    const CIPHER: CipherType = CipherType::Transposition;

    fn encode(&self, text: &str, key: &TranspositionKey) -> Result<String> {
        let chars: Vec<char> = text.chars().collect();
        key.check(chars.len())?;

        Ok(read_order(chars.len(), key.0).map(|i| chars[i]).collect())
    }

    fn decode(&self, text: &str, key: &TranspositionKey) -> Result<String> {
        let chars: Vec<char> = text.chars().collect();
        key.check(chars.len())?;

        let mut plain = vec!['\0'; chars.len()];
        for (&c, position) in chars.iter().zip(read_order(chars.len(), key.0)) {
            plain[position] = c;
        }
        Ok(plain.into_iter().collect())
    }
}

impl KeySpace for Transposition {
    fn keys(&self, text: &str) -> Vec<TranspositionKey> {
        (1..text.chars().count()).map(TranspositionKey).collect()
    }
}
