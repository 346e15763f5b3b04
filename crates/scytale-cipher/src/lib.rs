//! Scytale: classical cipher suite and cryptanalysis engine
//!
//! Encode/decode for six historical ciphers plus automated key recovery,
//! either by scored brute force over a finite key space or, for the simple
//! substitution cipher, by a dictionary-driven word-pattern attack.
//!
//! # Modules
//! - `alphabet` - The 26-letter symbol set and case/punctuation preservation
//! - `dictionary` - Load-once, read-only word list
//! - `pattern` - Word letter-equivalence patterns and the pattern index
//! - `ciphers` - Caesar, Affine, Transposition, Substitution, Vigenère, Route
//! - `scorer` - Dictionary-membership fitness of a candidate plaintext
//! - `bruteforce` - Scored, parallel key-space enumeration
//! - `cracker` - Word-pattern attack on the substitution cipher
//! - `analysis` - Letter frequency, IoC, Kasiski
//! - `keygen` - Random valid keys
//! - `selftest` - Seeded round-trip trials over every cipher

pub mod alphabet;
pub mod dictionary;
pub mod pattern;
pub mod ciphers;
pub mod scorer;
pub mod bruteforce;
pub mod cracker;
pub mod analysis;
pub mod keygen;
pub mod selftest;

pub use dictionary::Dictionary;
pub use pattern::{Pattern, PatternIndex};
pub use ciphers::{
    Affine, AffineKey, Caesar, CaesarKey, Codec, KeySpace, Route, RouteKey, Substitution,
    SubstitutionKey, Transposition, TranspositionKey, Vigenere, VigenereKey,
};
pub use scorer::Scorer;
pub use bruteforce::{BruteForcer, Candidate};
pub use cracker::{CrackOutcome, Mapping, RankedMapping, SubstitutionCracker};
pub use analysis::FrequencyAnalysis;
pub use selftest::SelfTestReport;

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown cipher '{0}'; use caesar, affine, transposition, substitution, vigenere or route")]
    UnknownCipher(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Inconsistent key: {0}")]
    InconsistentKey(String),

    #[error("No consistent substitution mapping survives for this ciphertext")]
    NoConsistentMapping,

    #[error("{0} substitution mappings remain; choose one from the ranked list")]
    AmbiguousMapping(usize),

    #[error("Dictionary is empty or failed to load")]
    EmptyDictionary,

    #[error("Worker pool failed: {0}")]
    WorkerPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Supported ciphers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CipherType {
    Caesar,
    Affine,
    Transposition,
    Substitution,
    Vigenere,
    Route,
}

impl CipherType {
    pub const ALL: [CipherType; 6] = [
        CipherType::Caesar,
        CipherType::Affine,
        CipherType::Transposition,
        CipherType::Substitution,
        CipherType::Vigenere,
        CipherType::Route,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CipherType::Caesar => "Caesar Cipher",
            CipherType::Affine => "Affine Cipher",
            CipherType::Transposition => "Columnar Transposition",
            CipherType::Substitution => "Simple Substitution",
            CipherType::Vigenere => "Vigenère Cipher",
            CipherType::Route => "Route Cipher",
        }
    }

    /// Key recovery strategy, if any
    pub fn attack(&self) -> Option<&'static str> {
        match self {
            CipherType::Caesar | CipherType::Affine | CipherType::Transposition => Some("brute force"),
            CipherType::Substitution => Some("word pattern"),
            CipherType::Vigenere | CipherType::Route => None,
        }
    }
}

impl fmt::Display for CipherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            CipherType::Caesar => "caesar",
            CipherType::Affine => "affine",
            CipherType::Transposition => "transposition",
            CipherType::Substitution => "substitution",
            CipherType::Vigenere => "vigenere",
            CipherType::Route => "route",
        };
        f.write_str(id)
    }
}

impl Serialize for CipherType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for CipherType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "caesar" => Ok(CipherType::Caesar),
            "affine" => Ok(CipherType::Affine),
            "transposition" | "columnar" => Ok(CipherType::Transposition),
            "substitution" | "simple" => Ok(CipherType::Substitution),
            "vigenere" | "vigenère" => Ok(CipherType::Vigenere),
            "route" => Ok(CipherType::Route),
            other => Err(Error::UnknownCipher(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cipher_type_roundtrip() {
        for cipher in CipherType::ALL {
            assert_eq!(cipher.to_string().parse::<CipherType>().unwrap(), cipher);
        }
        assert!("enigma".parse::<CipherType>().is_err());
    }

    #[test]
    fn test_attack_strategies() {
        let unbreakable: Vec<_> = CipherType::ALL.iter().filter(|c| c.attack().is_none()).collect();
        assert_eq!(unbreakable, vec![&CipherType::Vigenere, &CipherType::Route]);
        assert_eq!(CipherType::Substitution.attack(), Some("word pattern"));
        assert_eq!(CipherType::Affine.attack(), Some("brute force"));
    }
}
