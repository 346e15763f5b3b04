//! Classic Ciphers
//!
//! Caesar, Affine, Columnar Transposition, Simple Substitution, Vigenère,
//! and the word-level Route cipher.
//!
//! Every cipher is a [`Codec`] over a validated key type. Ciphers with a
//! small finite key space also implement [`KeySpace`], which is what the
//! brute forcer enumerates.

mod affine;
mod caesar;
mod route;
mod substitution;
mod transposition;
mod vigenere;

pub use affine::{Affine, AffineKey};
pub use caesar::{Caesar, CaesarKey};
pub use route::{Route, RouteKey};
pub use substitution::{Substitution, SubstitutionKey};
pub use transposition::{Transposition, TranspositionKey};
pub use vigenere::{Vigenere, VigenereKey};

use crate::{CipherType, Error, Result};
use std::fmt;

pub trait Codec: Sync {
    /// Validated key; `Display` renders the literal form accepted on input
    type Key: Clone + fmt::Display + Send + Sync;

    const CIPHER: CipherType;

    fn encode(&self, text: &str, key: &Self::Key) -> Result<String>;

    fn decode(&self, text: &str, key: &Self::Key) -> Result<String>;
}

/// A finite, enumerable key space
pub trait KeySpace: Codec {
    /// Every valid key for a message of this text, smallest first. The order
    /// is the tie-break order used when scores are equal.
    fn keys(&self, text: &str) -> Vec<Self::Key>;

    /// Recover the key that turns `plaintext` into `ciphertext`: the first key
    /// in enumeration order whose encoding matches.
    fn derive_key(&self, plaintext: &str, ciphertext: &str) -> Result<Self::Key> {
        self.keys(plaintext)
            .into_iter()
            .find(|key| {
                self.encode(plaintext, key)
                    .map(|encoded| encoded == ciphertext)
                    .unwrap_or(false)
            })
            .ok_or_else(|| {
                Error::InconsistentKey(format!(
                    "no {} key turns the plaintext into this ciphertext",
                    Self::CIPHER.name()
                ))
            })
    }
}

// Helper functions
pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

/// Modular multiplicative inverse via the extended Euclidean algorithm
pub(crate) fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    let mut rs = (m, a.rem_euclid(m));
    let mut ts = (0i64, 1i64);

    while rs.1 != 0 {
        let q = rs.0 / rs.1;
        rs = (rs.1, rs.0 - q * rs.1);
        ts = (ts.1, ts.0 - q * ts.1);
    }

    if rs.0 == 1 {
        Some(ts.0.rem_euclid(m))
    } else {
        None
    }
}
