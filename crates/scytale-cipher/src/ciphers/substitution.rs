use super::Codec;
use crate::alphabet::{self, LEN};
use crate::{CipherType, Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A bijection over the alphabet, written as the 26 cipher letters for
/// plain letters A..Z (e.g. "QWERTYUIOPASDFGHJKLZXCVBNM").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SubstitutionKey {
    #[serde(serialize_with = "serialize_letters")]
    forward: [u8; LEN as usize],
    #[serde(skip)]
    inverse: [u8; LEN as usize],
}

fn serialize_letters<S: serde::Serializer>(
    letters: &[u8; LEN as usize],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let text: String = letters.iter().map(|&i| alphabet::letter(i, true)).collect();
    serializer.serialize_str(&text)
}

impl SubstitutionKey {
    /// `forward[plain] = cipher`; must be a permutation of 0..26
    pub fn from_forward(forward: [u8; LEN as usize]) -> Result<Self> {
        let mut inverse = [u8::MAX; LEN as usize];
        for (plain, &cipher) in forward.iter().enumerate() {
            if cipher >= LEN {
                return Err(Error::InvalidKey(format!("letter index {} out of range", cipher)));
            }
            if inverse[cipher as usize] != u8::MAX {
                return Err(Error::InvalidKey(format!(
                    "'{}' appears more than once in the substitution key",
                    alphabet::letter(cipher, true)
                )));
            }
            inverse[cipher as usize] = plain as u8;
        }
        Ok(Self { forward, inverse })
    }

    /// Cipher letter for a plain letter
    pub fn encrypt_letter(&self, plain: u8) -> u8 {
        self.forward[plain as usize]
    }

    /// Plain letter for a cipher letter
    pub fn decrypt_letter(&self, cipher: u8) -> u8 {
        self.inverse[cipher as usize]
    }
}

impl fmt::Display for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &idx in &self.forward {
            write!(f, "{}", alphabet::letter(idx, true))?;
        }
        Ok(())
    }
}

impl FromStr for SubstitutionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.chars().count() != LEN as usize {
            return Err(Error::InvalidKey(format!(
                "Substitution key must have 26 letters, got {}",
                s.chars().count()
            )));
        }

        let mut forward = [0u8; LEN as usize];
        for (slot, c) in forward.iter_mut().zip(s.chars()) {
            *slot = alphabet::index_of(c)
                .ok_or_else(|| Error::InvalidKey(format!("'{}' is not a letter", c)))?;
        }
        Self::from_forward(forward)
    }
}

pub struct Substitution;

impl Codec for Substitution {
    type Key = SubstitutionKey;

    const CIPHER: CipherType = CipherType::Substitution;

    fn encode(&self, text: &str, key: &SubstitutionKey) -> Result<String> {
        Ok(alphabet::map_letters(text, |x| key.encrypt_letter(x)))
    }

    fn decode(&self, text: &str, key: &SubstitutionKey) -> Result<String> {
        Ok(alphabet::map_letters(text, |y| key.decrypt_letter(y)))
    }
}
