use super::{Codec, KeySpace};
use crate::alphabet::{self, LEN};
use crate::{CipherType, Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Shift in `0..26`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CaesarKey(u8);

impl CaesarKey {
    pub fn new(shift: i64) -> Result<Self> {
        if (0..LEN as i64).contains(&shift) {
            Ok(Self(shift as u8))
        } else {
            Err(Error::InvalidKey(format!("Caesar shift must be in 0..=25, got {}", shift)))
        }
    }

    pub fn shift(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CaesarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CaesarKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let shift: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidKey(format!("Caesar shift must be a number, got '{}'", s)))?;
        Self::new(shift)
    }
}

pub struct Caesar;

impl Codec for Caesar {
    type Key = CaesarKey;

    const CIPHER: CipherType = CipherType::Caesar;

    fn encode(&self, text: &str, key: &CaesarKey) -> Result<String> {
        Ok(alphabet::map_letters(text, |x| (x + key.0) % LEN))
    }

    fn decode(&self, text: &str, key: &CaesarKey) -> Result<String> {
        Ok(alphabet::map_letters(text, |y| (y + LEN - key.0) % LEN))
    }
}

impl KeySpace for Caesar {
    fn keys(&self, _text: &str) -> Vec<CaesarKey> {
        (0..LEN).map(CaesarKey).collect()
    }

    /// Shift implied by aligned plaintext/ciphertext letters. A single letter
    /// pair is enough; every pair must agree on the same shift.
    fn derive_key(&self, plaintext: &str, ciphertext: &str) -> Result<CaesarKey> {
        let plain: Vec<char> = plaintext.chars().collect();
        let cipher: Vec<char> = ciphertext.chars().collect();

        if plain.len() != cipher.len() {
            return Err(Error::InconsistentKey(format!(
                "plaintext has {} characters but ciphertext has {}",
                plain.len(),
                cipher.len()
            )));
        }

        let mut shift: Option<u8> = None;
        for (position, (&p, &c)) in plain.iter().zip(cipher.iter()).enumerate() {
            match (alphabet::index_of(p), alphabet::index_of(c)) {
                (Some(x), Some(y)) => {
                    if p.is_ascii_uppercase() != c.is_ascii_uppercase() {
                        return Err(Error::InconsistentKey(format!(
                            "letter case differs at position {}",
                            position
                        )));
                    }
                    let implied = (y + LEN - x) % LEN;
                    match shift {
                        None => shift = Some(implied),
                        Some(s) if s == implied => {}
                        Some(s) => {
                            return Err(Error::InconsistentKey(format!(
                                "position {} implies shift {} but earlier letters imply {}",
                                position, implied, s
                            )));
                        }
                    }
                }
                (None, None) if p == c => {}
                _ => {
                    return Err(Error::InconsistentKey(format!(
                        "'{}' cannot encrypt to '{}' at position {}",
                        p, c, position
                    )));
                }
            }
        }

        shift
            .map(CaesarKey)
            .ok_or_else(|| Error::InconsistentKey("no letters to compare".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caesar() {
        let key = CaesarKey::new(3).unwrap();
        assert_eq!(Caesar.encode("HELLO", &key).unwrap(), "KHOOR");
        assert_eq!(Caesar.decode("KHOOR", &key).unwrap(), "HELLO");
    }

    #[test]
    fn test_caesar_preserves_case_and_punctuation() {
        let key: CaesarKey = "13".parse().unwrap();
        let encoded = Caesar.encode("Hello, World!", &key).unwrap();
        assert_eq!(encoded, "Uryyb, Jbeyq!");
        assert_eq!(Caesar.decode(&encoded, &key).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_key_range() {
        assert!(CaesarKey::new(26).is_err());
        assert!(CaesarKey::new(-1).is_err());
        assert!("seven".parse::<CaesarKey>().is_err());
        assert_eq!(Caesar.keys("").len(), 26);
    }

    #[test]
    fn test_derive_from_single_pair() {
        assert_eq!(Caesar.derive_key("a", "h").unwrap().shift(), 7);
        assert_eq!(Caesar.derive_key("Z", "C").unwrap().shift(), 3);
    }

    #[test]
    fn test_derive_from_full_text() {
        let key = CaesarKey::new(17).unwrap();
        let plain = "Attack at dawn!";
        let cipher = Caesar.encode(plain, &key).unwrap();
        assert_eq!(Caesar.derive_key(plain, &cipher).unwrap(), key);
    }

    #[test]
    fn test_derive_inconsistent() {
        assert!(matches!(Caesar.derive_key("ab", "bd"), Err(Error::InconsistentKey(_))));
        assert!(matches!(Caesar.derive_key("a b", "b-c"), Err(Error::InconsistentKey(_))));
        assert!(matches!(Caesar.derive_key("abc", "bc"), Err(Error::InconsistentKey(_))));
        assert!(matches!(Caesar.derive_key("!!", "!!"), Err(Error::InconsistentKey(_))));
    }
}
