use super::Codec;
use crate::alphabet::{self, LEN};
use crate::{CipherType, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Non-empty keyword of letters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VigenereKey(Vec<u8>);

impl VigenereKey {
    pub fn new(keyword: &str) -> Result<Self> {
        if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidKey("Key must be non-empty alphabetic".into()));
        }
        Ok(Self(alphabet::indices(keyword)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shift `letter` by the key position it lands on; only letters consume a position
    fn apply(&self, text: &str, mut shift: impl FnMut(u8, u8) -> u8) -> String {
        let mut position = 0;
        alphabet::map_letters(text, |x| {
            let k = self.0[position % self.0.len()];
            position += 1;
            shift(x, k)
        })
    }
}

impl fmt::Display for VigenereKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &idx in &self.0 {
            write!(f, "{}", alphabet::letter(idx, true))?;
        }
        Ok(())
    }
}

impl FromStr for VigenereKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.trim())
    }
}

pub struct Vigenere;

impl Codec for Vigenere {
    type Key = VigenereKey;

    const CIPHER: CipherType = CipherType::Vigenere;

    fn encode(&self, text: &str, key: &VigenereKey) -> Result<String> {
        Ok(key.apply(text, |x, k| (x + k) % LEN))
    }

    fn decode(&self, text: &str, key: &VigenereKey) -> Result<String> {
        Ok(key.apply(text, |y, k| (y + LEN - k) % LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vigenere() {
        let key = VigenereKey::new("KEY").unwrap();
        assert_eq!(Vigenere.encode("HELLO", &key).unwrap(), "RIJVS");
        assert_eq!(Vigenere.decode("RIJVS", &key).unwrap(), "HELLO");
    }

    #[test]
    fn test_non_letters_consume_no_key_position() {
        let key: VigenereKey = "lemon".parse().unwrap();
        let encoded = Vigenere.encode("Attack at dawn!", &key).unwrap();
        assert_eq!(encoded, "Lxfopv ef rnhr!");
        assert_eq!(Vigenere.decode(&encoded, &key).unwrap(), "Attack at dawn!");
        assert_eq!(key.to_string(), "LEMON");
    }

    #[test]
    fn test_invalid_keyword() {
        assert!(VigenereKey::new("").is_err());
        assert!(VigenereKey::new("key1").is_err());
        assert!("two words".parse::<VigenereKey>().is_err());
    }
}
