use super::{gcd, mod_inverse, Codec, KeySpace};
use crate::alphabet::{self, LEN};
use crate::{CipherType, Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// E(x) = (a·x + b) mod 26 with gcd(a, 26) = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AffineKey {
    a: u8,
    b: u8,
    #[serde(skip)]
    a_inv: u8,
}

impl AffineKey {
    pub fn new(a: i64, b: i64) -> Result<Self> {
        if !(1..LEN as i64).contains(&a) {
            return Err(Error::InvalidKey(format!("Affine 'a' must be in 1..=25, got {}", a)));
        }
        if !(0..LEN as i64).contains(&b) {
            return Err(Error::InvalidKey(format!("Affine 'b' must be in 0..=25, got {}", b)));
        }
        if gcd(a, LEN as i64) != 1 {
            return Err(Error::InvalidKey(format!("Affine 'a' must be coprime to 26, got {}", a)));
        }
        let a_inv = mod_inverse(a, LEN as i64)
            .ok_or_else(|| Error::InvalidKey(format!("no modular inverse for a = {}", a)))?;

        Ok(Self { a: a as u8, b: b as u8, a_inv: a_inv as u8 })
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// a⁻¹ mod 26
    pub fn inverse(&self) -> u8 {
        self.a_inv
    }

    /// The twelve multipliers coprime to 26
    pub fn multipliers() -> impl Iterator<Item = u8> {
        (1..LEN).filter(|&a| gcd(a as i64, LEN as i64) == 1)
    }
}

impl fmt::Display for AffineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.a, self.b)
    }
}

impl FromStr for AffineKey {
    type Err = Error;

    /// Accepts "a,b" or "a b"
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() != 2 {
            return Err(Error::InvalidKey("Affine key must be 'a,b' format".into()));
        }

        let parse = |part: &str| {
            part.parse::<i64>()
                .map_err(|_| Error::InvalidKey(format!("Affine key part '{}' is not a number", part)))
        };
        Self::new(parse(parts[0])?, parse(parts[1])?)
    }
}

pub struct Affine;

impl Codec for Affine {
    type Key = AffineKey;

    const CIPHER: CipherType = CipherType::Affine;

    fn encode(&self, text: &str, key: &AffineKey) -> Result<String> {
        let (a, b) = (key.a as u32, key.b as u32);
        Ok(alphabet::map_letters(text, |x| ((a * x as u32 + b) % LEN as u32) as u8))
    }

    fn decode(&self, text: &str, key: &AffineKey) -> Result<String> {
        let (a_inv, b) = (key.a_inv as u32, key.b as u32);
        Ok(alphabet::map_letters(text, |y| {
            ((a_inv * (y as u32 + LEN as u32 - b)) % LEN as u32) as u8
        }))
    }
}

impl KeySpace for Affine {
    fn keys(&self, _text: &str) -> Vec<AffineKey> {
        AffineKey::multipliers()
            .flat_map(|a| (0..LEN).map(move |b| (a, b)))
            .filter_map(|(a, b)| AffineKey::new(a as i64, b as i64).ok())
            .collect()
    }
}
