//! Random keys
//!
//! Trivial keys are never produced: no zero Caesar shift, no Affine key with
//! `a <= 1` or `b <= 1`, no single-column transposition, no route grid
//! with a single row or column.

use crate::alphabet::LEN;
use crate::ciphers::{AffineKey, CaesarKey, RouteKey, SubstitutionKey, TranspositionKey, VigenereKey};
use crate::{Error, Result};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

pub fn caesar(rng: &mut impl Rng) -> Result<CaesarKey> {
    CaesarKey::new(rng.random_range(1..LEN as i64))
}

pub fn affine(rng: &mut impl Rng) -> Result<AffineKey> {
    let multipliers: Vec<u8> = AffineKey::multipliers().filter(|&a| a > 1).collect();
    let a = *multipliers
        .choose(rng)
        .ok_or_else(|| Error::InvalidKey("no Affine multiplier available".into()))?;
    AffineKey::new(a as i64, rng.random_range(2..LEN as i64))
}

/// Column count for a message of `len` characters: between 2 and half the
/// length. Messages shorter than 3 characters have no such key.
pub fn transposition(rng: &mut impl Rng, len: usize) -> Result<TranspositionKey> {
    if len < 3 {
        return Err(Error::InvalidKey(format!(
            "a message of {} characters is too short for a transposition key",
            len
        )));
    }
    let max = (len / 2).clamp(2, len - 1);
    TranspositionKey::new(rng.random_range(2..=max))
}

pub fn substitution(rng: &mut impl Rng) -> Result<SubstitutionKey> {
    let mut forward: Vec<u8> = (0..LEN).collect();
    forward.shuffle(rng);

    let mut key = [0u8; LEN as usize];
    key.copy_from_slice(&forward);
    SubstitutionKey::from_forward(key)
}

pub fn vigenere(rng: &mut impl Rng, len: usize) -> Result<VigenereKey> {
    let keyword: String = (0..len)
        .map(|_| (b'A' + rng.random_range(0..LEN)) as char)
        .collect();
    VigenereKey::new(&keyword)
}

/// Route over a grid that holds exactly `words` words, with at least two
/// rows and two columns. Word counts without such a grid (primes, fewer than
/// 4) have no key.
pub fn route(rng: &mut impl Rng, words: usize) -> Result<RouteKey> {
    let layouts: Vec<usize> = (2..=words / 2).filter(|c| words % c == 0).collect();
    let columns = *layouts.choose(rng).ok_or_else(|| {
        Error::InvalidKey(format!("{} words do not fill a grid of at least 2 x 2", words))
    })?;

    let mut route: Vec<i32> = (1..=columns as i32).collect();
    route.shuffle(rng);
    for k in route.iter_mut() {
        if rng.random_bool(0.5) {
            *k = -*k;
        }
    }
    RouteKey::new(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_keys_are_valid_and_non_trivial() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(caesar(&mut rng).unwrap().shift() > 0);

            let affine = affine(&mut rng).unwrap();
            assert!(affine.a() > 1 && affine.b() > 1);

            let columns = transposition(&mut rng, 40).unwrap().columns();
            assert!((2..=20).contains(&columns));
        }
    }

    #[test]
    fn test_substitution_is_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let key = substitution(&mut rng).unwrap();
        let mut letters: Vec<char> = key.to_string().chars().collect();
        letters.sort();
        assert_eq!(letters.into_iter().collect::<String>(), crate::alphabet::LETTERS);
    }

    #[test]
    fn test_same_seed_same_keys() {
        let a = substitution(&mut StdRng::seed_from_u64(1)).unwrap();
        let b = substitution(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_messages() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(transposition(&mut rng, 2).is_err());
        assert_eq!(transposition(&mut rng, 3).unwrap().columns(), 2);
        assert!(vigenere(&mut rng, 0).is_err());
        assert_eq!(vigenere(&mut rng, 6).unwrap().len(), 6);
    }

    #[test]
    fn test_route_grid_fits_word_count() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let key = route(&mut rng, 24).unwrap();
            assert!([2, 3, 4, 6, 8, 12].contains(&key.columns()));
            assert!(key.rows(24).unwrap() >= 2);
        }
        assert_eq!(route(&mut rng, 4).unwrap().columns(), 2);
        assert!(route(&mut rng, 7).is_err());
        assert!(route(&mut rng, 3).is_err());
        assert!(route(&mut rng, 0).is_err());
    }
}
