//! Seeded round-trip trials
//!
//! Each trial shuffles a sample built from letters of both cases,
//! punctuation and spaces, encodes it under a random key and decodes it back.

use crate::ciphers::{Affine, Caesar, Codec, Route, Substitution, Transposition, Vigenere};
use crate::{keygen, CipherType, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TRIALS: usize = 20;

const SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+ ";

/// Outcome for one cipher
#[derive(Debug, Clone, Serialize)]
pub struct CipherReport {
    pub cipher: CipherType,
    pub trials: usize,
    pub passed: usize,
    /// Description of the first failed trial
    pub first_failure: Option<String>,
}

impl CipherReport {
    pub fn ok(&self) -> bool {
        self.passed == self.trials
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelfTestReport {
    pub seed: u64,
    pub ciphers: Vec<CipherReport>,
}

impl SelfTestReport {
    pub fn ok(&self) -> bool {
        self.ciphers.iter().all(CipherReport::ok)
    }
}

fn sample(rng: &mut StdRng) -> String {
    let mut chars: Vec<char> = SYMBOLS.repeat(rng.random_range(10..=100)).chars().collect();
    chars.shuffle(rng);
    chars.into_iter().collect()
}

/// The sample cut into five-character words, an even number of them
fn word_sample(text: &str) -> String {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut words: Vec<String> = chars.chunks(5).map(|chunk| chunk.iter().collect()).collect();
    words.truncate(words.len() & !1);
    words.join(" ")
}

/// Encode then decode; `Some(reason)` on mismatch or error
fn round_trip<C: Codec>(codec: &C, text: &str, key: &C::Key) -> Option<String> {
    let result = codec
        .encode(text, key)
        .and_then(|encoded| codec.decode(&encoded, key));
    match result {
        Ok(decoded) if decoded == text => None,
        Ok(_) => Some(format!("key {} did not round-trip", key)),
        Err(e) => Some(format!("key {}: {}", key, e)),
    }
}

fn trial(cipher: CipherType, rng: &mut StdRng) -> Result<Option<String>> {
    let text = sample(rng);
    Ok(match cipher {
        CipherType::Caesar => round_trip(&Caesar, &text, &keygen::caesar(rng)?),
        CipherType::Affine => round_trip(&Affine, &text, &keygen::affine(rng)?),
        CipherType::Transposition => {
            let key = keygen::transposition(rng, text.chars().count())?;
            round_trip(&Transposition, &text, &key)
        }
        CipherType::Substitution => round_trip(&Substitution, &text, &keygen::substitution(rng)?),
        CipherType::Vigenere => {
            let len = rng.random_range(1..=16);
            round_trip(&Vigenere, &text, &keygen::vigenere(rng, len)?)
        }
        CipherType::Route => {
            let words = word_sample(&text);
            let key = keygen::route(rng, words.split(' ').count())?;
            round_trip(&Route, &words, &key)
        }
    })
}

/// Run `trials` round trips per cipher from `seed`
pub fn run(trials: usize, seed: u64) -> Result<SelfTestReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ciphers = Vec::with_capacity(CipherType::ALL.len());

    for cipher in CipherType::ALL {
        let mut report = CipherReport {
            cipher,
            trials,
            passed: 0,
            first_failure: None,
        };

        for n in 1..=trials {
            match trial(cipher, &mut rng)? {
                None => report.passed += 1,
                Some(reason) => {
                    warn!("{} trial #{:02} failed: {}", cipher.name(), n, reason);
                    if report.first_failure.is_none() {
                        report.first_failure = Some(format!("trial #{:02}: {}", n, reason));
                    }
                }
            }
        }

        debug!("{}: {}/{} trials passed", cipher.name(), report.passed, trials);
        ciphers.push(report);
    }

    Ok(SelfTestReport { seed, ciphers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ciphers_pass() {
        let report = run(5, DEFAULT_SEED).unwrap();
        assert_eq!(report.ciphers.len(), 6);
        assert!(report.ok(), "{:?}", report);
        assert!(report.ciphers.iter().all(|c| c.passed == 5 && c.first_failure.is_none()));
    }

    #[test]
    fn test_zero_trials() {
        let report = run(0, 1).unwrap();
        assert!(report.ok());
        assert!(report.ciphers.iter().all(|c| c.trials == 0));
    }

    #[test]
    fn test_sample_keeps_symbols() {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        let text = sample(&mut rng);
        assert_eq!(text.chars().count() % SYMBOLS.chars().count(), 0);
        assert!(text.contains(' ') && text.contains('!'));

        let words = word_sample(&text);
        assert_eq!(words.split(' ').count() % 2, 0);
        assert!(words.split(' ').all(|w| (1..=5).contains(&w.len())));
    }
}
