//! Brute force key recovery
//!
//! Map every key of a finite key space to `(key, score)` and reduce by
//! maximum score. Equal scores keep enumeration order, so the smallest key
//! wins and results are reproducible for a given ciphertext and dictionary.
//! Evaluation may run on a fixed-size worker pool; the reduction happens only
//! after every key has been scored.

use crate::ciphers::KeySpace;
use crate::{Dictionary, Error, Result, Scorer};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use tracing::{debug, info};

/// One decoded candidate
#[derive(Debug, Clone, Serialize)]
pub struct Candidate<K> {
    pub key: K,
    pub score: f64,
    pub plaintext: String,
}

pub struct BruteForcer<'d> {
    scorer: Scorer<'d>,
    pool: Option<ThreadPool>,
}

impl<'d> BruteForcer<'d> {
    /// Single-threaded brute forcer. Fails with `EmptyDictionary`.
    pub fn new(dictionary: &'d Dictionary) -> Result<Self> {
        Ok(Self {
            scorer: Scorer::new(dictionary)?,
            pool: None,
        })
    }

    /// Evaluate candidates on a pool of `workers` threads (0 or 1 = inline)
    pub fn with_workers(mut self, workers: usize) -> Result<Self> {
        self.pool = if workers > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("scytale-worker-{}", i))
                .build()
                .map_err(|e| Error::WorkerPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };
        Ok(self)
    }

    pub fn workers(&self) -> usize {
        self.pool.as_ref().map(|p| p.current_num_threads()).unwrap_or(1)
    }

    pub fn scorer(&self) -> &Scorer<'d> {
        &self.scorer
    }

    /// Every key's candidate, best first
    pub fn rank<C: KeySpace>(&self, codec: &C, ciphertext: &str) -> Result<Vec<Candidate<C::Key>>> {
        let keys = codec.keys(ciphertext);
        if keys.is_empty() {
            return Err(Error::InvalidKey(format!(
                "no {} keys exist for a message of {} characters",
                C::CIPHER.name(),
                ciphertext.chars().count()
            )));
        }

        let total = keys.len();
        let scorer = self.scorer;
        let evaluate = |(order, key): (usize, C::Key)| -> Option<(usize, Candidate<C::Key>)> {
            match codec.decode(ciphertext, &key) {
                Ok(plaintext) => {
                    let score = scorer.score(&plaintext);
                    Some((order, Candidate { key, score, plaintext }))
                }
                Err(e) => {
                    debug!("Skipping key {}: {}", key, e);
                    None
                }
            }
        };

        let mut scored: Vec<(usize, Candidate<C::Key>)> = match &self.pool {
            Some(pool) => pool.install(|| keys.into_par_iter().enumerate().filter_map(evaluate).collect()),
            None => keys.into_iter().enumerate().filter_map(evaluate).collect(),
        };

        if scored.is_empty() {
            return Err(Error::InvalidKey(format!(
                "none of the {} {} keys could decode the message",
                total,
                C::CIPHER.name()
            )));
        }

        scored.sort_by(|(order_a, a), (order_b, b)| {
            b.score.total_cmp(&a.score).then(order_a.cmp(order_b))
        });

        debug!("Scored {} {} keys on {} worker(s)", total, C::CIPHER.name(), self.workers());
        Ok(scored.into_iter().map(|(_, candidate)| candidate).collect())
    }

    /// The `n` best candidates
    pub fn top<C: KeySpace>(&self, codec: &C, ciphertext: &str, n: usize) -> Result<Vec<Candidate<C::Key>>> {
        let mut ranked = self.rank(codec, ciphertext)?;
        ranked.truncate(n.max(1));
        Ok(ranked)
    }

    /// The best candidate
    pub fn best<C: KeySpace>(&self, codec: &C, ciphertext: &str) -> Result<Candidate<C::Key>> {
        let best = self
            .rank(codec, ciphertext)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidKey("empty key space".into()))?;

        info!("{} best key {} (score {:.3})", C::CIPHER.name(), best.key, best.score);
        Ok(best)
    }
}
