//! Cryptanalysis Tools
//!
//! Letter frequency, English frequency match, Index of Coincidence and
//! Kasiski examination for Vigenère key lengths.

use crate::alphabet::{self, LEN};
use serde::Serialize;
use std::collections::HashMap;

/// English letters from most to least frequent
pub const ETAOIN: &str = "ETAOINSHRDLCUMWFGYPBVKJXQZ";

/// Longest key length reported by Kasiski examination
pub const MAX_KEY_LENGTH: usize = 16;

/// Candidate Vigenère key length and how many repeat distances it divides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyLengthHint {
    pub length: usize,
    pub count: usize,
}

/// Frequency analysis for cryptanalysis
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyAnalysis {
    /// Occurrences of A..Z, case-insensitive
    pub counts: [usize; LEN as usize],
    pub total: usize,
    /// All 26 letters, most frequent first
    pub frequency_order: String,
    /// 0..=12
    pub english_match: u8,
    pub index_of_coincidence: f64,
    pub key_lengths: Vec<KeyLengthHint>,
}

impl FrequencyAnalysis {
    /// Analyze text for frequency patterns
    pub fn analyze(text: &str) -> Self {
        let letters: Vec<u8> = text.chars().filter_map(alphabet::index_of).collect();

        let mut counts = [0usize; LEN as usize];
        for &idx in &letters {
            counts[idx as usize] += 1;
        }

        let frequency_order = frequency_order(&counts);
        Self {
            counts,
            total: letters.len(),
            english_match: english_match(&frequency_order),
            index_of_coincidence: index_of_coincidence(&counts, letters.len()),
            key_lengths: kasiski(&letters),
            frequency_order,
        }
    }

    pub fn count(&self, c: char) -> usize {
        alphabet::index_of(c).map(|i| self.counts[i as usize]).unwrap_or(0)
    }

    /// Get frequency as percentage
    pub fn frequency_percent(&self, c: char) -> f64 {
        if self.total > 0 {
            (self.count(c) as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Get top N most frequent letters that occur at all
    pub fn top_letters(&self, n: usize) -> Vec<(char, usize)> {
        self.frequency_order
            .chars()
            .map(|c| (c, self.count(c)))
            .filter(|&(_, count)| count > 0)
            .take(n)
            .collect()
    }

    /// Render as ASCII frequency chart
    pub fn render_ascii(&self) -> String {
        let mut lines = Vec::new();
        lines.push("FREQUENCY ANALYSIS".to_string());
        lines.push("═".repeat(40));

        let max_count = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let scale = 30.0 / max_count as f64;

        for c in alphabet::LETTERS.chars() {
            let bar = "█".repeat((self.count(c) as f64 * scale) as usize);
            lines.push(format!("{}: {:5.2}% |{}", c, self.frequency_percent(c), bar));
        }

        lines.push(String::new());
        lines.push(format!("Letters:              {}", self.total));
        lines.push(format!("Frequency order:      {}", self.frequency_order));
        lines.push(format!("English match:        {}/12", self.english_match));
        lines.push(format!("Index of Coincidence: {:.4}", self.index_of_coincidence));
        if !self.key_lengths.is_empty() {
            let hints: Vec<String> = self
                .key_lengths
                .iter()
                .take(5)
                .map(|h| format!("{} ({})", h.length, h.count))
                .collect();
            lines.push(format!("Key length hints:     {}", hints.join(", ")));
        }

        lines.join("\n")
    }
}

/// Most frequent first; equal counts put letters rarer in English first
fn frequency_order(counts: &[usize; LEN as usize]) -> String {
    let rank = |idx: u8| ETAOIN.find(alphabet::letter(idx, true)).unwrap_or(0);
    let mut order: Vec<u8> = (0..LEN).collect();
    order.sort_by(|&a, &b| {
        counts[b as usize]
            .cmp(&counts[a as usize])
            .then(rank(b).cmp(&rank(a)))
    });
    order.into_iter().map(|idx| alphabet::letter(idx, true)).collect()
}

/// One point per letter of ETAOIN's six most (and six least) frequent found
/// among the text's six most (least) frequent
fn english_match(order: &str) -> u8 {
    let head = &order[..6];
    let tail = &order[order.len() - 6..];
    let common = ETAOIN[..6].chars().filter(|&c| head.contains(c)).count();
    let rare = ETAOIN[ETAOIN.len() - 6..].chars().filter(|&c| tail.contains(c)).count();
    (common + rare) as u8
}

/// English text ≈ 0.067, random ≈ 0.038
fn index_of_coincidence(counts: &[usize; LEN as usize], total: usize) -> f64 {
    if total < 2 {
        return 0.0;
    }
    let sum: usize = counts.iter().map(|&n| n * n.saturating_sub(1)).sum();
    sum as f64 / (total * (total - 1)) as f64
}

/// Factors (2..=MAX_KEY_LENGTH) of the distances between repeated trigrams,
/// most common first
fn kasiski(letters: &[u8]) -> Vec<KeyLengthHint> {
    let mut positions: HashMap<&[u8], Vec<usize>> = HashMap::new();
    for (i, window) in letters.windows(3).enumerate() {
        positions.entry(window).or_default().push(i);
    }

    let mut factors: HashMap<usize, usize> = HashMap::new();
    for starts in positions.values().filter(|p| p.len() > 1) {
        for (i, &earlier) in starts.iter().enumerate() {
            for &later in &starts[i + 1..] {
                let distance = later - earlier;
                for length in (2..=MAX_KEY_LENGTH).filter(|l| distance % l == 0) {
                    *factors.entry(length).or_insert(0) += 1;
                }
            }
        }
    }

    let mut hints: Vec<KeyLengthHint> = factors
        .into_iter()
        .map(|(length, count)| KeyLengthHint { length, count })
        .collect();
    hints.sort_by(|a, b| b.count.cmp(&a.count).then(a.length.cmp(&b.length)));
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphers::{Codec, Vigenere, VigenereKey};

    const SAMPLE: &str = "The sun and the man and the dog and the cat sat by the door and the sun \
                          set over the hill and the man went home to the town";

    #[test]
    fn test_frequency_analysis() {
        let analysis = FrequencyAnalysis::analyze("HELLO WORLD");
        assert_eq!(analysis.total, 10);
        assert_eq!(analysis.count('L'), 3);
        assert_eq!(analysis.count('l'), 3);
        assert_eq!(analysis.frequency_percent('O'), 20.0);
    }

    #[test]
    fn test_frequency_order_ties() {
        let analysis = FrequencyAnalysis::analyze("HELLO WORLD");
        assert_eq!(analysis.frequency_order, "LOWDRHEZQXJKVBPYGFMUCSNIAT");
        assert_eq!(analysis.top_letters(2), vec![('L', 3), ('O', 2)]);
    }

    #[test]
    fn test_english_match() {
        let english = FrequencyAnalysis::analyze(SAMPLE);
        assert_eq!(english.english_match, 8);

        let empty = FrequencyAnalysis::analyze("");
        assert_eq!(empty.english_match, 0);
        assert_eq!(empty.frequency_order, "ZQXJKVBPYGFWMUCLDRHSNIOATE");
    }

    #[test]
    fn test_ioc_english() {
        // Natural English text should have IoC around 0.067
        let analysis = FrequencyAnalysis::analyze(SAMPLE);
        let ioc = analysis.index_of_coincidence;
        assert!(ioc > 0.05 && ioc < 0.10, "IoC was {}", ioc);
        assert_eq!(FrequencyAnalysis::analyze("A").index_of_coincidence, 0.0);
    }

    #[test]
    fn test_kasiski_factors() {
        // ABC repeats 4 letters later
        let analysis = FrequencyAnalysis::analyze("ABCXABC");
        assert_eq!(
            analysis.key_lengths,
            vec![KeyLengthHint { length: 2, count: 1 }, KeyLengthHint { length: 4, count: 1 }]
        );
        assert!(FrequencyAnalysis::analyze("HELLO WORLD").key_lengths.is_empty());
    }

    #[test]
    fn test_kasiski_finds_vigenere_key_length() {
        let cipher = Vigenere.encode(SAMPLE, &VigenereKey::new("LEMON").unwrap()).unwrap();
        let analysis = FrequencyAnalysis::analyze(&cipher);
        assert!(analysis.key_lengths.iter().take(2).any(|h| h.length == 5));
    }

    #[test]
    fn test_render_ascii() {
        let chart = FrequencyAnalysis::analyze("AAABBC").render_ascii();
        assert!(chart.starts_with("FREQUENCY ANALYSIS"));
        assert!(chart.contains(&format!("A: 50.00% |{}", "█".repeat(30))));
        assert!(chart.contains("Z:  0.00% |\n"));
    }
}
