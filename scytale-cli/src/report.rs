//! Plain-text reports for command results

use scytale_cipher::selftest::SelfTestReport;
use scytale_cipher::{Candidate, CipherType, CrackOutcome, FrequencyAnalysis};
use std::fmt::{self, Write};

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n  {}", title);
    let _ = writeln!(out, "  {}\n", "=".repeat(title.chars().count()));
}

fn percent(score: f64) -> String {
    format!("{:5.1}%", score * 100.0)
}

/// First `width` characters, with the remainder counted
fn clip(text: &str, width: usize) -> String {
    let total = text.chars().count();
    if total <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width).collect();
    format!("{}... ({} more)", head, total - width)
}

/// Brute force ranking, best first
pub fn brute_force<K: fmt::Display>(cipher: CipherType, ranked: &[Candidate<K>], english: bool) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("CRACK ({})", cipher.name().to_uppercase()));

    let best = match ranked.first() {
        Some(best) => best,
        None => {
            out.push_str("  No candidates.\n");
            return out;
        }
    };

    let _ = writeln!(out, "  The key used to encrypt this message was {}", best.key);
    let _ = writeln!(out, "  Plaintext: {}", best.plaintext);
    let _ = writeln!(
        out,
        "  Score:     {} ({})",
        percent(best.score).trim_start(),
        if english { "looks like English" } else { "does not look like English" }
    );

    if ranked.len() > 1 {
        out.push_str("\n  RUNNERS-UP:\n");
        for (rank, candidate) in ranked.iter().enumerate().skip(1) {
            let _ = writeln!(
                out,
                "  [{:2}] key {:<6} {}  {}",
                rank + 1,
                candidate.key.to_string(),
                percent(candidate.score),
                clip(&candidate.plaintext, 50)
            );
        }
    }
    out
}

/// Substitution outcome; at most `top` ambiguous candidates are listed
pub fn substitution(outcome: &CrackOutcome, top: usize) -> String {
    let mut out = String::new();
    heading(&mut out, "CRACK (SIMPLE SUBSTITUTION)");

    match outcome {
        CrackOutcome::Solved { mapping, plaintext } => {
            match mapping.to_key() {
                Some(key) => {
                    let _ = writeln!(out, "  The key used to encrypt this message was {}", key);
                }
                None => {
                    let _ = writeln!(out, "  Recovered letters: {}", mapping);
                }
            }
            let _ = writeln!(out, "  Plaintext: {}", plaintext);
        }
        CrackOutcome::Partial { mapping, plaintext, unresolved } => {
            let letters: Vec<String> = unresolved.iter().map(|c| c.to_string()).collect();
            let _ = writeln!(out, "  Partially solved ({} letters resolved)", mapping.resolved());
            let _ = writeln!(out, "  Recovered letters: {}", mapping);
            let _ = writeln!(out, "  Unresolved:        {}", letters.join(" "));
            let _ = writeln!(out, "  Plaintext: {}", plaintext);
        }
        CrackOutcome::Ambiguous { candidates } => {
            let _ = writeln!(
                out,
                "  {} mappings fit the dictionary; showing {}",
                candidates.len(),
                candidates.len().min(top.max(1))
            );
            for (rank, candidate) in candidates.iter().take(top.max(1)).enumerate() {
                let _ = writeln!(
                    out,
                    "\n  [{:2}] {} ({} words decoded)\n       {}",
                    rank + 1,
                    candidate.mapping,
                    candidate.words_decoded,
                    clip(&candidate.plaintext, 70)
                );
            }
        }
    }
    out
}

/// Summary without the bar chart
pub fn analysis(analysis: &FrequencyAnalysis) -> String {
    let mut out = String::new();
    heading(&mut out, "FREQUENCY ANALYSIS");

    let top: Vec<String> = analysis
        .top_letters(6)
        .into_iter()
        .map(|(c, n)| format!("{}:{}", c, n))
        .collect();
    let _ = writeln!(out, "  Letters:          {}", analysis.total);
    let _ = writeln!(out, "  Most frequent:    {}", top.join(" "));
    let _ = writeln!(out, "  Frequency order:  {}", analysis.frequency_order);
    let _ = writeln!(out, "  English match:    {}/12", analysis.english_match);
    let _ = writeln!(out, "  IoC:              {:.4}", analysis.index_of_coincidence);
    if !analysis.key_lengths.is_empty() {
        let hints: Vec<String> = analysis
            .key_lengths
            .iter()
            .take(5)
            .map(|h| format!("{} ({})", h.length, h.count))
            .collect();
        let _ = writeln!(out, "  Key length hints: {}", hints.join(", "));
    }
    out
}

pub fn selftest(report: &SelfTestReport) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("SELF-TEST (seed {})", report.seed));

    for cipher in &report.ciphers {
        let status = if cipher.ok() { "[OK]  " } else { "[FAIL]" };
        let _ = writeln!(
            out,
            "  {} {:<24} {}/{}",
            status,
            cipher.cipher.name(),
            cipher.passed,
            cipher.trials
        );
        if let Some(failure) = &cipher.first_failure {
            let _ = writeln!(out, "         first failure: {}", failure);
        }
    }

    out.push('\n');
    out.push_str(if report.ok() { "  All tests passed!\n" } else { "  Some tests failed.\n" });
    out
}
