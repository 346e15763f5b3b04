//! Alphabet / text model
//!
//! Every cipher works on the 26 Latin letters by index (0..26), compares
//! letters case-insensitively and re-applies the original letter's case on
//! output. Anything that is not an ASCII letter passes through untouched.

/// The ordered symbol set
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols in the alphabet
pub const LEN: u8 = 26;

/// Index of an ASCII letter, ignoring case
pub fn index_of(c: char) -> Option<u8> {
    if c.is_ascii_alphabetic() {
        Some(c.to_ascii_uppercase() as u8 - b'A')
    } else {
        None
    }
}

/// Letter at `idx`, upper or lower case
pub fn letter(idx: u8, upper: bool) -> char {
    let base = if upper { b'A' } else { b'a' };
    (base + idx % LEN) as char
}

/// Rewrite every letter through `f` (index in, index out), keeping case and
/// leaving non-letters in place.
pub fn map_letters(text: &str, mut f: impl FnMut(u8) -> u8) -> String {
    text.chars()
        .map(|c| match index_of(c) {
            Some(idx) => letter(f(idx), c.is_ascii_uppercase()),
            None => c,
        })
        .collect()
}

/// Like [`map_letters`], but `f` may decline a letter, which is then replaced
/// by `fallback(original)`.
pub fn map_letters_partial(
    text: &str,
    mut f: impl FnMut(u8) -> Option<u8>,
    mut fallback: impl FnMut(char) -> char,
) -> String {
    text.chars()
        .map(|c| match index_of(c) {
            Some(idx) => match f(idx) {
                Some(mapped) => letter(mapped, c.is_ascii_uppercase()),
                None => fallback(c),
            },
            None => c,
        })
        .collect()
}

/// Whitespace-separated words with surrounding punctuation stripped.
///
/// Tokens with no letters at all (numbers, dashes) are dropped. Inner
/// punctuation is kept, so "don't" stays one token.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_ascii_alphabetic()))
        .filter(|token| !token.is_empty())
}

/// True if every character is an ASCII letter
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}

/// The ASCII letters of a token, so "don't" reads as "dont"
pub fn letters_of(token: &str) -> String {
    token.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Letter indices of an all-letter word
pub fn indices(word: &str) -> Vec<u8> {
    word.chars().filter_map(index_of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_letter() {
        assert_eq!(index_of('a'), Some(0));
        assert_eq!(index_of('Z'), Some(25));
        assert_eq!(index_of('é'), None);
        assert_eq!(index_of('7'), None);
        assert_eq!(letter(7, true), 'H');
        assert_eq!(letter(7, false), 'h');
    }

    #[test]
    fn test_map_letters_preserves_case_and_symbols() {
        let shifted = map_letters("Hello, World! 42", |i| (i + 1) % LEN);
        assert_eq!(shifted, "Ifmmp, Xpsme! 42");
    }

    #[test]
    fn test_partial_fallback() {
        let out = map_letters_partial("Abc", |i| if i == 0 { Some(25) } else { None }, |_| '_');
        assert_eq!(out, "Z__");
    }

    #[test]
    fn test_words_strip_punctuation() {
        let tokens: Vec<_> = words("\"Hello,\" she said -- don't 123 go!").collect();
        assert_eq!(tokens, vec!["Hello", "she", "said", "don't", "go"]);
        assert!(is_word("Hello"));
        assert!(!is_word("don't"));
        assert_eq!(letters_of("don't"), "dont");
        assert_eq!(letters_of("o'clock"), "oclock");
    }
}
