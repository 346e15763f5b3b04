use super::Codec;
use crate::{CipherType, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Column route through a word grid, one signed entry per column.
///
/// Entry `k` names column `|k|` (1-based); a negative entry reads that column
/// upwards, a positive one downwards. Every column appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(Vec<i32>);

impl RouteKey {
    pub fn new(route: Vec<i32>) -> Result<Self> {
        let columns = route.len();
        if columns == 0 {
            return Err(Error::InvalidKey("Route key needs at least one column".into()));
        }
        if route.contains(&0) {
            return Err(Error::InvalidKey("Route key entries cannot be 0".into()));
        }

        let mut seen = vec![false; columns];
        for &k in &route {
            let column = k.unsigned_abs() as usize;
            if column > columns {
                return Err(Error::InvalidKey(format!(
                    "Route key entry {} is outside a grid of {} columns",
                    k, columns
                )));
            }
            if std::mem::replace(&mut seen[column - 1], true) {
                return Err(Error::InvalidKey(format!("Route key names column {} twice", column)));
            }
        }
        Ok(Self(route))
    }

    pub fn columns(&self) -> usize {
        self.0.len()
    }

    pub fn route(&self) -> &[i32] {
        &self.0
    }

    /// Rows of the grid holding `words` words
    pub fn rows(&self, words: usize) -> Result<usize> {
        let columns = self.columns();
        if words == 0 || words % columns != 0 {
            return Err(Error::InvalidKey(format!(
                "{} words do not fill a grid of {} columns",
                words, columns
            )));
        }
        Ok(words / columns)
    }

    /// Grid positions (row-major) in ciphertext order
    fn read_order(&self, rows: usize) -> impl Iterator<Item = usize> + '_ {
        let columns = self.columns();
        self.0.iter().flat_map(move |&k| {
            let column = k.unsigned_abs() as usize - 1;
            (0..rows).map(move |i| {
                let row = if k > 0 { i } else { rows - 1 - i };
                row * columns + column
            })
        })
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self.0.iter().map(|k| k.to_string()).collect();
        f.write_str(&entries.join(" "))
    }
}

impl FromStr for RouteKey {
    type Err = Error;

    /// Entries separated by spaces or commas: "-1 2 -3 4"
    fn from_str(s: &str) -> Result<Self> {
        let route = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .parse::<i32>()
                    .map_err(|_| Error::InvalidKey(format!("Route key entry '{}' is not a number", entry)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(route)
    }
}

/// Route cipher over words.
///
/// The plaintext words fill a grid row by row, `key.columns()` wide; the
/// ciphertext walks the columns in key order and direction. Words are
/// rejoined with single spaces, so other whitespace is not kept.
pub struct Route;

impl Codec for Route {
    type Key = RouteKey;

    const CIPHER: CipherType = CipherType::Route;

    fn encode(&self, text: &str, key: &RouteKey) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let rows = key.rows(words.len())?;

        let cipher: Vec<&str> = key.read_order(rows).map(|i| words[i]).collect();
        Ok(cipher.join(" "))
    }

    fn decode(&self, text: &str, key: &RouteKey) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let rows = key.rows(words.len())?;

        let mut plain = vec![""; words.len()];
        for (&word, position) in words.iter().zip(key.read_order(rows)) {
            plain[position] = word;
        }
        Ok(plain.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERED: &str = "16 12 8 4 0 1 5 9 13 17 18 14 10 6 2 3 7 11 15 19";

    fn counting(n: usize) -> String {
        (0..n).map(|i| i.to_string()).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_decode_numbered_grid() {
        let key: RouteKey = "-1 2 -3 4".parse().unwrap();
        assert_eq!(key.rows(20).unwrap(), 5);
        assert_eq!(Route.decode(NUMBERED, &key).unwrap(), counting(20));
        assert_eq!(Route.encode(&counting(20), &key).unwrap(), NUMBERED);
    }

    #[test]
    fn test_column_order_and_direction() {
        let key = RouteKey::new(vec![2, -1]).unwrap();
        let encoded = Route.encode("the cat sat on a mat", &key).unwrap();
        assert_eq!(encoded, "cat on mat a sat the");
        assert_eq!(Route.decode(&encoded, &key).unwrap(), "the cat sat on a mat");
    }

    #[test]
    fn test_whitespace_is_normalised() {
        let key: RouteKey = "1,2".parse().unwrap();
        assert_eq!(Route.encode("  one\ttwo\n three four ", &key).unwrap(), "one three two four");
    }

    #[test]
    fn test_invalid_keys() {
        assert!(matches!(RouteKey::new(vec![]), Err(Error::InvalidKey(_))));
        assert!(matches!(RouteKey::new(vec![1, 0]), Err(Error::InvalidKey(_))));
        assert!(matches!(RouteKey::new(vec![1, -3]), Err(Error::InvalidKey(_))));
        assert!(matches!(RouteKey::new(vec![-2, 2]), Err(Error::InvalidKey(_))));
        assert!("1 two".parse::<RouteKey>().is_err());
        assert_eq!("-1 2 -3 4".parse::<RouteKey>().unwrap().to_string(), "-1 2 -3 4");
    }

    #[test]
    fn test_grid_must_match_word_count() {
        let key: RouteKey = "-1 2 -3 4".parse().unwrap();
        assert!(matches!(Route.decode("0 1 2 3 4 5", &key), Err(Error::InvalidKey(_))));
        assert!(matches!(Route.encode("", &key), Err(Error::InvalidKey(_))));
    }
}
