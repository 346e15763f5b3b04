//! Word-pattern attack on the simple substitution cipher
//!
//! Each ciphertext word is matched against the dictionary words sharing its
//! pattern, and every match implies a partial letter mapping. The candidate
//! mappings are first narrowed by per-letter domain propagation, then merged
//! word by word into a set of global mappings. After each merge, a global
//! mapping that no later word can extend is dropped. The size of the
//! surviving set decides the outcome:
//!
//! - one mapping covering every cipher letter: `Solved`
//! - one mapping with gaps: `Partial`, unresolved letters left verbatim
//! - several: `Ambiguous`, ranked by the number of words they decode
//! - none: `Error::NoConsistentMapping`

use crate::alphabet::{self, LEN};
use crate::pattern::{Pattern, PatternIndex};
use crate::{Error, Result, SubstitutionKey};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, info, warn};

const SIZE: usize = LEN as usize;
const ALL_LETTERS: u32 = (1 << SIZE) - 1;

/// Default bound on the global mapping set
pub const DEFAULT_SEARCH_LIMIT: usize = 20_000;

fn bit(letter: u8) -> u32 {
    1 << letter
}

/// Letter indices set in `mask`
fn letters_in(mask: u32) -> impl Iterator<Item = u8> {
    (0..LEN).filter(move |&c| mask & bit(c) != 0)
}

/// Partial injective function from cipher letters to plain letters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mapping {
    forward: [Option<u8>; SIZE],
    /// Plain letters already taken
    used: u32,
}

/// A pair rejected by [`Mapping::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub cipher: u8,
    pub plain: u8,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping implied by aligning two words letter by letter. `None` if the
    /// lengths differ or the alignment is not injective.
    pub fn from_words(cipher: &[u8], plain: &[u8]) -> Option<Self> {
        if cipher.len() != plain.len() {
            return None;
        }
        let mut mapping = Self::default();
        for (&c, &p) in cipher.iter().zip(plain) {
            mapping.insert(c, p).ok()?;
        }
        Some(mapping)
    }

    pub fn get(&self, cipher: u8) -> Option<u8> {
        self.forward.get(cipher as usize).copied().flatten()
    }

    /// Add `cipher -> plain`. A pair that contradicts an existing entry in
    /// either direction is rejected and the mapping is left unchanged.
    pub fn insert(&mut self, cipher: u8, plain: u8) -> std::result::Result<(), Conflict> {
        let conflict = Conflict { cipher, plain };
        if cipher >= LEN || plain >= LEN {
            return Err(conflict);
        }
        match self.forward[cipher as usize] {
            Some(existing) if existing == plain => Ok(()),
            Some(_) => Err(conflict),
            None if self.used & bit(plain) != 0 => Err(conflict),
            None => {
                self.forward[cipher as usize] = Some(plain);
                self.used |= bit(plain);
                Ok(())
            }
        }
    }

    /// (cipher, plain) pairs in cipher letter order
    pub fn pairs(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(c, p)| p.map(|p| (c as u8, p)))
    }

    /// True if every pair of `other` can be added without conflict
    pub fn is_compatible(&self, other: &Mapping) -> bool {
        other.pairs().all(|(c, p)| match self.forward[c as usize] {
            Some(existing) => existing == p,
            None => self.used & bit(p) == 0,
        })
    }

    pub fn merge(&self, other: &Mapping) -> Option<Mapping> {
        let mut merged = *self;
        for (c, p) in other.pairs() {
            merged.insert(c, p).ok()?;
        }
        Some(merged)
    }

    /// Number of resolved cipher letters
    pub fn resolved(&self) -> usize {
        self.used.count_ones() as usize
    }

    /// Decode `text`; unresolved letters are kept, or replaced by `marker`
    pub fn decode(&self, text: &str, marker: Option<char>) -> String {
        alphabet::map_letters_partial(text, |y| self.get(y), |c| marker.unwrap_or(c))
    }

    /// The full substitution key, if at most one letter pair is missing
    /// (the last pair is then forced).
    pub fn to_key(&self) -> Option<SubstitutionKey> {
        let mut forward = [0u8; SIZE];
        let mut missing = None;
        for c in 0..LEN {
            match self.get(c) {
                Some(p) => forward[p as usize] = c,
                None if missing.is_none() => missing = Some(c),
                None => return None,
            }
        }
        if let Some(c) = missing {
            let p = (!self.used & ALL_LETTERS).trailing_zeros() as usize;
            forward[p] = c;
        }
        SubstitutionKey::from_forward(forward).ok()
    }
}

/// Key form: the cipher letter for each plain letter A..Z, `_` where unknown
impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut key = ['_'; SIZE];
        for (c, p) in self.pairs() {
            key[p as usize] = alphabet::letter(c, true);
        }
        key.iter().try_for_each(|ch| write!(f, "{}", ch))
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A surviving mapping when more than one remains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMapping {
    pub mapping: Mapping,
    pub plaintext: String,
    /// Ciphertext words every letter of which is resolved
    pub words_decoded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrackOutcome {
    Solved {
        mapping: Mapping,
        plaintext: String,
    },
    Partial {
        mapping: Mapping,
        plaintext: String,
        /// Cipher letters present in the text but not resolved, upper case
        unresolved: Vec<char>,
    },
    Ambiguous {
        candidates: Vec<RankedMapping>,
    },
}

impl CrackOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, CrackOutcome::Solved { .. })
    }

    pub fn mapping(&self) -> Option<&Mapping> {
        match self {
            CrackOutcome::Solved { mapping, .. } | CrackOutcome::Partial { mapping, .. } => Some(mapping),
            CrackOutcome::Ambiguous { .. } => None,
        }
    }

    /// The decoded text; `AmbiguousMapping` when there is no single answer
    pub fn plaintext(&self) -> Result<&str> {
        match self {
            CrackOutcome::Solved { plaintext, .. } | CrackOutcome::Partial { plaintext, .. } => Ok(plaintext),
            CrackOutcome::Ambiguous { candidates } => Err(Error::AmbiguousMapping(candidates.len())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct MappingId(u32);

/// Owns every mapping created during one crack
#[derive(Default)]
struct MappingArena {
    mappings: Vec<Mapping>,
}

impl MappingArena {
    fn alloc(&mut self, mapping: Mapping) -> MappingId {
        let id = MappingId(self.mappings.len() as u32);
        self.mappings.push(mapping);
        id
    }

    fn get(&self, id: MappingId) -> &Mapping {
        &self.mappings[id.0 as usize]
    }

    fn len(&self) -> usize {
        self.mappings.len()
    }
}

/// A distinct ciphertext word and the mappings its dictionary matches imply
struct WordConstraint {
    word: String,
    letters: u32,
    candidates: Vec<MappingId>,
}

pub struct SubstitutionCracker<'i> {
    index: &'i PatternIndex,
    search_limit: usize,
    marker: Option<char>,
}

impl<'i> SubstitutionCracker<'i> {
    /// Fails with `EmptyDictionary` when the index has no words
    pub fn new(index: &'i PatternIndex) -> Result<Self> {
        if index.is_empty() {
            return Err(Error::EmptyDictionary);
        }
        Ok(Self {
            index,
            search_limit: DEFAULT_SEARCH_LIMIT,
            marker: None,
        })
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    /// Render unresolved letters as `marker` instead of verbatim
    pub fn with_marker(mut self, marker: Option<char>) -> Self {
        self.marker = marker;
        self
    }

    pub fn crack(&self, ciphertext: &str) -> Result<CrackOutcome> {
        let mut arena = MappingArena::default();
        let mut words = self.constraints(&mut arena, ciphertext);
        let domains = propagate(&arena, &mut words)?;

        words.sort_by(|a, b| {
            a.candidates
                .len()
                .cmp(&b.candidates.len())
                .then_with(|| a.word.cmp(&b.word))
        });

        let survivors = match self.search(&mut arena, &words)? {
            Some(survivors) => survivors,
            None => {
                warn!(
                    "Substitution search passed {} mappings; keeping only forced letters",
                    self.search_limit
                );
                let constrained = words.iter().fold(0, |acc, w| acc | w.letters);
                vec![forced(&domains, constrained)?]
            }
        };
        debug!("Arena held {} mappings", arena.len());

        self.conclude(ciphertext, survivors)
    }

    fn constraints(&self, arena: &mut MappingArena, ciphertext: &str) -> Vec<WordConstraint> {
        let distinct: BTreeSet<String> = alphabet::words(ciphertext)
            .map(|w| alphabet::letters_of(w).to_ascii_lowercase())
            .collect();

        let mut constraints = Vec::new();
        for word in distinct {
            let letters = alphabet::indices(&word);
            let group = match self.index.candidates(&Pattern::of(&word)) {
                Some(group) => group,
                None => {
                    debug!("No dictionary word shares the pattern of '{}'", word);
                    continue;
                }
            };

            let mappings: BTreeSet<Mapping> = group
                .iter()
                .filter_map(|plain| Mapping::from_words(&letters, &alphabet::indices(plain)))
                .collect();
            if mappings.is_empty() {
                debug!("No usable candidate for '{}'", word);
                continue;
            }

            debug!("'{}': {} candidate(s)", word, mappings.len());
            constraints.push(WordConstraint {
                letters: letters.iter().fold(0, |acc, &c| acc | bit(c)),
                candidates: mappings.into_iter().map(|m| arena.alloc(m)).collect(),
                word,
            });
        }
        constraints
    }

    /// Merge words in order into the global set. `None` once the set passes
    /// the search limit.
    fn search(&self, arena: &mut MappingArena, words: &[WordConstraint]) -> Result<Option<Vec<Mapping>>> {
        let mut global = vec![arena.alloc(Mapping::default())];

        for (i, word) in words.iter().enumerate() {
            let mut seen = HashSet::new();
            let mut next = Vec::new();
            for &g in &global {
                let base = *arena.get(g);
                for &m in &word.candidates {
                    let merged = base.merge(arena.get(m));
                    if let Some(merged) = merged {
                        if seen.insert(merged) {
                            next.push(arena.alloc(merged));
                        }
                    }
                }
                if next.len() > self.search_limit {
                    return Ok(None);
                }
            }

            let remaining = &words[i + 1..];
            next.retain(|&g| {
                let mapping = arena.get(g);
                remaining.iter().all(|other| {
                    other
                        .candidates
                        .iter()
                        .any(|&m| mapping.is_compatible(arena.get(m)))
                })
            });

            if next.is_empty() {
                debug!("No mapping survives '{}'", word.word);
                return Err(Error::NoConsistentMapping);
            }
            debug!("After '{}': {} global mapping(s)", word.word, next.len());
            global = next;
        }

        Ok(Some(global.into_iter().map(|id| *arena.get(id)).collect()))
    }

    fn conclude(&self, ciphertext: &str, mut survivors: Vec<Mapping>) -> Result<CrackOutcome> {
        match survivors.len() {
            0 => Err(Error::NoConsistentMapping),
            1 => {
                let mapping = survivors[0];
                let present = ciphertext
                    .chars()
                    .filter_map(alphabet::index_of)
                    .fold(0, |acc, c| acc | bit(c));
                let unresolved: Vec<char> = letters_in(present)
                    .filter(|&c| mapping.get(c).is_none())
                    .map(|c| alphabet::letter(c, true))
                    .collect();
                let plaintext = mapping.decode(ciphertext, self.marker);

                if unresolved.is_empty() {
                    info!("Substitution solved with {} letters", mapping.resolved());
                    Ok(CrackOutcome::Solved { mapping, plaintext })
                } else {
                    info!("Substitution partially solved; {} letter(s) unresolved", unresolved.len());
                    Ok(CrackOutcome::Partial {
                        mapping,
                        plaintext,
                        unresolved,
                    })
                }
            }
            n => {
                survivors.sort();
                let tokens: Vec<Vec<u8>> = alphabet::words(ciphertext).map(alphabet::indices).collect();

                let mut candidates: Vec<RankedMapping> = survivors
                    .into_iter()
                    .map(|mapping| RankedMapping {
                        words_decoded: tokens
                            .iter()
                            .filter(|t| t.iter().all(|&c| mapping.get(c).is_some()))
                            .count(),
                        plaintext: mapping.decode(ciphertext, self.marker),
                        mapping,
                    })
                    .collect();
                candidates.sort_by(|a, b| b.words_decoded.cmp(&a.words_decoded));

                info!("{} substitution mappings remain", n);
                Ok(CrackOutcome::Ambiguous { candidates })
            }
        }
    }
}

/// Intersect per-letter plain domains across words, eliminate solved letters
/// from every other domain, and drop candidates that fall outside. Repeats
/// until no candidate is removed.
fn propagate(arena: &MappingArena, words: &mut [WordConstraint]) -> Result<[u32; SIZE]> {
    let constrained = words.iter().fold(0, |acc, w| acc | w.letters);

    loop {
        let mut domains = [ALL_LETTERS; SIZE];
        for word in words.iter() {
            let mut allowed = [0u32; SIZE];
            for &id in &word.candidates {
                for (c, p) in arena.get(id).pairs() {
                    allowed[c as usize] |= bit(p);
                }
            }
            for c in letters_in(word.letters) {
                domains[c as usize] &= allowed[c as usize];
            }
        }
        eliminate_solved(&mut domains);

        if letters_in(constrained).any(|c| domains[c as usize] == 0) {
            return Err(Error::NoConsistentMapping);
        }

        let mut pruned = false;
        for word in words.iter_mut() {
            let before = word.candidates.len();
            word.candidates.retain(|&id| {
                arena
                    .get(id)
                    .pairs()
                    .all(|(c, p)| domains[c as usize] & bit(p) != 0)
            });
            if word.candidates.is_empty() {
                debug!("Every candidate for '{}' was eliminated", word.word);
                return Err(Error::NoConsistentMapping);
            }
            pruned |= word.candidates.len() != before;
        }

        if !pruned {
            return Ok(domains);
        }
    }
}

fn eliminate_solved(domains: &mut [u32; SIZE]) {
    let mut changed = true;
    while changed {
        changed = false;
        for c in 0..SIZE {
            if domains[c].count_ones() != 1 {
                continue;
            }
            let solved = domains[c];
            for (d, domain) in domains.iter_mut().enumerate() {
                if d != c && *domain & solved != 0 {
                    *domain &= !solved;
                    changed = true;
                }
            }
        }
    }
}

/// Letters whose domain is a single plain letter. Two letters forced onto
/// the same plain letter leave no consistent mapping.
fn forced(domains: &[u32; SIZE], constrained: u32) -> Result<Mapping> {
    let mut mapping = Mapping::default();
    for c in letters_in(constrained) {
        let domain = domains[c as usize];
        if domain.count_ones() == 1 {
            mapping
                .insert(c, domain.trailing_zeros() as u8)
                .map_err(|conflict| {
                    debug!("Forced letters collide: {:?}", conflict);
                    Error::NoConsistentMapping
                })?;
        }
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphers::{Codec, Substitution};
    use crate::Dictionary;

    const KEY: &str = "LFWOAYUISVKMNXPBDCRJTQEGHZ";

    fn index(words: &[&str]) -> PatternIndex {
        PatternIndex::build(&Dictionary::from_words(words.iter().copied()))
    }

    fn encrypt(plain: &str) -> String {
        Substitution.encode(plain, &KEY.parse().unwrap()).unwrap()
    }

    fn idx(c: char) -> u8 {
        alphabet::index_of(c).unwrap()
    }

    #[test]
    fn test_mapping_rejects_conflicts() {
        let mut mapping = Mapping::new();
        assert!(mapping.insert(0, 1).is_ok());
        assert!(mapping.insert(0, 1).is_ok());
        assert_eq!(mapping.insert(0, 2), Err(Conflict { cipher: 0, plain: 2 }));
        assert_eq!(mapping.insert(3, 1), Err(Conflict { cipher: 3, plain: 1 }));
        assert_eq!(mapping.get(0), Some(1));
        assert_eq!(mapping.get(3), None);
        assert_eq!(mapping.resolved(), 1);
    }

    #[test]
    fn test_from_words_requires_injective_alignment() {
        assert!(Mapping::from_words(&alphabet::indices("abca"), &alphabet::indices("that")).is_some());
        assert!(Mapping::from_words(&alphabet::indices("abcd"), &alphabet::indices("that")).is_none());
        assert!(Mapping::from_words(&alphabet::indices("ab"), &alphabet::indices("abc")).is_none());
    }

    #[test]
    fn test_merge_and_compatibility() {
        let a = Mapping::from_words(&alphabet::indices("xy"), &alphabet::indices("at")).unwrap();
        let b = Mapping::from_words(&alphabet::indices("yz"), &alphabet::indices("to")).unwrap();
        let c = Mapping::from_words(&alphabet::indices("z"), &alphabet::indices("a")).unwrap();

        assert!(a.is_compatible(&b));
        assert_eq!(a.merge(&b).unwrap().resolved(), 3);
        assert!(!a.is_compatible(&c));
        assert!(a.merge(&c).is_none());
    }

    #[test]
    fn test_display_key_form() {
        let mapping = Mapping::from_words(&[idx('j')], &[idx('t')]).unwrap();
        let shown = mapping.to_string();
        assert_eq!(shown.len(), 26);
        assert_eq!(shown.chars().nth(19), Some('J'));
        assert_eq!(shown.chars().filter(|&c| c == '_').count(), 25);
    }

    #[test]
    fn test_to_key_infers_last_pair() {
        let key: SubstitutionKey = KEY.parse().unwrap();
        let mut mapping = Mapping::new();
        for plain in 0..LEN - 1 {
            mapping.insert(key.encrypt_letter(plain), plain).unwrap();
        }
        assert_eq!(mapping.resolved(), 25);
        assert_eq!(mapping.to_key(), Some(key));

        let sparse = Mapping::from_words(&[0, 1], &[2, 3]).unwrap();
        assert_eq!(sparse.to_key(), None);
    }

    #[test]
    fn test_solves_two_words() {
        let index = index(&["the", "cat"]);
        let cracker = SubstitutionCracker::new(&index).unwrap();
        let cipher = encrypt("The cat");
        assert_eq!(cipher, "Jia wlj");

        let outcome = cracker.crack(&cipher).unwrap();
        assert!(outcome.is_solved());
        assert_eq!(outcome.plaintext().unwrap(), "The cat");
        assert_eq!(outcome.mapping().unwrap().get(idx('j')), Some(idx('t')));
    }

    #[test]
    fn test_solves_with_repeated_letters_and_case() {
        let index = index(&["meet", "me", "at", "midnight", "dawn"]);
        let cracker = SubstitutionCracker::new(&index).unwrap();
        let plain = "Meet me at midnight";

        let outcome = cracker.crack(&encrypt(plain)).unwrap();
        assert!(outcome.is_solved());
        assert_eq!(outcome.plaintext().unwrap(), plain);
    }

    #[test]
    fn test_recovers_full_key_from_pangram() {
        let index = index(&[
            "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "good", "quiz",
        ]);
        let cracker = SubstitutionCracker::new(&index).unwrap();
        let plain = "The quick brown fox jumps over the lazy dog. Good quiz.";

        match cracker.crack(&encrypt(plain)).unwrap() {
            CrackOutcome::Solved { mapping, plaintext } => {
                assert_eq!(plaintext, plain);
                assert_eq!(mapping.to_key().unwrap().to_string(), KEY);
                assert_eq!(mapping.to_string(), KEY);
            }
            other => panic!("expected a solved outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_decode_leaves_unknown_letters() {
        let index = index(&["the", "cat"]);
        let cipher = encrypt("the cat sleeps");
        assert_eq!(cipher, "jia wlj rmaabr");

        let verbatim = SubstitutionCracker::new(&index).unwrap().crack(&cipher).unwrap();
        match &verbatim {
            CrackOutcome::Partial { plaintext, unresolved, .. } => {
                assert_eq!(plaintext, "the cat rmeebr");
                assert_eq!(unresolved, &vec!['B', 'M', 'R']);
            }
            other => panic!("expected a partial outcome, got {:?}", other),
        }

        let marked = SubstitutionCracker::new(&index)
            .unwrap()
            .with_marker(Some('_'))
            .crack(&cipher)
            .unwrap();
        assert_eq!(marked.plaintext().unwrap(), "the cat __ee__");
    }

    #[test]
    fn test_absent_words_never_fully_decode() {
        let index = index(&["zebra"]);
        let cracker = SubstitutionCracker::new(&index).unwrap();
        let outcome = cracker.crack("Jia wlj").unwrap();

        assert!(!outcome.is_solved());
        assert_eq!(outcome.plaintext().unwrap(), "Jia wlj");
        assert_eq!(outcome.mapping().unwrap().resolved(), 0);
    }

    #[test]
    fn test_contradicting_words() {
        // "xyz" can only be "cat" and "zqrz" only "that": y and r both need 'a'
        let index = index(&["cat", "that"]);
        let cracker = SubstitutionCracker::new(&index).unwrap();
        assert!(matches!(cracker.crack("xyz zqrz"), Err(Error::NoConsistentMapping)));
    }

    #[test]
    fn test_ambiguous_candidates_are_reported() {
        let index = index(&["cat", "dog"]);
        let cracker = SubstitutionCracker::new(&index).unwrap();
        let outcome = cracker.crack("wlj").unwrap();

        match &outcome {
            CrackOutcome::Ambiguous { candidates } => {
                let mut plains: Vec<&str> = candidates.iter().map(|c| c.plaintext.as_str()).collect();
                plains.sort();
                assert_eq!(plains, vec!["cat", "dog"]);
                assert!(candidates.iter().all(|c| c.words_decoded == 1));
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
        assert!(matches!(outcome.plaintext(), Err(Error::AmbiguousMapping(2))));
    }

    #[test]
    fn test_pangram_without_disambiguation_is_ambiguous() {
        let index = index(&["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"]);
        let cracker = SubstitutionCracker::new(&index).unwrap();
        let plain = "The quick brown fox jumps over the lazy dog.";

        match cracker.crack(&encrypt(plain)).unwrap() {
            CrackOutcome::Ambiguous { candidates } => {
                assert_eq!(candidates.len(), 4);
                assert!(candidates.iter().any(|c| c.plaintext == plain));
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_search_limit_falls_back_to_forced_letters() {
        let index = index(&["cat", "dog"]);
        let cracker = SubstitutionCracker::new(&index).unwrap().with_search_limit(1);

        match cracker.crack("wlj").unwrap() {
            CrackOutcome::Partial { plaintext, unresolved, .. } => {
                assert_eq!(plaintext, "wlj");
                assert_eq!(unresolved, vec!['J', 'L', 'W']);
            }
            other => panic!("expected a partial outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_text_without_letters() {
        let index = index(&["cat"]);
        let outcome = SubstitutionCracker::new(&index).unwrap().crack("123 -- !!").unwrap();
        assert!(outcome.is_solved());
        assert_eq!(outcome.plaintext().unwrap(), "123 -- !!");
    }

    #[test]
    fn test_contractions_constrain_their_letters() {
        let index = index(&["dont", "go"]);
        let cipher = encrypt("Don't go");
        assert_eq!(cipher, "Opx'j up");

        let outcome = SubstitutionCracker::new(&index).unwrap().crack(&cipher).unwrap();
        assert!(outcome.is_solved());
        assert_eq!(outcome.plaintext().unwrap(), "Don't go");
    }

    #[test]
    fn test_forced_letters() {
        let mut domains = [ALL_LETTERS; SIZE];
        domains[0] = bit(5);
        domains[2] = bit(7);
        let mapping = forced(&domains, bit(0) | bit(2) | bit(3)).unwrap();
        assert_eq!(mapping.get(0), Some(5));
        assert_eq!(mapping.get(2), Some(7));
        assert_eq!(mapping.get(3), None);

        domains[3] = bit(5);
        assert!(matches!(
            forced(&domains, bit(0) | bit(3)),
            Err(Error::NoConsistentMapping)
        ));
    }

    #[test]
    fn test_builtin_dictionary_cracks_everyday_sentence() {
        let index = PatternIndex::build(&Dictionary::builtin());
        let cracker = SubstitutionCracker::new(&index).unwrap();
        let plain = "We should attack the enemy at dawn before they know what we are doing here";

        let outcome = cracker.crack(&encrypt(plain)).unwrap();
        assert!(outcome.is_solved(), "{:?}", outcome);
        assert_eq!(outcome.plaintext().unwrap(), plain);
    }

    #[test]
    fn test_empty_index_rejected() {
        let empty = PatternIndex::default();
        assert!(matches!(SubstitutionCracker::new(&empty), Err(Error::EmptyDictionary)));
    }
}
