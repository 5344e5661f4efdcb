//! Frequency-thresholded vocabulary.
//!
//! Counting and selection are separate steps: [`count_tokens`] is a pure scan
//! that returns counts in first-seen order, and [`Vocabulary::from_counts`]
//! keeps the tokens whose count is strictly above the threshold. The order of
//! the resulting vocabulary is the feature index order and never changes.

use std::collections::{HashMap, HashSet};

use crate::{TermId, Token};

pub const DEFAULT_THRESHOLD: usize = 5;

/// What a token's count measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountMode {
    /// Every occurrence counts, including repeats within one document.
    #[default]
    Occurrences,
    /// A document contributes at most one to each token it contains.
    Documents,
}

/// Token counts in the order tokens were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts {
    entries: Vec<(Token, usize)>,
    positions: HashMap<Token, usize>,
}

impl TokenCounts {
    pub fn get(&self, token: &str) -> Option<usize> {
        self.positions.get(token).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(token, count)| (token.as_str(), *count))
    }

    fn bump(&mut self, token: &str) {
        match self.positions.get(token) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }
}

pub fn count_tokens<D: AsRef<[Token]>>(docs: &[D], mode: CountMode) -> TokenCounts {
    let mut counts = TokenCounts::default();
    for doc in docs {
        let tokens = doc.as_ref();
        match mode {
            CountMode::Occurrences => {
                for token in tokens {
                    counts.bump(token);
                }
            }
            CountMode::Documents => {
                let mut seen_in_doc: HashSet<&str> = HashSet::new();
                for token in tokens {
                    if seen_in_doc.insert(token.as_str()) {
                        counts.bump(token);
                    }
                }
            }
        }
    }
    counts
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<Token>,
    dictionary: HashMap<Token, TermId>,
}

impl Vocabulary {
    /// Occurrence-counted vocabulary of tokens seen more than `threshold` times.
    pub fn build<D: AsRef<[Token]>>(docs: &[D], threshold: usize) -> Self {
        Self::from_counts(&count_tokens(docs, CountMode::Occurrences), threshold)
    }

    pub fn from_counts(counts: &TokenCounts, threshold: usize) -> Self {
        let mut vocabulary = Self::default();
        for (token, count) in counts.iter() {
            if count > threshold {
                let id = vocabulary.terms.len() as TermId;
                vocabulary.dictionary.insert(token.to_string(), id);
                vocabulary.terms.push(token.to_string());
            }
        }
        vocabulary
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn terms(&self) -> &[Token] { &self.terms }

    pub fn index_of(&self, token: &str) -> Option<TermId> { self.dictionary.get(token).copied() }

    pub fn contains(&self, token: &str) -> bool { self.dictionary.contains_key(token) }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.terms.iter().map(String::as_str) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&[&str]]) -> Vec<Vec<Token>> {
        raw.iter().map(|d| d.iter().map(|t| t.to_string()).collect()).collect()
    }

    #[test]
    fn threshold_is_strict() {
        let corpus = docs(&[&["a", "a", "b"], &["a", "c"]]);
        assert_eq!(Vocabulary::build(&corpus, 1).terms(), ["a"]);
        assert_eq!(Vocabulary::build(&corpus, 0).terms(), ["a", "b", "c"]);
        assert!(Vocabulary::build(&corpus, 3).is_empty());
        assert_eq!(Vocabulary::build(&corpus, 2).terms(), ["a"]);
    }

    #[test]
    fn occurrences_count_repeats() {
        let corpus = docs(&[&["a", "a", "b"], &["a", "c"]]);
        let counts = count_tokens(&corpus, CountMode::Occurrences);
        assert_eq!(counts.get("a"), Some(3));
        assert_eq!(counts.get("b"), Some(1));
        assert_eq!(counts.get("z"), None);
    }

    #[test]
    fn documents_count_presence() {
        let corpus = docs(&[&["a", "a", "b"], &["a", "c"]]);
        let counts = count_tokens(&corpus, CountMode::Documents);
        assert_eq!(counts.get("a"), Some(2));
        assert_eq!(Vocabulary::from_counts(&counts, 1).terms(), ["a"]);
        assert!(Vocabulary::from_counts(&counts, 2).is_empty());
    }

    #[test]
    fn order_is_first_seen() {
        let corpus = docs(&[&["zeta", "alpha"], &["mid", "alpha", "zeta", "mid"]]);
        let counts = count_tokens(&corpus, CountMode::Occurrences);
        let order: Vec<&str> = counts.iter().map(|(t, _)| t).collect();
        assert_eq!(order, ["zeta", "alpha", "mid"]);
        let vocab = Vocabulary::from_counts(&counts, 1);
        assert_eq!(vocab.terms(), ["zeta", "alpha", "mid"]);
        assert_eq!(vocab.index_of("alpha"), Some(1));
        assert!(vocab.contains("mid"));
        assert!(!vocab.contains("omega"));
    }

    #[test]
    fn empty_corpus() {
        let corpus: Vec<Vec<Token>> = Vec::new();
        assert!(count_tokens(&corpus, CountMode::Occurrences).is_empty());
        assert!(Vocabulary::build(&corpus, 0).is_empty());
    }
}
