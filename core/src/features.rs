use std::collections::HashSet;

use crate::vocabulary::Vocabulary;
use crate::{FeatureVector, Token};

/// Maps tokenized documents onto binary vectors indexed by one fixed vocabulary.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    vocabulary: Vocabulary,
}

impl FeatureExtractor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    /// Length of every vector this extractor produces.
    pub fn dimensions(&self) -> usize { self.vocabulary.len() }

    /// Position `i` is 1 when `vocabulary[i]` appears anywhere in `tokens`.
    pub fn extract(&self, tokens: &[Token]) -> FeatureVector {
        let present: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        self.vocabulary.iter().map(|term| u8::from(present.contains(term))).collect()
    }

    pub fn extract_all<D: AsRef<[Token]>>(&self, docs: &[D]) -> Vec<FeatureVector> {
        docs.iter().map(|doc| self.extract(doc.as_ref())).collect()
    }
}
