pub mod classifier;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod features;
pub mod normalizer;
pub mod pipeline;
pub mod tokenizer;
pub mod vocabulary;

pub use error::{Error, Result};

use std::fmt;

pub type Token = String;
pub type TermId = u32;
/// Binary bag-of-words vector; index `i` is 1 when vocabulary term `i` occurs in the document.
pub type FeatureVector = Vec<u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Parse the corpus spelling. Anything other than `spam` or `ham` is not a label.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "spam" => Some(Label::Spam),
            "ham" => Some(Label::Ham),
            _ => None,
        }
    }

    /// Numeric encoding used by the linear classifier: spam = +1, ham = -1.
    pub fn sign(self) -> f64 {
        match self {
            Label::Spam => 1.0,
            Label::Ham => -1.0,
        }
    }

    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 { Label::Spam } else { Label::Ham }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Spam => "spam",
            Label::Ham => "ham",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub label: Label,
    pub text: String,
}

impl Document {
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Self { label, text: text.into() }
    }
}
