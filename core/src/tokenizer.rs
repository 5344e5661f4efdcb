use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

use crate::Token;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    // contractions arrive already split by the normalizer, so their fragments are listed instead
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "d","did","do","does","doing","down","during",
            "each",
            "few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "ll",
            "m","me","more","most","my","myself",
            "no","nor","not",
            "of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "re",
            "s","same","she","should","so","some","such",
            "t","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up",
            "ve","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub keep_stopwords: bool,
}

/// Split normalized text on whitespace, drop stopwords, and stem what is left.
pub fn tokenize_and_stem(text: &str) -> Vec<Token> {
    tokenize_and_stem_with(text, TokenizerOptions::default())
}

pub fn tokenize_and_stem_with(text: &str, options: TokenizerOptions) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        if !options.keep_stopwords && is_stopword(word) { continue; }
        let stem = STEMMER.stem(word);
        if stem.is_empty() { continue; }
        tokens.push(stem.into_owned());
    }
    tokens
}
