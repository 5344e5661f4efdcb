use spamfilter_core::normalizer::normalize;
use spamfilter_core::pipeline::tokenize_document;
use spamfilter_core::tokenizer::{tokenize_and_stem, TokenizerOptions};

#[test]
fn it_normalizes_and_stems() {
    let toks = tokenize_and_stem(&normalize("Running Runners RUN! Discounts, discounted & discounting."));
    // Stemming collapses the variants
    assert!(toks.contains(&"run".to_string()));
    assert!(toks.contains(&"discount".to_string()));
    assert!(!toks.iter().any(|t| t.contains(|c: char| !c.is_ascii_alphanumeric())));
}

#[test]
fn it_substitutes_before_tokenizing() {
    let toks = tokenize_document(
        "<p>URGENT!</p> Claim your £1000 prize at www.win-now.com or reply to claims@winnow.net. Only $2",
        TokenizerOptions::default(),
    );
    for expected in ["urgent", "claim", "number", "prize", "httpaddress", "repli", "emailaddress", "dollar"] {
        assert!(toks.contains(&expected.to_string()), "missing {expected} in {toks:?}");
    }
    assert!(!toks.contains(&"p".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let toks = tokenize_document("The quick brown fox and the lazy dog", TokenizerOptions::default());
    assert!(!toks.contains(&"the".to_string()));
    assert!(!toks.contains(&"and".to_string()));
    assert!(toks.contains(&"fox".to_string()));
}
