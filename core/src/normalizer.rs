//! Ordered text rewrite passes applied to every message before tokenization.
//!
//! Each pass is a pure `&str -> String` function. [`RULES`] lists them in the
//! order [`normalize`] applies them; that order is part of the contract, e.g.
//! digit runs must be replaced before punctuation removal would split them
//! away from their context, and `$` must still be present when the currency
//! pass runs.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

pub const URL_TOKEN: &str = "httpaddress";
pub const EMAIL_TOKEN: &str = "emailaddress";
pub const NUMBER_TOKEN: &str = "number";
pub const DOLLAR_TOKEN: &str = "dollar";

lazy_static! {
    static ref SCRIPT_STYLE_RE: Regex =
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").expect("valid regex");
    static ref COMMENT_RE: Regex = Regex::new(r"(?s)<!--.*?-->").expect("valid regex");
    static ref TAG_RE: Regex = Regex::new(r"(?i)</?[a-z][a-z0-9]*\b[^<>]*>").expect("valid regex");
    static ref URL_RE: Regex = Regex::new(concat!(
        r"(?i)(?:(?:https?|ftp)://|www\.)[^\s<>]+",
        r"|[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*",
        r"\.(?:com|net|org|edu|gov|info|biz|mobi|co|uk|us|io|me|tv)\b(?:[/?#][^\s<>]*)?",
    ))
    .expect("valid regex");
    static ref EMAIL_RE: Regex = Regex::new(r"(?im)\S+[a-z0-9]@[a-z0-9.]+").expect("valid regex");
    static ref DIGITS_RE: Regex = Regex::new(r"[0-9]+").expect("valid regex");
}

/// A named, independent rewrite pass.
#[derive(Clone, Copy)]
pub struct RewriteRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteRule").field("name", &self.name).finish()
    }
}

pub const RULES: [RewriteRule; 7] = [
    RewriteRule { name: "case_fold", apply: case_fold },
    RewriteRule { name: "strip_markup", apply: strip_markup },
    RewriteRule { name: "substitute_urls", apply: substitute_urls },
    RewriteRule { name: "substitute_emails", apply: substitute_emails },
    RewriteRule { name: "substitute_numbers", apply: substitute_numbers },
    RewriteRule { name: "substitute_dollars", apply: substitute_dollars },
    RewriteRule { name: "strip_non_alphanumeric", apply: strip_non_alphanumeric },
];

/// Run every rule of [`RULES`] in order.
pub fn normalize(text: &str) -> String {
    RULES.iter().fold(text.to_string(), |acc, rule| (rule.apply)(&acc))
}

/// NFKC compatibility folding followed by lowercasing.
pub fn case_fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Remove tags and comments but keep the text between them. Script and style
/// bodies are dropped. Character entities are left as text, so `&lt;` reaches
/// the later passes as the word `lt`.
pub fn strip_markup(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }
    let without_blocks = SCRIPT_STYLE_RE.replace_all(text, "");
    let without_comments = COMMENT_RE.replace_all(&without_blocks, "");
    TAG_RE.replace_all(&without_comments, "").into_owned()
}

/// Replace URLs with ` httpaddress `. A host glued to an `@` on either side
/// belongs to an email address and is left for [`substitute_emails`].
pub fn substitute_urls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let glued_to_at = text[..m.start()].ends_with('@') || text[m.end()..].starts_with('@');
        if glued_to_at {
            out.push_str(m.as_str());
        } else {
            out.push(' ');
            out.push_str(URL_TOKEN);
            out.push(' ');
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Replace anything that looks like an email address with ` emailaddress `.
/// The pattern is deliberately loose: look-alikes count too.
pub fn substitute_emails(text: &str) -> String {
    EMAIL_RE.replace_all(text, format!(" {EMAIL_TOKEN} ").as_str()).into_owned()
}

/// Replace every maximal run of ASCII digits with ` number `.
pub fn substitute_numbers(text: &str) -> String {
    DIGITS_RE.replace_all(text, format!(" {NUMBER_TOKEN} ").as_str()).into_owned()
}

/// Replace every `$` with ` dollar `.
pub fn substitute_dollars(text: &str) -> String {
    text.replace('$', &format!(" {DOLLAR_TOKEN} "))
}

/// Replace every character outside `[0-9a-zA-Z]` with a space.
pub fn strip_non_alphanumeric(text: &str) -> String {
    text.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' }).collect()
}
