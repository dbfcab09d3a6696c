use std::sync::LazyLock;
use regex::Regex;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9]+").unwrap()
});

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &str;
}

/// Lowercases, then splits on any run of characters outside `[a-z0-9]`.
///
/// Non-ASCII characters that survive lowercasing are separators, so
/// `"naïve"` yields `["na", "ve"]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphanumericTokenizer;

impl Tokenizer for AlphanumericTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }

    fn name(&self) -> &str {
        "alphanumeric"
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SEPARATOR
        .split(&lowered)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
