use std::collections::HashMap;
use crate::analysis::tokenizer::Tokenizer;
use crate::core::types::DocId;

/// One stored passage with its derived token data
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub id: DocId,
    pub text: String,
    pub tokens: Vec<String>,
    pub term_frequency: HashMap<String, u32>,
}

impl DocumentRecord {
    pub fn new(id: DocId, text: String, tokenizer: &dyn Tokenizer) -> Self {
        let tokens = tokenizer.tokenize(&text);
        let mut term_frequency: HashMap<String, u32> = HashMap::with_capacity(tokens.len());
        for token in &tokens {
            *term_frequency.entry(token.clone()).or_insert(0) += 1;
        }

        DocumentRecord {
            id,
            text,
            tokens,
            term_frequency,
        }
    }

    /// Number of tokens, counting repeats.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn term_freq(&self, term: &str) -> u32 {
        self.term_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn distinct_terms(&self) -> impl Iterator<Item = &str> {
        self.term_frequency.keys().map(String::as_str)
    }
}
