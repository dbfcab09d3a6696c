use std::collections::HashMap;
use crate::index::corpus::CorpusStore;

/// Aggregates derived from a `CorpusStore`.
///
/// Always rebuilt in full from the store, never patched, so it cannot drift
/// from the records it describes. Rebuild cost is O(total stored tokens).
#[derive(Debug, Clone, Default)]
pub struct IndexStatistics {
    pub document_frequency: HashMap<String, u32>, // Records containing the term at least once
    pub average_document_length: f64,             // 0.0 for an empty corpus
    pub corpus_size: usize,
    pub total_tokens: usize,
}

impl IndexStatistics {
    pub fn rebuild(store: &CorpusStore) -> Self {
        let mut document_frequency: HashMap<String, u32> = HashMap::new();
        let mut total_tokens = 0usize;

        for record in store.iter() {
            for term in record.distinct_terms() {
                match document_frequency.get_mut(term) {
                    Some(df) => *df += 1,
                    None => {
                        document_frequency.insert(term.to_string(), 1);
                    }
                }
            }
            total_tokens += record.len();
        }

        let corpus_size = store.len();
        let average_document_length = if corpus_size == 0 {
            0.0
        } else {
            total_tokens as f64 / corpus_size as f64
        };

        IndexStatistics {
            document_frequency,
            average_document_length,
            corpus_size,
            total_tokens,
        }
    }

    pub fn doc_freq(&self, term: &str) -> u32 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn distinct_terms(&self) -> usize {
        self.document_frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus_size == 0
    }
}
