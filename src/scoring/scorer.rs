use std::collections::HashSet;
use crate::index::document::DocumentRecord;
use crate::index::statistics::IndexStatistics;
use crate::search::results::ScoreExplanation;

/// Scorer trait
pub trait Scorer: Send + Sync {
    /// Relevance of `record` for the distinct `query_terms`. Never NaN or negative.
    fn score(&self, query_terms: &[String], record: &DocumentRecord, stats: &IndexStatistics) -> f64;

    fn explain(&self, query_terms: &[String], record: &DocumentRecord, stats: &IndexStatistics) -> ScoreExplanation;

    fn name(&self) -> &str;
}

/// Deduplicate query tokens, keeping first-occurrence order.
///
/// Repeated query terms do not amplify a score.
pub fn distinct_terms(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// BM25 Scorer
#[derive(Debug, Clone, Copy)]
pub struct BM25Scorer {
    pub k1: f64,  // Term frequency saturation (default: 1.5)
    pub b: f64,   // Length normalization strength (default: 0.75)
}

impl Default for BM25Scorer {
    fn default() -> Self {
        BM25Scorer {
            k1: 1.5,
            b: 0.75,
        }
    }
}

impl BM25Scorer {
    pub fn new(k1: f64, b: f64) -> Self {
        BM25Scorer { k1, b }
    }

    /// idf(t) = ln(1 + (N - df + 0.5) / (df + 0.5)); positive for every df <= N.
    pub fn idf(&self, doc_freq: u32, corpus_size: usize) -> f64 {
        let n = corpus_size as f64;
        let df = doc_freq as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    fn term_score(&self, tf: u32, idf: f64, doc_len: usize, avg_doc_len: f64) -> f64 {
        if tf == 0 || avg_doc_len <= 0.0 {
            return 0.0;
        }
        let tf = tf as f64;
        let numerator = tf * (self.k1 + 1.0);
        let denominator = tf + self.k1 * (1.0 - self.b + self.b * (doc_len as f64 / avg_doc_len));

        idf * numerator / denominator
    }
}

impl Scorer for BM25Scorer {
    fn score(&self, query_terms: &[String], record: &DocumentRecord, stats: &IndexStatistics) -> f64 {
        let mut total = 0.0;
        for term in query_terms {
            let tf = record.term_freq(term);
            if tf == 0 {
                continue;
            }
            let idf = self.idf(stats.doc_freq(term), stats.corpus_size);
            total += self.term_score(tf, idf, record.len(), stats.average_document_length);
        }
        total
    }

    fn explain(&self, query_terms: &[String], record: &DocumentRecord, stats: &IndexStatistics) -> ScoreExplanation {
        let mut details = Vec::new();
        let mut total = 0.0;

        for term in query_terms {
            let tf = record.term_freq(term);
            if tf == 0 {
                continue;
            }
            let df = stats.doc_freq(term);
            let idf = self.idf(df, stats.corpus_size);
            let value = self.term_score(tf, idf, record.len(), stats.average_document_length);
            total += value;
            details.push(ScoreExplanation {
                value,
                description: format!(
                    "term '{}': tf={}, df={}, idf={:.6}, doc_len={}, avg_doc_len={:.6}",
                    term, tf, df, idf, record.len(), stats.average_document_length
                ),
                details: Vec::new(),
            });
        }

        ScoreExplanation {
            value: total,
            description: format!("bm25(k1={}, b={}) sum of {} matching terms", self.k1, self.b, details.len()),
            details,
        }
    }

    fn name(&self) -> &str {
        "bm25"
    }
}
