use std::sync::Arc;
use rayon::prelude::*;
use crate::analysis::tokenizer::Tokenizer;
use crate::core::types::DocId;
use crate::index::document::DocumentRecord;

/// Ordered collection of records. Position in `records` is the `DocId`.
///
/// Records are shared behind `Arc` so that a new revision can extend an
/// existing store without re-tokenizing it.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    records: Vec<Arc<DocumentRecord>>,
}

impl CorpusStore {
    pub fn new() -> Self {
        CorpusStore { records: Vec::new() }
    }

    /// Build a fresh store holding exactly `texts`.
    pub fn from_texts(texts: Vec<String>, tokenizer: &dyn Tokenizer, parallel_threshold: usize) -> Self {
        let mut store = CorpusStore::new();
        store.append(texts, tokenizer, parallel_threshold);
        store
    }

    /// Append records after the existing ones. Existing ids are unchanged.
    pub fn append(&mut self, texts: Vec<String>, tokenizer: &dyn Tokenizer, parallel_threshold: usize) {
        let start = self.records.len();
        let built = build_records(start, texts, tokenizer, parallel_threshold);
        self.records.extend(built.into_iter().map(Arc::new));
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentRecord> {
        self.records.get(id.index()).map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn build_records(
    start: usize,
    texts: Vec<String>,
    tokenizer: &dyn Tokenizer,
    parallel_threshold: usize,
) -> Vec<DocumentRecord> {
    if texts.len() >= parallel_threshold {
        // Indexed parallel iterators keep input order on collect
        texts
            .into_par_iter()
            .enumerate()
            .map(|(offset, text)| DocumentRecord::new(DocId::from(start + offset), text, tokenizer))
            .collect()
    } else {
        texts
            .into_iter()
            .enumerate()
            .map(|(offset, text)| DocumentRecord::new(DocId::from(start + offset), text, tokenizer))
            .collect()
    }
}
