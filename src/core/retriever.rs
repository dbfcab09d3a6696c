use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};
use crate::analysis::tokenizer::{AlphanumericTokenizer, Tokenizer};
use crate::core::config::RetrieverConfig;
use crate::core::error::{Error, Result};
use crate::core::stats::IndexStats;
use crate::core::types::{DocId, ServiceState};
use crate::index::corpus::CorpusStore;
use crate::index::snapshot::IndexSnapshot;
use crate::scoring::scorer::{distinct_terms, BM25Scorer, Scorer};
use crate::search::results::{ScoreExplanation, SearchHit, TopKCollector};

/// In-process BM25 keyword retriever over a growing list of passages.
///
/// Each mutation builds a new `IndexSnapshot` off to the side and swaps it in
/// under a short write lock. Searches clone the current `Arc` and never wait
/// on a rebuild. Mutations are serialized by `writer`.
pub struct Retriever {
    config: RetrieverConfig,
    tokenizer: Arc<dyn Tokenizer>,
    scorer: BM25Scorer,
    current: RwLock<Arc<IndexSnapshot>>,
    writer: Mutex<()>,
}

impl Default for Retriever {
    fn default() -> Self {
        Retriever::build(RetrieverConfig::default(), Arc::new(AlphanumericTokenizer))
    }
}

impl Retriever {
    pub fn new(config: RetrieverConfig) -> Result<Self> {
        Self::with_tokenizer(config, Arc::new(AlphanumericTokenizer))
    }

    pub fn with_tokenizer(config: RetrieverConfig, tokenizer: Arc<dyn Tokenizer>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, tokenizer))
    }

    fn build(config: RetrieverConfig, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Retriever {
            scorer: BM25Scorer::new(config.k1, config.b),
            config,
            tokenizer,
            current: RwLock::new(Arc::new(IndexSnapshot::empty())),
            writer: Mutex::new(()),
        }
    }

    /// Replace the whole corpus. Returns the number of passages indexed.
    pub fn initialize<I, S>(&self, documents: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = documents.into_iter().map(Into::into).collect();
        let count = texts.len();

        let _guard = self.writer.lock();
        let revision = self.current.read().revision + 1;
        let store = CorpusStore::from_texts(texts, self.tokenizer.as_ref(), self.config.parallel_threshold);
        self.publish(IndexSnapshot::build(revision, store));

        count
    }

    /// Add passages after the existing ones. Existing `DocId`s are unchanged.
    pub fn append<I, S>(&self, documents: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = documents.into_iter().map(Into::into).collect();
        let count = texts.len();

        let _guard = self.writer.lock();
        let base = self.snapshot();
        let mut store = base.store.clone();
        store.append(texts, self.tokenizer.as_ref(), self.config.parallel_threshold);
        self.publish(IndexSnapshot::build(base.revision + 1, store));

        count
    }

    fn publish(&self, snapshot: IndexSnapshot) {
        info!(
            revision = snapshot.revision,
            corpus_size = snapshot.stats.corpus_size,
            distinct_terms = snapshot.stats.distinct_terms(),
            tokenizer = self.tokenizer.name(),
            "published index revision"
        );
        *self.current.write() = Arc::new(snapshot);
    }

    /// Rank stored passages against `query`, best first, at most `top_k`.
    ///
    /// An empty corpus or a query without tokens yields no hits rather than an error.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>> {
        if top_k == 0 {
            return Err(Error::invalid_argument("top_k must be positive"));
        }

        let snapshot = self.snapshot();
        let terms = distinct_terms(self.tokenizer.tokenize(query));
        if terms.is_empty() {
            debug!(revision = snapshot.revision, "query has no tokens");
            return Ok(Vec::new());
        }
        if snapshot.stats.is_empty() || snapshot.stats.average_document_length <= 0.0 {
            debug!(revision = snapshot.revision, "corpus is empty");
            return Ok(Vec::new());
        }

        let mut collector = TopKCollector::new(top_k);
        for record in snapshot.store.iter() {
            let score = self.scorer.score(&terms, record, &snapshot.stats);
            if score > 0.0 {
                collector.collect(SearchHit {
                    doc_id: record.id,
                    text: record.text.clone(),
                    score,
                });
            }
        }

        debug!(
            revision = snapshot.revision,
            terms = terms.len(),
            matched = collector.total_collected,
            max_score = collector.max_score(),
            scorer = self.scorer.name(),
            top_k,
            "search complete"
        );
        Ok(collector.get_results())
    }

    /// Per-term breakdown of the score `search` would give `doc_id`.
    pub fn explain(&self, query: &str, doc_id: DocId) -> Option<ScoreExplanation> {
        let snapshot = self.snapshot();
        let record = snapshot.store.get(doc_id)?;
        let terms = distinct_terms(self.tokenizer.tokenize(query));
        Some(self.scorer.explain(&terms, record, &snapshot.stats))
    }

    pub fn document(&self, doc_id: DocId) -> Option<String> {
        self.snapshot().store.get(doc_id).map(|record| record.text.clone())
    }

    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.current.read().clone()
    }

    pub fn state(&self) -> ServiceState {
        self.snapshot().state()
    }

    pub fn stats(&self) -> IndexStats {
        let snapshot = self.snapshot();
        IndexStats {
            state: snapshot.state(),
            revision: snapshot.revision,
            corpus_size: snapshot.stats.corpus_size,
            distinct_terms: snapshot.stats.distinct_terms(),
            total_tokens: snapshot.stats.total_tokens,
            average_document_length: snapshot.stats.average_document_length,
            built_at: snapshot.built_at,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_search_before_initialize_is_empty() {
        let retriever = Retriever::default();
        assert_eq!(retriever.state(), ServiceState::Uninitialized);
        assert!(retriever.search("anything", 5).unwrap().is_empty());
    }

    #[test]
    fn test_initialize_moves_to_ready() {
        let retriever = Retriever::default();
        assert_eq!(retriever.initialize(["one passage"]), 1);
        assert_eq!(retriever.state(), ServiceState::Ready);
        assert_eq!(retriever.len(), 1);
    }

    #[test]
    fn test_initialize_with_no_documents_is_ready_but_empty() {
        let retriever = Retriever::default();
        retriever.initialize(Vec::<String>::new());
        assert_eq!(retriever.state(), ServiceState::Ready);
        assert!(retriever.is_empty());
        assert!(retriever.search("query", 5).unwrap().is_empty());
    }

    #[test]
    fn test_initialize_discards_previous_corpus() {
        let retriever = Retriever::default();
        retriever.initialize(["old passage about rust"]);
        retriever.initialize(["new passage about python"]);
        assert_eq!(retriever.len(), 1);
        assert!(retriever.search("rust", 5).unwrap().is_empty());
        assert_eq!(retriever.search("python", 5).unwrap().len(), 1);
    }

    #[test]
    fn test_append_extends_and_rebuilds_stats() {
        let retriever = Retriever::default();
        retriever.initialize(["apple banana"]);
        retriever.append(["apple cherry", "cherry date"]);

        let stats = retriever.stats();
        assert_eq!(stats.corpus_size, 3);
        assert_eq!(stats.revision, 2);
        assert_eq!(retriever.snapshot().stats.doc_freq("apple"), 2);
        assert_eq!(retriever.document(DocId(2)).as_deref(), Some("cherry date"));
    }

    #[test]
    fn test_append_before_initialize_is_ready() {
        let retriever = Retriever::default();
        retriever.append(["late start"]);
        assert_eq!(retriever.state(), ServiceState::Ready);
        assert_eq!(retriever.search("start", 5).unwrap().len(), 1);
    }

    #[test]
    fn test_zero_top_k_is_invalid() {
        let retriever = Retriever::default();
        retriever.initialize(["text"]);
        let err = retriever.search("text", 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_empty_query_is_empty_result() {
        let retriever = Retriever::default();
        retriever.initialize(["some text"]);
        assert!(retriever.search("", 5).unwrap().is_empty());
        assert!(retriever.search("?!...", 5).unwrap().is_empty());
    }

    #[test]
    fn test_explain_matches_search_score() {
        let retriever = Retriever::default();
        retriever.initialize(["vector database", "vector search engine", "graph database"]);
        let hits = retriever.search("vector database", 5).unwrap();
        for hit in &hits {
            let explanation = retriever.explain("vector database", hit.doc_id).unwrap();
            assert_eq!(explanation.value, hit.score);
        }
        assert!(retriever.explain("vector", DocId(99)).is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RetrieverConfig { b: -0.1, ..Default::default() };
        assert!(Retriever::new(config).is_err());
    }

    #[test]
    fn test_oversized_k1_is_rejected() {
        let config = RetrieverConfig { k1: f64::MAX, ..Default::default() };
        let err = Retriever::new(config).err().unwrap();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_largest_k1_keeps_scores_finite() {
        let config = RetrieverConfig { k1: crate::core::config::MAX_K1, ..Default::default() };
        let retriever = Retriever::new(config).unwrap();
        retriever.initialize(["rust rust", "python"]);

        let hits = retriever.search("rust", 5).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].score.is_finite() && hits[0].score > 0.0);

        let explanation = retriever.explain("rust", DocId(0)).unwrap();
        assert!(explanation.value.is_finite());
        assert_eq!(explanation.value, hits[0].score);
    }

    #[test]
    fn test_custom_parameters_change_scores() {
        let docs = ["rust rust rust systems", "rust"];
        let default = Retriever::default();
        default.initialize(docs);
        let flat = Retriever::new(RetrieverConfig { k1: 0.0, ..Default::default() }).unwrap();
        flat.initialize(docs);

        // With k1 = 0 term frequency saturates immediately, so both records tie on tf
        let flat_hits = flat.search("rust", 2).unwrap();
        assert_eq!(flat_hits[0].score, flat_hits[1].score);
        let default_hits = default.search("rust", 2).unwrap();
        assert!(default_hits[0].score != default_hits[1].score);
    }
}
