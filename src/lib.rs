pub mod core;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod search;
pub mod tool;

pub use crate::core::config::RetrieverConfig;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::retriever::Retriever;
pub use crate::core::types::{DocId, ServiceState};
pub use crate::search::results::SearchHit;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          LEXDEX STRUCT ARCHITECTURE                          │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── SERVICE LAYER ───────────────────────────────┐
│  struct SearchTool                       // JSON in, JSON out                │
│    retriever: Retriever                                                      │
│                                                                              │
│  struct Retriever                                                            │
│    config:    RetrieverConfig            // k1, b, default_top_k             │
│    tokenizer: Arc<dyn Tokenizer>         // AlphanumericTokenizer            │
│    scorer:    BM25Scorer                                                     │
│    current:   RwLock<Arc<IndexSnapshot>> // swapped whole on mutation        │
│    writer:    Mutex<()>                  // serializes initialize/append     │
└──────────────────────────────────────────────────────────────────────────────┘
                                      │
                                      ▼
┌───────────────────────────────── INDEX LAYER ────────────────────────────────┐
│  struct IndexSnapshot                                                        │
│    revision: u64                         // 0 = uninitialized                │
│    store:    CorpusStore                 // Vec<Arc<DocumentRecord>>         │
│    stats:    IndexStatistics             // df, avgdl, N (full rebuild)      │
│                                                                              │
│  struct DocumentRecord                                                       │
│    id: DocId, text, tokens, term_frequency                                   │
└──────────────────────────────────────────────────────────────────────────────┘

 search(query, k):
   tokenize → dedup terms → score every record (BM25) → drop score <= 0
            → TopKCollector (score desc, DocId asc) → Vec<SearchHit>
*/
