use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use crate::core::types::ServiceState;

/// Point-in-time statistics for monitoring a retriever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub state: ServiceState,
    pub revision: u64,
    pub corpus_size: usize,
    pub distinct_terms: usize,
    pub total_tokens: usize,
    pub average_document_length: f64,
    pub built_at: Option<DateTime<Utc>>,
}
