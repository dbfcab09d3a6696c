use chrono::{DateTime, Utc};
use crate::core::types::ServiceState;
use crate::index::corpus::CorpusStore;
use crate::index::statistics::IndexStatistics;

/// A corpus and the statistics computed from it, published together.
///
/// Readers hold an `Arc<IndexSnapshot>`, so a search always scores against
/// a store and statistics from the same revision.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    pub revision: u64,
    pub store: CorpusStore,
    pub stats: IndexStatistics,
    pub built_at: Option<DateTime<Utc>>,
}

impl IndexSnapshot {
    /// Revision 0: nothing has been loaded yet.
    pub fn empty() -> Self {
        IndexSnapshot {
            revision: 0,
            store: CorpusStore::new(),
            stats: IndexStatistics::default(),
            built_at: None,
        }
    }

    pub fn build(revision: u64, store: CorpusStore) -> Self {
        let stats = IndexStatistics::rebuild(&store);
        IndexSnapshot {
            revision,
            store,
            stats,
            built_at: Some(Utc::now()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.revision > 0
    }

    pub fn state(&self) -> ServiceState {
        if self.is_initialized() {
            ServiceState::Ready
        } else {
            ServiceState::Uninitialized
        }
    }
}
