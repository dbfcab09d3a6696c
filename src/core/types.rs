use serde::{Serialize, Deserialize};

/// Insertion position of a passage within the corpus (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u64);

impl DocId {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for DocId {
    fn from(position: usize) -> Self {
        DocId(position as u64)
    }
}

/// Lifecycle of a retriever. There is no closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Uninitialized,
    Ready,
}
