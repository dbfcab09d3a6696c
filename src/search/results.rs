use std::collections::BinaryHeap;
use std::cmp::Ordering;
use serde::{Serialize, Deserialize};
use crate::core::types::DocId;

/// Passage with relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub text: String,
    pub score: f64,
}

/// Heap entry ranking hits: higher score first, then lower doc_id.
// BinaryHeap is a max-heap, so its top is the worst hit collected so far.
struct RankedHit(SearchHit);

impl PartialEq for RankedHit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedHit {}

impl PartialOrd for RankedHit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedHit {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.score
            .total_cmp(&self.0.score)
            .then_with(|| self.0.doc_id.cmp(&other.0.doc_id))
    }
}

/// Score explanation for debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreExplanation {
    pub value: f64,
    pub description: String,
    pub details: Vec<ScoreExplanation>,
}

/// Top-K collector. Drops non-positive scores; equal scores keep insertion order.
pub struct TopKCollector {
    heap: BinaryHeap<RankedHit>,
    pub k: usize,
    pub total_collected: usize,  // Hits with a positive score, before truncation
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            k,
            total_collected: 0,
        }
    }

    pub fn collect(&mut self, hit: SearchHit) {
        if hit.score.is_nan() || hit.score <= 0.0 {
            return;
        }
        self.total_collected += 1;

        self.heap.push(RankedHit(hit));
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    pub fn get_results(self) -> Vec<SearchHit> {
        // Ascending by Ord is best-first
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|ranked| ranked.0)
            .collect()
    }

    pub fn max_score(&self) -> f64 {
        self.heap.iter().map(|ranked| ranked.0.score).fold(0.0, f64::max)
    }
}
