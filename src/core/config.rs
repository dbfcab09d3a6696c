use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};

/// Upper bound on `k1`; larger values overflow the BM25 term weight.
pub const MAX_K1: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    pub k1: f64,                    // Term frequency saturation
    pub b: f64,                     // Length normalization strength
    pub default_top_k: usize,       // Used when a tool request omits top_k
    pub parallel_threshold: usize,  // Batch size that switches record building to rayon
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        RetrieverConfig {
            k1: 1.5,
            b: 0.75,
            default_top_k: 5,
            parallel_threshold: 1024,
        }
    }
}

impl RetrieverConfig {
    /// Parse a JSON blob; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RetrieverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=MAX_K1).contains(&self.k1) {
            return Err(Error::invalid_argument(format!(
                "k1 must be within [0, {}], got {}",
                MAX_K1, self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(Error::invalid_argument(format!(
                "b must be within [0, 1], got {}",
                self.b
            )));
        }
        if self.default_top_k == 0 {
            return Err(Error::invalid_argument("default_top_k must be positive"));
        }
        Ok(())
    }
}
