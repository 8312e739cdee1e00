//! Embedding output: the matrix plus the bookkeeping of which rows made it.

use serde::{Deserialize, Serialize};

use super::EmbedderId;

/// Result of one embedding call.
///
/// `vectors[k]` is the embedding of input row `valid_rows[k]`. Rows of the
/// input absent from `valid_rows` were skipped (their SMILES did not parse);
/// callers feed those to their failure sink via [`EmbeddingBatch::skipped_rows`].
///
/// Invariants, checked by [`EmbeddingBatch::validate`]:
/// - `vectors.len() == valid_rows.len()`
/// - `valid_rows` is strictly increasing (input order is preserved)
/// - every vector has length `width`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingBatch {
    /// Strategy that produced this batch.
    pub embedder: EmbedderId,
    /// Width of every embedding vector.
    pub width: usize,
    /// One embedding per surviving input row, input order.
    pub vectors: Vec<Vec<f32>>,
    /// Indices into the original input, strictly increasing.
    pub valid_rows: Vec<usize>,
    /// Wall-clock time of the embedding call, microseconds.
    pub latency_us: u64,
}

impl EmbeddingBatch {
    /// Number of embedded rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Input rows that were not embedded, given the original input length.
    ///
    /// The complement of `valid_rows` in `0..total`, ascending.
    #[must_use]
    pub fn skipped_rows(&self, total: usize) -> Vec<usize> {
        let mut skipped = Vec::with_capacity(total.saturating_sub(self.valid_rows.len()));
        let mut valid = self.valid_rows.iter().copied().peekable();
        for row in 0..total {
            if valid.peek() == Some(&row) {
                valid.next();
            } else {
                skipped.push(row);
            }
        }
        skipped
    }

    /// Check the structural invariants. Returns the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.vectors.len() != self.valid_rows.len() {
            return Err(format!(
                "{} vectors but {} valid rows",
                self.vectors.len(),
                self.valid_rows.len()
            ));
        }
        if !self.valid_rows.windows(2).all(|w| w[0] < w[1]) {
            return Err("valid_rows is not strictly increasing".to_string());
        }
        if let Some((k, v)) = self
            .vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != self.width)
        {
            return Err(format!(
                "vector {k} has length {} but width is {}",
                v.len(),
                self.width
            ));
        }
        Ok(())
    }
}
