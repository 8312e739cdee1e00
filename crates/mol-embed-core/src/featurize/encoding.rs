//! Padding, one-hot vectorization, and batch assembly.

use candle_core::{Device, Tensor};

use super::constants::{charset_index, CHARSET_SIZE};

/// Right-pad with spaces or truncate so the result is exactly `max_len`
/// characters. Character-counted, so the result length is stable for any
/// input.
#[must_use]
pub fn pad_smiles(smiles: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(max_len);
    let mut count = 0;
    for c in smiles.chars().take(max_len) {
        out.push(c);
        count += 1;
    }
    for _ in count..max_len {
        out.push(' ');
    }
    out
}

/// Write the one-hot rows of one padded SMILES string into `dst`, which must
/// hold exactly `max_len * CHARSET_SIZE` zeroed cells.
fn encode_into(dst: &mut [f32], smiles: &str, max_len: usize) {
    for (row, c) in pad_smiles(smiles, max_len).chars().enumerate() {
        if let Some(col) = charset_index(c) {
            dst[row * CHARSET_SIZE + col] = 1.0;
        }
    }
}

/// One-hot matrix for a single SMILES string, shape `(rows, CHARSET_SIZE)`,
/// row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHot {
    data: Vec<f32>,
    rows: usize,
}

impl OneHot {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        CHARSET_SIZE
    }

    /// Cell value. Panics if `row` or `col` is out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(col < CHARSET_SIZE);
        self.data[row * CHARSET_SIZE + col]
    }

    /// One character's row, length [`CHARSET_SIZE`].
    #[must_use]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * CHARSET_SIZE..(row + 1) * CHARSET_SIZE]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// `(rows, CHARSET_SIZE)` tensor on `device`.
    pub fn to_tensor(&self, device: &Device) -> candle_core::Result<Tensor> {
        Tensor::from_slice(&self.data, (self.rows, CHARSET_SIZE), device)
    }
}

/// One-hot encode one SMILES string into a `(max_len, CHARSET_SIZE)` matrix.
///
/// The string is padded or truncated first. Every in-alphabet character sets
/// exactly one cell in its row; characters outside the alphabet leave their
/// row all zero, silently. Padding spaces set column 0.
#[must_use]
pub fn vectorize_smiles(smiles: &str, max_len: usize) -> OneHot {
    let mut data = vec![0.0; max_len * CHARSET_SIZE];
    encode_into(&mut data, smiles, max_len);
    OneHot {
        data,
        rows: max_len,
    }
}

/// One-hot tensor for a whole batch, shape `(len, rows, CHARSET_SIZE)`,
/// row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHotBatch {
    data: Vec<f32>,
    len: usize,
    rows: usize,
}

impl OneHotBatch {
    /// Number of encoded strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        CHARSET_SIZE
    }

    /// Cell value for string `item`. Panics if any index is out of range.
    #[must_use]
    pub fn get(&self, item: usize, row: usize, col: usize) -> f32 {
        assert!(item < self.len && row < self.rows && col < CHARSET_SIZE);
        self.data[(item * self.rows + row) * CHARSET_SIZE + col]
    }

    /// `(len, rows, CHARSET_SIZE)` tensor on `device`.
    pub fn to_tensor(&self, device: &Device) -> candle_core::Result<Tensor> {
        Tensor::from_slice(&self.data, (self.len, self.rows, CHARSET_SIZE), device)
    }
}

/// One-hot encode a batch of SMILES strings, preserving row order.
///
/// Empty input yields an empty batch; no minimum batch size exists anywhere
/// in the pipeline.
#[must_use]
pub fn onehot_smiles<S: AsRef<str>>(smiles: &[S], max_len: usize) -> OneHotBatch {
    let stride = max_len * CHARSET_SIZE;
    let mut data = vec![0.0; smiles.len() * stride];
    for (item, s) in smiles.iter().enumerate() {
        encode_into(&mut data[item * stride..(item + 1) * stride], s.as_ref(), max_len);
    }
    OneHotBatch {
        data,
        len: smiles.len(),
        rows: max_len,
    }
}
