//! Error types for the embedding pipeline.
//!
//! # Error Categories
//!
//! | Category | Variants | Meaning |
//! |----------|----------|---------|
//! | Model loading | `BundleNotFound`, `BundleParse`, `UnsupportedFormat`, `TensorMissing`, `ShapeMismatch`, `Tensor` | weights bundle is absent, truncated, or structurally wrong |
//! | Dispatch | `UnknownEmbedder` | embedder name not recognized |
//! | Inference | `Inference` | forward pass failed after a successful load |
//! | Configuration | `Config` | invalid settings |
//!
//! Malformed SMILES is deliberately not an error at this level: the
//! dispatcher routes unparseable rows into the skipped set instead of
//! failing the batch.

mod types;


pub use types::{EmbedError, EmbedResult, ModelLoadError};
