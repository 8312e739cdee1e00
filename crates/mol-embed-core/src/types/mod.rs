//! Shared identifier and output types for the embedding pipeline.

mod batch;
mod embedder_id;


pub use batch::EmbeddingBatch;
pub use embedder_id::EmbedderId;
