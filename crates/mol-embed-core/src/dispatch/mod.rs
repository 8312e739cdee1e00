//! Strategy dispatch over the embedding pipeline.
//!
//! [`MoleculeEmbedder`] is the crate's front door. It owns the validated
//! configuration, loads the encoder lazily on first use, and routes each
//! request to the strategy named by an [`EmbedderId`](crate::types::EmbedderId):
//! fingerprint strategies parse every row and skip the ones that fail,
//! the autoencoder embeds every row without parsing anything.

mod embedder;

#[cfg(test)]
mod tests;

pub use embedder::MoleculeEmbedder;
