//! Molecule embedding: SMILES strings to fixed-width numeric vectors.
//!
//! Four strategies share one entry point. Three are structural
//! fingerprints computed from a parsed molecule graph (topological paths,
//! circular neighborhoods, MACCS keys); the fourth is the latent layer of
//! a pretrained character-level autoencoder that reads the raw string and
//! never parses it. Fingerprint strategies skip rows that fail to parse
//! and report which rows survived; the autoencoder embeds everything.
//!
//! # Architecture
//!
//! - **featurize**: the SMILES alphabet, padding, and one-hot encoding
//! - **autoencoder**: the encoder topology, its weight bundle format, and
//!   the forward pass (CPU inference via candle)
//! - **dispatch**: [`MoleculeEmbedder`], which validates configuration,
//!   loads the encoder lazily, and routes batches by [`EmbedderId`]
//! - **types**: strategy identifiers and the [`EmbeddingBatch`] result
//! - **config** / **error**: TOML configuration and the error taxonomy
//!
//! Molecule parsing and the fingerprints themselves live in the
//! `mol-embed-chem` crate.
//!
//! # Example
//!
//! ```rust
//! use mol_embed_core::{EmbedConfig, EmbedderId, MoleculeEmbedder};
//!
//! let embedder = MoleculeEmbedder::new(EmbedConfig::default()).unwrap();
//! let batch = embedder
//!     .embed(&["CCO", "not a molecule", "c1ccccc1"], EmbedderId::Maccs)
//!     .unwrap();
//!
//! // The unparseable row was skipped; the rest embedded in input order.
//! assert_eq!(batch.width, 167);
//! assert_eq!(batch.valid_rows, vec![0, 2]);
//! ```

pub mod autoencoder;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod featurize;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::EmbedConfig;
pub use dispatch::MoleculeEmbedder;
pub use error::{EmbedError, EmbedResult, ModelLoadError};
pub use types::{EmbedderId, EmbeddingBatch};
