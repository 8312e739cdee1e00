//! The embedder front door: configuration, lazy encoder, strategy routing.

use std::time::Instant;

use once_cell::sync::OnceCell;

use mol_embed_chem::fingerprint::{self, Fingerprint};
use mol_embed_chem::{parse_smiles, Molecule};

use crate::autoencoder::LatentEncoder;
use crate::config::EmbedConfig;
use crate::error::EmbedResult;
use crate::featurize::{onehot_smiles, MAX_SMILES_LEN};
use crate::types::{EmbedderId, EmbeddingBatch};

/// Routes SMILES batches to embedding strategies.
///
/// Construction validates the configuration; nothing touches the disk
/// until the first autoencoder request, which loads the weights bundle and
/// keeps it for the life of the value. Fingerprint strategies never load
/// the bundle at all, so a missing or corrupt bundle only surfaces when
/// the autoencoder is actually asked for.
///
/// # Example
///
/// ```rust
/// use mol_embed_core::config::EmbedConfig;
/// use mol_embed_core::dispatch::MoleculeEmbedder;
/// use mol_embed_core::types::EmbedderId;
///
/// let embedder = MoleculeEmbedder::new(EmbedConfig::default()).unwrap();
/// let batch = embedder
///     .embed(&["CCO", "not parseable", "c1ccccc1"], EmbedderId::Maccs)
///     .unwrap();
///
/// assert_eq!(batch.width, 167);
/// assert_eq!(batch.valid_rows, vec![0, 2]);
/// ```
#[derive(Debug)]
pub struct MoleculeEmbedder {
    config: EmbedConfig,
    encoder: OnceCell<LatentEncoder>,
}

impl MoleculeEmbedder {
    /// Validate and capture the configuration.
    ///
    /// # Errors
    /// [`EmbedError::Config`](crate::error::EmbedError::Config) when a
    /// section fails validation.
    pub fn new(config: EmbedConfig) -> EmbedResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            encoder: OnceCell::new(),
        })
    }

    /// The configuration this embedder runs under.
    #[must_use]
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Embed `smiles` with the given strategy.
    ///
    /// Fingerprint strategies parse each row; rows that fail to parse are
    /// logged and skipped, never an error. The autoencoder one-hots every
    /// row as-is, so all rows come back valid. Row `i` of the result's
    /// vectors is the embedding of the `i`-th surviving input, and
    /// `valid_rows` maps it back to its input position.
    ///
    /// An empty input returns an empty batch without loading anything; its
    /// width is 0 for the autoencoder unless the bundle is already loaded.
    ///
    /// # Errors
    /// [`EmbedError::Model`](crate::error::EmbedError::Model) when the
    /// autoencoder bundle cannot be loaded, and
    /// [`EmbedError::Inference`](crate::error::EmbedError::Inference) when
    /// the forward pass fails.
    pub fn embed(&self, smiles: &[&str], embedder: EmbedderId) -> EmbedResult<EmbeddingBatch> {
        if smiles.is_empty() {
            return Ok(EmbeddingBatch {
                embedder,
                width: self.strategy_width(embedder),
                vectors: Vec::new(),
                valid_rows: Vec::new(),
                latency_us: 0,
            });
        }

        let start = Instant::now();
        let (width, vectors, valid_rows) = match embedder {
            EmbedderId::Topological => {
                let bits = self.config.fingerprints.topological_bits;
                self.fingerprint_rows(smiles, bits, |mol| fingerprint::topological(mol, bits))
            }
            EmbedderId::Circular => {
                let radius = self.config.fingerprints.circular_radius as u32;
                let bits = self.config.fingerprints.circular_bits;
                self.fingerprint_rows(smiles, bits, |mol| fingerprint::morgan(mol, radius, bits))
            }
            EmbedderId::Maccs => {
                self.fingerprint_rows(smiles, fingerprint::MACCS_BITS, fingerprint::maccs)
            }
            EmbedderId::Autoencoder => self.encode_rows(smiles)?,
        };

        let latency_us = start.elapsed().as_micros() as u64;
        let batch = EmbeddingBatch {
            embedder,
            width,
            vectors,
            valid_rows,
            latency_us,
        };
        tracing::debug!(
            target: "mol_embed_core::dispatch",
            embedder = %embedder,
            rows_in = smiles.len(),
            rows_out = batch.len(),
            rows_skipped = smiles.len() - batch.len(),
            latency_us,
            "Embedding batch complete"
        );
        Ok(batch)
    }

    /// Resolve a strategy by name, then embed.
    ///
    /// Accepts the configuration spellings (`"circular"`) and the display
    /// spellings (`"Circular"`).
    ///
    /// # Errors
    /// [`EmbedError::UnknownEmbedder`](crate::error::EmbedError::UnknownEmbedder)
    /// for unrecognized names, before any row is touched.
    pub fn embed_named(&self, smiles: &[&str], name: &str) -> EmbedResult<EmbeddingBatch> {
        let embedder: EmbedderId = name.parse()?;
        self.embed(smiles, embedder)
    }

    /// Parse each row and fingerprint the survivors.
    fn fingerprint_rows<F>(
        &self,
        smiles: &[&str],
        width: usize,
        encode: F,
    ) -> (usize, Vec<Vec<f32>>, Vec<usize>)
    where
        F: Fn(&Molecule) -> Fingerprint,
    {
        let mut vectors = Vec::new();
        let mut valid_rows = Vec::new();
        for (row, input) in smiles.iter().enumerate() {
            match parse_smiles(input) {
                Ok(molecule) => {
                    vectors.push(encode(&molecule).to_f32_vec());
                    valid_rows.push(row);
                }
                Err(error) => {
                    tracing::debug!(
                        target: "mol_embed_core::dispatch",
                        row,
                        smiles = input,
                        error = %error,
                        "Skipping unparseable row"
                    );
                }
            }
        }
        (width, vectors, valid_rows)
    }

    /// One-hot the whole batch and run the encoder once.
    ///
    /// Every row is valid by definition; the encoder never inspects the
    /// chemistry, and unmapped characters degrade to zero matrix rows.
    fn encode_rows(&self, smiles: &[&str]) -> EmbedResult<(usize, Vec<Vec<f32>>, Vec<usize>)> {
        let encoder = self.encoder()?;
        let batch = onehot_smiles(smiles, MAX_SMILES_LEN);
        let vectors = encoder.predict(&batch)?;
        Ok((encoder.latent_dim(), vectors, (0..smiles.len()).collect()))
    }

    /// The encoder, loading the bundle on first use.
    ///
    /// A failed load is not cached; the next call retries.
    fn encoder(&self) -> EmbedResult<&LatentEncoder> {
        self.encoder.get_or_try_init(|| {
            let path = self.config.weights.bundle_path();
            Ok(LatentEncoder::load(&path, &self.config.weights)?)
        })
    }

    /// Output width of a strategy under this configuration.
    fn strategy_width(&self, embedder: EmbedderId) -> usize {
        match embedder {
            EmbedderId::Topological => self.config.fingerprints.topological_bits,
            EmbedderId::Circular => self.config.fingerprints.circular_bits,
            EmbedderId::Maccs => fingerprint::MACCS_BITS,
            EmbedderId::Autoencoder => self.encoder.get().map_or(0, LatentEncoder::latent_dim),
        }
    }
}
