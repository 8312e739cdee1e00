//! The fixed-topology latent encoder: bundle loading and the forward pass.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::{Conv1d, Conv1dConfig, Linear, Module};
use safetensors::SafeTensors;
use sha2::{Digest, Sha256};

use crate::config::WeightConfig;
use crate::error::{EmbedResult, ModelLoadError};
use crate::featurize::{OneHot, OneHotBatch};

use super::norm::InferenceNorm;
use super::schema::{self, LayerSpec, ENCODER_TOPOLOGY, EPSILON_KEY, FORMAT_KEY, FORMAT_VERSION};

/// One executable stage, built from its [`LayerSpec`] counterpart.
#[derive(Debug)]
enum Stage {
    /// Convolution, tanh, normalization.
    Conv { conv: Conv1d, norm: InferenceNorm },
    /// Collapse `(channels, length)` into one feature axis.
    Flatten,
    /// Dense layer, tanh, normalization.
    Dense { dense: Linear, norm: InferenceNorm },
    /// Final projection to the latent width.
    Latent(Linear),
}

/// The loaded encoder.
///
/// Immutable after construction; one instance serves the whole process.
/// Normalization uses stored running statistics, so a row's embedding is
/// identical whether it is encoded alone or in a batch.
#[derive(Debug)]
pub struct LatentEncoder {
    stages: Vec<Stage>,
    hidden_dim: usize,
    latent_dim: usize,
    device: Device,
}

impl LatentEncoder {
    /// Load and validate a weights bundle.
    ///
    /// Reads the file, verifies the schema version in its metadata, then
    /// walks [`ENCODER_TOPOLOGY`] resolving every tensor by name and
    /// checking its shape. The hidden and latent widths are read from the
    /// bundle's own bias lengths; everything else is pinned by the
    /// topology and the configured padding mode.
    pub fn load(path: &Path, config: &WeightConfig) -> Result<Self, ModelLoadError> {
        let start = Instant::now();

        let bytes = std::fs::read(path).map_err(|source| {
            tracing::error!(
                target: "mol_embed_core::autoencoder",
                path = %path.display(),
                error = %source,
                "Failed to read weights bundle"
            );
            ModelLoadError::BundleNotFound {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let checksum: [u8; 32] = hasher.finalize().into();

        tracing::debug!(
            target: "mol_embed_core::autoencoder",
            path = %path.display(),
            size_bytes = bytes.len(),
            sha256 = %hex::encode(checksum),
            "Read weights bundle"
        );

        let epsilon = read_metadata(&bytes, path, config.epsilon)?;

        let tensors = candle_core::safetensors::load_buffer(&bytes, &Device::Cpu).map_err(|e| {
            ModelLoadError::BundleParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        let total_params: usize = tensors.values().map(Tensor::elem_count).sum();

        let mut bundle = BundleTensors { tensors, path };
        let mut stages = Vec::with_capacity(ENCODER_TOPOLOGY.len());
        let mut channels = schema::INPUT_CHANNELS;
        let mut length = schema::INPUT_LEN;
        let mut hidden_dim = 0;
        let mut latent_dim = 0;

        for spec in ENCODER_TOPOLOGY {
            match *spec {
                LayerSpec::Conv {
                    name,
                    norm,
                    channels: out,
                    kernel,
                } => {
                    let weight =
                        bundle.take_shaped(&format!("{name}.weight"), &[out, channels, kernel])?;
                    let bias = bundle.take_shaped(&format!("{name}.bias"), &[out])?;
                    let cfg = Conv1dConfig {
                        padding: schema::conv_zero_padding(kernel, config.padding),
                        stride: 1,
                        ..Default::default()
                    };
                    let norm = bundle.take_norm(norm, out, epsilon)?;
                    stages.push(Stage::Conv {
                        conv: Conv1d::new(weight, Some(bias), cfg),
                        norm,
                    });
                    channels = out;
                    length = schema::conv_output_len(length, kernel, config.padding);
                }
                LayerSpec::Flatten => stages.push(Stage::Flatten),
                LayerSpec::Hidden { name, norm } => {
                    let (bias, width) = bundle.take_free_vector(&format!("{name}.bias"))?;
                    let weight =
                        bundle.take_shaped(&format!("{name}.weight"), &[width, channels * length])?;
                    let norm = bundle.take_norm(norm, width, epsilon)?;
                    stages.push(Stage::Dense {
                        dense: Linear::new(weight, Some(bias)),
                        norm,
                    });
                    hidden_dim = width;
                }
                LayerSpec::Latent { name } => {
                    let (bias, width) = bundle.take_free_vector(&format!("{name}.bias"))?;
                    let weight = bundle.take_shaped(&format!("{name}.weight"), &[width, hidden_dim])?;
                    stages.push(Stage::Latent(Linear::new(weight, Some(bias))));
                    latent_dim = width;
                }
            }
        }

        if !bundle.tensors.is_empty() {
            let mut leftover: Vec<&str> = bundle.tensors.keys().map(String::as_str).collect();
            leftover.sort_unstable();
            tracing::warn!(
                target: "mol_embed_core::autoencoder",
                path = %path.display(),
                tensors = ?leftover,
                "Ignoring tensors outside the encoder schema"
            );
        }

        tracing::info!(
            target: "mol_embed_core::autoencoder",
            path = %path.display(),
            sha256 = %hex::encode(checksum),
            total_params,
            hidden_dim,
            latent_dim,
            epsilon,
            padding = %config.padding,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Encoder bundle loaded"
        );

        Ok(Self {
            stages,
            hidden_dim,
            latent_dim,
            device: Device::Cpu,
        })
    }

    /// Width of the embedding rows this encoder produces.
    #[must_use]
    pub fn latent_dim(&self) -> usize {
        self.latent_dim
    }

    /// Width of the hidden layer, read from the bundle at load.
    #[must_use]
    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    /// Encode a batch of one-hot matrices into latent rows.
    ///
    /// Row `i` of the output is the embedding of item `i` of the batch.
    /// An empty batch returns an empty vector without touching the model.
    pub fn predict(&self, batch: &OneHotBatch) -> EmbedResult<Vec<Vec<f32>>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let start = Instant::now();

        let input = batch.to_tensor(&self.device)?;
        let output = self.forward(input)?;
        let rows = output.to_vec2::<f32>()?;

        tracing::debug!(
            target: "mol_embed_core::autoencoder",
            batch_size = batch.len(),
            latent_dim = self.latent_dim,
            latency_us = start.elapsed().as_micros() as u64,
            "Encoded batch"
        );
        Ok(rows)
    }

    /// Encode a single one-hot matrix.
    pub fn predict_one(&self, onehot: &OneHot) -> EmbedResult<Vec<f32>> {
        let input = onehot.to_tensor(&self.device)?.unsqueeze(0)?;
        let output = self.forward(input)?;
        let mut rows = output.to_vec2::<f32>()?;
        Ok(rows.pop().unwrap_or_default())
    }

    /// Run the stage list over a `(batch, length, channels)` input.
    fn forward(&self, input: Tensor) -> candle_core::Result<Tensor> {
        // Convolutions want channel-major: (batch, channels, length).
        let mut x = input.transpose(1, 2)?;
        for stage in &self.stages {
            x = match stage {
                Stage::Conv { conv, norm } => norm.forward_channels(&conv.forward(&x)?.tanh()?)?,
                Stage::Flatten => x.flatten_from(1)?,
                Stage::Dense { dense, norm } => {
                    norm.forward_features(&dense.forward(&x)?.tanh()?)?
                }
                Stage::Latent(dense) => dense.forward(&x)?,
            };
        }
        Ok(x)
    }
}

/// Schema checks on the raw bundle header.
///
/// `format` must name the supported version; `epsilon`, when present,
/// overrides the configured value and must be a positive finite number.
fn read_metadata(bytes: &[u8], path: &Path, default_epsilon: f64) -> Result<f64, ModelLoadError> {
    let (_, header) = SafeTensors::read_metadata(bytes).map_err(|e| ModelLoadError::BundleParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let entries = header.metadata().clone().unwrap_or_default();

    match entries.get(FORMAT_KEY) {
        Some(version) if version == FORMAT_VERSION => {}
        Some(version) => {
            return Err(ModelLoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                found: version.clone(),
            })
        }
        None => {
            return Err(ModelLoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                found: "missing".to_string(),
            })
        }
    }

    match entries.get(EPSILON_KEY) {
        Some(raw) => {
            let epsilon: f64 = raw.parse().map_err(|_| ModelLoadError::BundleParse {
                path: path.to_path_buf(),
                message: format!("metadata epsilon '{raw}' is not a number"),
            })?;
            if !epsilon.is_finite() || epsilon <= 0.0 {
                return Err(ModelLoadError::BundleParse {
                    path: path.to_path_buf(),
                    message: format!("metadata epsilon {epsilon} must be positive and finite"),
                });
            }
            Ok(epsilon)
        }
        None => Ok(default_epsilon),
    }
}

/// The bundle's tensors, consumed by name as the topology walk claims them.
struct BundleTensors<'a> {
    tensors: HashMap<String, Tensor>,
    path: &'a Path,
}

impl BundleTensors<'_> {
    fn take(&mut self, name: &str) -> Result<Tensor, ModelLoadError> {
        self.tensors
            .remove(name)
            .ok_or_else(|| ModelLoadError::TensorMissing {
                name: name.to_string(),
                path: self.path.to_path_buf(),
            })
    }

    /// Claim a tensor whose full shape the topology pins.
    fn take_shaped(&mut self, name: &str, expected: &[usize]) -> Result<Tensor, ModelLoadError> {
        let tensor = self.take(name)?;
        if tensor.dims() != expected {
            return Err(ModelLoadError::ShapeMismatch {
                name: name.to_string(),
                expected: expected.to_vec(),
                actual: tensor.dims().to_vec(),
            });
        }
        Ok(tensor.to_dtype(DType::F32)?)
    }

    /// Claim a rank-1 tensor whose length the bundle itself defines.
    fn take_free_vector(&mut self, name: &str) -> Result<(Tensor, usize), ModelLoadError> {
        let tensor = self.take(name)?;
        match tensor.dims() {
            &[width] => Ok((tensor.to_dtype(DType::F32)?, width)),
            // Zero marks the bundle-defined width in the report.
            dims => Err(ModelLoadError::ShapeMismatch {
                name: name.to_string(),
                expected: vec![0],
                actual: dims.to_vec(),
            }),
        }
    }

    /// Claim and fold the four tensors of a normalization stage.
    fn take_norm(
        &mut self,
        stage: &str,
        width: usize,
        epsilon: f64,
    ) -> Result<InferenceNorm, ModelLoadError> {
        let gamma = self.take_shaped(&format!("{stage}.gamma"), &[width])?;
        let beta = self.take_shaped(&format!("{stage}.beta"), &[width])?;
        let mean = self.take_shaped(&format!("{stage}.running_mean"), &[width])?;
        let var = self.take_shaped(&format!("{stage}.running_var"), &[width])?;
        InferenceNorm::fold(&gamma, &beta, &mean, &var, epsilon)
    }
}
