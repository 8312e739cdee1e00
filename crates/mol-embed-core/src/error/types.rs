//! Error enums and the crate-wide result alias.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type EmbedResult<T> = Result<T, EmbedError>;

/// Top-level error for embedding operations.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Embedder name did not match any registered strategy.
    #[error("unknown embedder '{name}' (known: topological, circular, maccs, autoencoder)")]
    UnknownEmbedder { name: String },

    /// The autoencoder weights bundle could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelLoadError),

    /// A tensor operation failed after the model loaded successfully.
    #[error("inference failed during {operation}: {message}")]
    Inference { operation: String, message: String },

    /// Invalid configuration value.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl From<candle_core::Error> for EmbedError {
    fn from(err: candle_core::Error) -> Self {
        EmbedError::Inference {
            operation: "candle".to_string(),
            message: err.to_string(),
        }
    }
}

/// Failure while locating, reading, or validating the weights bundle.
///
/// Every variant names the offending file or tensor so a bad bundle can be
/// diagnosed from the message alone.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// Bundle file does not exist or is not readable.
    #[error("weights bundle not found at {}: {source}", path.display())]
    BundleNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bundle file exists but is not a valid safetensors archive.
    #[error("failed to read weights bundle {}: {message}", path.display())]
    BundleParse { path: PathBuf, message: String },

    /// Bundle metadata declares a format this build does not understand.
    #[error("unsupported weights bundle format '{found}' in {} (expected \"1\")", path.display())]
    UnsupportedFormat { path: PathBuf, found: String },

    /// A tensor the topology requires is absent from the bundle.
    #[error("tensor '{name}' missing from weights bundle {}", path.display())]
    TensorMissing { name: String, path: PathBuf },

    /// A tensor is present but its shape contradicts the topology.
    #[error("shape mismatch for '{name}': expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Candle tensor operation failed while building the model.
    #[error("tensor operation failed for {operation}: {message}")]
    Tensor { operation: String, message: String },
}

impl From<candle_core::Error> for ModelLoadError {
    fn from(err: candle_core::Error) -> Self {
        ModelLoadError::Tensor {
            operation: "candle".to_string(),
            message: err.to_string(),
        }
    }
}
