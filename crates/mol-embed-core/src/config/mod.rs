//! Configuration for the embedding pipeline.
//!
//! # TOML Structure
//!
//! ```toml
//! [weights]
//! dir = "weights"
//! bundle = "encoder.safetensors"
//! epsilon = 0.001
//! padding = "valid"
//!
//! [fingerprints]
//! circular_radius = 5
//! circular_bits = 2048
//! topological_bits = 2048
//! ```
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Invalid values fail [`EmbedConfig::validate`] with the
//! offending section named; nothing is silently corrected.

mod fingerprints;
mod weights;


pub use fingerprints::FingerprintConfig;
pub use weights::{ConvPadding, WeightConfig};

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EmbedError, EmbedResult};

/// Root configuration: weight bundle location plus fingerprint parameters.
///
/// # Example
///
/// ```rust
/// use mol_embed_core::config::EmbedConfig;
///
/// let config = EmbedConfig::default();
/// config.validate().unwrap();
/// assert_eq!(config.fingerprints.circular_radius, 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Encoder weight bundle location and calibration constants.
    #[serde(default)]
    pub weights: WeightConfig,

    /// Fingerprint widths and the circular radius.
    #[serde(default)]
    pub fingerprints: FingerprintConfig,
}

impl EmbedConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// [`EmbedError::Config`] when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> EmbedResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| EmbedError::Config {
            message: format!("failed to read config file '{}': {e}", path.display()),
        })?;
        toml::from_str(&contents).map_err(|e| EmbedError::Config {
            message: format!("failed to parse TOML in '{}': {e}", path.display()),
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// [`EmbedError::Config`] when parsing fails.
    pub fn from_toml_str(toml: &str) -> EmbedResult<Self> {
        toml::from_str(toml).map_err(|e| EmbedError::Config {
            message: format!("failed to parse TOML: {e}"),
        })
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    /// [`EmbedError::Config`] when serialization fails.
    pub fn to_toml_string(&self) -> EmbedResult<String> {
        toml::to_string_pretty(self).map_err(|e| EmbedError::Config {
            message: format!("failed to serialize to TOML: {e}"),
        })
    }

    /// Validate all sections, returning the first error found.
    ///
    /// # Errors
    /// [`EmbedError::Config`] naming the invalid section and field.
    pub fn validate(&self) -> EmbedResult<()> {
        self.weights.validate().map_err(|e| EmbedError::Config {
            message: format!("[weights] {e}"),
        })?;
        self.fingerprints.validate().map_err(|e| EmbedError::Config {
            message: format!("[fingerprints] {e}"),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides on top of the current values.
    ///
    /// # Supported Variables
    ///
    /// | Variable | Config Path | Type |
    /// |----------|-------------|------|
    /// | `MOL_EMBED_WEIGHTS_DIR` | `weights.dir` | path |
    /// | `MOL_EMBED_WEIGHTS_BUNDLE` | `weights.bundle` | file name |
    /// | `MOL_EMBED_CIRCULAR_RADIUS` | `fingerprints.circular_radius` | usize |
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var("MOL_EMBED_WEIGHTS_DIR") {
            self.weights.dir = PathBuf::from(val);
        }
        if let Ok(val) = env::var("MOL_EMBED_WEIGHTS_BUNDLE") {
            self.weights.bundle = val;
        }
        if let Ok(val) = env::var("MOL_EMBED_CIRCULAR_RADIUS") {
            if let Ok(n) = val.parse::<usize>() {
                self.fingerprints.circular_radius = n;
            }
        }
        self
    }
}
