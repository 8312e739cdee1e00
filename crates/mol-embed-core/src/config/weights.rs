//! Weights bundle location and encoder calibration constants.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from("weights")
}

fn default_bundle() -> String {
    "encoder.safetensors".to_string()
}

fn default_epsilon() -> f64 {
    1e-3
}

/// Convolution padding mode of the encoder stages.
///
/// `Valid` (no padding) matches the shipped bundles: the sequence length
/// shrinks 120 → 112 → 104 → 94 through the three stages. `Same` keeps the
/// length at 120 for bundles exported that way. The dense stage width stored
/// in a bundle implies the mode it was trained under; the loader rejects a
/// bundle whose width contradicts the configured mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvPadding {
    #[default]
    Valid,
    Same,
}

impl ConvPadding {
    /// The configuration-file spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Same => "same",
        }
    }
}

impl std::fmt::Display for ConvPadding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the encoder weights live and the numeric constants of its
/// normalization stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Directory holding weight bundles.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Bundle file name inside `dir`.
    #[serde(default = "default_bundle")]
    pub bundle: String,

    /// Batch normalization epsilon. A bundle overrides this through its
    /// `epsilon` metadata entry, so the constant travels with the weights.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Convolution padding mode.
    #[serde(default)]
    pub padding: ConvPadding,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            bundle: default_bundle(),
            epsilon: default_epsilon(),
            padding: ConvPadding::default(),
        }
    }
}

impl WeightConfig {
    /// Full path of the bundle file.
    #[must_use]
    pub fn bundle_path(&self) -> PathBuf {
        self.dir.join(&self.bundle)
    }

    /// Validate this section.
    pub fn validate(&self) -> Result<(), String> {
        if self.dir.as_os_str().is_empty() {
            return Err("dir cannot be empty".to_string());
        }
        if self.bundle.is_empty() {
            return Err("bundle file name cannot be empty".to_string());
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            ));
        }
        Ok(())
    }
}
