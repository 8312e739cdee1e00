//! Fingerprint widths and the circular radius.

use serde::{Deserialize, Serialize};

fn default_circular_radius() -> usize {
    5
}

fn default_bits() -> usize {
    2048
}

/// Parameters of the fingerprint strategies.
///
/// MACCS has no entry here: its width is fixed at 167 by the key table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    /// Neighborhood radius of the circular (Morgan) fingerprint.
    #[serde(default = "default_circular_radius")]
    pub circular_radius: usize,

    /// Width of the circular fingerprint in bits.
    #[serde(default = "default_bits")]
    pub circular_bits: usize,

    /// Width of the topological path fingerprint in bits.
    #[serde(default = "default_bits")]
    pub topological_bits: usize,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            circular_radius: default_circular_radius(),
            circular_bits: default_bits(),
            topological_bits: default_bits(),
        }
    }
}

impl FingerprintConfig {
    /// Validate this section.
    pub fn validate(&self) -> Result<(), String> {
        if self.circular_radius == 0 {
            return Err("circular_radius must be at least 1".to_string());
        }
        if self.circular_bits == 0 {
            return Err("circular_bits must be at least 1".to_string());
        }
        if self.topological_bits == 0 {
            return Err("topological_bits must be at least 1".to_string());
        }
        Ok(())
    }
}
