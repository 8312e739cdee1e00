//! Embedder identifiers and their static properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EmbedError;

/// Identifies one of the four embedding strategies.
///
/// # Variants
///
/// | Variant | Method | Width | Type |
/// |---------|--------|-------|------|
/// | Topological | Hashed linear bond paths | 2048 default | Fingerprint |
/// | Circular | Morgan environments, radius 5 default | 2048 default | Fingerprint |
/// | Maccs | Structural keys | 167 fixed | Fingerprint |
/// | Autoencoder | Latent encoder over one-hot SMILES | read from bundle | Pretrained |
///
/// # Example
///
/// ```rust
/// use mol_embed_core::types::EmbedderId;
///
/// let id: EmbedderId = "circular".parse().unwrap();
/// assert_eq!(id, EmbedderId::Circular);
/// assert_eq!(id.dimension(), Some(2048));
/// assert!(id.requires_parse());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EmbedderId {
    /// Hashed simple bond paths over the molecule graph.
    Topological = 0,
    /// Morgan circular environments grown to the configured radius.
    Circular = 1,
    /// MACCS structural keys.
    Maccs = 2,
    /// Pretrained latent encoder applied to one-hot SMILES text.
    Autoencoder = 3,
}

impl EmbedderId {
    /// Default output width, or `None` when the width is only known after
    /// the weights bundle is loaded. Fingerprint widths can be changed in
    /// configuration; this is the out-of-the-box value.
    #[must_use]
    pub const fn dimension(&self) -> Option<usize> {
        match self {
            Self::Topological => Some(2048),
            Self::Circular => Some(2048),
            Self::Maccs => Some(167),
            Self::Autoencoder => None,
        }
    }

    /// Returns true if this strategy parses SMILES into a molecule graph
    /// and therefore routes unparseable rows to the skipped set.
    #[must_use]
    pub const fn requires_parse(&self) -> bool {
        matches!(self, Self::Topological | Self::Circular | Self::Maccs)
    }

    /// Returns true if this strategy needs pretrained weights.
    #[must_use]
    pub const fn is_pretrained(&self) -> bool {
        matches!(self, Self::Autoencoder)
    }

    /// Returns all strategies in presentation order.
    #[must_use]
    pub const fn all() -> &'static [EmbedderId] {
        &[
            Self::Topological,
            Self::Circular,
            Self::Maccs,
            Self::Autoencoder,
        ]
    }

    /// Configuration name, as used in TOML and [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Topological => "topological",
            Self::Circular => "circular",
            Self::Maccs => "maccs",
            Self::Autoencoder => "autoencoder",
        }
    }

    /// Human-facing name, suitable for method pickers and reports.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Topological => "Topological",
            Self::Circular => "Circular",
            Self::Maccs => "MACCS",
            Self::Autoencoder => "Autoencoder",
        }
    }
}

impl fmt::Display for EmbedderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedderId {
    type Err = EmbedError;

    /// Accepts both the configuration names (`"maccs"`) and the display
    /// names (`"MACCS"`). Anything else is [`EmbedError::UnknownEmbedder`];
    /// an unrecognized strategy must never silently fall back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmbedderId::all()
            .iter()
            .copied()
            .find(|id| s == id.as_str() || s == id.display_name())
            .ok_or_else(|| EmbedError::UnknownEmbedder {
                name: s.to_string(),
            })
    }
}
