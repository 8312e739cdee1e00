//! SMILES featurization: the fixed alphabet, padding, and one-hot encoding.
//!
//! The latent encoder consumes SMILES as text, not as a molecule graph.
//! Every string is padded or truncated to [`MAX_SMILES_LEN`] characters and
//! each character becomes a one-hot row over the [`SMILES_CHARSET`] alphabet.
//! Characters outside the alphabet produce an all-zero row without error;
//! that silent degrade is a contract the encoder was trained under, not an
//! oversight.
//!
//! # Example
//!
//! ```rust
//! use mol_embed_core::featurize::{pad_smiles, vectorize_smiles};
//!
//! assert_eq!(pad_smiles("CCO", 5), "CCO  ");
//!
//! let onehot = vectorize_smiles("C", 3);
//! assert_eq!(onehot.get(0, 18), 1.0); // 'C' is column 18
//! assert_eq!(onehot.get(1, 0), 1.0); // padding space is column 0
//! ```

mod constants;
mod encoding;

#[cfg(test)]
mod tests;

pub use constants::{charset_index, CHARSET_SIZE, MAX_SMILES_LEN, SMILES_CHARSET};
pub use encoding::{onehot_smiles, pad_smiles, vectorize_smiles, OneHot, OneHotBatch};
