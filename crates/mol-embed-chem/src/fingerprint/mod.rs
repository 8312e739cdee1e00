//! Structural fingerprints over the molecule graph.
//!
//! Three fingerprint families feed the embedding strategies:
//!
//! - [`topological`]: hashed linear bond paths, Daylight style
//! - [`morgan`]: circular environments grown outward from each atom
//! - [`maccs`]: fixed-width structural keys
//!
//! All three are deterministic functions of the molecule graph. Hashed
//! families use xxh3 so the same molecule produces the same bits across
//! platforms and runs.

use bitvec::prelude::*;

mod maccs;
mod morgan;
mod topological;

pub use maccs::{maccs, MACCS_BITS};
pub use morgan::morgan;
pub use topological::{topological, MAX_PATH_BONDS, MIN_PATH_BONDS};

#[cfg(test)]
mod tests;

/// A fixed-width bit fingerprint.
///
/// Thin wrapper over a bit vector with the operations the embedders need:
/// setting hashed bit positions and exporting a dense `f32` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    bits: BitVec<u64, Lsb0>,
}

impl Fingerprint {
    /// All-zero fingerprint of `len` bits.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: bitvec![u64, Lsb0; 0; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Set the bit at `index`. Out-of-range indices are ignored; callers
    /// always reduce hashes modulo the width first.
    pub fn set(&mut self, index: usize) {
        if let Some(mut slot) = self.bits.get_mut(index) {
            *slot = true;
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|bit| *bit)
    }

    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Indices of set bits, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Dense row of `0.0`/`1.0` values, one per bit.
    #[must_use]
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.bits
            .iter()
            .by_vals()
            .map(|bit| if bit { 1.0 } else { 0.0 })
            .collect()
    }
}
