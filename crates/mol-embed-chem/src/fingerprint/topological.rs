//! Daylight-style topological path fingerprint.
//!
//! Enumerates every simple bond path of 1 to [`MAX_PATH_BONDS`] bonds,
//! canonicalizes each path so both traversal directions hash identically,
//! and sets two hashed bits per distinct path.

use std::collections::HashSet;

use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

use super::Fingerprint;
use crate::molecule::Molecule;

/// Shortest path length contributing bits, in bonds.
pub const MIN_PATH_BONDS: usize = 1;

/// Longest path length contributing bits, in bonds.
pub const MAX_PATH_BONDS: usize = 7;

/// Hash seeds per path; each distinct path sets this many bits.
const BITS_PER_PATH: u64 = 2;

/// Compute the topological path fingerprint of `molecule` over `nbits` bits.
///
/// A path may revisit an atom (around a small ring) but never a bond, and
/// a path and its reverse count once. Molecules with no bonds produce an
/// all-zero fingerprint.
#[must_use]
pub fn topological(molecule: &Molecule, nbits: usize) -> Fingerprint {
    let mut fp = Fingerprint::zeros(nbits);
    if nbits == 0 {
        return fp;
    }

    let mut codes = HashSet::new();
    let mut bond_used = vec![false; molecule.bond_count()];
    let mut path = Vec::with_capacity(2 * MAX_PATH_BONDS + 1);
    for start in 0..molecule.atom_count() {
        path.push(atom_code(molecule, start));
        extend_path(molecule, start, &mut bond_used, &mut path, &mut codes);
        path.pop();
    }

    for code in codes {
        for seed in 0..BITS_PER_PATH {
            let bit = xxh3_64_with_seed(&code.to_le_bytes(), seed) % nbits as u64;
            fp.set(bit as usize);
        }
    }
    fp
}

/// Depth-first extension of the current path by one unused bond at a time.
/// `path` alternates atom and bond codes, so `path.len() / 2` is the bond
/// count of the path currently on the stack.
fn extend_path(
    molecule: &Molecule,
    atom: usize,
    bond_used: &mut [bool],
    path: &mut Vec<u64>,
    codes: &mut HashSet<u64>,
) {
    for &(neighbor, bond) in molecule.neighbors(atom) {
        if bond_used[bond] {
            continue;
        }
        bond_used[bond] = true;
        path.push(bond_code(molecule, bond));
        path.push(atom_code(molecule, neighbor));

        codes.insert(canonical_code(path));
        if path.len() / 2 < MAX_PATH_BONDS {
            extend_path(molecule, neighbor, bond_used, path, codes);
        }

        path.pop();
        path.pop();
        bond_used[bond] = false;
    }
}

/// Direction-independent code: the smaller of the forward and reverse hashes.
fn canonical_code(path: &[u64]) -> u64 {
    let forward = hash_sequence(path.iter().copied());
    let reverse = hash_sequence(path.iter().rev().copied());
    forward.min(reverse)
}

fn hash_sequence(values: impl Iterator<Item = u64>) -> u64 {
    let mut bytes = Vec::with_capacity(8 * (2 * MAX_PATH_BONDS + 1));
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    xxh3_64(&bytes)
}

fn atom_code(molecule: &Molecule, index: usize) -> u64 {
    let atom = molecule.atom(index);
    (u64::from(atom.element.atomic_number()) << 1) | u64::from(atom.aromatic)
}

fn bond_code(molecule: &Molecule, index: usize) -> u64 {
    u64::from(molecule.bond(index).order.code())
}
