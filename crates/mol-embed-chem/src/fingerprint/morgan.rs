//! Morgan (circular / ECFP-style) fingerprint.
//!
//! Each atom starts from an invariant hash of its local properties. Every
//! round folds the sorted neighbor identifiers into a new identifier, so the
//! identifier after round `r` describes the substructure within `r` bonds.
//! Identifiers from every round, the initial one included, set bits.

use xxhash_rust::xxh3::xxh3_64;

use super::Fingerprint;
use crate::molecule::Molecule;

/// Compute the Morgan fingerprint of `molecule` with the given `radius`
/// over `nbits` bits.
///
/// Radius 0 hashes only the per-atom invariants. Duplicate identifiers
/// across atoms or rounds land on the same bits, which is the intended
/// folding behavior.
#[must_use]
pub fn morgan(molecule: &Molecule, radius: u32, nbits: usize) -> Fingerprint {
    let mut fp = Fingerprint::zeros(nbits);
    if nbits == 0 || molecule.atom_count() == 0 {
        return fp;
    }

    let mut ids: Vec<u64> = (0..molecule.atom_count())
        .map(|atom| initial_invariant(molecule, atom))
        .collect();
    set_bits(&mut fp, &ids, nbits);

    for _ in 0..radius {
        let mut next = Vec::with_capacity(ids.len());
        for atom in 0..molecule.atom_count() {
            let mut environment: Vec<(u8, u64)> = molecule
                .neighbors(atom)
                .iter()
                .map(|&(neighbor, bond)| (molecule.bond(bond).order.code(), ids[neighbor]))
                .collect();
            // Sorting makes the fold independent of neighbor order.
            environment.sort_unstable();

            let mut bytes = Vec::with_capacity(8 + environment.len() * 9);
            bytes.extend_from_slice(&ids[atom].to_le_bytes());
            for (order, id) in environment {
                bytes.push(order);
                bytes.extend_from_slice(&id.to_le_bytes());
            }
            next.push(xxh3_64(&bytes));
        }
        ids = next;
        set_bits(&mut fp, &ids, nbits);
    }
    fp
}

/// Round-zero atom identifier: element, connectivity, hydrogen count,
/// charge, aromaticity, and ring membership.
fn initial_invariant(molecule: &Molecule, atom: usize) -> u64 {
    let a = molecule.atom(atom);
    let bytes = [
        a.element.atomic_number(),
        molecule.degree(atom) as u8,
        molecule.hydrogen_count(atom) as u8,
        a.charge as u8,
        u8::from(a.aromatic),
        u8::from(a.in_ring),
    ];
    xxh3_64(&bytes)
}

fn set_bits(fp: &mut Fingerprint, ids: &[u64], nbits: usize) {
    for &id in ids {
        fp.set((id % nbits as u64) as usize);
    }
}
