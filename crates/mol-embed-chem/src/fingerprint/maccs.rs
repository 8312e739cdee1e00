//! MACCS structural key fingerprint.
//!
//! Fixed 167-bit layout: bit 0 is reserved and always clear, bits 1..=166
//! are structural keys. This implements the subset of keys decidable from
//! the molecule graph alone (element presence, hydrogen environment, ring
//! and fragment structure); keys needing full substructure matching stay
//! clear. Implemented keys:
//!
//! | bit | feature                         |
//! |-----|---------------------------------|
//! | 1   | isotope-labeled atom            |
//! | 67  | aliphatic carbon                |
//! | 84  | amine nitrogen with two or more hydrogens |
//! | 85  | ring atom                       |
//! | 99  | aliphatic carbon-carbon double bond |
//! | 109 | oxygen bearing a hydrogen       |
//! | 118 | oxygen without hydrogens        |
//! | 125 | more than one ring              |
//! | 134 | halogen                         |
//! | 135 | nitrogen                        |
//! | 144 | fluorine                        |
//! | 145 | chlorine                        |
//! | 146 | bromine                         |
//! | 147 | iodine                          |
//! | 148 | sulfur                          |
//! | 160 | aromatic carbon                 |
//! | 166 | more than one fragment          |

use super::Fingerprint;
use crate::element::Element;
use crate::molecule::{BondOrder, Molecule};

/// Fingerprint width: reserved bit 0 plus keys 1..=166.
pub const MACCS_BITS: usize = 167;

const KEY_ISOTOPE: usize = 1;
const KEY_ALIPHATIC_CARBON: usize = 67;
const KEY_PRIMARY_AMINE: usize = 84;
const KEY_RING_ATOM: usize = 85;
const KEY_ALIPHATIC_DOUBLE_BOND: usize = 99;
const KEY_HYDROXYL: usize = 109;
const KEY_BARE_OXYGEN: usize = 118;
const KEY_MULTIPLE_RINGS: usize = 125;
const KEY_HALOGEN: usize = 134;
const KEY_NITROGEN: usize = 135;
const KEY_FLUORINE: usize = 144;
const KEY_CHLORINE: usize = 145;
const KEY_BROMINE: usize = 146;
const KEY_IODINE: usize = 147;
const KEY_SULFUR: usize = 148;
const KEY_AROMATIC_CARBON: usize = 160;
const KEY_MULTIPLE_FRAGMENTS: usize = 166;

/// Compute the MACCS key fingerprint of `molecule`.
///
/// Always [`MACCS_BITS`] wide regardless of configuration; the circular and
/// topological families are the ones with a configurable width.
#[must_use]
pub fn maccs(molecule: &Molecule) -> Fingerprint {
    let mut fp = Fingerprint::zeros(MACCS_BITS);

    for index in 0..molecule.atom_count() {
        let atom = molecule.atom(index);
        if atom.isotope.is_some() {
            fp.set(KEY_ISOTOPE);
        }
        if atom.in_ring {
            fp.set(KEY_RING_ATOM);
        }
        if atom.element.is_halogen() {
            fp.set(KEY_HALOGEN);
        }
        match atom.element {
            Element::CARBON => {
                if atom.aromatic {
                    fp.set(KEY_AROMATIC_CARBON);
                } else {
                    fp.set(KEY_ALIPHATIC_CARBON);
                }
            }
            Element::NITROGEN => {
                fp.set(KEY_NITROGEN);
                if molecule.hydrogen_count(index) >= 2 {
                    fp.set(KEY_PRIMARY_AMINE);
                }
            }
            Element::OXYGEN => {
                if molecule.hydrogen_count(index) > 0 {
                    fp.set(KEY_HYDROXYL);
                } else {
                    fp.set(KEY_BARE_OXYGEN);
                }
            }
            Element::FLUORINE => fp.set(KEY_FLUORINE),
            Element::CHLORINE => fp.set(KEY_CHLORINE),
            Element::BROMINE => fp.set(KEY_BROMINE),
            Element::IODINE => fp.set(KEY_IODINE),
            Element::SULFUR => fp.set(KEY_SULFUR),
            _ => {}
        }
    }

    for bond in molecule.bonds() {
        let carbons = molecule.atom(bond.a).element == Element::CARBON
            && molecule.atom(bond.b).element == Element::CARBON;
        let aromatic = molecule.atom(bond.a).aromatic || molecule.atom(bond.b).aromatic;
        if bond.order == BondOrder::Double && carbons && !aromatic {
            fp.set(KEY_ALIPHATIC_DOUBLE_BOND);
        }
    }

    if molecule.ring_count() > 1 {
        fp.set(KEY_MULTIPLE_RINGS);
    }
    if molecule.component_count() > 1 {
        fp.set(KEY_MULTIPLE_FRAGMENTS);
    }
    fp
}
