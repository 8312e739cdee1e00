//! Molecule graph: atoms, bonds, adjacency, and derived structure.
//!
//! A `Molecule` is immutable once built. Construction computes the adjacency
//! list, runs ring perception (bridge detection), and counts connected
//! components, so downstream code can query rings and implicit hydrogens
//! without re-deriving anything.

use crate::element::Element;

/// Bond order between two atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Numeric bond order used by the valence model. Aromatic bonds count
    /// as 1.5, matching the usual Kekule-free treatment.
    #[must_use]
    pub const fn value(&self) -> f32 {
        match self {
            Self::Single => 1.0,
            Self::Double => 2.0,
            Self::Triple => 3.0,
            Self::Aromatic => 1.5,
        }
    }

    /// Stable one-byte code for hashing into fingerprints.
    #[must_use]
    pub(crate) const fn code(&self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Aromatic => 4,
        }
    }
}

/// A single atom in the molecule graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub element: Element,
    /// Written lowercase in SMILES, part of an aromatic system.
    pub aromatic: bool,
    /// Formal charge.
    pub charge: i8,
    /// Isotope label from a bracket atom, e.g. the 2 in `[2H]`.
    pub isotope: Option<u16>,
    /// Hydrogen count when the atom was written in brackets. Bracket atoms
    /// state their hydrogens exactly; `None` means the count comes from the
    /// valence model.
    pub explicit_hydrogens: Option<u8>,
    /// Set by ring perception during construction.
    pub in_ring: bool,
}

impl Atom {
    /// An organic-subset atom: neutral, hydrogens implied by valence.
    #[must_use]
    pub fn organic(element: Element, aromatic: bool) -> Self {
        Self {
            element,
            aromatic,
            charge: 0,
            isotope: None,
            explicit_hydrogens: None,
            in_ring: false,
        }
    }
}

/// A bond between atoms `a` and `b` (indices into the molecule's atom list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
    /// Set by ring perception during construction.
    pub in_ring: bool,
}

/// An immutable molecule graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Per-atom list of `(neighbor atom index, bond index)`.
    adjacency: Vec<Vec<(usize, usize)>>,
    components: usize,
}

impl Molecule {
    /// Build a molecule from parsed atoms and bonds.
    ///
    /// Computes adjacency, marks ring atoms and bonds, and counts connected
    /// components. Bond endpoints must be valid atom indices.
    #[must_use]
    pub fn from_parts(mut atoms: Vec<Atom>, mut bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (idx, bond) in bonds.iter().enumerate() {
            adjacency[bond.a].push((bond.b, idx));
            adjacency[bond.b].push((bond.a, idx));
        }

        let (ring_bond, components) = perceive_rings(atoms.len(), bonds.len(), &adjacency);
        for (bond, in_ring) in bonds.iter_mut().zip(&ring_bond) {
            bond.in_ring = *in_ring;
        }
        for (idx, atom) in atoms.iter_mut().enumerate() {
            atom.in_ring = adjacency[idx].iter().any(|&(_, bond)| ring_bond[bond]);
        }

        Self {
            atoms,
            bonds,
            adjacency,
            components,
        }
    }

    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[must_use]
    pub fn atom(&self, idx: usize) -> &Atom {
        &self.atoms[idx]
    }

    #[must_use]
    pub fn bond(&self, idx: usize) -> &Bond {
        &self.bonds[idx]
    }

    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Neighbors of an atom as `(neighbor atom index, bond index)` pairs.
    #[must_use]
    pub fn neighbors(&self, idx: usize) -> &[(usize, usize)] {
        &self.adjacency[idx]
    }

    /// Number of explicit bonds incident to an atom.
    #[must_use]
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    /// Number of connected components (fragments).
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Sum of bond orders incident to an atom, with aromatic bonds as 1.5.
    #[must_use]
    pub fn bond_order_sum(&self, idx: usize) -> f32 {
        self.adjacency[idx]
            .iter()
            .map(|&(_, bond)| self.bonds[bond].order.value())
            .sum()
    }

    /// Hydrogen count for an atom.
    ///
    /// Bracket atoms state their hydrogens exactly. For organic-subset atoms
    /// the count fills the lowest default valence (adjusted for charge) that
    /// accommodates the rounded bond-order sum. Aromatic heteroatoms carry no
    /// implicit hydrogens; SMILES requires them in brackets (`[nH]`) when a
    /// hydrogen is present.
    #[must_use]
    pub fn hydrogen_count(&self, idx: usize) -> usize {
        let atom = &self.atoms[idx];
        if let Some(h) = atom.explicit_hydrogens {
            return h as usize;
        }
        if atom.aromatic && atom.element != Element::CARBON {
            return 0;
        }
        let bonded = self.bond_order_sum(idx).ceil() as i32;
        for &valence in atom.element.default_valences() {
            let target = i32::from(valence) + i32::from(atom.charge);
            if target >= bonded {
                return (target - bonded) as usize;
            }
        }
        0
    }

    /// Number of bonds that lie on at least one ring.
    #[must_use]
    pub fn ring_bond_count(&self) -> usize {
        self.bonds.iter().filter(|b| b.in_ring).count()
    }

    /// Number of independent rings (the cyclomatic number
    /// `bonds - atoms + components`).
    #[must_use]
    pub fn ring_count(&self) -> usize {
        (self.bonds.len() + self.components).saturating_sub(self.atoms.len())
    }
}

/// Mark ring bonds via bridge detection and count connected components.
///
/// An edge of an undirected graph lies on a cycle exactly when it is not a
/// bridge, so a DFS low-link pass classifies every bond in one sweep. The
/// DFS is iterative; molecule chains can be long relative to the stack.
fn perceive_rings(
    atom_count: usize,
    bond_count: usize,
    adjacency: &[Vec<(usize, usize)>],
) -> (Vec<bool>, usize) {
    let mut ring_bond = vec![false; bond_count];

    const UNDISCOVERED: usize = usize::MAX;
    let mut disc = vec![UNDISCOVERED; atom_count];
    let mut low = vec![0usize; atom_count];
    let mut timer = 0usize;
    let mut components = 0usize;

    // DFS frames: (node, bond used to enter, cursor into adjacency[node]).
    let mut stack: Vec<(usize, Option<usize>, usize)> = Vec::new();

    for root in 0..atom_count {
        if disc[root] != UNDISCOVERED {
            continue;
        }
        components += 1;
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        stack.push((root, None, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, entering) = (frame.0, frame.1);
            let next_edge = adjacency[node].get(frame.2).copied();
            if next_edge.is_some() {
                frame.2 += 1;
            }

            match next_edge {
                Some((next, via)) => {
                    if Some(via) == entering {
                        continue;
                    }
                    if disc[next] == UNDISCOVERED {
                        disc[next] = timer;
                        low[next] = timer;
                        timer += 1;
                        stack.push((next, Some(via), 0));
                    } else {
                        // Back edge: always part of a cycle.
                        low[node] = low[node].min(disc[next]);
                        ring_bond[via] = true;
                    }
                }
                None => {
                    stack.pop();
                    if let Some(&(parent, _, _)) = stack.last() {
                        low[parent] = low[parent].min(low[node]);
                        if let Some(via) = entering {
                            // Tree edge on a cycle unless it is a bridge.
                            if low[node] <= disc[parent] {
                                ring_bond[via] = true;
                            }
                        }
                    }
                }
            }
        }
    }

    (ring_bond, components)
}
