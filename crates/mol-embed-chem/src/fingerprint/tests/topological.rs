use super::mol;
use crate::fingerprint::topological;

#[test]
fn deterministic_across_calls() {
    let a = topological(&mol("CC(=O)Oc1ccccc1C(=O)O"), 2048);
    let b = topological(&mol("CC(=O)Oc1ccccc1C(=O)O"), 2048);
    assert_eq!(a, b);
}

#[test]
fn respects_requested_width() {
    let fp = topological(&mol("CCO"), 512);
    assert_eq!(fp.len(), 512);
    assert!(fp.iter_ones().all(|bit| bit < 512));
}

#[test]
fn single_atom_has_no_paths() {
    let fp = topological(&mol("C"), 2048);
    assert_eq!(fp.count_ones(), 0);
}

#[test]
fn direction_of_writing_does_not_matter() {
    // Same graph entered from either end hashes to the same path set.
    assert_eq!(topological(&mol("CCO"), 2048), topological(&mol("OCC"), 2048));
    assert_eq!(
        topological(&mol("ClCCBr"), 2048),
        topological(&mol("BrCCCl"), 2048)
    );
}

#[test]
fn substructure_paths_are_a_subset() {
    // Every path in butane also occurs in pentane.
    let butane = topological(&mol("CCCC"), 2048);
    let pentane = topological(&mol("CCCCC"), 2048);
    assert!(butane.iter_ones().all(|bit| pentane.get(bit)));
    assert!(pentane.count_ones() > butane.count_ones());
}

#[test]
fn distinguishes_ring_from_chain() {
    let cyclohexane = topological(&mol("C1CCCCC1"), 2048);
    let hexane = topological(&mol("CCCCCC"), 2048);
    assert_ne!(cyclohexane, hexane);
}

#[test]
fn distinguishes_bond_orders() {
    assert_ne!(topological(&mol("CCC"), 2048), topological(&mol("C=CC"), 2048));
}

#[test]
fn aromatic_and_kekule_forms_differ() {
    // Atom and bond codes both carry aromaticity, so the two encodings of
    // benzene are distinct inputs.
    assert_ne!(
        topological(&mol("c1ccccc1"), 2048),
        topological(&mol("C1=CC=CC=C1"), 2048)
    );
}
