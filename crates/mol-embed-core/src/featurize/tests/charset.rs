use crate::featurize::{charset_index, CHARSET_SIZE, SMILES_CHARSET};

#[test]
fn alphabet_has_the_pinned_size() {
    assert_eq!(SMILES_CHARSET.len(), 35);
    assert_eq!(SMILES_CHARSET.len(), CHARSET_SIZE);
}

#[test]
fn pinned_positions() {
    // These indices are baked into trained weight bundles.
    assert_eq!(SMILES_CHARSET[0], ' ');
    assert_eq!(SMILES_CHARSET[18], 'C');
    assert_eq!(SMILES_CHARSET[34], 's');
    assert_eq!(charset_index(' '), Some(0));
    assert_eq!(charset_index('C'), Some(18));
    assert_eq!(charset_index('s'), Some(34));
}

#[test]
fn alphabet_is_strictly_ascending() {
    // Binary search is only the table lookup because of this ordering.
    assert!(SMILES_CHARSET.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn lookup_agrees_with_position_for_every_symbol() {
    for (index, &c) in SMILES_CHARSET.iter().enumerate() {
        assert_eq!(charset_index(c), Some(index), "symbol {c:?}");
    }
}

#[test]
fn characters_outside_the_alphabet_have_no_index() {
    // '9' and '0' are genuinely absent: the alphabet carries digits 1-8 only.
    for c in ['x', 'X', 'g', '%', '9', '0', '.', '*', 'é'] {
        assert_eq!(charset_index(c), None, "character {c:?}");
    }
}
