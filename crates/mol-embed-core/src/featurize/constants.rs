//! The fixed SMILES alphabet and sizing constants.

/// Number of symbols in the one-hot alphabet.
pub const CHARSET_SIZE: usize = 35;

/// Canonical encoded length: shorter strings are right-padded with spaces,
/// longer ones truncated. The encoder's input layer is sized to this.
pub const MAX_SMILES_LEN: usize = 120;

/// The one-hot alphabet, ascending by code point.
///
/// Position in this array is the column index of the symbol: the padding
/// space is column 0, `'C'` is column 18. The ordering is part of the
/// trained encoder's input contract and must never change.
pub const SMILES_CHARSET: [char; CHARSET_SIZE] = [
    ' ', '#', '(', ')', '+', '-', '/', '1', '2', '3', '4', '5', '6', '7', '8', '=', '@', 'B',
    'C', 'F', 'H', 'I', 'N', 'O', 'P', 'S', '[', '\\', ']', 'c', 'l', 'n', 'o', 'r', 's',
];

/// Column index of `c` in the alphabet, or `None` for characters outside it.
///
/// The array is sorted, so a binary search is exactly the table lookup.
#[must_use]
pub fn charset_index(c: char) -> Option<usize> {
    SMILES_CHARSET.binary_search(&c).ok()
}
