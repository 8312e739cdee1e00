//! Chemical elements and the default-valence table.
//!
//! Covers the elements that occur in drug-like SMILES. The valence table
//! drives the implicit hydrogen model: an organic-subset atom is assumed to
//! fill its lowest default valence that accommodates its bonds.

/// A chemical element, identified by atomic number.
///
/// # Example
///
/// ```rust
/// use mol_embed_chem::Element;
///
/// let carbon = Element::from_symbol("C").unwrap();
/// assert_eq!(carbon.atomic_number(), 6);
/// assert_eq!(carbon.symbol(), "C");
/// assert_eq!(carbon.default_valences(), &[4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element(u8);

/// Symbol table for the supported elements, in atomic-number order.
const SYMBOLS: &[(u8, &str)] = &[
    (1, "H"),
    (5, "B"),
    (6, "C"),
    (7, "N"),
    (8, "O"),
    (9, "F"),
    (11, "Na"),
    (12, "Mg"),
    (14, "Si"),
    (15, "P"),
    (16, "S"),
    (17, "Cl"),
    (19, "K"),
    (20, "Ca"),
    (26, "Fe"),
    (29, "Cu"),
    (30, "Zn"),
    (34, "Se"),
    (35, "Br"),
    (53, "I"),
];

impl Element {
    pub const HYDROGEN: Element = Element(1);
    pub const BORON: Element = Element(5);
    pub const CARBON: Element = Element(6);
    pub const NITROGEN: Element = Element(7);
    pub const OXYGEN: Element = Element(8);
    pub const FLUORINE: Element = Element(9);
    pub const PHOSPHORUS: Element = Element(15);
    pub const SULFUR: Element = Element(16);
    pub const CHLORINE: Element = Element(17);
    pub const SELENIUM: Element = Element(34);
    pub const BROMINE: Element = Element(35);
    pub const IODINE: Element = Element(53);

    /// Look up an element by its symbol (case-sensitive, e.g. `"Cl"`).
    ///
    /// Returns `None` for symbols outside the supported table.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Element> {
        SYMBOLS
            .iter()
            .find(|(_, s)| *s == symbol)
            .map(|&(z, _)| Element(z))
    }

    /// The element's symbol, e.g. `"C"` or `"Br"`.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|(z, _)| *z == self.0)
            .map_or("?", |&(_, s)| s)
    }

    /// The atomic number.
    #[must_use]
    pub const fn atomic_number(&self) -> u8 {
        self.0
    }

    /// Whether this element may be written as an aromatic (lowercase) atom.
    #[must_use]
    pub const fn can_be_aromatic(&self) -> bool {
        matches!(self.0, 5 | 6 | 7 | 8 | 15 | 16 | 34)
    }

    /// Whether this element is a halogen.
    #[must_use]
    pub const fn is_halogen(&self) -> bool {
        matches!(self.0, 9 | 17 | 35 | 53)
    }

    /// Default valences in ascending order, used by the implicit hydrogen
    /// model. Elements without implicit hydrogens (metals, and anything
    /// outside the organic subset) return an empty slice.
    #[must_use]
    pub const fn default_valences(&self) -> &'static [u8] {
        match self.0 {
            1 => &[1],           // H
            5 => &[3],           // B
            6 => &[4],           // C
            7 => &[3, 5],        // N
            8 => &[2],           // O
            9 | 17 | 35 | 53 => &[1], // halogens
            14 => &[4],          // Si
            15 => &[3, 5],       // P
            16 | 34 => &[2, 4, 6], // S, Se
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_round_trip() {
        for &(z, symbol) in SYMBOLS {
            let element = Element::from_symbol(symbol).expect("symbol in table");
            assert_eq!(element.atomic_number(), z);
            assert_eq!(element.symbol(), symbol);
        }
    }

    #[test]
    fn unknown_symbol_is_none() {
        assert!(Element::from_symbol("Xx").is_none());
        assert!(Element::from_symbol("").is_none());
        assert!(Element::from_symbol("c").is_none(), "lookup is case-sensitive");
    }

    #[test]
    fn valence_table() {
        assert_eq!(Element::CARBON.default_valences(), &[4]);
        assert_eq!(Element::NITROGEN.default_valences(), &[3, 5]);
        assert_eq!(Element::SULFUR.default_valences(), &[2, 4, 6]);
        assert_eq!(Element::CHLORINE.default_valences(), &[1]);
        assert!(Element::from_symbol("Fe").unwrap().default_valences().is_empty());
    }

    #[test]
    fn aromatic_subset() {
        assert!(Element::CARBON.can_be_aromatic());
        assert!(Element::NITROGEN.can_be_aromatic());
        assert!(!Element::CHLORINE.can_be_aromatic());
        assert!(!Element::HYDROGEN.can_be_aromatic());
    }

    #[test]
    fn halogens() {
        assert!(Element::FLUORINE.is_halogen());
        assert!(Element::IODINE.is_halogen());
        assert!(!Element::SULFUR.is_halogen());
    }
}
