//! SMILES parser.
//!
//! Parses the organic subset, bracket atoms, ring closures, branches, and
//! fragment separators into a [`Molecule`]. Stereo markers (`/`, `\`, `@`)
//! and atom class labels are accepted and discarded; the embedding strategies
//! downstream are constitution-only.
//!
//! Malformed input always fails with a specific [`ParseError`]. Callers use
//! that to partition rows into parsed and rejected sets, so a string like
//! `"garbage!"` must never slip through as a molecule.

use std::collections::HashMap;

use crate::element::Element;
use crate::error::{ParseError, ParseResult};
use crate::molecule::{Atom, Bond, BondOrder, Molecule};


/// Parse a SMILES string into a molecule graph.
///
/// # Arguments
/// * `input` - SMILES notation, e.g. `"CC(=O)Oc1ccccc1C(=O)O"`
///
/// # Errors
/// Any [`ParseError`] variant for malformed input; see the error docs.
///
/// # Example
///
/// ```rust
/// use mol_embed_chem::parse_smiles;
///
/// let ethanol = parse_smiles("CCO").unwrap();
/// assert_eq!(ethanol.atom_count(), 3);
/// assert!(parse_smiles("not smiles").is_err());
/// ```
pub fn parse_smiles(input: &str) -> ParseResult<Molecule> {
    Parser::new(input).run()
}

/// A ring-closure digit waiting for its partner.
struct RingOpen {
    atom: usize,
    order: Option<BondOrder>,
}

/// An open `(` branch: the atom to return to and bookkeeping for errors.
struct BranchOpen {
    atom: usize,
    position: usize,
    atom_count: usize,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Atom the next bond attaches to.
    prev: Option<usize>,
    branch_stack: Vec<BranchOpen>,
    /// Bond symbol seen but not yet consumed by an atom or ring closure.
    pending_bond: Option<BondOrder>,
    pending_pos: usize,
    ring_open: HashMap<u16, RingOpen>,
    /// A `.` was seen and no atom has followed it yet.
    after_dot: bool,
    dot_pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            prev: None,
            branch_stack: Vec::new(),
            pending_bond: None,
            pending_pos: 0,
            ring_open: HashMap::new(),
            after_dot: false,
            dot_pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn run(mut self) -> ParseResult<Molecule> {
        while let Some(c) = self.peek() {
            let position = self.pos;
            match c {
                'A'..='Z' => {
                    self.bump();
                    self.organic_atom(c, position)?;
                }
                '[' => self.bracket_atom()?,
                '0'..='9' => {
                    self.bump();
                    self.ring_closure(u16::from(c as u8 - b'0'), position)?;
                }
                '%' => self.percent_closure()?,
                '-' => {
                    self.bump();
                    self.bond_symbol(BondOrder::Single, position)?;
                }
                '=' => {
                    self.bump();
                    self.bond_symbol(BondOrder::Double, position)?;
                }
                '#' => {
                    self.bump();
                    self.bond_symbol(BondOrder::Triple, position)?;
                }
                ':' => {
                    self.bump();
                    self.bond_symbol(BondOrder::Aromatic, position)?;
                }
                // Stereo bond markers read as plain single bonds.
                '/' | '\\' => {
                    self.bump();
                    self.bond_symbol(BondOrder::Single, position)?;
                }
                '(' => {
                    self.bump();
                    self.open_branch(position)?;
                }
                ')' => {
                    self.bump();
                    self.close_branch(position)?;
                }
                '.' => {
                    self.bump();
                    self.dot(position)?;
                }
                c if c.is_ascii_lowercase() => match aromatic_element(c) {
                    Some(element) => {
                        self.bump();
                        self.add_atom(Atom::organic(element, true));
                    }
                    None => {
                        return Err(ParseError::UnknownElement {
                            symbol: c.to_string(),
                            position,
                        })
                    }
                },
                other => {
                    return Err(ParseError::UnexpectedChar {
                        ch: other,
                        position,
                    })
                }
            }
        }
        self.finish()
    }

    /// An organic-subset atom written without brackets. Two-letter symbols
    /// (`Cl`, `Br`) are resolved before their one-letter prefixes.
    fn organic_atom(&mut self, first: char, position: usize) -> ParseResult<()> {
        let element = match first {
            'B' if self.peek() == Some('r') => {
                self.bump();
                Element::BROMINE
            }
            'B' => Element::BORON,
            'C' if self.peek() == Some('l') => {
                self.bump();
                Element::CHLORINE
            }
            'C' => Element::CARBON,
            'N' => Element::NITROGEN,
            'O' => Element::OXYGEN,
            'P' => Element::PHOSPHORUS,
            'S' => Element::SULFUR,
            'F' => Element::FLUORINE,
            'I' => Element::IODINE,
            _ => {
                let mut symbol = first.to_string();
                if let Some(c2) = self.peek() {
                    if c2.is_ascii_lowercase() {
                        symbol.push(c2);
                    }
                }
                return Err(ParseError::UnknownElement { symbol, position });
            }
        };
        self.add_atom(Atom::organic(element, false));
        Ok(())
    }

    /// A `[...]` bracket atom: `[isotope? symbol chirality? Hcount? charge? class?]`.
    fn bracket_atom(&mut self) -> ParseResult<()> {
        let open = self.pos;
        self.bump();

        let isotope = self.bracket_digits(3).map(|n| n as u16);
        let (element, aromatic) = self.bracket_element(open)?;

        // Chirality markers are accepted and discarded.
        while self.peek() == Some('@') {
            self.bump();
        }

        let hydrogens = if self.peek() == Some('H') {
            self.bump();
            self.bracket_digits(2).unwrap_or(1) as u8
        } else {
            0
        };

        let charge = self.bracket_charge();

        if self.peek() == Some(':') {
            let colon = self.pos;
            self.bump();
            if self.bracket_digits(4).is_none() {
                return Err(ParseError::UnexpectedChar {
                    ch: ':',
                    position: colon,
                });
            }
        }

        match self.peek() {
            Some(']') => {
                self.bump();
            }
            Some(c) => {
                return Err(ParseError::UnexpectedChar {
                    ch: c,
                    position: self.pos,
                })
            }
            None => return Err(ParseError::UnclosedBracket { position: open }),
        }

        self.add_atom(Atom {
            element,
            aromatic,
            charge,
            isotope,
            explicit_hydrogens: Some(hydrogens),
            in_ring: false,
        });
        Ok(())
    }

    fn bracket_element(&mut self, open: usize) -> ParseResult<(Element, bool)> {
        let position = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_uppercase() => {
                self.bump();
                if let Some(c2) = self.peek() {
                    if c2.is_ascii_lowercase() {
                        let two: String = [c, c2].iter().collect();
                        if let Some(element) = Element::from_symbol(&two) {
                            self.bump();
                            return Ok((element, false));
                        }
                    }
                }
                match Element::from_symbol(c.to_string().as_str()) {
                    Some(element) => Ok((element, false)),
                    None => Err(ParseError::UnknownElement {
                        symbol: c.to_string(),
                        position,
                    }),
                }
            }
            Some('s') if self.peek_at(1) == Some('e') => {
                self.bump();
                self.bump();
                Ok((Element::SELENIUM, true))
            }
            Some(c) if c.is_ascii_lowercase() => match aromatic_element(c) {
                Some(element) => {
                    self.bump();
                    Ok((element, true))
                }
                None => Err(ParseError::UnknownElement {
                    symbol: c.to_string(),
                    position,
                }),
            },
            Some(c) => Err(ParseError::UnexpectedChar { ch: c, position }),
            None => Err(ParseError::UnclosedBracket { position: open }),
        }
    }

    /// Up to `max_digits` decimal digits; `None` when no digit is present.
    fn bracket_digits(&mut self, max_digits: usize) -> Option<u32> {
        let mut value: u32 = 0;
        let mut any = false;
        for _ in 0..max_digits {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.bump();
                    value = value * 10 + u32::from(c as u8 - b'0');
                    any = true;
                }
                _ => break,
            }
        }
        any.then_some(value)
    }

    /// `+`/`-` charge, either with a digit (`+2`) or repeated (`--`).
    fn bracket_charge(&mut self) -> i8 {
        let sign: i8 = match self.peek() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return 0,
        };
        self.bump();
        if let Some(n) = self.bracket_digits(2) {
            return sign * (n.min(15) as i8);
        }
        let repeat = if sign > 0 { '+' } else { '-' };
        let mut magnitude: i8 = 1;
        while magnitude < 15 && self.peek() == Some(repeat) {
            self.bump();
            magnitude += 1;
        }
        sign * magnitude
    }

    fn bond_symbol(&mut self, order: BondOrder, position: usize) -> ParseResult<()> {
        if self.prev.is_none() || self.pending_bond.is_some() {
            return Err(ParseError::DanglingBond { position });
        }
        self.pending_bond = Some(order);
        self.pending_pos = position;
        Ok(())
    }

    fn open_branch(&mut self, position: usize) -> ParseResult<()> {
        if self.pending_bond.is_some() {
            return Err(ParseError::DanglingBond {
                position: self.pending_pos,
            });
        }
        match self.prev {
            Some(atom) => {
                self.branch_stack.push(BranchOpen {
                    atom,
                    position,
                    atom_count: self.atoms.len(),
                });
                Ok(())
            }
            None => Err(ParseError::UnbalancedParen { position }),
        }
    }

    fn close_branch(&mut self, position: usize) -> ParseResult<()> {
        if self.pending_bond.is_some() {
            return Err(ParseError::DanglingBond {
                position: self.pending_pos,
            });
        }
        match self.branch_stack.pop() {
            Some(open) => {
                if self.atoms.len() == open.atom_count {
                    // Empty branch: "C()".
                    return Err(ParseError::UnbalancedParen { position });
                }
                self.prev = Some(open.atom);
                Ok(())
            }
            None => Err(ParseError::UnbalancedParen { position }),
        }
    }

    fn dot(&mut self, position: usize) -> ParseResult<()> {
        if self.pending_bond.is_some() {
            return Err(ParseError::DanglingBond {
                position: self.pending_pos,
            });
        }
        if self.prev.is_none() || !self.branch_stack.is_empty() {
            return Err(ParseError::LoneDot { position });
        }
        self.prev = None;
        self.after_dot = true;
        self.dot_pos = position;
        Ok(())
    }

    fn ring_closure(&mut self, digit: u16, position: usize) -> ParseResult<()> {
        let Some(current) = self.prev else {
            return Err(ParseError::RingClosureInvalid { digit, position });
        };
        let order = self.pending_bond.take();
        match self.ring_open.remove(&digit) {
            None => {
                self.ring_open.insert(digit, RingOpen { atom: current, order });
                Ok(())
            }
            Some(open) => {
                if open.atom == current || self.bonded(open.atom, current) {
                    return Err(ParseError::RingClosureInvalid { digit, position });
                }
                let resolved = match (open.order, order) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(ParseError::RingClosureInvalid { digit, position })
                    }
                    (a, b) => a.or(b),
                };
                self.push_bond(open.atom, current, resolved);
                Ok(())
            }
        }
    }

    fn percent_closure(&mut self) -> ParseResult<()> {
        let position = self.pos;
        self.bump();
        let mut number: u16 = 0;
        for _ in 0..2 {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.bump();
                    number = number * 10 + u16::from(c as u8 - b'0');
                }
                Some(c) => {
                    return Err(ParseError::UnexpectedChar {
                        ch: c,
                        position: self.pos,
                    })
                }
                None => return Err(ParseError::UnexpectedChar { ch: '%', position }),
            }
        }
        self.ring_closure(number, position)
    }

    fn add_atom(&mut self, atom: Atom) {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        if let Some(prev) = self.prev {
            let order = self.pending_bond.take();
            self.push_bond(prev, idx, order);
        }
        self.prev = Some(idx);
        self.after_dot = false;
    }

    /// Create a bond, defaulting to aromatic between two aromatic atoms and
    /// single otherwise.
    fn push_bond(&mut self, a: usize, b: usize, order: Option<BondOrder>) {
        let order = order.unwrap_or_else(|| {
            if self.atoms[a].aromatic && self.atoms[b].aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            }
        });
        self.bonds.push(Bond {
            a,
            b,
            order,
            in_ring: false,
        });
    }

    fn bonded(&self, a: usize, b: usize) -> bool {
        self.bonds
            .iter()
            .any(|bond| (bond.a == a && bond.b == b) || (bond.a == b && bond.b == a))
    }

    fn finish(self) -> ParseResult<Molecule> {
        if self.atoms.is_empty() {
            return Err(ParseError::Empty);
        }
        if self.pending_bond.is_some() {
            return Err(ParseError::DanglingBond {
                position: self.pending_pos,
            });
        }
        if self.after_dot {
            return Err(ParseError::LoneDot {
                position: self.dot_pos,
            });
        }
        if let Some(open) = self.branch_stack.last() {
            return Err(ParseError::UnbalancedParen {
                position: open.position,
            });
        }
        if let Some(&digit) = self.ring_open.keys().min() {
            return Err(ParseError::UnclosedRing { digit });
        }
        Ok(Molecule::from_parts(self.atoms, self.bonds))
    }
}

/// Elements allowed as bare lowercase aromatic atoms.
fn aromatic_element(c: char) -> Option<Element> {
    match c {
        'b' => Some(Element::BORON),
        'c' => Some(Element::CARBON),
        'n' => Some(Element::NITROGEN),
        'o' => Some(Element::OXYGEN),
        'p' => Some(Element::PHOSPHORUS),
        's' => Some(Element::SULFUR),
        _ => None,
    }
}
