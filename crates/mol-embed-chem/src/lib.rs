//! Chemistry support for the molecule embedding pipeline.
//!
//! This crate turns SMILES strings into molecule graphs and computes the
//! structural fingerprints the embedding strategies are built on. It is pure
//! CPU code with no model weights involved.
//!
//! # Architecture
//!
//! - **Element**: atomic numbers, symbols, and the default-valence table
//! - **Molecule**: atom/bond graph with ring perception and an implicit
//!   hydrogen model
//! - **parse_smiles**: SMILES grammar to `Molecule`, with loud errors for
//!   malformed input
//! - **fingerprint**: topological path, Morgan (circular), and MACCS key
//!   fingerprints over the molecule graph
//!
//! # Example
//!
//! ```rust
//! use mol_embed_chem::{parse_smiles, fingerprint};
//!
//! let benzene = parse_smiles("c1ccccc1").expect("valid SMILES");
//! assert_eq!(benzene.atom_count(), 6);
//! assert_eq!(benzene.ring_count(), 1);
//!
//! let fp = fingerprint::morgan(&benzene, 2, 2048);
//! assert!(fp.count_ones() > 0);
//! ```

pub mod element;
pub mod error;
pub mod fingerprint;
pub mod molecule;
pub mod parser;

pub use element::Element;
pub use error::{ParseError, ParseResult};
pub use fingerprint::Fingerprint;
pub use molecule::{Atom, Bond, BondOrder, Molecule};
pub use parser::parse_smiles;
