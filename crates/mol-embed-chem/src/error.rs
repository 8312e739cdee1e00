//! Error type for SMILES parsing.
//!
//! Every malformed SMILES string must fail with a specific variant so callers
//! can partition inputs into parsed and rejected rows. Nothing in this crate
//! degrades silently.

use thiserror::Error;

/// Errors produced while parsing a SMILES string.
///
/// Positions are character offsets into the input string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input contained no atoms.
    #[error("empty SMILES string")]
    Empty,

    /// A symbol that is not a known element (or allowed aromatic atom).
    #[error("unknown element '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },

    /// A character with no meaning in the grammar.
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    /// A `[` bracket atom that never reached its closing `]`.
    #[error("unclosed bracket atom starting at position {position}")]
    UnclosedBracket { position: usize },

    /// A `(` without matching `)`, a `)` without matching `(`, or a branch
    /// opened before any atom.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParen { position: usize },

    /// A ring-closure digit that was opened but never closed.
    #[error("ring closure {digit} opened but never closed")]
    UnclosedRing { digit: u16 },

    /// A ring closure that cannot form a bond: no preceding atom, a
    /// self-bond, a duplicate bond, or conflicting bond symbols at the
    /// two ends.
    #[error("invalid ring closure {digit} at position {position}")]
    RingClosureInvalid { digit: u16, position: usize },

    /// A bond symbol with no atom to attach to.
    #[error("bond at position {position} has no atom to attach to")]
    DanglingBond { position: usize },

    /// A `.` separator that splits off an empty fragment.
    #[error("dot separator at position {position} splits an empty fragment")]
    LoneDot { position: usize },
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
