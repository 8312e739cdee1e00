mod topological;

use crate::molecule::Molecule;
use crate::parser::parse_smiles;

fn mol(smiles: &str) -> Molecule {
    parse_smiles(smiles).unwrap_or_else(|e| panic!("failed to parse {smiles}: {e}"))
}
