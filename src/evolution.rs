//! Evolution stage of a pokemon within its chain.

use crate::errors::{DexError, Result};
use crate::record::EvolutionNode;

/// Depth (1 to 3) of `name` in `chain`.
///
/// `name` is cut at the first `-` so form and gender variants resolve to
/// their species. Only the first child at each level is walked; branching
/// chains are not searched.
pub fn stage(name: &str, chain: &EvolutionNode) -> Result<u8> {
    let name = name.split('-').next().unwrap_or(name);
    let not_found = || DexError::StageNotFound(name.to_string());

    if chain.species_name == name {
        return Ok(1);
    }

    let second = chain.evolves_to.first().ok_or_else(not_found)?;
    if second.species_name == name {
        return Ok(2);
    }

    let third = second.evolves_to.first().ok_or_else(not_found)?;
    if third.species_name == name {
        return Ok(3);
    }

    Err(not_found())
}
