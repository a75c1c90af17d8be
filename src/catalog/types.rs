//! Wire types for the subset of PokéAPI resources the game reads.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another catalog resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

/// `GET /pokemon/{id or name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub species: NamedResource,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

/// `GET /pokemon-species/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    pub color: NamedResource,
    #[serde(default)]
    pub egg_groups: Vec<NamedResource>,
    /// Null for species introduced after habitats were dropped.
    pub habitat: Option<NamedResource>,
    pub generation: NamedResource,
    pub evolution_chain: ApiResource,
}

/// One node of an evolution tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// `GET /evolution-chain/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

/// `GET /pokemon?limit=N`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList {
    pub count: u32,
    pub results: Vec<NamedResource>,
}
