//! The aggregate record: one pokemon with its species and evolution tree,
//! flattened into the attributes the game compares.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{resource_id, ChainLink, EvolutionChain, Pokemon, PokemonSpecies};

/// A node of an evolution tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species_name: String,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn leaf(species_name: &str) -> Self {
        Self {
            species_name: species_name.to_string(),
            evolves_to: Vec::new(),
        }
    }

    /// Build a straight line `a -> b -> c`.
    pub fn line(names: &[&str]) -> Self {
        let mut nodes = names.iter().rev().map(|name| Self::leaf(name));
        let mut tail = match nodes.next() {
            Some(node) => node,
            None => return Self::leaf(""),
        };
        for mut node in nodes {
            node.evolves_to.push(tail);
            tail = node;
        }
        tail
    }
}

impl From<&ChainLink> for EvolutionNode {
    fn from(link: &ChainLink) -> Self {
        Self {
            species_name: link.species.name.clone(),
            evolves_to: link.evolves_to.iter().map(EvolutionNode::from).collect(),
        }
    }
}

/// Everything the game knows about one pokemon. This is the unit that gets
/// cached and compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeRecord {
    pub id: u32,
    pub name: String,
    pub species_name: String,
    /// In slot order. Compared without regard to order.
    pub types: Vec<String>,
    pub color: String,
    /// Empty for species with no egg group data.
    pub egg_groups: Vec<String>,
    /// Empty when the species has no habitat.
    pub habitat: String,
    pub generation: u32,
    pub evolution: EvolutionNode,
    #[serde(default)]
    pub sprite_url: Option<String>,
}

impl PokeRecord {
    /// Flatten the three catalog resources into one record.
    pub fn assemble(pokemon: Pokemon, species: PokemonSpecies, chain: EvolutionChain) -> Self {
        let mut types = pokemon.types;
        types.sort_by_key(|t| t.slot);

        let generation = resource_id(&species.generation.url, "generation").unwrap_or_else(|e| {
            log::warn!("can't parse generation of {}: {}", species.name, e);
            0
        });

        Self {
            id: pokemon.id,
            name: pokemon.name,
            species_name: species.name,
            types: types.into_iter().map(|t| t.kind.name).collect(),
            color: species.color.name,
            egg_groups: species.egg_groups.into_iter().map(|g| g.name).collect(),
            habitat: species.habitat.map(|h| h.name).unwrap_or_default(),
            generation,
            evolution: EvolutionNode::from(&chain.chain),
            sprite_url: pokemon.sprites.front_default,
        }
    }
}

/// How a record is looked up, in the cache and in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Id(u32),
    Name(String),
}

impl LookupKey {
    /// Names are matched lowercase and trimmed.
    pub fn name(name: &str) -> Self {
        Self::Name(name.trim().to_lowercase())
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{ApiResource, NamedResource, PokemonType, Sprites};

    fn named(name: &str, url: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_line_builds_first_child_chain() {
        let tree = EvolutionNode::line(&["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(tree.species_name, "bulbasaur");
        assert_eq!(tree.evolves_to[0].species_name, "ivysaur");
        assert_eq!(tree.evolves_to[0].evolves_to[0].species_name, "venusaur");
        assert!(tree.evolves_to[0].evolves_to[0].evolves_to.is_empty());
    }

    #[test]
    fn test_assemble_flattens_resources() {
        let pokemon = Pokemon {
            id: 6,
            name: "charizard".into(),
            species: named("charizard", "https://pokeapi.co/api/v2/pokemon-species/6/"),
            types: vec![
                PokemonType { slot: 2, kind: named("flying", "") },
                PokemonType { slot: 1, kind: named("fire", "") },
            ],
            sprites: Sprites {
                front_default: Some("https://img/6.png".into()),
            },
        };
        let species = PokemonSpecies {
            name: "charizard".into(),
            color: named("red", ""),
            egg_groups: vec![named("monster", ""), named("dragon", "")],
            habitat: Some(named("mountain", "")),
            generation: named("generation-i", "https://pokeapi.co/api/v2/generation/1/"),
            evolution_chain: ApiResource {
                url: "https://pokeapi.co/api/v2/evolution-chain/2/".into(),
            },
        };
        let chain = EvolutionChain {
            id: 2,
            chain: ChainLink {
                species: named("charmander", ""),
                evolves_to: vec![ChainLink {
                    species: named("charmeleon", ""),
                    evolves_to: vec![ChainLink {
                        species: named("charizard", ""),
                        evolves_to: vec![],
                    }],
                }],
            },
        };

        let record = PokeRecord::assemble(pokemon, species, chain);
        assert_eq!(record.types, vec!["fire", "flying"]);
        assert_eq!(record.egg_groups, vec!["monster", "dragon"]);
        assert_eq!(record.habitat, "mountain");
        assert_eq!(record.generation, 1);
        assert_eq!(
            record.evolution,
            EvolutionNode::line(&["charmander", "charmeleon", "charizard"])
        );
    }

    #[test]
    fn test_lookup_key_name_normalized() {
        assert_eq!(LookupKey::name("  Pikachu "), LookupKey::Name("pikachu".into()));
        assert_eq!(LookupKey::Id(25).to_string(), "25");
    }
}
