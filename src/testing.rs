//! Shared fixtures for unit tests: sample records and an in-memory catalog.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::catalog::types::{ApiResource, PokemonType, Sprites};
use crate::catalog::{Catalog, ChainLink, EvolutionChain, NamedResource, Pokemon, PokemonSpecies};
use crate::errors::CatalogError;
use crate::record::{EvolutionNode, PokeRecord};

#[allow(clippy::too_many_arguments)]
fn record(
    id: u32,
    name: &str,
    types: &[&str],
    color: &str,
    egg_groups: &[&str],
    habitat: &str,
    generation: u32,
    line: &[&str],
) -> PokeRecord {
    PokeRecord {
        id,
        name: name.to_string(),
        species_name: name.split('-').next().unwrap_or(name).to_string(),
        types: types.iter().map(|s| s.to_string()).collect(),
        color: color.to_string(),
        egg_groups: egg_groups.iter().map(|s| s.to_string()).collect(),
        habitat: habitat.to_string(),
        generation,
        evolution: EvolutionNode::line(line),
        sprite_url: Some(format!("https://sprites.example/{}.png", id)),
    }
}

const BULBASAUR_LINE: &[&str] = &["bulbasaur", "ivysaur", "venusaur"];
const CHARMANDER_LINE: &[&str] = &["charmander", "charmeleon", "charizard"];

pub fn bulbasaur() -> PokeRecord {
    record(
        1,
        "bulbasaur",
        &["grass", "poison"],
        "green",
        &["monster", "plant"],
        "grassland",
        1,
        BULBASAUR_LINE,
    )
}

pub fn ivysaur() -> PokeRecord {
    record(
        2,
        "ivysaur",
        &["grass", "poison"],
        "green",
        &["monster", "plant"],
        "grassland",
        1,
        BULBASAUR_LINE,
    )
}

pub fn charmander() -> PokeRecord {
    record(
        4,
        "charmander",
        &["fire"],
        "red",
        &["monster", "dragon"],
        "mountain",
        1,
        CHARMANDER_LINE,
    )
}

pub fn charizard() -> PokeRecord {
    record(
        6,
        "charizard",
        &["fire", "flying"],
        "red",
        &["monster", "dragon"],
        "mountain",
        1,
        CHARMANDER_LINE,
    )
}

pub fn squirtle() -> PokeRecord {
    record(
        7,
        "squirtle",
        &["water"],
        "blue",
        &["monster", "water1"],
        "waters-edge",
        1,
        &["squirtle", "wartortle", "blastoise"],
    )
}

pub fn pikachu() -> PokeRecord {
    record(
        25,
        "pikachu",
        &["electric"],
        "yellow",
        &["ground", "fairy"],
        "forest",
        1,
        &["pichu", "pikachu", "raichu"],
    )
}

pub fn munchlax() -> PokeRecord {
    record(446, "munchlax", &["normal"], "black", &["no-eggs"], "", 4, &["munchlax", "snorlax"])
}

fn named(name: &str, url: String) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url,
    }
}

fn chain_link(node: &EvolutionNode) -> ChainLink {
    ChainLink {
        species: named(&node.species_name, String::new()),
        evolves_to: node.evolves_to.iter().map(chain_link).collect(),
    }
}

/// The three catalog resources that assemble into `record`. The chain id
/// reuses the pokemon id.
pub fn wire(record: &PokeRecord) -> (Pokemon, PokemonSpecies, EvolutionChain) {
    let base = "https://pokeapi.co/api/v2";
    let pokemon = Pokemon {
        id: record.id,
        name: record.name.clone(),
        species: named(
            &record.species_name,
            format!("{}/pokemon-species/{}/", base, record.id),
        ),
        types: record
            .types
            .iter()
            .enumerate()
            .map(|(i, t)| PokemonType {
                slot: i as u8 + 1,
                kind: named(t, String::new()),
            })
            .collect(),
        sprites: Sprites {
            front_default: record.sprite_url.clone(),
        },
    };
    let species = PokemonSpecies {
        name: record.species_name.clone(),
        color: named(&record.color, String::new()),
        egg_groups: record
            .egg_groups
            .iter()
            .map(|g| named(g, String::new()))
            .collect(),
        habitat: (!record.habitat.is_empty()).then(|| named(&record.habitat, String::new())),
        generation: named(
            "generation",
            format!("{}/generation/{}/", base, record.generation),
        ),
        evolution_chain: ApiResource {
            url: format!("{}/evolution-chain/{}/", base, record.id),
        },
    };
    let chain = EvolutionChain {
        id: record.id,
        chain: chain_link(&record.evolution),
    };
    (pokemon, species, chain)
}

/// In-memory [`Catalog`] with call counting and injectable failures.
#[derive(Default)]
pub struct FakeCatalog {
    pokemon: HashMap<String, Pokemon>,
    species: HashMap<String, PokemonSpecies>,
    chains: HashMap<u32, EvolutionChain>,
    failing_ids: HashSet<u32>,
    broken_chains: HashSet<u32>,
    delay: Option<Duration>,
    pokemon_calls: AtomicUsize,
    total_calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with(records: &[PokeRecord]) -> Self {
        let mut catalog = Self::default();
        for record in records {
            let (pokemon, species, chain) = wire(record);
            catalog.pokemon.insert(pokemon.id.to_string(), pokemon.clone());
            catalog.pokemon.insert(pokemon.name.clone(), pokemon);
            catalog.species.insert(species.name.clone(), species);
            catalog.chains.insert(chain.id, chain);
        }
        catalog
    }

    /// Lookups of these ids fail with an HTTP 500.
    pub fn failing(mut self, ids: &[u32]) -> Self {
        self.failing_ids.extend(ids);
        self
    }

    /// The evolution chain step fails for these chain ids.
    pub fn broken_chain(mut self, ids: &[u32]) -> Self {
        self.broken_chains.extend(ids);
        self
    }

    /// Every call sleeps this long before answering.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn pokemon_calls(&self) -> usize {
        self.pokemon_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    /// Every `id_or_name` passed to [`Catalog::pokemon`], in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    async fn enter(&self) {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn server_error(path: String) -> CatalogError {
    CatalogError::Status {
        status: 500,
        url: path,
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn pokemon(&self, id_or_name: &str) -> Result<Pokemon, CatalogError> {
        self.enter().await;
        self.pokemon_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(id_or_name.to_string());

        if let Ok(id) = id_or_name.parse::<u32>() {
            if self.failing_ids.contains(&id) {
                return Err(server_error(format!("pokemon/{}", id)));
            }
        }
        self.pokemon
            .get(id_or_name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("pokemon/{}", id_or_name)))
    }

    async fn species(&self, name: &str) -> Result<PokemonSpecies, CatalogError> {
        self.enter().await;
        self.species
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("pokemon-species/{}", name)))
    }

    async fn evolution_chain(&self, id: u32) -> Result<EvolutionChain, CatalogError> {
        self.enter().await;
        if self.broken_chains.contains(&id) {
            return Err(server_error(format!("evolution-chain/{}", id)));
        }
        self.chains
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("evolution-chain/{}", id)))
    }

    async fn search(&self, query: &str) -> Result<Vec<String>, CatalogError> {
        self.enter().await;
        let mut names: Vec<String> = self
            .pokemon
            .keys()
            .filter(|k| k.parse::<u32>().is_err() && k.contains(query))
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }
}
