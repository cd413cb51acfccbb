#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Storage adapter for the player's party and dex.
//!
//! The core only ever sees ordered lists of species identifiers stored under
//! a string key. [`ListStore`] abstracts where those lists live; an in-memory
//! store backs tests and a JSON-file store backs the command line driver.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use tallgrass_core::{Event, SpeciesId};
use thiserror::Error;

/// Key under which the party is stored.
pub const PARTY_KEY: &str = "party";

/// Key under which the dex is stored.
pub const POKEDEX_KEY: &str = "pokedex";

/// Species handed to a player whose stored lists are empty.
#[must_use]
pub fn default_seed() -> Vec<SpeciesId> {
    ["bulbasaur", "charmander", "squirtle"]
        .into_iter()
        .map(SpeciesId::new)
        .collect()
}

/// Failures raised while reading or writing stored lists.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// File involved in the failed operation.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The stored data was not a JSON list of species.
    #[error("malformed list in {}: {source}", .path.display())]
    Json {
        /// File holding the malformed data.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The key cannot be used as a storage name.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// Persistent storage of species lists keyed by name.
pub trait ListStore {
    /// Loads the list stored under `key`; a missing list reads as empty.
    fn load_list(&self, key: &str) -> Result<Vec<SpeciesId>, StoreError>;

    /// Replaces the list stored under `key`.
    fn save_list(&mut self, key: &str, species: &[SpeciesId]) -> Result<(), StoreError>;
}

/// Store that keeps lists in memory for the lifetime of the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    lists: BTreeMap<String, Vec<SpeciesId>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListStore for MemoryStore {
    fn load_list(&self, key: &str) -> Result<Vec<SpeciesId>, StoreError> {
        validate_key(key)?;
        Ok(self.lists.get(key).cloned().unwrap_or_default())
    }

    fn save_list(&mut self, key: &str, species: &[SpeciesId]) -> Result<(), StoreError> {
        validate_key(key)?;
        let _ = self.lists.insert(key.to_owned(), species.to_vec());
        Ok(())
    }
}

/// Store that writes each list to `<directory>/<key>.json`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at the provided directory.
    ///
    /// The directory is created lazily on the first save.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory holding the list files.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl ListStore for JsonFileStore {
    fn load_list(&self, key: &str) -> Result<Vec<SpeciesId>, StoreError> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Json { path, source })
    }

    fn save_list(&mut self, key: &str, species: &[SpeciesId]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.directory).map_err(|source| StoreError::Io {
            path: self.directory.clone(),
            source,
        })?;
        let raw = serde_json::to_string_pretty(species).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, raw).map_err(|source| StoreError::Io { path, source })
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_owned()))
    }
}

/// Party and dex loaded at start-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    /// Party members in slot order.
    pub party: Vec<SpeciesId>,
    /// Caught species.
    pub pokedex: Vec<SpeciesId>,
}

/// Loads both lists, seeding and saving the starter species for any empty list.
pub fn load_or_seed<S: ListStore + ?Sized>(store: &mut S) -> Result<Collection, StoreError> {
    let party = load_seeded(store, PARTY_KEY)?;
    let pokedex = load_seeded(store, POKEDEX_KEY)?;
    Ok(Collection { party, pokedex })
}

fn load_seeded<S: ListStore + ?Sized>(
    store: &mut S,
    key: &str,
) -> Result<Vec<SpeciesId>, StoreError> {
    let stored = store.load_list(key)?;
    if !stored.is_empty() {
        return Ok(stored);
    }
    let seed = default_seed();
    log::info!("seeding empty {key} list with starter species");
    store.save_list(key, &seed)?;
    Ok(seed)
}

/// Saves every list reported as changed by the events, returning how many saves ran.
pub fn sync_events<S: ListStore + ?Sized>(
    store: &mut S,
    events: &[Event],
) -> Result<usize, StoreError> {
    let mut saved = 0;
    for event in events {
        match event {
            Event::PartyChanged { members } => {
                store.save_list(PARTY_KEY, members)?;
                saved += 1;
            }
            Event::PokedexChanged { species } => {
                store.save_list(POKEDEX_KEY, species)?;
                saved += 1;
            }
            _ => {}
        }
    }
    Ok(saved)
}

/// Saves both lists unconditionally.
pub fn save_collection<S: ListStore + ?Sized>(
    store: &mut S,
    party: &[SpeciesId],
    pokedex: &[SpeciesId],
) -> Result<(), StoreError> {
    store.save_list(PARTY_KEY, party)?;
    store.save_list(POKEDEX_KEY, pokedex)
}
