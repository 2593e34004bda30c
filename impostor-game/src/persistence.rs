//! Key-value persistence of players, packs and configuration
use crate::config::GameConfig;
use crate::pack::WordPack;
use crate::player::Player;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

pub const PLAYERS_KEY: &str = "impostor.players";
pub const PACKS_KEY: &str = "impostor.packs";
pub const CONFIG_KEY: &str = "impostor.config";

/// Trait for abstracting string-valued local storage.
/// Platform-specific implementations should provide this.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store failure: {0}")]
    Store(String),
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io failure: {0}")]
    Io(#[from] io::Error),
}

/// In-memory store. Clones share the same map, so a caller can keep a handle
/// and inspect what the engine wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    type Error = io::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let target = self.path_for(key);
        let staging = self.root.join(format!("{key}.json.tmp"));
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// The three persisted records, each defaulted independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedRecords {
    pub players: Vec<Player>,
    pub packs: Vec<WordPack>,
    pub config: GameConfig,
}

/// Load every record from `store`. Missing or malformed records fall back to
/// their defaults; failures are logged and never reach the caller.
#[must_use]
pub fn load<S: KeyValueStore>(store: &S) -> PersistedRecords {
    let players: Vec<Player> = load_record(store, PLAYERS_KEY);
    let packs: Vec<WordPack> = load_record(store, PACKS_KEY);
    let config: GameConfig = load_record(store, CONFIG_KEY);
    PersistedRecords {
        players,
        packs: packs.into_iter().filter(|p| !p.is_generated).collect(),
        config: config.sanitized(),
    }
}

fn load_record<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|err| {
            log::warn!("discarding malformed record {key}: {err}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            log::warn!("failed to read record {key}: {err}");
            T::default()
        }
    }
}

/// Persist all three records, absorbing failures. Generated packs are never
/// written.
pub fn save<S: KeyValueStore>(
    store: &S,
    players: &[Player],
    packs: &[WordPack],
    config: &GameConfig,
) {
    if let Err(err) = try_save(store, players, packs, config) {
        log::warn!("failed to persist game records: {err}");
    }
}

/// Fallible variant of [`save`].
///
/// # Errors
///
/// Returns an error if a record cannot be serialized or the store rejects a
/// write. Records written before the failure stay written.
pub fn try_save<S: KeyValueStore>(
    store: &S,
    players: &[Player],
    packs: &[WordPack],
    config: &GameConfig,
) -> Result<(), PersistenceError> {
    let persisted: Vec<&WordPack> = packs.iter().filter(|p| !p.is_generated).collect();
    write_record(store, PLAYERS_KEY, &players)?;
    write_record(store, PACKS_KEY, &persisted)?;
    write_record(store, CONFIG_KEY, config)
}

fn write_record<S, T>(store: &S, key: &str, value: &T) -> Result<(), PersistenceError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(value)?;
    store
        .set(key, &text)
        .map_err(|err| PersistenceError::Store(err.to_string()))
}
