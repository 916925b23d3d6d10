//! Persisted user preferences: the favorites set and the display-theme flag.
//!
//! Stored as a named, versioned JSON record:
//! `{"state":{"favorites":[...],"darkMode":false},"version":0}`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

pub const STORE_NAME: &str = "movie-store";
pub const STORE_VERSION: u32 = 0;

/// Ordered set of title identifiers. Add and remove are idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet(Vec<String>);

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the set changed.
    pub fn add(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id.to_string());
        true
    }

    /// Returns whether the set changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|fav| fav != id);
        self.0.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|fav| fav == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops duplicate ids from a hand-edited or legacy record, keeping first occurrences.
    fn dedup(mut self) -> Self {
        let mut seen = FavoritesSet::new();
        self.0.retain(|id| seen.add(id));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub favorites: FavoritesSet,
    #[serde(default)]
    pub dark_mode: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    state: Preferences,
    version: u32,
}

pub trait PreferencesBackend: Send + Sync {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<Preferences>>;
    fn save(&self, prefs: &Preferences) -> Result<()>;
}

/// Load preferences, falling back to defaults on any problem with the record.
pub fn restore(backend: &dyn PreferencesBackend) -> Preferences {
    match backend.load() {
        Ok(Some(prefs)) => {
            info!(store = STORE_NAME, favorites = prefs.favorites.len(), "Restored preferences");
            prefs
        }
        Ok(None) => {
            debug!(store = STORE_NAME, "No persisted preferences, starting from defaults");
            Preferences::default()
        }
        Err(e) => {
            warn!(store = STORE_NAME, "Ignoring unreadable preferences: {:#}", e);
            Preferences::default()
        }
    }
}

fn encode(prefs: &Preferences) -> Result<String> {
    let record = PersistedRecord {
        state: prefs.clone(),
        version: STORE_VERSION,
    };
    serde_json::to_string_pretty(&record).context("Failed to serialize preferences")
}

fn decode(raw: &str) -> Result<Preferences> {
    let record: PersistedRecord =
        serde_json::from_str(raw).context("Failed to parse preferences record")?;
    if record.version != STORE_VERSION {
        bail!(
            "Unsupported preferences version {} (expected {})",
            record.version,
            STORE_VERSION
        );
    }
    let mut prefs = record.state;
    prefs.favorites = prefs.favorites.dedup();
    Ok(prefs)
}

/// JSON file on disk, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Preferences>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read preferences file: {:?}", self.path)
                })
            }
        };
        decode(&raw)
            .map(Some)
            .with_context(|| format!("Invalid preferences file: {:?}", self.path))
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        let body = encode(prefs)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).with_context(|| format!("Failed to write {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace preferences file: {:?}", self.path))?;
        debug!(path = %self.path.display(), "Preferences saved");
        Ok(())
    }
}

/// Keeps the encoded record in memory. Used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    raw: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|r| r.clone())
    }
}

impl PreferencesBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Preferences>> {
        let raw = self.raw();
        raw.as_deref().map(decode).transpose()
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        let body = encode(prefs)?;
        let mut guard = self
            .raw
            .lock()
            .map_err(|_| anyhow::anyhow!("preferences lock poisoned"))?;
        *guard = Some(body);
        Ok(())
    }
}
