use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::AppData;

/// Fixed key the serialized `AppData` blob lives under.
const DATA_KEY: &str = "app-data";
/// Fixed key recording the last-adopted snapshot version.
const VERSION_KEY: &str = "adopted-version";

/// Local key-value store backed by SQLite: two fixed keys and nothing else.
/// Load degrades to defaults and save is best-effort, so neither can take the
/// caller down with it.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             CREATE TABLE IF NOT EXISTS kv (
                 key TEXT PRIMARY KEY,
                 value TEXT NOT NULL,
                 updated_at TEXT NOT NULL DEFAULT (datetime('now'))
             );",
        )?;
        Ok(Self { conn })
    }

    fn get(&self, key: &str) -> rusqlite::Result<Option<String>> {
        match self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| {
                row.get(0)
            }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?, ?, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    /// Load the persisted state. Never fails: a missing blob, unreadable row,
    /// or unusable document all degrade to the default value, and a blob with
    /// missing list fields is repaired field-wise.
    pub fn load(&self) -> AppData {
        let raw = match self.get(DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted state, starting from defaults");
                return AppData::default();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted state");
                return AppData::default();
            }
        };

        match AppData::from_json(&raw) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Persisted state is malformed, falling back to defaults");
                AppData::default()
            }
        }
    }

    /// Persist the full state. Best-effort: a failed save is logged and
    /// swallowed, never rolled back or retried.
    pub fn save(&self, data: &AppData) {
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize state");
                return;
            }
        };
        if let Err(e) = self.set(DATA_KEY, &json) {
            warn!(error = %e, "Failed to persist state");
        }
    }

    /// Version string of the last adopted snapshot, if any.
    pub fn adopted_version(&self) -> Option<String> {
        match self.get(VERSION_KEY) {
            Ok(version) => version,
            Err(e) => {
                warn!(error = %e, "Failed to read adopted version");
                None
            }
        }
    }

    pub fn set_adopted_version(&self, version: &str) {
        if let Err(e) = self.set(VERSION_KEY, version) {
            warn!(error = %e, "Failed to persist adopted version");
        }
    }

    /// Wholesale snapshot adoption: the blob plus its version stamp.
    pub fn replace(&self, data: &AppData) {
        self.save(data);
        if let Some(version) = &data.version {
            self.set_adopted_version(version);
        }
    }
}
