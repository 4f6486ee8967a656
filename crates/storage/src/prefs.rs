#![forbid(unsafe_code)]

use crate::PrefsError;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const PREFS_DB: &str = "prefs.db";
const THEME_KEY: &str = "theme";
const MAX_KEY_LEN: usize = 128;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Small key/value store for viewer preferences, kept in `prefs.db` under
/// the storage directory.
#[derive(Debug)]
pub struct PrefsStore {
    conn: Connection,
}

impl PrefsStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, PrefsError> {
        let storage_dir = storage_dir.as_ref();
        std::fs::create_dir_all(storage_dir)?;

        let conn = Connection::open(storage_dir.join(PREFS_DB))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at_ms INTEGER NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        let key = validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM prefs WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        let key = validate_key(key)?;
        self.conn.execute(
            "INSERT INTO prefs(key, value, updated_at_ms) VALUES (?1, ?2, ?3) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at_ms = excluded.updated_at_ms",
            params![key, value, now_ms()],
        )?;
        tracing::debug!(%key, "preference stored");
        Ok(())
    }

    /// Unset or unrecognized stored values read as the default theme.
    pub fn theme(&self) -> Result<Theme, PrefsError> {
        let stored = self.get(THEME_KEY)?;
        Ok(match stored.as_deref() {
            None => Theme::default(),
            Some(raw) => Theme::parse(raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "ignoring unrecognized stored theme");
                Theme::default()
            }),
        })
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PrefsError> {
        self.set(THEME_KEY, theme.as_str())
    }
}

fn validate_key(key: &str) -> Result<&str, PrefsError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(PrefsError::InvalidInput("preference key must not be empty"));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(PrefsError::InvalidInput("preference key is too long"));
    }
    Ok(key)
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
