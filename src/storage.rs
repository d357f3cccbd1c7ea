use crate::chat::models::{ChatSettings, Conversation};
use crate::error::Result;
use chrono::Utc;
use log::{debug, error, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const CONVERSATIONS_KEY: &str = "conversations";
const CURRENT_CONVERSATION_KEY: &str = "current_conversation";
const SETTINGS_KEY: &str = "settings";

/// Flat durable string store the gateway sits on.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt.query_row(params![key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value=excluded.value,
                updated_at=excluded.updated_at
            "#,
            params![key, value, Utc::now()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn().execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Persistence gateway for conversations, the active id and settings.
///
/// Never fails towards the caller: read faults yield the documented default,
/// write faults are logged and dropped.
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Box::new(backend) }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn get_conversations(&self) -> Vec<Conversation> {
        let Some(raw) = self.read(CONVERSATIONS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Conversation>>(&raw) {
            Ok(list) => list,
            Err(e) => {
                error!("Error loading conversations: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrites the stored list. An empty list is not written.
    pub fn save_conversations(&self, conversations: &[Conversation]) {
        if conversations.is_empty() {
            debug!("skipping save of empty conversation list");
            return;
        }
        let persisted: Vec<Conversation> = conversations
            .iter()
            .map(|c| Conversation {
                messages: c.visible_messages().cloned().collect(),
                ..c.clone()
            })
            .collect();
        match serde_json::to_string(&persisted) {
            Ok(json) => self.write(CONVERSATIONS_KEY, &json),
            Err(e) => error!("Error saving conversations: {}", e),
        }
    }

    pub fn get_current_conversation_id(&self) -> Option<String> {
        self.read(CURRENT_CONVERSATION_KEY).filter(|id| !id.is_empty())
    }

    pub fn set_current_conversation_id(&self, id: &str) {
        self.write(CURRENT_CONVERSATION_KEY, id);
    }

    pub fn get_settings(&self) -> ChatSettings {
        let Some(raw) = self.read(SETTINGS_KEY) else {
            return ChatSettings::default();
        };
        match serde_json::from_str::<ChatSettings>(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                error!("Error loading settings: {}", e);
                ChatSettings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &ChatSettings) {
        match serde_json::to_string(settings) {
            Ok(json) => self.write(SETTINGS_KEY, &json),
            Err(e) => error!("Error saving settings: {}", e),
        }
    }

    pub fn clear_all(&self) {
        for key in [CONVERSATIONS_KEY, CURRENT_CONVERSATION_KEY, SETTINGS_KEY] {
            if let Err(e) = self.backend.remove(key) {
                warn!("Error removing '{}': {}", key, e);
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                error!("Error reading '{}': {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            error!("Error writing '{}': {}", key, e);
        }
    }
}
