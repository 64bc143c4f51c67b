//! Key-value persistence for conversation history.
//!
//! Two logical keys are in use: the serialized conversation list and the
//! active conversation id. Values are whole-state snapshots; every store
//! mutation rewrites them in full.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use directories::ProjectDirs;
use tempfile::NamedTempFile;

pub const CONVERSATIONS_KEY: &str = "conversations";
pub const ACTIVE_CONVERSATION_KEY: &str = "active_conversation";

pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// File-per-key storage under a data directory. Writes go through a temp
/// file in the same directory and an atomic rename, so a crash mid-write
/// leaves the previous snapshot intact.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Platform data directory, e.g. `~/.local/share/causette` on Linux.
    pub fn default_location() -> Self {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "causette")
            .expect("Failed to determine data directory");
        Self::new(proj_dirs.data_dir().to_path_buf())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.dir)?;
        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(self.key_path(key))?;
        Ok(())
    }
}

/// In-memory storage for tests and `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf());
        storage.set("conversations", "[]").unwrap();
        assert_eq!(storage.get("conversations").as_deref(), Some("[]"));
    }

    #[test]
    fn file_storage_overwrites_previous_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf());
        storage.set("active_conversation", "chat_1").unwrap();
        storage.set("active_conversation", "chat_2").unwrap();
        assert_eq!(
            storage.get("active_conversation").as_deref(),
            Some("chat_2")
        );
    }

    #[test]
    fn missing_keys_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        assert_eq!(storage.get("conversations"), None);
    }

    #[test]
    fn memory_storage_round_trips_values() {
        let mut storage = MemoryStorage::default();
        assert_eq!(storage.get("k"), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }
}
