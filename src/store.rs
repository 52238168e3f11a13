//! JSON-file-backed account store.
//!
//! A flat ordered list of [`StoredAccount`] records, rewritten wholesale on
//! every mutation. Single-process, single-writer use; the write is not
//! atomic.

use crate::{Result, StoredAccount};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default store file name, created in the working directory.
pub const DEFAULT_STORE_FILE: &str = "generated_accounts.json";

/// Local persistence for generated account credentials.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store backed by the given file path. The file is not
    /// touched until the first [`save`](Self::save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records. A missing, unreadable, or malformed file yields an
    /// empty list; this never fails.
    pub fn load(&self) -> Vec<StoredAccount> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "account store unreadable, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "account store corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the store file with the given list, pretty-printed UTF-8.
    pub fn save(&self, accounts: &[StoredAccount]) -> Result<()> {
        let json = serde_json::to_string_pretty(accounts)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = accounts.len(), "account store saved");
        Ok(())
    }

    /// Append one record: full load-push-save round trip.
    pub fn append(&self, account: StoredAccount) -> Result<()> {
        let mut accounts = self.load();
        accounts.push(account);
        self.save(&accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> StoredAccount {
        StoredAccount {
            id: id.to_string(),
            address: format!("{id}@example.com"),
            password: "Aa1!Aa1!Aa1!Aa1!".to_string(),
            created_at: "2026-08-05T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn empty_and_invalid_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        for contents in ["", "not json", "{\"a\": 1}"] {
            let path = dir.path().join("accounts.json");
            fs::write(&path, contents).unwrap();
            assert!(Store::new(&path).load().is_empty(), "contents: {contents:?}");
        }
    }

    #[test]
    fn save_then_load_is_a_fixed_point() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("accounts.json"));
        let accounts = vec![record("a"), record("b")];
        store.save(&accounts).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, accounts);
        store.save(&loaded).unwrap();
        assert_eq!(store.load(), accounts);
    }

    #[test]
    fn append_keeps_existing_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("accounts.json"));
        store.append(record("first")).unwrap();
        store.append(record("second")).unwrap();
        let accounts = store.load();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, "first");
        assert_eq!(accounts[1].id, "second");
    }
}
