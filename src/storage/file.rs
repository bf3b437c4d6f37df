use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs_err as fs;
use serde::{Deserialize, Serialize};

use super::DeckStore;
use crate::error::{Error, Result};
use crate::types::ShareId;

/// Share index file name
const SHARES_FILE: &str = "shares.json";

/// Subdirectory holding one JSON file per key
const DECKS_DIR: &str = "decks";

/// What a share id points at and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecord {
    /// Store key the share resolves to.
    pub key: String,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share stops resolving.
    pub expires_at: DateTime<Utc>,
}

impl ShareRecord {
    /// Whether the share has lapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Decks stored as JSON files under a data directory.
///
/// ```text
/// <root>/decks/<key>.json
/// <root>/shares.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    retention: Duration,
}

impl FileStore {
    /// Create a store rooted at `root`, keeping shares for `retention_days`.
    /// Directories are created on first save.
    pub fn new(root: impl Into<PathBuf>, retention_days: i64) -> Self {
        Self { root: root.into(), retention: Duration::days(retention_days.max(1)) }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn deck_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Storage(format!(
                "invalid key {key:?}: use letters, digits, '-' or '_'"
            )));
        }
        Ok(self.root.join(DECKS_DIR).join(format!("{key}.json")))
    }

    fn shares_path(&self) -> PathBuf {
        self.root.join(SHARES_FILE)
    }

    fn read_shares(&self) -> Result<HashMap<ShareId, ShareRecord>> {
        let path = self.shares_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|e| Error::parse(e.to_string(), path))
    }

    fn write_shares(&self, shares: &HashMap<ShareId, ShareRecord>) -> Result<()> {
        let json = serde_json::to_string_pretty(shares)
            .map_err(|e| Error::Msg(format!("Failed to serialize share index: {e}")))?;
        write_replacing(&self.shares_path(), &json)
    }

    /// Share record for an id, expired or not.
    pub fn share_record(&self, share: &ShareId) -> Result<Option<ShareRecord>> {
        Ok(self.read_shares()?.remove(share))
    }

    /// Drop expired share records. Returns how many were removed.
    pub fn prune_expired(&self) -> Result<usize> {
        let mut shares = self.read_shares()?;
        let before = shares.len();
        let now = Utc::now();
        shares.retain(|_, r| !r.is_expired_at(now));
        let removed = before - shares.len();
        if removed > 0 {
            self.write_shares(&shares)?;
            tracing::info!(removed, "Pruned expired shares");
        }
        Ok(removed)
    }
}

/// Write via a sibling temp file so a crash never leaves half a deck.
fn write_replacing(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl DeckStore for FileStore {
    fn save(&mut self, key: &str, serialized: &str) -> Result<ShareId> {
        let path = self.deck_path(key)?;
        write_replacing(&path, serialized)?;

        let share = ShareId::generate();
        let created_at = Utc::now();
        let mut shares = self.read_shares().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Share index unreadable, starting a new one");
            HashMap::new()
        });
        shares.insert(
            share.clone(),
            ShareRecord { key: key.to_string(), created_at, expires_at: created_at + self.retention },
        );
        self.write_shares(&shares)?;
        tracing::debug!(path = %path.display(), share = %share, "Deck written");
        Ok(share)
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.deck_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn resolve_share(&self, share: &ShareId) -> Result<Option<String>> {
        let Some(record) = self.share_record(share)? else {
            return Ok(None);
        };
        if record.is_expired_at(Utc::now()) {
            tracing::info!(share = %share, expired = %record.expires_at, "Share link has expired");
            return Ok(None);
        }
        self.load(&record.key)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn save_load_and_share() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path(), 28);
        let share = store.save("wrapped_data", "[1,2]").unwrap();
        assert_eq!(store.load("wrapped_data").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(store.resolve_share(&share).unwrap().as_deref(), Some("[1,2]"));

        let record = store.share_record(&share).unwrap().unwrap();
        assert_eq!((record.expires_at - record.created_at).num_days(), 28);
    }

    #[test]
    fn missing_key_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), 28);
        assert!(store.load("nothing").unwrap().is_none());
        assert!(store.resolve_share(&ShareId::new("x")).unwrap().is_none());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path(), 28);
        assert!(matches!(store.save("../escape", "[]"), Err(Error::Storage(_))));
        assert!(store.load("").is_err());
    }

    #[test]
    fn expired_shares_do_not_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path(), 28);
        let share = store.save("k", "[]").unwrap();

        let mut shares = store.read_shares().unwrap();
        if let Some(r) = shares.get_mut(&share) {
            r.expires_at = Utc::now() - Duration::days(1);
        }
        store.write_shares(&shares).unwrap();

        assert!(store.resolve_share(&share).unwrap().is_none());
        assert_eq!(store.prune_expired().unwrap(), 1);
        assert!(store.share_record(&share).unwrap().is_none());
    }
}
