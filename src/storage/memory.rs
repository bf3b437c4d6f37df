use std::collections::HashMap;

use super::DeckStore;
use crate::error::Result;
use crate::types::ShareId;

/// Decks kept in process memory. Shares never expire.
#[derive(Debug, Default)]
pub struct MemoryStore {
    decks: HashMap<String, String>,
    shares: HashMap<ShareId, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}

impl DeckStore for MemoryStore {
    fn save(&mut self, key: &str, serialized: &str) -> Result<ShareId> {
        self.decks.insert(key.to_string(), serialized.to_string());
        let share = ShareId::generate();
        self.shares.insert(share.clone(), key.to_string());
        Ok(share)
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.decks.get(key).cloned())
    }

    fn resolve_share(&self, share: &ShareId) -> Result<Option<String>> {
        Ok(self.shares.get(share).and_then(|key| self.decks.get(key)).cloned())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn every_save_gets_a_fresh_share() {
        let mut store = MemoryStore::new();
        let a = store.save("k", "[]").unwrap();
        let b = store.save("k", "[1]").unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve_share(&a).unwrap().as_deref(), Some("[1]"));
        assert!(store.resolve_share(&ShareId::new("nope")).unwrap().is_none());
    }
}
