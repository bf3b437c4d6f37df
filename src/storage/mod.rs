//! Deck persistence.
//!
//! The core needs only an opaque put-and-fetch capability: a store saves a
//! serialized deck under a key and hands back a share id, and loads it back
//! by key. [`codec`] turns decks into that serialized form and back,
//! falling back to a default deck when the stored data is broken.

use crate::error::Result;
use crate::model::Deck;
use crate::types::ShareId;

/// JSON encoding and validated hydration
pub mod codec;
/// Directory-backed store
pub mod file;
/// In-memory store for tests and throwaway sessions
pub mod memory;

pub use codec::{decode, encode, hydrate, HydrateSource, Hydrated};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key/value persistence for serialized decks.
pub trait DeckStore {
    /// Store `serialized` under `key` and return a fresh share id for it.
    fn save(&mut self, key: &str, serialized: &str) -> Result<ShareId>;

    /// Fetch what was stored under `key`, if anything.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Fetch the deck a share id points at, if the share is still live.
    fn resolve_share(&self, share: &ShareId) -> Result<Option<String>>;
}

/// Encode and save a deck.
pub fn save_deck(store: &mut dyn DeckStore, key: &str, deck: &Deck) -> Result<ShareId> {
    let serialized = encode(deck)?;
    let share = store.save(key, &serialized)?;
    tracing::info!(key, share = %share, slides = deck.len(), "Deck saved");
    Ok(share)
}

/// Load and hydrate a deck. Missing or broken data yields a default deck
/// whose [`HydrateSource`] says so.
pub fn load_deck(store: &dyn DeckStore, key: &str) -> Result<Hydrated> {
    let serialized = store.load(key)?;
    Ok(hydrate(serialized.as_deref()))
}

/// Load the deck behind a share id.
pub fn load_shared(store: &dyn DeckStore, share: &ShareId) -> Result<Hydrated> {
    let serialized = store.resolve_share(share)?;
    Ok(hydrate(serialized.as_deref()))
}
