//! A deck is stored as a JSON array of slides. Absent optional style
//! attributes are omitted, never written as `null`.

use crate::error::{Error, Result};
use crate::model::{Deck, Slide};

/// Where a hydrated deck came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrateSource {
    /// Stored data decoded cleanly.
    Loaded,
    /// Nothing was stored; this is a fresh deck.
    Missing,
    /// Stored data was unusable and was replaced by a fresh deck.
    Fallback(String),
}

/// A deck ready for editing plus how it was obtained.
#[derive(Debug, Clone)]
pub struct Hydrated {
    /// The deck.
    pub deck: Deck,
    /// Its origin.
    pub source: HydrateSource,
}

impl Hydrated {
    /// Whether the stored data had to be thrown away.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, HydrateSource::Fallback(_))
    }
}

/// Serialize a deck's slides.
pub fn encode(deck: &Deck) -> Result<String> {
    serde_json::to_string(deck.slides())
        .map_err(|e| Error::Msg(format!("Failed to serialize deck: {e}")))
}

/// Parse and validate a serialized deck.
///
/// Missing fields, non-numeric or zero durations, an empty slide list and
/// repeated element ids within a slide are all rejected.
pub fn decode(serialized: &str) -> Result<Deck> {
    let slides: Vec<Slide> = serde_json::from_str(serialized)?;
    for (index, slide) in slides.iter().enumerate() {
        if slide.duration == 0 {
            return Err(Error::parse(format!("slide {index} has zero duration"), None));
        }
        if let Some(dup) = slide.duplicate_ids().first() {
            return Err(Error::parse(format!("slide {index} repeats element id {dup}"), None));
        }
    }
    Deck::from_slides(slides).ok_or_else(|| Error::parse("deck has no slides", None))
}

/// Build an editable deck from stored data, never partially.
pub fn hydrate(serialized: Option<&str>) -> Hydrated {
    let Some(serialized) = serialized else {
        return Hydrated { deck: Deck::new(), source: HydrateSource::Missing };
    };
    match decode(serialized) {
        Ok(deck) => Hydrated { deck, source: HydrateSource::Loaded },
        Err(e) => {
            tracing::warn!(error = %e, "Stored deck is unusable, starting from a default slide");
            Hydrated { deck: Deck::new(), source: HydrateSource::Fallback(e.to_string()) }
        }
    }
}
