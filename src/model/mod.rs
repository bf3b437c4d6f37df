//! Presentation data model.
//!
//! Elements, slides and the deck that owns them. These types carry data
//! and invariants only; mutation policy lives in [`crate::edit`] and
//! [`crate::timeline`].

/// Positioned visual elements
pub mod element;
/// Slides and their backgrounds
pub mod slide;
/// The slide sequence and its cursor
pub mod deck;

pub use deck::Deck;
pub use element::{
    AnimationIn, AnimationOut, Element, ElementKind, ElementType, Point, Size, Style,
};
pub use slide::{Background, BackgroundKind, Slide};
