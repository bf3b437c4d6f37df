//! `wrapdeck` - story-style slide decks.
//!
//! Decks are ordered slides of absolutely positioned elements. This crate
//! provides the deck model, an edit session that keeps z-order and
//! selection consistent, an autoplay timeline with enter/exit animations,
//! persistence with share links, and a terminal editor built on ratatui.

// Re-export public modules for use in integration tests and as a library
pub mod animation;
pub mod app;
pub mod assistant;
pub mod config;
pub mod constants;
pub mod edit;
pub mod error;
pub mod input;
pub mod media;
pub mod model;
pub mod presets;
pub mod scheduler;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod style;
pub mod text_input;
pub mod timeline;
pub mod types;
pub mod ui;
pub mod workspace;
