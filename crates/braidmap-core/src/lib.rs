//! Braidmap Core Library
//!
//! The mind-map document engine: turns an editable indented outline into a
//! validated tree with stable node identities, explicit cross-links and
//! attached study records, then writes the computed structure back into the
//! same text as compact inline tags.

pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod graph;
pub mod group;
pub mod line;
pub mod logging;
pub mod overlay;
pub mod path;
pub mod scheduler;
pub mod settings;
pub mod slug;
pub mod sync;
pub mod tag;
pub mod warning;
