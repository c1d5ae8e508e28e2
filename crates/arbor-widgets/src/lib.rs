//! Widgets for the **arbor** toolkit.
//!
//! Every widget implements [`arbor_core::Component`], so it can be embedded
//! inside any [`arbor_core::Model`] and placed freely within [`ratatui`]
//! layouts.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tree_select`] | Drill-down selector over labelled root groups, with search and incremental loading |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Key-binding helpers |
//! | [`runeutil`] | Unicode-aware string width and truncation |
//! | [`selection`] | Cursor and scroll state over partly selectable rows |

pub mod key;
pub mod runeutil;
pub mod selection;
pub mod tree_select;
