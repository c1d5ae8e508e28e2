//! Property tests for the tree select.
//!
//! Random forests reuse caller ids heavily (every sibling list counts from
//! `n0`), so identity bugs across groups and levels surface quickly.
//!
//! Run with: `cargo test -p arbor-widgets --test properties`

#[path = "properties/forest.rs"]
mod forest;

#[path = "properties/identity.rs"]
mod identity;

#[path = "properties/filtering.rs"]
mod filtering;
