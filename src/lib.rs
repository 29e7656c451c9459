//! tagprune - count and prune tags in plain-text tag files
//!
//! Each `.txt` file under a root holds one tag per line, optionally prefixed
//! with a `namespace:`. tagprune aggregates tag counts across the tree,
//! matches tags against banned rules and rewrites files with the selected
//! tags removed, backing up every file it touches first.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagpruneError;
