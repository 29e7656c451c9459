//! Domain layer - Business logic and domain models

pub mod tags;

pub use tags::{
    BannedRules, LineEnding, MatchMode, RemovalSet, Selection, Tag, TagAggregate, TagFile,
};
