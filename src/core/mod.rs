//! Core types: identifiers, progression snapshots, configuration.
//!
//! These are the leaf types every other module builds on. Nothing here
//! knows about rules or evaluation; deriving snapshot totals only needs
//! the catalog lookup trait.

pub mod config;
pub mod ids;
pub mod snapshot;

pub use config::{ConfigError, EngineConfig, ValidationOptions};
pub use ids::{AchievementId, CategoryId, ClassId, GroupId, QuestId, RuleRowId, SubcategoryId};
pub use snapshot::{ProgressionSnapshot, SnapshotBuilder};
