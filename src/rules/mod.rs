//! Rule model: clauses, prerequisite and exclusion rules, raw rule sets.
//!
//! ## Key Types
//!
//! - [`ClauseKind`]: The closed set of things a clause can check
//! - [`RawClause`]: A clause as stored, possibly inconsistent
//! - [`Clause`]: A validated clause, one variant per kind
//! - [`PrerequisiteRule`] / [`ExclusionRule`]: Rows tying a clause to a class
//! - [`RawRuleSet`]: Rows for any number of classes, awaiting validation
//!
//! ## Grouping
//!
//! A class's prerequisites form an OR of ANDs: rows that share a group
//! number must all hold, and at least one group must hold. A class with
//! no prerequisite rows is open to everyone. Exclusions are a flat list;
//! any one that holds denies the class.

mod clause;
mod rule;

pub use clause::{Clause, ClauseKind, LevelBounds, RawClause, TargetRef, TargetSpace};
pub use rule::{ExclusionRule, PrerequisiteRule, RawRuleSet};
