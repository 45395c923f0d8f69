//! # class-eligibility
//!
//! Decides whether a character may unlock a class.
//!
//! Game data describes each class's requirements as rows: prerequisite
//! clauses grouped into an OR of ANDs, and exclusion clauses that veto
//! the class if any one matches. This crate validates those rows once
//! against a catalog of known ids, then evaluates them against a
//! character's progression snapshot to produce an allow/deny
//! [`Decision`] with an explanation.
//!
//! ## Design Principles
//!
//! 1. **Validate once, evaluate often**: Rules change at authoring time,
//!    evaluations happen on every level-up screen. All checking happens
//!    in [`validate`]; [`evaluate`] cannot fail.
//!
//! 2. **Invalid rules are unrepresentable**: A validated [`Clause`] is a
//!    tagged enum carrying exactly what its kind needs.
//!
//! 3. **No I/O, no state**: Storage and UI are collaborators. The engine
//!    borrows snapshots and rule sets and never mutates them.
//!
//! ## Modules
//!
//! - `core`: Identifiers, progression snapshots, configuration
//! - `rules`: Clause kinds, raw and validated clauses, rule rows
//! - `catalog`: The catalog lookup trait and an in-memory catalog
//! - `resolver`: Target resolution and rule-set validation
//! - `eval`: The evaluator, decision reports and traces

pub mod core;
pub mod rules;
pub mod catalog;
pub mod resolver;
pub mod eval;

// Re-export commonly used types
pub use crate::core::{
    AchievementId, CategoryId, ClassId, GroupId, QuestId, RuleRowId, SubcategoryId,
    ProgressionSnapshot, SnapshotBuilder,
    ConfigError, EngineConfig, ValidationOptions,
};

pub use crate::rules::{
    Clause, ClauseKind, LevelBounds, RawClause, TargetRef, TargetSpace,
    ExclusionRule, PrerequisiteRule, RawRuleSet,
};

pub use crate::catalog::{CatalogError, CatalogLookup, ClassEntry, InMemoryCatalog};

pub use crate::resolver::{
    validate, validate_with,
    ClassRules, PrerequisiteGroup, RuleEntry, ValidatedRuleSet,
    ClauseField, RuleLocation, RulePosition, ValidationError, ValidationWarning,
};

pub use crate::eval::{
    evaluate, evaluate_traced, eligible_classes, unlockable_classes,
    ClauseEvaluator, Decision, DenialReason, Evaluation, TraceStep, UnmetGroup,
};
