//! Eligibility evaluation and decision reports.
//!
//! ## Key Types
//!
//! - [`evaluate`]: Decide one class for one character
//! - [`evaluate_traced`]: Same, with a step-by-step [`Evaluation`] trace
//! - [`unlockable_classes`] / [`eligible_classes`]: Every class at once
//! - [`Decision`]: `Eligible`, or `Denied` with a [`DenialReason`]
//! - [`ClauseEvaluator`]: Per-clause satisfaction checks
//!
//! ## Concurrency
//!
//! Evaluation is a pure function of a class id, a borrowed snapshot and
//! a borrowed [`ValidatedRuleSet`](crate::resolver::ValidatedRuleSet).
//! Nothing is mutated, so any number of threads may evaluate against the
//! same rule set at once.
//!
//! ## Example
//!
//! ```
//! use class_eligibility::catalog::{ClassEntry, InMemoryCatalog};
//! use class_eligibility::core::{ClassId, GroupId, ProgressionSnapshot};
//! use class_eligibility::eval::{evaluate, Decision};
//! use class_eligibility::resolver::validate;
//! use class_eligibility::rules::{RawClause, RawRuleSet};
//!
//! let knight = ClassId::new(1);
//! let paladin = ClassId::new(2);
//!
//! let mut catalog = InMemoryCatalog::new();
//! catalog.register_class(ClassEntry::new(knight, "Knight")).unwrap();
//! catalog.register_class(ClassEntry::new(paladin, "Paladin")).unwrap();
//!
//! let raw = RawRuleSet::new()
//!     .with_prerequisite(paladin, GroupId::new(1), RawClause::specific_class(knight, 5))
//!     .with_prerequisite(paladin, GroupId::new(2), RawClause::karma().at_least(500));
//! let rules = validate(&raw, &catalog).unwrap();
//!
//! let snapshot = ProgressionSnapshot::builder()
//!     .class_level(knight, 3)
//!     .karma(600)
//!     .build();
//!
//! assert_eq!(evaluate(paladin, &snapshot, &rules), Decision::Eligible);
//! ```

mod decision;
mod evaluator;
mod trace;

pub use decision::{Decision, DenialReason, UnmetGroup};
pub use evaluator::{eligible_classes, evaluate, evaluate_traced, unlockable_classes, ClauseEvaluator};
pub use trace::{Evaluation, TraceStep};
