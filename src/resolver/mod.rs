//! Target resolution and rule-set validation.
//!
//! Raw rows from storage are checked once and turned into a
//! [`ValidatedRuleSet`], the only form the evaluator accepts:
//!
//! - each clause's target must be present exactly for the kinds that
//!   take one, and point into the right entity space
//! - targets must exist in the catalog, and quest/achievement rows must
//!   be linked to a quest/achievement
//! - bounds must not be inverted
//!
//! Validation is side-effect free apart from `tracing` output, so the
//! result can be cached and reused for any number of evaluations.

mod error;
mod validate;
mod validated;

pub use error::{ClauseField, RuleLocation, RulePosition, ValidationError, ValidationWarning};
pub use validate::{validate, validate_with};
pub use validated::{ClassRules, PrerequisiteGroup, RuleEntry, ValidatedRuleSet};
