//! Validated rule sets.
//!
//! A `ValidatedRuleSet` is the only input the evaluator accepts. It can
//! only be produced by [`validate`](super::validate), so holding one
//! proves every clause is well-formed and every target exists.
//!
//! The set is plain immutable data. Build it once when rules are loaded
//! or edited and share it (e.g. behind an `Arc`) across evaluations.

use std::collections::BTreeMap;

use serde::Serialize;
use smallvec::SmallVec;

use crate::core::{ClassId, GroupId, RuleRowId};
use crate::rules::Clause;

use super::error::ValidationWarning;

/// A validated clause together with the row it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RuleEntry {
    /// Storage row id.
    pub row: RuleRowId,
    /// The validated clause.
    pub clause: Clause,
}

/// One prerequisite group: every clause must hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrerequisiteGroup {
    /// Group number.
    pub id: GroupId,
    /// Member clauses in stored order.
    ///
    /// SmallVec keeps typical groups (one to four clauses) inline.
    pub entries: SmallVec<[RuleEntry; 4]>,
}

impl PrerequisiteGroup {
    pub(crate) fn new(id: GroupId) -> Self {
        Self {
            id,
            entries: SmallVec::new(),
        }
    }

    /// Iterate over the group's clauses.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.entries.iter().map(|entry| &entry.clause)
    }
}

/// All validated rules for one class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClassRules {
    pub(crate) exclusions: Vec<RuleEntry>,
    pub(crate) groups: Vec<PrerequisiteGroup>,
}

impl ClassRules {
    /// Exclusions in stored order.
    #[must_use]
    pub fn exclusions(&self) -> &[RuleEntry] {
        &self.exclusions
    }

    /// Prerequisite groups in ascending group order.
    #[must_use]
    pub fn groups(&self) -> &[PrerequisiteGroup] {
        &self.groups
    }

    /// Does this class have any prerequisite groups?
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.groups.is_empty()
    }
}

/// Validated rules for any number of classes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidatedRuleSet {
    pub(crate) classes: BTreeMap<ClassId, ClassRules>,
    pub(crate) warnings: Vec<ValidationWarning>,
}

impl ValidatedRuleSet {
    /// Rules for a class, if it has any.
    #[must_use]
    pub fn rules_for(&self, class: ClassId) -> Option<&ClassRules> {
        self.classes.get(&class)
    }

    /// Classes that have at least one rule, ascending.
    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes.keys().copied()
    }

    /// Non-fatal issues found during validation.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Number of classes with rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Are there no rules at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
