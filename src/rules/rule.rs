//! Prerequisite and exclusion rules, and raw rule sets.

use serde::{Deserialize, Serialize};

use crate::core::{ClassId, GroupId, RuleRowId};

use super::clause::RawClause;

/// One prerequisite row.
///
/// Rows with the same `class_id` and `group` are ANDed together;
/// distinct groups for a class are ORed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteRule {
    /// Storage row id.
    pub row: RuleRowId,
    /// The class this rule gates.
    pub class_id: ClassId,
    /// Prerequisite group.
    pub group: GroupId,
    /// The condition.
    pub clause: RawClause,
}

impl PrerequisiteRule {
    /// Create a prerequisite row.
    #[must_use]
    pub const fn new(row: RuleRowId, class_id: ClassId, group: GroupId, clause: RawClause) -> Self {
        Self {
            row,
            class_id,
            group,
            clause,
        }
    }
}

/// One exclusion row. Any matching exclusion vetoes eligibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    /// Storage row id.
    pub row: RuleRowId,
    /// The class this rule gates.
    pub class_id: ClassId,
    /// The condition that, when satisfied, denies the class.
    pub clause: RawClause,
}

impl ExclusionRule {
    /// Create an exclusion row.
    #[must_use]
    pub const fn new(row: RuleRowId, class_id: ClassId, clause: RawClause) -> Self {
        Self {
            row,
            class_id,
            clause,
        }
    }
}

/// Unvalidated rules for any number of classes, in stored order.
///
/// This is what the storage layer hands over. It must go through the
/// resolver before it can be evaluated.
///
/// ## Example
///
/// ```
/// use class_eligibility::core::{ClassId, GroupId};
/// use class_eligibility::rules::{RawClause, RawRuleSet};
///
/// let paladin = ClassId::new(2);
/// let knight = ClassId::new(1);
///
/// let rules = RawRuleSet::new()
///     .with_prerequisite(paladin, GroupId::new(1), RawClause::specific_class(knight, 5))
///     .with_prerequisite(paladin, GroupId::new(2), RawClause::karma().at_least(500));
///
/// assert_eq!(rules.prerequisites().len(), 2);
/// assert!(rules.exclusions().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRows")]
pub struct RawRuleSet {
    prerequisites: Vec<PrerequisiteRule>,
    exclusions: Vec<ExclusionRule>,
    #[serde(skip)]
    next_row: u32,
}

/// Row lists as they appear in a storage export.
#[derive(Deserialize)]
struct StoredRows {
    #[serde(default)]
    prerequisites: Vec<PrerequisiteRule>,
    #[serde(default)]
    exclusions: Vec<ExclusionRule>,
}

impl From<StoredRows> for RawRuleSet {
    fn from(rows: StoredRows) -> Self {
        Self::from_rows(rows.prerequisites, rows.exclusions)
    }
}

impl RawRuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from rows loaded from storage.
    ///
    /// Auto-assigned row ids start above the highest loaded row. Duplicate
    /// row ids are kept as stored and rejected by validation.
    #[must_use]
    pub fn from_rows(
        prerequisites: impl IntoIterator<Item = PrerequisiteRule>,
        exclusions: impl IntoIterator<Item = ExclusionRule>,
    ) -> Self {
        let mut rules = Self::new();
        for rule in prerequisites {
            rules.push_prerequisite(rule);
        }
        for rule in exclusions {
            rules.push_exclusion(rule);
        }
        rules
    }

    /// Append a prerequisite row.
    pub fn push_prerequisite(&mut self, rule: PrerequisiteRule) {
        self.bump_row(rule.row);
        self.prerequisites.push(rule);
    }

    /// Append an exclusion row.
    pub fn push_exclusion(&mut self, rule: ExclusionRule) {
        self.bump_row(rule.row);
        self.exclusions.push(rule);
    }

    /// Append a prerequisite with an auto-assigned row id.
    ///
    /// Returns the assigned row id.
    pub fn add_prerequisite(&mut self, class_id: ClassId, group: GroupId, clause: RawClause) -> RuleRowId {
        let row = RuleRowId::new(self.next_row);
        self.push_prerequisite(PrerequisiteRule::new(row, class_id, group, clause));
        row
    }

    /// Append an exclusion with an auto-assigned row id.
    ///
    /// Returns the assigned row id.
    pub fn add_exclusion(&mut self, class_id: ClassId, clause: RawClause) -> RuleRowId {
        let row = RuleRowId::new(self.next_row);
        self.push_exclusion(ExclusionRule::new(row, class_id, clause));
        row
    }

    /// Add a prerequisite (builder pattern).
    #[must_use]
    pub fn with_prerequisite(mut self, class_id: ClassId, group: GroupId, clause: RawClause) -> Self {
        self.add_prerequisite(class_id, group, clause);
        self
    }

    /// Add an exclusion (builder pattern).
    #[must_use]
    pub fn with_exclusion(mut self, class_id: ClassId, clause: RawClause) -> Self {
        self.add_exclusion(class_id, clause);
        self
    }

    fn bump_row(&mut self, row: RuleRowId) {
        self.next_row = self.next_row.max(row.raw().saturating_add(1));
    }

    /// All prerequisite rows in stored order.
    #[must_use]
    pub fn prerequisites(&self) -> &[PrerequisiteRule] {
        &self.prerequisites
    }

    /// All exclusion rows in stored order.
    #[must_use]
    pub fn exclusions(&self) -> &[ExclusionRule] {
        &self.exclusions
    }

    /// Total number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prerequisites.len() + self.exclusions.len()
    }

    /// Are there no rows at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty() && self.exclusions.is_empty()
    }
}
