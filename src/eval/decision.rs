//! Decision reports.
//!
//! A [`Decision`] carries everything the UI needs to render an
//! eligible/ineligible badge and explain why, without re-running the
//! rules.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogLookup;
use crate::core::GroupId;
use crate::rules::Clause;

/// A prerequisite group that did not hold, with the clauses that failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetGroup {
    /// Group number.
    pub group: GroupId,
    /// The group's unsatisfied clauses, in stored order.
    pub unmet: Vec<Clause>,
}

/// Why a class is not unlockable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// An exclusion clause matched.
    Excluded(Clause),
    /// No prerequisite group was satisfied. Lists every group in
    /// ascending order.
    UnmetPrerequisites(Vec<UnmetGroup>),
}

/// Outcome of evaluating one class for one character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The class can be unlocked.
    Eligible,
    /// The class cannot be unlocked.
    Denied {
        /// Why.
        reason: DenialReason,
    },
}

impl Decision {
    /// Is the class unlockable?
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// The denial reason, if denied.
    #[must_use]
    pub const fn reason(&self) -> Option<&DenialReason> {
        match self {
            Self::Eligible => None,
            Self::Denied { reason } => Some(reason),
        }
    }

    /// The exclusion clause that denied the class, if any.
    #[must_use]
    pub const fn excluded_by(&self) -> Option<&Clause> {
        match self {
            Self::Denied {
                reason: DenialReason::Excluded(clause),
            } => Some(clause),
            _ => None,
        }
    }

    /// The unmet prerequisite groups, if denied for that reason.
    #[must_use]
    pub fn unmet_groups(&self) -> Option<&[UnmetGroup]> {
        match self {
            Self::Denied {
                reason: DenialReason::UnmetPrerequisites(groups),
            } => Some(groups.as_slice()),
            _ => None,
        }
    }

    /// Render a human-readable explanation using catalog names.
    ///
    /// ```
    /// use class_eligibility::catalog::InMemoryCatalog;
    /// use class_eligibility::eval::{Decision, DenialReason};
    /// use class_eligibility::rules::{Clause, LevelBounds};
    ///
    /// let catalog = InMemoryCatalog::new();
    /// let decision = Decision::Denied {
    ///     reason: DenialReason::Excluded(Clause::Karma { bounds: LevelBounds::at_most(-800) }),
    /// };
    ///
    /// assert_eq!(decision.explain(&catalog), "Excluded: karma <= -800");
    /// assert_eq!(Decision::Eligible.explain(&catalog), "Eligible");
    /// ```
    #[must_use]
    pub fn explain(&self, catalog: &impl CatalogLookup) -> String {
        match self {
            Self::Eligible => "Eligible".to_string(),
            Self::Denied {
                reason: DenialReason::Excluded(clause),
            } => format!("Excluded: {}", clause.describe(catalog)),
            Self::Denied {
                reason: DenialReason::UnmetPrerequisites(groups),
            } => {
                let mut text = String::from("Requirements not met:");
                for group in groups {
                    let clauses: Vec<_> = group.unmet.iter().map(|c| c.describe(catalog)).collect();
                    let _ = write!(text, "\n  option {}: {}", group.group.raw(), clauses.join(", "));
                }
                text
            }
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eligible => f.write_str("eligible"),
            Self::Denied {
                reason: DenialReason::Excluded(clause),
            } => write!(f, "denied (excluded by {clause})"),
            Self::Denied {
                reason: DenialReason::UnmetPrerequisites(groups),
            } => write!(f, "denied ({} unmet prerequisite groups)", groups.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClassEntry, InMemoryCatalog};
    use crate::core::ClassId;
    use crate::rules::LevelBounds;

    fn unmet() -> Decision {
        Decision::Denied {
            reason: DenialReason::UnmetPrerequisites(vec![
                UnmetGroup {
                    group: GroupId::new(1),
                    unmet: vec![Clause::SpecificClass { class: ClassId::new(1), required_level: 5 }],
                },
                UnmetGroup {
                    group: GroupId::new(2),
                    unmet: vec![
                        Clause::Karma { bounds: LevelBounds::at_least(500) },
                        Clause::SpecificClass { class: ClassId::new(9), required_level: 2 },
                    ],
                },
            ]),
        }
    }

    #[test]
    fn test_accessors() {
        assert!(Decision::Eligible.is_eligible());
        assert!(Decision::Eligible.reason().is_none());

        let excluded = Decision::Denied {
            reason: DenialReason::Excluded(Clause::Karma { bounds: LevelBounds::at_most(0) }),
        };
        assert!(!excluded.is_eligible());
        assert_eq!(
            excluded.excluded_by(),
            Some(&Clause::Karma { bounds: LevelBounds::at_most(0) })
        );
        assert!(excluded.unmet_groups().is_none());

        let unmet = unmet();
        assert!(unmet.excluded_by().is_none());
        assert_eq!(unmet.unmet_groups().map(<[UnmetGroup]>::len), Some(2));
    }

    #[test]
    fn test_explain_with_names() {
        let mut catalog = InMemoryCatalog::new();
        catalog.register_class(ClassEntry::new(ClassId::new(1), "Knight")).unwrap();

        assert_eq!(
            unmet().explain(&catalog),
            "Requirements not met:\n  option 1: Knight level >= 5\n  option 2: karma >= 500, Class(9) level >= 2"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Decision::Eligible.to_string(), "eligible");
        assert_eq!(unmet().to_string(), "denied (2 unmet prerequisite groups)");
    }

    #[test]
    fn test_decision_serialization() {
        let decision = unmet();
        let json = serde_json::to_string(&decision).unwrap();
        let deserialized: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(decision, deserialized);
    }
}
