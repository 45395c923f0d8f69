//! Validation errors and warnings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ClassId, GroupId, RuleRowId};
use crate::rules::{ClauseKind, TargetRef};

/// Which list a rule row came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RulePosition {
    /// A prerequisite row in the given group.
    Prerequisite(GroupId),
    /// An exclusion row.
    Exclusion,
}

/// Where a validation problem was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleLocation {
    /// The class the rule gates.
    pub class_id: ClassId,
    /// Prerequisite group or exclusion.
    pub position: RulePosition,
    /// Storage row id.
    pub row: RuleRowId,
}

impl RuleLocation {
    /// Location of a prerequisite row.
    #[must_use]
    pub const fn prerequisite(class_id: ClassId, group: GroupId, row: RuleRowId) -> Self {
        Self {
            class_id,
            position: RulePosition::Prerequisite(group),
            row,
        }
    }

    /// Location of an exclusion row.
    #[must_use]
    pub const fn exclusion(class_id: ClassId, row: RuleRowId) -> Self {
        Self {
            class_id,
            position: RulePosition::Exclusion,
            row,
        }
    }
}

impl std::fmt::Display for RuleLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            RulePosition::Prerequisite(group) => {
                write!(f, "{} prerequisite {} {}", self.class_id, group, self.row)
            }
            RulePosition::Exclusion => write!(f, "{} exclusion {}", self.class_id, self.row),
        }
    }
}

fn describe_target(target: &Option<TargetRef>) -> String {
    match target {
        Some(target) => format!("target {target}"),
        None => "no target".to_string(),
    }
}

/// A rule set that cannot be evaluated.
///
/// These are recoverable at the authoring boundary: the editor shows the
/// error and refuses to persist the rule set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The clause's target is present when it must be absent, absent when
    /// it must be present, or points into the wrong entity space.
    #[error("{location}: {kind} clause cannot have {}", describe_target(.target))]
    InvalidTargetKind {
        /// Offending row.
        location: RuleLocation,
        /// Declared clause kind.
        kind: ClauseKind,
        /// Target as stored.
        target: Option<TargetRef>,
    },

    /// The target does not exist in the catalog.
    #[error("{location}: {target} does not exist")]
    UnresolvedTarget {
        /// Offending row.
        location: RuleLocation,
        /// The unknown target.
        target: TargetRef,
    },

    /// A quest or achievement row has no catalog link.
    #[error("{location}: {kind} clause is not linked to any {kind}")]
    UnlinkedRule {
        /// Offending row.
        location: RuleLocation,
        /// `Quest` or `Achievement`.
        kind: ClauseKind,
    },

    /// Another row already uses this row id.
    #[error("{location}: row id is already used by another rule")]
    DuplicateRow {
        /// The second occurrence.
        location: RuleLocation,
    },

    /// The gated class does not exist in the catalog.
    #[error("{location}: gated class does not exist")]
    UnknownClass {
        /// Offending row.
        location: RuleLocation,
    },

    /// A `SpecificClass` clause without a required level.
    #[error("{location}: SpecificClass clause has no required level")]
    MissingRequiredLevel {
        /// Offending row.
        location: RuleLocation,
    },

    /// `min_value` is greater than `max_value`.
    #[error("{location}: min {min} is greater than max {max}")]
    InvertedBounds {
        /// Offending row.
        location: RuleLocation,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },

    /// The clause kind may not be used in this position.
    #[error("{location}: {kind} clauses are only allowed in exclusions")]
    KindNotAllowed {
        /// Offending row.
        location: RuleLocation,
        /// The disallowed kind.
        kind: ClauseKind,
    },

    /// A prerequisite requires levels in the class it unlocks.
    #[error("{location}: class cannot require levels in itself")]
    SelfPrerequisite {
        /// Offending row.
        location: RuleLocation,
    },

    /// The same clause appears twice in one prerequisite group.
    #[error("{location}: duplicate clause in {group}")]
    DuplicateGroupClauseConflict {
        /// The second occurrence.
        location: RuleLocation,
        /// The group containing both.
        group: GroupId,
    },
}

impl ValidationError {
    /// The row the error refers to.
    #[must_use]
    pub const fn location(&self) -> RuleLocation {
        match self {
            Self::InvalidTargetKind { location, .. }
            | Self::UnresolvedTarget { location, .. }
            | Self::UnlinkedRule { location, .. }
            | Self::DuplicateRow { location }
            | Self::UnknownClass { location }
            | Self::MissingRequiredLevel { location }
            | Self::InvertedBounds { location, .. }
            | Self::KindNotAllowed { location, .. }
            | Self::SelfPrerequisite { location }
            | Self::DuplicateGroupClauseConflict { location, .. } => *location,
        }
    }
}

/// A stored field a clause kind does not use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseField {
    /// `required_level`.
    RequiredLevel,
    /// `min_value`.
    MinValue,
    /// `max_value`.
    MaxValue,
}

impl std::fmt::Display for ClauseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RequiredLevel => "required_level",
            Self::MinValue => "min_value",
            Self::MaxValue => "max_value",
        };
        f.write_str(name)
    }
}

/// A suspicious but evaluable rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationWarning {
    /// A bounded clause with neither bound set. It always passes.
    Unbounded {
        /// Offending row.
        location: RuleLocation,
        /// Clause kind.
        kind: ClauseKind,
    },

    /// A value was stored in a field the clause kind ignores.
    IgnoredField {
        /// Offending row.
        location: RuleLocation,
        /// Clause kind.
        kind: ClauseKind,
        /// The ignored field.
        field: ClauseField,
    },
}

impl ValidationWarning {
    /// The row the warning refers to.
    #[must_use]
    pub const fn location(&self) -> RuleLocation {
        match self {
            Self::Unbounded { location, .. } | Self::IgnoredField { location, .. } => *location,
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbounded { location, kind } => {
                write!(f, "{location}: {kind} clause has no bounds and always passes")
            }
            Self::IgnoredField { location, kind, field } => {
                write!(f, "{location}: {kind} clause ignores {field}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CategoryId;

    #[test]
    fn test_location_display() {
        let prereq = RuleLocation::prerequisite(ClassId::new(2), GroupId::new(1), RuleRowId::new(4));
        assert_eq!(prereq.to_string(), "Class(2) prerequisite Group(1) Row(4)");

        let exclusion = RuleLocation::exclusion(ClassId::new(2), RuleRowId::new(5));
        assert_eq!(exclusion.to_string(), "Class(2) exclusion Row(5)");
    }

    #[test]
    fn test_error_messages() {
        let location = RuleLocation::exclusion(ClassId::new(1), RuleRowId::new(0));

        let err = ValidationError::InvalidTargetKind {
            location,
            kind: ClauseKind::Karma,
            target: Some(TargetRef::Category(CategoryId::new(3))),
        };
        assert_eq!(
            err.to_string(),
            "Class(1) exclusion Row(0): Karma clause cannot have target Category(3)"
        );

        let err = ValidationError::InvalidTargetKind {
            location,
            kind: ClauseKind::SpecificClass,
            target: None,
        };
        assert_eq!(
            err.to_string(),
            "Class(1) exclusion Row(0): SpecificClass clause cannot have no target"
        );

        let err = ValidationError::InvertedBounds { location, min: 5, max: 1 };
        assert_eq!(err.to_string(), "Class(1) exclusion Row(0): min 5 is greater than max 1");
        assert_eq!(err.location(), location);
    }

    #[test]
    fn test_warning_display() {
        let location = RuleLocation::prerequisite(ClassId::new(1), GroupId::new(2), RuleRowId::new(3));
        let warning = ValidationWarning::IgnoredField {
            location,
            kind: ClauseKind::Quest,
            field: ClauseField::MinValue,
        };
        assert_eq!(
            warning.to_string(),
            "Class(1) prerequisite Group(2) Row(3): Quest clause ignores min_value"
        );
        assert_eq!(warning.location(), location);
    }
}
