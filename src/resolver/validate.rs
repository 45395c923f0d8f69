//! The validation pass.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::catalog::CatalogLookup;
use crate::core::{ClassId, GroupId, RuleRowId, ValidationOptions};
use crate::rules::{Clause, ClauseKind, RawClause, RawRuleSet, TargetRef};

use super::error::{ClauseField, RuleLocation, ValidationError, ValidationWarning};
use super::validated::{ClassRules, PrerequisiteGroup, RuleEntry, ValidatedRuleSet};

/// Validate a raw rule set with default options.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found. Exclusions are checked
/// before prerequisites, each in stored order.
pub fn validate(
    raw: &RawRuleSet,
    catalog: &impl CatalogLookup,
) -> Result<ValidatedRuleSet, ValidationError> {
    validate_with(raw, catalog, &ValidationOptions::default())
}

/// Validate a raw rule set.
///
/// Checks every clause's kind/target consistency and bounds, resolves
/// targets and quest/achievement links against `catalog`, and groups
/// prerequisites by class and group number. The result depends only on
/// the inputs, so validating the same rule set twice gives equal values.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found. Exclusions are checked
/// before prerequisites, each in stored order.
pub fn validate_with(
    raw: &RawRuleSet,
    catalog: &impl CatalogLookup,
    options: &ValidationOptions,
) -> Result<ValidatedRuleSet, ValidationError> {
    let mut resolver = Resolver {
        catalog,
        options,
        warnings: Vec::new(),
        seen_rows: FxHashSet::default(),
    };
    let mut classes: BTreeMap<ClassId, ClassRules> = BTreeMap::new();

    for rule in raw.exclusions() {
        let location = RuleLocation::exclusion(rule.class_id, rule.row);
        resolver.check_row(location)?;
        resolver.check_class(rule.class_id, location)?;
        let clause = resolver.resolve(&rule.clause, rule.row, location)?;

        classes
            .entry(rule.class_id)
            .or_default()
            .exclusions
            .push(RuleEntry { row: rule.row, clause });
    }

    let mut groups: BTreeMap<ClassId, BTreeMap<GroupId, PrerequisiteGroup>> = BTreeMap::new();
    for rule in raw.prerequisites() {
        let location = RuleLocation::prerequisite(rule.class_id, rule.group, rule.row);
        resolver.check_row(location)?;
        resolver.check_class(rule.class_id, location)?;

        if !rule.clause.kind.allowed_in_prerequisite() {
            return Err(ValidationError::KindNotAllowed {
                location,
                kind: rule.clause.kind,
            });
        }
        let clause = resolver.resolve(&rule.clause, rule.row, location)?;
        if matches!(clause, Clause::SpecificClass { class, .. } if class == rule.class_id) {
            return Err(ValidationError::SelfPrerequisite { location });
        }

        let group = groups
            .entry(rule.class_id)
            .or_default()
            .entry(rule.group)
            .or_insert_with(|| PrerequisiteGroup::new(rule.group));
        if options.reject_duplicate_clauses && group.clauses().any(|c| *c == clause) {
            return Err(ValidationError::DuplicateGroupClauseConflict {
                location,
                group: rule.group,
            });
        }
        group.entries.push(RuleEntry { row: rule.row, clause });
    }

    for (class_id, class_groups) in groups {
        classes.entry(class_id).or_default().groups = class_groups.into_values().collect();
    }

    for warning in &resolver.warnings {
        tracing::warn!(%warning, "rule validation warning");
    }
    tracing::debug!(
        rows = raw.len(),
        classes = classes.len(),
        warnings = resolver.warnings.len(),
        "validated rule set"
    );

    Ok(ValidatedRuleSet {
        classes,
        warnings: resolver.warnings,
    })
}

/// Per-pass state: the catalog, options, collected warnings and the row
/// ids seen so far.
struct Resolver<'a, C: ?Sized> {
    catalog: &'a C,
    options: &'a ValidationOptions,
    warnings: Vec<ValidationWarning>,
    seen_rows: FxHashSet<RuleRowId>,
}

impl<C: CatalogLookup + ?Sized> Resolver<'_, C> {
    /// Row ids key the catalog's quest/achievement links, so they must be
    /// unique across both lists.
    fn check_row(&mut self, location: RuleLocation) -> Result<(), ValidationError> {
        if self.seen_rows.insert(location.row) {
            Ok(())
        } else {
            Err(ValidationError::DuplicateRow { location })
        }
    }

    fn check_class(&self, class_id: ClassId, location: RuleLocation) -> Result<(), ValidationError> {
        if self.catalog.has_class(class_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownClass { location })
        }
    }

    fn resolve(
        &mut self,
        raw: &RawClause,
        row: RuleRowId,
        location: RuleLocation,
    ) -> Result<Clause, ValidationError> {
        let bounds = raw.bounds();
        if raw.kind.is_bounded() {
            if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
                if min > max {
                    return Err(ValidationError::InvertedBounds { location, min, max });
                }
            }
        }

        let clause = match (raw.kind, raw.target) {
            (ClauseKind::SpecificClass, Some(TargetRef::Class(class))) => {
                let required_level = raw
                    .required_level
                    .ok_or(ValidationError::MissingRequiredLevel { location })?;
                Clause::SpecificClass { class, required_level }
            }
            (ClauseKind::CategoryTotal, Some(TargetRef::Category(category))) => {
                Clause::CategoryTotal { category, bounds }
            }
            (ClauseKind::SubcategoryTotal, Some(TargetRef::Subcategory(subcategory))) => {
                Clause::SubcategoryTotal { subcategory, bounds }
            }
            (ClauseKind::RacialTotal, None) => Clause::RacialTotal { bounds },
            (ClauseKind::Karma, None) => Clause::Karma { bounds },
            (ClauseKind::Quest, None) => {
                let quest = self.catalog.quest_for_rule(row).ok_or(ValidationError::UnlinkedRule {
                    location,
                    kind: ClauseKind::Quest,
                })?;
                Clause::Quest { quest }
            }
            (ClauseKind::Achievement, None) => {
                let achievement =
                    self.catalog
                        .achievement_for_rule(row)
                        .ok_or(ValidationError::UnlinkedRule {
                            location,
                            kind: ClauseKind::Achievement,
                        })?;
                Clause::Achievement { achievement }
            }
            (kind, target) => {
                return Err(ValidationError::InvalidTargetKind { location, kind, target });
            }
        };

        if let Some(target) = clause.target() {
            if !self.catalog.resolves(&target) {
                return Err(ValidationError::UnresolvedTarget { location, target });
            }
        }

        self.note_unused_fields(raw, location);
        Ok(clause)
    }

    fn note_unused_fields(&mut self, raw: &RawClause, location: RuleLocation) {
        let kind = raw.kind;
        let mut ignored = Vec::new();

        if kind != ClauseKind::SpecificClass && raw.required_level.is_some() {
            ignored.push(ClauseField::RequiredLevel);
        }
        if kind.is_bounded() {
            if raw.bounds().is_unbounded() && self.options.warn_unbounded {
                self.warnings.push(ValidationWarning::Unbounded { location, kind });
            }
        } else {
            if raw.min_value.is_some() {
                ignored.push(ClauseField::MinValue);
            }
            if raw.max_value.is_some() {
                ignored.push(ClauseField::MaxValue);
            }
        }

        self.warnings.extend(
            ignored
                .into_iter()
                .map(|field| ValidationWarning::IgnoredField { location, kind, field }),
        );
    }
}
