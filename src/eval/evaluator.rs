//! The eligibility evaluator.
//!
//! Evaluation runs in two passes:
//!
//! 1. **Exclusions**, in stored order. The first one satisfied by the
//!    snapshot denies the class and nothing else is checked.
//! 2. **Prerequisites**, group by group in ascending group order. Every
//!    clause of a group is checked so the report can list all that
//!    failed. The first fully satisfied group makes the class eligible.
//!    A class with no groups is eligible.
//!
//! Evaluation cannot fail: the rule set was validated up front and
//! nothing here does I/O.

use crate::core::{ClassId, ProgressionSnapshot};
use crate::resolver::ValidatedRuleSet;
use crate::rules::Clause;

use super::decision::{Decision, DenialReason, UnmetGroup};
use super::trace::{Evaluation, NoTrace, TraceStep, Tracer};

/// Clause satisfaction checks.
pub struct ClauseEvaluator;

impl ClauseEvaluator {
    /// Does the snapshot satisfy the clause?
    ///
    /// ```
    /// use class_eligibility::core::{ClassId, ProgressionSnapshot};
    /// use class_eligibility::eval::ClauseEvaluator;
    /// use class_eligibility::rules::{Clause, LevelBounds};
    ///
    /// let snapshot = ProgressionSnapshot::builder()
    ///     .class_level(ClassId::new(1), 5)
    ///     .karma(100)
    ///     .build();
    ///
    /// let knight_5 = Clause::SpecificClass { class: ClassId::new(1), required_level: 5 };
    /// let karma_500 = Clause::Karma { bounds: LevelBounds::at_least(500) };
    ///
    /// assert!(ClauseEvaluator::is_satisfied(&knight_5, &snapshot));
    /// assert!(!ClauseEvaluator::is_satisfied(&karma_500, &snapshot));
    /// ```
    #[must_use]
    pub fn is_satisfied(clause: &Clause, snapshot: &ProgressionSnapshot) -> bool {
        match *clause {
            Clause::SpecificClass { class, required_level } => {
                snapshot.class_level(class) >= required_level
            }
            Clause::CategoryTotal { category, bounds } => {
                bounds.contains(snapshot.category_total(category))
            }
            Clause::SubcategoryTotal { subcategory, bounds } => {
                bounds.contains(snapshot.subcategory_total(subcategory))
            }
            Clause::RacialTotal { bounds } => bounds.contains(snapshot.racial_total()),
            Clause::Karma { bounds } => bounds.contains(snapshot.karma()),
            Clause::Quest { quest } => snapshot.has_completed(quest),
            Clause::Achievement { achievement } => snapshot.has_achievement(achievement),
        }
    }
}

/// Decide whether a character may unlock a class.
///
/// Classes without rules in `rules` are eligible.
#[must_use]
pub fn evaluate(class: ClassId, snapshot: &ProgressionSnapshot, rules: &ValidatedRuleSet) -> Decision {
    run(class, snapshot, rules, &mut NoTrace)
}

/// Like [`evaluate`], but also returns every check made.
#[must_use]
pub fn evaluate_traced(
    class: ClassId,
    snapshot: &ProgressionSnapshot,
    rules: &ValidatedRuleSet,
) -> Evaluation {
    let mut trace = Vec::new();
    let decision = run(class, snapshot, rules, &mut trace);
    Evaluation { decision, trace }
}

/// Evaluate every class that has rules, ascending by class id.
///
/// Classes absent from `rules` are unconditionally eligible and are not
/// listed.
#[must_use]
pub fn unlockable_classes(
    snapshot: &ProgressionSnapshot,
    rules: &ValidatedRuleSet,
) -> Vec<(ClassId, Decision)> {
    rules
        .classes()
        .map(|class| (class, evaluate(class, snapshot, rules)))
        .collect()
}

/// The classes with rules that the character can unlock, ascending.
#[must_use]
pub fn eligible_classes(snapshot: &ProgressionSnapshot, rules: &ValidatedRuleSet) -> Vec<ClassId> {
    rules
        .classes()
        .filter(|&class| evaluate(class, snapshot, rules).is_eligible())
        .collect()
}

fn run(
    class: ClassId,
    snapshot: &ProgressionSnapshot,
    rules: &ValidatedRuleSet,
    tracer: &mut impl Tracer,
) -> Decision {
    let Some(class_rules) = rules.rules_for(class) else {
        tracing::debug!(%class, "no rules; eligible");
        return Decision::Eligible;
    };

    for entry in class_rules.exclusions() {
        let matched = ClauseEvaluator::is_satisfied(&entry.clause, snapshot);
        tracer.record(|| TraceStep::ExclusionChecked {
            row: entry.row,
            clause: entry.clause,
            matched,
        });
        if matched {
            tracing::debug!(%class, clause = %entry.clause, "excluded");
            return Decision::Denied {
                reason: DenialReason::Excluded(entry.clause),
            };
        }
    }

    let mut unmet_groups = Vec::new();
    for group in class_rules.groups() {
        debug_assert!(!group.entries.is_empty(), "validated groups are never empty");

        let mut unmet = Vec::new();
        for entry in &group.entries {
            let satisfied = ClauseEvaluator::is_satisfied(&entry.clause, snapshot);
            tracing::trace!(%class, group = %group.id, clause = %entry.clause, satisfied);
            tracer.record(|| TraceStep::ClauseChecked {
                group: group.id,
                row: entry.row,
                clause: entry.clause,
                satisfied,
            });
            if !satisfied {
                unmet.push(entry.clause);
            }
        }

        let satisfied = unmet.is_empty();
        tracer.record(|| TraceStep::GroupResolved {
            group: group.id,
            satisfied,
        });
        if satisfied {
            tracing::debug!(%class, group = %group.id, "prerequisite group satisfied; eligible");
            return Decision::Eligible;
        }
        unmet_groups.push(UnmetGroup { group: group.id, unmet });
    }

    if unmet_groups.is_empty() {
        tracing::debug!(%class, "no prerequisites; eligible");
        return Decision::Eligible;
    }

    tracing::debug!(%class, groups = unmet_groups.len(), "prerequisites not met");
    Decision::Denied {
        reason: DenialReason::UnmetPrerequisites(unmet_groups),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClassEntry, InMemoryCatalog};
    use crate::core::{AchievementId, CategoryId, GroupId, QuestId, RuleRowId, SubcategoryId};
    use crate::resolver::validate;
    use crate::rules::{ExclusionRule, LevelBounds, PrerequisiteRule, RawClause, RawRuleSet};

    const KNIGHT: ClassId = ClassId::new(1);
    const PALADIN: ClassId = ClassId::new(2);
    const SQUIRE: ClassId = ClassId::new(3);
    const MARTIAL: CategoryId = CategoryId::new(1);
    const HOLY: SubcategoryId = SubcategoryId::new(1);

    fn catalog() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.register_category(MARTIAL, "Martial").unwrap();
        catalog.register_subcategory(HOLY, "Holy").unwrap();
        catalog.register_class(ClassEntry::new(KNIGHT, "Knight")).unwrap();
        catalog.register_class(ClassEntry::new(PALADIN, "Paladin")).unwrap();
        catalog.register_class(ClassEntry::new(SQUIRE, "Squire")).unwrap();
        catalog
    }

    #[test]
    fn test_clause_semantics() {
        let snapshot = ProgressionSnapshot::builder()
            .class_level(KNIGHT, 4)
            .category_total(MARTIAL, 10)
            .subcategory_total(HOLY, 3)
            .racial_total(7)
            .karma(-50)
            .completed_quest(QuestId::new(1))
            .achievement(AchievementId::new(2))
            .build();

        let cases = [
            (Clause::SpecificClass { class: KNIGHT, required_level: 4 }, true),
            (Clause::SpecificClass { class: KNIGHT, required_level: 5 }, false),
            (Clause::SpecificClass { class: SQUIRE, required_level: 1 }, false),
            (Clause::SpecificClass { class: SQUIRE, required_level: 0 }, true),
            (Clause::CategoryTotal { category: MARTIAL, bounds: LevelBounds::between(10, 12) }, true),
            (Clause::CategoryTotal { category: MARTIAL, bounds: LevelBounds::at_most(9) }, false),
            (Clause::SubcategoryTotal { subcategory: HOLY, bounds: LevelBounds::at_least(4) }, false),
            (Clause::RacialTotal { bounds: LevelBounds::at_least(7) }, true),
            (Clause::Karma { bounds: LevelBounds::at_most(-50) }, true),
            (Clause::Karma { bounds: LevelBounds::at_least(0) }, false),
            (Clause::Karma { bounds: LevelBounds::unbounded() }, true),
            (Clause::Quest { quest: QuestId::new(1) }, true),
            (Clause::Quest { quest: QuestId::new(2) }, false),
            (Clause::Achievement { achievement: AchievementId::new(2) }, true),
            (Clause::Achievement { achievement: AchievementId::new(1) }, false),
        ];

        for (clause, expected) in cases {
            assert_eq!(
                ClauseEvaluator::is_satisfied(&clause, &snapshot),
                expected,
                "{clause}"
            );
        }
    }

    #[test]
    fn test_class_without_rules_is_eligible() {
        let rules = validate(&RawRuleSet::new(), &catalog()).unwrap();
        let decision = evaluate(SQUIRE, &ProgressionSnapshot::default(), &rules);
        assert_eq!(decision, Decision::Eligible);
    }

    #[test]
    fn test_exclusions_only() {
        let rules = RawRuleSet::new().with_exclusion(PALADIN, RawClause::karma().at_most(-800));
        let rules = validate(&rules, &catalog()).unwrap();

        let good = ProgressionSnapshot::builder().karma(0).build();
        assert!(evaluate(PALADIN, &good, &rules).is_eligible());

        let evil = ProgressionSnapshot::builder().karma(-800).build();
        assert_eq!(
            evaluate(PALADIN, &evil, &rules),
            Decision::Denied {
                reason: DenialReason::Excluded(Clause::Karma { bounds: LevelBounds::at_most(-800) }),
            }
        );
    }

    #[test]
    fn test_first_exclusion_reported() {
        let rules = RawRuleSet::new()
            .with_exclusion(PALADIN, RawClause::karma().at_most(0))
            .with_exclusion(PALADIN, RawClause::specific_class(KNIGHT, 1));
        let rules = validate(&rules, &catalog()).unwrap();

        let snapshot = ProgressionSnapshot::builder().class_level(KNIGHT, 3).karma(-5).build();
        assert_eq!(
            evaluate(PALADIN, &snapshot, &rules).excluded_by(),
            Some(&Clause::Karma { bounds: LevelBounds::at_most(0) })
        );
    }

    #[test]
    fn test_trace_short_circuits_on_exclusion() {
        let rules = RawRuleSet::new()
            .with_exclusion(PALADIN, RawClause::karma().at_most(0))
            .with_exclusion(PALADIN, RawClause::specific_class(KNIGHT, 1))
            .with_prerequisite(PALADIN, GroupId::new(1), RawClause::specific_class(KNIGHT, 5));
        let rules = validate(&rules, &catalog()).unwrap();

        let snapshot = ProgressionSnapshot::builder().karma(-5).build();
        let evaluation = evaluate_traced(PALADIN, &snapshot, &rules);

        assert_eq!(
            evaluation.trace,
            vec![TraceStep::ExclusionChecked {
                row: RuleRowId::new(0),
                clause: Clause::Karma { bounds: LevelBounds::at_most(0) },
                matched: true,
            }]
        );
        assert!(!evaluation.decision.is_eligible());
    }

    #[test]
    fn test_trace_stops_at_first_satisfied_group() {
        let rules = RawRuleSet::new()
            .with_prerequisite(PALADIN, GroupId::new(1), RawClause::specific_class(KNIGHT, 5))
            .with_prerequisite(PALADIN, GroupId::new(1), RawClause::karma().at_least(100))
            .with_prerequisite(PALADIN, GroupId::new(2), RawClause::karma().at_least(0))
            .with_prerequisite(PALADIN, GroupId::new(3), RawClause::specific_class(SQUIRE, 1));
        let rules = validate(&rules, &catalog()).unwrap();

        let snapshot = ProgressionSnapshot::builder().class_level(KNIGHT, 2).karma(10).build();
        let evaluation = evaluate_traced(PALADIN, &snapshot, &rules);

        assert_eq!(evaluation.decision, Decision::Eligible);
        assert_eq!(
            evaluation.trace,
            vec![
                TraceStep::ClauseChecked {
                    group: GroupId::new(1),
                    row: RuleRowId::new(0),
                    clause: Clause::SpecificClass { class: KNIGHT, required_level: 5 },
                    satisfied: false,
                },
                TraceStep::ClauseChecked {
                    group: GroupId::new(1),
                    row: RuleRowId::new(1),
                    clause: Clause::Karma { bounds: LevelBounds::at_least(100) },
                    satisfied: false,
                },
                TraceStep::GroupResolved { group: GroupId::new(1), satisfied: false },
                TraceStep::ClauseChecked {
                    group: GroupId::new(2),
                    row: RuleRowId::new(2),
                    clause: Clause::Karma { bounds: LevelBounds::at_least(0) },
                    satisfied: true,
                },
                TraceStep::GroupResolved { group: GroupId::new(2), satisfied: true },
            ]
        );
        assert_eq!(evaluation.decision, evaluate(PALADIN, &snapshot, &rules));
    }

    #[test]
    fn test_unmet_report_lists_every_failed_clause() {
        let rules = RawRuleSet::new()
            .with_prerequisite(PALADIN, GroupId::new(1), RawClause::specific_class(KNIGHT, 5))
            .with_prerequisite(PALADIN, GroupId::new(1), RawClause::karma().at_least(100))
            .with_prerequisite(PALADIN, GroupId::new(1), RawClause::specific_class(SQUIRE, 1));
        let rules = validate(&rules, &catalog()).unwrap();

        let snapshot = ProgressionSnapshot::builder().class_level(SQUIRE, 1).build();
        let decision = evaluate(PALADIN, &snapshot, &rules);

        assert_eq!(
            decision.unmet_groups(),
            Some(
                &[UnmetGroup {
                    group: GroupId::new(1),
                    unmet: vec![
                        Clause::SpecificClass { class: KNIGHT, required_level: 5 },
                        Clause::Karma { bounds: LevelBounds::at_least(100) },
                    ],
                }][..]
            )
        );
    }

    #[test]
    fn test_quest_prerequisite() {
        let mut catalog = catalog();
        catalog.link_quest(RuleRowId::new(5), QuestId::new(42)).unwrap();
        let raw = RawRuleSet::from_rows(
            [PrerequisiteRule::new(RuleRowId::new(5), PALADIN, GroupId::new(1), RawClause::quest())],
            Vec::<ExclusionRule>::new(),
        );
        let rules = validate(&raw, &catalog).unwrap();

        let before = ProgressionSnapshot::default();
        assert!(!evaluate(PALADIN, &before, &rules).is_eligible());

        let after = ProgressionSnapshot::builder().completed_quest(QuestId::new(42)).build();
        assert!(evaluate(PALADIN, &after, &rules).is_eligible());
    }

    #[test]
    fn test_bulk_evaluation() {
        let rules = RawRuleSet::new()
            .with_prerequisite(PALADIN, GroupId::new(1), RawClause::specific_class(KNIGHT, 5))
            .with_prerequisite(KNIGHT, GroupId::new(1), RawClause::specific_class(SQUIRE, 3));
        let rules = validate(&rules, &catalog()).unwrap();

        let snapshot = ProgressionSnapshot::builder().class_level(SQUIRE, 3).build();

        let all = unlockable_classes(&snapshot, &rules);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, KNIGHT);
        assert!(all[0].1.is_eligible());
        assert_eq!(all[1].0, PALADIN);
        assert!(!all[1].1.is_eligible());

        assert_eq!(eligible_classes(&snapshot, &rules), vec![KNIGHT]);
    }
}
