//! Rule-set loading and validation tests.
//!
//! Covers the authoring boundary: rule sets arriving as JSON, options
//! coming from an engine config file, and sharing a validated set
//! across threads.

use std::io::Write;
use std::sync::Arc;

use class_eligibility::catalog::{ClassEntry, InMemoryCatalog};
use class_eligibility::core::{
    CategoryId, ClassId, EngineConfig, GroupId, ProgressionSnapshot, RuleRowId,
};
use class_eligibility::eval::evaluate;
use class_eligibility::resolver::{
    validate, validate_with, RuleLocation, ValidatedRuleSet, ValidationError, ValidationWarning,
};
use class_eligibility::rules::{ClauseKind, RawClause, RawRuleSet, TargetRef};

const KNIGHT: ClassId = ClassId::new(1);
const PALADIN: ClassId = ClassId::new(2);
const MARTIAL: CategoryId = CategoryId::new(1);

fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    catalog.register_category(MARTIAL, "Martial").unwrap();
    catalog
        .register_class(ClassEntry::new(KNIGHT, "Knight").in_category(MARTIAL))
        .unwrap();
    catalog
        .register_class(ClassEntry::new(PALADIN, "Paladin").in_category(MARTIAL))
        .unwrap();
    catalog
}

/// A rule set exported by the authoring tool round-trips through JSON.
#[test]
fn test_rule_set_from_json() {
    let raw = RawRuleSet::new()
        .with_prerequisite(PALADIN, GroupId::new(1), RawClause::specific_class(KNIGHT, 5))
        .with_exclusion(PALADIN, RawClause::karma().at_most(-800));

    let json = serde_json::to_string_pretty(&raw).unwrap();
    let loaded: RawRuleSet = serde_json::from_str(&json).unwrap();

    let catalog = catalog();
    assert_eq!(validate(&loaded, &catalog).unwrap(), validate(&raw, &catalog).unwrap());
}

/// A hand-edited row with a target on a Karma clause is rejected.
#[test]
fn test_hand_edited_row_rejected() {
    let json = r#"{
        "prerequisites": [
            {
                "row": 7,
                "class_id": 2,
                "group": 1,
                "clause": {
                    "kind": "Karma",
                    "target": { "Category": 1 },
                    "required_level": null,
                    "min_value": 100,
                    "max_value": null
                }
            }
        ],
        "exclusions": [],
        "next_row": 8
    }"#;
    let raw: RawRuleSet = serde_json::from_str(json).unwrap();

    let err = validate(&raw, &catalog()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidTargetKind {
            location: RuleLocation::prerequisite(PALADIN, GroupId::new(1), RuleRowId::new(7)),
            kind: ClauseKind::Karma,
            target: Some(TargetRef::Category(MARTIAL)),
        }
    );
    assert_eq!(err.location().row, RuleRowId::new(7));
}

/// Validation options come from the engine config file.
#[test]
fn test_options_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[validation]\nreject_duplicate_clauses = true\nwarn_unbounded = false"
    )
    .unwrap();
    let config = EngineConfig::load(file.path()).unwrap();

    let raw = RawRuleSet::new()
        .with_prerequisite(PALADIN, GroupId::new(1), RawClause::karma())
        .with_prerequisite(PALADIN, GroupId::new(2), RawClause::specific_class(KNIGHT, 3))
        .with_prerequisite(PALADIN, GroupId::new(2), RawClause::specific_class(KNIGHT, 3));

    let err = validate_with(&raw, &catalog(), &config.validation).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::DuplicateGroupClauseConflict { group: GroupId(2), .. }
    ));

    // Default options accept the duplicate and warn about the bare karma clause.
    let validated = validate(&raw, &catalog()).unwrap();
    assert!(matches!(
        validated.warnings(),
        [ValidationWarning::Unbounded { kind: ClauseKind::Karma, .. }]
    ));
}

/// An unbounded clause is valid and always passes.
#[test]
fn test_unbounded_clause_always_passes() {
    let raw = RawRuleSet::new().with_prerequisite(PALADIN, GroupId::new(1), RawClause::karma());
    let rules = validate(&raw, &catalog()).unwrap();

    for karma in [i64::MIN, -1, 0, 1, i64::MAX] {
        let snapshot = ProgressionSnapshot::builder().karma(karma).build();
        assert!(evaluate(PALADIN, &snapshot, &rules).is_eligible());
    }
}

/// A validated set is shared read-only across threads.
#[test]
fn test_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ValidatedRuleSet>();
    assert_send_sync::<ProgressionSnapshot>();

    let raw = RawRuleSet::new()
        .with_prerequisite(PALADIN, GroupId::new(1), RawClause::specific_class(KNIGHT, 5));
    let rules = Arc::new(validate(&raw, &catalog()).unwrap());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8i64)
            .map(|level| {
                let rules = Arc::clone(&rules);
                scope.spawn(move || {
                    let snapshot = ProgressionSnapshot::builder().class_level(KNIGHT, level).build();
                    (level, evaluate(PALADIN, &snapshot, &rules).is_eligible())
                })
            })
            .collect();

        for handle in handles {
            let (level, eligible) = handle.join().unwrap();
            assert_eq!(eligible, level >= 5, "knight level {level}");
        }
    });
}
