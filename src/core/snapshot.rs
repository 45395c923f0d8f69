//! Progression snapshots.
//!
//! A `ProgressionSnapshot` is a read-only view of one character's
//! progression at evaluation time: class levels, category and
//! subcategory totals, racial total, karma, completed quests and earned
//! achievements. The storage layer builds one per evaluation; the
//! evaluator only ever borrows it.
//!
//! All values are `i64`. Missing entries read as 0, so a character with
//! no levels in a class simply has level 0 there.
//!
//! ## Example
//!
//! ```
//! use class_eligibility::core::{CategoryId, ClassId, ProgressionSnapshot, QuestId};
//!
//! let snapshot = ProgressionSnapshot::builder()
//!     .class_level(ClassId::new(1), 5)
//!     .category_total(CategoryId::new(2), 12)
//!     .karma(-40)
//!     .completed_quest(QuestId::new(7))
//!     .build();
//!
//! assert_eq!(snapshot.class_level(ClassId::new(1)), 5);
//! assert_eq!(snapshot.class_level(ClassId::new(9)), 0);
//! assert_eq!(snapshot.karma(), -40);
//! assert!(snapshot.has_completed(QuestId::new(7)));
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::ids::{AchievementId, CategoryId, ClassId, QuestId, SubcategoryId};
use crate::catalog::CatalogLookup;

/// One character's progression state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    class_levels: FxHashMap<ClassId, i64>,
    category_totals: FxHashMap<CategoryId, i64>,
    subcategory_totals: FxHashMap<SubcategoryId, i64>,
    racial_total: i64,
    karma: i64,
    completed_quests: FxHashSet<QuestId>,
    achievements: FxHashSet<AchievementId>,
}

impl ProgressionSnapshot {
    /// Start building a snapshot.
    #[must_use]
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Current level in a class (0 if never taken).
    #[must_use]
    pub fn class_level(&self, class: ClassId) -> i64 {
        self.class_levels.get(&class).copied().unwrap_or(0)
    }

    /// Summed levels across all classes in a category.
    #[must_use]
    pub fn category_total(&self, category: CategoryId) -> i64 {
        self.category_totals.get(&category).copied().unwrap_or(0)
    }

    /// Summed levels across all classes in a subcategory.
    #[must_use]
    pub fn subcategory_total(&self, subcategory: SubcategoryId) -> i64 {
        self.subcategory_totals.get(&subcategory).copied().unwrap_or(0)
    }

    /// Summed levels across racial classes.
    #[must_use]
    pub const fn racial_total(&self) -> i64 {
        self.racial_total
    }

    /// Current karma. May be negative.
    #[must_use]
    pub const fn karma(&self) -> i64 {
        self.karma
    }

    /// Has the character completed this quest?
    #[must_use]
    pub fn has_completed(&self, quest: QuestId) -> bool {
        self.completed_quests.contains(&quest)
    }

    /// Has the character earned this achievement?
    #[must_use]
    pub fn has_achievement(&self, achievement: AchievementId) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Iterate over the classes the character has levels in.
    pub fn class_levels(&self) -> impl Iterator<Item = (ClassId, i64)> + '_ {
        self.class_levels.iter().map(|(&class, &level)| (class, level))
    }
}

/// Builder for [`ProgressionSnapshot`].
#[derive(Clone, Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: ProgressionSnapshot,
    racial_set: bool,
}

impl SnapshotBuilder {
    /// Set the level in a class.
    #[must_use]
    pub fn class_level(mut self, class: ClassId, level: i64) -> Self {
        self.snapshot.class_levels.insert(class, level);
        self
    }

    /// Set a category total explicitly.
    #[must_use]
    pub fn category_total(mut self, category: CategoryId, total: i64) -> Self {
        self.snapshot.category_totals.insert(category, total);
        self
    }

    /// Set a subcategory total explicitly.
    #[must_use]
    pub fn subcategory_total(mut self, subcategory: SubcategoryId, total: i64) -> Self {
        self.snapshot.subcategory_totals.insert(subcategory, total);
        self
    }

    /// Set the racial total explicitly.
    #[must_use]
    pub fn racial_total(mut self, total: i64) -> Self {
        self.snapshot.racial_total = total;
        self.racial_set = true;
        self
    }

    /// Set karma.
    #[must_use]
    pub fn karma(mut self, karma: i64) -> Self {
        self.snapshot.karma = karma;
        self
    }

    /// Record a completed quest.
    #[must_use]
    pub fn completed_quest(mut self, quest: QuestId) -> Self {
        self.snapshot.completed_quests.insert(quest);
        self
    }

    /// Record an earned achievement.
    #[must_use]
    pub fn achievement(mut self, achievement: AchievementId) -> Self {
        self.snapshot.achievements.insert(achievement);
        self
    }

    /// Fill category, subcategory and racial totals from class levels.
    ///
    /// Each class level is added to the totals of the category and
    /// subcategory the catalog files it under, and to the racial total
    /// for racial classes. Totals that were set explicitly are kept.
    /// Classes unknown to the catalog contribute nothing. Sums saturate.
    #[must_use]
    pub fn derive_totals(mut self, catalog: &impl CatalogLookup) -> Self {
        let mut categories: FxHashMap<CategoryId, i64> = FxHashMap::default();
        let mut subcategories: FxHashMap<SubcategoryId, i64> = FxHashMap::default();
        let mut racial = 0i64;

        for (&class, &level) in &self.snapshot.class_levels {
            if let Some(category) = catalog.class_category(class) {
                let total = categories.entry(category).or_insert(0);
                *total = total.saturating_add(level);
            }
            if let Some(subcategory) = catalog.class_subcategory(class) {
                let total = subcategories.entry(subcategory).or_insert(0);
                *total = total.saturating_add(level);
            }
            if catalog.is_racial(class) {
                racial = racial.saturating_add(level);
            }
        }

        for (category, total) in categories {
            self.snapshot.category_totals.entry(category).or_insert(total);
        }
        for (subcategory, total) in subcategories {
            self.snapshot.subcategory_totals.entry(subcategory).or_insert(total);
        }
        if !self.racial_set {
            self.snapshot.racial_total = racial;
        }
        self
    }

    /// Finish the snapshot.
    #[must_use]
    pub fn build(self) -> ProgressionSnapshot {
        self.snapshot
    }
}
