//! The catalog lookup trait.

use crate::core::{AchievementId, CategoryId, ClassId, QuestId, RuleRowId, SubcategoryId};
use crate::rules::TargetRef;

/// Read-only view of the game-data catalog.
///
/// Storage layers implement this over their tables; [`InMemoryCatalog`]
/// is provided for tooling and tests.
///
/// Quests and achievements are not addressed through a clause target.
/// Instead the catalog links a rule row to the quest or achievement it
/// refers to, which is what `quest_for_rule` and `achievement_for_rule`
/// expose.
///
/// [`InMemoryCatalog`]: super::InMemoryCatalog
pub trait CatalogLookup {
    /// Does this class exist?
    fn has_class(&self, id: ClassId) -> bool;

    /// Does this category exist?
    fn has_category(&self, id: CategoryId) -> bool;

    /// Does this subcategory exist?
    fn has_subcategory(&self, id: SubcategoryId) -> bool;

    /// The category a class contributes its levels to.
    fn class_category(&self, id: ClassId) -> Option<CategoryId>;

    /// The subcategory a class contributes its levels to.
    fn class_subcategory(&self, id: ClassId) -> Option<SubcategoryId>;

    /// Does this class count toward the racial total?
    fn is_racial(&self, id: ClassId) -> bool;

    /// The quest a `Quest` rule row refers to, if linked.
    fn quest_for_rule(&self, row: RuleRowId) -> Option<QuestId>;

    /// The achievement an `Achievement` rule row refers to, if linked.
    fn achievement_for_rule(&self, row: RuleRowId) -> Option<AchievementId>;

    /// Display name of a class, for explanations.
    fn class_name(&self, _id: ClassId) -> Option<&str> {
        None
    }

    /// Display name of a category, for explanations.
    fn category_name(&self, _id: CategoryId) -> Option<&str> {
        None
    }

    /// Display name of a subcategory, for explanations.
    fn subcategory_name(&self, _id: SubcategoryId) -> Option<&str> {
        None
    }

    /// Check that a target reference exists in its entity space.
    fn resolves(&self, target: &TargetRef) -> bool {
        match *target {
            TargetRef::Class(id) => self.has_class(id),
            TargetRef::Category(id) => self.has_category(id),
            TargetRef::Subcategory(id) => self.has_subcategory(id),
        }
    }
}
