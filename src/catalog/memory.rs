//! In-memory catalog.
//!
//! `InMemoryCatalog` stores every class, category and subcategory the
//! rules may reference, along with the quest/achievement links for rule
//! rows. It is the catalog used by authoring tools that load the whole
//! game-data set up front, and by tests.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{AchievementId, CategoryId, ClassId, QuestId, RuleRowId, SubcategoryId};

use super::lookup::CatalogLookup;

/// Errors raised while populating an [`InMemoryCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A class with this id is already registered.
    #[error("{0} is already registered")]
    DuplicateClass(ClassId),

    /// A category with this id is already registered.
    #[error("{0} is already registered")]
    DuplicateCategory(CategoryId),

    /// A subcategory with this id is already registered.
    #[error("{0} is already registered")]
    DuplicateSubcategory(SubcategoryId),

    /// A class names a category that has not been registered.
    #[error("{class} belongs to unregistered {category}")]
    UnknownCategory {
        /// The class being registered.
        class: ClassId,
        /// The missing category.
        category: CategoryId,
    },

    /// A class names a subcategory that has not been registered.
    #[error("{class} belongs to unregistered {subcategory}")]
    UnknownSubcategory {
        /// The class being registered.
        class: ClassId,
        /// The missing subcategory.
        subcategory: SubcategoryId,
    },

    /// The rule row is already linked to a quest or achievement.
    #[error("{0} is already linked")]
    DuplicateLink(RuleRowId),
}

/// A class as the catalog knows it.
///
/// ## Example
///
/// ```
/// use class_eligibility::catalog::ClassEntry;
/// use class_eligibility::core::{CategoryId, ClassId};
///
/// let knight = ClassEntry::new(ClassId::new(1), "Knight")
///     .in_category(CategoryId::new(10));
///
/// assert_eq!(knight.category, Some(CategoryId::new(10)));
/// assert!(!knight.racial);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Class identifier.
    pub id: ClassId,

    /// Display name.
    pub name: String,

    /// Category whose total this class contributes to.
    pub category: Option<CategoryId>,

    /// Subcategory whose total this class contributes to.
    pub subcategory: Option<SubcategoryId>,

    /// Racial classes contribute to the racial total.
    pub racial: bool,
}

impl ClassEntry {
    /// Create a class entry with no category.
    #[must_use]
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            subcategory: None,
            racial: false,
        }
    }

    /// Set the category (builder pattern).
    #[must_use]
    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the subcategory (builder pattern).
    #[must_use]
    pub fn in_subcategory(mut self, subcategory: SubcategoryId) -> Self {
        self.subcategory = Some(subcategory);
        self
    }

    /// Mark as a racial class (builder pattern).
    #[must_use]
    pub fn racial(mut self) -> Self {
        self.racial = true;
        self
    }
}

/// Hash-map backed [`CatalogLookup`].
///
/// ## Example
///
/// ```
/// use class_eligibility::catalog::{CatalogLookup, ClassEntry, InMemoryCatalog};
/// use class_eligibility::core::{CategoryId, ClassId};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.register_category(CategoryId::new(1), "Martial").unwrap();
/// catalog
///     .register_class(ClassEntry::new(ClassId::new(1), "Knight").in_category(CategoryId::new(1)))
///     .unwrap();
///
/// assert!(catalog.has_class(ClassId::new(1)));
/// assert_eq!(catalog.class_name(ClassId::new(1)), Some("Knight"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    classes: FxHashMap<ClassId, ClassEntry>,
    categories: FxHashMap<CategoryId, String>,
    subcategories: FxHashMap<SubcategoryId, String>,
    quest_links: FxHashMap<RuleRowId, QuestId>,
    achievement_links: FxHashMap<RuleRowId, AchievementId>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCategory`] if the id is taken.
    pub fn register_category(
        &mut self,
        id: CategoryId,
        name: impl Into<String>,
    ) -> Result<(), CatalogError> {
        if self.categories.contains_key(&id) {
            return Err(CatalogError::DuplicateCategory(id));
        }
        self.categories.insert(id, name.into());
        Ok(())
    }

    /// Register a subcategory.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSubcategory`] if the id is taken.
    pub fn register_subcategory(
        &mut self,
        id: SubcategoryId,
        name: impl Into<String>,
    ) -> Result<(), CatalogError> {
        if self.subcategories.contains_key(&id) {
            return Err(CatalogError::DuplicateSubcategory(id));
        }
        self.subcategories.insert(id, name.into());
        Ok(())
    }

    /// Register a class.
    ///
    /// The class's category and subcategory must already be registered.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on a duplicate id or a dangling
    /// category/subcategory reference.
    pub fn register_class(&mut self, entry: ClassEntry) -> Result<(), CatalogError> {
        if self.classes.contains_key(&entry.id) {
            return Err(CatalogError::DuplicateClass(entry.id));
        }
        if let Some(category) = entry.category {
            if !self.categories.contains_key(&category) {
                return Err(CatalogError::UnknownCategory {
                    class: entry.id,
                    category,
                });
            }
        }
        if let Some(subcategory) = entry.subcategory {
            if !self.subcategories.contains_key(&subcategory) {
                return Err(CatalogError::UnknownSubcategory {
                    class: entry.id,
                    subcategory,
                });
            }
        }
        self.classes.insert(entry.id, entry);
        Ok(())
    }

    /// Link a `Quest` rule row to the quest it requires.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateLink`] if the row is already linked.
    pub fn link_quest(&mut self, row: RuleRowId, quest: QuestId) -> Result<(), CatalogError> {
        if self.is_linked(row) {
            return Err(CatalogError::DuplicateLink(row));
        }
        self.quest_links.insert(row, quest);
        Ok(())
    }

    /// Link an `Achievement` rule row to the achievement it requires.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateLink`] if the row is already linked.
    pub fn link_achievement(
        &mut self,
        row: RuleRowId,
        achievement: AchievementId,
    ) -> Result<(), CatalogError> {
        if self.is_linked(row) {
            return Err(CatalogError::DuplicateLink(row));
        }
        self.achievement_links.insert(row, achievement);
        Ok(())
    }

    fn is_linked(&self, row: RuleRowId) -> bool {
        self.quest_links.contains_key(&row) || self.achievement_links.contains_key(&row)
    }

    /// Get a class entry.
    #[must_use]
    pub fn class(&self, id: ClassId) -> Option<&ClassEntry> {
        self.classes.get(&id)
    }

    /// Iterate over all registered classes.
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    /// Number of registered classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn has_class(&self, id: ClassId) -> bool {
        self.classes.contains_key(&id)
    }

    fn has_category(&self, id: CategoryId) -> bool {
        self.categories.contains_key(&id)
    }

    fn has_subcategory(&self, id: SubcategoryId) -> bool {
        self.subcategories.contains_key(&id)
    }

    fn class_category(&self, id: ClassId) -> Option<CategoryId> {
        self.classes.get(&id).and_then(|c| c.category)
    }

    fn class_subcategory(&self, id: ClassId) -> Option<SubcategoryId> {
        self.classes.get(&id).and_then(|c| c.subcategory)
    }

    fn is_racial(&self, id: ClassId) -> bool {
        self.classes.get(&id).is_some_and(|c| c.racial)
    }

    fn quest_for_rule(&self, row: RuleRowId) -> Option<QuestId> {
        self.quest_links.get(&row).copied()
    }

    fn achievement_for_rule(&self, row: RuleRowId) -> Option<AchievementId> {
        self.achievement_links.get(&row).copied()
    }

    fn class_name(&self, id: ClassId) -> Option<&str> {
        self.classes.get(&id).map(|c| c.name.as_str())
    }

    fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories.get(&id).map(String::as_str)
    }

    fn subcategory_name(&self, id: SubcategoryId) -> Option<&str> {
        self.subcategories.get(&id).map(String::as_str)
    }
}
