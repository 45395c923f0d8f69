//! Clauses: the atomic conditions of prerequisite and exclusion rules.
//!
//! Clauses come in two shapes:
//!
//! - [`RawClause`]: the row shape stored by the authoring tools. A kind,
//!   an optional target and optional numeric fields. Nothing stops a raw
//!   clause from being inconsistent.
//! - [`Clause`]: the validated shape. Each variant carries exactly the
//!   data its kind needs, so a `Karma` clause with a target or a
//!   `SpecificClass` clause without one cannot be represented.
//!
//! The resolver turns the former into the latter.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogLookup;
use crate::core::{AchievementId, CategoryId, ClassId, QuestId, SubcategoryId};

/// The closed set of clause kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseKind {
    /// Minimum level in one specific class.
    SpecificClass,
    /// Summed levels across a category, within bounds.
    CategoryTotal,
    /// Summed levels across a subcategory, within bounds.
    SubcategoryTotal,
    /// Summed racial levels, within bounds. Exclusions only.
    RacialTotal,
    /// Karma within bounds.
    Karma,
    /// A specific quest has been completed.
    Quest,
    /// A specific achievement has been earned.
    Achievement,
}

impl ClauseKind {
    /// The entity space this kind's target must point into.
    ///
    /// `None` means the kind takes no target.
    #[must_use]
    pub const fn target_space(self) -> Option<TargetSpace> {
        match self {
            Self::SpecificClass => Some(TargetSpace::Class),
            Self::CategoryTotal => Some(TargetSpace::Category),
            Self::SubcategoryTotal => Some(TargetSpace::Subcategory),
            Self::RacialTotal | Self::Karma | Self::Quest | Self::Achievement => None,
        }
    }

    /// Is this kind checked against numeric bounds?
    #[must_use]
    pub const fn is_bounded(self) -> bool {
        matches!(
            self,
            Self::CategoryTotal | Self::SubcategoryTotal | Self::RacialTotal | Self::Karma
        )
    }

    /// May this kind appear in a prerequisite rule?
    #[must_use]
    pub const fn allowed_in_prerequisite(self) -> bool {
        !matches!(self, Self::RacialTotal)
    }
}

impl std::fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SpecificClass => "SpecificClass",
            Self::CategoryTotal => "CategoryTotal",
            Self::SubcategoryTotal => "SubcategoryTotal",
            Self::RacialTotal => "RacialTotal",
            Self::Karma => "Karma",
            Self::Quest => "Quest",
            Self::Achievement => "Achievement",
        };
        f.write_str(name)
    }
}

/// Entity space a target points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSpace {
    /// Classes.
    Class,
    /// Categories.
    Category,
    /// Subcategories.
    Subcategory,
}

/// A reference tagged by the entity space it points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    /// A class.
    Class(ClassId),
    /// A category.
    Category(CategoryId),
    /// A subcategory.
    Subcategory(SubcategoryId),
}

impl TargetRef {
    /// The entity space of this reference.
    #[must_use]
    pub const fn space(self) -> TargetSpace {
        match self {
            Self::Class(_) => TargetSpace::Class,
            Self::Category(_) => TargetSpace::Category,
            Self::Subcategory(_) => TargetSpace::Subcategory,
        }
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class(id) => write!(f, "{id}"),
            Self::Category(id) => write!(f, "{id}"),
            Self::Subcategory(id) => write!(f, "{id}"),
        }
    }
}

/// Inclusive numeric bounds. An absent bound is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelBounds {
    /// Inclusive lower bound.
    pub min: Option<i64>,
    /// Inclusive upper bound.
    pub max: Option<i64>,
}

impl LevelBounds {
    /// Create bounds from optional endpoints.
    #[must_use]
    pub const fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// No bounds at all: every value passes.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// `value >= min`.
    #[must_use]
    pub const fn at_least(min: i64) -> Self {
        Self::new(Some(min), None)
    }

    /// `value <= max`.
    #[must_use]
    pub const fn at_most(max: i64) -> Self {
        Self::new(None, Some(max))
    }

    /// `min <= value <= max`.
    #[must_use]
    pub const fn between(min: i64, max: i64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Are both endpoints absent?
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Does `value` fall within the bounds?
    ///
    /// ```
    /// use class_eligibility::rules::LevelBounds;
    ///
    /// assert!(LevelBounds::at_least(10).contains(10));
    /// assert!(!LevelBounds::at_least(10).contains(9));
    /// assert!(LevelBounds::at_most(-800).contains(-900));
    /// assert!(LevelBounds::unbounded().contains(i64::MIN));
    /// ```
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl std::fmt::Display for LevelBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "= {min}"),
            (Some(min), Some(max)) => write!(f, "between {min} and {max}"),
            (Some(min), None) => write!(f, ">= {min}"),
            (None, Some(max)) => write!(f, "<= {max}"),
            (None, None) => f.write_str("any"),
        }
    }
}

/// A clause as stored: kind, optional target, optional numeric fields.
///
/// ## Example
///
/// ```
/// use class_eligibility::core::{CategoryId, ClassId};
/// use class_eligibility::rules::{ClauseKind, RawClause};
///
/// let knight_5 = RawClause::specific_class(ClassId::new(1), 5);
/// assert_eq!(knight_5.kind, ClauseKind::SpecificClass);
/// assert_eq!(knight_5.required_level, Some(5));
///
/// let academia = RawClause::category_total(CategoryId::new(2)).at_least(10);
/// assert_eq!(academia.min_value, Some(10));
/// assert_eq!(academia.max_value, None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawClause {
    /// What is being checked.
    pub kind: ClauseKind,
    /// Entity the check refers to, for kinds that take one.
    pub target: Option<TargetRef>,
    /// Minimum class level, for `SpecificClass`.
    pub required_level: Option<i64>,
    /// Inclusive lower bound, for bounded kinds.
    pub min_value: Option<i64>,
    /// Inclusive upper bound, for bounded kinds.
    pub max_value: Option<i64>,
}

impl RawClause {
    /// Create an empty clause of the given kind.
    #[must_use]
    pub const fn new(kind: ClauseKind) -> Self {
        Self {
            kind,
            target: None,
            required_level: None,
            min_value: None,
            max_value: None,
        }
    }

    /// `level(class) >= required_level`.
    #[must_use]
    pub const fn specific_class(class: ClassId, required_level: i64) -> Self {
        Self::new(ClauseKind::SpecificClass)
            .with_target(TargetRef::Class(class))
            .with_required_level(required_level)
    }

    /// Category total clause; add bounds with `at_least`/`at_most`/`between`.
    #[must_use]
    pub const fn category_total(category: CategoryId) -> Self {
        Self::new(ClauseKind::CategoryTotal).with_target(TargetRef::Category(category))
    }

    /// Subcategory total clause; add bounds with `at_least`/`at_most`/`between`.
    #[must_use]
    pub const fn subcategory_total(subcategory: SubcategoryId) -> Self {
        Self::new(ClauseKind::SubcategoryTotal).with_target(TargetRef::Subcategory(subcategory))
    }

    /// Racial total clause; add bounds with `at_least`/`at_most`/`between`.
    #[must_use]
    pub const fn racial_total() -> Self {
        Self::new(ClauseKind::RacialTotal)
    }

    /// Karma clause; add bounds with `at_least`/`at_most`/`between`.
    #[must_use]
    pub const fn karma() -> Self {
        Self::new(ClauseKind::Karma)
    }

    /// Quest clause. The quest itself is linked to the rule row in the catalog.
    #[must_use]
    pub const fn quest() -> Self {
        Self::new(ClauseKind::Quest)
    }

    /// Achievement clause. The achievement is linked to the rule row in the catalog.
    #[must_use]
    pub const fn achievement() -> Self {
        Self::new(ClauseKind::Achievement)
    }

    /// Set the target (builder pattern).
    #[must_use]
    pub const fn with_target(mut self, target: TargetRef) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the required level (builder pattern).
    #[must_use]
    pub const fn with_required_level(mut self, level: i64) -> Self {
        self.required_level = Some(level);
        self
    }

    /// Set the lower bound (builder pattern).
    #[must_use]
    pub const fn at_least(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    /// Set the upper bound (builder pattern).
    #[must_use]
    pub const fn at_most(mut self, max: i64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Set both bounds (builder pattern).
    #[must_use]
    pub const fn between(self, min: i64, max: i64) -> Self {
        self.at_least(min).at_most(max)
    }

    /// The numeric bounds carried by this row.
    #[must_use]
    pub const fn bounds(&self) -> LevelBounds {
        LevelBounds::new(self.min_value, self.max_value)
    }
}

/// A validated clause.
///
/// Every variant holds exactly what its kind needs. Values of this type
/// only come out of the resolver, or are built directly by code that
/// already knows the ids are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clause {
    /// `level(class) >= required_level`.
    SpecificClass {
        /// Class whose level is checked.
        class: ClassId,
        /// Minimum level.
        required_level: i64,
    },

    /// Category total within bounds.
    CategoryTotal {
        /// Category whose total is checked.
        category: CategoryId,
        /// Allowed range.
        bounds: LevelBounds,
    },

    /// Subcategory total within bounds.
    SubcategoryTotal {
        /// Subcategory whose total is checked.
        subcategory: SubcategoryId,
        /// Allowed range.
        bounds: LevelBounds,
    },

    /// Racial total within bounds.
    RacialTotal {
        /// Allowed range.
        bounds: LevelBounds,
    },

    /// Karma within bounds.
    Karma {
        /// Allowed range.
        bounds: LevelBounds,
    },

    /// Quest completed.
    Quest {
        /// The quest.
        quest: QuestId,
    },

    /// Achievement earned.
    Achievement {
        /// The achievement.
        achievement: AchievementId,
    },
}

impl Clause {
    /// The kind of this clause.
    #[must_use]
    pub const fn kind(&self) -> ClauseKind {
        match self {
            Self::SpecificClass { .. } => ClauseKind::SpecificClass,
            Self::CategoryTotal { .. } => ClauseKind::CategoryTotal,
            Self::SubcategoryTotal { .. } => ClauseKind::SubcategoryTotal,
            Self::RacialTotal { .. } => ClauseKind::RacialTotal,
            Self::Karma { .. } => ClauseKind::Karma,
            Self::Quest { .. } => ClauseKind::Quest,
            Self::Achievement { .. } => ClauseKind::Achievement,
        }
    }

    /// The target reference, for kinds that take one.
    #[must_use]
    pub const fn target(&self) -> Option<TargetRef> {
        match *self {
            Self::SpecificClass { class, .. } => Some(TargetRef::Class(class)),
            Self::CategoryTotal { category, .. } => Some(TargetRef::Category(category)),
            Self::SubcategoryTotal { subcategory, .. } => Some(TargetRef::Subcategory(subcategory)),
            _ => None,
        }
    }

    /// The numeric bounds, for bounded kinds.
    #[must_use]
    pub const fn bounds(&self) -> Option<LevelBounds> {
        match *self {
            Self::CategoryTotal { bounds, .. }
            | Self::SubcategoryTotal { bounds, .. }
            | Self::RacialTotal { bounds }
            | Self::Karma { bounds } => Some(bounds),
            _ => None,
        }
    }

    /// Render using catalog display names where available.
    ///
    /// ```
    /// use class_eligibility::catalog::{ClassEntry, InMemoryCatalog};
    /// use class_eligibility::core::ClassId;
    /// use class_eligibility::rules::Clause;
    ///
    /// let mut catalog = InMemoryCatalog::new();
    /// catalog.register_class(ClassEntry::new(ClassId::new(1), "Knight")).unwrap();
    ///
    /// let clause = Clause::SpecificClass { class: ClassId::new(1), required_level: 5 };
    /// assert_eq!(clause.describe(&catalog), "Knight level >= 5");
    /// assert_eq!(clause.to_string(), "Class(1) level >= 5");
    /// ```
    #[must_use]
    pub fn describe(&self, catalog: &impl CatalogLookup) -> String {
        match *self {
            Self::SpecificClass { class, required_level } => match catalog.class_name(class) {
                Some(name) => format!("{name} level >= {required_level}"),
                None => self.to_string(),
            },
            Self::CategoryTotal { category, bounds } => match catalog.category_name(category) {
                Some(name) => format!("{name} total {bounds}"),
                None => self.to_string(),
            },
            Self::SubcategoryTotal { subcategory, bounds } => {
                match catalog.subcategory_name(subcategory) {
                    Some(name) => format!("{name} total {bounds}"),
                    None => self.to_string(),
                }
            }
            _ => self.to_string(),
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpecificClass { class, required_level } => {
                write!(f, "{class} level >= {required_level}")
            }
            Self::CategoryTotal { category, bounds } => write!(f, "{category} total {bounds}"),
            Self::SubcategoryTotal { subcategory, bounds } => {
                write!(f, "{subcategory} total {bounds}")
            }
            Self::RacialTotal { bounds } => write!(f, "racial total {bounds}"),
            Self::Karma { bounds } => write!(f, "karma {bounds}"),
            Self::Quest { quest } => write!(f, "completed {quest}"),
            Self::Achievement { achievement } => write!(f, "earned {achievement}"),
        }
    }
}
