//! Identifier types.
//!
//! Every entity the rule engine refers to is identified by an opaque
//! integer assigned by the storage layer. Each entity space gets its own
//! newtype so a category id can never be passed where a class id is
//! expected.
//!
//! ```
//! use class_eligibility::core::{CategoryId, ClassId};
//!
//! let knight = ClassId::new(3);
//! let academia = CategoryId::new(3);
//!
//! assert_eq!(knight.raw(), academia.raw());
//! assert_eq!(format!("{}", knight), "Class(3)");
//! assert_eq!(format!("{}", academia), "Category(3)");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new identifier.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw ID value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of an unlockable class.
    ClassId,
    "Class"
);

id_type!(
    /// Identifier of a class category (e.g. "Academia").
    ///
    /// Category totals sum the levels of every class in the category.
    CategoryId,
    "Category"
);

id_type!(
    /// Identifier of a class subcategory.
    SubcategoryId,
    "Subcategory"
);

id_type!(
    /// Identifier of a quest.
    QuestId,
    "Quest"
);

id_type!(
    /// Identifier of an achievement.
    AchievementId,
    "Achievement"
);

id_type!(
    /// Storage primary key of a single rule row.
    ///
    /// Used to report where a validation error came from and to look up
    /// quest/achievement links in the catalog.
    RuleRowId,
    "Row"
);

/// Prerequisite group number.
///
/// Rules sharing a group for the same class are ANDed; distinct groups
/// are ORed. Groups are visited in ascending numeric order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub i32);

impl GroupId {
    /// Create a new group ID.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw group number.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group({})", self.0)
    }
}
