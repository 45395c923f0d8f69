//! Catalog of valid ids.
//!
//! Rules point at classes, categories and subcategories by id, and at
//! quests/achievements through a per-row link. The catalog is the external
//! collaborator that says which of those ids actually exist. The engine
//! only ever reads from it.
//!
//! ## Key Types
//!
//! - [`CatalogLookup`]: Read-only lookup trait implemented by storage layers
//! - [`InMemoryCatalog`]: Hash-map backed implementation for tools and tests
//! - [`ClassEntry`]: A class with its category, subcategory and racial flag

mod lookup;
mod memory;

pub use lookup::CatalogLookup;
pub use memory::{CatalogError, ClassEntry, InMemoryCatalog};
