//! Collection layer - loading documents and deriving the template catalog

pub mod catalog;
pub mod loader;

pub use catalog::{build_catalog, template_id, Catalog, CatalogEntry, SkippedItem};
pub use loader::{load_collection, parse_collection};
