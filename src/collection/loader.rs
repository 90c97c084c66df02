//! Collection loader - reads a collection document from disk

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::models::Collection;

/// Load and decode the collection at `path`.
///
/// Unknown fields are ignored. Business rules such as URL path length are
/// left to the catalog.
pub fn load_collection(path: impl AsRef<Path>) -> Result<Collection, LoadError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let collection = parse_collection(&data).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        name = %collection.name(),
        items = collection.items.len(),
        variables = collection.variables.len(),
        "Loaded collection"
    );
    Ok(collection)
}

/// Decode a collection document already held in memory
pub fn parse_collection(data: &str) -> Result<Collection, serde_json::Error> {
    serde_json::from_str(data)
}
