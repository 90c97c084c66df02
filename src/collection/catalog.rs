//! Template catalog - the filtered, ordered list of selectable templates

use crate::constants::{MIN_URL_PATH_SEGMENTS, TEMPLATE_ID_SEGMENT};
use crate::models::{Collection, HttpMethod, Item};
use crate::variables::VariableMap;

/// A selectable template
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub intro: String,
    pub template: Item,
}

/// Item left out of the catalog because no identifier could be derived
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("item {index} ({name:?}) skipped: insufficient URL path segments ({segments})")]
pub struct SkippedItem {
    /// Position in the collection document
    pub index: usize,
    pub name: String,
    pub segments: usize,
}

/// Catalog over one collection.
///
/// Entries keep document order and may share an id. [`Catalog::get`]
/// resolves a shared id to the first entry in document order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub skipped: Vec<SkippedItem>,
    pub variables: VariableMap,
}

/// Identifier of a template: the second URL path segment.
///
/// `None` when the path is too short, which keeps the item out of the catalog.
pub fn template_id(item: &Item) -> Option<&str> {
    let path = &item.request.url.path;
    if path.len() < MIN_URL_PATH_SEGMENTS {
        return None;
    }
    path.get(TEMPLATE_ID_SEGMENT).map(String::as_str)
}

pub fn build_catalog(collection: &Collection) -> Catalog {
    let variables = collection.variables();
    tracing::info!(count = variables.len(), "Loaded collection variables");

    let mut entries = Vec::with_capacity(collection.items.len());
    let mut skipped = Vec::new();

    for (index, item) in collection.items.iter().enumerate() {
        tracing::debug!(idx = index, name = %item.name, url_path = ?item.request.url.path, "Processing item");

        let Some(id) = template_id(item) else {
            let warning = SkippedItem {
                index,
                name: item.name.clone(),
                segments: item.request.url.path.len(),
            };
            tracing::warn!(name = %item.name, "{}", warning);
            skipped.push(warning);
            continue;
        };

        if !item.method().is_empty() && HttpMethod::parse(item.method()).is_none() {
            tracing::warn!(id, method = %item.method(), "Template uses an unrecognized method");
        }

        entries.push(CatalogEntry {
            id: id.to_string(),
            title: item.name.clone(),
            intro: item.description().to_string(),
            template: item.clone(),
        });
    }

    tracing::info!(
        total = collection.items.len(),
        entries = entries.len(),
        skipped = skipped.len(),
        "Built template catalog"
    );

    Catalog {
        entries,
        skipped,
        variables,
    }
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// First entry in document order carrying `id`
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Every entry carrying `id`, in document order
    pub fn matching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |e| e.id == id)
    }

    /// Entries whose title contains `query`, ignoring case
    pub fn filter(&self, query: &str) -> Vec<&CatalogEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&query))
            .collect()
    }
}
