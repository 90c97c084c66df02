//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Collection file used when neither the CLI nor the config names one
pub const DEFAULT_COLLECTION_PATH: &str = "data/col.postman_collection.json";

/// Client-side timeout covering connect and the full round trip
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Response bodies are read up to this many bytes; the rest is discarded
pub const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;

/// Indentation width used when pretty-printing JSON responses
pub const JSON_INDENT: usize = 4;

/// A template is selectable only when its URL path has at least this many segments
pub const MIN_URL_PATH_SEGMENTS: usize = 2;

/// Position in the URL path that yields the template identifier
pub const TEMPLATE_ID_SEGMENT: usize = 1;

/// Directory under the home directory holding config and preferences
pub const CONFIG_DIR_NAME: &str = ".ghostman";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const PREFERENCES_FILE_NAME: &str = "preferences.yaml";

/// Application name
pub const APP_NAME: &str = "GHOSTman";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
