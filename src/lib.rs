//! # GHOSTman
//!
//! Request-template engine behind a small REST client, working on
//! Postman-style collection documents.
//!
//! ## Features
//! - Collection loading with typed schema errors
//! - `{{name}}` variable substitution in URL, header values and body
//! - Template catalog keyed by the second URL path segment
//! - Request building from templates or user-edited forms
//! - Dispatch with per-request timeout, 2 MiB response cap and JSON pretty-printing
//!
//! ## Architecture
//! Loader -> Catalog -> Request builder -> Dispatcher. The presentation
//! layer drives the flow through [`Session`] and awaits dispatch tasks
//! wherever it renders.

pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod network;
pub mod request;
pub mod session;
pub mod storage;
pub mod variables;

// Re-export commonly used types
pub use collection::{build_catalog, load_collection, template_id, Catalog, CatalogEntry, SkippedItem};
pub use config::Config;
pub use error::{BuildError, Error, LoadError, TransportError};
pub use models::{Body, Collection, Header, HttpMethod, Item, RequestTemplate, RequestUrl, Variable};
pub use network::{DispatchConfig, DispatchResult, Dispatcher};
pub use request::{build, parse_header_block, BuiltRequest, RequestForm};
pub use session::Session;
pub use storage::Storage;
pub use variables::{substitute, VariableMap};
