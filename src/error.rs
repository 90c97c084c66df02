//! Error taxonomy for the request-template engine
//!
//! Loading and building fail with `Err`. Transport failures never do: they
//! travel inside a [`DispatchResult`](crate::network::DispatchResult) so a
//! failed send is reported inline. An HTTP status >= 400 is not an error
//! kind at all.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Collection could not be read or decoded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error reading collection {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing collection {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A template or edited form cannot become a request
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("error creating request: invalid method {0:?}")]
    InvalidMethod(String),
    #[error("error creating request: invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("error creating request: unsupported URL scheme {scheme:?} in {url:?}")]
    UnsupportedScheme { url: String, scheme: String },
}

/// Failure of a single send, reported as the response text
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("error sending request: {0}")]
    Send(#[source] reqwest::Error),
    #[error("error reading response: {0}")]
    ReadBody(#[source] reqwest::Error),
    #[error("invalid header {key:?}")]
    InvalidHeader { key: String },
    #[error("dispatch task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unknown template id {0:?}")]
    UnknownTemplate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
