//! Canonical record types for a collection document
//!
//! One schema shared by the loader, catalog, builder and dispatcher. Only the
//! narrow subset of the Postman collection format the engine reads is
//! modelled; every other field is ignored on decode.

use serde::{Deserialize, Serialize};

use crate::variables::VariableMap;

/// HTTP method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
    CONNECT,
    TRACE,
}

impl HttpMethod {
    /// Every method offered to the presentation layer, in picker order
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
        HttpMethod::CONNECT,
        HttpMethod::TRACE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::CONNECT => "CONNECT",
            HttpMethod::TRACE => "TRACE",
        }
    }

    /// Exact, case-sensitive match against the known methods
    pub fn parse(method: &str) -> Option<HttpMethod> {
        HttpMethod::ALL.into_iter().find(|m| m.as_str() == method)
    }
}

/// Root of a collection document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub info: Info,
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
    #[serde(default, rename = "variable")]
    pub variables: Vec<Variable>,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Variable lookup map; a later duplicate key overrides an earlier one
    pub fn variables(&self) -> VariableMap {
        self.variables
            .iter()
            .map(|v| (v.key.clone(), v.value.clone()))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub name: String,
}

/// A request template
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display title
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub request: RequestTemplate,
}

impl Item {
    pub fn description(&self) -> &str {
        &self.request.description
    }

    pub fn method(&self) -> &str {
        &self.request.method
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// Kept verbatim; not checked against [`HttpMethod`]
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "header")]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: Body,
    #[serde(default)]
    pub url: RequestUrl,
}

/// HTTP header of a template
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Informational only
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub raw: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestUrl {
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub host: Vec<String>,
    #[serde(default)]
    pub path: Vec<String>,
}

/// Collection-level variable
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Metadata only; values are always substituted as literal text
    #[serde(default, rename = "type")]
    pub kind: String,
}
