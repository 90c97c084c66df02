//! Request builder - turns a template plus variables into a ready-to-send request

use reqwest::Method;
use url::Url;

use crate::error::BuildError;
use crate::models::Item;
use crate::request::headers::{parse_header_block, render_header_block};
use crate::variables::{substitute, unresolved_placeholders, VariableMap};

/// Fully resolved request, owned by one send
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltRequest {
    pub method: Method,
    /// URL exactly as resolved; validated but not normalized
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Editable form of a template, as shown to the user before sending.
///
/// Headers travel as a newline-delimited block so the presentation layer can
/// hand back whatever text the user edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestForm {
    pub method: String,
    pub url: String,
    pub headers: String,
    pub body: String,
}

impl RequestForm {
    /// Fill the form from a template, substituting URL, header values and body
    pub fn from_template(template: &Item, variables: &VariableMap) -> Self {
        let request = &template.request;
        RequestForm {
            method: request.method.clone(),
            url: substitute(&request.url.raw, variables),
            headers: render_header_block(&request.headers, variables),
            body: substitute(&request.body.raw, variables),
        }
    }

    /// Validate method and URL and parse the header block.
    ///
    /// An empty method means GET and only http(s) URLs are accepted. Header
    /// and body content is not validated.
    pub fn build(&self) -> Result<BuiltRequest, BuildError> {
        let method = if self.method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(self.method.as_bytes())
                .map_err(|_| BuildError::InvalidMethod(self.method.clone()))?
        };

        let url = Url::parse(&self.url).map_err(|source| BuildError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BuildError::UnsupportedScheme {
                url: self.url.clone(),
                scheme: url.scheme().to_string(),
            });
        }

        let headers = parse_header_block(&self.headers);

        for field in [&self.url, &self.headers, &self.body] {
            let leftover = unresolved_placeholders(field);
            if !leftover.is_empty() {
                tracing::warn!(placeholders = ?leftover, "Unresolved placeholders left in request");
            }
        }

        Ok(BuiltRequest {
            method,
            url: self.url.clone(),
            headers,
            body: self.body.clone(),
        })
    }
}

/// Build a request straight from a template
pub fn build(template: &Item, variables: &VariableMap) -> Result<BuiltRequest, BuildError> {
    RequestForm::from_template(template, variables).build()
}
