//! Session - one loaded collection wired to its catalog and dispatcher
//!
//! Everything is passed in explicitly; there is no process-wide client or
//! logger, so several sessions can live side by side.

use std::path::Path;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::collection::{build_catalog, load_collection, Catalog, CatalogEntry};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::Collection;
use crate::network::{DispatchResult, Dispatcher};
use crate::request::{BuiltRequest, RequestForm};

pub struct Session {
    collection: Collection,
    catalog: Catalog,
    dispatcher: Dispatcher,
}

impl Session {
    /// Load the configured collection and prepare a dispatcher
    pub fn open(config: &Config) -> Result<Session> {
        let dispatcher = Dispatcher::new(config.dispatch())?;
        Session::load(&config.collection, dispatcher)
    }

    pub fn load(path: &Path, dispatcher: Dispatcher) -> Result<Session> {
        let collection = load_collection(path)?;
        Ok(Session::new(collection, dispatcher))
    }

    pub fn new(collection: Collection, dispatcher: Dispatcher) -> Session {
        let catalog = build_catalog(&collection);
        Session {
            collection,
            catalog,
            dispatcher,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn entry(&self, id: &str) -> Result<&CatalogEntry> {
        self.catalog
            .get(id)
            .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
    }

    /// Pre-filled form for the template `id`
    pub fn form(&self, id: &str) -> Result<RequestForm> {
        let entry = self.entry(id)?;
        Ok(RequestForm::from_template(&entry.template, &self.catalog.variables))
    }

    pub fn build(&self, form: &RequestForm) -> Result<BuiltRequest> {
        Ok(form.build()?)
    }

    pub async fn send(&self, request: BuiltRequest) -> DispatchResult {
        self.dispatcher.send(request).await
    }

    /// Dispatch on a background task; see [`Dispatcher::spawn`]
    pub fn spawn(&self, request: BuiltRequest, timeout: Option<Duration>) -> JoinHandle<DispatchResult> {
        let timeout = timeout.unwrap_or(self.dispatcher.config().timeout);
        self.dispatcher.spawn(request, timeout)
    }
}
