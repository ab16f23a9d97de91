//! Embedded in-memory driver.
//!
//! Keeps whole databases in process memory behind the standard driver
//! traits. Useful for tests and for applications that want the mapper's API
//! without an external database. Clients are shared per URI, so reconnecting
//! to the same `memory://` URI sees the same data for the life of the
//! process.

mod collection;

pub use collection::MemoryCollection;

use crate::common::MEMORY_SCHEME;
use crate::driver::{DriverClient, DriverCollection, DriverDatabase};
use crate::errors::{DocmapError, DocmapResult, ErrorKind};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static CLIENTS: Lazy<DashMap<String, Arc<MemoryClient>>> = Lazy::new(DashMap::new);

/// An in-memory driver client holding named databases.
pub struct MemoryClient {
    databases: DashMap<String, Arc<MemoryDatabase>>,
}

impl MemoryClient {
    /// Connects to an in-memory store identified by a `memory://` URI.
    ///
    /// The same URI always resolves to the same client within a process.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ConnectionFailed] for any other URI scheme.
    pub fn connect(uri: &str) -> DocmapResult<Arc<MemoryClient>> {
        if !uri.starts_with(MEMORY_SCHEME) {
            log::error!("memory driver cannot connect to '{}'", uri);
            return Err(DocmapError::new(
                &format!(
                    "memory driver cannot connect to '{}': expected a '{}' uri",
                    uri, MEMORY_SCHEME
                ),
                ErrorKind::ConnectionFailed,
            ));
        }

        let client = CLIENTS
            .entry(uri.to_string())
            .or_insert_with(|| {
                Arc::new(MemoryClient {
                    databases: DashMap::new(),
                })
            })
            .clone();
        log::debug!("connected memory client for '{}'", uri);
        Ok(client)
    }
}

impl DriverClient for MemoryClient {
    fn database(&self, name: &str) -> DocmapResult<Arc<dyn DriverDatabase>> {
        let database = self
            .databases
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryDatabase::new(name)))
            .clone();
        let database: Arc<dyn DriverDatabase> = database;
        Ok(database)
    }
}

/// An in-memory database holding named collections.
pub struct MemoryDatabase {
    name: String,
    collections: DashMap<String, Arc<MemoryCollection>>,
}

impl MemoryDatabase {
    fn new(name: &str) -> Self {
        MemoryDatabase {
            name: name.to_string(),
            collections: DashMap::new(),
        }
    }
}

impl DriverDatabase for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn collection(&self, name: &str) -> DocmapResult<Arc<dyn DriverCollection>> {
        let collection = self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCollection::new(name)))
            .clone();
        let collection: Arc<dyn DriverCollection> = collection;
        Ok(collection)
    }
}
