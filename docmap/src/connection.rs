//! The process-wide connection registry.

use crate::common::MEMORY_SCHEME;
use crate::driver::memory::MemoryClient;
use crate::driver::{DriverClient, DriverCollection, DriverDatabase};
use crate::errors::{DocmapError, DocmapResult, ErrorKind};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static DATABASE: Lazy<RwLock<Option<Arc<dyn DriverDatabase>>>> = Lazy::new(|| RwLock::new(None));

/// Holds the one active database handle for the process and resolves
/// collection handles by name.
///
/// There is no pooling and no multi-tenancy: reconnecting silently discards
/// the previously held handle without closing it. Thread safety of the
/// stored handle is whatever the driver provides; this layer only guards the
/// slot itself.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::Connection;
///
/// Connection::connect("memory://", "my-app")?;
/// let users = Connection::collection("User")?;
/// ```
pub struct Connection;

impl Connection {
    /// Establishes a connection to the given URI and selects the named
    /// database, replacing any previously held connection.
    ///
    /// The URI scheme picks the driver; `memory://` is the driver shipped
    /// in-tree. Out-of-tree drivers connect through [Connection::connect_with].
    ///
    /// # Errors
    ///
    /// Propagates the driver's connection error unmodified; no retries.
    pub fn connect(uri: &str, db_name: &str) -> DocmapResult<()> {
        if uri.starts_with(MEMORY_SCHEME) {
            let client: Arc<dyn DriverClient> = MemoryClient::connect(uri)?;
            Self::connect_with(client, db_name)
        } else {
            log::error!("no driver available for uri '{}'", uri);
            Err(DocmapError::new(
                &format!("no driver available for uri '{}'", uri),
                ErrorKind::ConnectionFailed,
            ))
        }
    }

    /// Selects the named database on an already-connected driver client and
    /// installs it as the process-wide handle.
    pub fn connect_with(client: Arc<dyn DriverClient>, db_name: &str) -> DocmapResult<()> {
        let database = client.database(db_name)?;
        let mut slot = DATABASE.write();
        if slot.is_some() {
            log::debug!("replacing the existing connection with '{}'", db_name);
        }
        *slot = Some(database);
        log::debug!("connected to database '{}'", db_name);
        Ok(())
    }

    /// Returns a handle to the named collection within the currently
    /// selected database.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::NotConnected] when `connect` was never called.
    pub fn collection(name: &str) -> DocmapResult<Arc<dyn DriverCollection>> {
        let slot = DATABASE.read();
        match slot.as_ref() {
            Some(database) => database.collection(name),
            None => {
                log::error!("no active connection; call Connection::connect first");
                Err(DocmapError::new(
                    "no active connection; call Connection::connect first",
                    ErrorKind::NotConnected,
                ))
            }
        }
    }

    /// Checks whether a connection has been established.
    pub fn is_connected() -> bool {
        DATABASE.read().is_some()
    }
}
