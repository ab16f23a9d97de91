//! # docmap - Minimal Object-Document Mapper
//!
//! docmap lets application code define schema-less record types and
//! transparently persist and retrieve them from a document database. It is a
//! thin convenience layer: collection names are inferred from type names,
//! object fields map straight onto document fields, and query results are
//! lazily rehydrated into records. Everything below the mapping contract is
//! delegated to a pluggable driver.
//!
//! ## Key Features
//!
//! - **Schema-less records**: any field the application assigns is stored,
//!   declared or not
//! - **Inferred collections**: a record type's collection defaults to its
//!   type name, overridable per type
//! - **Canonical identity**: document ids live in records as canonical hex
//!   strings; the driver's native id type appears only at query boundaries
//! - **Lazy queries**: `all()` returns a cursor that rehydrates documents
//!   into records as it is consumed
//! - **Pluggable drivers**: the mapper consumes seven driver operations
//!   behind object-safe traits; an in-memory driver ships in-tree
//! - **Field hooks**: record types can transform values on read and write,
//!   per field
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docmap::{doc, record, Connection};
//! use docmap::collection::FindOptions;
//! use docmap::record::Record;
//!
//! record! {
//!     pub struct User in "users" {
//!         email: String => set_email,
//!         age: i64 => set_age,
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect once per process
//! Connection::connect("memory://", "my-app")?;
//!
//! // Create and persist a record
//! let mut user = User::create(Some(doc! { email: "me@example.com", age: 30 })).unwrap();
//! user.save()?;
//!
//! // Query
//! println!("{} users", User::count(doc! {})?);
//! for user in User::all(doc! {}, FindOptions::new().order_by("-age"))? {
//!     println!("{}", user);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## What docmap is not
//!
//! There is no connection pooling, no transactions, no schema validation, no
//! migrations, no bulk writes, and no query language beyond equality
//! filters with single-key ordering. Every operation is one synchronous
//! driver call, surfaced unretried and unmodified on failure.
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, native identifiers, and find options
//! - [`common`] - Value model, sort order, shared constants
//! - [`connection`] - The process-wide connection registry
//! - [`driver`] - Driver traits and the in-memory driver
//! - [`errors`] - Error types and result definitions
//! - [`record`] - The record mapper and cursor
//! - [`registry`] - Record-type to collection-name registration table

pub mod collection;
pub mod common;
pub mod connection;
pub mod driver;
pub mod errors;
pub mod record;
pub mod registry;

pub use collection::{Document, FindOptions, ObjectId};
pub use common::{SortOrder, Value};
pub use connection::Connection;
pub use record::{Record, RecordCursor};
