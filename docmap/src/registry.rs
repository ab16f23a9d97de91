//! The record-type to collection-name registration table.
//!
//! Record types resolve their logical collection name here. The table is
//! populated either explicitly through [register] (usually by the `record!`
//! macro) or lazily by [resolve], which defaults to the type's short name.
//! Registration is idempotent: the first name bound to a type wins, and
//! re-registering returns the original binding. This replaces any runtime
//! type-identity trickery with a plain lookup table.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;

static COLLECTION_NAMES: Lazy<DashMap<TypeId, String>> = Lazy::new(DashMap::new);

/// Binds a collection name to a record type.
///
/// Returns the effective name: the given one on first registration, the
/// originally registered one on every later call.
pub fn register<T: 'static>(name: &str) -> String {
    COLLECTION_NAMES
        .entry(TypeId::of::<T>())
        .or_insert_with(|| name.to_string())
        .clone()
}

/// Resolves the collection name for a record type, defaulting to the type's
/// short name and remembering the default.
pub fn resolve<T: 'static>() -> String {
    COLLECTION_NAMES
        .entry(TypeId::of::<T>())
        .or_insert_with(|| short_type_name::<T>().to_string())
        .clone()
}

/// The type's name without its module path. Record marker types are plain
/// (non-generic) structs, so no generic-argument handling is needed.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
