// doc constants
pub const DOC_ID: &str = "_id";

/// Fields whose names start with this prefix are internal bookkeeping and are
/// never serialized to the database.
pub const RESERVED_PREFIX: &str = "__";

// driver constants
pub const MEMORY_SCHEME: &str = "memory://";

pub const DOCMAP_VERSION: &str = env!("CARGO_PKG_VERSION");
