//! Documents, native identifiers, and find options.

mod document;
mod find_options;
mod object_id;

pub use document::{normalize, Document};
pub use find_options::{limit_to, order_by, parse_order_by, skip_by, FindOptions};
pub use object_id::{from_native_id, to_native_id, ObjectId, OBJECT_ID_HEX_LEN};
