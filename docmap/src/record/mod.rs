//! The record mapper: base trait, cursor, and the `record!` macro.

mod cursor;
mod record;

pub use cursor::RecordCursor;
pub use record::Record;
