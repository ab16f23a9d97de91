//! The boundary between the record mapper and a document database driver.
//!
//! A driver supplies three handles (client, database, collection) and the
//! collection handle implements exactly the seven operations the mapper
//! consumes: insert-one, replace-one, find-one, find, count, and delete-one,
//! plus collection naming. Everything above this module is driver-agnostic.
//!
//! Filters are equality-condition documents: a stored document matches when
//! every `(field, value)` pair in the filter equals the stored value for that
//! field. There is no richer query language at this layer.

use crate::collection::{Document, FindOptions, ObjectId};
use crate::errors::DocmapResult;
use std::sync::Arc;

pub mod memory;

/// A connected driver client, able to select databases by name.
pub trait DriverClient: Send + Sync {
    fn database(&self, name: &str) -> DocmapResult<Arc<dyn DriverDatabase>>;
}

/// A selected database, able to resolve collection handles by name.
pub trait DriverDatabase: Send + Sync {
    fn name(&self) -> &str;

    fn collection(&self, name: &str) -> DocmapResult<Arc<dyn DriverCollection>>;
}

/// A collection handle exposing the seven driver operations.
///
/// All operations are synchronous and atomic from the mapper's point of
/// view; the mapper performs no retries and surfaces every error unmodified.
pub trait DriverCollection: Send + Sync {
    fn name(&self) -> &str;

    /// Inserts one document, generating a native id when the document does
    /// not carry one. Returns the id under which the document was stored.
    fn insert_one(&self, document: Document) -> DocmapResult<ObjectId>;

    /// Replaces the first document matching the filter with the replacement,
    /// whole-document. Returns the number of matched documents (0 or 1); a
    /// zero-match replace is a silent no-op.
    fn replace_one(&self, filter: &Document, replacement: Document) -> DocmapResult<u64>;

    /// Returns the first document matching the filter, in natural order.
    fn find_one(&self, filter: &Document) -> DocmapResult<Option<Document>>;

    /// Returns all documents matching the filter, with sort, skip and limit
    /// applied in that order.
    fn find(&self, filter: &Document, options: &FindOptions) -> DocmapResult<Vec<Document>>;

    /// Returns the number of documents matching the filter.
    fn count(&self, filter: &Document) -> DocmapResult<u64>;

    /// Deletes the first document matching the filter. Returns the number of
    /// deleted documents (0 or 1).
    fn delete_one(&self, filter: &Document) -> DocmapResult<u64>;
}

/// Equality-filter matching: every filter pair must equal the stored value.
/// An empty filter matches every document.
pub fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, value)| &document.get(field) == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_empty_filter_matches_everything() {
        let document = doc! { a: 1 };
        assert!(matches_filter(&document, &doc! {}));
        assert!(matches_filter(&Document::new(), &doc! {}));
    }

    #[test]
    fn test_all_pairs_must_match() {
        let document = doc! { a: 1, b: "x" };
        assert!(matches_filter(&document, &doc! { a: 1 }));
        assert!(matches_filter(&document, &doc! { a: 1, b: "x" }));
        assert!(!matches_filter(&document, &doc! { a: 2 }));
        assert!(!matches_filter(&document, &doc! { a: 1, c: true }));
    }

    #[test]
    fn test_missing_field_matches_null() {
        let document = doc! { a: 1 };
        // absent fields read as Null, so a Null condition matches them
        assert!(matches_filter(&document, &doc! { b: (crate::common::Value::Null) }));
    }
}
