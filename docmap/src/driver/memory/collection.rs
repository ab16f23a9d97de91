use crate::common::{SortOrder, Value, DOC_ID};
use crate::collection::{Document, FindOptions, ObjectId};
use crate::driver::{matches_filter, DriverCollection};
use crate::errors::{DocmapError, DocmapResult, ErrorKind};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory collection of documents.
///
/// Documents are keyed by their native [ObjectId] in a `BTreeMap`, so the
/// natural iteration order is id order, which for generated ids is insertion
/// order within a process.
///
/// The stored document's `_id` field always holds the native id. A
/// replacement document may carry a canonical-string `_id` (the mapper
/// resends it on update); `replace_one` keeps the matched document's native
/// id regardless, mirroring the id-immutability of server drivers.
pub struct MemoryCollection {
    name: String,
    documents: RwLock<BTreeMap<ObjectId, Document>>,
}

impl MemoryCollection {
    pub(crate) fn new(name: &str) -> Self {
        MemoryCollection {
            name: name.to_string(),
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    fn take_native_id(&self, document: &Document) -> DocmapResult<ObjectId> {
        match document.get(DOC_ID) {
            Value::Null => Ok(ObjectId::new()),
            Value::Id(id) => Ok(id),
            other => {
                log::error!(
                    "collection '{}' only supports native object ids, got {}",
                    self.name,
                    other
                );
                Err(DocmapError::new(
                    "insert requires a native object id or no id at all",
                    ErrorKind::InvalidId,
                ))
            }
        }
    }
}

impl DriverCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert_one(&self, document: Document) -> DocmapResult<ObjectId> {
        let id = self.take_native_id(&document)?;
        let mut documents = self.documents.write();
        if documents.contains_key(&id) {
            log::error!("duplicate id {} in collection '{}'", id, self.name);
            return Err(DocmapError::new(
                &format!("duplicate id {} in collection '{}'", id, self.name),
                ErrorKind::DuplicateKey,
            ));
        }
        let mut document = document;
        document.insert(DOC_ID.to_string(), Value::Id(id));
        documents.insert(id, document);
        log::debug!("inserted {} into '{}'", id, self.name);
        Ok(id)
    }

    fn replace_one(&self, filter: &Document, replacement: Document) -> DocmapResult<u64> {
        let mut documents = self.documents.write();
        let matched = documents
            .iter()
            .find(|(_, document)| matches_filter(document, filter))
            .map(|(id, _)| *id);
        match matched {
            Some(id) => {
                // the stored native id wins over whatever the replacement carries
                let mut replacement = replacement;
                replacement.insert(DOC_ID.to_string(), Value::Id(id));
                documents.insert(id, replacement);
                log::debug!("replaced {} in '{}'", id, self.name);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn find_one(&self, filter: &Document) -> DocmapResult<Option<Document>> {
        let documents = self.documents.read();
        Ok(documents
            .values()
            .find(|document| matches_filter(document, filter))
            .cloned())
    }

    fn find(&self, filter: &Document, options: &FindOptions) -> DocmapResult<Vec<Document>> {
        let matched: Vec<Document> = {
            let documents = self.documents.read();
            documents
                .values()
                .filter(|document| matches_filter(document, filter))
                .cloned()
                .collect()
        };

        let mut matched = matched;
        if let Some((field, order)) = &options.sort_by {
            // stable sort; missing fields read as Null and sort first
            matched.sort_by(|a, b| {
                let ordering = a.get(field).cmp(&b.get(field));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let results: Vec<Document> = match options.limit {
            Some(limit) => matched.into_iter().skip(skip).take(limit as usize).collect(),
            None => matched.into_iter().skip(skip).collect(),
        };
        Ok(results)
    }

    fn count(&self, filter: &Document) -> DocmapResult<u64> {
        let documents = self.documents.read();
        Ok(documents
            .values()
            .filter(|document| matches_filter(document, filter))
            .count() as u64)
    }

    fn delete_one(&self, filter: &Document) -> DocmapResult<u64> {
        let mut documents = self.documents.write();
        let matched = documents
            .iter()
            .find(|(_, document)| matches_filter(document, filter))
            .map(|(id, _)| *id);
        match matched {
            Some(id) => {
                documents.remove(&id);
                log::debug!("deleted {} from '{}'", id, self.name);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
