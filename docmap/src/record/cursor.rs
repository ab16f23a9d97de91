use crate::collection::Document;
use crate::record::Record;
use std::marker::PhantomData;

/// A lazy, forward-only cursor over query results.
///
/// Each raw document is rehydrated into a record instance as the cursor
/// advances, through the same field funnel as construction. A cursor is
/// finite and not restartable; calling [Record::all] again derives a fresh
/// one.
pub struct RecordCursor<T> {
    documents: std::vec::IntoIter<Document>,
    _phantom: PhantomData<T>,
}

impl<T: Record> RecordCursor<T> {
    pub(crate) fn new(documents: Vec<Document>) -> Self {
        RecordCursor {
            documents: documents.into_iter(),
            _phantom: PhantomData,
        }
    }

    /// The number of results not yet consumed.
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }
}

impl<T: Record> Iterator for RecordCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.documents.next().and_then(|document| T::create(Some(document)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.documents.size_hint()
    }
}

impl<T: Record> ExactSizeIterator for RecordCursor<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    crate::record! {
        struct Item in "cursor_items" {
            rank: i64,
        }
    }

    #[test]
    fn test_cursor_rehydrates_in_order() {
        let documents = vec![doc! { rank: 1 }, doc! { rank: 2 }, doc! { rank: 3 }];
        let cursor: RecordCursor<Item> = RecordCursor::new(documents);
        let ranks: Vec<i64> = cursor.map(|item| item.rank().unwrap()).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_cursor_is_lazy_and_sized() {
        let documents = vec![doc! { rank: 1 }, doc! { rank: 2 }];
        let mut cursor: RecordCursor<Item> = RecordCursor::new(documents);
        assert_eq!(cursor.remaining(), 2);
        let first = cursor.next().unwrap();
        assert_eq!(first.rank(), Some(1));
        assert_eq!(cursor.remaining(), 1);
    }
}
