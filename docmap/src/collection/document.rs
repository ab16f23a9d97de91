use crate::common::Value;
use crate::errors::{DocmapError, DocmapResult, ErrorKind};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

/// Represents a schema-less document: an ordered mapping from field names to
/// [Value]s.
///
/// Field names are flat strings in this layer; there is no nested-key path
/// syntax. Insertion order is preserved, so a document serializes its fields
/// in the order they were assigned.
///
/// The `_id` field is not special at this level; identity handling lives in
/// the record mapper and the driver. The only restriction a document itself
/// enforces is that field names cannot be empty.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::doc;
///
/// let mut doc = doc! { name: "Alice", age: 30 };
/// doc.put("email", "alice@example.com")?;
/// assert_eq!(doc.len(), 3);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified value with the specified field name.
    ///
    /// Inserts a field into the document; an existing field with the same
    /// name is updated in place, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidOperation] when the field name is empty.
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> DocmapResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("document does not support an empty field name");
            return Err(DocmapError::new(
                "document does not support an empty field name",
                ErrorKind::InvalidOperation,
            ));
        }
        self.data.insert(key, value.into());
        Ok(())
    }

    /// Inserts without validation. Callers guarantee a non-empty key,
    /// typically because it came out of another document.
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.data.insert(key, value);
    }

    /// Returns the value associated with the field, or [Value::Null] if the
    /// document contains no such field.
    pub fn get(&self, key: &str) -> Value {
        self.data.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Checks whether the document contains the field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Iterates over `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Iterates over field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }
}

impl Ord for Document {
    fn cmp(&self, other: &Document) -> Ordering {
        // consistent with PartialEq: equal documents compare equal even when
        // field order differs
        if self == other {
            return Ordering::Equal;
        }
        for ((key_a, value_a), (key_b, value_b)) in self.data.iter().zip(other.data.iter()) {
            match key_a.cmp(key_b) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
            match value_a.cmp(value_b) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
        }
        self.data.len().cmp(&other.data.len())
    }
}

impl PartialOrd for Document {
    fn partial_cmp(&self, other: &Document) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.data.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Strips the surrounding quotes `stringify!` leaves on string-literal keys,
/// so the `doc!` macro accepts both `name: ...` and `"_id": ...`.
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [Document] from field-value pairs.
///
/// Keys can be bare identifiers or string literals; values can be literals,
/// expressions in parentheses, arrays, or nested documents in braces.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::doc;
///
/// let empty = doc! {};
/// let user = doc! {
///     name: "Alice",
///     age: 30,
///     tags: ["admin", "user"],
///     address: { city: "New York", zip: 10001 },
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the `doc!` macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, literal, arithmetic in parens, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
