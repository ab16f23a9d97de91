use crate::collection::{from_native_id, to_native_id, Document, FindOptions};
use crate::common::{Value, DOC_ID, RESERVED_PREFIX};
use crate::connection::Connection;
use crate::errors::{DocmapError, DocmapResult, ErrorKind};
use crate::record::RecordCursor;

/// Base trait of all record types; the record mapper.
///
/// A record type is a schema-less struct owning an ordered field map
/// ([Document]); implementors supply the field-storage plumbing and may
/// override the collection name and the per-field read/write hooks, while
/// this trait provides identity tracking, serialization and CRUD as default
/// methods. The [`record!`](crate::record!) macro generates a conforming
/// struct with typed accessors; implementing the trait by hand is the route
/// to custom hooks.
///
/// # Field funnel
///
/// Every write goes through [Record::set]: assignments to `_id` are routed
/// through the identity setter (canonical string form), everything else
/// through [Record::set_hook]. Every key lands somewhere, including fields
/// the record type never declared. Fields whose names start with `__` are
/// internal bookkeeping and never serialize.
///
/// # Identity
///
/// Identity is stored and compared as the canonical string form of the
/// driver's native id; the native type appears only in match conditions,
/// via the conversion pair in [crate::collection].
///
/// # Lifecycle
///
/// A transient record (no `_id`) is inserted on `save`, capturing the
/// generated id. Once persisted, every further `save` replaces the stored
/// document wholesale, and `delete` removes it. Nothing flags a deleted
/// instance: a later
/// `save` issues a replace that matches zero documents and silently no-ops.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::{doc, record, Connection};
/// use docmap::record::Record;
///
/// record! {
///     pub struct User in "users" {
///         email: String => set_email,
///     }
/// }
///
/// Connection::connect("memory://", "app")?;
/// let mut user = User::create(Some(doc! { email: "me@example.com" })).unwrap();
/// user.save()?;
/// println!("{}", User::count(doc! {})?);
/// ```
pub trait Record: Sized + 'static {
    /// Wraps an existing field map into a record instance.
    fn from_fields(fields: Document) -> Self;

    /// The instance's field map.
    fn fields(&self) -> &Document;

    /// The instance's field map, mutably.
    fn fields_mut(&mut self) -> &mut Document;

    /// The logical collection name for this record type.
    ///
    /// Defaults to the registration table, which itself defaults to the
    /// type's short name.
    fn collection_name() -> String {
        crate::registry::resolve::<Self>()
    }

    /// Write hook, called for every assignment except `_id`.
    ///
    /// Returning `Some(value)` stores the value under the assigned field;
    /// returning `None` suppresses the write, after the hook has stored
    /// whatever it wanted through [Record::fields_mut]. The default stores
    /// the value unchanged.
    fn set_hook(&mut self, field: &str, value: Value) -> Option<Value> {
        let _ = field;
        Some(value)
    }

    /// Read hook, called for every field read except `_id`.
    ///
    /// Returning `Some(value)` overrides the stored value; `None` returns
    /// it untouched.
    fn get_hook(&self, field: &str, stored: &Value) -> Option<Value> {
        let _ = (field, stored);
        None
    }

    // ---- construction ----------------------------------------------------

    /// Creates an empty transient instance.
    fn new() -> Self {
        Self::from_fields(Document::new())
    }

    /// Creates an instance from the given field map, funnelling every key
    /// through [Record::set].
    ///
    /// `None` yields `None`; absent data is not the same as an empty map,
    /// which still constructs an (empty) instance. This is how query results
    /// distinguish "no match" from "matched an empty document".
    fn create(data: Option<Document>) -> Option<Self> {
        data.map(|document| {
            let mut record = Self::new();
            for (field, value) in document.iter() {
                // keys coming out of an existing document are never empty
                if let Err(error) = record.set(field, value.clone()) {
                    log::error!("dropping field '{}': {}", field, error);
                }
            }
            record
        })
    }

    // ---- attribute storage -----------------------------------------------

    /// Assigns a field value. The single funnel for all writes.
    fn set(&mut self, field: &str, value: impl Into<Value>) -> DocmapResult<()> {
        let value = value.into();
        if field == DOC_ID {
            return self.set_id(value);
        }
        match self.set_hook(field, value) {
            Some(stored) => self.fields_mut().put(field, stored),
            None => Ok(()),
        }
    }

    /// Reads a field value through the read hook; [Value::Null] when the
    /// field is missing.
    fn field(&self, name: &str) -> Value {
        let stored = self.fields().get(name);
        if name == DOC_ID {
            return stored;
        }
        match self.get_hook(name, &stored) {
            Some(value) => value,
            None => stored,
        }
    }

    /// Checks whether the identity field is present.
    fn has_id(&self) -> bool {
        self.fields().contains_key(DOC_ID)
    }

    /// The identity in canonical string form; `None` while transient.
    fn id(&self) -> Option<String> {
        if !self.has_id() {
            return None;
        }
        Some(from_native_id(&self.fields().get(DOC_ID)))
    }

    /// Stores the identity, converting any native or string input to
    /// canonical string form.
    fn set_id(&mut self, value: impl Into<Value>) -> DocmapResult<()> {
        let canonical = from_native_id(&value.into());
        self.fields_mut().put(DOC_ID, canonical)
    }

    /// The document sent to (and compared against) the database: every field
    /// not starting with the reserved `__` prefix.
    ///
    /// The identity field is not excluded, so a replace resends `_id` as
    /// part of the replacement document. Drivers tolerate this because it
    /// matches the stored value; it is a documented non-optimization.
    fn data(&self) -> Document {
        let mut output = Document::new();
        for (field, value) in self.fields().iter() {
            if !field.starts_with(RESERVED_PREFIX) {
                output.insert(field.clone(), value.clone());
            }
        }
        output
    }

    // ---- CRUD ------------------------------------------------------------

    /// Inserts or replaces this record.
    ///
    /// Transient records are inserted and capture the generated identity;
    /// persisted records are replaced whole-document, keyed on the native
    /// id. No partial updates.
    fn save(&mut self) -> DocmapResult<()> {
        let collection = Connection::collection(&Self::collection_name())?;
        match self.id() {
            None => {
                let id = collection.insert_one(self.data())?;
                self.set_id(id)?;
            }
            Some(id) => {
                let native = to_native_id(&id)?;
                let mut filter = Document::new();
                filter.put(DOC_ID, native)?;
                collection.replace_one(&filter, self.data())?;
            }
        }
        Ok(())
    }

    /// Deletes the stored document this record's identity points at.
    ///
    /// The in-memory fields are left untouched; callers must not keep using
    /// the instance as if it were still persisted.
    fn delete(&self) -> DocmapResult<()> {
        let id = self.id().ok_or_else(|| {
            log::error!("cannot delete a record that has no id");
            DocmapError::new("cannot delete a record that has no id", ErrorKind::InvalidId)
        })?;
        let native = to_native_id(&id)?;
        let collection = Connection::collection(&Self::collection_name())?;
        let mut filter = Document::new();
        filter.put(DOC_ID, native)?;
        collection.delete_one(&filter)?;
        Ok(())
    }

    /// Fetches one record by its canonical identity string.
    ///
    /// A malformed id is an [ErrorKind::InvalidId] error; a well-formed id
    /// with no matching document is `Ok(None)`.
    fn get(id: &str) -> DocmapResult<Option<Self>> {
        let native = to_native_id(id)?;
        let collection = Connection::collection(&Self::collection_name())?;
        let mut filter = Document::new();
        filter.put(DOC_ID, native)?;
        let found = collection.find_one(&filter)?;
        Ok(Self::create(found))
    }

    /// Fetches one record matching the equality conditions (an empty
    /// document matches any record). Which record wins on a multi-match is
    /// driver-dependent.
    fn one(conditions: Document) -> DocmapResult<Option<Self>> {
        let collection = Connection::collection(&Self::collection_name())?;
        let found = collection.find_one(&conditions)?;
        Ok(Self::create(found))
    }

    /// Fetches all records matching the equality conditions, as a lazy
    /// cursor of rehydrated instances. The result is derived fresh on every
    /// call; a cursor is forward-only and not restartable.
    fn all(conditions: Document, options: FindOptions) -> DocmapResult<RecordCursor<Self>> {
        let collection = Connection::collection(&Self::collection_name())?;
        let documents = collection.find(&conditions, &options)?;
        Ok(RecordCursor::new(documents))
    }

    /// Counts the records matching the equality conditions.
    fn count(conditions: Document) -> DocmapResult<u64> {
        let collection = Connection::collection(&Self::collection_name())?;
        collection.count(&conditions)
    }
}

/// Declares a record type: a schema-less struct bound to a collection, with
/// typed accessors for its declared fields.
///
/// The struct owns its field map; undeclared fields still land in the map
/// through [Record::set], so nothing the application assigns is lost. Each
/// declared field produces a typed getter named after the field and, when a
/// `=> setter` name is given, a typed setter. The `in "name"` clause binds
/// the collection name explicitly (first registration wins); without it the
/// collection name defaults to the type's short name.
///
/// Record types needing custom field hooks implement [Record] by hand
/// instead of using this macro.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::record;
///
/// record! {
///     /// A user account.
///     pub struct User in "users" {
///         email: String => set_email,
///         age: i64 => set_age,
///         active: bool,
///     }
/// }
///
/// record! {
///     pub struct AuditEntry {}
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident in $collection:literal {
            $( $field:ident : $fty:ty $( => $setter:ident )? ),* $(,)?
        }
    ) => {
        $crate::__record_struct! {
            $(#[$meta])*
            $vis struct $name {
                $( $field : $fty $( => $setter )? ),*
            }
        }

        impl $crate::record::Record for $name {
            fn from_fields(fields: $crate::collection::Document) -> Self {
                $name { fields }
            }

            fn fields(&self) -> &$crate::collection::Document {
                &self.fields
            }

            fn fields_mut(&mut self) -> &mut $crate::collection::Document {
                &mut self.fields
            }

            fn collection_name() -> String {
                $crate::registry::register::<$name>($collection)
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field:ident : $fty:ty $( => $setter:ident )? ),* $(,)?
        }
    ) => {
        $crate::__record_struct! {
            $(#[$meta])*
            $vis struct $name {
                $( $field : $fty $( => $setter )? ),*
            }
        }

        impl $crate::record::Record for $name {
            fn from_fields(fields: $crate::collection::Document) -> Self {
                $name { fields }
            }

            fn fields(&self) -> &$crate::collection::Document {
                &self.fields
            }

            fn fields_mut(&mut self) -> &mut $crate::collection::Document {
                &mut self.fields
            }
        }
    };
}

/// Shared expansion for [record!]: the struct itself, its std impls, and the
/// typed accessors. Not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __record_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field:ident : $fty:ty $( => $setter:ident )? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        $vis struct $name {
            fields: $crate::collection::Document,
        }

        impl $name {
            $(
                $vis fn $field(&self) -> Option<$fty> {
                    <$fty as $crate::common::FromValue>::from_value(
                        &$crate::record::Record::field(self, stringify!($field)),
                    )
                }

                $(
                    $vis fn $setter(&mut self, value: $fty) -> $crate::errors::DocmapResult<()> {
                        $crate::record::Record::set(self, stringify!($field), value)
                    }
                )?
            )*
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", $crate::record::Record::fields(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::collection::ObjectId;

    record! {
        struct Note in "notes" {
            title: String => set_title,
            stars: i64 => set_stars,
            done: bool,
        }
    }

    #[test]
    fn test_create_absent_vs_empty() {
        assert!(Note::create(None).is_none());
        let empty = Note::create(Some(Document::new()));
        assert!(empty.is_some());
        assert!(empty.unwrap().fields().is_empty());
    }

    #[test]
    fn test_create_bulk_assigns_every_key() {
        let note = Note::create(Some(doc! { title: "a", undeclared: 7 })).unwrap();
        assert_eq!(note.title(), Some("a".to_string()));
        // undeclared fields still land in the field map
        assert_eq!(note.field("undeclared"), Value::I64(7));
    }

    #[test]
    fn test_typed_accessors() {
        let mut note = Note::new();
        note.set_title("hello".to_string()).unwrap();
        note.set_stars(5).unwrap();
        assert_eq!(note.title(), Some("hello".to_string()));
        assert_eq!(note.stars(), Some(5));
        // unset declared field reads as None
        assert_eq!(note.done(), None);
    }

    #[test]
    fn test_data_excludes_reserved_prefix() {
        let mut note = Note::new();
        note.set("title", "x").unwrap();
        note.set("_draft", true).unwrap();
        note.set("__dirty", true).unwrap();
        let data = note.data();
        assert_eq!(data.get("title"), Value::from("x"));
        // single leading underscore is an ordinary persisted field
        assert_eq!(data.get("_draft"), Value::Bool(true));
        // double underscore is internal bookkeeping
        assert!(!data.contains_key("__dirty"));
    }

    #[test]
    fn test_data_keeps_identity_field() {
        let mut note = Note::new();
        let id = ObjectId::new();
        note.set("_id", id).unwrap();
        note.set("title", "x").unwrap();
        assert_eq!(note.data().get("_id"), Value::from(id.to_hex()));
    }

    #[test]
    fn test_identity_is_canonical_string() {
        let mut note = Note::new();
        assert!(!note.has_id());
        assert_eq!(note.id(), None);

        let native = ObjectId::new();
        note.set("_id", native).unwrap();
        assert!(note.has_id());
        assert_eq!(note.id(), Some(native.to_hex()));
        // stored as a string, not as the native type
        assert_eq!(note.fields().get("_id"), Value::from(native.to_hex()));
    }

    #[test]
    fn test_collection_name_binding() {
        assert_eq!(Note::collection_name(), "notes");
    }

    #[test]
    fn test_default_collection_name_is_type_name() {
        record! {
            struct Unbound {}
        }
        assert_eq!(Unbound::collection_name(), "Unbound");
    }

    #[test]
    fn test_hooks_transform_reads_and_writes() {
        #[derive(Default)]
        struct Account {
            fields: Document,
        }

        impl Record for Account {
            fn from_fields(fields: Document) -> Self {
                Account { fields }
            }

            fn fields(&self) -> &Document {
                &self.fields
            }

            fn fields_mut(&mut self) -> &mut Document {
                &mut self.fields
            }

            // password writes land encoded under another field
            fn set_hook(&mut self, field: &str, value: Value) -> Option<Value> {
                if field == "passwd" {
                    let encoded = format!("123:{}", value.as_str().unwrap_or_default());
                    self.fields_mut().put("encoded_passwd", encoded).ok();
                    None
                } else {
                    Some(value)
                }
            }

            // password reads are masked
            fn get_hook(&self, field: &str, _stored: &Value) -> Option<Value> {
                if field == "passwd" {
                    Some(Value::from("******"))
                } else {
                    None
                }
            }
        }

        let mut account = Account::new();
        account.set("passwd", "hunter2").unwrap();
        assert_eq!(account.field("passwd"), Value::from("******"));
        assert_eq!(account.field("encoded_passwd"), Value::from("123:hunter2"));
        assert!(!account.fields().contains_key("passwd"));

        // serialization sees the transformed field only
        let data = account.data();
        assert!(!data.contains_key("passwd"));
        assert_eq!(data.get("encoded_passwd"), Value::from("123:hunter2"));
    }

    #[test]
    fn test_display_shows_fields() {
        let mut note = Note::new();
        note.set("title", "x").unwrap();
        assert_eq!(format!("{}", note), "{title: \"x\"}");
    }
}
