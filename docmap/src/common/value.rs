use crate::collection::{Document, ObjectId};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Compare two floats for equality with proper NaN handling.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Compare two floats with NaN treated as greater than all other values.
#[inline]
fn num_cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Represents a [Document] field value. It can be a simple value like
/// [Value::I64] or [Value::String], or a complex value like [Value::Array]
/// or [Value::Document].
///
/// # Purpose
/// Provides a unified representation for everything that can be stored in a
/// docmap document: native Rust scalars, strings, arrays, nested documents,
/// and the driver's native identifier ([Value::Id]).
///
/// # Characteristics
/// - **Comparable**: implements `Ord` for single-key sorting; integers and
///   floats compare across variants, NaN sorts last
/// - **Serializable**: serde support behind the `serde` feature
/// - **Default**: defaults to `Null`
///
/// # Usage
/// Create values using the `From` trait or the `doc!` macro:
/// ```text
/// let v1: Value = 42.into();
/// let v2 = Value::from("hello");
/// let doc = doc! { age: 42, name: "Alice" };
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a text value.
    String(String),
    /// Represents a native document identifier.
    Id(ObjectId),
    /// Represents an ordered list of values.
    Array(Vec<Value>),
    /// Represents a nested document.
    Document(Document),
}

impl Value {
    /// Converts any compatible value into a [Value].
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    /// Converts an `Option` into a [Value], mapping `None` to [Value::Null].
    pub fn from_option<T: Into<Value>>(value: Option<T>) -> Value {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }

    /// Converts a vector of compatible values into a [Value::Array].
    pub fn from_vec<T: Into<Value>>(values: Vec<T>) -> Value {
        Value::Array(values.into_iter().map(Into::into).collect())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns any numeric value widened to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::I64(value) => Some(*value as f64),
            Value::F64(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&ObjectId> {
        match self {
            Value::Id(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::I64(_) | Value::F64(_))
    }

    /// Takes the value out, leaving [Value::Null] in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::I64(_) | Value::F64(_) => 2,
            Value::String(_) => 3,
            Value::Id(_) => 4,
            Value::Array(_) => 5,
            Value::Document(_) => 6,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => num_eq_float(*a, *b),
            (Value::I64(a), Value::F64(b)) | (Value::F64(b), Value::I64(a)) => {
                num_eq_float(*a as f64, *b)
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Id(a), Value::Id(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Document(a), Value::Document(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Ord for Value {
    fn cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::I64(a), Value::I64(b)) => a.cmp(b),
            (Value::F64(a), Value::F64(b)) => num_cmp_float(*a, *b),
            (Value::I64(a), Value::F64(b)) => num_cmp_float(*a as f64, *b),
            (Value::F64(a), Value::I64(b)) => num_cmp_float(*a, *b as f64),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Id(a), Value::Id(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::Document(a), Value::Document(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(value) => write!(f, "{}", value),
            Value::I64(value) => write!(f, "{}", value),
            Value::F64(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "\"{}\"", value),
            Value::Id(value) => write!(f, "{}", value),
            Value::Array(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::Document(document) => write!(f, "{}", document),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F64(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<ObjectId> for Value {
    fn from(value: ObjectId) -> Self {
        Value::Id(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

/// Conversion from a [Value] back into a typed Rust value.
///
/// Used by the typed accessors generated by the `record!` macro. Returns
/// `None` when the stored value does not carry the requested type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        // integers widen to f64 so numeric fields stay readable either way
        value.as_number()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(|it| it.to_string())
    }
}

impl FromValue for ObjectId {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_id().copied()
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromValue for Document {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_document().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42), Value::I64(42));
        assert_eq!(Value::from(42i64), Value::I64(42));
        assert_eq!(Value::from(1.5), Value::F64(1.5));
        assert_eq!(Value::from("hello"), Value::String("hello".to_string()));
        assert_eq!(Value::from_option::<i64>(None), Value::Null);
        assert_eq!(Value::from_option(Some(7)), Value::I64(7));
        assert_eq!(
            Value::from_vec(vec![1, 2]),
            Value::Array(vec![Value::I64(1), Value::I64(2)])
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::I64(3).as_i64(), Some(3));
        assert_eq!(Value::F64(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::I64(3).as_number(), Some(3.0));
        assert_eq!(Value::String("x".to_string()).as_str(), Some("x"));
        assert!(Value::Null.is_null());
        assert!(Value::I64(1).is_number());
        assert!(Value::Bool(true).as_i64().is_none());
    }

    #[test]
    fn test_cross_numeric_equality() {
        assert_eq!(Value::I64(2), Value::F64(2.0));
        assert_ne!(Value::I64(2), Value::F64(2.5));
        assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
    }

    #[test]
    fn test_ordering() {
        assert!(Value::I64(1) < Value::I64(2));
        assert!(Value::I64(1) < Value::F64(1.5));
        assert!(Value::String("a".to_string()) < Value::String("b".to_string()));
        // null sorts before everything
        assert!(Value::Null < Value::Bool(false));
        assert!(Value::Bool(true) < Value::I64(0));
        // NaN sorts last among numbers
        assert!(Value::F64(f64::NAN) > Value::F64(f64::MAX));
    }

    #[test]
    fn test_take() {
        let mut value = Value::I64(9);
        assert_eq!(value.take(), Value::I64(9));
        assert!(value.is_null());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::I64(5).to_string(), "5");
        assert_eq!(Value::String("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(
            Value::Array(vec![Value::I64(1), Value::I64(2)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_from_value_typed() {
        assert_eq!(String::from_value(&Value::from("abc")), Some("abc".to_string()));
        assert_eq!(i64::from_value(&Value::I64(4)), Some(4));
        assert_eq!(f64::from_value(&Value::I64(4)), Some(4.0));
        assert_eq!(bool::from_value(&Value::I64(4)), None);
        let document = doc! { a: 1 };
        assert_eq!(
            Document::from_value(&Value::Document(document.clone())),
            Some(document)
        );
    }
}
