use crate::common::Value;
use crate::errors::{DocmapError, DocmapResult, ErrorKind};
use once_cell::sync::Lazy;
use rand::RngCore;
use std::fmt::{Debug, Display};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of the canonical hex string form of an [ObjectId].
pub const OBJECT_ID_HEX_LEN: usize = 24;

static PROCESS_RANDOM: Lazy<[u8; 5]> = Lazy::new(|| {
    let mut bytes = [0u8; 5];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
});

// starts in the lower half of the 24-bit range so the masked counter cannot
// wrap (and invert byte order) before 8 million ids have been generated
static COUNTER: Lazy<AtomicU32> =
    Lazy::new(|| AtomicU32::new(rand::thread_rng().next_u32() & 0x007F_FFFF));

/// The driver's native document identifier.
///
/// Each persisted document is uniquely identified by an `ObjectId` stored in
/// its `_id` field. The ID is generated by the driver during insertion when
/// the document does not carry one.
///
/// # Layout
///
/// 12 bytes: a 4-byte big-endian Unix-seconds timestamp, a 5-byte per-process
/// random component, and a 3-byte incrementing counter. The counter starts in
/// the lower half of its 24-bit range, so byte order follows generation order
/// for at least the first 8 million ids a process generates, which makes the
/// natural collection order (keyed by id) match insertion order.
///
/// # Canonical string form
///
/// In-memory records never hold an `ObjectId` directly; identity is always
/// stored as the canonical 24-character lowercase hex string. The native type
/// appears only at the query boundary, via the [to_native_id] /
/// [from_native_id] conversion pair.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::collection::ObjectId;
///
/// let id = ObjectId::new();
/// let hex = id.to_hex();
/// let parsed = ObjectId::parse_str(&hex)?;
/// assert_eq!(id, parsed);
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId {
    bytes: [u8; 12],
}

impl ObjectId {
    /// Generates a new unique `ObjectId`.
    pub fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|it| it.as_secs() as u32)
            .unwrap_or(0);
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00FF_FFFF;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_RANDOM);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        ObjectId { bytes }
    }

    /// Creates an `ObjectId` from raw bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        ObjectId { bytes }
    }

    /// Parses the canonical 24-character hex form into an `ObjectId`.
    ///
    /// This is the string-to-native half of the identity conversion boundary.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidId] when the input has the wrong length or
    /// contains non-hex characters.
    pub fn parse_str(hex: &str) -> DocmapResult<ObjectId> {
        if hex.len() != OBJECT_ID_HEX_LEN || !hex.is_ascii() {
            log::error!("invalid object id '{}': expected 24 hex characters", hex);
            return Err(DocmapError::new(
                &format!("invalid object id '{}': expected 24 hex characters", hex),
                ErrorKind::InvalidId,
            ));
        }

        let mut bytes = [0u8; 12];
        for (index, byte) in bytes.iter_mut().enumerate() {
            let pair = &hex[index * 2..index * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| {
                log::error!("invalid object id '{}': non-hex characters", hex);
                DocmapError::new(
                    &format!("invalid object id '{}': non-hex characters", hex),
                    ErrorKind::InvalidId,
                )
            })?;
        }
        Ok(ObjectId { bytes })
    }

    /// Returns the canonical 24-character lowercase hex form.
    ///
    /// This is the native-to-string half of the identity conversion boundary.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
    }

    /// Returns the raw bytes of this id.
    pub fn bytes(&self) -> &[u8; 12] {
        &self.bytes
    }

    /// Returns the generation timestamp as Unix seconds.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        ObjectId::new()
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId(\"{}\")", self.to_hex())
    }
}

/// Converts a canonical identity string to the driver's native id type.
///
/// Malformed input is a distinct [ErrorKind::InvalidId] error, surfaced by
/// every operation that builds an id-keyed match condition (`get_by_id`,
/// replace on `save`, `delete`).
pub fn to_native_id(id: &str) -> DocmapResult<ObjectId> {
    ObjectId::parse_str(id)
}

/// Converts an identity value captured from the driver to canonical string
/// form. Never fails: non-id values are stringified as-is, matching the
/// "store whatever was assigned, as a string" contract of the identity field.
pub fn from_native_id(value: &Value) -> String {
    match value {
        Value::Id(id) => id.to_hex(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_round_trips_through_hex() {
        let id = ObjectId::new();
        let hex = id.to_hex();
        assert_eq!(hex.len(), OBJECT_ID_HEX_LEN);
        let parsed = ObjectId::parse_str(&hex).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let result = ObjectId::parse_str("abc");
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let result = ObjectId::parse_str("zzzzzzzzzzzzzzzzzzzzzzzz");
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        let result = ObjectId::parse_str("ééééééééééééééééééééééé");
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_generation_order_matches_byte_order() {
        let mut previous = ObjectId::new();
        for _ in 0..1000 {
            let next = ObjectId::new();
            assert!(previous < next);
            previous = next;
        }
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = Vec::new();
        for _ in 0..100 {
            ids.push(ObjectId::new());
        }

        let mut unique_ids = ids.clone();
        unique_ids.sort();
        unique_ids.dedup();
        assert_eq!(ids.len(), unique_ids.len());
    }

    #[test]
    fn test_display_and_debug() {
        let id = ObjectId::from_bytes([
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
        ]);
        assert_eq!(format!("{}", id), "0102030405060708090a0b0c");
        assert_eq!(format!("{:?}", id), "ObjectId(\"0102030405060708090a0b0c\")");
    }

    #[test]
    fn test_timestamp_accessor() {
        let id = ObjectId::from_bytes([
            0x00, 0x00, 0x00, 0x2a, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);
        assert_eq!(id.timestamp(), 42);
    }

    #[test]
    fn test_conversion_pair() {
        let id = ObjectId::new();
        let canonical = from_native_id(&Value::Id(id));
        assert_eq!(to_native_id(&canonical).unwrap(), id);

        // string values pass through untouched
        assert_eq!(from_native_id(&Value::from("abc")), "abc");
        // anything else is stringified
        assert_eq!(from_native_id(&Value::I64(7)), "7");
    }
}
