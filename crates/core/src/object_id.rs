//! Manifest object identifiers
//!
//! Every record in the `objects` dictionary of a project manifest is keyed
//! by a 96-bit identifier written as 24 uppercase hexadecimal characters,
//! e.g. `8A3F2C1B9D0E4F5A6B7C8D9E`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Length of an identifier in its textual form
pub const OBJECT_ID_LEN: usize = 24;

/// Identifier of a manifest object
///
/// Stored as the 12 raw bytes; rendered as uppercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Create a new random ObjectId from the leading 96 bits of a UUID v4
    pub fn new() -> Self {
        let uuid = Uuid::new_v4();
        let mut bytes = [0u8; 12];
        bytes.copy_from_slice(&uuid.as_bytes()[..12]);
        Self(bytes)
    }

    /// Create an ObjectId from raw bytes
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Create an ObjectId whose low 64 bits hold `value`
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 12];
        bytes[4..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Get the raw bytes of this ObjectId
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Parse the textual form
    ///
    /// Only the canonical form is accepted: exactly 24 characters, digits
    /// and uppercase `A`-`F`. Returns None otherwise.
    pub fn from_string(s: &str) -> Option<Self> {
        if !is_object_id(s) {
            return None;
        }
        let mut bytes = [0u8; 12];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            bytes[i] = (hex_value(chunk[0])? << 4) | hex_value(chunk[1])?;
        }
        Some(Self(bytes))
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s).ok_or_else(|| Error::InvalidObjectId(s.to_string()))
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Whether `s` is a canonical identifier
pub fn is_object_id(s: &str) -> bool {
    s.len() == OBJECT_ID_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_canonical() {
        let id = ObjectId::new();
        let s = id.to_string();
        assert_eq!(s.len(), OBJECT_ID_LEN);
        assert!(is_object_id(&s));
    }

    #[test]
    fn test_new_ids_differ() {
        assert_ne!(ObjectId::new(), ObjectId::new());
    }

    #[test]
    fn test_parse_display_agree() {
        let id: ObjectId = "8A3F2C1B9D0E4F5A6B7C8D9E".parse().unwrap();
        assert_eq!(id.to_string(), "8A3F2C1B9D0E4F5A6B7C8D9E");
        assert_eq!(id.as_bytes()[0], 0x8A);
        assert_eq!(id.as_bytes()[11], 0x9E);
    }

    #[test]
    fn test_from_u64() {
        assert_eq!(ObjectId::from_u64(1).to_string(), "000000000000000000000001");
        assert_eq!(
            ObjectId::from_u64(0xABCDEF).to_string(),
            "000000000000000000ABCDEF"
        );
    }

    #[test]
    fn test_rejects_lowercase() {
        assert!(ObjectId::from_string("8a3f2c1b9d0e4f5a6b7c8d9e").is_none());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(ObjectId::from_string("8A3F2C1B9D0E4F5A6B7C8D9").is_none());
        assert!(ObjectId::from_string("8A3F2C1B9D0E4F5A6B7C8D9E0").is_none());
        assert!(ObjectId::from_string("").is_none());
    }

    #[test]
    fn test_rejects_non_hex() {
        let err = "8A3F2C1B9D0E4F5A6B7C8D9G".parse::<ObjectId>().unwrap_err();
        assert!(matches!(err, Error::InvalidObjectId(_)));
    }

    #[test]
    fn test_serde_uses_text_form() {
        let id = ObjectId::from_u64(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000000000000000002A\"");
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ObjectId>("\"nope\"").is_err());
    }
}
