//! # Domain Models
//!
//! A guestbook has exactly one entity: the [`GuestMessage`] a guest leaves on
//! the blessings wall. [`NewWish`] is what a guest submits before the server
//! assigns an identifier and a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Upper bound on the author name, in characters.
pub const NAME_MAX_CHARS: usize = 50;
/// Upper bound on the message body, in characters.
pub const MESSAGE_MAX_CHARS: usize = 500;

/// One stored wish. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMessage {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    /// Server clock at write time. Serialized as an RFC 3339 string with
    /// millisecond precision, e.g. `2025-06-14T17:30:00.000Z`.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// The write request body: `{ "name": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWish {
    pub name: String,
    pub message: String,
}

impl NewWish {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Trims both fields and checks them against the guestbook bounds.
    ///
    /// Returns the trimmed wish on success so callers store exactly what was
    /// validated.
    pub fn validated(self) -> Result<NewWish> {
        let name = self.name.trim();
        let message = self.message.trim();

        if name.is_empty() || message.is_empty() {
            return Err(AppError::MissingFields);
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(AppError::TooLong {
                field: "name",
                max: NAME_MAX_CHARS,
            });
        }
        if message.chars().count() > MESSAGE_MAX_CHARS {
            return Err(AppError::TooLong {
                field: "message",
                max: MESSAGE_MAX_CHARS,
            });
        }

        Ok(NewWish::new(name, message))
    }

    /// Stamps the wish with a fresh v4 id and the current time.
    pub fn into_message(self) -> GuestMessage {
        GuestMessage {
            id: Uuid::new_v4(),
            name: self.name,
            message: self.message,
            timestamp: Utc::now(),
        }
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validated_trims_fields() {
        let wish = NewWish::new("  Ada ", "\tCongrats!\n").validated().unwrap();
        assert_eq!(wish, NewWish::new("Ada", "Congrats!"));
    }

    #[test]
    fn test_validated_rejects_blank_fields() {
        assert_eq!(
            NewWish::new("   ", "hello").validated(),
            Err(AppError::MissingFields)
        );
        assert_eq!(NewWish::new("Ada", "").validated(), Err(AppError::MissingFields));
    }

    #[test]
    fn test_validated_counts_characters_not_bytes() {
        // 50 two-byte characters is still within the bound.
        let name = "é".repeat(NAME_MAX_CHARS);
        assert!(NewWish::new(name, "hi").validated().is_ok());

        let too_long = "a".repeat(NAME_MAX_CHARS + 1);
        let err = NewWish::new(too_long, "hi").validated().unwrap_err();
        assert_eq!(
            err,
            AppError::TooLong {
                field: "name",
                max: NAME_MAX_CHARS
            }
        );
        assert_eq!(err.to_string(), "name must be at most 50 characters");
    }

    #[test]
    fn test_validated_rejects_long_message() {
        let message = "x".repeat(MESSAGE_MAX_CHARS + 1);
        assert!(NewWish::new("Ada", message).validated().is_err());
        let message = "x".repeat(MESSAGE_MAX_CHARS);
        assert!(NewWish::new("Ada", message).validated().is_ok());
    }

    #[test]
    fn test_into_message_assigns_unique_ids() {
        let a = NewWish::new("Ada", "one").into_message();
        let b = NewWish::new("Ada", "one").into_message();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_timestamp_wire_format() {
        let msg = GuestMessage {
            id: Uuid::nil(),
            name: "Ada".into(),
            message: "Congrats!".into(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 14, 17, 30, 0).unwrap(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["timestamp"], "2025-06-14T17:30:00.000Z");

        let back: GuestMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_timestamp_accepts_offsets() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "name": "Ada",
            "message": "hi",
            "timestamp": "2025-06-14T19:30:00+02:00",
        });
        let msg: GuestMessage = serde_json::from_value(json).unwrap();
        assert_eq!(msg.timestamp, Utc.with_ymd_and_hms(2025, 6, 14, 17, 30, 0).unwrap());
    }
}
