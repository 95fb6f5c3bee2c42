//! Identifier types.
//!
//! Station and line ids are opaque keys chosen by the map editor, so any
//! string is accepted. System and user ids address stored documents and end
//! up in URLs and file paths; those are validated at construction time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a station within one transit system.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

/// Identifier of a line within one transit system.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

macro_rules! opaque_id {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw id.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(StationId);
opaque_id!(LineId);

/// Maximum length of a document id, in bytes.
const MAX_DOCUMENT_ID_LEN: usize = 128;

/// Error returned when parsing an invalid document id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid document id: {reason}")]
pub struct InvalidDocumentId {
    reason: &'static str,
}

fn validate_document_id(s: &str) -> Result<(), InvalidDocumentId> {
    if s.is_empty() {
        return Err(InvalidDocumentId {
            reason: "must not be empty",
        });
    }

    if s.len() > MAX_DOCUMENT_ID_LEN {
        return Err(InvalidDocumentId {
            reason: "must be at most 128 bytes",
        });
    }

    if !s
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(InvalidDocumentId {
            reason: "must contain only ASCII letters, digits, '-' or '_'",
        });
    }

    Ok(())
}

/// Identifier of a stored transit system document.
///
/// # Examples
///
/// ```
/// use transfer_server::domain::SystemId;
///
/// let id = SystemId::parse("a1B2-c3").unwrap();
/// assert_eq!(id.as_str(), "a1B2-c3");
///
/// // Path separators are rejected
/// assert!(SystemId::parse("../etc").is_err());
/// assert!(SystemId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SystemId(String);

/// Identifier of a stored user document.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

macro_rules! document_id {
    ($name:ident) => {
        impl $name {
            /// Parse a document id.
            ///
            /// The input must be 1 to 128 bytes of ASCII letters, digits,
            /// `-` or `_`.
            pub fn parse(s: &str) -> Result<Self, InvalidDocumentId> {
                validate_document_id(s)?;
                Ok(Self(s.to_string()))
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidDocumentId;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                validate_document_id(&s)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

document_id!(SystemId);
document_id!(UserId);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any id drawn from the allowed alphabet parses and round-trips
        #[test]
        fn valid_document_id_roundtrip(s in "[A-Za-z0-9_-]{1,128}") {
            let id = SystemId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Ids containing a path separator are always rejected
        #[test]
        fn slash_rejected(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            let s = format!("{a}/{b}");
            prop_assert!(UserId::parse(&s).is_err());
        }
    }
}
