//! Domain types for transit maps.
//!
//! A transit system is a set of stations and a set of lines running through
//! them. Document ids are validated at construction time; station and line
//! ids are opaque.

mod document;
mod id;
mod line;
mod station;

pub use document::{SystemDoc, TransitMap, UserDoc};
pub use id::{InvalidDocumentId, LineId, StationId, SystemId, UserId};
pub use line::{Line, Lines};
pub use station::{Station, Stations};
