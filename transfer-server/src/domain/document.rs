//! Stored documents.
//!
//! A system document holds one user's map; a user document lists the
//! systems they own. Only the fields this crate reads are modelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Lines, Stations, SystemId, UserId};

/// Snapshot of the lines and stations of one transit system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitMap {
    #[serde(default)]
    pub lines: Lines,

    #[serde(default)]
    pub stations: Stations,
}

/// A stored transit system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDoc {
    pub system_id: SystemId,

    /// Owner of the system.
    pub user_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub map: TransitMap,
}

impl SystemDoc {
    /// Last update time as milliseconds since the Unix epoch.
    pub fn last_updated_millis(&self) -> Option<i64> {
        self.last_updated.map(|t| t.timestamp_millis())
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub user_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub system_ids: Vec<SystemId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, StationId};

    #[test]
    fn parse_system_doc() {
        let json = r#"{
            "systemId": "sys1",
            "userId": "user1",
            "title": "Metro",
            "lastUpdated": "2024-03-15T10:00:00Z",
            "map": {
                "lines": {"red": {"stationIds": ["a", "b"]}},
                "stations": {"a": {}, "b": {"isWaypoint": true}}
            }
        }"#;

        let doc: SystemDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.system_id.as_str(), "sys1");
        assert_eq!(doc.title.as_deref(), Some("Metro"));
        assert_eq!(doc.last_updated_millis(), Some(1_710_496_800_000));
        assert!(doc.map.lines.contains_key(&LineId::from("red")));
        assert!(doc.map.stations[&StationId::from("b")].is_waypoint);
    }

    #[test]
    fn system_doc_without_map_or_timestamp() {
        let json = r#"{"systemId": "sys1", "userId": "user1"}"#;
        let doc: SystemDoc = serde_json::from_str(json).unwrap();
        assert!(doc.map.lines.is_empty());
        assert!(doc.map.stations.is_empty());
        assert_eq!(doc.last_updated_millis(), None);
    }

    #[test]
    fn system_doc_rejects_invalid_ids() {
        let json = r#"{"systemId": "../x", "userId": "user1"}"#;
        assert!(serde_json::from_str::<SystemDoc>(json).is_err());
    }

    #[test]
    fn parse_user_doc() {
        let json = r#"{"userId": "u1", "displayName": "Ada", "systemIds": ["s1", "s2"]}"#;
        let doc: UserDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.display_name.as_deref(), Some("Ada"));
        assert_eq!(doc.system_ids.len(), 2);
    }
}
