//! Lines.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::{LineId, StationId};

/// All lines of a system, keyed by id.
pub type Lines = HashMap<LineId, Line>;

/// An ordered path through stations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Stations in path order. May contain ids that no longer exist, and
    /// may repeat an id on looping lines.
    #[serde(default)]
    pub station_ids: Vec<StationId>,

    /// Stations this line passes through without stopping.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub waypoint_overrides: BTreeSet<StationId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Line {
    /// Create a line through the given stations.
    pub fn through<I, S>(station_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StationId>,
    {
        Self {
            station_ids: station_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Mark stations this line runs through without stopping.
    pub fn with_waypoint_overrides<I, S>(mut self, station_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StationId>,
    {
        self.waypoint_overrides
            .extend(station_ids.into_iter().map(Into::into));
        self
    }

    /// Whether this line skips the given station regardless of the
    /// station's own waypoint flag.
    pub fn overrides_as_waypoint(&self, station_id: &StationId) -> bool {
        self.waypoint_overrides.contains(station_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_default_to_empty() {
        let line: Line = serde_json::from_str(r#"{"stationIds": ["a", "b"]}"#).unwrap();
        assert_eq!(line.station_ids, vec![StationId::from("a"), StationId::from("b")]);
        assert!(line.waypoint_overrides.is_empty());
    }

    #[test]
    fn overrides_deserialize_from_array() {
        let json = r##"{"stationIds": ["a", "b"], "waypointOverrides": ["b", "b"], "color": "#e6e6e6"}"##;
        let line: Line = serde_json::from_str(json).unwrap();
        assert!(line.overrides_as_waypoint(&StationId::from("b")));
        assert!(!line.overrides_as_waypoint(&StationId::from("a")));
        assert_eq!(line.waypoint_overrides.len(), 1);
        assert_eq!(line.color.as_deref(), Some("#e6e6e6"));
    }

    #[test]
    fn builder() {
        let line = Line::through(["a", "b", "c"]).with_waypoint_overrides(["b"]);
        assert_eq!(line.station_ids.len(), 3);
        assert!(line.overrides_as_waypoint(&StationId::from("b")));
    }
}
