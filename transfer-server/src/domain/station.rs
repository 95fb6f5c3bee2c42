//! Stations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::StationId;

/// All stations of a system, keyed by id.
pub type Stations = HashMap<StationId, Station>;

/// A point on the map that lines pass through.
///
/// The station's id is the key it is stored under, not a field of the
/// station itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Waypoints shape a line's geometry but are not passenger stops.
    #[serde(default)]
    pub is_waypoint: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Station {
    /// A passenger stop.
    pub fn stop() -> Self {
        Self::default()
    }

    /// A geometry-only waypoint.
    pub fn waypoint() -> Self {
        Self {
            is_waypoint: true,
            ..Self::default()
        }
    }
}
