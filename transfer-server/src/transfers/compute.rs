//! Transfer computation.
//!
//! For every station, find the lines that actually stop there. A line
//! stops at a station when the station exists, is not a waypoint, and is
//! not overridden as a waypoint by that line.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Line, LineId, Lines, StationId, Stations};

/// Lines stopping at each station.
///
/// Every station of the input snapshot is a key, including stations no line
/// stops at. Serializes as an object of sorted arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransfersByStation(BTreeMap<StationId, BTreeSet<LineId>>);

impl TransfersByStation {
    /// Lines stopping at a station, or `None` if the station was not part
    /// of the snapshot.
    pub fn lines_at(&self, station_id: &StationId) -> Option<&BTreeSet<LineId>> {
        self.0.get(station_id)
    }

    /// Stations served by at least `min_lines` lines, in id order.
    pub fn transfer_station_ids(&self, min_lines: usize) -> Vec<StationId> {
        self.0
            .iter()
            .filter(|(_, lines)| lines.len() >= min_lines)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Iterate over stations and their lines, in station id order.
    pub fn iter(&self) -> impl Iterator<Item = (&StationId, &BTreeSet<LineId>)> {
        self.0.iter()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StationId, BTreeSet<LineId>)> for TransfersByStation {
    fn from_iter<I: IntoIterator<Item = (StationId, BTreeSet<LineId>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The stations a line actually stops at, in path order.
///
/// Skips ids missing from `stations`, waypoints, and the line's own
/// waypoint overrides. Repeated ids are yielded each time they occur.
pub fn line_stops<'a>(
    line: &'a Line,
    stations: &'a Stations,
) -> impl Iterator<Item = &'a StationId> + 'a {
    line.station_ids.iter().filter(move |id| {
        stations.get(*id).is_some_and(|station| !station.is_waypoint)
            && !line.overrides_as_waypoint(id)
    })
}

/// Compute the lines stopping at every station.
///
/// Runs in a single pass over all line stops. Never fails: dangling station
/// references and duplicate stops are absorbed.
pub fn compute_transfers(lines: &Lines, stations: &Stations) -> TransfersByStation {
    let mut transfers: BTreeMap<StationId, BTreeSet<LineId>> = stations
        .keys()
        .map(|id| (id.clone(), BTreeSet::new()))
        .collect();

    for (line_id, line) in lines {
        for station_id in line_stops(line, stations) {
            // line_stops only yields ids present in `stations`
            if let Some(serving) = transfers.get_mut(station_id) {
                serving.insert(line_id.clone());
            }
        }
    }

    TransfersByStation(transfers)
}
