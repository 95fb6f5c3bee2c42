//! Request and reply messages exchanged with the transfer worker.

use serde::{Deserialize, Serialize};

use crate::domain::{Lines, Stations, TransitMap};

use super::compute::{TransfersByStation, compute_transfers};

/// A snapshot of a system to compute transfers for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(default)]
    pub lines: Lines,

    #[serde(default)]
    pub stations: Stations,
}

impl TransferRequest {
    pub fn new(lines: Lines, stations: Stations) -> Self {
        Self { lines, stations }
    }

    /// Run the computation for this snapshot.
    pub fn compute(&self) -> TransferReply {
        TransferReply {
            transfers_by_station_id: compute_transfers(&self.lines, &self.stations),
        }
    }
}

impl From<TransitMap> for TransferRequest {
    fn from(map: TransitMap) -> Self {
        Self {
            lines: map.lines,
            stations: map.stations,
        }
    }
}

/// The computed transfers for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReply {
    pub transfers_by_station_id: TransfersByStation,
}
