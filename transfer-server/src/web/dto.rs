//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{StationId, SystemId};
use crate::transfers::TransfersByStation;

/// Default minimum number of lines for a station to count as a transfer.
pub const DEFAULT_MIN_LINES: usize = 2;

/// Query parameters for stored system transfers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemTransfersQuery {
    /// Minimum number of lines for `transferStationIds` (default 2)
    pub min_lines: Option<usize>,
}

/// Transfers for a stored system.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemTransfersResponse {
    pub system_id: SystemId,

    /// Lines stopping at every station
    pub transfers_by_station_id: TransfersByStation,

    /// Stations served by at least `minLines` lines
    pub transfer_station_ids: Vec<StationId>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
