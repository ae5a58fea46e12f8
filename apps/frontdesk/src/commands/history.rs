//! # History Commands

use pousada_core::{Action, ClosedRoom, ReopenEligibility, Room};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::FrontDesk;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: ClosedRoom,
    pub reopen: ReopenEligibility,
}

/// Closed stays, newest first, filtered by guest name or room number.
pub fn list_history(desk: &FrontDesk, term: &str) -> Vec<HistoryEntry> {
    let hotel = desk.hotel();
    hotel
        .search_history(term)
        .into_iter()
        .map(|record| HistoryEntry {
            reopen: hotel.reopen_eligibility(record),
            record: record.clone(),
        })
        .collect()
}

pub fn reopen(desk: &mut FrontDesk, record_id: &str) -> Result<Room, ApiError> {
    let room = desk.hotel.reopen(record_id)?;
    desk.apply(Action::Reopened(room.id.clone()));
    Ok(room)
}

/// Deletes every closed record. Needs `confirm`.
pub fn clear_history(desk: &mut FrontDesk, confirm: bool) -> Result<usize, ApiError> {
    if !confirm {
        return Err(ApiError::business("Clearing the history requires confirmation"));
    }

    Ok(desk.hotel.clear_history())
}
