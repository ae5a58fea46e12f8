//! # History
//!
//! Closed stay records: filing, search, reopen and clear.
//!
//! Records are kept newest checkout first. A record is never edited; it is
//! only removed by reopening it or by clearing the whole history.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::hotel::{Collection, Hotel};
use crate::types::{ClosedRoom, Room};

/// Whether a closed record can be reopened right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReopenEligibility {
    Reopenable,
    /// Another stay holds the room number.
    RoomOccupied,
    /// The room number was removed from the inventory.
    RoomNotInInventory,
}

impl ReopenEligibility {
    pub fn is_reopenable(&self) -> bool {
        matches!(self, ReopenEligibility::Reopenable)
    }
}

impl Hotel {
    /// Inserts a record keeping the newest-first order.
    pub(crate) fn file_closed_record(&mut self, record: ClosedRoom) {
        let index = self
            .closed_rooms
            .iter()
            .position(|existing| existing.final_check_out_date < record.final_check_out_date)
            .unwrap_or(self.closed_rooms.len());
        self.closed_rooms.insert(index, record);
        self.touch(Collection::ClosedRooms);
    }

    /// Records whose guest name contains `term` (case-insensitive) or whose
    /// room number contains it. A blank term matches everything.
    pub fn search_history(&self, term: &str) -> Vec<&ClosedRoom> {
        let term = term.trim();
        let needle = term.to_lowercase();

        self.closed_rooms
            .iter()
            .filter(|record| {
                term.is_empty()
                    || record.room.guest_name.to_lowercase().contains(&needle)
                    || record.room.room_number.contains(term)
            })
            .collect()
    }

    /// Occupied takes precedence when both causes apply.
    pub fn reopen_eligibility(&self, record: &ClosedRoom) -> ReopenEligibility {
        let number = &record.room.room_number;

        if !self.is_available(number) {
            ReopenEligibility::RoomOccupied
        } else if self.inventory_room(number).is_err() {
            ReopenEligibility::RoomNotInInventory
        } else {
            ReopenEligibility::Reopenable
        }
    }

    /// Closed → active with the record's original status.
    ///
    /// The billing snapshot is discarded; the stay's bill is computed live
    /// again from here on.
    ///
    /// ## Errors
    /// - `RecordNotFound` for an unknown record id
    /// - `RoomOccupied` / `RoomNotInInventory` when not eligible
    pub fn reopen(&mut self, record_id: &str) -> CoreResult<Room> {
        let index = self
            .closed_rooms
            .iter()
            .position(|record| record.id() == record_id)
            .ok_or_else(|| CoreError::RecordNotFound(record_id.to_string()))?;

        let number = self.closed_rooms[index].room.room_number.clone();
        match self.reopen_eligibility(&self.closed_rooms[index]) {
            ReopenEligibility::Reopenable => {}
            ReopenEligibility::RoomOccupied => return Err(CoreError::RoomOccupied(number)),
            ReopenEligibility::RoomNotInInventory => {
                return Err(CoreError::RoomNotInInventory(number))
            }
        }

        let record = self.closed_rooms.remove(index);
        let mut room = record.room;
        room.status = record.original_status;

        info!(room_id = %room.id, room_number = %room.room_number, "Stay reopened");
        self.rooms.push(room.clone());
        self.touch(Collection::Rooms);
        self.touch(Collection::ClosedRooms);
        Ok(room)
    }

    /// Drops every closed record. Returns how many were removed.
    pub fn clear_history(&mut self) -> usize {
        let removed = self.closed_rooms.len();
        self.closed_rooms.clear();
        info!(removed, "History cleared");
        self.touch(Collection::ClosedRooms);
        removed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
