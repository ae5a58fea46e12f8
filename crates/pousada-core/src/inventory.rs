//! # Inventory & Room Board
//!
//! Physical rooms of the property and the derived board of their current
//! status.
//!
//! ## Availability
//! ```text
//!   inventory room "101" ──┬── active stay with room_number "101"? ── yes ──► reserved / occupied
//!                          │
//!                          └── no ──────────────────────────────────────────► available
//! ```
//! "Available" is never stored. It is derived from the active stays every
//! time it is needed, which keeps one stay per room number as the single
//! source of truth.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::hotel::{Collection, Hotel};
use crate::types::{new_id, HotelRoom, StayStatus};
use crate::validation::validate_name;

// =============================================================================
// Natural Ordering
// =============================================================================

/// Compares room numbers so that digit runs order numerically
/// ("2" < "10", "A2" < "A10").
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let l_trim = l_run.trim_start_matches('0');
                let r_trim = r_run.trim_start_matches('0');

                let ordering = l_trim
                    .len()
                    .cmp(&r_trim.len())
                    .then_with(|| l_trim.cmp(r_trim))
                    .then_with(|| l_run.len().cmp(&r_run.len()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                let ordering = l.to_lowercase().cmp(r.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

// =============================================================================
// Board Types
// =============================================================================

/// Status shown on the room board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Reserved,
    Occupied,
}

impl From<StayStatus> for RoomStatus {
    fn from(status: StayStatus) -> Self {
        match status {
            StayStatus::Reserved => RoomStatus::Reserved,
            StayStatus::Occupied => RoomStatus::Occupied,
        }
    }
}

/// Board filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomFilter {
    #[default]
    All,
    Occupied,
    Reserved,
    Available,
}

impl RoomFilter {
    pub fn matches(&self, status: RoomStatus) -> bool {
        match self {
            RoomFilter::All => true,
            RoomFilter::Occupied => status == RoomStatus::Occupied,
            RoomFilter::Reserved => status == RoomStatus::Reserved,
            RoomFilter::Available => status == RoomStatus::Available,
        }
    }
}

/// One card of the room board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    pub room_number: String,
    pub room_name: String,
    pub status: RoomStatus,
    /// Active stay id; absent for available rooms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    pub amenities: Vec<String>,
}

// =============================================================================
// Operations
// =============================================================================

impl Hotel {
    /// True when no active stay holds `room_number`.
    pub fn is_available(&self, room_number: &str) -> bool {
        self.active_room_by_number(room_number).is_none()
    }

    /// Adds a physical room. A blank name becomes `Quarto <number>`.
    pub fn add_inventory_room(
        &mut self,
        number: &str,
        name: &str,
        amenities: Vec<String>,
    ) -> CoreResult<HotelRoom> {
        let number = validate_name("room number", number)?;

        if self.inventory.iter().any(|room| room.number == number) {
            return Err(ValidationError::Duplicate {
                field: "room number".to_string(),
                value: number,
            }
            .into());
        }

        let name = match name.trim() {
            "" => format!("Quarto {}", number),
            trimmed => trimmed.to_string(),
        };

        let room = HotelRoom {
            id: new_id("inv"),
            number,
            name,
            amenities,
        };

        info!(number = %room.number, "Inventory room added");
        self.inventory.push(room.clone());
        self.touch(Collection::Inventory);
        Ok(room)
    }

    /// Removes a physical room by number.
    ///
    /// ## Errors
    /// - `RoomNumberInUse` while an active stay references the number
    /// - `InventoryRoomNotFound` when no room has this number
    pub fn remove_inventory_room(&mut self, number: &str) -> CoreResult<HotelRoom> {
        if !self.is_available(number) {
            return Err(CoreError::RoomNumberInUse(number.to_string()));
        }

        let index = self
            .inventory
            .iter()
            .position(|room| room.number == number)
            .ok_or_else(|| CoreError::InventoryRoomNotFound(number.to_string()))?;

        let removed = self.inventory.remove(index);
        info!(number = %removed.number, "Inventory room removed");
        self.touch(Collection::Inventory);
        Ok(removed)
    }

    /// Inventory in natural room-number order.
    pub fn sorted_inventory(&self) -> Vec<HotelRoom> {
        let mut rooms = self.inventory.clone();
        rooms.sort_by(|a, b| natural_cmp(&a.number, &b.number));
        rooms
    }

    /// Every active stay plus every available inventory room, in natural
    /// room-number order.
    pub fn room_board(&self, filter: RoomFilter) -> Vec<BoardEntry> {
        let active = self.rooms.iter().map(|room| BoardEntry {
            room_number: room.room_number.clone(),
            room_name: room.room_name.clone(),
            status: room.status.into(),
            room_id: Some(room.id.clone()),
            guest_name: Some(room.guest_name.clone()),
            amenities: room.amenities.clone(),
        });

        let available = self
            .inventory
            .iter()
            .filter(|room| self.is_available(&room.number))
            .map(|room| BoardEntry {
                room_number: room.number.clone(),
                room_name: room.name.clone(),
                status: RoomStatus::Available,
                room_id: None,
                guest_name: None,
                amenities: room.amenities.clone(),
            });

        let mut board: Vec<BoardEntry> = active
            .chain(available)
            .filter(|entry| filter.matches(entry.status))
            .collect();
        board.sort_by(|a, b| natural_cmp(&a.room_number, &b.room_number));
        board
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stay::CheckInRequest;
    use crate::types::MealPlan;
    use chrono::NaiveDate;

    fn hotel_with_rooms(numbers: &[&str]) -> Hotel {
        let mut hotel = Hotel::new();
        for number in numbers {
            hotel.add_inventory_room(number, "", vec![]).unwrap();
        }
        hotel.take_dirty();
        hotel
    }

    fn reserve(hotel: &mut Hotel, number: &str) -> String {
        let request = CheckInRequest {
            room_number: number.to_string(),
            guest_name: "Ana".to_string(),
            daily_rate: 150.0,
            check_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            check_out_date: None,
            meal_package: MealPlan::default(),
            package_id: None,
        };
        hotel.check_in(request).unwrap().id
    }

    #[test]
    fn test_natural_order() {
        let mut numbers = vec!["10", "2", "1", "A10", "A2", "02", "B1"];
        numbers.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(numbers, vec!["1", "2", "02", "10", "A2", "A10", "B1"]);
    }

    #[test]
    fn test_add_inventory_room() {
        let mut hotel = Hotel::new();
        let room = hotel
            .add_inventory_room(" 101 ", "  ", vec!["Wi-Fi".to_string()])
            .unwrap();
        assert_eq!(room.number, "101");
        assert_eq!(room.name, "Quarto 101");
        assert!(room.id.starts_with("inv_"));

        assert!(matches!(
            hotel.add_inventory_room("101", "Suíte", vec![]),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert!(hotel.add_inventory_room("", "Suíte", vec![]).is_err());
        assert_eq!(hotel.take_dirty(), vec![Collection::Inventory]);
    }

    #[test]
    fn test_remove_guarded_while_in_use() {
        let mut hotel = hotel_with_rooms(&["101", "102"]);
        let room_id = reserve(&mut hotel, "101");

        assert!(matches!(
            hotel.remove_inventory_room("101"),
            Err(CoreError::RoomNumberInUse(_))
        ));

        let request = hotel.request_cancellation(&room_id).unwrap();
        hotel.confirm_cancellation(request).unwrap();
        assert!(hotel.remove_inventory_room("101").is_ok());
        assert!(matches!(
            hotel.remove_inventory_room("101"),
            Err(CoreError::InventoryRoomNotFound(_))
        ));
    }

    #[test]
    fn test_room_board() {
        let mut hotel = hotel_with_rooms(&["10", "2", "1"]);
        let room_id = reserve(&mut hotel, "2");

        let board = hotel.room_board(RoomFilter::All);
        let numbers: Vec<&str> = board.iter().map(|e| e.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "10"]);
        assert_eq!(board[1].status, RoomStatus::Reserved);
        assert_eq!(board[1].room_id.as_deref(), Some(room_id.as_str()));
        assert_eq!(board[1].guest_name.as_deref(), Some("Ana"));

        let available = hotel.room_board(RoomFilter::Available);
        assert_eq!(available.len(), 2);
        assert!(available.iter().all(|e| e.room_id.is_none()));

        hotel.confirm_arrival(&room_id).unwrap();
        assert_eq!(hotel.room_board(RoomFilter::Occupied).len(), 1);
        assert!(hotel.room_board(RoomFilter::Reserved).is_empty());
    }

    #[test]
    fn test_sorted_inventory() {
        let hotel = hotel_with_rooms(&["12", "3", "101"]);
        let numbers: Vec<String> = hotel.sorted_inventory().into_iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec!["3", "12", "101"]);
    }
}
