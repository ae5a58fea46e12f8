//! # Inventory Commands
//!
//! Physical rooms and the room board.

use pousada_core::{BoardEntry, HotelRoom, RoomFilter};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::FrontDesk;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    #[serde(flatten)]
    pub room: HotelRoom,
    /// False while an active stay holds the number; such rooms can't be removed.
    pub available: bool,
}

/// Inventory in natural room-number order.
pub fn list_inventory(desk: &FrontDesk) -> Vec<InventoryEntry> {
    let hotel = desk.hotel();
    hotel
        .sorted_inventory()
        .into_iter()
        .map(|room| InventoryEntry {
            available: hotel.is_available(&room.number),
            room,
        })
        .collect()
}

pub fn add_inventory_room(
    desk: &mut FrontDesk,
    number: &str,
    name: &str,
    amenities: Vec<String>,
) -> Result<HotelRoom, ApiError> {
    Ok(desk.hotel.add_inventory_room(number, name, amenities)?)
}

pub fn remove_inventory_room(desk: &mut FrontDesk, number: &str) -> Result<HotelRoom, ApiError> {
    Ok(desk.hotel.remove_inventory_room(number)?)
}

pub fn room_board(desk: &FrontDesk, filter: RoomFilter) -> Vec<BoardEntry> {
    desk.hotel().room_board(filter)
}
