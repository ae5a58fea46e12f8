//! # Hotel State
//!
//! The in-memory aggregate every front desk operation works on. Operations
//! are split by concern across [`crate::catalog`], [`crate::inventory`],
//! [`crate::stay`] and [`crate::history`]; each one records which persisted
//! collection it touched so the caller can write back exactly those.
//!
//! ## Persisted Collections
//! ```text
//! ┌──────────────────┬──────────────────────┐
//! │ Collection       │ Stored under key     │
//! ├──────────────────┼──────────────────────┤
//! │ Products         │ products             │
//! │ Amenities        │ amenities            │
//! │ PackageServices  │ packageServices      │
//! │ Packages         │ packages             │
//! │ Inventory        │ inventory            │
//! │ Rooms            │ rooms                │
//! │ ClosedRooms      │ closedRooms          │
//! │ Theme            │ theme                │
//! └──────────────────┴──────────────────────┘
//! ```
//!
//! Every write replaces one whole collection. There are no partial updates.
//! Changed collections are written back in the order they were first touched,
//! and operations touch what they add before what they remove: checkout files
//! the closed record before dropping the stay, reopen restores the stay before
//! dropping the record.

use crate::error::{CoreError, CoreResult};
use crate::types::{
    Amenity, ClosedRoom, HotelRoom, Package, PackageService, Product, Room, StayStatus, Theme,
};

// =============================================================================
// Collection
// =============================================================================

/// One independently persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Products,
    Amenities,
    PackageServices,
    Packages,
    Inventory,
    Rooms,
    ClosedRooms,
    Theme,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Products,
        Collection::Amenities,
        Collection::PackageServices,
        Collection::Packages,
        Collection::Inventory,
        Collection::Rooms,
        Collection::ClosedRooms,
        Collection::Theme,
    ];

    /// Storage key of the collection.
    pub const fn key(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Amenities => "amenities",
            Collection::PackageServices => "packageServices",
            Collection::Packages => "packages",
            Collection::Inventory => "inventory",
            Collection::Rooms => "rooms",
            Collection::ClosedRooms => "closedRooms",
            Collection::Theme => "theme",
        }
    }
}

// =============================================================================
// Hotel
// =============================================================================

/// Full front desk state.
///
/// Fields are public for reading and for loading. Mutations go through the
/// operation methods so the touched collections get recorded.
#[derive(Debug, Clone, Default)]
pub struct Hotel {
    pub products: Vec<Product>,
    pub amenities: Vec<Amenity>,
    pub package_services: Vec<PackageService>,
    pub packages: Vec<Package>,
    pub inventory: Vec<HotelRoom>,
    /// Active stays (reserved or occupied).
    pub rooms: Vec<Room>,
    /// History, newest checkout first.
    pub closed_rooms: Vec<ClosedRoom>,
    pub theme: Theme,
    dirty: Vec<Collection>,
}

impl Hotel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `collection` changed and must be written back.
    pub fn touch(&mut self, collection: Collection) {
        if !self.dirty.contains(&collection) {
            self.dirty.push(collection);
        }
    }

    /// Drains the collections changed since the last call, in first-touch
    /// order.
    pub fn take_dirty(&mut self) -> Vec<Collection> {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Active stay by id.
    pub fn room(&self, room_id: &str) -> CoreResult<&Room> {
        self.rooms
            .iter()
            .find(|room| room.id == room_id)
            .ok_or_else(|| CoreError::RoomNotFound(room_id.to_string()))
    }

    pub(crate) fn room_mut(&mut self, room_id: &str) -> CoreResult<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|room| room.id == room_id)
            .ok_or_else(|| CoreError::RoomNotFound(room_id.to_string()))
    }

    /// Active stay holding `room_number`, if any.
    pub fn active_room_by_number(&self, room_number: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.room_number == room_number)
    }

    pub fn inventory_room(&self, number: &str) -> CoreResult<&HotelRoom> {
        self.inventory
            .iter()
            .find(|room| room.number == number)
            .ok_or_else(|| CoreError::InventoryRoomNotFound(number.to_string()))
    }

    pub fn product(&self, product_id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    pub fn package(&self, package_id: &str) -> CoreResult<&Package> {
        self.packages
            .iter()
            .find(|package| package.id == package_id)
            .ok_or_else(|| CoreError::PackageNotFound(package_id.to_string()))
    }

    pub(crate) fn ensure_status(
        room: &Room,
        expected: StayStatus,
        operation: &str,
    ) -> CoreResult<()> {
        if room.status != expected {
            return Err(CoreError::InvalidStayStatus {
                room_id: room.id.clone(),
                status: room.status.as_str().to_string(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Preferences
    // -------------------------------------------------------------------------

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.touch(Collection::Theme);
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys() {
        let keys: Vec<&str> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec![
                "products",
                "amenities",
                "packageServices",
                "packages",
                "inventory",
                "rooms",
                "closedRooms",
                "theme"
            ]
        );
    }

    #[test]
    fn test_theme_toggle_marks_dirty() {
        let mut hotel = Hotel::new();
        assert!(!hotel.is_dirty());

        assert_eq!(hotel.toggle_theme(), Theme::Dark);
        assert_eq!(hotel.take_dirty(), vec![Collection::Theme]);
        assert!(hotel.take_dirty().is_empty());

        hotel.set_theme(Theme::Dark);
        assert!(!hotel.is_dirty());
    }

    #[test]
    fn test_missing_room_lookup() {
        let hotel = Hotel::new();
        assert!(matches!(hotel.room("room_x"), Err(CoreError::RoomNotFound(_))));
        assert!(matches!(
            hotel.inventory_room("999"),
            Err(CoreError::InventoryRoomNotFound(_))
        ));
    }
}
