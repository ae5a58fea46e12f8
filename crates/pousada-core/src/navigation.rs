//! # Navigation
//!
//! Screen state machine of the front desk. The current screen carries its
//! own selection (room being checked in, room on display, room checking
//! out), so no flow depends on loose shared fields.
//!
//! ## Flows
//! ```text
//!  RoomBoard ──StartCheckIn──► CheckIn ──CheckInCompleted──► RoomBoard
//!      │
//!      └──SelectRoom──► RoomDetail ──StartCheckout──► Checkout ──CheckoutConfirmed──► History
//!                           ▲    │                       │                              │
//!                           │    └─ReservationCancelled─►│RoomBoard                     │
//!                           └─────────CancelCheckout─────┘                              │
//!                           └──────────────────────────Reopened─────────────────────────┘
//! ```
//!
//! Any screen whose room no longer resolves to an active stay falls back to
//! the room board.

use serde::{Deserialize, Serialize};

use crate::inventory::RoomFilter;
use crate::types::{HotelRoom, Room};

/// Top-level screens reachable without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    Home,
    RoomBoard,
    ManageRooms,
    History,
    Simulator,
    ManageAmenities,
    ManagePackages,
    RegisterProduct,
}

/// What the front desk is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Home,
    RoomBoard {
        #[serde(default)]
        filter: RoomFilter,
    },
    ManageRooms,
    CheckIn {
        room: HotelRoom,
    },
    #[serde(rename_all = "camelCase")]
    RoomDetail {
        room_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Checkout {
        room_id: String,
    },
    History,
    Simulator,
    ManageAmenities,
    ManagePackages,
    RegisterProduct,
}

impl From<Destination> for Screen {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Home => Screen::Home,
            Destination::RoomBoard => Screen::RoomBoard {
                filter: RoomFilter::All,
            },
            Destination::ManageRooms => Screen::ManageRooms,
            Destination::History => Screen::History,
            Destination::Simulator => Screen::Simulator,
            Destination::ManageAmenities => Screen::ManageAmenities,
            Destination::ManagePackages => Screen::ManagePackages,
            Destination::RegisterProduct => Screen::RegisterProduct,
        }
    }
}

/// User intent or completed flow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Destination),
    FilterBoard(RoomFilter),
    StartCheckIn(HotelRoom),
    SelectRoom(String),
    StartCheckout(String),
    CancelCheckout,
    CheckInCompleted,
    CheckoutConfirmed,
    ReservationCancelled,
    Reopened(String),
}

fn board() -> Screen {
    Screen::RoomBoard {
        filter: RoomFilter::All,
    }
}

fn is_active(rooms: &[Room], room_id: &str) -> bool {
    rooms.iter().any(|room| room.id == room_id)
}

/// Next screen after `action`, given the active stays after the action ran.
pub fn transition(screen: &Screen, action: Action, rooms: &[Room]) -> Screen {
    let next = match action {
        Action::Navigate(destination) => destination.into(),
        Action::FilterBoard(filter) => Screen::RoomBoard { filter },
        Action::StartCheckIn(room) => Screen::CheckIn { room },
        Action::SelectRoom(room_id) | Action::Reopened(room_id) => Screen::RoomDetail { room_id },
        Action::StartCheckout(room_id) => Screen::Checkout { room_id },
        Action::CancelCheckout => match screen {
            Screen::Checkout { room_id } if is_active(rooms, room_id) => Screen::RoomDetail {
                room_id: room_id.clone(),
            },
            _ => board(),
        },
        Action::CheckInCompleted | Action::ReservationCancelled => board(),
        Action::CheckoutConfirmed => Screen::History,
    };

    resolve(next, rooms)
}

/// Replaces a screen whose room is gone with the room board.
pub fn resolve(screen: Screen, rooms: &[Room]) -> Screen {
    let stale = match &screen {
        Screen::RoomDetail { room_id } | Screen::Checkout { room_id } => !is_active(rooms, room_id),
        _ => false,
    };

    if stale {
        board()
    } else {
        screen
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MealPlan, StayStatus};
    use chrono::{TimeZone, Utc};

    fn stay(id: &str) -> Room {
        Room {
            id: id.to_string(),
            room_number: "101".to_string(),
            room_name: "Quarto 101".to_string(),
            guest_name: "Ana".to_string(),
            daily_rate: 100.0,
            check_in_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            check_out_date: None,
            order: vec![],
            status: StayStatus::Occupied,
            amenities: vec![],
            meal_package: MealPlan::default(),
            package_id: None,
            package_name: None,
            package_price: None,
        }
    }

    #[test]
    fn test_select_and_checkout_flow() {
        let rooms = vec![stay("room_1")];

        let detail = transition(&Screen::default(), Action::SelectRoom("room_1".into()), &rooms);
        assert_eq!(detail, Screen::RoomDetail { room_id: "room_1".into() });

        let checkout = transition(&detail, Action::StartCheckout("room_1".into()), &rooms);
        assert_eq!(checkout, Screen::Checkout { room_id: "room_1".into() });

        let back = transition(&checkout, Action::CancelCheckout, &rooms);
        assert_eq!(back, detail);

        let done = transition(&checkout, Action::CheckoutConfirmed, &[]);
        assert_eq!(done, Screen::History);
    }

    #[test]
    fn test_missing_selection_falls_back_to_board() {
        let rooms = vec![stay("room_1")];
        let checkout = Screen::Checkout { room_id: "room_2".into() };

        assert_eq!(transition(&checkout, Action::CancelCheckout, &rooms), board());
        assert_eq!(
            transition(&Screen::Home, Action::SelectRoom("room_9".into()), &rooms),
            board()
        );
        assert_eq!(resolve(Screen::RoomDetail { room_id: "room_1".into() }, &[]), board());
    }

    #[test]
    fn test_reopen_lands_on_detail() {
        let rooms = vec![stay("room_1")];
        assert_eq!(
            transition(&Screen::History, Action::Reopened("room_1".into()), &rooms),
            Screen::RoomDetail { room_id: "room_1".into() }
        );
    }

    #[test]
    fn test_check_in_flow() {
        let room = HotelRoom {
            id: "inv_1".into(),
            number: "101".into(),
            name: "Quarto 101".into(),
            amenities: vec![],
        };
        let screen = transition(&board(), Action::StartCheckIn(room.clone()), &[]);
        assert_eq!(screen, Screen::CheckIn { room });
        assert_eq!(transition(&screen, Action::CheckInCompleted, &[]), board());
    }

    #[test]
    fn test_navigate_and_filter() {
        assert_eq!(
            transition(&Screen::Home, Action::Navigate(Destination::Simulator), &[]),
            Screen::Simulator
        );
        assert_eq!(
            transition(&board(), Action::FilterBoard(RoomFilter::Reserved), &[]),
            Screen::RoomBoard {
                filter: RoomFilter::Reserved
            }
        );
    }

    #[test]
    fn test_screen_wire_shape() {
        let value = serde_json::to_value(Screen::RoomDetail { room_id: "room_1".into() }).unwrap();
        assert_eq!(value["screen"], "roomDetail");
        assert_eq!(value["roomId"], "room_1");
    }
}
