//! # View Commands
//!
//! Screen navigation and the theme preference.

use pousada_core::{Action, BoardEntry, Destination, RoomFilter, Screen, Theme};
use serde::Serialize;

use crate::state::FrontDesk;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub screen: Screen,
    pub theme: Theme,
    pub hotel_name: String,
}

pub fn get_view(desk: &FrontDesk) -> ViewResponse {
    ViewResponse {
        screen: desk.screen().clone(),
        theme: desk.hotel().theme,
        hotel_name: desk.config().hotel_name.clone(),
    }
}

pub fn navigate(desk: &mut FrontDesk, destination: Destination) -> ViewResponse {
    desk.apply(Action::Navigate(destination));
    get_view(desk)
}

/// Shows the room board with `filter` and returns its cards.
pub fn filter_board(desk: &mut FrontDesk, filter: RoomFilter) -> Vec<BoardEntry> {
    desk.apply(Action::FilterBoard(filter));
    desk.hotel().room_board(filter)
}

pub fn toggle_theme(desk: &mut FrontDesk) -> Theme {
    desk.hotel.toggle_theme()
}
