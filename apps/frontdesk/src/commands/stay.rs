//! # Stay Commands
//!
//! Check-in, arrival, cancellation, the consumption tab and stay edits.
//!
//! ## Stay Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌───────────┐ check_in ┌──────────┐ confirm_arrival ┌──────────┐      │
//! │  │ available │─────────►│ reserved │────────────────►│ occupied │      │
//! │  └───────────┘          └──────────┘                 └──────────┘      │
//! │        ▲                     │                            │             │
//! │        │  request_cancellation + confirm_cancellation     │ checkout   │
//! │        └─────────────────────┘                            ▼             │
//! │                                                      ┌──────────┐      │
//! │                                       reopen ◄───────│  closed  │      │
//! │                                                      └──────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pousada_core::stay::complimentary_meals;
use pousada_core::{
    Action, BillSummary, CancellationRequest, CheckInRequest, CoreError, HotelRoom, Meal,
    MealPlan, OrderAddition, OrderItem, Room, StayEdit,
};
use serde::Serialize;
use tracing::{debug, info};

use super::catalog::{package_response, PackageResponse};
use crate::error::ApiError;
use crate::state::FrontDesk;

// =============================================================================
// Responses
// =============================================================================

/// Itemized bill in cents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    pub nights: i64,
    pub room_total_cents: i64,
    pub meal_package_total_cents: i64,
    pub order_total_cents: i64,
    pub package_total_cents: i64,
    pub total_amount_cents: i64,
}

impl From<&BillSummary> for BillResponse {
    fn from(bill: &BillSummary) -> Self {
        BillResponse {
            nights: bill.nights,
            room_total_cents: bill.room_total.cents(),
            meal_package_total_cents: bill.meal_package_total.cents(),
            order_total_cents: bill.order_total.cents(),
            package_total_cents: bill.package_total.cents(),
            total_amount_cents: bill.total_amount.cents(),
        }
    }
}

/// Check-in form data for an available room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInForm {
    pub room: HotelRoom,
    /// Meals the room's amenities already include; these flags are locked on.
    pub complimentary_meals: MealPlan,
    pub packages: Vec<PackageResponse>,
}

/// An active stay with its bill so far.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailResponse {
    pub room: Room,
    pub bill: BillResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(
    tag = "status",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum OrderResponse {
    Added {
        item: OrderItem,
        bill: BillResponse,
    },
    /// Nothing was added; repeat with `confirmDuplicate` to charge the meal.
    NeedsConfirmation { meal: Meal, product_name: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityResponse {
    /// `None` once the line was removed.
    pub item: Option<OrderItem>,
    pub bill: BillResponse,
}

fn detail(desk: &FrontDesk, room_id: &str) -> Result<RoomDetailResponse, ApiError> {
    let room = desk.hotel().room(room_id)?.clone();
    let bill = desk.hotel().running_bill(room_id, desk.now())?;
    Ok(RoomDetailResponse {
        room,
        bill: BillResponse::from(&bill),
    })
}

fn bill(desk: &FrontDesk, room_id: &str) -> Result<BillResponse, ApiError> {
    let bill = desk.hotel().running_bill(room_id, desk.now())?;
    Ok(BillResponse::from(&bill))
}

// =============================================================================
// Commands
// =============================================================================

/// Opens the check-in form of an available room.
pub fn start_check_in(desk: &mut FrontDesk, room_number: &str) -> Result<CheckInForm, ApiError> {
    let room = desk.hotel().inventory_room(room_number)?.clone();
    if !desk.hotel().is_available(&room.number) {
        return Err(CoreError::RoomNumberInUse(room.number).into());
    }

    let packages = desk
        .hotel()
        .packages
        .iter()
        .map(|package| package_response(desk.hotel(), package))
        .collect();

    desk.apply(Action::StartCheckIn(room.clone()));
    Ok(CheckInForm {
        complimentary_meals: complimentary_meals(&room.amenities),
        room,
        packages,
    })
}

/// Creates a reservation.
pub fn check_in(desk: &mut FrontDesk, request: CheckInRequest) -> Result<Room, ApiError> {
    let room = desk.hotel.check_in(request)?;
    info!(room_id = %room.id, room_number = %room.room_number, "check_in command");
    desk.apply(Action::CheckInCompleted);
    Ok(room)
}

pub fn select_room(desk: &mut FrontDesk, room_id: &str) -> Result<RoomDetailResponse, ApiError> {
    let response = detail(desk, room_id)?;
    desk.apply(Action::SelectRoom(room_id.to_string()));
    Ok(response)
}

pub fn confirm_arrival(desk: &mut FrontDesk, room_id: &str) -> Result<RoomDetailResponse, ApiError> {
    desk.hotel.confirm_arrival(room_id)?;
    detail(desk, room_id)
}

/// First phase of a cancellation. The request is echoed back to confirm.
pub fn request_cancellation(
    desk: &mut FrontDesk,
    room_id: &str,
) -> Result<CancellationRequest, ApiError> {
    Ok(desk.hotel().request_cancellation(room_id)?)
}

pub fn confirm_cancellation(
    desk: &mut FrontDesk,
    request: CancellationRequest,
) -> Result<CancellationRequest, ApiError> {
    desk.hotel.confirm_cancellation(request.clone())?;
    desk.apply(Action::ReservationCancelled);
    Ok(request)
}

pub fn add_to_order(
    desk: &mut FrontDesk,
    room_id: &str,
    product_id: &str,
    confirm_duplicate: bool,
) -> Result<OrderResponse, ApiError> {
    debug!(room_id = %room_id, product_id = %product_id, "add_to_order command");

    match desk.hotel.add_to_order(room_id, product_id, confirm_duplicate)? {
        OrderAddition::Added(item) => Ok(OrderResponse::Added {
            item,
            bill: bill(desk, room_id)?,
        }),
        OrderAddition::NeedsConfirmation { meal, product_name } => {
            Ok(OrderResponse::NeedsConfirmation { meal, product_name })
        }
    }
}

pub fn change_quantity(
    desk: &mut FrontDesk,
    room_id: &str,
    product_id: &str,
    delta: i64,
) -> Result<QuantityResponse, ApiError> {
    let item = desk.hotel.change_quantity(room_id, product_id, delta)?;
    Ok(QuantityResponse {
        item,
        bill: bill(desk, room_id)?,
    })
}

pub fn edit_stay(
    desk: &mut FrontDesk,
    room_id: &str,
    edit: StayEdit,
) -> Result<RoomDetailResponse, ApiError> {
    desk.hotel.edit_stay(room_id, edit)?;
    detail(desk, room_id)
}
