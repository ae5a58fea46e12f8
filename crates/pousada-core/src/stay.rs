//! # Room Lifecycle
//!
//! Stay transitions and in-stay mutations.
//!
//! ## State Machine
//! ```text
//!                     check_in                confirm_arrival
//!   ┌───────────┐  ─────────────►  ┌──────────┐  ──────────►  ┌──────────┐
//!   │ available │                  │ reserved │               │ occupied │
//!   └───────────┘  ◄─────────────  └──────────┘               └────┬─────┘
//!         ▲        cancellation           ▲                        │ checkout
//!         │        (request+confirm)      │ reopen                 │ (fully paid)
//!         │                               │ (original status)      ▼
//!         │                               └────────────────  ┌──────────┐
//!         └──────────────────── (history record only) ────── │  closed  │
//!                                                            └──────────┘
//! ```
//!
//! ## Invariants
//! - At most one active stay per room number.
//! - A meal included by a room amenity is always switched on in the stay's
//!   meal plan. Every check-in and edit re-applies this.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::billing::{compute_bill, BillSummary};
use crate::error::{CoreError, CoreResult};
use crate::hotel::{Collection, Hotel};
use crate::payment::PaymentLedger;
use crate::types::{ClosedRoom, Meal, MealPlan, OrderItem, Room, StayStatus};
use crate::validation::{validate_name, validate_positive_price, validate_stay_dates};

// =============================================================================
// Complimentary Meals
// =============================================================================

/// Meals made complimentary by a room's amenities.
pub fn complimentary_meals(amenities: &[String]) -> MealPlan {
    let mut plan = MealPlan::default();
    for meal in Meal::ALL {
        if amenities.iter().any(|a| a == meal.amenity_name()) {
            plan.set(meal, true);
        }
    }
    plan
}

/// Forces on every meal the amenities include. Other flags are kept.
pub fn apply_complimentary_meals(mut plan: MealPlan, amenities: &[String]) -> MealPlan {
    for meal in complimentary_meals(amenities).meals() {
        plan.set(meal, true);
    }
    plan
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

// =============================================================================
// Requests
// =============================================================================

/// Check-in / reservation form for an available inventory room.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub room_number: String,
    pub guest_name: String,
    pub daily_rate: f64,
    pub check_in_date: NaiveDate,
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default)]
    pub meal_package: MealPlan,
    #[serde(default)]
    pub package_id: Option<String>,
}

/// Edit form of an active stay. Every field replaces the stored value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayEdit {
    pub guest_name: String,
    pub daily_rate: f64,
    pub check_in_date: NaiveDate,
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    pub meal_package: MealPlan,
    pub amenities: Vec<String>,
}

/// First phase of a reservation cancellation.
///
/// Carries what the operator must confirm; only [`Hotel::confirm_cancellation`]
/// removes the stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRequest {
    pub room_id: String,
    pub room_number: String,
    pub guest_name: String,
}

/// Outcome of adding a product to a room's order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAddition {
    /// The line was added or its quantity incremented.
    Added(OrderItem),
    /// The product is a meal the stay's plan already covers. Nothing changed;
    /// repeat with confirmation to charge it anyway.
    NeedsConfirmation { meal: Meal, product_name: String },
}

// =============================================================================
// Operations
// =============================================================================

impl Hotel {
    /// Creates a reservation for an available inventory room.
    ///
    /// ## Errors
    /// - `Validation` for a blank guest, non-positive rate or inverted dates
    /// - `InventoryRoomNotFound` for an unknown room number
    /// - `RoomNumberInUse` when another stay holds the room
    /// - `PackageNotFound` for an unknown package id
    pub fn check_in(&mut self, request: CheckInRequest) -> CoreResult<Room> {
        let guest_name = validate_name("guest name", &request.guest_name)?;
        validate_positive_price("daily rate", request.daily_rate)?;
        validate_stay_dates(request.check_in_date, request.check_out_date)?;

        let inventory_room = self.inventory_room(&request.room_number)?.clone();
        if !self.is_available(&inventory_room.number) {
            return Err(CoreError::RoomNumberInUse(inventory_room.number));
        }

        let package = match request.package_id.as_deref() {
            Some(id) => Some(self.package(id)?.clone()),
            None => None,
        };

        let room = Room {
            id: crate::types::new_id("room"),
            room_number: inventory_room.number,
            room_name: inventory_room.name,
            guest_name,
            daily_rate: request.daily_rate,
            check_in_date: midnight_utc(request.check_in_date),
            check_out_date: request.check_out_date.map(midnight_utc),
            order: Vec::new(),
            status: StayStatus::Reserved,
            meal_package: apply_complimentary_meals(request.meal_package, &inventory_room.amenities),
            amenities: inventory_room.amenities,
            package_id: package.as_ref().map(|p| p.id.clone()),
            package_name: package.as_ref().map(|p| p.name.clone()),
            package_price: package.as_ref().map(|p| p.price),
        };

        info!(
            room_id = %room.id,
            room_number = %room.room_number,
            "Reservation created"
        );
        self.rooms.push(room.clone());
        self.touch(Collection::Rooms);
        Ok(room)
    }

    /// Reserved → occupied. No other field changes.
    pub fn confirm_arrival(&mut self, room_id: &str) -> CoreResult<Room> {
        let room = self.room_mut(room_id)?;
        Self::ensure_status(room, StayStatus::Reserved, "confirm arrival")?;
        room.status = StayStatus::Occupied;
        let updated = room.clone();

        info!(room_id = %room_id, room_number = %updated.room_number, "Guest checked in");
        self.touch(Collection::Rooms);
        Ok(updated)
    }

    /// First phase of cancelling a reservation. Changes nothing.
    pub fn request_cancellation(&self, room_id: &str) -> CoreResult<CancellationRequest> {
        let room = self.room(room_id)?;
        Self::ensure_status(room, StayStatus::Reserved, "cancel reservation")?;

        Ok(CancellationRequest {
            room_id: room.id.clone(),
            room_number: room.room_number.clone(),
            guest_name: room.guest_name.clone(),
        })
    }

    /// Second phase: removes the reservation without a trace.
    ///
    /// Rejected with `CancellationMismatch` if the stay changed since the
    /// request (gone, moved, or no longer reserved).
    pub fn confirm_cancellation(&mut self, request: CancellationRequest) -> CoreResult<()> {
        let index = self
            .rooms
            .iter()
            .position(|room| {
                room.id == request.room_id
                    && room.room_number == request.room_number
                    && room.status == StayStatus::Reserved
            })
            .ok_or_else(|| CoreError::CancellationMismatch(request.room_id.clone()))?;

        let removed = self.rooms.remove(index);
        info!(room_id = %removed.id, room_number = %removed.room_number, "Reservation cancelled");
        self.touch(Collection::Rooms);
        Ok(())
    }

    /// Adds one unit of a product to a room's order.
    ///
    /// An existing line for the product is incremented; otherwise a new line
    /// snapshots the product's current name and price. A meal the plan
    /// already covers needs `confirm_duplicate`.
    pub fn add_to_order(
        &mut self,
        room_id: &str,
        product_id: &str,
        confirm_duplicate: bool,
    ) -> CoreResult<OrderAddition> {
        let product = self.product(product_id)?.clone();
        let room = self.room_mut(room_id)?;

        if let Some(meal) = Meal::from_product_id(&product.id) {
            if room.meal_package.includes(meal) && !confirm_duplicate {
                return Ok(OrderAddition::NeedsConfirmation {
                    meal,
                    product_name: product.name,
                });
            }
        }

        let line = match room.order.iter_mut().find(|item| item.product_id == product.id) {
            Some(item) => {
                item.quantity += 1;
                item.clone()
            }
            None => {
                let item = OrderItem::from_product(&product);
                room.order.push(item.clone());
                item
            }
        };

        debug!(room_id = %room_id, product_id = %product.id, quantity = line.quantity, "Order updated");
        self.touch(Collection::Rooms);
        Ok(OrderAddition::Added(line))
    }

    /// Changes the quantity of a product's line by `delta`.
    ///
    /// Returns the updated line, or `None` once the quantity drops below 1
    /// and the line is removed.
    pub fn change_quantity(
        &mut self,
        room_id: &str,
        product_id: &str,
        delta: i64,
    ) -> CoreResult<Option<OrderItem>> {
        let room = self.room_mut(room_id)?;
        let index = room
            .order
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let quantity = room.order[index].quantity.saturating_add(delta);
        let result = if quantity < 1 {
            room.order.remove(index);
            None
        } else {
            room.order[index].quantity = quantity;
            Some(room.order[index].clone())
        };

        self.touch(Collection::Rooms);
        Ok(result)
    }

    /// Replaces the editable fields of an active stay.
    pub fn edit_stay(&mut self, room_id: &str, edit: StayEdit) -> CoreResult<Room> {
        let guest_name = validate_name("guest name", &edit.guest_name)?;
        validate_positive_price("daily rate", edit.daily_rate)?;
        validate_stay_dates(edit.check_in_date, edit.check_out_date)?;

        let room = self.room_mut(room_id)?;
        room.guest_name = guest_name;
        room.daily_rate = edit.daily_rate;
        room.check_in_date = midnight_utc(edit.check_in_date);
        room.check_out_date = edit.check_out_date.map(midnight_utc);
        room.meal_package = apply_complimentary_meals(edit.meal_package, &edit.amenities);
        room.amenities = edit.amenities;
        let updated = room.clone();

        debug!(room_id = %room_id, "Stay edited");
        self.touch(Collection::Rooms);
        Ok(updated)
    }

    /// Bill of an active stay as of `at`.
    pub fn running_bill(&self, room_id: &str, at: DateTime<Utc>) -> CoreResult<BillSummary> {
        let room = self.room(room_id)?;
        Ok(compute_bill(room, &self.products, at))
    }

    /// Occupied → closed.
    ///
    /// The bill is computed at `at` and must be covered by `ledger`. The
    /// resulting record is frozen and filed in history, newest first.
    pub fn checkout(
        &mut self,
        room_id: &str,
        ledger: &PaymentLedger,
        at: DateTime<Utc>,
    ) -> CoreResult<ClosedRoom> {
        let room = self.room(room_id)?;
        Self::ensure_status(room, StayStatus::Occupied, "check out")?;

        let bill = compute_bill(room, &self.products, at);
        let paid = ledger.total_paid();
        if paid < bill.total_amount {
            return Err(CoreError::NotFullyPaid {
                remaining: (bill.total_amount - paid).to_string(),
            });
        }

        let index = self
            .rooms
            .iter()
            .position(|room| room.id == room_id)
            .ok_or_else(|| CoreError::RoomNotFound(room_id.to_string()))?;
        let room = self.rooms.remove(index);
        let record = bill.into_closed_record(room, at);

        info!(
            room_id = %record.id(),
            room_number = %record.room.room_number,
            total = %bill.total_amount,
            nights = bill.nights,
            "Checkout completed"
        );
        self.file_closed_record(record.clone());
        self.touch(Collection::Rooms);
        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::payment::PaymentMethod;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hotel() -> Hotel {
        let mut hotel = Hotel::new();
        hotel.ensure_default_meals();
        hotel
            .add_inventory_room("101", "", vec!["Café da Manhã".to_string(), "Wi-Fi".to_string()])
            .unwrap();
        hotel.add_inventory_room("102", "Suíte", vec![]).unwrap();
        hotel.take_dirty();
        hotel
    }

    fn request(number: &str) -> CheckInRequest {
        CheckInRequest {
            room_number: number.to_string(),
            guest_name: "Ana Souza".to_string(),
            daily_rate: 100.0,
            check_in_date: date(2024, 1, 1),
            check_out_date: Some(date(2024, 1, 3)),
            meal_package: MealPlan::default(),
            package_id: None,
        }
    }

    fn paid_ledger(amount: Money) -> PaymentLedger {
        let mut ledger = PaymentLedger::new(amount);
        ledger.add(PaymentMethod::Card, amount).unwrap();
        ledger
    }

    #[test]
    fn test_check_in_creates_reservation() {
        let mut hotel = hotel();
        let room = hotel.check_in(request("101")).unwrap();

        assert_eq!(room.status, StayStatus::Reserved);
        assert_eq!(room.room_name, "Quarto 101");
        assert_eq!(room.check_in_date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(room.order.is_empty());
        // Complimentary breakfast from the room's amenities.
        assert!(room.meal_package.breakfast);
        assert!(!room.meal_package.lunch);
        assert_eq!(hotel.take_dirty(), vec![Collection::Rooms]);
    }

    #[test]
    fn test_check_in_validation() {
        let mut hotel = hotel();

        let mut blank = request("101");
        blank.guest_name = "  ".to_string();
        assert!(matches!(hotel.check_in(blank), Err(CoreError::Validation(_))));

        let mut free = request("101");
        free.daily_rate = 0.0;
        assert!(hotel.check_in(free).is_err());

        let mut inverted = request("101");
        inverted.check_out_date = Some(date(2023, 12, 31));
        assert!(hotel.check_in(inverted).is_err());

        assert!(matches!(
            hotel.check_in(request("999")),
            Err(CoreError::InventoryRoomNotFound(_))
        ));

        let mut unknown_package = request("101");
        unknown_package.package_id = Some("pkg_missing".to_string());
        assert!(matches!(
            hotel.check_in(unknown_package),
            Err(CoreError::PackageNotFound(_))
        ));

        assert!(hotel.rooms.is_empty());
    }

    #[test]
    fn test_one_stay_per_room_number() {
        let mut hotel = hotel();
        hotel.check_in(request("101")).unwrap();
        assert!(matches!(
            hotel.check_in(request("101")),
            Err(CoreError::RoomNumberInUse(_))
        ));
        hotel.check_in(request("102")).unwrap();

        let mut numbers: Vec<&str> = hotel.rooms.iter().map(|r| r.room_number.as_str()).collect();
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), hotel.rooms.len());
    }

    #[test]
    fn test_package_snapshot_at_check_in() {
        let mut hotel = hotel();
        let package = hotel
            .add_package(crate::catalog::PackageDraft {
                name: "Romântico".to_string(),
                price: 250.0,
                ..Default::default()
            })
            .unwrap();

        let mut with_package = request("102");
        with_package.package_id = Some(package.id.clone());
        let room = hotel.check_in(with_package).unwrap();

        assert_eq!(room.package_name.as_deref(), Some("Romântico"));
        assert_eq!(room.package_price(), Money::from_cents(25000));
    }

    #[test]
    fn test_confirm_arrival_and_cancel() {
        let mut hotel = hotel();
        let reserved = hotel.check_in(request("101")).unwrap();
        let pending = hotel.request_cancellation(&reserved.id).unwrap();
        assert_eq!(pending.guest_name, "Ana Souza");
        // Requesting alone changes nothing.
        assert_eq!(hotel.rooms.len(), 1);

        hotel.confirm_cancellation(pending.clone()).unwrap();
        assert!(hotel.rooms.is_empty());
        assert!(matches!(
            hotel.confirm_cancellation(pending),
            Err(CoreError::CancellationMismatch(_))
        ));

        let room = hotel.check_in(request("101")).unwrap();
        let occupied = hotel.confirm_arrival(&room.id).unwrap();
        assert_eq!(occupied.status, StayStatus::Occupied);
        assert!(matches!(
            hotel.confirm_arrival(&room.id),
            Err(CoreError::InvalidStayStatus { .. })
        ));
        assert!(hotel.request_cancellation(&room.id).is_err());
    }

    #[test]
    fn test_order_lines() {
        let mut hotel = hotel();
        let water = hotel.add_product("Água", 4.5).unwrap();
        let room = hotel.check_in(request("102")).unwrap();

        hotel.add_to_order(&room.id, &water.id, false).unwrap();
        let addition = hotel.add_to_order(&room.id, &water.id, false).unwrap();
        match addition {
            OrderAddition::Added(line) => assert_eq!(line.quantity, 2),
            other => panic!("unexpected {:?}", other),
        }

        // Price edits do not reach existing lines.
        hotel.update_product(&water.id, "Água", 6.0).unwrap();
        assert_eq!(hotel.room(&room.id).unwrap().order[0].product_price, 4.5);

        let line = hotel.change_quantity(&room.id, &water.id, -1).unwrap();
        assert_eq!(line.map(|l| l.quantity), Some(1));
        assert_eq!(hotel.change_quantity(&room.id, &water.id, -1).unwrap(), None);
        assert!(hotel.room(&room.id).unwrap().order.is_empty());
    }

    #[test]
    fn test_extreme_amounts_never_panic() {
        let mut hotel = hotel();

        let mut typo = request("101");
        typo.daily_rate = 1e17;
        assert!(matches!(
            hotel.check_in(typo),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let water = hotel.add_product("Água", 4.5).unwrap();
        let room = hotel.check_in(request("102")).unwrap();
        hotel.add_to_order(&room.id, &water.id, false).unwrap();

        let line = hotel.change_quantity(&room.id, &water.id, i64::MAX).unwrap();
        assert_eq!(line.map(|l| l.quantity), Some(i64::MAX));

        let at = Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap();
        let bill = hotel.running_bill(&room.id, at).unwrap();
        assert_eq!(bill.order_total.cents(), i64::MAX);
        assert_eq!(bill.total_amount.cents(), i64::MAX);
    }

    #[test]
    fn test_included_meal_needs_confirmation() {
        let mut hotel = hotel();
        let room = hotel.check_in(request("101")).unwrap();

        let first = hotel.add_to_order(&room.id, "meal_breakfast", false).unwrap();
        assert!(matches!(
            first,
            OrderAddition::NeedsConfirmation { meal: Meal::Breakfast, .. }
        ));
        assert!(hotel.room(&room.id).unwrap().order.is_empty());

        let confirmed = hotel.add_to_order(&room.id, "meal_breakfast", true).unwrap();
        assert!(matches!(confirmed, OrderAddition::Added(_)));

        // Lunch is not in the plan, so no confirmation is asked.
        let lunch = hotel.add_to_order(&room.id, "meal_lunch", false).unwrap();
        assert!(matches!(lunch, OrderAddition::Added(_)));
    }

    #[test]
    fn test_edit_reapplies_complimentary_meals() {
        let mut hotel = hotel();
        let room = hotel.check_in(request("102")).unwrap();

        let edited = hotel
            .edit_stay(
                &room.id,
                StayEdit {
                    guest_name: "Ana S.".to_string(),
                    daily_rate: 120.0,
                    check_in_date: date(2024, 1, 2),
                    check_out_date: None,
                    meal_package: MealPlan::default(),
                    amenities: vec!["Jantar".to_string()],
                },
            )
            .unwrap();

        assert_eq!(edited.guest_name, "Ana S.");
        assert!(edited.meal_package.dinner);
        assert_eq!(edited.check_out_date, None);
        assert_eq!(edited.room_number, "102");
    }

    #[test]
    fn test_checkout_requires_full_payment() {
        let mut hotel = hotel();
        let room = hotel.check_in(request("102")).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 3, 11, 0, 0).unwrap();

        // Reservations cannot be checked out.
        assert!(matches!(
            hotel.checkout(&room.id, &paid_ledger(Money::from_cents(20000)), at),
            Err(CoreError::InvalidStayStatus { .. })
        ));

        hotel.confirm_arrival(&room.id).unwrap();
        let bill = hotel.running_bill(&room.id, at).unwrap();
        assert_eq!(bill.total_amount, Money::from_cents(20000));

        let short = paid_ledger(Money::from_cents(19999));
        assert!(matches!(
            hotel.checkout(&room.id, &short, at),
            Err(CoreError::NotFullyPaid { .. })
        ));
        assert_eq!(hotel.rooms.len(), 1);

        let record = hotel.checkout(&room.id, &paid_ledger(bill.total_amount), at).unwrap();
        assert_eq!(record.total_amount, 200.0);
        assert!(hotel.rooms.is_empty());
        assert_eq!(hotel.closed_rooms.len(), 1);
        assert!(hotel.is_available("102"));
    }

    #[test]
    fn test_reopen_restores_checked_out_room() {
        let mut hotel = hotel();
        let water = hotel.add_product("Água", 4.5).unwrap();
        let room = hotel.check_in(request("101")).unwrap();
        hotel.confirm_arrival(&room.id).unwrap();
        hotel.add_to_order(&room.id, &water.id, false).unwrap();
        let before = hotel.room(&room.id).unwrap().clone();

        let at = Utc.with_ymd_and_hms(2024, 1, 3, 11, 0, 0).unwrap();
        let total = hotel.running_bill(&room.id, at).unwrap().total_amount;
        hotel.take_dirty();
        hotel.checkout(&room.id, &paid_ledger(total), at).unwrap();
        // Record filed before the stay is dropped.
        assert_eq!(hotel.take_dirty(), vec![Collection::ClosedRooms, Collection::Rooms]);

        let reopened = hotel.reopen(&room.id).unwrap();
        assert_eq!(reopened, before);
        assert_eq!(hotel.room(&room.id).unwrap(), &before);
        assert!(hotel.closed_rooms.is_empty());
        // Stay restored before the record is dropped.
        assert_eq!(hotel.take_dirty(), vec![Collection::Rooms, Collection::ClosedRooms]);
    }

    #[test]
    fn test_inventory_delete_after_checkout() {
        let mut hotel = hotel();
        let room = hotel.check_in(request("102")).unwrap();
        hotel.confirm_arrival(&room.id).unwrap();
        assert!(hotel.remove_inventory_room("102").is_err());

        let at = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let total = hotel.running_bill(&room.id, at).unwrap().total_amount;
        hotel.checkout(&room.id, &paid_ledger(total), at).unwrap();
        assert!(hotel.remove_inventory_room("102").is_ok());
    }
}
