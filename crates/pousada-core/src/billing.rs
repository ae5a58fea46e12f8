//! # Billing Calculator
//!
//! Derives the itemized bill of a stay. Pure function of the room, the
//! product catalog and the instant the bill is computed for.
//!
//! ## Bill Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  nights = max(date(at) - date(check_in), 1)       (UTC calendar days)   │
//! │                                                                         │
//! │  room_total         = daily_rate × nights                               │
//! │  meal_package_total = Σ live meal prices × nights                       │
//! │  order_total        = Σ frozen line price × quantity                    │
//! │  package_total      = package_price or 0                                │
//! │  ─────────────────────────────────────────────                          │
//! │  total_amount       = sum of the four                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Live vs Frozen Prices
//! Order lines carry the product price captured when they were added. Meal
//! prices are looked up in the catalog every time the bill is computed, so a
//! price change (or a deleted meal product, which counts as 0) affects every
//! active stay. Once checkout snapshots the bill into a [`ClosedRoom`], the
//! record never changes again.

use chrono::{DateTime, Utc};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{ClosedRoom, Meal, MealPlan, OrderItem, Product, Room};
use crate::{MAX_PRICE_CENTS, MAX_QUOTE_NIGHTS};

// =============================================================================
// Nights
// =============================================================================

/// Nights billed between check-in and `until`, compared as UTC dates.
///
/// Never less than 1: same-day and partial-day stays bill one night.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use pousada_core::billing::nights_between;
///
/// let check_in = Utc.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap();
/// let checkout = Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap();
/// assert_eq!(nights_between(check_in, checkout), 2);
/// assert_eq!(nights_between(check_in, check_in), 1);
/// ```
pub fn nights_between(check_in: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    (until.date_naive() - check_in.date_naive()).num_days().max(1)
}

// =============================================================================
// Meal Prices
// =============================================================================

/// Daily meal prices as currently found in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealPrices {
    pub breakfast: Money,
    pub lunch: Money,
    pub dinner: Money,
}

impl MealPrices {
    /// Looks up the reserved meal products. A missing product prices at 0.
    pub fn from_catalog(products: &[Product]) -> Self {
        let lookup = |meal: Meal| {
            products
                .iter()
                .find(|product| product.id == meal.product_id())
                .map(Product::price)
                .unwrap_or_default()
        };

        MealPrices {
            breakfast: lookup(Meal::Breakfast),
            lunch: lookup(Meal::Lunch),
            dinner: lookup(Meal::Dinner),
        }
    }

    pub fn price(&self, meal: Meal) -> Money {
        match meal {
            Meal::Breakfast => self.breakfast,
            Meal::Lunch => self.lunch,
            Meal::Dinner => self.dinner,
        }
    }

    /// Cost of one day of the given plan.
    pub fn daily_cost(&self, plan: &MealPlan) -> Money {
        plan.meals().map(|meal| self.price(meal)).sum()
    }
}

// =============================================================================
// Bill Summary
// =============================================================================

/// Itemized bill of a stay at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillSummary {
    pub nights: i64,
    pub room_total: Money,
    pub meal_package_total: Money,
    pub order_total: Money,
    pub package_total: Money,
    pub total_amount: Money,
}

impl BillSummary {
    /// Freezes this bill into the history record of `room`.
    ///
    /// The package total has no field of its own in the record; it stays
    /// visible through the room's `packagePrice` and inside `totalAmount`.
    pub fn into_closed_record(self, room: Room, checked_out_at: DateTime<Utc>) -> ClosedRoom {
        let original_status = room.status;
        ClosedRoom {
            room,
            final_check_out_date: checked_out_at,
            room_total: self.room_total.to_decimal(),
            order_total: self.order_total.to_decimal(),
            meal_package_total: self.meal_package_total.to_decimal(),
            total_amount: self.total_amount.to_decimal(),
            original_status,
        }
    }
}

/// Sum of every order line.
pub fn order_total(order: &[OrderItem]) -> Money {
    order.iter().map(OrderItem::line_total).sum()
}

/// Computes the bill of `room` as if it checked out at `at`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use pousada_core::billing::compute_bill;
/// use pousada_core::types::{MealPlan, Room, StayStatus};
///
/// let room = Room {
///     id: "room_1".into(),
///     room_number: "101".into(),
///     room_name: "Quarto 101".into(),
///     guest_name: "Ana".into(),
///     daily_rate: 100.0,
///     check_in_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
///     check_out_date: None,
///     order: vec![],
///     status: StayStatus::Occupied,
///     amenities: vec![],
///     meal_package: MealPlan::default(),
///     package_id: None,
///     package_name: None,
///     package_price: None,
/// };
///
/// let bill = compute_bill(&room, &[], Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap());
/// assert_eq!(bill.nights, 2);
/// assert_eq!(bill.room_total.cents(), 20000);
/// ```
pub fn compute_bill(room: &Room, products: &[Product], at: DateTime<Utc>) -> BillSummary {
    let nights = nights_between(room.check_in_date, at);
    let room_total = room.daily_rate().multiply_quantity(nights);
    let meal_package_total = MealPrices::from_catalog(products)
        .daily_cost(&room.meal_package)
        .multiply_quantity(nights);
    let order_total = order_total(&room.order);
    let package_total = room.package_price();

    BillSummary {
        nights,
        room_total,
        meal_package_total,
        order_total,
        package_total,
        total_amount: room_total + order_total + meal_package_total + package_total,
    }
}

// =============================================================================
// Quote
// =============================================================================

/// Estimate for a prospective stay (no room, no orders, no package).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub nights: i64,
    pub daily_rate: Money,
    pub meals: MealPlan,
    pub room_total: Money,
    pub meal_package_total: Money,
    pub grand_total: Money,
}

/// Prices a prospective stay.
///
/// Nights below 1 are raised to 1; a negative or non-numeric rate counts as 0.
/// More than [`MAX_QUOTE_NIGHTS`] nights or a rate above [`MAX_PRICE_CENTS`]
/// is rejected with `OutOfRange`.
pub fn quote(
    nights: i64,
    daily_rate: f64,
    meals: MealPlan,
    products: &[Product],
) -> ValidationResult<Quote> {
    if nights > MAX_QUOTE_NIGHTS {
        return Err(ValidationError::OutOfRange {
            field: "nights".to_string(),
            min: 1,
            max: MAX_QUOTE_NIGHTS,
        });
    }
    let nights = nights.max(1);

    let daily_rate = Money::from_decimal(daily_rate);
    let daily_rate = if daily_rate.is_negative() {
        Money::zero()
    } else {
        daily_rate
    };
    if daily_rate.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "daily rate".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS / 100,
        });
    }

    let room_total = daily_rate.multiply_quantity(nights);
    let meal_package_total = MealPrices::from_catalog(products)
        .daily_cost(&meals)
        .multiply_quantity(nights);

    Ok(Quote {
        nights,
        daily_rate,
        meals,
        room_total,
        meal_package_total,
        grand_total: room_total + meal_package_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
