//! # pousada-core: Pure Business Logic for Pousada
//!
//! This crate is the **heart** of the front desk. It holds every rule of the
//! room lifecycle and every billing computation as plain functions over
//! in-memory state, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pousada Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/frontdesk (JSON commands)                  │   │
//! │  │    check_in, add_to_order, add_payment, confirm_checkout, ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ pousada-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │ billing  │ │ stay / history   │  │   │
//! │  │   │  Room    │ │  Money   │ │  Bill    │ │ inventory        │  │   │
//! │  │   │ Product  │ │          │ │ Payments │ │ catalog / nav    │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pousada-store (key-value state)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Persisted records (Room, ClosedRoom, Product, ...)
//! - [`money`] - Integer-cent money
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation rules
//! - [`billing`] - Bill of a stay and quotes
//! - [`payment`] - Split-tender payment ledger
//! - [`hotel`] - The state aggregate and its dirty collections
//! - [`catalog`], [`inventory`], [`stay`], [`history`] - Operations on [`Hotel`]
//! - [`navigation`] - Screen state machine
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use pousada_core::{CheckInRequest, Hotel, MealPlan, Money, PaymentLedger, PaymentMethod};
//!
//! let mut hotel = Hotel::new();
//! hotel.ensure_default_meals();
//! hotel.add_inventory_room("101", "", vec![]).unwrap();
//!
//! let room = hotel
//!     .check_in(CheckInRequest {
//!         room_number: "101".into(),
//!         guest_name: "Ana".into(),
//!         daily_rate: 100.0,
//!         check_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         check_out_date: None,
//!         meal_package: MealPlan::default(),
//!         package_id: None,
//!     })
//!     .unwrap();
//! hotel.confirm_arrival(&room.id).unwrap();
//!
//! let at = Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap();
//! let bill = hotel.running_bill(&room.id, at).unwrap();
//! assert_eq!(bill.total_amount, Money::from_cents(20000));
//!
//! let mut ledger = PaymentLedger::new(bill.total_amount);
//! ledger.add(PaymentMethod::Pix, bill.total_amount).unwrap();
//! let record = hotel.checkout(&room.id, &ledger, at).unwrap();
//! assert_eq!(record.total_amount, 200.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod catalog;
pub mod error;
pub mod history;
pub mod hotel;
pub mod inventory;
pub mod money;
pub mod navigation;
pub mod payment;
pub mod stay;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{compute_bill, quote, BillSummary, MealPrices, Quote};
pub use catalog::PackageDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use history::ReopenEligibility;
pub use hotel::{Collection, Hotel};
pub use inventory::{BoardEntry, RoomFilter, RoomStatus};
pub use money::Money;
pub use navigation::{Action, Destination, Screen};
pub use payment::{Payment, PaymentLedger, PaymentMethod};
pub use stay::{CancellationRequest, CheckInRequest, OrderAddition, StayEdit};
pub use types::*;

// =============================================================================
// Constants
// =============================================================================

/// Largest price, rate or payment accepted from input, in cents (R$ 10 million).
///
/// ## Business Reason
/// Catches typos (an extra zero or three) before they reach a bill.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Longest stay the simulator prices (ten years).
pub const MAX_QUOTE_NIGHTS: i64 = 3650;
