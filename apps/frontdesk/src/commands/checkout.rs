//! # Checkout Commands
//!
//! Split-tender checkout of an occupied room.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  open_checkout ──► add_payment* ──► confirm_checkout ──► History        │
//! │       │               ▲   │                                             │
//! │       │   remove_payment  │ (once fully paid only cash is accepted)     │
//! │       │               └───┘                                             │
//! │       │                                                                 │
//! │       └──► cancel_checkout ──► room detail (nothing persisted)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pousada_core::validation::{parse_amount, validate_positive_price};
use pousada_core::{Action, ClosedRoom, CoreError, Money, Payment, PaymentMethod, StayStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stay::BillResponse;
use crate::error::ApiError;
use crate::state::{CheckoutSession, FrontDesk};

/// Amount typed by the operator: a number, or text such as `"150,50"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn to_money(&self) -> Result<Money, ApiError> {
        let amount = match self {
            AmountInput::Number(value) => validate_positive_price("payment amount", *value),
            AmountInput::Text(text) => parse_amount("payment amount", text),
        };
        amount.map_err(|e| CoreError::from(e).into())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub method: PaymentMethod,
    pub amount_cents: i64,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        PaymentResponse {
            id: payment.id.clone(),
            method: payment.method,
            amount_cents: payment.amount.cents(),
        }
    }
}

/// Checkout screen contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub room_id: String,
    pub room_number: String,
    pub guest_name: String,
    pub bill: BillResponse,
    pub payments: Vec<PaymentResponse>,
    pub total_paid_cents: i64,
    pub remaining_cents: i64,
    pub change_cents: i64,
    pub is_fully_paid: bool,
    /// Methods a new payment may use right now.
    pub accepted_methods: Vec<PaymentMethod>,
    pub split_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_share_cents: Option<i64>,
}

/// Result of a confirmed checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub record: ClosedRoom,
    pub payments: Vec<PaymentResponse>,
    pub total_paid_cents: i64,
    pub change_cents: i64,
}

fn checkout_response(desk: &FrontDesk) -> Result<CheckoutResponse, ApiError> {
    let session = desk
        .checkout()
        .ok_or_else(|| ApiError::business("No checkout in progress"))?;
    let room = desk.hotel().room(&session.room_id)?;
    Ok(session_response(session, &room.room_number, &room.guest_name))
}

fn session_response(session: &CheckoutSession, room_number: &str, guest_name: &str) -> CheckoutResponse {
    let ledger = &session.ledger;
    CheckoutResponse {
        room_id: session.room_id.clone(),
        room_number: room_number.to_string(),
        guest_name: guest_name.to_string(),
        bill: BillResponse::from(&session.bill),
        payments: ledger.payments().iter().map(PaymentResponse::from).collect(),
        total_paid_cents: ledger.total_paid().cents(),
        remaining_cents: ledger.remaining().cents(),
        change_cents: ledger.change().cents(),
        is_fully_paid: ledger.is_fully_paid(),
        accepted_methods: [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Pix]
            .into_iter()
            .filter(|method| ledger.accepts(*method))
            .collect(),
        split_count: session.split_count,
        split_share_cents: session.split_share().map(|share| share.cents()),
    }
}

/// Opens the checkout screen of an occupied room.
pub fn open_checkout(desk: &mut FrontDesk, room_id: &str) -> Result<CheckoutResponse, ApiError> {
    let room = desk.hotel().room(room_id)?;
    if room.status != StayStatus::Occupied {
        return Err(CoreError::InvalidStayStatus {
            room_id: room.id.clone(),
            status: room.status.as_str().to_string(),
            operation: "check out".to_string(),
        }
        .into());
    }

    let session = CheckoutSession::open(desk.hotel(), room_id, desk.now())?;
    debug!(room_id = %room_id, total = %session.bill.total_amount, "Checkout opened");
    desk.checkout = Some(session);
    desk.apply(Action::StartCheckout(room_id.to_string()));
    checkout_response(desk)
}

pub fn add_payment(
    desk: &mut FrontDesk,
    method: PaymentMethod,
    amount: &AmountInput,
) -> Result<CheckoutResponse, ApiError> {
    let amount = amount.to_money()?;
    let session = desk.checkout_mut()?;
    session.ledger.add(method, amount)?;
    debug!(method = method.as_str(), amount = %amount, "Payment added");
    checkout_response(desk)
}

pub fn remove_payment(desk: &mut FrontDesk, payment_id: &str) -> Result<CheckoutResponse, ApiError> {
    desk.checkout_mut()?.ledger.remove(payment_id)?;
    checkout_response(desk)
}

/// Sets how many people share the bill. Missing or 0 hides the split.
pub fn set_split(desk: &mut FrontDesk, count: Option<u32>) -> Result<CheckoutResponse, ApiError> {
    desk.checkout_mut()?.split_count = count.unwrap_or(0);
    checkout_response(desk)
}

/// Closes the stay. The bill is recomputed now and must be covered.
pub fn confirm_checkout(desk: &mut FrontDesk) -> Result<ReceiptResponse, ApiError> {
    let now = desk.now();
    let session = desk
        .checkout
        .as_mut()
        .ok_or_else(|| ApiError::business("No checkout in progress"))?;

    session.refresh(&desk.hotel, now)?;
    let record = desk.hotel.checkout(&session.room_id, &session.ledger, now)?;

    let ledger = &session.ledger;
    let receipt = ReceiptResponse {
        payments: ledger.payments().iter().map(PaymentResponse::from).collect(),
        total_paid_cents: ledger.total_paid().cents(),
        change_cents: ledger.change().cents(),
        record,
    };

    info!(
        room_id = %receipt.record.id(),
        total_cents = receipt.record.total_amount().cents(),
        "confirm_checkout command"
    );
    desk.apply(Action::CheckoutConfirmed);
    Ok(receipt)
}

/// Abandons the checkout. Payments entered so far are discarded.
pub fn cancel_checkout(desk: &mut FrontDesk) {
    desk.apply(Action::CancelCheckout);
}
