//! # Checkout Session
//!
//! Transient state of the checkout screen. Nothing here is persisted; an
//! abandoned session simply disappears.
//!
//! ```text
//! open_checkout ──► CheckoutSession { bill @ open, ledger: [], split: 1 }
//!                        │
//!        add_payment / remove_payment / set_split
//!                        │
//!                        ▼
//! confirm_checkout ──► bill recomputed @ confirm ──► Hotel::checkout
//!                                                     (ClosedRoom filed)
//! ```

use chrono::{DateTime, Utc};
use pousada_core::{BillSummary, CoreResult, Hotel, Money, PaymentLedger};

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub room_id: String,
    pub bill: BillSummary,
    pub ledger: PaymentLedger,
    /// People sharing the bill. 0 hides the split.
    pub split_count: u32,
}

impl CheckoutSession {
    pub fn open(hotel: &Hotel, room_id: &str, at: DateTime<Utc>) -> CoreResult<Self> {
        let bill = hotel.running_bill(room_id, at)?;
        Ok(CheckoutSession {
            room_id: room_id.to_string(),
            bill,
            ledger: PaymentLedger::new(bill.total_amount),
            split_count: 1,
        })
    }

    /// Recomputes the bill, e.g. when the session crosses midnight.
    pub fn refresh(&mut self, hotel: &Hotel, at: DateTime<Utc>) -> CoreResult<()> {
        self.bill = hotel.running_bill(&self.room_id, at)?;
        self.ledger.retarget(self.bill.total_amount);
        Ok(())
    }

    /// Per-person share, or `None` when no split is shown.
    pub fn split_share(&self) -> Option<Money> {
        self.bill.total_amount.split(self.split_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use pousada_core::{CheckInRequest, MealPlan, PaymentMethod};

    fn occupied_hotel() -> (Hotel, String) {
        let mut hotel = Hotel::new();
        hotel.ensure_default_meals();
        hotel.add_inventory_room("7", "", vec![]).unwrap();
        let room = hotel
            .check_in(CheckInRequest {
                room_number: "7".into(),
                guest_name: "Bruno".into(),
                daily_rate: 100.0,
                check_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                check_out_date: None,
                meal_package: MealPlan::default(),
                package_id: None,
            })
            .unwrap();
        hotel.confirm_arrival(&room.id).unwrap();
        (hotel, room.id)
    }

    #[test]
    fn test_open_snapshots_bill_and_split() {
        let (hotel, room_id) = occupied_hotel();
        let at = Utc.with_ymd_and_hms(2024, 1, 4, 9, 0, 0).unwrap();

        let mut session = CheckoutSession::open(&hotel, &room_id, at).unwrap();
        assert_eq!(session.bill.total_amount, Money::from_cents(30000));
        assert_eq!(session.split_share(), Some(Money::from_cents(30000)));

        session.split_count = 4;
        assert_eq!(session.split_share(), Some(Money::from_cents(7500)));

        session.split_count = 0;
        assert_eq!(session.split_share(), None);
    }

    #[test]
    fn test_refresh_retargets_ledger() {
        let (hotel, room_id) = occupied_hotel();
        let opened = Utc.with_ymd_and_hms(2024, 1, 3, 23, 0, 0).unwrap();

        let mut session = CheckoutSession::open(&hotel, &room_id, opened).unwrap();
        session
            .ledger
            .add(PaymentMethod::Card, Money::from_cents(20000))
            .unwrap();
        assert!(session.ledger.is_fully_paid());

        let after_midnight = Utc.with_ymd_and_hms(2024, 1, 4, 0, 30, 0).unwrap();
        session.refresh(&hotel, after_midnight).unwrap();
        assert_eq!(session.ledger.remaining(), Money::from_cents(10000));
        assert!(!session.ledger.is_fully_paid());
    }
}
