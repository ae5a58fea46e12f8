//! # Payment Reconciliation
//!
//! Transient split-tender ledger used while a checkout is open. Nothing here
//! is persisted: abandoning the checkout drops the ledger.
//!
//! ## Reconciliation
//! ```text
//! total_paid = Σ payment.amount
//! remaining  = total - total_paid          (may go negative)
//! change     = max(total_paid - total, 0)
//! fully paid ⇔ remaining ≤ 0               (gates checkout confirmation)
//! ```
//!
//! Once the bill is covered only cash is still accepted, since cash is the
//! only tender that produces change. Removing a payment is always allowed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::new_id;

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Instant bank transfer.
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Pix => "pix",
        }
    }
}

// =============================================================================
// Payment
// =============================================================================

/// One tender towards the bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    pub method: PaymentMethod,
    pub amount: Money,
}

// =============================================================================
// Payment Ledger
// =============================================================================

/// Ordered payments reconciled against a bill total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLedger {
    total: Money,
    payments: Vec<Payment>,
}

impl PaymentLedger {
    pub fn new(total: Money) -> Self {
        PaymentLedger {
            total,
            payments: Vec::new(),
        }
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Whether a new payment of `method` may be added right now.
    pub fn accepts(&self, method: PaymentMethod) -> bool {
        !self.is_fully_paid() || method == PaymentMethod::Cash
    }

    /// Records a payment and returns it.
    ///
    /// ## Errors
    /// - `Validation` when the amount is zero or negative
    /// - `PaymentNotAccepted` when the bill is covered and `method` is not cash
    pub fn add(&mut self, method: PaymentMethod, amount: Money) -> CoreResult<&Payment> {
        if !amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "payment amount".to_string(),
            }
            .into());
        }

        if !self.accepts(method) {
            return Err(CoreError::PaymentNotAccepted {
                reason: format!("bill is fully paid, {} is no longer accepted", method.as_str()),
            });
        }

        self.payments.push(Payment {
            id: new_id("pay"),
            method,
            amount,
        });

        let index = self.payments.len() - 1;
        Ok(&self.payments[index])
    }

    /// Removes a payment by id.
    pub fn remove(&mut self, payment_id: &str) -> CoreResult<Payment> {
        let index = self
            .payments
            .iter()
            .position(|payment| payment.id == payment_id)
            .ok_or_else(|| CoreError::PaymentNotFound(payment_id.to_string()))?;

        Ok(self.payments.remove(index))
    }

    /// Moves the ledger to a new bill total, keeping its payments.
    pub fn retarget(&mut self, total: Money) {
        self.total = total;
    }

    pub fn total_paid(&self) -> Money {
        self.payments.iter().map(|payment| payment.amount).sum()
    }

    /// Amount still owed. Negative once overpaid.
    pub fn remaining(&self) -> Money {
        self.total - self.total_paid()
    }

    pub fn change(&self) -> Money {
        self.total_paid().saturating_excess_over(self.total)
    }

    pub fn is_fully_paid(&self) -> bool {
        !self.remaining().is_positive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reais(value: i64) -> Money {
        Money::from_cents(value * 100)
    }

    #[test]
    fn test_split_tender_and_change() {
        let mut ledger = PaymentLedger::new(reais(300));
        ledger.add(PaymentMethod::Cash, reais(150)).unwrap();
        assert!(!ledger.is_fully_paid());
        assert_eq!(ledger.remaining(), reais(150));

        ledger.add(PaymentMethod::Card, reais(150)).unwrap();
        assert!(ledger.is_fully_paid());
        assert_eq!(ledger.change(), Money::zero());

        ledger.add(PaymentMethod::Cash, reais(50)).unwrap();
        assert_eq!(ledger.change(), reais(50));
        assert_eq!(ledger.remaining(), reais(-50));
        assert_eq!(ledger.total_paid(), reais(350));
    }

    #[test]
    fn test_only_cash_after_fully_paid() {
        let mut ledger = PaymentLedger::new(reais(100));
        ledger.add(PaymentMethod::Pix, reais(100)).unwrap();

        assert!(!ledger.accepts(PaymentMethod::Card));
        assert!(matches!(
            ledger.add(PaymentMethod::Card, reais(10)),
            Err(CoreError::PaymentNotAccepted { .. })
        ));
        assert!(ledger.add(PaymentMethod::Cash, reais(10)).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let mut ledger = PaymentLedger::new(reais(100));
        assert!(matches!(
            ledger.add(PaymentMethod::Cash, Money::zero()),
            Err(CoreError::Validation(_))
        ));
        assert!(ledger.add(PaymentMethod::Cash, reais(-5)).is_err());
        assert!(ledger.payments().is_empty());
    }

    #[test]
    fn test_remove_payment_ungates_confirmation() {
        let mut ledger = PaymentLedger::new(reais(200));
        let first = ledger.add(PaymentMethod::Card, reais(120)).unwrap().id.clone();
        ledger.add(PaymentMethod::Pix, reais(80)).unwrap();
        assert!(ledger.is_fully_paid());

        let removed = ledger.remove(&first).unwrap();
        assert_eq!(removed.amount, reais(120));
        assert!(!ledger.is_fully_paid());
        assert!(ledger.accepts(PaymentMethod::Card));

        assert!(matches!(
            ledger.remove("pay_missing"),
            Err(CoreError::PaymentNotFound(_))
        ));
    }

    #[test]
    fn test_fully_paid_iff_paid_covers_total() {
        for total in [1, 99, 100, 30000, 56970] {
            let mut ledger = PaymentLedger::new(Money::from_cents(total));
            ledger.add(PaymentMethod::Card, Money::from_cents(total - 1).max(Money::from_cents(1))).unwrap();
            assert_eq!(ledger.is_fully_paid(), ledger.total_paid() >= ledger.total());
        }
    }

    #[test]
    fn test_retarget_keeps_payments() {
        let mut ledger = PaymentLedger::new(reais(200));
        ledger.add(PaymentMethod::Cash, reais(200)).unwrap();
        assert!(ledger.is_fully_paid());

        ledger.retarget(reais(260));
        assert_eq!(ledger.payments().len(), 1);
        assert_eq!(ledger.remaining(), reais(60));
        assert!(!ledger.is_fully_paid());
    }
}
