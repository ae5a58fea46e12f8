//! # Error Types
//!
//! Domain-specific error types for pousada-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pousada-core errors (this file)                                        │
//! │  ├── CoreError        - Lifecycle guards and lookups                    │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  pousada-store errors (separate crate)                                  │
//! │  └── StoreError       - Key-value store failures                        │
//! │                                                                         │
//! │  Front desk API errors (in app)                                         │
//! │  └── ApiError         - What the caller sees (serialized)               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is synchronous and local: it blocks the action that raised it
//! and nothing is retried.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations and failed lookups.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No active stay with this id.
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// No inventory room with this number.
    #[error("Inventory room not found: {0}")]
    InventoryRoomNotFound(String),

    /// No closed record with this id.
    #[error("History record not found: {0}")]
    RecordNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Amenity not found: {0}")]
    AmenityNotFound(String),

    #[error("Package service not found: {0}")]
    PackageServiceNotFound(String),

    /// An active stay already holds this room number.
    ///
    /// ## When This Occurs
    /// - Deleting an inventory room that is reserved or occupied
    /// - Checking in to a room that is not available
    #[error("Room {0} is in use")]
    RoomNumberInUse(String),

    /// Reopen rejected: another stay now holds the room.
    #[error("Room {0} is currently occupied")]
    RoomOccupied(String),

    /// Reopen rejected: the room was removed from inventory.
    #[error("Room {0} no longer exists in the inventory")]
    RoomNotInInventory(String),

    /// The stay is not in a status that allows the operation.
    ///
    /// ## When This Occurs
    /// - Confirming arrival of a stay that is already occupied
    /// - Cancelling a stay that is occupied
    /// - Checking out a stay that is still a reservation
    #[error("Room {room_id} is {status}, cannot {operation}")]
    InvalidStayStatus {
        room_id: String,
        status: String,
        operation: String,
    },

    /// Reserved meal products cannot be deleted.
    #[error("Product {0} is a default meal item and cannot be removed")]
    ProtectedProduct(String),

    /// Checkout confirmation below the total.
    #[error("Bill is not fully paid: {remaining} remaining")]
    NotFullyPaid { remaining: String },

    /// The ledger refuses further payments of this kind.
    #[error("Payment not accepted: {reason}")]
    PaymentNotAccepted { reason: String },

    #[error("Payment not found: {0}")]
    PaymentNotFound(String),

    /// A confirmation does not match the pending request it answers.
    #[error("No pending cancellation for room {0}")]
    CancellationMismatch(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for invariant guards (in-use, occupied, not-in-inventory) as
    /// opposed to input validation or lookups.
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            CoreError::RoomNumberInUse(_)
                | CoreError::RoomOccupied(_)
                | CoreError::RoomNotInInventory(_)
                | CoreError::ProtectedProduct(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, shown next to the form that produced them.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., not a number, not a date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (case-insensitive names, room numbers).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Check-out before check-in.
    #[error("check-out date {check_out} is before check-in date {check_in}")]
    InvalidDateRange { check_in: String, check_out: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
