//! # API Error Type
//!
//! Unified error type for front desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pousada                                │
//! │                                                                         │
//! │  stdin line                   Rust Backend                              │
//! │  ──────────                   ────────────                              │
//! │                                                                         │
//! │  {"command":"remove_inventory_room","args":{"number":"101"}}            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Handler                                                 │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Guard? ──── CoreError::RoomNumberInUse("101") ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Store write failed? ── StoreError::QueryFailed ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"ok":false,"error":{"code":"GUARD_REJECTED",                  │
//! │                               "message":"Room 101 is in use"}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pousada_core::CoreError;
use pousada_store::StoreError;
use serde::Serialize;

/// Error returned from a command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Room not found: room_123"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed, shown next to the form
    ValidationError,

    /// Invariant guard (room in use, occupied, not in inventory)
    GuardRejected,

    /// Operation not allowed in the current state
    BusinessLogic,

    /// Payment reconciliation rejected the request
    PaymentError,

    /// Persisting a collection failed
    StorageError,

    /// The command line could not be decoded
    BadRequest,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn business(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BusinessLogic, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::RoomNotFound(_)
            | CoreError::InventoryRoomNotFound(_)
            | CoreError::RecordNotFound(_)
            | CoreError::ProductNotFound(_)
            | CoreError::PackageNotFound(_)
            | CoreError::AmenityNotFound(_)
            | CoreError::PackageServiceNotFound(_)
            | CoreError::PaymentNotFound(_) => ErrorCode::NotFound,
            e if e.is_guard() => ErrorCode::GuardRejected,
            CoreError::NotFullyPaid { .. } | CoreError::PaymentNotAccepted { .. } => {
                ErrorCode::PaymentError
            }
            CoreError::Validation(_) => ErrorCode::ValidationError,
            _ => ErrorCode::BusinessLogic,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts store errors to API errors.
///
/// Only writes reach this point; failed reads fall back to defaults inside
/// the store.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Store operation failed");
        let message = match err {
            StoreError::ConnectionFailed(_) => "Store connection failed",
            StoreError::MigrationFailed(_) => "Store migration failed",
            StoreError::Serialization { .. } => "Could not encode state for storage",
            StoreError::QueryFailed(_) | StoreError::Internal(_) => "Saving changes failed",
        };
        ApiError::new(ErrorCode::StorageError, message)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid command: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pousada_core::ValidationError;

    #[test]
    fn test_core_error_codes() {
        let guard: ApiError = CoreError::RoomNumberInUse("101".into()).into();
        assert_eq!(guard.code, ErrorCode::GuardRejected);
        assert_eq!(guard.message, "Room 101 is in use");

        let missing: ApiError = CoreError::RoomNotFound("room_x".into()).into();
        assert_eq!(missing.code, ErrorCode::NotFound);

        let unpaid: ApiError = CoreError::NotFullyPaid {
            remaining: "10.00".into(),
        }
        .into();
        assert_eq!(unpaid.code, ErrorCode::PaymentError);

        let invalid: ApiError = CoreError::from(ValidationError::Required {
            field: "guest name".into(),
        })
        .into();
        assert_eq!(invalid.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::GuardRejected, "Room 101 is currently occupied");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "GUARD_REJECTED");
        assert_eq!(json["message"], "Room 101 is currently occupied");
    }
}
