//! # Validation Module
//!
//! Input validation for the front desk forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command decoding (serde)                                      │
//! │  └── Shape and type of each request                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Required text, positive amounts below MAX_PRICE_CENTS              │
//! │  ├── Case-insensitive name uniqueness                                   │
//! │  └── Date ranges                                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Lifecycle guards (stay / inventory / history)                 │
//! │  └── Room number in use, reopen eligibility                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed validation blocks the mutation; nothing is written.
//!
//! ## Usage
//! ```rust
//! use pousada_core::validation::{parse_amount, validate_name};
//!
//! assert_eq!(validate_name("guest name", "  Ana ").unwrap(), "Ana");
//! assert_eq!(parse_amount("amount", "150,50").unwrap().cents(), 15050);
//! assert!(parse_amount("amount", "abc").is_err());
//! ```

use chrono::NaiveDate;

pub use crate::error::ValidationResult;
use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PRICE_CENTS;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field.
///
/// ## Returns
/// The trimmed value.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Rejects `candidate` when any of `existing` matches it case-insensitively.
///
/// ## Example
/// ```rust
/// use pousada_core::validation::ensure_unique_name;
///
/// let names = ["Wi-Fi", "Piscina"];
/// assert!(ensure_unique_name("amenity", "wi-fi", names.iter().copied()).is_err());
/// assert!(ensure_unique_name("amenity", "Sauna", names.iter().copied()).is_ok());
/// ```
pub fn ensure_unique_name<'a, I>(field: &str, candidate: &str, existing: I) -> ValidationResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = candidate.trim().to_lowercase();

    if existing
        .into_iter()
        .any(|name| name.trim().to_lowercase() == needle)
    {
        return Err(ValidationError::Duplicate {
            field: field.to_string(),
            value: candidate.trim().to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price or rate that must be strictly positive.
pub fn validate_positive_price(field: &str, value: f64) -> ValidationResult<Money> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        });
    }

    let money = Money::from_decimal(value);
    if !money.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    check_price_ceiling(field, money, 1)
}

/// Validates a price that may be zero (package add-ons).
pub fn validate_non_negative_price(field: &str, value: f64) -> ValidationResult<Money> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        });
    }

    let money = Money::from_decimal(value);
    if money.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    check_price_ceiling(field, money, 0)
}

fn check_price_ceiling(field: &str, money: Money, min: i64) -> ValidationResult<Money> {
    if money.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max: MAX_PRICE_CENTS / 100,
        });
    }

    Ok(money)
}

/// Parses a typed amount such as `"150"`, `"150.5"` or `"150,50"`.
///
/// Non-numeric, negative and zero amounts are rejected.
pub fn parse_amount(field: &str, text: &str) -> ValidationResult<Money> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: f64 = text
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a number", text),
        })?;

    validate_positive_price(field, value)
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates an optional check-out date against the check-in date.
///
/// Same-day stays are allowed.
pub fn validate_stay_dates(check_in: NaiveDate, check_out: Option<NaiveDate>) -> ValidationResult<()> {
    if let Some(check_out) = check_out {
        if check_out < check_in {
            return Err(ValidationError::InvalidDateRange {
                check_in: check_in.to_string(),
                check_out: check_out.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "Suíte Master").unwrap(), "Suíte Master");
        assert!(matches!(
            validate_name("name", "   "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_unique_name_is_case_insensitive() {
        let existing = vec!["Romântico".to_string(), "Família".to_string()];
        let result = ensure_unique_name("package", " romântico ", existing.iter().map(String::as_str));
        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));

        let result = ensure_unique_name("package", "Lua de Mel", existing.iter().map(String::as_str));
        assert!(result.is_ok());
    }

    #[test]
    fn test_positive_price() {
        assert_eq!(validate_positive_price("price", 4.5).unwrap().cents(), 450);
        assert!(validate_positive_price("price", 0.0).is_err());
        assert!(validate_positive_price("price", -10.0).is_err());
        assert!(validate_positive_price("price", f64::NAN).is_err());
    }

    #[test]
    fn test_price_ceiling() {
        let max = MAX_PRICE_CENTS as f64 / 100.0;
        assert_eq!(validate_positive_price("daily rate", max).unwrap().cents(), MAX_PRICE_CENTS);
        assert!(matches!(
            validate_positive_price("daily rate", 1e17),
            Err(ValidationError::OutOfRange { min: 1, .. })
        ));
        assert!(matches!(
            validate_non_negative_price("price", max + 0.01),
            Err(ValidationError::OutOfRange { min: 0, .. })
        ));
        assert!(matches!(
            parse_amount("amount", "99999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_non_negative_price() {
        assert!(validate_non_negative_price("price", 0.0).unwrap().is_zero());
        assert!(matches!(
            validate_non_negative_price("price", -1.0),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", "150").unwrap().cents(), 15000);
        assert_eq!(parse_amount("amount", " 99.90 ").unwrap().cents(), 9990);
        assert_eq!(parse_amount("amount", "12,5").unwrap().cents(), 1250);

        assert!(matches!(parse_amount("amount", ""), Err(ValidationError::Required { .. })));
        assert!(matches!(
            parse_amount("amount", "dez"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_amount("amount", "-50").is_err());
        assert!(parse_amount("amount", "0").is_err());
    }

    #[test]
    fn test_stay_dates() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan3 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();

        assert!(validate_stay_dates(jan1, None).is_ok());
        assert!(validate_stay_dates(jan1, Some(jan1)).is_ok());
        assert!(validate_stay_dates(jan1, Some(jan3)).is_ok());
        assert!(matches!(
            validate_stay_dates(jan3, Some(jan1)),
            Err(ValidationError::InvalidDateRange { .. })
        ));
    }
}
