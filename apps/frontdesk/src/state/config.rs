//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`POUSADA_*`)
//! 2. Defaults (this file)

use std::path::PathBuf;

use pousada_core::Money;
use serde::Serialize;

/// Front desk configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store file override. `None` means the platform data directory.
    pub store_path: Option<PathBuf>,

    /// Hotel name (shown on quotes)
    pub hotel_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Decimal separator; the other of `,`/`.` groups thousands
    pub decimal_separator: char,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_path: None,
            hotel_name: "Pousada".to_string(),
            currency_symbol: "R$".to_string(),
            decimal_separator: ',',
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `POUSADA_STORE_PATH`: SQLite file to use
    /// - `POUSADA_HOTEL_NAME`: Hotel name on quotes
    /// - `POUSADA_CURRENCY_SYMBOL`: e.g. "R$", "US$"
    /// - `POUSADA_DECIMAL_SEPARATOR`: "," or "."
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("POUSADA_STORE_PATH").filter(|p| !p.trim().is_empty()) {
            config.store_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("POUSADA_HOTEL_NAME").filter(|n| !n.trim().is_empty()) {
            config.hotel_name = name.trim().to_string();
        }

        if let Some(symbol) = lookup("POUSADA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol.trim().to_string();
        }

        match lookup("POUSADA_DECIMAL_SEPARATOR").as_deref().map(str::trim) {
            Some(".") => config.decimal_separator = '.',
            Some(",") => config.decimal_separator = ',',
            _ => {}
        }

        config
    }

    fn group_separator(&self) -> char {
        if self.decimal_separator == ',' {
            '.'
        } else {
            ','
        }
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123456)), "R$ 1.234,56");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let digits = amount.units().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.group_separator());
            }
            grouped.push(digit);
        }

        let sign = if amount.is_negative() { "-" } else { "" };
        let symbol = if self.currency_symbol.is_empty() {
            String::new()
        } else {
            format!("{} ", self.currency_symbol)
        };

        format!(
            "{}{}{}{}{:02}",
            sign,
            symbol,
            grouped,
            self.decimal_separator,
            amount.cents_part().abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(123456)), "R$ 1.234,56");
        assert_eq!(config.format_currency(Money::from_cents(100)), "R$ 1,00");
        assert_eq!(config.format_currency(Money::from_cents(5)), "R$ 0,05");
        assert_eq!(config.format_currency(Money::zero()), "R$ 0,00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-R$ 12,34");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("POUSADA_HOTEL_NAME", "Pousada do Sol"),
            ("POUSADA_CURRENCY_SYMBOL", "US$"),
            ("POUSADA_DECIMAL_SEPARATOR", "."),
            ("POUSADA_STORE_PATH", "/tmp/pousada.db"),
        ]);
        let config = ConfigState::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.hotel_name, "Pousada do Sol");
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/pousada.db")));
        assert_eq!(
            config.format_currency(Money::from_cents(1_234_567)),
            "US$ 12,345.67"
        );
    }

    #[test]
    fn test_unknown_separator_keeps_default() {
        let config = ConfigState::from_lookup(|key| {
            (key == "POUSADA_DECIMAL_SEPARATOR").then(|| ";".to_string())
        });
        assert_eq!(config.decimal_separator, ',');
    }
}
