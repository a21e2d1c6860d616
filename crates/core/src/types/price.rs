//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are stored in the currency's standard unit (e.g., ringgit, not
/// sen) as a [`Decimal`] to avoid floating-point rounding in totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "RM29.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Malaysian Ringgit - the store's home currency.
    #[default]
    MYR,
    USD,
    SGD,
}

impl CurrencyCode {
    /// Display symbol used in prices shown to shoppers.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::MYR => "RM",
            Self::USD | Self::SGD => "$",
        }
    }

    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MYR => "MYR",
            Self::USD => "USD",
            Self::SGD => "SGD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        let price = Price::new(Decimal::new(299, 1), CurrencyCode::MYR);
        assert_eq!(price.display(), "RM29.90");
    }

    #[test]
    fn test_display_usd() {
        let price = Price::new(Decimal::from(5), CurrencyCode::USD);
        assert_eq!(price.display(), "$5.00");
    }

    #[test]
    fn test_default_currency_is_myr() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::MYR);
        assert_eq!(CurrencyCode::default().code(), "MYR");
    }
}
