//! Currency rounding helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Brazilian Real
    Brl,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// Decimal places of the smallest unit.
    #[must_use]
    pub const fn precision(self) -> u32 {
        match self {
            Self::Brl | Self::Usd | Self::Eur => 2,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brl => write!(f, "BRL"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BRL" => Ok(Self::Brl),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

// Deserialized through `FromStr` so config sources may spell the code
// in any case (`LYVO__CURRENCY=brl`).
impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Rounds an amount to the given currency precision using Banker's
/// Rounding (midpoint-nearest-even).
#[must_use]
pub fn round_currency(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_round_currency_two_places() {
        assert_eq!(round_currency(dec!(10.005), 2), dec!(10.00));
        assert_eq!(round_currency(dec!(10.015), 2), dec!(10.02));
        assert_eq!(round_currency(dec!(10.016), 2), dec!(10.02));
        assert_eq!(round_currency(dec!(10), 2), dec!(10));
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Brl.to_string(), "BRL");
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("brl").unwrap(), Currency::Brl);
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert!(Currency::from_str("XXX").is_err());
    }

    #[test]
    fn test_currency_deserializes_any_case() {
        assert_eq!(
            serde_json::from_str::<Currency>("\"brl\"").unwrap(),
            Currency::Brl
        );
        assert_eq!(
            serde_json::from_str::<Currency>("\"EUR\"").unwrap(),
            Currency::Eur
        );
        assert!(serde_json::from_str::<Currency>("\"XXX\"").is_err());
    }

    #[test]
    fn test_precision() {
        assert_eq!(Currency::Brl.precision(), 2);
    }
}
