//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Engine configuration.
///
/// All fields have defaults so the engine runs without any config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Currency all amounts are denominated in.
    pub currency: Currency,
    /// Decimal places of the smallest currency unit.
    pub currency_precision: u32,
    /// Opening balance carried into the realized balance of every month.
    /// Given as a string in config sources (e.g. `"1500.00"`).
    #[serde(with = "rust_decimal::serde::str")]
    pub opening_balance: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Brl,
            currency_precision: Currency::Brl.precision(),
            opening_balance: Decimal::ZERO,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources are layered: `config/default`, `config/{RUN_MODE}`, then
    /// `LYVO__`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LYVO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.currency, Currency::Brl);
        assert_eq!(cfg.currency_precision, 2);
        assert_eq!(cfg.opening_balance, Decimal::ZERO);
    }
}
