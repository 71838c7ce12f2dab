//! Service configuration.

use chrono::Duration;
use payflow_fx::QuoteConfig;
use rust_decimal::Decimal;

/// Main service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Margin applied to mid-market rates, in basis points.
    pub margin_bps: u32,
    /// Flat processing fee in the reference currency.
    pub processing_fee: Decimal,
    /// Quote validity window in seconds.
    pub quote_validity_secs: i64,
    /// Log level.
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            margin_bps: 200, // 2%
            processing_fee: Decimal::new(500, 2),
            quote_validity_secs: 15 * 60,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(bps) = std::env::var("PAYFLOW_MARGIN_BPS") {
            if let Ok(bps) = bps.parse() {
                config.margin_bps = bps;
            }
        }

        if let Ok(fee) = std::env::var("PAYFLOW_PROCESSING_FEE") {
            if let Ok(fee) = fee.parse() {
                config.processing_fee = fee;
            }
        }

        if let Ok(secs) = std::env::var("PAYFLOW_QUOTE_VALIDITY_SECS") {
            if let Ok(secs) = secs.parse() {
                config.quote_validity_secs = secs;
            }
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.margin_bps >= 10_000 {
            return Err("Margin cannot be 100% or more".to_string());
        }

        if self.processing_fee < Decimal::ZERO {
            return Err("Processing fee cannot be negative".to_string());
        }

        if self.quote_validity_secs <= 0 {
            return Err("Quote validity must be positive".to_string());
        }

        Ok(())
    }

    /// Derive the quote engine configuration.
    pub fn quote_config(&self) -> QuoteConfig {
        QuoteConfig {
            margin_bps: self.margin_bps,
            processing_fee: self.processing_fee,
            validity: Duration::seconds(self.quote_validity_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.margin_bps, 200);
        assert_eq!(config.processing_fee, dec!(5.00));
    }

    #[test]
    fn test_invalid_config() {
        let mut config = ServiceConfig::default();
        config.margin_bps = 10_000;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.quote_validity_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_quote_config_derivation() {
        let config = ServiceConfig::default();
        let quote_config = config.quote_config();
        assert_eq!(quote_config.margin_bps, 200);
        assert_eq!(quote_config.validity, Duration::minutes(15));
    }
}
