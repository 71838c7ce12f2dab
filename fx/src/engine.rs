//! Quote engine implementation.

use chrono::{Duration, Utc};
use payflow_common::{Currency, Money, QuoteId};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{FxError, FxResult};
use crate::quote::{FeeBreakdown, Quote};
use crate::rates::RateTable;

/// Configuration for the quote engine.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Margin applied to the mid-market rate, in basis points.
    pub margin_bps: u32,
    /// Flat processing fee, denominated in the rate table's reference
    /// currency.
    pub processing_fee: Decimal,
    /// How long a quote remains valid.
    pub validity: Duration,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            margin_bps: 200, // 2% margin
            processing_fee: Decimal::new(500, 2),
            validity: payflow_common::constants::quote_validity(),
        }
    }
}

/// The quote engine.
///
/// Holds an immutable rate table and a fixed margin/fee configuration, so
/// for the lifetime of the engine the rate fields of a quote are a pure
/// function of the inputs. Only the quote id and timestamps vary per call.
pub struct QuoteEngine {
    rates: RateTable,
    config: QuoteConfig,
}

impl QuoteEngine {
    /// Create a new quote engine over the given rate table.
    pub fn new(rates: RateTable, config: QuoteConfig) -> Self {
        Self { rates, config }
    }

    /// The margin as a fraction (e.g. 200 bps -> 0.02).
    pub fn margin_fraction(&self) -> Decimal {
        Decimal::from(self.config.margin_bps) / Decimal::from(10_000)
    }

    /// The underlying rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Compute a quote for converting `source_amount` of `from` into `to`.
    ///
    /// The applied rate is always less favorable to the sender than
    /// mid-market; the spread between the two is the platform's revenue.
    /// The flat processing fee is reported in the breakdown but never
    /// deducted from the target amount.
    #[instrument(skip(self), fields(from = %from, to = %to, source_amount = %source_amount))]
    pub fn quote(
        &self,
        from: Currency,
        to: Currency,
        source_amount: Decimal,
    ) -> FxResult<Quote> {
        if source_amount <= Decimal::ZERO {
            return Err(FxError::InvalidAmount(format!(
                "amount must be positive, got {source_amount}"
            )));
        }

        let base_rate = self.rates.cross_rate(&from, &to)?;
        let applied_rate = base_rate * (Decimal::ONE - self.margin_fraction());
        let target_amount = source_amount * applied_rate;

        // Difference of the two already-computed products, so that
        // spread + target == source * base_rate holds exactly.
        let spread = source_amount * base_rate - target_amount;

        let now = Utc::now();
        let quote = Quote {
            id: QuoteId::new(),
            from_currency: from,
            to_currency: to.clone(),
            source_amount,
            mid_market_rate: base_rate,
            applied_rate,
            target_amount,
            fees: FeeBreakdown {
                spread: Money::new(spread, to),
                processing: Money::new(self.config.processing_fee, self.rates.reference().clone()),
            },
            created_at: now,
            expires_at: now + self.config.validity,
        };

        debug!(
            quote_id = %quote.id,
            mid = %quote.mid_market_rate,
            applied = %quote.applied_rate,
            target = %quote.target_amount,
            "Quote computed"
        );

        Ok(quote)
    }

    /// Quote from raw request parameters.
    ///
    /// Currency codes are case-insensitive; the amount must parse as a
    /// decimal. Malformed input never coerces to zero.
    pub fn quote_str(&self, from: &str, to: &str, amount: &str) -> FxResult<Quote> {
        let source_amount: Decimal = amount
            .trim()
            .parse()
            .map_err(|_| FxError::InvalidAmount(format!("unparsable amount: {amount:?}")))?;
        self.quote(Currency::new(from), Currency::new(to), source_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn default_engine() -> QuoteEngine {
        QuoteEngine::new(RateTable::with_default_rates().unwrap(), QuoteConfig::default())
    }

    #[test]
    fn test_usd_to_kes_worked_example() {
        let engine = default_engine();
        let quote = engine
            .quote(Currency::usd(), Currency::kes(), dec!(5000))
            .unwrap();

        assert_eq!(quote.mid_market_rate, dec!(129.50));
        assert_eq!(quote.applied_rate, dec!(126.9100));
        assert_eq!(quote.target_amount, dec!(634550.0000));
        assert_eq!(quote.fees.spread.value, dec!(12950.0000));
        assert_eq!(quote.fees.spread.currency, Currency::kes());
        assert_eq!(quote.fees.processing.value, dec!(5.00));
        assert_eq!(quote.fees.processing.currency, Currency::usd());
    }

    #[test]
    fn test_identity_pair() {
        let engine = default_engine();
        let quote = engine
            .quote(Currency::usd(), Currency::usd(), dec!(100))
            .unwrap();

        assert_eq!(quote.mid_market_rate, Decimal::ONE);
        // 100 * (1 - 0.02)
        assert_eq!(quote.target_amount, dec!(98.00));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let engine = default_engine();

        let result = engine.quote(Currency::new("XYZ"), Currency::kes(), dec!(100));
        assert!(matches!(result, Err(FxError::UnknownCurrency(c)) if c.code() == "XYZ"));

        let result = engine.quote(Currency::usd(), Currency::new("XYZ"), dec!(100));
        assert!(matches!(result, Err(FxError::UnknownCurrency(_))));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let engine = default_engine();

        for amount in [dec!(0), dec!(-1), dec!(-0.01)] {
            let result = engine.quote(Currency::usd(), Currency::kes(), amount);
            assert!(matches!(result, Err(FxError::InvalidAmount(_))));
        }
    }

    #[test]
    fn test_quote_str_parses_and_normalizes() {
        let engine = default_engine();
        let quote = engine.quote_str("usd", "kes", " 5000 ").unwrap();

        assert_eq!(quote.from_currency, Currency::usd());
        assert_eq!(quote.to_currency, Currency::kes());
        assert_eq!(quote.target_amount, dec!(634550.0000));
    }

    #[test]
    fn test_quote_str_rejects_malformed_amount() {
        let engine = default_engine();

        for amount in ["", "abc", "12.3.4", "NaN", "1e999"] {
            let result = engine.quote_str("USD", "KES", amount);
            assert!(
                matches!(result, Err(FxError::InvalidAmount(_))),
                "expected InvalidAmount for {amount:?}"
            );
        }
    }

    #[test]
    fn test_processing_fee_is_informational() {
        let table = RateTable::with_default_rates().unwrap();

        let free = QuoteEngine::new(
            table.clone(),
            QuoteConfig {
                processing_fee: Decimal::ZERO,
                ..Default::default()
            },
        );
        let fee_heavy = QuoteEngine::new(
            table,
            QuoteConfig {
                processing_fee: dec!(500.00),
                ..Default::default()
            },
        );

        let a = free.quote(Currency::usd(), Currency::kes(), dec!(5000)).unwrap();
        let b = fee_heavy
            .quote(Currency::usd(), Currency::kes(), dec!(5000))
            .unwrap();

        // The flat fee changes the breakdown, never the converted amount
        assert_eq!(a.target_amount, b.target_amount);
        assert_eq!(b.fees.processing.value, dec!(500.00));
    }

    #[test]
    fn test_rate_fields_deterministic() {
        let engine = default_engine();
        let a = engine.quote(Currency::eur(), Currency::kes(), dec!(250)).unwrap();
        let b = engine.quote(Currency::eur(), Currency::kes(), dec!(250)).unwrap();

        assert_eq!(a.mid_market_rate, b.mid_market_rate);
        assert_eq!(a.applied_rate, b.applied_rate);
        assert_eq!(a.target_amount, b.target_amount);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_expiry_window() {
        let engine = default_engine();
        let quote = engine.quote(Currency::usd(), Currency::kes(), dec!(1)).unwrap();

        assert_eq!(quote.expires_at - quote.created_at, Duration::minutes(15));
        assert!(quote.is_valid());
    }

    fn quotable_currency() -> impl Strategy<Value = Currency> {
        prop_oneof![
            Just(Currency::usd()),
            Just(Currency::kes()),
            Just(Currency::eur()),
            Just(Currency::gbp()),
            Just(Currency::cny()),
        ]
    }

    proptest! {
        #[test]
        fn prop_applied_rate_strictly_below_mid(
            from in quotable_currency(),
            to in quotable_currency(),
            cents in 1i64..=1_000_000_000,
        ) {
            let engine = default_engine();
            let amount = Decimal::new(cents, 2);
            let quote = engine.quote(from, to, amount).unwrap();

            prop_assert!(quote.applied_rate < quote.mid_market_rate);
            prop_assert_eq!(quote.target_amount, amount * quote.applied_rate);
        }

        #[test]
        fn prop_spread_plus_target_equals_mid_value(
            from in quotable_currency(),
            to in quotable_currency(),
            cents in 1i64..=1_000_000_000,
        ) {
            let engine = default_engine();
            let amount = Decimal::new(cents, 2);
            let quote = engine.quote(from, to, amount).unwrap();

            // Exact up to decimal rescaling at the precision limit
            let mid_value = amount * quote.mid_market_rate;
            let drift = (quote.fees.spread.value + quote.target_amount - mid_value).abs();
            prop_assert!(drift <= mid_value * Decimal::new(1, 9));
        }
    }
}
