//! Base exchange rate table.

use std::collections::HashMap;

use payflow_common::Currency;
use rust_decimal::Decimal;

use crate::error::{FxError, FxResult};

/// Base exchange rates against a single reference currency.
///
/// Each entry maps a currency to the number of its units bought by one
/// reference-currency unit. The reference currency itself always maps to
/// exactly 1. The table is constructed explicitly and injected into the
/// quote engine; it is immutable for the lifetime of any quote
/// computation.
#[derive(Debug, Clone)]
pub struct RateTable {
    reference: Currency,
    rates: HashMap<Currency, Decimal>,
}

impl RateTable {
    /// Create an empty table with the given reference currency, which is
    /// seeded at a rate of exactly 1.
    pub fn new(reference: Currency) -> Self {
        let mut rates = HashMap::new();
        rates.insert(reference.clone(), Decimal::ONE);
        Self { reference, rates }
    }

    /// Add a rate: one reference unit buys `value` units of `currency`.
    ///
    /// Rejects non-positive values, and any attempt to move the reference
    /// currency off 1.
    pub fn with_rate(mut self, currency: Currency, value: Decimal) -> FxResult<Self> {
        if value <= Decimal::ZERO {
            return Err(FxError::InvalidRate {
                currency,
                reason: "rate must be positive".to_string(),
            });
        }
        if currency == self.reference && value != Decimal::ONE {
            return Err(FxError::InvalidRate {
                currency,
                reason: "reference currency must map to 1".to_string(),
            });
        }
        self.rates.insert(currency, value);
        Ok(self)
    }

    /// Build the default USD-referenced table shipped with the platform.
    pub fn with_default_rates() -> FxResult<Self> {
        Self::new(Currency::usd())
            .with_rate(Currency::kes(), Decimal::new(12950, 2))
            .and_then(|t| t.with_rate(Currency::eur(), Decimal::new(92, 2)))
            .and_then(|t| t.with_rate(Currency::gbp(), Decimal::new(78, 2)))
            .and_then(|t| t.with_rate(Currency::cny(), Decimal::new(710, 2)))
    }

    /// The reference currency.
    pub fn reference(&self) -> &Currency {
        &self.reference
    }

    /// Look up the rate for a currency.
    pub fn rate(&self, currency: &Currency) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    /// Check whether a currency is quotable.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.rates.contains_key(currency)
    }

    /// Mid-market cross rate: how many units of `to` one unit of `from`
    /// buys, with no margin applied.
    pub fn cross_rate(&self, from: &Currency, to: &Currency) -> FxResult<Decimal> {
        let from_rate = self
            .rate(from)
            .ok_or_else(|| FxError::UnknownCurrency(from.clone()))?;
        let to_rate = self
            .rate(to)
            .ok_or_else(|| FxError::UnknownCurrency(to.clone()))?;
        Ok(to_rate / from_rate)
    }

    /// All quotable currencies with their rates, sorted by code.
    pub fn entries(&self) -> Vec<(Currency, Decimal)> {
        let mut entries: Vec<_> = self
            .rates
            .iter()
            .map(|(c, r)| (c.clone(), *r))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Number of quotable currencies.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True if only the reference currency is present.
    pub fn is_empty(&self) -> bool {
        self.rates.len() <= 1
    }
}
