//! Quote value objects.

use chrono::{DateTime, Duration, Utc};
use payflow_common::{Currency, Money, QuoteId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee breakdown reported alongside a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Value lost to the margin, denominated in the target currency.
    pub spread: Money,
    /// Flat processing fee, denominated in the reference currency.
    /// Informational only: never deducted from the target amount.
    pub processing: Money,
}

/// A time-bounded, immutable FX quote.
///
/// Created per request and never persisted; re-deriving a quote requires
/// recomputation at the same rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Unique quote identifier for client-side reference.
    pub id: QuoteId,
    /// Source currency.
    pub from_currency: Currency,
    /// Target currency.
    pub to_currency: Currency,
    /// Amount being converted, in the source currency.
    pub source_amount: Decimal,
    /// Mid-market cross rate, no margin.
    pub mid_market_rate: Decimal,
    /// Rate actually applied, margin included.
    pub applied_rate: Decimal,
    /// `source_amount * applied_rate`, in the target currency.
    pub target_amount: Decimal,
    /// Spread and flat fee detail.
    pub fees: FeeBreakdown,
    /// When the quote was computed.
    pub created_at: DateTime<Utc>,
    /// When the quote stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Quote {
    /// Check if the quote is still within its validity window.
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }

    /// Get remaining time until expiry.
    pub fn time_remaining(&self) -> Duration {
        let remaining = self.expires_at.signed_duration_since(Utc::now());
        if remaining < Duration::zero() {
            Duration::zero()
        } else {
            remaining
        }
    }

    /// The target amount as typed money.
    pub fn target_money(&self) -> Money {
        Money::new(self.target_amount, self.to_currency.clone())
    }
}
