//! PayFlow FX Engine
//!
//! Foreign exchange quoting for cross-border payments.
//!
//! # Features
//!
//! - Cross rates derived from an injected, immutable rate table
//! - Configurable margin (basis points) and flat processing fee
//! - Time-bounded, immutable quote value objects
//!
//! # Example
//!
//! ```rust,ignore
//! use payflow_fx::{QuoteConfig, QuoteEngine, RateTable};
//!
//! let engine = QuoteEngine::new(RateTable::with_default_rates()?, QuoteConfig::default());
//!
//! // Quote 5000 USD into KES
//! let quote = engine.quote_str("usd", "kes", "5000")?;
//! assert!(quote.applied_rate < quote.mid_market_rate);
//! ```

pub mod engine;
pub mod error;
pub mod quote;
pub mod rates;

pub use engine::{QuoteConfig, QuoteEngine};
pub use error::FxError;
pub use quote::{FeeBreakdown, Quote};
pub use rates::RateTable;
