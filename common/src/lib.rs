//! PayFlow Common Types
//!
//! This crate contains shared types used across the PayFlow platform,
//! including identifiers, monetary types, the transaction data model
//! with its lifecycle state machine, and error definitions.

pub mod identifiers;
pub mod monetary;
pub mod transaction;
pub mod error;
pub mod time;

pub use identifiers::*;
pub use monetary::*;
pub use transaction::*;
pub use error::*;
pub use time::*;
