//! PayFlow Service
//!
//! The facade the request layer calls: parses and validates raw input,
//! then drives the quote engine and the ledger stores. Every operation
//! receives an already-authenticated `UserId` and returns either a value
//! or a typed [`payflow_common::PayflowError`].

pub mod config;
pub mod service;
pub mod validation;

pub use config::ServiceConfig;
pub use service::{CreateBeneficiaryRequest, CreateTransactionRequest, PaymentService};
