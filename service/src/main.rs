//! PayFlow Service Binary
//!
//! Wires the quote engine and ledger stores together and runs a short
//! payment flow against seeded demo data. The HTTP request layer lives
//! outside this repository and calls the same `PaymentService` surface.

use payflow_common::{Currency, TransactionKind, TransactionStatus, UserId, Wallet};
use payflow_fx::RateTable;
use payflow_service::{
    CreateBeneficiaryRequest, CreateTransactionRequest, PaymentService, ServiceConfig,
};
use rust_decimal::Decimal;
use serde_json::{json, Map};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting PayFlow service");

    // Load configuration
    let config = ServiceConfig::from_env();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let service = PaymentService::in_memory(&config, RateTable::with_default_rates()?);

    // Seed the demo account
    let demo_user = UserId::new("demo-user-id");
    service
        .seed_wallet(Wallet::new(
            demo_user.clone(),
            Currency::usd(),
            Decimal::from(50_000),
        ))
        .await?;

    info!(
        margin_bps = config.margin_bps,
        currencies = service.rates().len(),
        "Service ready"
    );

    // Walk a payment through its lifecycle
    let quote = service.get_quote("USD", "KES", "5000")?;
    info!(
        quote_id = %quote.id,
        target_amount = %quote.target_amount,
        spread = %quote.fees.spread,
        processing = %quote.fees.processing,
        expires_at = %quote.expires_at,
        "Demo quote"
    );

    let mut details = Map::new();
    details.insert("provider".to_string(), json!("M-PESA"));
    details.insert("phone".to_string(), json!("+254712345678"));
    let beneficiary = service
        .create_beneficiary(
            &demo_user,
            CreateBeneficiaryRequest {
                name: "Demo Beneficiary".to_string(),
                currency: "KES".to_string(),
                bank_details: details,
            },
        )
        .await?;

    let transaction = service
        .create_transaction(
            &demo_user,
            CreateTransactionRequest {
                kind: TransactionKind::Transfer,
                amount: quote.source_amount,
                currency: quote.from_currency.code().to_string(),
                beneficiary_id: Some(beneficiary.id),
            },
        )
        .await?;

    // Settlement is an external event; simulate its callback here
    let settled = service
        .update_status(transaction.id, TransactionStatus::Completed, None)
        .await?;
    info!(
        transaction_id = %settled.id,
        status = ?settled.status,
        "Demo transaction settled"
    );

    let history = service.list_transactions(&demo_user).await?;
    info!(transactions = history.len(), "Demo flow complete");

    Ok(())
}
