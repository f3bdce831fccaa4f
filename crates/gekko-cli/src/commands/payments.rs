//! `gekko payments` - payment operations.

use anyhow::Result;
use clap::Subcommand;
use gekko_api::CreatePayment;
use gekko_settings::GekkoSettings;

/// Payment subcommands.
#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// Create a payment intent.
    Create {
        /// Amount in minor units (cents).
        #[arg(short, long)]
        amount: i64,
        /// ISO 4217 currency code.
        #[arg(short, long, default_value = "USD")]
        currency: String,
    },
}

/// Dispatch a payments subcommand.
pub async fn run(command: PaymentsCommand, settings: &GekkoSettings) -> Result<()> {
    match command {
        PaymentsCommand::Create { amount, currency } => create(amount, currency, settings).await,
    }
}

async fn create(amount: i64, currency: String, settings: &GekkoSettings) -> Result<()> {
    let client = super::api_client(settings)?;
    let payment = client
        .create_payment(&CreatePayment {
            amount,
            currency,
            zone: settings.api.zone.clone(),
        })
        .await?;
    println!(
        "Payment created: {} ({} {}, status {})",
        payment.id, payment.amount, payment.currency, payment.status
    );
    println!("Watch its events with: gekko listen -f payment");
    Ok(())
}
