use anyhow::Context;
use bni_bridge::billing::{BillingClient, CreateBilling, UpdateBilling};
use bni_bridge::config::{BillingConfig, PaymentConfig};
use bni_bridge::core::SystemClock;
use bni_bridge::h2h::services::reference;
use bni_bridge::h2h::{H2hClient, H2hGateway, H2hPayload};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about = "Operator tool for the BNI Billing and H2H v2 APIs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an H2H OAuth bearer token
    Token {
        /// Discard the cached token and fetch a new one
        #[arg(long)]
        force: bool,
    },
    /// Generate a reference number
    Reference {
        #[arg(long, default_value = reference::CUSTOMER_REFERENCE_PREFIX)]
        prefix: String,
    },
    /// Account inquiry within BNI
    InhouseInquiry { payload: String },
    /// Account inquiry at another bank
    InterbankInquiry { payload: String },
    /// Execute a payment
    DoPayment { payload: String },
    /// Status of a submitted payment
    PaymentStatus { payload: String },
    /// eCollection (virtual account) operations
    #[command(subcommand)]
    Billing(BillingCommand),
}

#[derive(Subcommand)]
enum BillingCommand {
    /// Create a billing
    Create {
        #[arg(long)]
        trx_id: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        billing_type: String,
        #[arg(long)]
        customer_name: String,
        #[arg(long)]
        customer_email: Option<String>,
        #[arg(long)]
        customer_phone: Option<String>,
        #[arg(long)]
        virtual_account: Option<String>,
        #[arg(long)]
        datetime_expired: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        send_sms: bool,
    },
    /// Update a billing
    Update {
        #[arg(long)]
        trx_id: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        customer_name: String,
        #[arg(long)]
        customer_email: Option<String>,
        #[arg(long)]
        customer_phone: Option<String>,
        #[arg(long)]
        datetime_expired: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Inquire a billing
    Inquire {
        #[arg(long)]
        trx_id: String,
    },
    /// Encrypt a JSON payload into an envelope
    Encrypt { payload: String },
    /// Decrypt an envelope back into JSON
    Decrypt { envelope: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bni_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::Token { force } => {
            let token = h2h_client()?.get_oauth_token(force).await?;
            Value::from(token)
        }
        Command::Reference { prefix } => Value::from(reference::generate(&prefix, &SystemClock)),
        Command::InhouseInquiry { payload } => {
            Value::Object(h2h_client()?.get_inhouse_inquiry(parse_payload(&payload)?).await?)
        }
        Command::InterbankInquiry { payload } => {
            Value::Object(h2h_client()?.get_interbank_inquiry(parse_payload(&payload)?).await?)
        }
        Command::DoPayment { payload } => {
            Value::Object(h2h_client()?.do_payment(parse_payload(&payload)?).await?)
        }
        Command::PaymentStatus { payload } => {
            Value::Object(h2h_client()?.get_payment_status(parse_payload(&payload)?).await?)
        }
        Command::Billing(command) => run_billing(command).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_billing(command: BillingCommand) -> anyhow::Result<Value> {
    let client = billing_client()?;

    let response = match command {
        BillingCommand::Create {
            trx_id,
            amount,
            billing_type,
            customer_name,
            customer_email,
            customer_phone,
            virtual_account,
            datetime_expired,
            description,
            send_sms,
        } => {
            let request = CreateBilling {
                customer_email,
                customer_phone,
                virtual_account,
                datetime_expired,
                description,
                send_sms,
                ..CreateBilling::new(trx_id, amount, billing_type, customer_name)
            };
            client.create_billing(&request).await?
        }
        BillingCommand::Update {
            trx_id,
            amount,
            customer_name,
            customer_email,
            customer_phone,
            datetime_expired,
            description,
        } => {
            let request = UpdateBilling {
                customer_email,
                customer_phone,
                datetime_expired,
                description,
                ..UpdateBilling::new(trx_id, amount, customer_name)
            };
            client.update_billing(&request).await?
        }
        BillingCommand::Inquire { trx_id } => client.inquire_billing(&trx_id).await?,
        BillingCommand::Encrypt { payload } => {
            let payload: Value = serde_json::from_str(&payload).context("payload is not JSON")?;
            return Ok(Value::from(client.codec().encode(&payload)));
        }
        BillingCommand::Decrypt { envelope } => {
            return Ok(client.codec().decode(&envelope).unwrap_or(Value::Null));
        }
    };

    Ok(response.into_value())
}

fn h2h_client() -> anyhow::Result<H2hClient> {
    let config = PaymentConfig::from_env()?;
    config.validate()?;
    Ok(H2hClient::new(config.credential())?)
}

fn billing_client() -> anyhow::Result<BillingClient> {
    let config = BillingConfig::from_env()?;
    config.validate()?;
    Ok(BillingClient::new(config.credential())?)
}

fn parse_payload(raw: &str) -> anyhow::Result<H2hPayload> {
    match serde_json::from_str::<Value>(raw).context("payload is not JSON")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("payload must be a JSON object"),
    }
}
