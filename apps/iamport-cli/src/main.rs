use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iamport_client::apis::Iamport;
use iamport_client::models::{CancelPaymentRequest, Token};
use iamport_client::{ClientOptions, ClientOptionsConfig, IamportClient, TransportConfig};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Iamport payment gateway client
#[derive(Parser)]
#[command(name = "iamport")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file (`IAMPORT_*` variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and print it with secrets redacted
    Check,
    /// Fetch an access token with the configured credentials
    Token {
        /// Print the raw token value
        #[arg(long)]
        reveal: bool,
    },
    /// Look up a payment by `imp_uid`
    Payment { imp_uid: String },
    /// Look up a payment by `merchant_uid`
    FindPayment { merchant_uid: String },
    /// Cancel a payment, fully unless --amount is given
    Cancel {
        imp_uid: String,
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Look up a billing-key customer
    Customer { customer_uid: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    if let Some(path) = cli.config.as_deref()
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let options = load_options(cli.config.as_deref())?;
    tracing::debug!(base_url = %options.base_url(), "configuration loaded");

    if matches!(cli.command, Commands::Check) {
        print_options(&options);
        return Ok(());
    }

    let transport = TransportConfig {
        request_timeout: Duration::from_secs(cli.timeout),
        ..TransportConfig::default()
    };
    let client = Arc::new(
        IamportClient::with_transport_config(options, transport)
            .context("failed to build gateway client")?,
    );
    let iamport = Iamport::new(Arc::clone(&client));

    let result = run(&iamport, cli.command).await;
    client.dispose();
    if let Err(e) = &result {
        tracing::error!(error = %e, "command failed");
    }
    result
}

async fn run(iamport: &Iamport, command: Commands) -> Result<()> {
    match command {
        Commands::Check => Ok(()),
        Commands::Token { reveal } => {
            let token = iamport.client().authorize().await?;
            print_token(&token, reveal);
            Ok(())
        }
        Commands::Payment { imp_uid } => {
            let payment = iamport.payments.get(&imp_uid).await?;
            print_json(&payment)
        }
        Commands::FindPayment { merchant_uid } => {
            let payment = iamport.payments.find_by_merchant_uid(&merchant_uid).await?;
            print_json(&payment)
        }
        Commands::Cancel {
            imp_uid,
            amount,
            reason,
        } => {
            let mut request = CancelPaymentRequest::by_imp_uid(imp_uid);
            if let Some(amount) = amount {
                request = request.with_amount(amount);
            }
            if let Some(reason) = reason {
                request = request.with_reason(reason);
            }
            let payment = iamport.payments.cancel(&request).await?;
            print_json(&payment)
        }
        Commands::Customer { customer_uid } => {
            let customer = iamport.subscriptions.get_customer(&customer_uid).await?;
            print_json(&customer)
        }
    }
}

fn load_options(config: Option<&Path>) -> Result<ClientOptions> {
    let figment = ClientOptionsConfig::figment(config);
    ClientOptions::from_figment(&figment).context("invalid gateway configuration")
}

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_options(options: &ClientOptions) {
    println!("account_id:                {}", options.account_id());
    println!("api_key:                   {}", options.api_key());
    println!("api_secret:                {}", options.api_secret());
    println!("authorization_header_name: {}", options.authorization_header_name());
    println!("base_url:                  {}", options.base_url());
}

fn print_token(token: &Token, reveal: bool) {
    let value = if reveal {
        token.access_token().expose().to_owned()
    } else {
        token.access_token().to_string()
    };
    println!("access_token: {value}");
    println!("expired_at:   {}", token.expired_at());
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
