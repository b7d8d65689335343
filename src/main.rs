//! CISL Dashboard CLI
//!
//! Drives the invoice pipeline actions against the invoice service and
//! prints the configured UI route and sidebar tables.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;

use cisl_dashboard::credentials::{CredentialProvider, JsonFileCredentials, NoCredentials};
use cisl_dashboard::io::ReqwestHttpClient;
use cisl_dashboard::model::InvoiceSubmission;
use cisl_dashboard::{
    dashboard_routes, load_config, new_state_handle, sidebar_routes, ApiOutcome, Config,
    DashboardActions, DashboardError,
};

#[derive(Parser)]
#[command(name = "cisl-dashboard")]
#[command(about = "CISL invoice dashboard client")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Invoice service base URL (overrides config file)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List imported invoices
    Imports,
    /// Transform one imported invoice into signing shape
    Transform { invoice_id: String },
    /// Transform, sign, and transmit one imported invoice
    Sign { invoice_id: String },
    /// Transmit a signed invoice by IRN
    Transmit { irn: String },
    /// Fetch the QR code for a signed invoice
    Qr { irn: String },
    /// List incoming invoices
    Incoming,
    /// Print the UI route and sidebar tables
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(api_base_url) = args.api_base_url {
        config.api_base_url = api_base_url;
    }

    run(config, args.command).await?;
    Ok(())
}

async fn run(config: Config, command: Command) -> cisl_dashboard::Result<()> {
    let credentials: Arc<dyn CredentialProvider> = match &config.credentials_path {
        Some(path) => Arc::new(JsonFileCredentials::load(path)?),
        None => Arc::new(NoCredentials),
    };
    let state = new_state_handle();
    let actions = DashboardActions::new(
        &config,
        Arc::new(ReqwestHttpClient::new()),
        credentials,
        state,
    );

    match command {
        Command::Imports => {
            let envelope = actions.fetch_business_invoices().await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Command::Transform { invoice_id } => {
            report(actions.transform_business_invoice(&invoice_id).await, |e| {
                serde_json::to_string_pretty(e).unwrap_or_default()
            })?;
        }
        Command::Sign { invoice_id } => {
            let transformed = match actions.transform_business_invoice(&invoice_id).await {
                ApiOutcome::Success(envelope) => envelope.transformed,
                ApiOutcome::Failure(failure) => {
                    return Err(DashboardError::Http(format!(
                        "Transform of {} failed: {}",
                        invoice_id, failure
                    )));
                }
            };
            let submission = InvoiceSubmission {
                invoice_id,
                transformed_invoice: transformed,
            };
            report(actions.submit_business_invoice(&submission).await, |r| {
                r.body.clone()
            })?;
        }
        Command::Transmit { irn } => {
            report(actions.transmit_business_invoice(&irn).await, |r| {
                r.body.clone()
            })?;
        }
        Command::Qr { irn } => {
            report(actions.fetch_qr_code(&irn).await, |r| r.body.clone())?;
        }
        Command::Incoming => {
            report(actions.fetch_incoming_invoices().await, |r| r.body.clone())?;
        }
        Command::Routes => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "routes": dashboard_routes(),
                    "sidebar": sidebar_routes(),
                }))?
            );
        }
    }

    Ok(())
}

fn report<T>(
    outcome: ApiOutcome<T>,
    render: impl FnOnce(&T) -> String,
) -> cisl_dashboard::Result<()> {
    match outcome {
        ApiOutcome::Success(value) => {
            println!("{}", render(&value));
            Ok(())
        }
        ApiOutcome::Failure(failure) => Err(DashboardError::Http(failure.to_string())),
    }
}
