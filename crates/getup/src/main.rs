mod config;
mod date;
mod memos;
mod message;
mod quote;
mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::{error, info, warn};

use crate::{
    config::{Config, Credentials, open_config_or_default, write_default_config},
    memos::{MemosClient, PublishResult},
    message::{Message, MessageParts, compose},
    quote::QuoteProvider,
    version::short_version,
};

#[derive(Parser)]
#[command(version = short_version())]
struct Args {
    #[arg(long, default_value = "getup.toml")]
    config: PathBuf,

    #[arg(long)]
    init: bool,

    /// Print the message without posting it to Memos.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if args.init {
        write_default_config(&args.config)?;
        info!(path = ?args.config, "Created default configuration");
        return Ok(());
    }

    tracing::info!(version = short_version(), "getup version");

    let config = open_config_or_default(&args.config).context("Failed to load configuration")?;
    info!(timezone = %config.timezone, "Configuration loaded");

    let credentials = Credentials::from_env();
    run(&config, credentials.as_ref(), args.dry_run).await
}

/// Composes today's message, prints it and posts it to Memos.
///
/// Quote and publish failures are logged only; the run always completes.
async fn run(config: &Config, credentials: Option<&Credentials>, dry_run: bool) -> Result<()> {
    let quote_provider = QuoteProvider::new(&config.quote)?;
    let memos = MemosClient::new()?;

    let get_up_time = date::snapshot(config.timezone).local_timestamp;
    let quote = quote_provider.fetch().await;
    info!(source = ?quote.source, "Quote ready");
    let today = date::snapshot(config.timezone);
    info!(
        day_of_year = today.day_of_year,
        leap_year = today.is_leap_year,
        "Date snapshot taken"
    );

    let message = compose(&MessageParts {
        timestamp: &get_up_time,
        day_of_year: today.day_of_year,
        progress_bar: today.progress_bar(),
        quote: &quote.text,
    });

    print_message(&message);

    if dry_run {
        info!("Dry run, not posting to Memos");
        return Ok(());
    }

    let result = memos.publish(credentials, &message).await;
    report(&result);

    Ok(())
}

fn print_message(message: &Message) {
    println!("Generated Message:");
    println!("{message}");
}

fn report(result: &PublishResult) {
    match result {
        PublishResult::Success => info!("Successfully posted to Memos"),
        PublishResult::Skipped => warn!(
            "{} or {} not set, skipping Memos",
            config::MEMOS_URL_VAR,
            config::MEMOS_TOKEN_VAR
        ),
        PublishResult::Failure {
            status: Some(status),
            detail,
        } => error!(status, body = %detail, "Failed to post to Memos"),
        PublishResult::Failure {
            status: None,
            detail,
        } => error!(error = %detail, "Error posting to Memos"),
    }
}
