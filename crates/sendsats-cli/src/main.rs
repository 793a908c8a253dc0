//! sendsats command line tool
#![warn(rustdoc::bare_urls)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sendsats::{RenderOptions, Resolver};
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, Level};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

mod config;
mod env_vars;
mod sub_commands;

/// Lightning Address to invoice and QR code
#[derive(Parser)]
#[command(name = "sendsats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Logging level, `RUST_LOG` takes precedence
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the invoice for an address as JSON
    Bolt11(sub_commands::bolt11::Bolt11SubCommand),
    /// Write a PNG QR code of the invoice for an address
    Qr(sub_commands::qr::QrSubCommand),
    /// Print an SVG QR code of the invoice for an address
    Svg(sub_commands::svg::SvgSubCommand),
    /// Print pay page data (invoice, descriptor, embedded QR codes) as JSON
    Page(sub_commands::page::PageSubCommand),
    /// Show the LNURL-pay descriptor for an address
    Info(sub_commands::info::InfoSubCommand),
    /// Decode an invoice to its payment hash via LNbits
    Decode(sub_commands::decode::DecodeSubCommand),
    /// Check whether a payment has been settled via LNbits
    Check(sub_commands::check::CheckSubCommand),
    /// Pay an invoice from the LNbits wallet
    Pay(sub_commands::pay::PaySubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);

    run(args, dispatch.clone()).with_subscriber(dispatch).await
}

async fn run(args: Cli, dispatch: Dispatch) -> Result<()> {
    let settings = Settings::new(args.config.clone())?;

    let http_client = settings.http.client()?;
    let resolver = Resolver::with_transport(http_client.clone()).with_dispatch(dispatch.clone());
    let render_options = RenderOptions::from(&settings.qr);

    match &args.command {
        Commands::Bolt11(sub_command_args) => {
            sub_commands::bolt11::bolt11(&resolver, sub_command_args).await
        }
        Commands::Qr(sub_command_args) => {
            sub_commands::qr::qr(&resolver, &render_options, sub_command_args).await
        }
        Commands::Svg(sub_command_args) => {
            sub_commands::svg::svg(&resolver, &render_options, sub_command_args).await
        }
        Commands::Page(sub_command_args) => {
            sub_commands::page::page(&resolver, &render_options, sub_command_args).await
        }
        Commands::Info(sub_command_args) => {
            sub_commands::info::info(&resolver, sub_command_args).await
        }
        Commands::Decode(sub_command_args) => {
            let client = settings.lnbits.client(http_client)?.with_dispatch(dispatch);
            sub_commands::decode::decode(&client, sub_command_args).await
        }
        Commands::Check(sub_command_args) => {
            let client = settings.lnbits.client(http_client)?.with_dispatch(dispatch);
            sub_commands::check::check(&client, sub_command_args).await
        }
        Commands::Pay(sub_command_args) => {
            let client = settings.lnbits.client(http_client)?.with_dispatch(dispatch);
            sub_commands::pay::pay(&client, sub_command_args).await
        }
    }
}
