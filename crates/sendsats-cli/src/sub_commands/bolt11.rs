use anyhow::Result;
use clap::Args;
use sendsats::{HttpClient, InvoiceCase, Resolver};
use serde_json::json;

use super::resolve_bolt11;

#[derive(Args)]
pub struct Bolt11SubCommand {
    /// Lightning Address
    pub address: String,
    /// Amount in sats, the service minimum when absent or not above it
    #[arg(short, long)]
    pub amount: Option<u64>,
    /// Uppercase the invoice instead of returning it as received
    #[arg(long)]
    pub uppercase: bool,
}

pub async fn bolt11(
    resolver: &Resolver<HttpClient>,
    sub_command_args: &Bolt11SubCommand,
) -> Result<()> {
    let invoice_case = if sub_command_args.uppercase {
        InvoiceCase::Uppercase
    } else {
        InvoiceCase::AsReceived
    };

    let bolt11 = resolve_bolt11(
        resolver,
        &sub_command_args.address,
        sub_command_args.amount,
        invoice_case,
    )
    .await?;

    println!("{}", json!({ "bolt11": bolt11 }));
    Ok(())
}
