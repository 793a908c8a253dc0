use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sendsats::{
    render_raster, HttpClient, InvoiceCase, PayloadConvention, RenderOptions, Resolver,
};

use super::resolve_bolt11;

#[derive(Args)]
pub struct QrSubCommand {
    /// Lightning Address
    pub address: String,
    /// Amount in sats
    #[arg(short, long)]
    pub amount: Option<u64>,
    /// Write the PNG here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Encode `lightning:<invoice>` rather than the bare invoice
    #[arg(long)]
    pub lightning_uri: bool,
}

pub async fn qr(
    resolver: &Resolver<HttpClient>,
    render_options: &RenderOptions,
    sub_command_args: &QrSubCommand,
) -> Result<()> {
    let bolt11 = resolve_bolt11(
        resolver,
        &sub_command_args.address,
        sub_command_args.amount,
        InvoiceCase::Uppercase,
    )
    .await?;

    let convention = if sub_command_args.lightning_uri {
        PayloadConvention::LightningUri
    } else {
        PayloadConvention::Bare
    };

    let png = render_raster(&convention.apply(&bolt11), render_options)?;

    match &sub_command_args.output {
        Some(path) => {
            std::fs::write(path, &png)?;
            println!("Wrote {} bytes to {}", png.len(), path.display());
        }
        None => std::io::stdout().lock().write_all(&png)?,
    }

    Ok(())
}
