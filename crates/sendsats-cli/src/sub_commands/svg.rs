use anyhow::Result;
use clap::Args;
use sendsats::{
    render_vector, Color, HttpClient, InvoiceCase, PayloadConvention, RenderOptions, Resolver,
};

use super::resolve_bolt11;

#[derive(Args)]
pub struct SvgSubCommand {
    /// Lightning Address
    pub address: String,
    /// Amount in sats
    #[arg(short, long)]
    pub amount: Option<u64>,
    /// Module colour, e.g. `#000000` or `black`
    #[arg(long)]
    pub module_color: Option<Color>,
    /// Background colour, e.g. `#ffffff` or `transparent`
    #[arg(long)]
    pub background_color: Option<Color>,
    /// Encode `lightning:<invoice>` rather than the bare invoice
    #[arg(long)]
    pub lightning_uri: bool,
}

pub async fn svg(
    resolver: &Resolver<HttpClient>,
    render_options: &RenderOptions,
    sub_command_args: &SvgSubCommand,
) -> Result<()> {
    let bolt11 = resolve_bolt11(
        resolver,
        &sub_command_args.address,
        sub_command_args.amount,
        InvoiceCase::Uppercase,
    )
    .await?;

    let options = RenderOptions {
        module_color: sub_command_args
            .module_color
            .unwrap_or(render_options.module_color),
        background_color: sub_command_args
            .background_color
            .unwrap_or(render_options.background_color),
        ..*render_options
    };

    let convention = if sub_command_args.lightning_uri {
        PayloadConvention::LightningUri
    } else {
        PayloadConvention::Bare
    };

    println!("{}", render_vector(&convention.apply(&bolt11), &options)?);
    Ok(())
}
