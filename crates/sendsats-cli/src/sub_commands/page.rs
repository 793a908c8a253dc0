use anyhow::{anyhow, Result};
use clap::Args;
use sendsats::{HttpClient, RenderOptions, Resolver};

#[derive(Args)]
pub struct PageSubCommand {
    /// Lightning Address
    pub address: String,
    /// Amount in sats
    #[arg(short, long)]
    pub amount: Option<u64>,
}

pub async fn page(
    resolver: &Resolver<HttpClient>,
    render_options: &RenderOptions,
    sub_command_args: &PageSubCommand,
) -> Result<()> {
    let page = resolver
        .pay_page(
            &sub_command_args.address,
            sub_command_args.amount,
            render_options,
        )
        .await
        .map_err(|e| {
            tracing::debug!("Pay page failed: {}", e);
            anyhow!(e.user_message())
        })?;

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
