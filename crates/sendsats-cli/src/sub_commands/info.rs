use anyhow::{anyhow, Result};
use clap::Args;
use sendsats::{HttpClient, LightningAddress, Resolver};
use serde_json::json;

#[derive(Args)]
pub struct InfoSubCommand {
    /// Lightning Address
    pub address: String,
}

pub async fn info(
    resolver: &Resolver<HttpClient>,
    sub_command_args: &InfoSubCommand,
) -> Result<()> {
    let address: LightningAddress = sub_command_args
        .address
        .parse()
        .map_err(|e: sendsats::Error| anyhow!(e.user_message()))?;

    let descriptor = resolver
        .fetch_descriptor(&sub_command_args.address)
        .await
        .map_err(|e| {
            tracing::debug!("Descriptor fetch failed: {}", e);
            anyhow!(e.user_message())
        })?;

    let info = json!({
        "address": address.to_string(),
        "lnurlp_url": address.lnurlp_url(),
        "min_sats": descriptor.min_sats(),
        "max_sats": descriptor.max_sats(),
        "descriptor": descriptor,
    });

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
