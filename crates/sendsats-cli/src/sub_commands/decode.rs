use anyhow::Result;
use clap::Args;
use sendsats_lnbits::LNbitsClient;
use serde_json::json;

#[derive(Args)]
pub struct DecodeSubCommand {
    /// BOLT11 invoice
    pub bolt11: String,
}

pub async fn decode(client: &LNbitsClient, sub_command_args: &DecodeSubCommand) -> Result<()> {
    let payment_hash = client
        .decode_to_payment_hash(&sub_command_args.bolt11)
        .await?;

    println!("{}", json!({ "payment_hash": payment_hash }));
    Ok(())
}
