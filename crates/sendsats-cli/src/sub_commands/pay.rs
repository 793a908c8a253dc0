use anyhow::Result;
use clap::Args;
use sendsats_lnbits::LNbitsClient;

#[derive(Args)]
pub struct PaySubCommand {
    /// BOLT11 invoice
    pub bolt11: String,
}

pub async fn pay(client: &LNbitsClient, sub_command_args: &PaySubCommand) -> Result<()> {
    let receipt = client.pay_invoice(&sub_command_args.bolt11).await?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
