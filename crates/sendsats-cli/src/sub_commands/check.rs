use anyhow::Result;
use clap::Args;
use sendsats_lnbits::LNbitsClient;

#[derive(Args)]
pub struct CheckSubCommand {
    /// Payment hash, as printed by `decode`
    pub payment_hash: String,
}

pub async fn check(client: &LNbitsClient, sub_command_args: &CheckSubCommand) -> Result<()> {
    let status = client.check_status(&sub_command_args.payment_hash).await?;

    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
