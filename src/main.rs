mod ens;
mod error;
mod ledger;
mod logs;
mod metadata;
mod models;
mod output;
mod snapshot;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use ethers::providers::{Http, Provider};
use ethers::types::Address;
use ethers::utils::to_checksum;
use log::{debug, info};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Contract address of the ERC20 token to scan
    address: String,

    /// Resolve an ENS domain for each holder
    #[arg(long)]
    ens: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Ethereum JSON-RPC endpoint. Falls back to the ETHEREUM_NODE env var.
    #[arg(long, env = "ETHEREUM_NODE")]
    rpc: Option<String>,

    /// First block to scan for transfer events
    #[arg(long, default_value_t = 0)]
    from_block: u64,

    /// Directory the holder list is written under
    #[arg(long, default_value = "data")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.debug { "debug" } else { "info" }),
    )
    .init();

    let Some(rpc_url) = cli.rpc else {
        bail!("provide an RPC endpoint via --rpc or the ETHEREUM_NODE env var");
    };

    let token: Address = cli
        .address
        .parse()
        .with_context(|| format!("invalid token address: {}", cli.address))?;
    let token_checksummed = to_checksum(&token, None);

    let provider = Arc::new(Provider::<Http>::try_from(rpc_url.as_str())?);

    info!("token address: {token_checksummed}");

    let meta = metadata::read_token(provider.clone(), token).await?;
    info!("token decimals: {}", meta.decimals);
    info!("token symbol: {}", meta.symbol);

    let raw_logs = logs::fetch_transfer_logs(&provider, token, cli.from_block).await?;
    let events = raw_logs
        .iter()
        .map(logs::decode_transfer)
        .collect::<Result<Vec<_>, _>>()?;

    let balances = ledger::aggregate(&events);
    info!("token holders: {}", balances.len());

    debug!("normalizing amounts to {} decimals", meta.decimals);
    let mut holders = snapshot::rank(balances, meta.decimals)?;

    if cli.ens {
        info!("resolving ens domains for holders");
        ens::annotate(provider.clone(), &mut holders).await;
    }

    let path = output::write_members(&cli.output, &token_checksummed, &holders)?;
    info!("members written to: {}", path.display());

    Ok(())
}
