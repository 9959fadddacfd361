use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, Filter, Log, I256, U256};
use log::debug;

use crate::error::ScanError;
use crate::models::TransferEvent;

/// Canonical ERC20 transfer event: two indexed addresses, one unindexed
/// uint256 amount.
const TRANSFER_SIG: &str = "Transfer(address,address,uint256)";

/// Fetch every Transfer log the token emitted since `from_block`.
///
/// The full set is materialized before aggregation starts. A failing node
/// is fatal here; retry policy belongs to the endpoint, not this client.
pub async fn fetch_transfer_logs(
    provider: &Provider<Http>,
    token: Address,
    from_block: u64,
) -> Result<Vec<Log>, ScanError> {
    let filter = Filter::new()
        .address(token)
        .event(TRANSFER_SIG)
        .from_block(from_block);

    let logs = provider.get_logs(&filter).await?;
    debug!("fetched {} transfer logs", logs.len());
    Ok(logs)
}

/// Decode one raw log into a [`TransferEvent`].
///
/// Topics 1 and 2 carry the from/to addresses in their lower 160 bits; the
/// data payload is the amount as a 32-byte big-endian integer. Anything
/// shaped differently violates the Transfer ABI and fails the run. Amounts
/// are additionally capped at `I256::MAX` so the ledger's signed
/// accumulation can never lose a bit.
pub fn decode_transfer(log: &Log) -> Result<TransferEvent, ScanError> {
    if log.topics.len() < 3 {
        return Err(ScanError::MalformedLog(format!(
            "expected 3 topics, got {}",
            log.topics.len()
        )));
    }

    let from = Address::from_slice(&log.topics[1].as_bytes()[12..]);
    let to = Address::from_slice(&log.topics[2].as_bytes()[12..]);

    if log.data.len() != 32 {
        return Err(ScanError::MalformedLog(format!(
            "expected a 32-byte amount payload, got {} bytes",
            log.data.len()
        )));
    }

    let amount = U256::from_big_endian(&log.data);
    if amount > I256::MAX.into_raw() {
        return Err(ScanError::MalformedLog(format!(
            "transfer amount {amount} exceeds the signed 256-bit range"
        )));
    }

    Ok(TransferEvent { from, to, amount })
}
