use ethers::types::{Address, U256};
use rust_decimal::Decimal;
use serde::Serialize;

/// A single decoded ERC20 Transfer event.
///
/// `amount` is the raw value in the token's smallest unit; no decimal
/// scaling has been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

/// One holder in the final ranked snapshot.
#[derive(Debug, Serialize)]
pub struct HolderRecord {
    /// EIP-55 checksummed address.
    pub address: String,
    /// Balance at the token's declared decimal scale.
    pub amount: Decimal,
    /// Reverse-ENS name, when one is registered and lookup succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}
