use std::sync::Arc;

use ethers::contract::abigen;
use ethers::providers::{Http, Provider};
use ethers::types::Address;

use crate::error::ScanError;

abigen!(
    Erc20,
    r#"[
        function decimals() external view returns (uint8)
        function symbol() external view returns (string)
    ]"#
);

/// Decimal precision and display symbol read from the token contract.
#[derive(Debug, Clone)]
pub struct TokenMeta {
    pub decimals: u8,
    pub symbol: String,
}

/// Read `decimals()` and `symbol()` from the token's standard interface.
///
/// A contract that reverts or lacks either method fails the run: without a
/// declared precision there is nothing to normalize balances by.
pub async fn read_token(
    provider: Arc<Provider<Http>>,
    token: Address,
) -> Result<TokenMeta, ScanError> {
    let contract = Erc20::new(token, provider);
    let decimals = contract.decimals().call().await?;
    let symbol = contract.symbol().call().await?;
    Ok(TokenMeta { decimals, symbol })
}
