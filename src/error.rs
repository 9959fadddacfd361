use ethers::contract::ContractError;
use ethers::providers::{Http, Provider, ProviderError};
use thiserror::Error;

/// Errors raised while building a holder snapshot.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The token contract reverted or does not implement the method.
    #[error("token metadata call failed: {0}")]
    Metadata(#[from] ContractError<Provider<Http>>),

    /// The node could not serve the log query.
    #[error("log retrieval failed: {0}")]
    Rpc(#[from] ProviderError),

    /// A log from the node does not match the Transfer ABI shape.
    #[error("malformed transfer log: {0}")]
    MalformedLog(String),

    /// A balance cannot be represented exactly at the token's scale.
    #[error("balance of {address} is outside the representable decimal range")]
    Normalize { address: String },

    #[error("could not serialize the holder list: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write the holder list: {0}")]
    Write(#[from] std::io::Error),
}
