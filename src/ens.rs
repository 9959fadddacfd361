use std::collections::HashMap;
use std::sync::Arc;

use ethers::providers::{Http, Middleware, Provider};
use ethers::types::Address;
use log::{debug, info};
use tokio::task::JoinSet;

use crate::models::HolderRecord;

/// Attach reverse-ENS names to the ranked holders.
///
/// Each lookup is an independent read, so they are fanned out as separate
/// tasks and joined in whatever order they finish. A lookup that fails or
/// finds no registered name leaves that record's domain absent; it never
/// aborts the run or the other lookups.
pub async fn annotate(provider: Arc<Provider<Http>>, holders: &mut [HolderRecord]) {
    let mut lookups = JoinSet::new();

    for record in holders.iter() {
        let Ok(address) = record.address.parse::<Address>() else {
            continue;
        };
        let provider = provider.clone();
        lookups.spawn(async move { (address, provider.lookup_address(address).await.ok()) });
    }

    let mut domains: HashMap<Address, String> = HashMap::new();
    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok((address, Some(domain))) => {
                domains.insert(address, domain);
            }
            Ok((_, None)) => {}
            Err(err) => debug!("ens lookup task failed: {err}"),
        }
    }

    for record in holders.iter_mut() {
        if let Ok(address) = record.address.parse::<Address>() {
            record.domain = domains.remove(&address);
        }
        match &record.domain {
            Some(domain) => info!("ens name {}: {}", record.address, domain),
            None => debug!("no ens name for {}", record.address),
        }
    }
}
