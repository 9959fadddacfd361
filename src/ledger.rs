use std::collections::BTreeMap;

use ethers::types::{Address, I256};

use crate::models::TransferEvent;

/// Current balance per address, signed: an address first seen on the
/// sending side of a partial history legitimately goes negative.
///
/// A BTreeMap keys by address bytes, so iteration order is deterministic
/// and independent of how the events arrived.
pub type BalanceLedger = BTreeMap<Address, I256>;

/// Fold a transfer history into per-address balances.
///
/// Each event debits `from` and credits `to`, zero-initializing entries on
/// first sight. The all-zero address stands for mints and burns rather than
/// a real holder, so its entry is dropped after the fold whatever its value.
pub fn aggregate(events: &[TransferEvent]) -> BalanceLedger {
    let mut balances = BalanceLedger::new();

    for event in events {
        // decode_transfer caps amounts at I256::MAX, so the reinterpret
        // is lossless.
        let amount = I256::from_raw(event.amount);
        *balances.entry(event.from).or_insert_with(I256::zero) -= amount;
        *balances.entry(event.to).or_insert_with(I256::zero) += amount;
    }

    balances.remove(&Address::zero());
    balances
}
