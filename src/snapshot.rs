use ethers::types::{Address, I256};
use ethers::utils::to_checksum;
use rust_decimal::Decimal;

use crate::error::ScanError;
use crate::ledger::BalanceLedger;
use crate::models::HolderRecord;

/// Turn a balance ledger into the ranked holder list.
///
/// Raw balances are scaled down by `10^decimals` with exact decimal
/// arithmetic and sorted largest first. The sort is stable, so addresses
/// with equal balances keep the ledger's iteration order and repeated runs
/// over the same history produce identical output.
pub fn rank(balances: BalanceLedger, decimals: u8) -> Result<Vec<HolderRecord>, ScanError> {
    let mut entries: Vec<(Address, I256)> = balances.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .map(|(address, balance)| {
            Ok(HolderRecord {
                address: to_checksum(&address, None),
                amount: normalize(address, balance, decimals)?,
                domain: None,
            })
        })
        .collect()
}

/// Exact conversion of a raw balance to the token's display scale.
///
/// Floating point would shave significant digits off large balances, so the
/// raw integer becomes the mantissa of a decimal with `decimals` fractional
/// digits. Balances the decimal type cannot hold are a loud error, never a
/// silent truncation.
fn normalize(address: Address, balance: I256, decimals: u8) -> Result<Decimal, ScanError> {
    if balance < I256::from(i128::MIN) || balance > I256::from(i128::MAX) {
        return Err(ScanError::Normalize {
            address: to_checksum(&address, None),
        });
    }

    Decimal::try_from_i128_with_scale(balance.as_i128(), u32::from(decimals)).map_err(|_| {
        ScanError::Normalize {
            address: to_checksum(&address, None),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger;
    use crate::models::TransferEvent;
    use ethers::types::U256;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    fn ledger_of(entries: &[(u64, i64)]) -> BalanceLedger {
        entries
            .iter()
            .map(|&(a, v)| (addr(a), I256::from(v)))
            .collect()
    }

    #[test]
    fn ranks_largest_balance_first() {
        let holders = rank(ledger_of(&[(1, 40), (2, 100), (3, 60)]), 0).unwrap();

        let amounts: Vec<Decimal> = holders.iter().map(|h| h.amount).collect();
        assert_eq!(
            amounts,
            vec![
                Decimal::new(100, 0),
                Decimal::new(60, 0),
                Decimal::new(40, 0)
            ]
        );
    }

    #[test]
    fn equal_balances_keep_ledger_iteration_order() {
        // the ledger iterates by ascending address bytes; a stable sort
        // must preserve that order among equal amounts
        let holders = rank(ledger_of(&[(5, 7), (1, 7), (3, 7)]), 0).unwrap();

        let addresses: Vec<String> = holders.iter().map(|h| h.address.clone()).collect();
        assert_eq!(
            addresses,
            vec![
                to_checksum(&addr(1), None),
                to_checksum(&addr(3), None),
                to_checksum(&addr(5), None)
            ]
        );
    }

    #[test]
    fn zero_and_negative_balances_are_retained() {
        let holders = rank(ledger_of(&[(1, 0), (2, 10), (3, -4)]), 2).unwrap();

        assert_eq!(holders.len(), 3);
        assert_eq!(holders[1].amount, Decimal::new(0, 2));
        assert_eq!(holders[2].amount, Decimal::new(-4, 2));
    }

    #[test]
    fn normalization_is_exact_at_token_scale() {
        let raw: i128 = 1_234_567_890_123_456_789;
        let mut balances = BalanceLedger::new();
        balances.insert(addr(1), I256::from(raw));

        let holders = rank(balances, 18).unwrap();

        assert_eq!(holders[0].amount.to_string(), "1.234567890123456789");
        assert_eq!(holders[0].amount.mantissa(), raw);
        assert_eq!(holders[0].amount.scale(), 18);
    }

    #[test]
    fn unrepresentable_scale_is_a_loud_error() {
        let mut balances = BalanceLedger::new();
        balances.insert(addr(1), I256::from(1));

        // rust_decimal tops out at 28 fractional digits
        assert!(rank(balances, 77).is_err());
    }

    #[test]
    fn addresses_are_rendered_in_checksum_form() {
        let address: Address = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359"
            .parse()
            .unwrap();
        let mut balances = BalanceLedger::new();
        balances.insert(address, I256::from(1));

        let holders = rank(balances, 0).unwrap();

        assert_eq!(
            holders[0].address,
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
        );
    }

    #[test]
    fn mint_then_spend_example_yields_expected_snapshot() {
        let (a, b, c) = (addr(1), addr(2), addr(3));
        let events = vec![
            TransferEvent {
                from: a,
                to: b,
                amount: U256::from(100u64),
            },
            TransferEvent {
                from: b,
                to: c,
                amount: U256::from(40u64),
            },
            TransferEvent {
                from: Address::zero(),
                to: a,
                amount: U256::from(100u64),
            },
        ];

        let holders = rank(ledger::aggregate(&events), 2).unwrap();

        let ranked: Vec<(String, Decimal)> = holders
            .into_iter()
            .map(|h| (h.address, h.amount))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (to_checksum(&b, None), Decimal::new(60, 2)),
                (to_checksum(&c, None), Decimal::new(40, 2)),
                (to_checksum(&a, None), Decimal::new(0, 2)),
            ]
        );
    }
}
