//! Greedy largest-first coin selection.

use crate::fees::{estimate_fee, FeeRate};
use crate::types::Utxo;
use crate::MarketError;

/// The funding inputs picked for a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub chosen: Vec<Utxo>,
    pub total: u64,
    /// Miner fee for the transaction once `chosen` are added to it.
    pub fee: u64,
}

impl Selection {
    /// What is left for a change output after `required` and the fee.
    pub fn change(&self, required: u64) -> u64 {
        self.total.saturating_sub(required.saturating_add(self.fee))
    }
}

/// Pick funding UTXOs covering `required` satoshis plus the miner fee.
///
/// Candidates are taken largest first (ties broken by txid then vout, so the
/// result only depends on the set) and the fee is re-estimated after every
/// addition as `estimate_fee(chosen, tx_so_far_bytes, rate)`, where
/// `tx_so_far_bytes` is the estimated size of the transaction without the
/// funding inputs. At least one UTXO is always chosen.
///
/// A `required` too large to add the fee to can never be met and fails with
/// `InsufficientFunds`; UTXO values summing past `u64::MAX` are
/// `MalformedScript`.
pub fn select(
    utxos: &[Utxo],
    required: u64,
    tx_so_far_bytes: usize,
    rate: FeeRate,
) -> Result<Selection, MarketError> {
    if utxos.is_empty() {
        return Err(MarketError::NoFundingUtxo);
    }

    let mut sorted: Vec<&Utxo> = utxos.iter().collect();
    sorted.sort_by(|a, b| {
        b.satoshis
            .cmp(&a.satoshis)
            .then_with(|| a.txid.cmp(&b.txid))
            .then_with(|| a.vout.cmp(&b.vout))
    });

    let mut chosen = Vec::new();
    let mut total = 0u64;
    for utxo in sorted {
        chosen.push(utxo.clone());
        total = total
            .checked_add(utxo.satoshis)
            .ok_or_else(|| MarketError::MalformedScript("utxo values overflow u64".to_string()))?;
        let fee = estimate_fee(chosen.len(), tx_so_far_bytes, rate);
        let needed = required.checked_add(fee).ok_or(MarketError::InsufficientFunds {
            needed: u64::MAX,
            available: total,
        })?;
        if total >= needed {
            tracing::debug!(inputs = chosen.len(), total, fee, required, "funding selected");
            return Ok(Selection { chosen, total, fee });
        }
    }

    let fee = estimate_fee(chosen.len(), tx_so_far_bytes, rate);
    Err(MarketError::InsufficientFunds {
        needed: required.saturating_add(fee),
        available: total,
    })
}

/// The single highest-value UTXO, with the same tiebreak as [`select`].
pub fn largest(utxos: &[Utxo]) -> Result<&Utxo, MarketError> {
    utxos
        .iter()
        .min_by(|a, b| {
            b.satoshis
                .cmp(&a.satoshis)
                .then_with(|| a.txid.cmp(&b.txid))
                .then_with(|| a.vout.cmp(&b.vout))
        })
        .ok_or(MarketError::NoFundingUtxo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onesat_script::Script;
    use proptest::prelude::*;

    fn utxo(n: u8, satoshis: u64) -> Utxo {
        Utxo {
            txid: hex::encode([n; 32]),
            vout: n as u32,
            satoshis,
            script: Script::p2pkh(&[7; 20]),
        }
    }

    #[test]
    fn test_takes_largest_first() {
        let utxos = vec![utxo(1, 1_000), utxo(2, 50_000), utxo(3, 20_000)];
        let sel = select(&utxos, 30_000, 200, FeeRate::default()).unwrap();
        assert_eq!(sel.chosen.len(), 1);
        assert_eq!(sel.chosen[0].satoshis, 50_000);
        assert_eq!(sel.fee, estimate_fee(1, 200, FeeRate::default()));
        assert_eq!(sel.change(30_000), 50_000 - 30_000 - sel.fee);
    }

    #[test]
    fn test_accumulates_until_covered() {
        let utxos = vec![utxo(1, 10_000), utxo(2, 10_000), utxo(3, 10_000)];
        let sel = select(&utxos, 15_000, 200, FeeRate::default()).unwrap();
        assert_eq!(sel.chosen.len(), 2);
        assert_eq!(sel.total, 20_000);
    }

    #[test]
    fn test_insufficient() {
        let utxos = vec![utxo(1, 100), utxo(2, 200)];
        match select(&utxos, 1_000, 200, FeeRate::default()) {
            Err(MarketError::InsufficientFunds { available, needed }) => {
                assert_eq!(available, 300);
                assert!(needed > 1_000);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_is_no_funding() {
        assert!(matches!(
            select(&[], 1, 0, FeeRate::default()),
            Err(MarketError::NoFundingUtxo)
        ));
        assert!(matches!(largest(&[]), Err(MarketError::NoFundingUtxo)));
    }

    #[test]
    fn test_order_independent() {
        let a = vec![utxo(1, 500), utxo(2, 500), utxo(3, 900)];
        let b = vec![utxo(3, 900), utxo(2, 500), utxo(1, 500)];
        let rate = FeeRate::default();
        assert_eq!(select(&a, 1_200, 100, rate).unwrap(), select(&b, 1_200, 100, rate).unwrap());
        assert_eq!(largest(&a).unwrap(), largest(&b).unwrap());
    }

    #[test]
    fn test_unreachable_requirement() {
        let utxos = vec![utxo(1, 1_000), utxo(2, 500)];
        assert!(matches!(
            select(&utxos, u64::MAX, 200, FeeRate::default()),
            Err(MarketError::InsufficientFunds { needed: u64::MAX, .. })
        ));
    }

    #[test]
    fn test_utxo_values_overflowing() {
        let utxos = vec![utxo(1, u64::MAX / 2 + 10), utxo(2, u64::MAX / 2 + 10)];
        assert!(matches!(
            select(&utxos, u64::MAX - 100, 0, FeeRate::default()),
            Err(MarketError::MalformedScript(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_sufficient_and_largest_is_needed(
            values in proptest::collection::vec(1u64..1_000_000, 1..12),
            required in 1u64..3_000_000,
            bytes in 0usize..2_000,
        ) {
            let utxos: Vec<Utxo> = values
                .iter()
                .enumerate()
                .map(|(i, v)| utxo(i as u8, *v))
                .collect();
            let rate = FeeRate::default();
            if let Ok(sel) = select(&utxos, required, bytes, rate) {
                let fee = estimate_fee(sel.chosen.len(), bytes, rate);
                prop_assert_eq!(sel.fee, fee);
                prop_assert!(sel.total >= required + fee);

                let max = sel.chosen.iter().map(|u| u.satoshis).max().unwrap();
                let rest = sel.total - max;
                let fewer = estimate_fee(sel.chosen.len() - 1, bytes, rate);
                prop_assert!(rest < required + fewer);
            }
        }
    }
}
