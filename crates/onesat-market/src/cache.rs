//! Caller-owned record of outpoints spent by transactions not yet confirmed.

use std::collections::HashSet;

use onesat_transaction::Outpoint;

use crate::types::{BroadcastOutcome, PendingTransaction, Utxo};

/// Outpoints to keep out of funding selection.
///
/// The caller marks a transaction's inputs pending when it is built and
/// reports the broadcast result back. Accepted spends stay excluded until
/// the caller refreshes its UTXO snapshot and calls [`UtxoCache::clear`];
/// rejected spends are released immediately.
#[derive(Debug, Default, Clone)]
pub struct UtxoCache {
    spent: HashSet<Outpoint>,
}

impl UtxoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_pending(&mut self, pending: &PendingTransaction) {
        self.spent.extend(pending.spent_outpoints.iter().copied());
    }

    pub fn is_spent(&self, outpoint: &Outpoint) -> bool {
        self.spent.contains(outpoint)
    }

    /// Drop UTXOs that a pending or broadcast transaction already spends.
    /// UTXOs with an unparseable txid are dropped too.
    pub fn filter_spendable(&self, utxos: Vec<Utxo>) -> Vec<Utxo> {
        utxos
            .into_iter()
            .filter(|u| matches!(u.outpoint(), Ok(op) if !self.spent.contains(&op)))
            .collect()
    }

    pub fn on_broadcast(&mut self, pending: &PendingTransaction, outcome: &BroadcastOutcome) {
        match outcome {
            BroadcastOutcome::Accepted { .. } => self.mark_pending(pending),
            BroadcastOutcome::Rejected { .. } => {
                for outpoint in &pending.spent_outpoints {
                    self.spent.remove(outpoint);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.spent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spent.is_empty()
    }

    pub fn clear(&mut self) {
        self.spent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onesat_script::Script;

    fn utxo(n: u8) -> Utxo {
        Utxo {
            txid: hex::encode([n; 32]),
            vout: 0,
            satoshis: 1_000,
            script: Script::p2pkh(&[n; 20]),
        }
    }

    fn pending(spends: &[&Utxo]) -> PendingTransaction {
        PendingTransaction {
            raw_tx_hex: String::new(),
            txid: hex::encode([9u8; 32]),
            size_bytes: 0,
            fee_satoshis: 0,
            num_inputs: spends.len(),
            num_outputs: 0,
            input_txid: spends[0].txid.clone(),
            market_fee_satoshis: None,
            price_satoshis: None,
            spent_outpoints: spends.iter().map(|u| u.outpoint().unwrap()).collect(),
        }
    }

    #[test]
    fn test_pending_spends_are_filtered() {
        let (a, b) = (utxo(1), utxo(2));
        let mut cache = UtxoCache::new();
        cache.mark_pending(&pending(&[&a]));
        assert_eq!(cache.filter_spendable(vec![a.clone(), b.clone()]), vec![b]);
        assert!(cache.is_spent(&a.outpoint().unwrap()));
    }

    #[test]
    fn test_rejection_releases() {
        let a = utxo(1);
        let tx = pending(&[&a]);
        let mut cache = UtxoCache::new();
        cache.mark_pending(&tx);
        cache.on_broadcast(
            &tx,
            &BroadcastOutcome::Rejected {
                code: 409,
                reason: "conflict".to_string(),
            },
        );
        assert!(cache.is_empty());
        assert_eq!(cache.filter_spendable(vec![a.clone()]), vec![a]);
    }

    #[test]
    fn test_acceptance_keeps_until_clear() {
        let a = utxo(1);
        let tx = pending(&[&a]);
        let mut cache = UtxoCache::new();
        cache.on_broadcast(&tx, &BroadcastOutcome::Accepted { txid: tx.txid.clone() });
        assert_eq!(cache.len(), 1);
        assert!(cache.filter_spendable(vec![a.clone()]).is_empty());
        cache.clear();
        assert_eq!(cache.filter_spendable(vec![a.clone()]), vec![a]);
    }
}
