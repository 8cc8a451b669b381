use onesat_transaction::{InputRole, TransactionInput, TransactionOutput};

use super::{pending, Draft, Funding, Sale, TransactionAssembler};
use crate::keys::KeyManager;
use crate::types::{Listing, PendingTransaction, Utxo};
use crate::MarketError;

impl TransactionAssembler {
    /// Withdraw `listing`, returning the artifact to the ordinal address.
    ///
    /// Input #0 is the listing, signed `ListingCancel` by the ordinal key
    /// against output #0 only; input #1 is the largest funding UTXO. Any
    /// envelope in front of the covenant (a token transfer inscription) is
    /// kept on the returned output.
    pub fn cancel(
        &self,
        ordinal: &KeyManager,
        payment: &KeyManager,
        listing: &Listing,
        funding: &[Utxo],
    ) -> Result<PendingTransaction, MarketError> {
        let data = listing.ord_lock()?;
        if data.owner_pkh != ordinal.public_key_hash() {
            return Err(MarketError::NotListingOwner);
        }
        tracing::debug!(listing = %listing.outpoint, "cancel listing");

        let mut returned = data.inscription_prefix;
        returned.append_script(&ordinal.locking_script());

        let mut draft = Draft::new();
        draft.add_input(
            TransactionInput::spending(
                &listing.outpoint,
                TransactionOutput::new(listing.satoshis, listing.ordinal_script.clone()),
            ),
            InputRole::ListingCancel,
            Some(ordinal),
        );
        draft.add_output(TransactionOutput::new(listing.satoshis, returned));
        self.fund(&mut draft, funding, Funding::Largest, payment, false)?;
        let tx = draft.sign()?;
        pending(&tx, 1, Sale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use onesat_primitives::Network;
    use onesat_script::ordlock::{OrdLockData, Payout};
    use onesat_transaction::Transaction;

    fn listing_owned_by(owner: &KeyManager, payee: &KeyManager) -> Listing {
        let data = OrdLockData::new(
            owner.public_key_hash(),
            Payout::to_address(&payee.address(), 25_000),
        );
        Listing::from_utxo(&utxo(7, 1, data.lock().unwrap()), Network::Mainnet).unwrap()
    }

    #[test]
    fn test_cancel_returns_artifact() {
        let (payment, ordinal) = keys();
        let listing = listing_owned_by(&ordinal, &payment);
        let funding = vec![utxo(1, 3_000, payment.locking_script())];
        let pending = assembler()
            .cancel(&ordinal, &payment, &listing, &funding)
            .unwrap();
        let tx = Transaction::from_hex(&pending.raw_tx_hex).unwrap();
        assert_eq!(tx.outputs[0].locking_script, ordinal.locking_script());
        assert_eq!(tx.outputs[0].satoshis, 1);
        assert_eq!(pending.spent_outpoints[0], listing.outpoint);
        assert_eq!(pending.input_txid, funding[0].txid);

        let chunks = tx.inputs[0].unlocking_script.as_ref().unwrap().chunks().unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(*chunks[0].data.as_ref().unwrap().last().unwrap(), 0xc3);
        assert_eq!(chunks[2].op, 0x51);
    }

    #[test]
    fn test_cancel_by_stranger() {
        let (payment, ordinal) = keys();
        let stranger = KeyManager::generate(Network::Mainnet);
        let listing = listing_owned_by(&stranger, &payment);
        assert!(matches!(
            assembler().cancel(&ordinal, &payment, &listing, &[]),
            Err(MarketError::NotListingOwner)
        ));
    }
}
