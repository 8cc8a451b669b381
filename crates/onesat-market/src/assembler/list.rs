use onesat_script::ordlock::{OrdLockData, Payout};
use onesat_script::Script;
use onesat_transaction::{InputRole, TransactionOutput};

use super::{check_owner, pending, Draft, Funding, Sale, TransactionAssembler};
use crate::keys::KeyManager;
use crate::types::{transfer_document, PendingTransaction, TokenUtxo, Utxo};
use crate::MarketError;

impl TransactionAssembler {
    /// List an artifact for `price` satoshis under the OrdinalLock covenant.
    ///
    /// Input #0 is the artifact, released by the ordinal key with an
    /// `AssetRelease` signature so buyers can complete the transaction
    /// later; the remaining inputs pay the fee. Output #0 is the listing:
    /// cancellable by the ordinal key, purchasable by anyone paying `price`
    /// to the payment address.
    pub fn list(
        &self,
        ordinal: &KeyManager,
        payment: &KeyManager,
        artifact: &Utxo,
        funding: &[Utxo],
        price: u64,
    ) -> Result<PendingTransaction, MarketError> {
        check_owner(&artifact.script, ordinal)?;
        tracing::debug!(artifact = %artifact.outpoint()?, price, "list");

        let lock = OrdLockData::new(
            ordinal.public_key_hash(),
            Payout::to_address(&payment.address(), price),
        );
        let mut draft = Draft::new();
        draft.add_utxo(artifact, InputRole::AssetRelease, ordinal)?;
        draft.add_output(TransactionOutput::new(artifact.satoshis, lock.lock()?));
        self.finish_listing(draft, funding, payment, price)
    }

    /// List `amount` units of a token balance for `price` satoshis.
    ///
    /// The listing carries a transfer inscription for `amount`; whatever
    /// the token UTXO holds beyond that is re-inscribed to the ordinal
    /// address as output #1.
    pub fn list_tokens(
        &self,
        ordinal: &KeyManager,
        payment: &KeyManager,
        token: &TokenUtxo,
        amount: u64,
        funding: &[Utxo],
        price: u64,
    ) -> Result<PendingTransaction, MarketError> {
        if amount > token.amt {
            return Err(MarketError::InsufficientTokens {
                needed: amount,
                available: token.amt,
            });
        }
        check_owner(&token.utxo.script, ordinal)?;
        tracing::debug!(token = %token.tick_or_id, amount, price, "list tokens");

        let envelope = transfer_document(token.protocol, &token.tick_or_id, amount)
            .to_inscription()?
            .envelope()?;
        let lock = OrdLockData {
            inscription_prefix: envelope,
            ..OrdLockData::new(
                ordinal.public_key_hash(),
                Payout::to_address(&payment.address(), price),
            )
        };

        let sats = self.config.ordinal_output_sats;
        let mut draft = Draft::new();
        draft.add_utxo(&token.utxo, InputRole::AssetRelease, ordinal)?;
        draft.add_output(TransactionOutput::new(sats, lock.lock()?));
        let remainder = token.amt - amount;
        if remainder > 0 {
            draft.add_output(TransactionOutput::new(
                sats,
                token_lock(token, remainder, &ordinal.locking_script())?,
            ));
        }
        self.finish_listing(draft, funding, payment, price)
    }

    fn finish_listing<'k>(
        &self,
        mut draft: Draft<'k>,
        funding: &[Utxo],
        payment: &'k KeyManager,
        price: u64,
    ) -> Result<PendingTransaction, MarketError> {
        self.fund(&mut draft, funding, Funding::Largest, payment, false)?;
        let tx = draft.sign()?;
        pending(
            &tx,
            1,
            Sale {
                market_fee: None,
                price: Some(price),
            },
        )
    }
}

/// A transfer inscription of `amount` units of `token`'s kind, locked to `owner`.
pub(super) fn token_lock(
    token: &TokenUtxo,
    amount: u64,
    owner: &Script,
) -> Result<Script, MarketError> {
    Ok(transfer_document(token.protocol, &token.tick_or_id, amount)
        .to_inscription()?
        .lock(owner)?)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::Listing;
    use onesat_primitives::Network;
    use onesat_script::token::TokenInscription;
    use onesat_script::Inscription;
    use onesat_transaction::Transaction;

    #[test]
    fn test_list_shape_and_flags() {
        let assembler = assembler();
        let (payment, ordinal) = keys();
        let artifact = utxo(
            1,
            1,
            Inscription::new("text/plain", b"art".to_vec())
                .lock(&ordinal.locking_script())
                .unwrap(),
        );
        let funding = vec![utxo(2, 10_000, payment.locking_script())];
        let pending = assembler
            .list(&ordinal, &payment, &artifact, &funding, 100_000)
            .unwrap();
        assert_eq!(pending.price_satoshis, Some(100_000));
        assert_eq!(pending.input_txid, funding[0].txid);

        let tx = Transaction::from_hex(&pending.raw_tx_hex).unwrap();
        let data = OrdLockData::decode(&tx.outputs[0].locking_script).unwrap();
        assert_eq!(data.owner_pkh, ordinal.public_key_hash());
        assert_eq!(data.price(), 100_000);
        assert_eq!(data.payout.locking_script, payment.locking_script());

        let flag = |i: usize| {
            let chunks = tx.inputs[i].unlocking_script.as_ref().unwrap().chunks().unwrap();
            *chunks[0].data.as_ref().unwrap().last().unwrap()
        };
        assert_eq!(flag(0), 0xc2);
        assert_eq!(flag(1), 0x41);

        let listed = Utxo {
            txid: pending.txid.clone(),
            vout: 0,
            satoshis: 1,
            script: tx.outputs[0].locking_script.clone(),
        };
        let listing = Listing::from_utxo(&listed, Network::Mainnet).unwrap();
        assert_eq!(listing.seller_owner_address, payment.address().address_string);
    }

    #[test]
    fn test_list_requires_ownership() {
        let (payment, ordinal) = keys();
        let artifact = utxo(1, 1, payment.locking_script());
        let funding = vec![utxo(2, 10_000, payment.locking_script())];
        assert!(matches!(
            assembler().list(&ordinal, &payment, &artifact, &funding, 5),
            Err(MarketError::NotListingOwner)
        ));
    }

    #[test]
    fn test_list_part_of_token_balance() {
        let (payment, ordinal) = keys();
        let script = TokenInscription::transfer_tick("PEPE", 700)
            .to_inscription()
            .unwrap()
            .lock(&ordinal.locking_script())
            .unwrap();
        let token = TokenUtxo::from_utxo(utxo(1, 1, script)).unwrap();
        let funding = vec![utxo(2, 10_000, payment.locking_script())];
        let pending = assembler()
            .list_tokens(&ordinal, &payment, &token, 500, &funding, 2_000)
            .unwrap();

        let tx = Transaction::from_hex(&pending.raw_tx_hex).unwrap();
        assert_eq!(tx.outputs.len(), 3);
        let listed = OrdLockData::decode(&tx.outputs[0].locking_script).unwrap();
        let listed_doc = Inscription::parse(&listed.inscription_prefix).unwrap().unwrap();
        let listed_doc = TokenInscription::from_inscription(&listed_doc).unwrap().unwrap();
        assert_eq!(listed_doc.amount().unwrap(), Some(500));

        let change = TokenUtxo::from_utxo(Utxo {
            txid: pending.txid.clone(),
            vout: 1,
            satoshis: 1,
            script: tx.outputs[1].locking_script.clone(),
        })
        .unwrap();
        assert_eq!(change.amt, 200);
        assert_eq!(
            Inscription::strip(&change.utxo.script).unwrap(),
            ordinal.locking_script()
        );
    }

    #[test]
    fn test_list_more_tokens_than_held() {
        let (payment, ordinal) = keys();
        let script = TokenInscription::transfer_tick("PEPE", 700)
            .to_inscription()
            .unwrap()
            .lock(&ordinal.locking_script())
            .unwrap();
        let token = TokenUtxo::from_utxo(utxo(1, 1, script)).unwrap();
        assert!(matches!(
            assembler().list_tokens(&ordinal, &payment, &token, 701, &[], 1),
            Err(MarketError::InsufficientTokens { needed: 701, available: 700 })
        ));
    }
}
