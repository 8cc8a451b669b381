//! Purchase of an OrdinalLock listing.
//!
//! The covenant checks the literal bytes of the spending transaction, so a
//! purchase is built in two phases. [`TransactionAssembler::draft_purchase`]
//! fixes the outputs with zero-value placeholders for change and market fee
//! and computes the first preimage. [`TransactionAssembler::finalize_purchase`]
//! selects funding, writes the real values, recomputes the preimage and
//! verifies the result against the listing before returning it.

use onesat_script::Address;
use onesat_transaction::template::ordlock::OrdLockPurchase;
use onesat_transaction::{InputRole, Transaction, TransactionInput, TransactionOutput};

use super::{pending, Draft, Sale, TransactionAssembler};
use crate::fees::market_fee;
use crate::keys::KeyManager;
use crate::selector::select;
use crate::types::{Listing, PendingTransaction, Utxo};
use crate::MarketError;

const BUYER_OUTPUT: usize = 0;
const PAYOUT_OUTPUT: usize = 1;
const CHANGE_OUTPUT: usize = 2;
const MARKET_FEE_OUTPUT: usize = 3;

/// A purchase with every output in place and placeholder values for
/// change and market fee.
pub struct PurchaseDraft<'k> {
    draft: Draft<'k>,
    payer: &'k KeyManager,
    payout: Vec<u8>,
    price: u64,
    market_fee: u64,
}

impl PurchaseDraft<'_> {
    /// The transaction as drafted, input #0 unlocked with the first preimage.
    pub fn transaction(&self) -> &Transaction {
        &self.draft.tx
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn market_fee(&self) -> u64 {
        self.market_fee
    }
}

impl TransactionAssembler {
    /// Buy `listing`, receiving the artifact at `buyer`.
    ///
    /// Outputs: #0 artifact to `buyer`, #1 the listing's payout, #2 change
    /// to the payment address, #3 market fee. Fails with `PriceMismatch`
    /// when the covenant's price differs from the listing's displayed
    /// price, and `InsufficientFunds` when `funding` cannot cover price,
    /// market fee and miner fee.
    pub fn buy(
        &self,
        payment: &KeyManager,
        buyer: &Address,
        listing: &Listing,
        funding: &[Utxo],
    ) -> Result<PendingTransaction, MarketError> {
        let draft = self.draft_purchase(payment, buyer, listing)?;
        self.finalize_purchase(draft, funding)
    }

    /// First phase of a purchase.
    pub fn draft_purchase<'k>(
        &self,
        payment: &'k KeyManager,
        buyer: &Address,
        listing: &Listing,
    ) -> Result<PurchaseDraft<'k>, MarketError> {
        let data = listing.ord_lock()?;
        if data.price() != listing.price_satoshis {
            return Err(MarketError::PriceMismatch {
                expected: listing.price_satoshis,
                actual: data.price(),
            });
        }
        let price = data.price();
        let market_fee = market_fee(
            price,
            self.config.market_fee_rate,
            self.config.minimum_market_fee,
        );
        let market_address = self.config.market_fee_address()?;
        tracing::debug!(listing = %listing.outpoint, price, market_fee, "draft purchase");

        let mut buyer_lock = data.inscription_prefix.clone();
        buyer_lock.append_script(&buyer.locking_script());

        let mut draft = Draft::new();
        draft.add_input(
            TransactionInput::spending(
                &listing.outpoint,
                TransactionOutput::new(listing.satoshis, listing.ordinal_script.clone()),
            ),
            InputRole::ListingPurchase,
            None,
        );
        draft.add_output(TransactionOutput::new(self.config.ordinal_output_sats, buyer_lock));
        draft.add_output(TransactionOutput::from(&data.payout));
        draft.add_output(TransactionOutput::new(0, payment.locking_script()));
        draft.add_output(TransactionOutput::new(0, market_address.locking_script()));
        draft.sign_input(0)?;

        Ok(PurchaseDraft {
            draft,
            payer: payment,
            payout: listing.payout.clone(),
            price,
            market_fee,
        })
    }

    /// Second phase of a purchase: fund, fix values, re-sign and verify.
    pub fn finalize_purchase(
        &self,
        purchase: PurchaseDraft<'_>,
        funding: &[Utxo],
    ) -> Result<PendingTransaction, MarketError> {
        let PurchaseDraft {
            mut draft,
            payer,
            payout,
            price,
            market_fee,
        } = purchase;

        // The payout value comes from the listing script.
        let fixed_in = draft.tx.total_input_satoshis()?;
        let required = draft.tx.outputs[BUYER_OUTPUT]
            .satoshis
            .checked_add(draft.tx.outputs[PAYOUT_OUTPUT].satoshis)
            .and_then(|sats| sats.checked_add(market_fee))
            .ok_or_else(|| MarketError::MalformedScript("listing price overflows u64".to_string()))?
            .saturating_sub(fixed_in);
        let selection = select(funding, required, draft.tx.estimated_size(), self.config.fee_rate())?;
        for utxo in &selection.chosen {
            draft.add_utxo(utxo, InputRole::Payment, payer)?;
        }

        draft.tx.outputs[CHANGE_OUTPUT].satoshis = selection.change(required);
        draft.tx.outputs[MARKET_FEE_OUTPUT].satoshis = market_fee;

        // Signing rebuilds input #0's unlock from the final output values.
        let tx = draft.sign()?;
        verify_covenant(&tx, &payout)?;
        pending(
            &tx,
            1,
            Sale {
                market_fee: Some(market_fee),
                price: Some(price),
            },
        )
    }
}

/// Output #1 must equal the listing's payout and input #0 must carry the
/// outputs and preimage of the transaction as it now stands.
fn verify_covenant(tx: &Transaction, payout: &[u8]) -> Result<(), MarketError> {
    if tx.outputs.get(PAYOUT_OUTPUT).map(|o| o.to_bytes()).as_deref() != Some(payout) {
        return Err(MarketError::CovenantMismatch);
    }
    let expected = OrdLockPurchase::parts(tx, 0)?;
    let unlock = tx.inputs[0]
        .unlocking_script
        .as_ref()
        .ok_or(MarketError::CovenantMismatch)?
        .chunks()?;
    let pushed: Vec<&[u8]> = unlock.iter().filter_map(|c| c.push_bytes()).collect();
    if pushed.len() != 4 || expected.iter().zip(&pushed).any(|(e, p)| e.as_slice() != *p) {
        return Err(MarketError::CovenantMismatch);
    }
    Ok(())
}
