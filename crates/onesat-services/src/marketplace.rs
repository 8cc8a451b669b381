//! Fetch, assemble, broadcast.
//!
//! Each operation reads what it needs from the [`UtxoQuery`], drops
//! outpoints the caller's [`UtxoCache`] already has in flight, and hands
//! the data to the assembler. Calls are awaited one after another because
//! each depends on the previous result. Nothing is broadcast until the
//! caller passes the returned [`PendingTransaction`] to
//! [`Marketplace::submit`].

use onesat_market::{
    BroadcastOutcome, KeyManager, MarketConfig, MarketError, PendingTransaction, SendAmount,
    TokenAction, TokenUtxo, TransactionAssembler, Utxo, UtxoCache,
};
use onesat_script::{Address, Inscription};
use onesat_transaction::Outpoint;

use crate::error::ServiceError;
use crate::traits::{Broadcaster, KeyProvider, UtxoQuery};

/// The engine wired to its collaborators.
#[derive(Debug)]
pub struct Marketplace<Q, B, K> {
    assembler: TransactionAssembler,
    query: Q,
    broadcaster: B,
    keys: K,
}

impl<Q, B, K> Marketplace<Q, B, K>
where
    Q: UtxoQuery,
    B: Broadcaster,
    K: KeyProvider,
{
    /// Wire `config` to a query service, a broadcast sink and a key provider.
    pub fn new(config: MarketConfig, query: Q, broadcaster: B, keys: K) -> Self {
        Self {
            assembler: TransactionAssembler::new(config),
            query,
            broadcaster,
            keys,
        }
    }

    /// The underlying assembler.
    pub fn assembler(&self) -> &TransactionAssembler {
        &self.assembler
    }

    fn payment_key(&self) -> Result<KeyManager, ServiceError> {
        Ok(KeyManager::from_wif(&self.keys.payment_wif()?)?)
    }

    fn ordinal_key(&self) -> Result<KeyManager, ServiceError> {
        Ok(KeyManager::from_wif(&self.keys.ordinal_wif()?)?)
    }

    async fn funding(
        &self,
        payment: &KeyManager,
        cache: &UtxoCache,
    ) -> Result<Vec<Utxo>, ServiceError> {
        let utxos = self.query.funding_utxos(&payment.address()).await?;
        Ok(cache.filter_spendable(utxos))
    }

    /// Inscribe onto the wallet's ordinal address.
    pub async fn inscribe(
        &self,
        cache: &UtxoCache,
        inscription: &Inscription,
    ) -> Result<PendingTransaction, ServiceError> {
        let (payment, ordinal) = (self.payment_key()?, self.ordinal_key()?);
        let funding = self.funding(&payment, cache).await?;
        Ok(self
            .assembler
            .inscribe(&payment, &funding, &ordinal.address(), inscription)?)
    }

    /// List the artifact at `artifact` for `price` satoshis.
    pub async fn list(
        &self,
        cache: &UtxoCache,
        artifact: &Outpoint,
        price: u64,
    ) -> Result<PendingTransaction, ServiceError> {
        let (payment, ordinal) = (self.payment_key()?, self.ordinal_key()?);
        let artifact = self.query.utxo(artifact).await?;
        let funding = self.funding(&payment, cache).await?;
        Ok(self
            .assembler
            .list(&ordinal, &payment, &artifact, &funding, price)?)
    }

    /// List `amount` units of a token from the smallest balance that covers it.
    pub async fn list_tokens(
        &self,
        cache: &UtxoCache,
        tick_or_id: &str,
        amount: u64,
        price: u64,
    ) -> Result<PendingTransaction, ServiceError> {
        let (payment, ordinal) = (self.payment_key()?, self.ordinal_key()?);
        let tokens = self.tokens(&ordinal, tick_or_id, cache).await?;
        let available = tokens.iter().map(|t| t.amt).max().unwrap_or(0);
        let token = tokens
            .iter()
            .filter(|t| t.amt >= amount)
            .min_by_key(|t| t.amt)
            .ok_or(MarketError::InsufficientTokens {
                needed: amount,
                available,
            })?;
        let funding = self.funding(&payment, cache).await?;
        Ok(self
            .assembler
            .list_tokens(&ordinal, &payment, token, amount, &funding, price)?)
    }

    /// Buy the listing at `listing`, receiving the artifact at the ordinal address.
    pub async fn buy(
        &self,
        cache: &UtxoCache,
        listing: &Outpoint,
    ) -> Result<PendingTransaction, ServiceError> {
        let (payment, ordinal) = (self.payment_key()?, self.ordinal_key()?);
        let listing = self.query.listing(listing).await?;
        let funding = self.funding(&payment, cache).await?;
        Ok(self
            .assembler
            .buy(&payment, &ordinal.address(), &listing, &funding)?)
    }

    /// Cancel the wallet's listing at `listing`.
    pub async fn cancel(
        &self,
        cache: &UtxoCache,
        listing: &Outpoint,
    ) -> Result<PendingTransaction, ServiceError> {
        let (payment, ordinal) = (self.payment_key()?, self.ordinal_key()?);
        let listing = self.query.listing(listing).await?;
        let funding = self.funding(&payment, cache).await?;
        Ok(self
            .assembler
            .cancel(&ordinal, &payment, &listing, &funding)?)
    }

    /// Inscribe a token operation to `recipient`.
    pub async fn token_action(
        &self,
        cache: &UtxoCache,
        action: &TokenAction,
        recipient: &Address,
    ) -> Result<PendingTransaction, ServiceError> {
        let (payment, ordinal) = (self.payment_key()?, self.ordinal_key()?);
        let tokens = match action {
            TokenAction::Transfer { token, .. } => self.tokens(&ordinal, token, cache).await?,
            _ => Vec::new(),
        };
        let funding = self.funding(&payment, cache).await?;
        Ok(self.assembler.token_action(
            &ordinal, &payment, action, &tokens, recipient, &funding,
        )?)
    }

    /// Pay `recipient` from the payment address.
    pub async fn send(
        &self,
        cache: &UtxoCache,
        recipient: &Address,
        amount: SendAmount,
    ) -> Result<PendingTransaction, ServiceError> {
        let payment = self.payment_key()?;
        let funding = self.funding(&payment, cache).await?;
        Ok(self
            .assembler
            .send_satoshis(&payment, recipient, amount, &funding)?)
    }

    /// Move the artifact at `artifact` to `recipient`.
    pub async fn transfer_ordinal(
        &self,
        cache: &UtxoCache,
        artifact: &Outpoint,
        recipient: &Address,
    ) -> Result<PendingTransaction, ServiceError> {
        let (payment, ordinal) = (self.payment_key()?, self.ordinal_key()?);
        let artifact = self.query.utxo(artifact).await?;
        let funding = self.funding(&payment, cache).await?;
        Ok(self
            .assembler
            .transfer_ordinal(&ordinal, &payment, &artifact, recipient, &funding)?)
    }

    /// Broadcast `pending` and record the result in `cache`.
    ///
    /// Its inputs are marked pending first. A rejection releases them; an
    /// acceptance keeps them excluded until the cache is cleared. When the
    /// broadcaster cannot be reached they stay marked, since the
    /// transaction may still have been relayed.
    pub async fn submit(
        &self,
        pending: &PendingTransaction,
        cache: &mut UtxoCache,
    ) -> Result<BroadcastOutcome, ServiceError> {
        cache.mark_pending(pending);
        let outcome = self.broadcaster.broadcast(&pending.raw_tx_hex).await?;
        match &outcome {
            BroadcastOutcome::Accepted { txid } => {
                tracing::info!(%txid, fee = pending.fee_satoshis, "transaction accepted");
            }
            BroadcastOutcome::Rejected { code, reason } => {
                tracing::warn!(txid = %pending.txid, code, %reason, "transaction rejected");
            }
        }
        cache.on_broadcast(pending, &outcome);
        Ok(outcome)
    }

    async fn tokens(
        &self,
        ordinal: &KeyManager,
        tick_or_id: &str,
        cache: &UtxoCache,
    ) -> Result<Vec<TokenUtxo>, ServiceError> {
        let tokens = self
            .query
            .token_utxos(&ordinal.address(), tick_or_id)
            .await?;
        Ok(tokens
            .into_iter()
            .filter(|t| matches!(t.utxo.outpoint(), Ok(op) if !cache.is_spent(&op)))
            .collect())
    }
}
