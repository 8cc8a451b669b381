use onesat_script::{Address, Inscription};
use onesat_transaction::TransactionOutput;

use super::{pending, Draft, Funding, Sale, TransactionAssembler};
use crate::keys::KeyManager;
use crate::types::{PendingTransaction, Utxo};
use crate::MarketError;

impl TransactionAssembler {
    /// Inscribe `inscription` onto a new output paying `destination`.
    ///
    /// Output #0 is the inscribed artifact, output #1 the change. The
    /// largest funding UTXO pays for everything and is signed with a
    /// `Payment` signature.
    pub fn inscribe(
        &self,
        payment: &KeyManager,
        funding: &[Utxo],
        destination: &Address,
        inscription: &Inscription,
    ) -> Result<PendingTransaction, MarketError> {
        tracing::debug!(
            destination = %destination,
            content_type = %inscription.content_type,
            payload_bytes = inscription.payload.len(),
            "inscribe"
        );
        let mut draft = Draft::new();
        draft.add_output(TransactionOutput::new(
            self.config.ordinal_output_sats,
            inscription.lock(&destination.locking_script())?,
        ));
        self.fund(&mut draft, funding, Funding::Largest, payment, false)?;
        let tx = draft.sign()?;
        pending(&tx, 0, Sale::default())
    }
}
