//! The signing contract of each input in a marketplace transaction.
//!
//! Every input the assembler adds is tagged with one of these roles, so a
//! flow's signature commitments can be read from one place instead of from
//! raw flag integers.

use crate::sighash::{
    SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_FORKID, SIGHASH_NONE, SIGHASH_SINGLE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputRole {
    /// A funding (or plainly transferred) input. Commits to every input and
    /// output.
    Payment,
    /// An asset owner releasing one input (List, token transfer). Commits to
    /// that input only, so the rest of the transaction stays open.
    AssetRelease,
    /// The seller reclaiming a listed artifact. Commits to the input and the
    /// output at the same index.
    ListingCancel,
    /// A buyer satisfying the OrdinalLock covenant. No signature; the
    /// unlocking script carries the preimage the covenant inspects.
    ListingPurchase,
}

impl InputRole {
    /// Sighash flag used for this input's signature or preimage.
    pub fn sighash_flag(&self) -> u32 {
        match self {
            InputRole::Payment => SIGHASH_ALL | SIGHASH_FORKID,
            InputRole::AssetRelease => SIGHASH_NONE | SIGHASH_ANYONECANPAY | SIGHASH_FORKID,
            InputRole::ListingCancel => SIGHASH_SINGLE | SIGHASH_ANYONECANPAY | SIGHASH_FORKID,
            InputRole::ListingPurchase => SIGHASH_ALL | SIGHASH_ANYONECANPAY | SIGHASH_FORKID,
        }
    }

    /// Whether a private key signature is part of the unlocking script.
    pub fn requires_signature(&self) -> bool {
        !matches!(self, InputRole::ListingPurchase)
    }
}
