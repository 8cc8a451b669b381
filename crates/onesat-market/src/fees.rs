//! Miner, marketplace and indexing fee arithmetic.
//!
//! All functions are pure. Miner fees use integer arithmetic on a
//! satoshis-per-kilobyte rate so that identical inputs always round the same
//! way.

use serde::{Deserialize, Serialize};

/// Bytes added by one P2PKH input once signed:
/// outpoint (36) + script length (1) + unlocking script (107) + sequence (4).
pub const P2PKH_INPUT_BYTES: u64 = 148;

/// Bytes of a P2PKH output: value (8) + script length (1) + script (25).
pub const P2PKH_OUTPUT_BYTES: u64 = 34;

/// A miner fee rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRate {
    sats_per_kb: u64,
}

impl FeeRate {
    pub fn from_sats_per_kb(sats_per_kb: u64) -> Self {
        FeeRate { sats_per_kb }
    }

    pub fn sats_per_kb(&self) -> u64 {
        self.sats_per_kb
    }

    pub fn per_byte(&self) -> f64 {
        self.sats_per_kb as f64 / 1000.0
    }

    /// Fee for `bytes` bytes, rounded up.
    pub fn fee_for(&self, bytes: u64) -> u64 {
        (bytes * self.sats_per_kb).div_ceil(1000)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        FeeRate::from_sats_per_kb(50)
    }
}

/// Fee for a transaction of `tx_so_far_bytes` that will gain
/// `num_additional_inputs` P2PKH inputs:
/// `ceil((n * 148 + bytes) * rate)`.
pub fn estimate_fee(num_additional_inputs: usize, tx_so_far_bytes: usize, rate: FeeRate) -> u64 {
    rate.fee_for(num_additional_inputs as u64 * P2PKH_INPUT_BYTES + tx_so_far_bytes as u64)
}

/// Marketplace fee on a sale: `floor(price * rate)`, or `minimum_fee` when
/// that rounds to zero.
///
/// The rate is applied in basis points to keep the result exact.
pub fn market_fee(price_satoshis: u64, rate: f64, minimum_fee: u64) -> u64 {
    let bps = (rate * 10_000.0).round() as u128;
    let fee = (price_satoshis as u128 * bps / 10_000) as u64;
    if fee == 0 {
        minimum_fee
    } else {
        fee
    }
}

/// USD cost of indexing a token deploy, formatted to two decimals.
///
/// `total_ops = ceil(supply / mint_limit)` with a zero `mint_limit` meaning
/// the whole supply is minted in one operation. The fee is
/// `max(base_fee_per_op * total_ops, min_fee) / exchange_rate_sats_per_usd`.
///
/// Returns `None` unless the exchange rate is a positive finite number.
pub fn indexing_fee(
    base_fee_per_op: u64,
    supply: u64,
    mint_limit: u64,
    min_fee: u64,
    exchange_rate_sats_per_usd: f64,
) -> Option<String> {
    if !(exchange_rate_sats_per_usd.is_finite() && exchange_rate_sats_per_usd > 0.0) {
        return None;
    }
    let total_ops = if mint_limit == 0 {
        1
    } else {
        supply.div_ceil(mint_limit)
    };
    let total_fee = base_fee_per_op.saturating_mul(total_ops).max(min_fee);
    Some(format!("{:.2}", total_fee as f64 / exchange_rate_sats_per_usd))
}
