//! Fee estimation from a satoshi-per-byte rate and fixed per-component size estimates.
//!
//! Sizes are estimated because fees must be known before signing, when scriptSig
//! lengths are not. The per-input figure is the worst-case legacy P2PKH spend, so the
//! estimate matches or conservatively exceeds the true post-signing size.
//!
//! The builder itself does not recompute fees: the caller quotes a fee in the intent
//! (typically derived from these estimates and a rate from a fee-estimation service),
//! and the engine validates sufficiency only.

/// Estimated vbytes per legacy P2PKH input: outpoint, worst-case scriptSig, sequence.
pub const INPUT_VBYTES: u64 = 148;

/// Estimated vbytes per output: value, length prefix, and a P2WPKH-sized script.
pub const OUTPUT_VBYTES: u64 = 34;

/// Fixed transaction overhead vbytes: version, count prefixes, locktime.
pub const OVERHEAD_VBYTES: u64 = 10;

/// Estimate the serialized size of a transaction with the given input and output
/// counts.
pub fn estimate_vsize(n_inputs: usize, n_outputs: usize) -> u64 {
    OVERHEAD_VBYTES
        .saturating_add(INPUT_VBYTES.saturating_mul(n_inputs as u64))
        .saturating_add(OUTPUT_VBYTES.saturating_mul(n_outputs as u64))
}

/// Estimate the total fee for a transaction at `rate` satoshis per byte.
pub fn estimate_fee(n_inputs: usize, n_outputs: usize, rate: u64) -> u64 {
    estimate_vsize(n_inputs, n_outputs).saturating_mul(rate)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_estimates_sizes_and_fees() {
        assert_eq!(estimate_vsize(1, 1), 192);
        assert_eq!(estimate_vsize(2, 2), 374);
        assert_eq!(estimate_fee(2, 2, 12), 4488);
        assert_eq!(estimate_fee(2, 2, 0), 0);
    }

    #[test]
    fn it_saturates_rather_than_overflowing() {
        assert_eq!(estimate_fee(usize::MAX, 1, u64::MAX), u64::MAX);
    }
}
