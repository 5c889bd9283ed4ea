//! Deterministic canonical ordering of inputs and outputs (BIP69).
//!
//! Two parties independently constructing the same transaction will produce identical
//! byte streams only if they agree on input and output order. BIP69 fixes that order
//! lexicographically. The sorts here are pure: they return an index permutation of the
//! baseline order and never mutate their arguments, so values keyed to the baseline
//! order (such as externally-produced signatures) can be relocated explicitly.
//!
//! Inputs compare by the previous txid bytes in the order they appear serialized
//! (internal little-endian order), then by output index. Comparing the human-readable
//! big-endian hex instead is a common implementation mistake. Outputs compare by value,
//! then by locking-script bytes.

use crate::types::{txout::TxOut, utxo::Utxo};

/// Input/output ordering policies for transaction construction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SortPolicy {
    /// Preserve the baseline order exactly as supplied: inputs in store order, the
    /// destination output before the change output.
    #[default]
    Keep,
    /// BIP69 canonical lexicographic ordering.
    Bip69,
}

impl SortPolicy {
    /// The permutation that orders `utxos` under this policy. `ordering[n]` is the
    /// baseline index of the input that belongs at position `n`.
    pub fn input_ordering(&self, utxos: &[Utxo]) -> Vec<usize> {
        let mut ordering: Vec<usize> = (0..utxos.len()).collect();
        if let SortPolicy::Bip69 = self {
            ordering.sort_by(|&a, &b| {
                let (lhs, rhs) = (&utxos[a].outpoint, &utxos[b].outpoint);
                lhs.txid
                    .as_ref()
                    .cmp(rhs.txid.as_ref())
                    .then(lhs.idx.cmp(&rhs.idx))
            });
        }
        ordering
    }

    /// The permutation that orders `outputs` under this policy. `ordering[n]` is the
    /// baseline index of the output that belongs at position `n`.
    pub fn output_ordering(&self, outputs: &[TxOut]) -> Vec<usize> {
        let mut ordering: Vec<usize> = (0..outputs.len()).collect();
        if let SortPolicy::Bip69 = self {
            ordering.sort_by(|&a, &b| {
                let (lhs, rhs) = (&outputs[a], &outputs[b]);
                lhs.value
                    .cmp(&rhs.value)
                    .then_with(|| lhs.script_pubkey.items().cmp(rhs.script_pubkey.items()))
            });
        }
        ordering
    }
}

/// Apply an index permutation, producing the reordered items.
pub fn apply<T: Clone>(items: &[T], ordering: &[usize]) -> Vec<T> {
    ordering.iter().map(|&i| items[i].clone()).collect()
}
