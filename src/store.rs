//! A snapshot cache of the unspent outputs known for a set of owned addresses.
//!
//! A network-refresh collaborator reports the full spendable set per address; builds
//! read a consistent snapshot. Updates replace an address's whole set atomically, so a
//! concurrent reader observes either the pre-update or post-update state, never a
//! partial one. There is no incremental patching and no eviction.
//!
//! Selection order is deterministic: addresses in the order they were first updated,
//! outputs in the order the indexer reported them. This is the baseline order that
//! canonical sorting and signature placement key off.

use std::sync::RwLock;

use crate::{enc::encoder::Address, types::utxo::Utxo};

#[derive(Clone, Debug)]
struct AddressEntry {
    address: Address,
    utxos: Vec<Utxo>,
}

/// The set of spendable outputs known for a set of owned addresses.
#[derive(Debug, Default)]
pub struct UtxoStore {
    entries: RwLock<Vec<AddressEntry>>,
}

impl UtxoStore {
    /// Instantiate an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full known set for `address`. This is a full refresh, not an
    /// incremental patch: outputs spent or replaced since the last report simply do
    /// not appear in the new set.
    pub fn update(&self, address: &Address, utxos: Vec<Utxo>) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match entries.iter_mut().find(|e| e.address == *address) {
            Some(entry) => entry.utxos = utxos,
            None => entries.push(AddressEntry {
                address: address.clone(),
                utxos,
            }),
        }
    }

    /// A snapshot of all known outputs for the given addresses, in deterministic
    /// insertion order.
    pub fn select(&self, addresses: &[Address]) -> Vec<Utxo> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries
            .iter()
            .filter(|e| addresses.contains(&e.address))
            .flat_map(|e| e.utxos.iter().cloned())
            .collect()
    }
}
