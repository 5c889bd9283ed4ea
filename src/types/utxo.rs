//! UTXO struct. Holds the information necessary to spend an output and to compute the
//! sighash committing to it.

use crate::{
    ser::SerResult,
    types::{
        script::{Script, ScriptPubkey},
        txin::Outpoint,
    },
};

/// Information necessary to spend an output: its outpoint, value, and the locking
/// script of the previous output.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Utxo {
    /// The outpoint identifying this UTXO.
    pub outpoint: Outpoint,
    /// The value of this UTXO in the chain's smallest unit.
    pub value: u64,
    /// The locking script of the previous output.
    pub script_pubkey: ScriptPubkey,
}

impl Utxo {
    /// Instantiate a new UTXO.
    pub fn new(outpoint: Outpoint, value: u64, script_pubkey: ScriptPubkey) -> Self {
        Utxo {
            outpoint,
            value,
            script_pubkey,
        }
    }

    /// Instantiate a UTXO from the fields a UTXO indexer reports: the big-endian
    /// (display) txid hex, the output index, the value, and the locking script hex.
    pub fn from_indexer(
        tx_hash_be: &str,
        idx: u32,
        value: u64,
        script_pubkey_hex: &str,
    ) -> SerResult<Self> {
        Ok(Utxo {
            outpoint: Outpoint::from_explorer_format(tx_hash_be, idx)?,
            value,
            script_pubkey: hex::decode(script_pubkey_hex)
                .map_err(crate::ser::SerError::from)?
                .into(),
        })
    }

    /// The script each signature on this UTXO commits to: the previous output's locking
    /// script, spliced into the signed input during sighash computation.
    pub fn signing_script(&self) -> Script {
        Script::from(&self.script_pubkey)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_builds_utxos_from_indexer_reports() {
        let utxo = Utxo::from_indexer(
            "8b907ad6ee8c6b1d25375ce9696089fec400851ca46260927d04892ec88807ef",
            0,
            39_920_000,
            "0014309a0c6efa0da7966d5c42dc5a928f6baf0e47ef",
        )
        .unwrap();
        assert_eq!(
            utxo.outpoint.txid_be_hex(),
            "8b907ad6ee8c6b1d25375ce9696089fec400851ca46260927d04892ec88807ef"
        );
        assert_eq!(utxo.outpoint.idx, 0);
        assert_eq!(utxo.value, 39_920_000);
        assert_eq!(utxo.signing_script().len(), 22);
    }

    #[test]
    fn it_serdes_utxos_as_hex_fields() {
        let utxo = Utxo::from_indexer(
            "cffea3f46c73d61c6ed1296494b3c85e9f498629a32d67367a0d9e1bafdd05df",
            1,
            12_210_000,
            "0014309a0c6efa0da7966d5c42dc5a928f6baf0e47ef",
        )
        .unwrap();
        let json = serde_json::to_string(&utxo).unwrap();
        // Scripts serialize as their length-prefixed wire hex.
        assert!(json.contains("160014309a0c6efa0da7966d5c42dc5a928f6baf0e47ef"));
        let back: Utxo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, utxo);
    }

    #[test]
    fn it_rejects_bad_indexer_hex() {
        assert!(Utxo::from_indexer("zz", 0, 0, "00").is_err());
        assert!(Utxo::from_indexer(
            "8b907ad6ee8c6b1d25375ce9696089fec400851ca46260927d04892ec88807ef",
            0,
            0,
            "not hex"
        )
        .is_err());
    }
}
