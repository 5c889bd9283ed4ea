//! Opaque script newtypes and a classifier for standard locking-script shapes.
//!
//! Scripts are treated as wrapped byte vectors with no execution semantics. We do not
//! handle assembly, disassembly, or script interpretation; a script here is the small
//! bytecode a transaction commits to, nothing more.

use crate::hashes::Hash160Digest;

wrap_script_bytes!(
    /// An opaque script, used as the sighash scriptCode. `Script::null()` and
    /// `Script::default()` return the empty byte vector.
    Script
);
wrap_script_bytes!(
    /// The unlocking data placed in a transaction input. Empty until a transaction is
    /// finalized with externally-produced signatures.
    ScriptSig
);
wrap_script_bytes!(
    /// The locking script of a transaction output, encoding its spending constraints.
    ScriptPubkey
);

impl_script_conversion!(Script, ScriptPubkey);
impl_script_conversion!(Script, ScriptSig);
impl_script_conversion!(ScriptPubkey, ScriptSig);

/// Standard locking-script shapes, with their hash payloads, and a catch-all for
/// everything else.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScriptType {
    /// Pay to public key hash.
    Pkh(Hash160Digest),
    /// Pay to script hash.
    Sh(Hash160Digest),
    /// Witness pay to public key hash.
    Wpkh(Hash160Digest),
    /// Witness pay to script hash.
    Wsh([u8; 32]),
    /// Nonstandard or unknown script shape. May be a newer witness version.
    NonStandard,
}

impl ScriptPubkey {
    /// The `OP_DUP OP_HASH160 <20B> OP_EQUALVERIFY OP_CHECKSIG` locking script.
    pub fn p2pkh(hash: &Hash160Digest) -> Self {
        let mut v = vec![0x76, 0xa9, 0x14];
        v.extend_from_slice(hash.as_ref());
        v.extend_from_slice(&[0x88, 0xac]);
        v.into()
    }

    /// The `OP_HASH160 <20B> OP_EQUAL` locking script.
    pub fn p2sh(hash: &Hash160Digest) -> Self {
        let mut v = vec![0xa9, 0x14];
        v.extend_from_slice(hash.as_ref());
        v.push(0x87);
        v.into()
    }

    /// The version-0 witness program `OP_0 <20B>`.
    pub fn p2wpkh(hash: &Hash160Digest) -> Self {
        let mut v = vec![0x00, 0x14];
        v.extend_from_slice(hash.as_ref());
        v.into()
    }

    /// The version-0 witness program `OP_0 <32B>`.
    pub fn p2wsh(hash: &[u8; 32]) -> Self {
        let mut v = vec![0x00, 0x20];
        v.extend_from_slice(hash);
        v.into()
    }

    /// Inspect the script to determine its standard type, extracting the hash payload.
    pub fn standard_type(&self) -> ScriptType {
        let items = self.items();
        match items.len() {
            0x19 => {
                // PKH
                if items[0..3] == [0x76, 0xa9, 0x14] && items[0x17..] == [0x88, 0xac] {
                    let mut payload = [0u8; 20];
                    payload.copy_from_slice(&items[3..23]);
                    ScriptType::Pkh(payload.into())
                } else {
                    ScriptType::NonStandard
                }
            }
            0x17 => {
                // SH
                if items[0..2] == [0xa9, 0x14] && items[0x16..] == [0x87] {
                    let mut payload = [0u8; 20];
                    payload.copy_from_slice(&items[2..22]);
                    ScriptType::Sh(payload.into())
                } else {
                    ScriptType::NonStandard
                }
            }
            0x16 => {
                // WPKH
                if items[0..2] == [0x00, 0x14] {
                    let mut payload = [0u8; 20];
                    payload.copy_from_slice(&items[2..]);
                    ScriptType::Wpkh(payload.into())
                } else {
                    ScriptType::NonStandard
                }
            }
            0x22 => {
                // WSH
                if items[0..2] == [0x00, 0x20] {
                    let mut payload = [0u8; 32];
                    payload.copy_from_slice(&items[2..]);
                    ScriptType::Wsh(payload)
                } else {
                    ScriptType::NonStandard
                }
            }
            _ => ScriptType::NonStandard,
        }
    }
}

impl ScriptSig {
    /// Assemble the standard P2PKH unlocking data: a push of the DER signature with its
    /// trailing sighash-type byte, then a push of the public key. Both pushes use a
    /// single length byte, which holds for all DER-encoded ECDSA signatures and sec1
    /// public keys.
    pub fn p2pkh(sig_with_hash_byte: &[u8], pubkey: &[u8]) -> Self {
        let mut v = Vec::with_capacity(2 + sig_with_hash_byte.len() + pubkey.len());
        v.push(sig_with_hash_byte.len() as u8);
        v.extend_from_slice(sig_with_hash_byte);
        v.push(pubkey.len() as u8);
        v.extend_from_slice(pubkey);
        v.into()
    }
}
