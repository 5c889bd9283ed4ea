//! Validated wallet public keys.
//!
//! The engine never touches private keys. Signing happens in an external module that
//! receives sighash digests and returns raw signatures; the only key material here is
//! the wallet's secp256k1 public key, which determines the wallet's addresses and is
//! embedded verbatim in finalized scriptSigs.

use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use thiserror::Error;

use crate::hashes::{hash160, Hash160Digest};

/// Errors arising from invalid key material.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum KeyError {
    /// The supplied bytes are not a valid sec1-encoded secp256k1 point.
    #[error("invalid secp256k1 public key")]
    InvalidPublicKey,
}

/// A validated secp256k1 public key.
///
/// Retains the exact encoding supplied by the caller: legacy P2PKH addresses hash the
/// key bytes as provided, so a compressed and an uncompressed encoding of the same
/// point are distinct wallets on the legacy side. Witness addresses always hash the
/// compressed form, so both encodings share one segwit address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalletPubkey {
    bytes: Vec<u8>,
    point: PublicKey,
}

impl WalletPubkey {
    /// Parse and validate a sec1-encoded public key (33-byte compressed or 65-byte
    /// uncompressed).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != 33 && bytes.len() != 65 {
            return Err(KeyError::InvalidPublicKey);
        }
        let point = PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self {
            bytes: bytes.to_vec(),
            point,
        })
    }

    /// Parse a hex-encoded sec1 public key.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_bytes(&bytes)
    }

    /// The key bytes exactly as supplied.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The compressed (33-byte) encoding of the point.
    pub fn compressed(&self) -> [u8; 33] {
        let encoded = self.point.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// True if the supplied encoding was compressed.
    pub fn is_compressed(&self) -> bool {
        self.bytes.len() == 33
    }

    /// `hash160` of the key bytes exactly as supplied. The payload of this wallet's
    /// legacy P2PKH address.
    pub fn pkh(&self) -> Hash160Digest {
        hash160(&self.bytes)
    }

    /// `hash160` of the compressed encoding. The payload of this wallet's P2WPKH
    /// address, regardless of the supplied encoding.
    pub fn wpkh(&self) -> Hash160Digest {
        hash160(&self.compressed())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const UNCOMPRESSED: &str = "046db397495fa03fe263ee4021b77c49496e5c7db8266e6e33a03d5b3a370c3d6d744a863b14de2457d82bee322416523e336530760c4533aee980f4a4cdb9a98d";
    const COMPRESSED: &str = "036db397495fa03fe263ee4021b77c49496e5c7db8266e6e33a03d5b3a370c3d6d";

    #[test]
    fn it_compresses_uncompressed_keys() {
        let key = WalletPubkey::from_hex(UNCOMPRESSED).unwrap();
        assert!(!key.is_compressed());
        assert_eq!(hex::encode(key.compressed()), COMPRESSED);

        let key = WalletPubkey::from_hex(COMPRESSED).unwrap();
        assert!(key.is_compressed());
        assert_eq!(hex::encode(key.compressed()), COMPRESSED);
    }

    #[test]
    fn it_hashes_the_supplied_encoding_for_legacy() {
        let uncompressed = WalletPubkey::from_hex(UNCOMPRESSED).unwrap();
        let compressed = WalletPubkey::from_hex(COMPRESSED).unwrap();

        // Same point, same witness payload.
        assert_eq!(uncompressed.wpkh(), compressed.wpkh());
        assert_eq!(
            hex::encode(compressed.wpkh()),
            "309a0c6efa0da7966d5c42dc5a928f6baf0e47ef"
        );

        // Different bytes, different legacy payloads.
        assert_ne!(uncompressed.pkh(), compressed.pkh());
        assert_eq!(compressed.pkh(), compressed.wpkh());
    }

    #[test]
    fn it_rejects_malformed_keys() {
        // Wrong length.
        assert_eq!(
            WalletPubkey::from_bytes(&[0x02; 32]),
            Err(KeyError::InvalidPublicKey)
        );
        // x coordinate overflows the field modulus.
        let mut bad = vec![0x02];
        bad.extend_from_slice(&[0xff; 32]);
        assert_eq!(
            WalletPubkey::from_bytes(&bad),
            Err(KeyError::InvalidPublicKey)
        );
        // Not hex.
        assert_eq!(
            WalletPubkey::from_hex("not a key"),
            Err(KeyError::InvalidPublicKey)
        );
    }
}
