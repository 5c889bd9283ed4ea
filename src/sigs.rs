//! Acceptance and re-encoding of externally-produced ECDSA signatures.
//!
//! Hardware signers return either a fixed 64-byte `r || s` pair or a DER-encoded
//! signature, and may produce high-S values. Consensus-valid scriptSigs require DER
//! with low-S, so everything is normalized here before it is embedded.

use k256::ecdsa::Signature;
use thiserror::Error;

/// Errors arising from unusable signature bytes.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SigError {
    /// The bytes parse as neither a 64-byte `r || s` pair nor a DER signature.
    #[error("malformed ECDSA signature ({0} bytes)")]
    Malformed(usize),
}

/// Parse an externally-produced signature and re-encode it as low-S DER.
///
/// Exactly 64 bytes are interpreted as `r || s` (the raw form secure elements emit);
/// any other length must parse as DER. High-S signatures are normalized, already-low
/// signatures pass through unchanged.
pub fn to_low_s_der(raw: &[u8]) -> Result<Vec<u8>, SigError> {
    let parsed = if raw.len() == 64 {
        Signature::from_slice(raw)
    } else {
        Signature::from_der(raw)
    };
    let sig = parsed.map_err(|_| SigError::Malformed(raw.len()))?;
    let sig = sig.normalize_s().unwrap_or(sig);
    Ok(sig.to_der().as_bytes().to_vec())
}

#[cfg(test)]
mod test {
    use super::*;

    // The secp256k1 group order, minus one.
    const N_MINUS_ONE: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140";

    fn scalar_bytes(low: u8) -> [u8; 32] {
        let mut b = [0u8; 32];
        b[31] = low;
        b
    }

    #[test]
    fn it_encodes_raw_signatures_as_der() {
        let mut raw = [0u8; 64];
        raw[31] = 1; // r = 1
        raw[63] = 1; // s = 1
        assert_eq!(hex::encode(to_low_s_der(&raw).unwrap()), "3006020101020101");
    }

    #[test]
    fn it_normalizes_high_s_values() {
        // s = n - 1 is the additive inverse of 1, so normalization flips it to 1.
        let mut raw = vec![];
        raw.extend_from_slice(&scalar_bytes(1));
        raw.extend_from_slice(&hex::decode(N_MINUS_ONE).unwrap());
        assert_eq!(hex::encode(to_low_s_der(&raw).unwrap()), "3006020101020101");
    }

    #[test]
    fn it_passes_der_input_through() {
        let der = hex::decode("3006020101020101").unwrap();
        assert_eq!(to_low_s_der(&der).unwrap(), der);
    }

    #[test]
    fn it_rejects_garbage() {
        assert_eq!(to_low_s_der(&[0xab; 63]), Err(SigError::Malformed(63)));
        assert_eq!(to_low_s_der(&[]), Err(SigError::Malformed(0)));
        // r = 0 is not a valid scalar.
        let mut raw = [0u8; 64];
        raw[63] = 1;
        assert_eq!(to_low_s_der(&raw), Err(SigError::Malformed(64)));
    }
}
