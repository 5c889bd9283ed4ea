//! Simplified access to the `bs58` and `bech32` encoders/decoders for Bitcoin-family
//! addresses. Also defines common encoder errors.

use bech32::{u5, FromBase32, ToBase32, Variant};
use thiserror::Error;

/// Errors arising while encoding or decoding addresses.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The bech32 HRP did not match the expected network prefix.
    #[error("wrong HRP. expected {expected}, got {got}")]
    WrongHrp {
        /// The HRP found in the string.
        got: String,
        /// The HRP this network expects.
        expected: String,
    },

    /// The base58check version byte did not match the expected network version.
    #[error("wrong address version byte. expected {expected:#04x}, got {got:#04x}")]
    WrongVersion {
        /// The version byte found in the payload.
        got: u8,
        /// The version byte this network expects.
        expected: u8,
    },

    /// A witness version this library does not construct outputs for.
    #[error("unsupported witness version: {0}")]
    SegwitVersion(u8),

    /// A witness program whose length is invalid for its version.
    #[error("invalid witness program length: {0}")]
    WitnessProgramLength(usize),

    /// An address payload whose length does not fit the address type.
    #[error("invalid address payload length: {0}")]
    PayloadLength(usize),

    /// The checksum variant did not match the witness version (v0 uses Bech32,
    /// v1+ uses Bech32m).
    #[error("wrong bech32 checksum variant for witness version {0}")]
    WrongVariant(u8),

    /// Bubbled up from the bech32 crate.
    #[error(transparent)]
    Bech32(#[from] bech32::Error),

    /// Bubbled up from the bs58 crate. Covers bad characters and bad checksums.
    #[error(transparent)]
    Base58(#[from] bs58::decode::Error),

    /// The script being encoded is not a standard address-bearing shape.
    #[error("unknown script type")]
    UnknownScriptType,
}

/// Type alias for encoding results.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Encode a version byte and payload to a base58check string.
pub fn encode_base58(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 1);
    data.push(version);
    data.extend_from_slice(payload);
    bs58::encode(data).with_check().into_string()
}

/// Decode a base58check string, verifying the checksum and the expected version byte.
/// Returns the payload without the version byte.
pub fn decode_base58(expected_version: u8, s: &str) -> EncodingResult<Vec<u8>> {
    let data = bs58::decode(s).with_check(None).into_vec()?;
    match data.split_first() {
        Some((&version, payload)) if version == expected_version => Ok(payload.to_vec()),
        Some((&version, _)) => Err(EncodingError::WrongVersion {
            got: version,
            expected: expected_version,
        }),
        None => Err(EncodingError::UnknownScriptType),
    }
}

/// Encode a witness program to a bech32 string. Witness version 0 uses the Bech32
/// checksum; versions 1 through 16 use Bech32m.
pub fn encode_bech32(hrp: &str, version: u8, program: &[u8]) -> EncodingResult<String> {
    let version_u5 = u5::try_from_u8(version)?;
    let variant = if version == 0 {
        Variant::Bech32
    } else {
        Variant::Bech32m
    };
    let mut data = vec![version_u5];
    data.extend(program.to_base32());
    Ok(bech32::encode(hrp, data, variant)?)
}

/// Decode a witness program from a bech32 string, enforcing the expected HRP, the
/// checksum variant appropriate to the witness version, and the version's program
/// length rules. Returns the witness version and program.
pub fn decode_bech32(expected_hrp: &str, s: &str) -> EncodingResult<(u8, Vec<u8>)> {
    let (hrp, data, variant) = bech32::decode(s)?;
    if hrp != expected_hrp {
        return Err(EncodingError::WrongHrp {
            got: hrp,
            expected: expected_hrp.to_owned(),
        });
    }

    let (version_u5, program_u5) = data.split_first().ok_or(EncodingError::UnknownScriptType)?;
    let version = version_u5.to_u8();
    let program = Vec::<u8>::from_base32(program_u5)?;

    match version {
        0 => {
            if variant != Variant::Bech32 {
                return Err(EncodingError::WrongVariant(version));
            }
            if program.len() != 20 && program.len() != 32 {
                return Err(EncodingError::WitnessProgramLength(program.len()));
            }
        }
        1..=16 => {
            if variant != Variant::Bech32m {
                return Err(EncodingError::WrongVariant(version));
            }
            if program.len() < 2 || program.len() > 40 {
                return Err(EncodingError::WitnessProgramLength(program.len()));
            }
        }
        v => return Err(EncodingError::SegwitVersion(v)),
    }

    Ok((version, program))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_round_trips_base58check() {
        // The BIP173 example key's hash, as a mainnet P2PKH address.
        let payload = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        let encoded = encode_base58(0x00, &payload);
        assert_eq!(encoded, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(decode_base58(0x00, &encoded).unwrap(), payload);
    }

    #[test]
    fn it_rejects_foreign_version_bytes_and_bad_checksums() {
        let payload = [0x55u8; 20];
        let testnet = encode_base58(0x6f, &payload);
        match decode_base58(0x00, &testnet) {
            Err(EncodingError::WrongVersion {
                got: 0x6f,
                expected: 0x00,
            }) => {}
            other => panic!("expected version error, got {:?}", other),
        }

        // Flip the final character. The embedded checksum no longer matches.
        assert!(matches!(
            decode_base58(0x00, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ"),
            Err(EncodingError::Base58(_))
        ));
    }

    #[test]
    fn it_round_trips_bech32_witness_programs() {
        let program = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        let encoded = encode_bech32("bc", 0, &program).unwrap();
        assert_eq!(encoded, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        assert_eq!(decode_bech32("bc", &encoded).unwrap(), (0, program));
    }

    #[test]
    fn it_enforces_hrp_and_program_lengths() {
        assert!(matches!(
            decode_bech32("tb", "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"),
            Err(EncodingError::WrongHrp { .. })
        ));

        // A v0 program of 12 bytes is not a valid witness program.
        let encoded = encode_bech32("bc", 0, &[0xab; 12]).unwrap();
        assert!(matches!(
            decode_bech32("bc", &encoded),
            Err(EncodingError::WitnessProgramLength(12))
        ));

        // Single-character corruption is always caught by the bech32 checksum.
        assert!(decode_bech32("bc", "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5").is_err());
    }

    #[test]
    fn it_uses_bech32m_for_newer_witness_versions() {
        let program = [0xcd; 32];
        let encoded = encode_bech32("bc", 1, &program).unwrap();
        let (version, decoded) = decode_bech32("bc", &encoded).unwrap();
        assert_eq!(version, 1);
        assert_eq!(decoded, program);
    }
}
