//! Address types, the `AddressEncoder` trait, and the parameterized encoder for
//! Bitcoin-family networks.

use std::marker::PhantomData;

use crate::{
    enc::bases::{
        decode_base58, decode_bech32, encode_base58, encode_bech32, EncodingError,
        EncodingResult,
    },
    hashes::Hash160Digest,
    keys::WalletPubkey,
    types::script::{ScriptPubkey, ScriptType},
};

/// The available address types, implemented as a type enum around strings.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Address {
    /// Legacy pay to public key hash.
    Pkh(String),
    /// Legacy pay to script hash.
    Sh(String),
    /// Witness pay to public key hash.
    Wpkh(String),
    /// Witness pay to script hash.
    Wsh(String),
}

impl Address {
    /// Get a reference to the string underlying the address type.
    pub fn as_string(&self) -> &str {
        match self {
            Address::Pkh(s) => s,
            Address::Sh(s) => s,
            Address::Wpkh(s) => s,
            Address::Wsh(s) => s,
        }
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_string()
    }
}

/// The two address styles derivable from a wallet public key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AddressKind {
    /// Base58check P2PKH.
    Legacy,
    /// Bech32 witness-v0 P2WPKH.
    Segwit,
}

/// The encoding parameters of a Bitcoin-like network: the base58check version bytes
/// for legacy addresses and the bech32 human-readable prefix for witness addresses.
pub trait NetworkParams {
    /// The bech32 HRP. "bc" for Bitcoin mainnet.
    const HRP: &'static str;
    /// The legacy PKH base58check version byte. 0x00 for Bitcoin mainnet.
    const PKH_VERSION: u8;
    /// The legacy SH base58check version byte. 0x05 for Bitcoin mainnet.
    const SH_VERSION: u8;
}

/// Translates between human-readable addresses and the in-protocol locking scripts
/// they denote.
pub trait AddressEncoder {
    /// The network's address type.
    type Address;
    /// An error type returned by fallible encode/decode operations.
    type Error;
    /// The in-protocol recipient type. Usually a locking script.
    type RecipientIdentifier;

    /// Encode a locking script as an address. Errors on non-address-bearing scripts.
    fn encode_address(s: &Self::RecipientIdentifier) -> Result<Self::Address, Self::Error>;

    /// Decode an address into the locking script it denotes.
    fn decode_address(addr: &Self::Address) -> Result<Self::RecipientIdentifier, Self::Error>;

    /// Parse and validate an address string, wrapping it in the `Address` type.
    fn string_to_address(s: &str) -> Result<Self::Address, Self::Error>;
}

/// The standard encoder for Bitcoin-family networks, parameterized by a
/// [`NetworkParams`] type to differentiate networks.
#[derive(Debug, Clone)]
pub struct BitcoinEncoder<P: NetworkParams>(PhantomData<fn(P) -> P>);

impl<P: NetworkParams> AddressEncoder for BitcoinEncoder<P> {
    type Address = Address;
    type Error = EncodingError;
    type RecipientIdentifier = ScriptPubkey;

    fn encode_address(s: &ScriptPubkey) -> EncodingResult<Address> {
        match s.standard_type() {
            ScriptType::Pkh(payload) => Ok(Address::Pkh(encode_base58(
                P::PKH_VERSION,
                payload.as_ref(),
            ))),
            ScriptType::Sh(payload) => Ok(Address::Sh(encode_base58(
                P::SH_VERSION,
                payload.as_ref(),
            ))),
            ScriptType::Wpkh(payload) => {
                Ok(Address::Wpkh(encode_bech32(P::HRP, 0, payload.as_ref())?))
            }
            ScriptType::Wsh(payload) => Ok(Address::Wsh(encode_bech32(P::HRP, 0, &payload)?)),
            ScriptType::NonStandard => Err(EncodingError::UnknownScriptType),
        }
    }

    fn decode_address(addr: &Address) -> EncodingResult<ScriptPubkey> {
        match addr {
            Address::Pkh(s) => {
                let payload = decode_base58(P::PKH_VERSION, s)?;
                Ok(ScriptPubkey::p2pkh(&hash_payload(&payload)?))
            }
            Address::Sh(s) => {
                let payload = decode_base58(P::SH_VERSION, s)?;
                Ok(ScriptPubkey::p2sh(&hash_payload(&payload)?))
            }
            Address::Wpkh(s) => {
                let (_, program) = decode_bech32(P::HRP, s)?;
                Ok(ScriptPubkey::p2wpkh(&hash_payload(&program)?))
            }
            Address::Wsh(s) => {
                let (_, program) = decode_bech32(P::HRP, s)?;
                let payload: [u8; 32] = program
                    .try_into()
                    .map_err(|v: Vec<u8>| EncodingError::PayloadLength(v.len()))?;
                Ok(ScriptPubkey::p2wsh(&payload))
            }
        }
    }

    fn string_to_address(s: &str) -> EncodingResult<Address> {
        if s.starts_with(P::HRP) {
            let (version, program) = decode_bech32(P::HRP, s)?;
            if version != 0 {
                return Err(EncodingError::SegwitVersion(version));
            }
            return match program.len() {
                20 => Ok(Address::Wpkh(s.to_owned())),
                32 => Ok(Address::Wsh(s.to_owned())),
                l => Err(EncodingError::WitnessProgramLength(l)),
            };
        }
        if decode_base58(P::PKH_VERSION, s).is_ok() {
            Ok(Address::Pkh(s.to_owned()))
        } else if decode_base58(P::SH_VERSION, s).is_ok() {
            Ok(Address::Sh(s.to_owned()))
        } else {
            Err(EncodingError::UnknownScriptType)
        }
    }
}

impl<P: NetworkParams> BitcoinEncoder<P> {
    /// Derive an address of the requested kind from a wallet public key. Legacy hashes
    /// the key bytes exactly as supplied; segwit always hashes the compressed form.
    pub fn derive_address(key: &WalletPubkey, kind: AddressKind) -> EncodingResult<Address> {
        match kind {
            AddressKind::Legacy => Ok(Address::Pkh(encode_base58(
                P::PKH_VERSION,
                key.pkh().as_ref(),
            ))),
            AddressKind::Segwit => Ok(Address::Wpkh(encode_bech32(
                P::HRP,
                0,
                key.wpkh().as_ref(),
            )?)),
        }
    }

    /// Check whether a string is a well-formed address for this network. Accepts any
    /// checksum-valid base58check string with one of the network's version bytes, and
    /// any checksum-valid bech32/bech32m string with the network's HRP and a
    /// version-consistent witness program. Never errors.
    pub fn is_valid(s: &str) -> bool {
        if decode_bech32(P::HRP, s).is_ok() {
            return true;
        }
        decode_base58(P::PKH_VERSION, s).is_ok() || decode_base58(P::SH_VERSION, s).is_ok()
    }
}

fn hash_payload(payload: &[u8]) -> EncodingResult<Hash160Digest> {
    let bytes: [u8; 20] = payload
        .try_into()
        .map_err(|_| EncodingError::PayloadLength(payload.len()))?;
    Ok(bytes.into())
}
