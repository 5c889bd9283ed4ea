//! Re-exports of the types most callers need.

pub use crate::{
    builder::{BuildError, FeeQuote, SighashPreimage, SpendBuilder, TxIntent, DUST_LIMIT},
    enc::{Address, AddressEncoder, AddressKind, BitcoinEncoder, EncodingError, NetworkParams},
    hashes::{Hash160Digest, SighashDigest, Txid},
    keys::WalletPubkey,
    nets::*,
    ordering::SortPolicy,
    ser::ByteFormat,
    store::UtxoStore,
    types::*,
};
