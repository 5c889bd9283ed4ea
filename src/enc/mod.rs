//! Address encoding: base58check and bech32 bases, plus the network-parameterized
//! encoder.

pub mod bases;
pub mod encoder;

pub use bases::{EncodingError, EncodingResult};
pub use encoder::{Address, AddressEncoder, AddressKind, BitcoinEncoder, NetworkParams};
