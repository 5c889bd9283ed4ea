//! Network definitions. These are the main interface for accessing the library: pick a
//! network's encoder and builder aliases and the address semantics follow.

use crate::{
    builder::SpendBuilder,
    enc::encoder::{BitcoinEncoder, NetworkParams},
};

/// Param struct for Bitcoin mainnet.
#[derive(Debug, Clone)]
pub struct Main;

impl NetworkParams for Main {
    const HRP: &'static str = "bc";
    const PKH_VERSION: u8 = 0x00;
    const SH_VERSION: u8 = 0x05;
}

/// Param struct for Bitcoin testnet.
#[derive(Debug, Clone)]
pub struct Test;

impl NetworkParams for Test {
    const HRP: &'static str = "tb";
    const PKH_VERSION: u8 = 0x6f;
    const SH_VERSION: u8 = 0xc4;
}

/// Param struct for Litecoin mainnet. Uses the modern `M`-style script-hash version.
#[derive(Debug, Clone)]
pub struct Ltc;

impl NetworkParams for Ltc {
    const HRP: &'static str = "ltc";
    const PKH_VERSION: u8 = 0x30;
    const SH_VERSION: u8 = 0x32;
}

/// An encoder for Bitcoin mainnet.
pub type MainnetEncoder = BitcoinEncoder<Main>;

/// An encoder for Bitcoin testnet.
pub type TestnetEncoder = BitcoinEncoder<Test>;

/// An encoder for Litecoin mainnet.
pub type LitecoinEncoder = BitcoinEncoder<Ltc>;

/// A spend builder for Bitcoin mainnet.
pub type MainnetSpendBuilder = SpendBuilder<Main>;

/// A spend builder for Bitcoin testnet.
pub type TestnetSpendBuilder = SpendBuilder<Test>;

/// A spend builder for Litecoin mainnet.
pub type LitecoinSpendBuilder = SpendBuilder<Ltc>;

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        enc::encoder::{AddressEncoder, AddressKind},
        keys::WalletPubkey,
    };

    #[test]
    fn it_derives_network_specific_addresses_from_one_key() {
        let key = WalletPubkey::from_hex(
            "036db397495fa03fe263ee4021b77c49496e5c7db8266e6e33a03d5b3a370c3d6d",
        )
        .unwrap();

        let mainnet = MainnetEncoder::derive_address(&key, AddressKind::Segwit).unwrap();
        let litecoin = LitecoinEncoder::derive_address(&key, AddressKind::Segwit).unwrap();
        assert!(mainnet.as_string().starts_with("bc1"));
        assert!(litecoin.as_string().starts_with("ltc1"));

        // Each network's encoder rejects the other's strings.
        assert!(MainnetEncoder::string_to_address(litecoin.as_string()).is_err());
        assert!(LitecoinEncoder::string_to_address(mainnet.as_string()).is_err());
    }
}
