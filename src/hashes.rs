//! Cryptographic digests used by the wire format: Bitcoin-style double-SHA256 and
//! `ripemd160(sha256(x))`, plus marked newtypes to prevent type confusion between txids
//! and sighash digests.

use std::io::{Result as IoResult, Write};

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

mark_hash256!(
    /// A marked double-SHA256 digest representing a transaction ID, in internal
    /// (little-endian) byte order.
    Txid
);

mark_hash256!(
    /// A marked double-SHA256 digest of a sighash preimage. This is the value handed to
    /// an external signer.
    SighashDigest
);

/// A 20-byte `ripemd160(sha256(x))` digest. This is the payload of P2PKH and P2WPKH
/// locking scripts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Hash160Digest(pub [u8; 20]);

impl AsRef<[u8]> for Hash160Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for Hash160Digest {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// Compute `ripemd160(sha256(data))`.
pub fn hash160(data: &[u8]) -> Hash160Digest {
    let sha = Sha256::digest(data);
    let mut digest = [0u8; 20];
    digest.copy_from_slice(&Ripemd160::digest(&sha[..]));
    Hash160Digest(digest)
}

/// Compute the double-SHA256 of `data`.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    let mut w = Hash256Writer::default();
    // Writing to a hasher cannot fail.
    let _ = w.write(data);
    w.finish()
}

/// A struct exposing a Bitcoin-style double-SHA256 `Write` interface by wrapping an
/// internal SHA2 instance. Used to stream transaction serializations directly into the
/// hasher for txid and sighash computation.
#[derive(Clone, Default)]
pub struct Hash256Writer {
    internal: Sha256,
}

impl Write for Hash256Writer {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        self.internal.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

impl Hash256Writer {
    /// Consume the writer and produce the double-SHA256 digest of everything written.
    pub fn finish(self) -> [u8; 32] {
        let first = self.internal.finalize();
        let second = Sha256::digest(&first[..]);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&second[..]);
        digest
    }

    /// Consume the writer and produce a marked [`Txid`].
    pub fn finish_txid(self) -> Txid {
        Txid(self.finish())
    }

    /// Consume the writer and produce a marked [`SighashDigest`].
    pub fn finish_sighash(self) -> SighashDigest {
        SighashDigest(self.finish())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ser::ByteFormat;

    #[test]
    fn it_computes_double_sha256() {
        let mut w = Hash256Writer::default();
        w.write_all(&[0]).unwrap();
        w.flush().unwrap();
        assert_eq!(
            hex::encode(w.finish()),
            "1406e05881e299367766d313e26c05564ec91bf721d31726bd6e46e60689539a"
        );
        assert_eq!(
            hex::encode(hash256(&[0])),
            "1406e05881e299367766d313e26c05564ec91bf721d31726bd6e46e60689539a"
        );
    }

    #[test]
    fn it_round_trips_marked_digests_through_be_hex() {
        let be = "8b907ad6ee8c6b1d25375ce9696089fec400851ca46260927d04892ec88807ef";
        let txid = Txid::from_be_hex(be).unwrap();
        // Internal order is the byte-reversed display order.
        assert_eq!(
            txid.serialize_hex(),
            "ef0788c82e89047d926062a41c8500c4fe896069e95c37251d6b8ceed67a908b"
        );
        assert_eq!(txid.to_be_hex(), be);
        assert_eq!(txid.reversed().reversed(), txid);
        assert_eq!(txid.serialized_length(), 32);
    }

    #[test]
    fn it_computes_hash160() {
        // hash160 of the generator point's compressed encoding. Widely published as the
        // payload of the BIP173 example addresses.
        let pubkey = hex::decode(
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        )
        .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }
}
