//! TxOut and Vout types.

use std::io::{Read, Write};

use crate::{
    ser::{ByteFormat, SerError, SerResult},
    types::script::ScriptPubkey,
};

/// An output: a new UTXO to be created. The value is encoded as an LE u64, the locking
/// script encodes the spending constraints.
///
/// `TxOut::null()` returns the "null" output with value `0xffff_ffff_ffff_ffff` and an
/// empty locking script, used only as padding within legacy SIGHASH_SINGLE
/// calculations.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TxOut {
    /// The value of the output in the chain's smallest unit.
    pub value: u64,
    /// The locking script constraining how the output may be spent.
    pub script_pubkey: ScriptPubkey,
}

impl Default for TxOut {
    fn default() -> Self {
        Self::null()
    }
}

impl TxOut {
    /// Instantiate a new TxOut.
    pub fn new<T>(value: u64, script_pubkey: T) -> Self
    where
        T: Into<ScriptPubkey>,
    {
        TxOut {
            value,
            script_pubkey: script_pubkey.into(),
        }
    }

    /// Instantiate the null TxOut used in legacy SIGHASH_SINGLE padding.
    pub fn null() -> Self {
        TxOut {
            value: 0xffff_ffff_ffff_ffff,
            script_pubkey: ScriptPubkey::null(),
        }
    }
}

impl ByteFormat for TxOut {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        8 + self.script_pubkey.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        Ok(TxOut {
            value: Self::read_u64_le(reader)?,
            script_pubkey: ScriptPubkey::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u64_le(writer, self.value)?;
        len += self.script_pubkey.write_to(writer)?;
        Ok(len)
    }
}

/// Vout is a type alias for `Vec<TxOut>`: the vector of outputs, length-prefixed on the
/// wire.
pub type Vout = Vec<TxOut>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_serializes_and_deserializes_outputs() {
        let cases = [
            (TxOut::new(0u64, vec![]), "000000000000000000", 9),
            (TxOut::null(), "ffffffffffffffff00", 9),
            (
                TxOut::new(
                    15000u64,
                    hex::decode("0014751e76e8199196d454941c45d1b3a323f1433bd6").unwrap(),
                ),
                "983a000000000000160014751e76e8199196d454941c45d1b3a323f1433bd6",
                31,
            ),
        ];
        for case in cases.iter() {
            assert_eq!(case.0.serialized_length(), case.2);
            assert_eq!(case.0.serialize_hex(), case.1);
            assert_eq!(TxOut::deserialize_hex(case.1).unwrap(), case.0);
        }
    }
}
