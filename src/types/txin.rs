//! Outpoint, TxIn, and Vin types.

use std::io::{Read, Write};

use crate::{
    hashes::Txid,
    ser::{ByteFormat, SerError, SerResult},
    types::script::ScriptSig,
};

/// A unique identifier for a UTXO: the id of the transaction that created it (in
/// internal little-endian byte order) and the index of the output within that
/// transaction's output vector.
///
/// `Outpoint::null()` and `Outpoint::default()` return the null outpoint, which
/// references a txid of all zeroes and index `0xffff_ffff`. It appears only in coinbase
/// transactions.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Outpoint {
    /// The txid that created the UTXO being pointed to.
    pub txid: Txid,
    /// The index of that UTXO in the creating transaction's output vector.
    pub idx: u32,
}

impl Outpoint {
    /// Instantiate an outpoint from a txid and index.
    pub fn new(txid: Txid, idx: u32) -> Self {
        Self { txid, idx }
    }

    /// The null outpoint used in coinbase inputs.
    pub fn null() -> Self {
        Outpoint {
            txid: Txid::default(),
            idx: 0xffff_ffff,
        }
    }

    /// Instantiate an outpoint from the big-endian (block explorer) txid hex and an
    /// integer index. This is the format UTXO indexers report.
    pub fn from_explorer_format(txid_be_hex: &str, idx: u32) -> SerResult<Self> {
        Ok(Outpoint {
            txid: Txid::from_be_hex(txid_be_hex)?,
            idx,
        })
    }

    /// The big-endian txid hex, suitable for block explorers.
    pub fn txid_be_hex(&self) -> String {
        self.txid.to_be_hex()
    }
}

impl Default for Outpoint {
    fn default() -> Self {
        Outpoint::null()
    }
}

impl ByteFormat for Outpoint {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        36
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        Ok(Outpoint {
            txid: Txid::read_from(reader)?,
            idx: Self::read_u32_le(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = self.txid.write_to(writer)?;
        len += Self::write_u32_le(writer, self.idx)?;
        Ok(len)
    }
}

/// A transaction input. Contains an outpoint referencing an existing UTXO, a
/// `script_sig` carrying the spend authorization (empty until the transaction is
/// finalized), and a sequence number.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq, Default)]
pub struct TxIn {
    /// The outpoint identifying the UTXO being spent.
    pub outpoint: Outpoint,
    /// The authorization information necessary to spend the UTXO.
    pub script_sig: ScriptSig,
    /// The nSequence field.
    pub sequence: u32,
}

impl TxIn {
    /// Instantiate a new TxIn.
    pub fn new<T>(outpoint: Outpoint, script_sig: T, sequence: u32) -> Self
    where
        T: Into<ScriptSig>,
    {
        TxIn {
            outpoint,
            script_sig: script_sig.into(),
            sequence,
        }
    }

    /// Copy the input, stripping the scriptSig information.
    pub fn unsigned(&self) -> TxIn {
        Self::new(self.outpoint, vec![], self.sequence)
    }
}

impl ByteFormat for TxIn {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        let mut len = self.outpoint.serialized_length();
        len += self.script_sig.serialized_length();
        len += 4; // sequence
        len
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        Ok(TxIn {
            outpoint: Outpoint::read_from(reader)?,
            script_sig: ScriptSig::read_from(reader)?,
            sequence: Self::read_u32_le(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = self.outpoint.write_to(writer)?;
        len += self.script_sig.write_to(writer)?;
        len += Self::write_u32_le(writer, self.sequence)?;
        Ok(len)
    }
}

/// Vin is a type alias for `Vec<TxIn>`: the vector of inputs, length-prefixed on the
/// wire.
pub type Vin = Vec<TxIn>;

#[cfg(test)]
mod test {
    use super::*;

    static NULL_OUTPOINT: &str =
        "0000000000000000000000000000000000000000000000000000000000000000ffffffff";

    #[test]
    fn it_serializes_and_deserializes_outpoints() {
        let cases = [
            (
                Outpoint {
                    txid: Txid::default(),
                    idx: 0,
                },
                (0..36).map(|_| "00").collect::<String>(),
            ),
            (Outpoint::null(), NULL_OUTPOINT.to_string()),
        ];
        for case in cases.iter() {
            assert_eq!(case.0.serialized_length(), case.1.len() / 2);
            assert_eq!(case.0.serialize_hex(), case.1);
            assert_eq!(Outpoint::deserialize_hex(&case.1).unwrap(), case.0);
        }
    }

    #[test]
    fn it_reverses_explorer_format_txids() {
        let be = "cffea3f46c73d61c6ed1296494b3c85e9f498629a32d67367a0d9e1bafdd05df";
        let outpoint = Outpoint::from_explorer_format(be, 1).unwrap();
        assert_eq!(outpoint.txid_be_hex(), be);
        assert!(outpoint
            .serialize_hex()
            .starts_with("df05ddaf1b9e0d7a36672da32986499f"));
    }

    #[test]
    fn it_serializes_and_deserializes_inputs() {
        let cases = [
            (
                TxIn {
                    outpoint: Outpoint::null(),
                    script_sig: ScriptSig::null(),
                    sequence: 0x1234abcd,
                },
                format!("{}{}{}", NULL_OUTPOINT, "00", "cdab3412"),
            ),
            (
                TxIn::new(Outpoint::null(), vec![], 0x11223344),
                format!("{}{}{}", NULL_OUTPOINT, "00", "44332211"),
            ),
        ];
        for case in cases.iter() {
            assert_eq!(case.0.serialized_length(), case.1.len() / 2);
            assert_eq!(case.0.serialize_hex(), case.1);
            assert_eq!(TxIn::deserialize_hex(&case.1).unwrap(), case.0);
            assert_eq!(case.0.unsigned(), case.0.clone());
        }
    }
}
