//! The legacy transaction type, its wire codec, and the legacy sighash algorithm.

use std::io::{Error as IoError, Read, Write};

use thiserror::Error;

use crate::{
    hashes::{Hash256Writer, SighashDigest, Txid},
    ser::{prefix_byte_len, ByteFormat, SerError},
    types::{
        script::{Script, ScriptSig},
        txin::{TxIn, Vin},
        txout::{TxOut, Vout},
    },
};

/// An error type for transaction objects.
#[derive(Debug, Error)]
pub enum TxError {
    /// Serialization-related errors.
    #[error(transparent)]
    Ser(#[from] SerError),

    /// IO error bubbled up from a `Write` passed to a serialization call.
    #[error(transparent)]
    Io(#[from] IoError),

    /// SIGHASH_NONE is unsupported.
    #[error("SIGHASH_NONE is unsupported")]
    NoneUnsupported,

    /// Satoshi's SIGHASH_SINGLE bug (input index beyond the output vector) behaves
    /// insecurely. We refuse to reproduce it.
    #[error("SIGHASH_SINGLE bug is unsupported")]
    SighashSingleBug,

    /// Caller provided an unknown sighash flag to `Sighash::from_u8`.
    #[error("unknown sighash flag: {0:#04x}")]
    UnknownSighash(u8),

    /// Caller referenced an input index the transaction does not have.
    #[error("input index {index} out of range (tx has {len} inputs)")]
    MissingInput {
        /// The requested input index.
        index: usize,
        /// The number of inputs in the transaction.
        len: usize,
    },
}

/// Type alias for results with TxError.
pub type TxResult<T> = Result<T, TxError>;

/// Supported sighash modes.
///
/// `All` commits to all inputs and all outputs: no further modification of the
/// transaction is possible without invalidating the signature. The `AnyoneCanPay`
/// variants commit to only the signed input; `Single` variants commit to only the
/// output at the signed input's index. SIGHASH_NONE is deliberately unrepresentable.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sighash {
    /// Sign all inputs and all outputs.
    All = 0x01,
    /// Sign all inputs and the output at the same index.
    Single = 0x03,
    /// Sign one input and all outputs.
    AllAnyoneCanPay = 0x81,
    /// Sign one input and the output at the same index.
    SingleAnyoneCanPay = 0x83,
}

impl Sighash {
    /// Convert a u8 into a Sighash flag, or an error.
    pub fn from_u8(flag: u8) -> TxResult<Sighash> {
        match flag {
            0x01 => Ok(Sighash::All),
            0x03 => Ok(Sighash::Single),
            0x81 => Ok(Sighash::AllAnyoneCanPay),
            0x83 => Ok(Sighash::SingleAnyoneCanPay),
            0x02 | 0x82 => Err(TxError::NoneUnsupported),
            _ => Err(TxError::UnknownSighash(flag)),
        }
    }

    /// True for the ANYONECANPAY variants.
    pub fn is_anyone_can_pay(&self) -> bool {
        (*self as u8) & 0x80 == 0x80
    }

    /// True for the SINGLE variants.
    pub fn is_single(&self) -> bool {
        (*self as u8) & 0x1f == 0x03
    }
}

/// Arguments required to compute the sighash digest for one input.
///
/// After signing the digest, the signer MUST append the sighash flag byte to the
/// resulting signature before it is embedded in a scriptSig.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SighashArgs {
    /// The index of the input being signed.
    pub index: usize,
    /// The sighash mode to use.
    pub sighash_flag: Sighash,
    /// The locking script of the prevout being spent, spliced in as the scriptCode the
    /// signature commits to.
    pub prevout_script: Script,
}

/// A legacy (non-witness) transaction.
///
/// # Wire format
///
/// `version (4B LE) | compact-size input count | inputs | compact-size output count |
/// outputs | locktime (4B LE)`
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq, Default)]
pub struct LegacyTx {
    pub(crate) version: u32,
    pub(crate) vin: Vin,
    pub(crate) vout: Vout,
    pub(crate) locktime: u32,
}

impl LegacyTx {
    /// Instantiate a new transaction from its parts.
    pub fn new<I, O>(version: u32, vin: I, vout: O, locktime: u32) -> Self
    where
        I: Into<Vin>,
        O: Into<Vout>,
    {
        Self {
            version,
            vin: vin.into(),
            vout: vout.into(),
            locktime,
        }
    }

    /// The transaction version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The transaction inputs.
    pub fn inputs(&self) -> &[TxIn] {
        &self.vin
    }

    /// The transaction outputs.
    pub fn outputs(&self) -> &[TxOut] {
        &self.vout
    }

    /// The nLocktime field.
    pub fn locktime(&self) -> u32 {
        self.locktime
    }

    /// Replace the scriptSig at `index`. Errors if the input vector is not that long.
    pub fn set_script_sig(&mut self, index: usize, script_sig: ScriptSig) -> TxResult<()> {
        if index >= self.vin.len() {
            return Err(TxError::MissingInput {
                index,
                len: self.vin.len(),
            });
        }
        self.vin[index].script_sig = script_sig;
        Ok(())
    }

    /// Compute the transaction ID: the double-SHA256 of the serialized transaction, in
    /// internal byte order. Use `Txid::to_be_hex` for the display form.
    pub fn txid(&self) -> TxResult<Txid> {
        let mut w = Hash256Writer::default();
        self.write_to(&mut w)?;
        Ok(w.finish_txid())
    }

    /// Produce the copy of `self` that the legacy sighash serializes: every input's
    /// scriptSig emptied, except the signed input's, which carries the prevout's
    /// locking script.
    fn sighash_prep(&self, index: usize, prevout_script: &Script) -> Self {
        let mut copy_tx = self.clone();
        for (i, txin) in copy_tx.vin.iter_mut().enumerate() {
            txin.script_sig = if i == index {
                ScriptSig::from(prevout_script.items())
            } else {
                ScriptSig::null()
            };
        }
        copy_tx
    }

    /// Modify `copy_tx` according to legacy SIGHASH_SINGLE semantics: outputs before
    /// the signed index become null placeholders, outputs after it are dropped, and
    /// other inputs' sequence numbers are zeroed.
    fn sighash_single(copy_tx: &mut Self, index: usize) {
        let mut vout: Vec<TxOut> = (0..index).map(|_| TxOut::null()).collect();
        vout.push(copy_tx.vout[index].clone());
        copy_tx.vout = vout;

        for (i, txin) in copy_tx.vin.iter_mut().enumerate() {
            if i != index {
                txin.sequence = 0;
            }
        }
    }

    /// Modify `copy_tx` according to legacy SIGHASH_ANYONECANPAY semantics: only the
    /// signed input is serialized.
    fn sighash_anyone_can_pay(copy_tx: &mut Self, index: usize) {
        copy_tx.vin = vec![copy_tx.vin[index].clone()];
    }

    /// Write the legacy sighash preimage for one input to `writer`: the prepared
    /// transaction serialization followed by the 4-byte LE sighash flag.
    pub fn write_sighash_preimage<W: Write>(
        &self,
        writer: &mut W,
        args: &SighashArgs,
    ) -> TxResult<()> {
        if args.index >= self.vin.len() {
            return Err(TxError::MissingInput {
                index: args.index,
                len: self.vin.len(),
            });
        }

        let mut copy_tx = self.sighash_prep(args.index, &args.prevout_script);
        if args.sighash_flag.is_single() {
            if args.index >= self.vout.len() {
                return Err(TxError::SighashSingleBug);
            }
            Self::sighash_single(&mut copy_tx, args.index);
        }
        if args.sighash_flag.is_anyone_can_pay() {
            Self::sighash_anyone_can_pay(&mut copy_tx, args.index);
        }

        copy_tx.write_to(writer)?;
        Self::write_u32_le(writer, args.sighash_flag as u32)?;
        Ok(())
    }

    /// Compute the sighash digest an external signer authorizes an input with: the
    /// double-SHA256 of the preimage produced by [`Self::write_sighash_preimage`].
    pub fn sighash(&self, args: &SighashArgs) -> TxResult<SighashDigest> {
        let mut w = Hash256Writer::default();
        self.write_sighash_preimage(&mut w, args)?;
        Ok(w.finish_sighash())
    }
}

impl ByteFormat for LegacyTx {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        let mut len = 4; // version
        len += prefix_byte_len(self.vin.len() as u64) as usize;
        len += self.vin.iter().map(ByteFormat::serialized_length).sum::<usize>();
        len += prefix_byte_len(self.vout.len() as u64) as usize;
        len += self.vout.iter().map(ByteFormat::serialized_length).sum::<usize>();
        len += 4; // locktime
        len
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let version = Self::read_u32_le(reader)?;

        let n_in = Self::read_compact_int(reader)?;
        let mut vin = Vec::with_capacity(n_in as usize);
        for _ in 0..n_in {
            vin.push(TxIn::read_from(reader)?);
        }

        let n_out = Self::read_compact_int(reader)?;
        let mut vout = Vec::with_capacity(n_out as usize);
        for _ in 0..n_out {
            vout.push(TxOut::read_from(reader)?);
        }

        let locktime = Self::read_u32_le(reader)?;
        Ok(Self {
            version,
            vin,
            vout,
            locktime,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u32_le(writer, self.version)?;
        len += Self::write_compact_int(writer, self.vin.len() as u64)?;
        for txin in &self.vin {
            len += txin.write_to(writer)?;
        }
        len += Self::write_compact_int(writer, self.vout.len() as u64)?;
        for txout in &self.vout {
            len += txout.write_to(writer)?;
        }
        len += Self::write_u32_le(writer, self.locktime)?;
        Ok(len)
    }
}
