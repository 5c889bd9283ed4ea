//! Two-phase transaction construction around an external-signing boundary.
//!
//! Signing happens in an isolated module with no access to wallet state, so
//! construction is split into two pure calls: [`SpendBuilder::build_for_sign`] produces
//! one sighash digest per input; once the caller has obtained signatures,
//! [`SpendBuilder::build_for_send`] re-runs the identical deterministic selection and
//! ordering and emits the fully-signed wire bytes.
//!
//! Both calls are referentially transparent given the same store snapshot and intent.
//! The caller must not mutate the store between the two calls of a pair; the builder
//! does not hold a lock across the signing gap.

use std::marker::PhantomData;

use thiserror::Error;

use crate::{
    enc::{
        bases::EncodingError,
        encoder::{Address, AddressEncoder, AddressKind, BitcoinEncoder, NetworkParams},
    },
    hashes::SighashDigest,
    keys::{KeyError, WalletPubkey},
    ordering::{apply, SortPolicy},
    ser::ByteFormat,
    sigs::{to_low_s_der, SigError},
    store::UtxoStore,
    types::{
        script::{ScriptPubkey, ScriptSig},
        tx::{LegacyTx, Sighash, SighashArgs, TxError},
        txin::TxIn,
        txout::TxOut,
        utxo::Utxo,
    },
};

/// Change below this many satoshis is not worth a dedicated output; it is folded into
/// the fee instead. Classic relay dust floor for P2PKH outputs.
pub const DUST_LIMIT: u64 = 546;

/// The transaction version emitted by the builder.
const TX_VERSION: u32 = 1;

/// A fee quote supplied by the caller: the total fee to pay, and the rate it was
/// derived from. The builder validates sufficiency against `value`; `rate` rides along
/// for observability and re-quoting.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Eq, PartialEq)]
pub struct FeeQuote {
    /// Total fee in the chain's smallest unit.
    pub value: u64,
    /// The satoshi-per-byte rate the quote was derived from.
    pub rate: u64,
}

/// A caller-constructed description of the intended spend. Amounts are in the chain's
/// smallest unit.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TxIntent {
    /// The amount to pay the destination.
    pub amount: u64,
    /// The fee quote. The fee is caller-provided; the builder only validates that the
    /// selected inputs cover `amount + fee.value`.
    pub fee: FeeQuote,
    /// The wallet address being spent from.
    pub source_address: String,
    /// The address being paid.
    pub destination_address: String,
    /// The address change returns to. When empty, change returns to the source
    /// address.
    pub change_address: String,
}

/// One sighash digest awaiting an external signature, tagged with the index of the
/// input it authorizes in the final (post-sort) input list.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Eq, PartialEq)]
pub struct SighashPreimage {
    /// The final-order index of the input this digest authorizes.
    pub index: usize,
    /// The digest to sign.
    pub hash: SighashDigest,
}

/// An error type for transaction construction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The store holds no outputs for the wallet's addresses.
    #[error("no unspent outputs known for the wallet addresses")]
    EmptyUtxoSet,

    /// The selected inputs do not cover `amount + fee`.
    #[error("insufficient funds: {available} available, {required} required")]
    InsufficientFunds {
        /// The sum of the selected inputs.
        available: u64,
        /// The amount plus the quoted fee.
        required: u64,
    },

    /// `build_for_send` received the wrong number of signatures.
    #[error("expected {expected} signatures, got {got}")]
    SignatureCountMismatch {
        /// How many signatures arrived.
        got: usize,
        /// How many inputs need one.
        expected: usize,
    },

    /// A signature could not be parsed as `r || s` or DER.
    #[error(transparent)]
    MalformedSignature(#[from] SigError),

    /// An address in the intent failed to parse or belongs to another network.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] EncodingError),

    /// The wallet public key is not a valid secp256k1 point.
    #[error(transparent)]
    InvalidPublicKey(#[from] KeyError),

    /// Bubbled up from serialization or sighash computation.
    #[error(transparent)]
    Tx(#[from] TxError),
}

/// The deterministic product of selection, output construction, and ordering. Both
/// public operations derive one of these from the same inputs, which is what keeps the
/// sign and send phases in agreement.
struct SpendPlan {
    /// Selected UTXOs, in final input order.
    utxos: Vec<Utxo>,
    /// The unsigned transaction skeleton.
    tx: LegacyTx,
}

/// Builds spends of a single wallet's outputs for an external signer.
///
/// Parameterized by the network so that the same logic serves Bitcoin mainnet,
/// testnet, and Litecoin. Construction derives the wallet's owned addresses (legacy
/// from the supplied key encoding, segwit from the compressed form); selection spends
/// every output the store knows for them.
#[derive(Clone, Debug)]
pub struct SpendBuilder<P: NetworkParams> {
    pubkey: WalletPubkey,
    addresses: Vec<Address>,
    _network: PhantomData<fn(P) -> P>,
}

impl<P: NetworkParams> SpendBuilder<P> {
    /// Instantiate a builder from the wallet's sec1-encoded public key.
    pub fn new(pubkey: &[u8]) -> Result<Self, BuildError> {
        let pubkey = WalletPubkey::from_bytes(pubkey)?;
        let addresses = vec![
            BitcoinEncoder::<P>::derive_address(&pubkey, AddressKind::Legacy)?,
            BitcoinEncoder::<P>::derive_address(&pubkey, AddressKind::Segwit)?,
        ];
        Ok(Self {
            pubkey,
            addresses,
            _network: PhantomData,
        })
    }

    /// The addresses whose outputs this builder spends.
    pub fn owned_addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Produce one sighash digest per input, in final input order. The external signer
    /// must return signatures in this same order.
    pub fn build_for_sign(
        &self,
        store: &UtxoStore,
        intent: &TxIntent,
        sequence: u32,
        sort: SortPolicy,
    ) -> Result<Vec<SighashPreimage>, BuildError> {
        let plan = self.plan(store, intent, sequence, sort)?;
        plan.utxos
            .iter()
            .enumerate()
            .map(|(index, utxo)| {
                let args = SighashArgs {
                    index,
                    sighash_flag: Sighash::All,
                    prevout_script: utxo.signing_script(),
                };
                Ok(SighashPreimage {
                    index,
                    hash: plan.tx.sighash(&args)?,
                })
            })
            .collect()
    }

    /// Assemble the fully-signed transaction bytes. `signatures` must be in the order
    /// the digests were returned by [`Self::build_for_sign`], one per input; each may
    /// be a 64-byte `r || s` pair or DER.
    pub fn build_for_send(
        &self,
        store: &UtxoStore,
        intent: &TxIntent,
        signatures: &[Vec<u8>],
        sequence: u32,
        sort: SortPolicy,
    ) -> Result<Vec<u8>, BuildError> {
        let mut plan = self.plan(store, intent, sequence, sort)?;
        let expected = plan.tx.inputs().len();
        if signatures.len() != expected {
            return Err(BuildError::SignatureCountMismatch {
                got: signatures.len(),
                expected,
            });
        }

        for (index, signature) in signatures.iter().enumerate() {
            let mut sig = to_low_s_der(signature)?;
            sig.push(Sighash::All as u8);
            plan.tx
                .set_script_sig(index, ScriptSig::p2pkh(&sig, self.pubkey.as_bytes()))?;
        }

        let mut out = Vec::with_capacity(plan.tx.serialized_length());
        plan.tx.write_to(&mut out)?;
        Ok(out)
    }

    /// The shared deterministic construction: select, validate funds, lay out outputs,
    /// order, and build the unsigned skeleton.
    fn plan(
        &self,
        store: &UtxoStore,
        intent: &TxIntent,
        sequence: u32,
        sort: SortPolicy,
    ) -> Result<SpendPlan, BuildError> {
        let utxos = store.select(&self.addresses);
        if utxos.is_empty() {
            return Err(BuildError::EmptyUtxoSet);
        }

        let available: u64 = utxos.iter().map(|u| u.value).sum();
        let required = intent.amount as u128 + intent.fee.value as u128;
        if (available as u128) < required {
            return Err(BuildError::InsufficientFunds {
                available,
                required: intent.amount.saturating_add(intent.fee.value),
            });
        }
        let change = available - required as u64;

        let destination_script = self.output_script(&intent.destination_address)?;
        let mut outputs = vec![TxOut::new(intent.amount, destination_script)];
        if change >= DUST_LIMIT {
            let change_address = if intent.change_address.is_empty() {
                &intent.source_address
            } else {
                &intent.change_address
            };
            outputs.push(TxOut::new(change, self.output_script(change_address)?));
        }

        let utxos = apply(&utxos, &sort.input_ordering(&utxos));
        let outputs = apply(&outputs, &sort.output_ordering(&outputs));

        let vin: Vec<TxIn> = utxos
            .iter()
            .map(|utxo| TxIn::new(utxo.outpoint, ScriptSig::null(), sequence))
            .collect();
        let tx = LegacyTx::new(TX_VERSION, vin, outputs, 0);

        Ok(SpendPlan { utxos, tx })
    }

    fn output_script(&self, address: &str) -> Result<ScriptPubkey, BuildError> {
        let address = BitcoinEncoder::<P>::string_to_address(address)?;
        Ok(BitcoinEncoder::<P>::decode_address(&address)?)
    }
}
