//! Wire-format types: scripts, inputs, outputs, transactions, and UTXOs.

pub mod script;
pub mod tx;
pub mod txin;
pub mod txout;
pub mod utxo;

pub use script::{Script, ScriptPubkey, ScriptSig, ScriptType};
pub use tx::{LegacyTx, Sighash, SighashArgs, TxError, TxResult};
pub use txin::{Outpoint, TxIn, Vin};
pub use txout::{TxOut, Vout};
pub use utxo::Utxo;
