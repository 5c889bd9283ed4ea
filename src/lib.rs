//! # coins-txbuilder
//!
//! Transaction construction for Bitcoin-family UTXO chains where signing happens in an
//! isolated external module (a hardware secure element, typically).
//!
//! The core contract is two-phase: [`builder::SpendBuilder::build_for_sign`] selects
//! the wallet's unspent outputs, lays out destination and change, optionally applies
//! BIP69 canonical ordering, and returns one legacy sighash digest per input. The
//! caller obtains one signature per digest from its signer, then
//! [`builder::SpendBuilder::build_for_send`] repeats the identical deterministic
//! construction and emits broadcast-ready bytes.
//!
//! ## Crate layout
//!
//! - `ser` / `hashes` / `macros`: the wire-format plumbing. Everything on the wire
//!   implements [`ser::ByteFormat`].
//! - `types`: scripts, inputs, outputs, the legacy transaction and its sighash.
//! - `enc` / `keys` / `nets`: addresses, their derivation from wallet public keys, and
//!   per-network encoding parameters.
//! - `store`: the snapshot cache of spendable outputs, fed by a UTXO indexer.
//! - `ordering` / `fees` / `sigs`: canonical sorting, fee estimation, and signature
//!   normalization.
//! - `builder`: the two-phase orchestration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
pub mod macros;

pub mod builder;
pub mod enc;
pub mod fees;
pub mod hashes;
pub mod keys;
pub mod nets;
pub mod ordering;
pub mod prelude;
pub mod ser;
pub mod sigs;
pub mod store;
pub mod types;
