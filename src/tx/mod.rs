//! Transaction containers.
//!
//! Byte-exact wire codec for transactions and their inputs and outputs.
//! Signing, signature checking, and id computation are the external
//! evaluator's business; these types only carry scripts and amounts to and
//! from the wire.

use crate::script::Script;
use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink};
use crate::types::hash256::Hash256;

/// Default sequence number for new inputs.
pub const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;

/// A transaction input: a reference to a previous output plus the unlocking
/// script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub prev_tx: Hash256,
    pub prev_index: u32,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    /// Creates an input with the default sequence number.
    pub fn new(prev_tx: Hash256, prev_index: u32, script_sig: Script) -> Self {
        Self {
            prev_tx,
            prev_index,
            script_sig,
            sequence: SEQUENCE_FINAL,
        }
    }
}

impl Encode for TxIn {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.prev_tx.encode(out);
        self.prev_index.encode(out);
        self.script_sig.encode(out);
        self.sequence.encode(out);
    }
}

impl Decode for TxIn {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            prev_tx: Decode::decode(input)?,
            prev_index: u32::decode(input)?,
            script_sig: Script::decode(input)?,
            sequence: u32::decode(input)?,
        })
    }
}

/// A transaction output: an amount locked by a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub amount: u64,
    pub script_pubkey: Script,
}

impl TxOut {
    pub fn new(amount: u64, script_pubkey: Script) -> Self {
        Self {
            amount,
            script_pubkey,
        }
    }
}

impl Encode for TxOut {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.amount.encode(out);
        self.script_pubkey.encode(out);
    }
}

impl Decode for TxOut {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            amount: u64::decode(input)?,
            script_pubkey: Script::decode(input)?,
        })
    }
}

/// A transaction.
///
/// Wire layout: 4-byte version, varint-counted inputs, varint-counted
/// outputs, 4-byte locktime, all little-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub version: u32,
    pub tx_ins: Vec<TxIn>,
    pub tx_outs: Vec<TxOut>,
    pub locktime: u32,
}

impl Tx {
    pub fn new(version: u32, tx_ins: Vec<TxIn>, tx_outs: Vec<TxOut>, locktime: u32) -> Self {
        Self {
            version,
            tx_ins,
            tx_outs,
            locktime,
        }
    }

    /// Serializes the transaction and returns it as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parses a transaction from its hex form.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let bytes = hex::decode(s).map_err(|_| DecodeError::InvalidValue)?;
        Tx::from_bytes(&bytes)
    }
}

impl Encode for Tx {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.version.encode(out);
        self.tx_ins.encode(out);
        self.tx_outs.encode(out);
        self.locktime.encode(out);
    }
}

impl Decode for Tx {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            version: u32::decode(input)?,
            tx_ins: Vec::<TxIn>::decode(input)?,
            tx_outs: Vec::<TxOut>::decode(input)?,
            locktime: u32::decode(input)?,
        })
    }
}
