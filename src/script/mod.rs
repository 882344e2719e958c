//! Script representation and the binary command codec.
//!
//! A script is an ordered sequence of [`Command`]s: single-byte opcodes and
//! data pushes. This module owns the byte-exact wire mapping in both
//! directions; the textual notation lives in [`asm`], the opcode registry in
//! [`opcodes`], and the stack-number codec in [`script_num`].
//!
//! # Wire layout
//!
//! Each command encodes as:
//! - opcode: the opcode byte itself
//! - data of length `L ≤ 75`: `L` followed by the raw bytes
//! - `76 ≤ L ≤ 255`: `OP_PUSHDATA1`, 1-byte length, raw bytes
//! - `256 ≤ L ≤ 65535`: `OP_PUSHDATA2`, 2-byte little-endian length, raw bytes
//! - `L > 65535`: `OP_PUSHDATA4`, 4-byte little-endian length, raw bytes
//!
//! The length-prefixed form ([`Script::serialize`]) frames the concatenated
//! commands with a varint giving their total byte length; the flat form
//! ([`Script::raw_serialize`]) omits it.

pub mod asm;
pub mod errors;
pub mod opcodes;
pub mod script_num;

use crate::script::errors::ScriptError;
use crate::script::opcodes::{OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::types::encoding::{read_bytes, Decode, DecodeError, Encode, EncodeSink};
use crate::types::var_int;
use std::fmt;
use std::ops::Add;

/// Largest data length encodable with a direct length byte.
pub const MAX_DIRECT_PUSH: usize = 75;

/// The unit of a script program: an opcode or a data push.
///
/// A push stores only the raw bytes; how its length was prefixed on the wire
/// is a serialization detail and is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A single-byte instruction.
    Op(u8),
    /// Literal bytes to place on the execution stack.
    Push(Vec<u8>),
}

/// An ordered, immutable-after-construction sequence of script commands.
///
/// Built from text ([`Script::parse_string`]), bytes ([`Script::parse`]), or
/// a literal command list; concatenated with `+`; flattened to the byte
/// program consumed by the external evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    cmds: Vec<Command>,
}

impl Script {
    /// Creates a script from a command list.
    pub fn new(cmds: Vec<Command>) -> Self {
        Self { cmds }
    }

    /// Returns a copy of the commands in this script.
    pub fn get_commands(&self) -> Vec<Command> {
        self.cmds.clone()
    }

    /// Returns the commands as a slice.
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Returns the number of commands.
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    /// Returns true if the script holds no commands.
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Appends an opcode command.
    pub fn append_op(&mut self, op: u8) {
        self.cmds.push(Command::Op(op));
    }

    /// Appends a data push command.
    pub fn append_pushdata(&mut self, data: impl Into<Vec<u8>>) {
        self.cmds.push(Command::Push(data.into()));
    }

    /// Appends a number as a canonically encoded data push.
    pub fn append_num(&mut self, num: i64) {
        self.append_pushdata(script_num::encode_num(num));
    }

    /// Parses the textual notation into a script.
    ///
    /// See [`asm::parse_string`] for the grammar.
    pub fn parse_string(text: &str) -> Result<Script, ScriptError> {
        asm::parse_string(text)
    }

    /// Serializes the commands without the leading varint length.
    pub fn raw_serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for cmd in &self.cmds {
            match cmd {
                Command::Op(op) => out.push(*op),
                Command::Push(data) => {
                    let length = data.len();
                    if length <= MAX_DIRECT_PUSH {
                        out.push(length as u8);
                    } else if length <= 0xFF {
                        out.push(OP_PUSHDATA1);
                        out.push(length as u8);
                    } else if length <= 0xFFFF {
                        out.push(OP_PUSHDATA2);
                        out.extend_from_slice(&(length as u16).to_le_bytes());
                    } else {
                        out.push(OP_PUSHDATA4);
                        out.extend_from_slice(&(length as u32).to_le_bytes());
                    }
                    out.extend_from_slice(data);
                }
            }
        }
        out
    }

    /// Serializes the commands with the varint total-length prefix.
    pub fn serialize(&self) -> Vec<u8> {
        self.to_bytes()
    }

    /// Flattens the script into the byte program handed to the evaluator:
    /// opcodes and push bytes with no outer framing.
    pub fn to_byte_program(&self) -> Vec<u8> {
        self.raw_serialize()
    }

    /// Parses the length-prefixed binary form.
    ///
    /// Reads the declared varint length, then decodes commands until exactly
    /// that many body bytes are consumed. A mismatch between declared and
    /// consumed byte counts, including truncated input, is reported as
    /// [`ScriptError::MalformedScript`]. Input beyond the declared length is
    /// ignored, matching stream semantics.
    pub fn parse(data: &[u8]) -> Result<Script, ScriptError> {
        let mut input = data;
        let declared = var_int::read(&mut input)?;
        let cmds = parse_commands(&mut input, declared)?;
        Ok(Script { cmds })
    }
}

/// Decodes commands from the cursor until `declared` body bytes are consumed.
fn parse_commands(input: &mut &[u8], declared: u64) -> Result<Vec<Command>, ScriptError> {
    let available = input.len() as u64;
    let truncated = ScriptError::MalformedScript {
        expected: declared,
        actual: available,
    };

    let mut cmds = Vec::new();
    let mut consumed: u64 = 0;
    while consumed < declared {
        let current = read_bytes(input, 1).map_err(|_| truncated.clone())?[0];
        consumed += 1;
        match current {
            OP_PUSHDATA1 => {
                let length = read_bytes(input, 1).map_err(|_| truncated.clone())?[0] as usize;
                let data = read_bytes(input, length).map_err(|_| truncated.clone())?;
                consumed += 1 + length as u64;
                cmds.push(Command::Push(data.to_vec()));
            }
            OP_PUSHDATA2 => {
                let bytes = read_bytes(input, 2).map_err(|_| truncated.clone())?;
                let length = u16::from_le_bytes(bytes.try_into().unwrap()) as usize;
                let data = read_bytes(input, length).map_err(|_| truncated.clone())?;
                consumed += 2 + length as u64;
                cmds.push(Command::Push(data.to_vec()));
            }
            OP_PUSHDATA4 => {
                let bytes = read_bytes(input, 4).map_err(|_| truncated.clone())?;
                let length = u32::from_le_bytes(bytes.try_into().unwrap()) as usize;
                let data = read_bytes(input, length).map_err(|_| truncated.clone())?;
                consumed += 4 + length as u64;
                cmds.push(Command::Push(data.to_vec()));
            }
            // A byte below the PUSHDATA1 code is itself the push length.
            length if (length as usize) <= MAX_DIRECT_PUSH => {
                let data = read_bytes(input, length as usize).map_err(|_| truncated.clone())?;
                consumed += length as u64;
                cmds.push(Command::Push(data.to_vec()));
            }
            op => cmds.push(Command::Op(op)),
        }
    }

    if consumed != declared {
        return Err(ScriptError::MalformedScript {
            expected: declared,
            actual: consumed,
        });
    }
    Ok(cmds)
}

impl Add for Script {
    type Output = Script;

    /// Concatenates two scripts into a new one; both operands' commands are
    /// copied in order.
    fn add(self, other: Script) -> Script {
        let mut cmds = self.cmds;
        cmds.extend(other.cmds);
        Script { cmds }
    }
}

impl Add for &Script {
    type Output = Script;

    fn add(self, other: &Script) -> Script {
        let mut cmds = self.cmds.clone();
        cmds.extend_from_slice(&other.cmds);
        Script { cmds }
    }
}

impl Encode for Script {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        let raw = self.raw_serialize();
        var_int::write(raw.len() as u64, out);
        out.write(&raw);
    }
}

impl Decode for Script {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let declared = var_int::read(input)?;
        let body = read_bytes(input, declared as usize)?;
        let mut cursor = body;
        let cmds =
            parse_commands(&mut cursor, declared).map_err(|_| DecodeError::InvalidValue)?;
        Ok(Script { cmds })
    }
}

impl fmt::Display for Script {
    /// Renders the textual notation: mnemonics for registered opcodes, `0x`
    /// hex literals for pushes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.cmds.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                Command::Op(op) => match opcodes::name_of(*op) {
                    Some(name) => f.write_str(name)?,
                    None => write!(f, "OP_UNKNOWN_0x{op:02x}")?,
                },
                Command::Push(data) => write!(f, "0x{}", hex::encode(data))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::opcodes::{OP_1, OP_2, OP_CHECKSIG, OP_DUP, OP_EQUAL, OP_HASH160};

    fn push_of_len(n: usize) -> Script {
        Script::new(vec![Command::Push(vec![0xAB; n])])
    }

    // ==================== serialize ====================

    #[test]
    fn serialize_opcodes_only() {
        let script = Script::new(vec![Command::Op(OP_DUP), Command::Op(OP_EQUAL)]);
        assert_eq!(script.raw_serialize(), vec![OP_DUP, OP_EQUAL]);
        assert_eq!(script.serialize(), vec![2, OP_DUP, OP_EQUAL]);
    }

    #[test]
    fn serialize_direct_push_threshold() {
        // 75 bytes: single direct length byte 0x4b
        let raw = push_of_len(75).raw_serialize();
        assert_eq!(raw[0], 0x4B);
        assert_eq!(raw.len(), 1 + 75);
    }

    #[test]
    fn serialize_pushdata1_threshold() {
        // 76 bytes: PUSHDATA1 + one length byte
        let raw = push_of_len(76).raw_serialize();
        assert_eq!(raw[0], OP_PUSHDATA1);
        assert_eq!(raw[1], 76);
        assert_eq!(raw.len(), 2 + 76);
    }

    #[test]
    fn serialize_pushdata2_threshold() {
        // 256 bytes: PUSHDATA2 + two little-endian length bytes
        let raw = push_of_len(256).raw_serialize();
        assert_eq!(raw[0], OP_PUSHDATA2);
        assert_eq!(&raw[1..3], &[0x00, 0x01]);
        assert_eq!(raw.len(), 3 + 256);
    }

    #[test]
    fn serialize_pushdata4_above_u16() {
        let raw = push_of_len(0x1_0000).raw_serialize();
        assert_eq!(raw[0], OP_PUSHDATA4);
        assert_eq!(&raw[1..5], &[0x00, 0x00, 0x01, 0x00]);
        assert_eq!(raw.len(), 5 + 0x1_0000);
    }

    #[test]
    fn byte_program_matches_raw_form() {
        let script = Script::new(vec![
            Command::Push(vec![0x01, 0x02]),
            Command::Op(OP_CHECKSIG),
        ]);
        assert_eq!(script.to_byte_program(), script.raw_serialize());
    }

    // ==================== parse ====================

    #[test]
    fn parse_roundtrip() {
        let script = Script::new(vec![
            Command::Op(OP_DUP),
            Command::Op(OP_HASH160),
            Command::Push(vec![0x11; 20]),
            Command::Op(OP_EQUAL),
            Command::Push(vec![0x22; 80]),
            Command::Push(vec![0x33; 300]),
        ]);
        let parsed = Script::parse(&script.serialize()).unwrap();
        assert_eq!(parsed, script);
    }

    #[test]
    fn parse_empty_script() {
        let script = Script::default();
        assert_eq!(script.serialize(), vec![0]);
        assert_eq!(Script::parse(&[0]).unwrap(), script);
    }

    #[test]
    fn parse_empty_push_roundtrip() {
        let script = Script::new(vec![Command::Push(vec![])]);
        let parsed = Script::parse(&script.serialize()).unwrap();
        assert_eq!(parsed, script);
    }

    #[test]
    fn parse_unknown_opcode_is_kept() {
        // 0xAB is unregistered but still a valid single-byte command
        let parsed = Script::parse(&[1, 0xAB]).unwrap();
        assert_eq!(parsed.commands(), &[Command::Op(0xAB)]);
    }

    #[test]
    fn parse_truncated_input_fails() {
        let script = Script::new(vec![Command::Op(OP_DUP), Command::Push(vec![0x01, 0x02])]);
        let mut bytes = script.serialize();
        bytes.pop();

        let err = Script::parse(&bytes).unwrap_err();
        assert_eq!(
            err,
            ScriptError::MalformedScript {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn parse_push_overrunning_declared_length_fails() {
        // Declared length 2, but the push wants 5 bytes from a longer buffer.
        let bytes = [0x02, 0x05, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE];
        let err = Script::parse(&bytes).unwrap_err();
        assert!(matches!(err, ScriptError::MalformedScript { expected: 2, .. }));
    }

    #[test]
    fn parse_ignores_bytes_after_declared_length() {
        let parsed = Script::parse(&[1, OP_DUP, 0xFF, 0xFF]).unwrap();
        assert_eq!(parsed.commands(), &[Command::Op(OP_DUP)]);
    }

    // ==================== concatenation ====================

    #[test]
    fn add_concatenates_commands() {
        let combined = Script::parse_string("OP_1").unwrap() + Script::parse_string("OP_2").unwrap();
        assert_eq!(combined, Script::parse_string("OP_1 OP_2").unwrap());
    }

    #[test]
    fn add_copies_both_sides() {
        let left = Script::new(vec![Command::Op(OP_1)]);
        let right = Script::new(vec![Command::Op(OP_2)]);
        let combined = &left + &right;

        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
        assert_eq!(
            combined.commands(),
            &[Command::Op(OP_1), Command::Op(OP_2)]
        );
    }

    #[test]
    fn add_with_empty_script_is_identity() {
        let script = Script::parse_string("OP_DUP OP_HASH160").unwrap();
        assert_eq!(&script + &Script::default(), script);
        assert_eq!(&Script::default() + &script, script);
    }

    // ==================== builders ====================

    #[test]
    fn append_num_pushes_canonical_encoding() {
        let mut script = Script::default();
        script.append_num(515);
        assert_eq!(script.commands(), &[Command::Push(vec![0x03, 0x02])]);
    }

    #[test]
    fn append_ops_and_data() {
        let mut script = Script::default();
        script.append_op(OP_DUP);
        script.append_pushdata(vec![0xAA, 0xBB]);
        assert_eq!(script.raw_serialize(), vec![OP_DUP, 0x02, 0xAA, 0xBB]);
    }

    // ==================== wire traits ====================

    #[test]
    fn decode_reads_exactly_one_script() {
        let script = Script::new(vec![Command::Op(OP_DUP), Command::Push(vec![0x07])]);
        let mut bytes = script.to_bytes();
        bytes.extend_from_slice(&[0x99, 0x98]); // unrelated trailing data

        let mut input = bytes.as_slice();
        let decoded = Script::decode(&mut input).unwrap();
        assert_eq!(decoded, script);
        assert_eq!(input, &[0x99, 0x98]);
    }

    // ==================== display ====================

    #[test]
    fn display_renders_textual_notation() {
        let script = Script::new(vec![
            Command::Op(OP_DUP),
            Command::Push(vec![0xDE, 0xAD]),
            Command::Op(OP_EQUAL),
        ]);
        assert_eq!(script.to_string(), "OP_DUP 0xdead OP_EQUAL");
    }

    #[test]
    fn display_roundtrips_through_parse_string() {
        let script = Script::parse_string("OP_DUP OP_HASH160 0x0102030405 OP_EQUALVERIFY").unwrap();
        let rendered = script.to_string();
        assert_eq!(Script::parse_string(&rendered).unwrap(), script);
    }
}
