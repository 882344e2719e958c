//! Textual script notation.
//!
//! Scripts are written as whitespace/comma-separated tokens:
//!
//! - `0x…` hex literal, pushed as raw bytes
//! - an opcode mnemonic, full (`OP_DUP`) or short (`DUP`) form
//! - `'…'` single-quoted UTF-8 literal, pushed as its text bytes
//! - a decimal integer, pushed in canonical number encoding
//!
//! Anything else is rejected with [`ScriptError::TokenDecode`]. Tokens are
//! decoded through an explicit grammar only; no token is ever evaluated as
//! host-language code.
//!
//! # Implicit length prefixes
//!
//! Hand-written scripts sometimes spell out the direct-push length byte that
//! the binary form derives automatically, e.g. `0x02 0xAABB`. Such a prefix
//! is indistinguishable from an intentional small literal, so after decoding
//! a lookahead pass drops any data token whose value equals the byte length
//! of the data token that follows it (see [`strip_implicit_lengths`]). The
//! heuristic is an accepted ambiguity of the notation: a genuine literal that
//! happens to match the next push's length is dropped too.

use crate::script::errors::ScriptError;
use crate::script::opcodes;
use crate::script::script_num;
use crate::script::{Command, Script, MAX_DIRECT_PUSH};

/// Parses the textual notation into a script.
pub fn parse_string(text: &str) -> Result<Script, ScriptError> {
    let mut cmds = Vec::new();
    for token in text
        .split([' ', ',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        cmds.push(decode_token(token)?);
    }
    Ok(Script::new(strip_implicit_lengths(cmds)))
}

/// Decodes one token in grammar order: hex literal, opcode mnemonic, quoted
/// string, decimal integer.
fn decode_token(token: &str) -> Result<Command, ScriptError> {
    if let Some(digits) = token.strip_prefix("0x") {
        return hex::decode(digits)
            .map(Command::Push)
            .map_err(|_| ScriptError::TokenDecode(token.to_string()));
    }
    if let Some(code) = opcodes::lookup(token) {
        return Ok(Command::Op(code));
    }
    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        return Ok(Command::Push(token[1..token.len() - 1].as_bytes().to_vec()));
    }
    if let Ok(num) = token.parse::<i64>() {
        return Ok(Command::Push(script_num::encode_num(num)));
    }
    Err(ScriptError::TokenDecode(token.to_string()))
}

/// Drops data tokens that spell out the following push's length.
///
/// A data command is dropped when its little-endian value lies in the
/// direct-push range 1..=75 and equals the byte length of the data command
/// right after it. Commands immediately following an explicit PUSHDATA1/2/4
/// opcode are exempt (their length is already explicit), and the final
/// command is always kept.
fn strip_implicit_lengths(cmds: Vec<Command>) -> Vec<Command> {
    let mut out = Vec::with_capacity(cmds.len());
    for i in 0..cmds.len() {
        let follows_pushdata =
            i > 0 && matches!(cmds[i - 1], Command::Op(op) if opcodes::is_pushdata(op));
        if !follows_pushdata {
            if let (Command::Push(data), Some(Command::Push(next))) = (&cmds[i], cmds.get(i + 1)) {
                if let Some(value) = le_value(data) {
                    if (1..=MAX_DIRECT_PUSH as u64).contains(&value) && value == next.len() as u64 {
                        continue;
                    }
                }
            }
        }
        out.push(cmds[i].clone());
    }
    out
}

/// Interprets up to eight bytes as a little-endian unsigned value.
fn le_value(data: &[u8]) -> Option<u64> {
    if data.is_empty() || data.len() > 8 {
        return None;
    }
    let mut buf = [0u8; 8];
    buf[..data.len()].copy_from_slice(data);
    Some(u64::from_le_bytes(buf))
}
