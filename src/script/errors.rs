//! Errors reported by the script codecs.

use crate::types::encoding::DecodeError;
use thiserror::Error;

/// Errors that can occur while parsing, serializing, or evaluating scripts.
///
/// All codec failures surface synchronously through these variants; parsing
/// is all-or-nothing and never returns a partially decoded script.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A textual token is neither a known opcode nor a valid literal.
    #[error("unable to decode token: {0}")]
    TokenDecode(String),
    /// Binary parse consumed a byte count different from the declared length.
    #[error("malformed script: declared {expected} bytes, found {actual}")]
    MalformedScript { expected: u64, actual: u64 },
    /// A stack element failed the minimal-encoding check (hex shown).
    #[error("value is not minimally encoded: {0}")]
    NotMinimallyEncoded(String),
    /// A decoded number does not fit the supported 64-bit range.
    #[error("number exceeds the supported 64-bit range")]
    NumberOutOfRange,
    /// The external evaluator rejected the byte program.
    #[error("script evaluation failed: {0}")]
    Evaluation(String),
    /// A wire-level read failed underneath the script codec.
    #[error("wire decode error: {0}")]
    Decode(#[from] DecodeError),
}
