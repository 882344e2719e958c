//! Codec for stack-machine transaction scripts.
//!
//! Converts scripts between a textual notation, an in-memory command
//! sequence, and the byte-exact binary wire format, together with the
//! canonical number encoding used for stack elements and the transaction
//! containers that carry scripts around. Execution, hashing, and signing
//! belong to an external interpreter behind the [`engine::Evaluator`]
//! boundary.
//!
//! ```
//! use txscript::Script;
//!
//! let script = Script::parse_string("OP_1 OP_2 OP_ADD").unwrap();
//! assert_eq!(Script::parse(&script.serialize()).unwrap(), script);
//! ```

pub mod engine;
pub mod script;
pub mod tx;
pub mod types;
pub mod utils;

pub use engine::{Context, Evaluator, Stack, StackElement, StackItem};
pub use script::errors::ScriptError;
pub use script::script_num::{decode_num, encode_num, is_minimally_encoded};
pub use script::{Command, Script};
pub use tx::{Tx, TxIn, TxOut};
pub use types::hash256::Hash256;
