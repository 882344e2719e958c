//! Wire-level primitive types.
//!
//! This module provides the low-level pieces the codecs are built from:
//! - `encoding`: `Encode`/`Decode` traits for the little-endian wire format
//! - `var_int`: the variable-width length-prefix integer
//! - `hash256`: 256-bit transaction identifiers

pub mod encoding;
pub mod hash256;
pub mod var_int;
