//! Opcode registry.
//!
//! Single source of truth for the scripting language's instruction set: the
//! [`opcode_table!`] invocation below declares every opcode once and
//! generates the `OP_*` constants plus the mnemonic table backing
//! [`lookup`] and [`name_of`].
//!
//! Alias mnemonics (`OP_FALSE`, `OP_TRUE`) map to the same byte as their
//! canonical names and are listed after them, so rendering always picks the
//! canonical form. [`lookup`] also accepts the short form of any mnemonic,
//! i.e. the name minus its `OP_` prefix (`"DUP"`, `"TRUE"`, `"0"`).

/// Declares the opcode constants and the mnemonic lookup table.
macro_rules! opcode_table {
    ($( $(#[$doc:meta])* $name:ident = $code:literal ),* $(,)?) => {
        $(
            $(#[$doc])*
            pub const $name: u8 = $code;
        )*

        /// Mnemonic table in declaration order; the first entry for a code
        /// is its canonical name.
        static OP_CODE_NAMES: &[(&str, u8)] = &[
            $( (stringify!($name), $code), )*
        ];
    };
}

opcode_table! {
    // =========================
    // Constants
    // =========================
    /// Push the empty byte string.
    OP_0 = 0,
    /// Alias for `OP_0`.
    OP_FALSE = 0,
    /// Push data; 1-byte length follows.
    OP_PUSHDATA1 = 76,
    /// Push data; 2-byte little-endian length follows.
    OP_PUSHDATA2 = 77,
    /// Push data; 4-byte little-endian length follows.
    OP_PUSHDATA4 = 78,
    /// Push the number -1.
    OP_1NEGATE = 79,
    /// Push the number 1.
    OP_1 = 81,
    /// Alias for `OP_1`.
    OP_TRUE = 81,
    OP_2 = 82,
    OP_3 = 83,
    OP_4 = 84,
    OP_5 = 85,
    OP_6 = 86,
    OP_7 = 87,
    OP_8 = 88,
    OP_9 = 89,
    OP_10 = 90,
    OP_11 = 91,
    OP_12 = 92,
    OP_13 = 93,
    OP_14 = 94,
    OP_15 = 95,
    OP_16 = 96,
    // =========================
    // Flow control
    // =========================
    OP_NOP = 97,
    OP_VER = 98,
    OP_IF = 99,
    OP_NOTIF = 100,
    OP_VERIF = 101,
    OP_VERNOTIF = 102,
    OP_ELSE = 103,
    OP_ENDIF = 104,
    OP_VERIFY = 105,
    OP_RETURN = 106,
    // =========================
    // Stack
    // =========================
    OP_TOALTSTACK = 107,
    OP_FROMALTSTACK = 108,
    OP_2DROP = 109,
    OP_2DUP = 110,
    OP_3DUP = 111,
    OP_2OVER = 112,
    OP_2ROT = 113,
    OP_2SWAP = 114,
    OP_IFDUP = 115,
    OP_DEPTH = 116,
    OP_DROP = 117,
    OP_DUP = 118,
    OP_NIP = 119,
    OP_OVER = 120,
    OP_PICK = 121,
    OP_ROLL = 122,
    OP_ROT = 123,
    OP_SWAP = 124,
    OP_TUCK = 125,
    // =========================
    // Splice
    // =========================
    OP_CAT = 126,
    OP_SPLIT = 127,
    OP_NUM2BIN = 128,
    OP_BIN2NUM = 129,
    OP_SIZE = 130,
    // =========================
    // Bitwise logic
    // =========================
    OP_INVERT = 131,
    OP_AND = 132,
    OP_OR = 133,
    OP_XOR = 134,
    OP_EQUAL = 135,
    OP_EQUALVERIFY = 136,
    // =========================
    // Arithmetic
    // =========================
    OP_1ADD = 139,
    OP_1SUB = 140,
    OP_2MUL = 141,
    OP_2DIV = 142,
    OP_NEGATE = 143,
    OP_ABS = 144,
    OP_NOT = 145,
    OP_0NOTEQUAL = 146,
    OP_ADD = 147,
    OP_SUB = 148,
    OP_MUL = 149,
    OP_DIV = 150,
    OP_MOD = 151,
    OP_LSHIFT = 152,
    OP_RSHIFT = 153,
    OP_BOOLAND = 154,
    OP_BOOLOR = 155,
    OP_NUMEQUAL = 156,
    OP_NUMEQUALVERIFY = 157,
    OP_NUMNOTEQUAL = 158,
    OP_LESSTHAN = 159,
    OP_GREATERTHAN = 160,
    OP_LESSTHANOREQUAL = 161,
    OP_GREATERTHANOREQUAL = 162,
    OP_MIN = 163,
    OP_MAX = 164,
    OP_WITHIN = 165,
    // =========================
    // Crypto
    // =========================
    OP_RIPEMD160 = 166,
    OP_SHA1 = 167,
    OP_SHA256 = 168,
    OP_HASH160 = 169,
    OP_HASH256 = 170,
    OP_CODESEPARATOR = 171,
    OP_CHECKSIG = 172,
    OP_CHECKSIGVERIFY = 173,
    OP_CHECKMULTISIG = 174,
    OP_CHECKMULTISIGVERIFY = 175,
    // =========================
    // Locktime
    // =========================
    OP_CHECKLOCKTIMEVERIFY = 177,
    OP_CHECKSEQUENCEVERIFY = 178,
}

/// Resolves a mnemonic to its opcode byte.
///
/// Accepts the full `OP_*` form, an alias (`"OP_TRUE"`), or the short form
/// with the `OP_` prefix omitted (`"DUP"`, `"16"`).
pub fn lookup(name: &str) -> Option<u8> {
    if let Some(&(_, code)) = OP_CODE_NAMES.iter().find(|&&(n, _)| n == name) {
        return Some(code);
    }
    OP_CODE_NAMES
        .iter()
        .find(|&&(n, _)| n.strip_prefix("OP_") == Some(name))
        .map(|&(_, code)| code)
}

/// Returns the canonical mnemonic for an opcode byte, if it has one.
pub fn name_of(code: u8) -> Option<&'static str> {
    OP_CODE_NAMES
        .iter()
        .find(|&&(_, c)| c == code)
        .map(|&(name, _)| name)
}

/// Returns true for the three explicit push-data opcodes.
pub fn is_pushdata(code: u8) -> bool {
    matches!(code, OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4)
}
