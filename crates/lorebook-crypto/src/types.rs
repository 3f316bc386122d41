/// Wire format version for message envelopes.
///
/// Version 1: AES-256-CBC + HMAC-SHA256, dot-delimited text
/// Format: "1.<iv base64>.<ciphertext base64>.<mac hex>"
/// The MAC covers "1.<iv base64>.<ciphertext base64>" under the auth subkey.
pub const CURRENT_VERSION: u32 = 1;

/// Supported envelope versions (for decoding).
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// AES-CBC IV length in bytes (one 128-bit block).
pub const CBC_IV_LENGTH: usize = 16;

/// HMAC-SHA256 MAC length in hex characters.
pub const MAC_HEX_LENGTH: usize = 64;
