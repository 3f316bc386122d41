//! Direction-separated message channel.
//!
//! The client holds two independent base keys: one for traffic it sends
//! (client → API) and one for traffic it receives (API → client). A key
//! is never used for both directions.

use crate::envelope::{decode_with_key, encode_with_key};
use crate::error::CryptoError;
use crate::kdf::BaseKey;

/// The pair of direction-bound base keys for the message channel.
///
/// Both keys come from configuration at process start and are read-only
/// for the lifetime of the channel.
#[derive(Debug)]
pub struct SecureChannel {
    outbound: BaseKey,
    inbound: BaseKey,
}

impl SecureChannel {
    /// Build a channel from the two configured base64 keys.
    pub fn from_base64(outbound_key: &str, inbound_key: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            outbound: BaseKey::from_base64(outbound_key)?,
            inbound: BaseKey::from_base64(inbound_key)?,
        })
    }

    /// Encrypt and authenticate an outgoing message under the outbound key.
    pub fn seal(&self, plaintext: &str) -> Result<String, CryptoError> {
        encode_with_key(plaintext, &self.outbound)
    }

    /// Verify and decrypt an incoming message under the inbound key.
    pub fn open(&self, envelope: &str) -> Result<String, CryptoError> {
        decode_with_key(envelope, &self.inbound)
    }
}
