//! Purpose-tagged subkey derivation.
//!
//! Each channel direction has one 256-bit base key. The encryption and
//! authentication subkeys are SHA-256(base || purpose) with distinct
//! purpose tags, so neither subkey can stand in for the other.

use base64ct::{Base64, Encoding};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::types::AES_KEY_LENGTH;

const ENC_PURPOSE: &str = "enc";
const AUTH_PURPOSE: &str = "auth";

/// A long-lived 256-bit channel base key, one per transfer direction.
///
/// Zeroized on drop so the secret does not linger in memory.
#[derive(Clone)]
pub struct BaseKey {
    bytes: [u8; AES_KEY_LENGTH],
}

impl BaseKey {
    /// Parse a base key from its configured base64 form.
    ///
    /// The decoded key must be exactly 32 bytes; anything else is a
    /// configuration error, never a fallback.
    pub fn from_base64(encoded: &str) -> Result<Self, CryptoError> {
        let mut decoded = Base64::decode_vec(encoded)
            .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
        if decoded.len() != AES_KEY_LENGTH {
            decoded.zeroize();
            return Err(CryptoError::InvalidKeyLength {
                expected: AES_KEY_LENGTH,
                got: decoded.len(),
            });
        }

        let mut bytes = [0u8; AES_KEY_LENGTH];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: [u8; AES_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.bytes
    }
}

impl Drop for BaseKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for BaseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive a purpose-specific subkey: SHA-256(base || purpose).
///
/// Deterministic across calls and processes; no randomness involved.
pub fn derive_key(base: &BaseKey, purpose: &str) -> [u8; AES_KEY_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(base.as_bytes());
    hasher.update(purpose.as_bytes());
    hasher.finalize().into()
}

/// Derive the encryption and authentication subkeys for a base key.
pub fn derive_subkeys(base: &BaseKey) -> ([u8; AES_KEY_LENGTH], [u8; AES_KEY_LENGTH]) {
    (derive_key(base, ENC_PURPOSE), derive_key(base, AUTH_PURPOSE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_base_key() -> BaseKey {
        let mut key = [0u8; 32];
        getrandom::getrandom(&mut key).unwrap();
        BaseKey::from_bytes(key)
    }

    #[test]
    fn deterministic() {
        let base = random_base_key();
        let a = derive_key(&base, "enc");
        let b = derive_key(&base, "enc");
        assert_eq!(a, b);
    }

    #[test]
    fn enc_and_auth_subkeys_differ() {
        let base = random_base_key();
        let (enc, auth) = derive_subkeys(&base);
        assert_ne!(enc, auth);
    }

    #[test]
    fn derived_key_differs_from_base() {
        let base = random_base_key();
        let (enc, auth) = derive_subkeys(&base);
        assert_ne!(&enc, base.as_bytes());
        assert_ne!(&auth, base.as_bytes());
    }

    #[test]
    fn different_base_keys_different_subkeys() {
        let a = derive_key(&random_base_key(), "enc");
        let b = derive_key(&random_base_key(), "enc");
        assert_ne!(a, b);
    }

    #[test]
    fn base64_round_trip() {
        let mut raw = [0u8; 32];
        getrandom::getrandom(&mut raw).unwrap();
        let encoded = Base64::encode_string(&raw);
        let key = BaseKey::from_base64(&encoded).unwrap();
        assert_eq!(key.as_bytes(), &raw);
    }

    #[test]
    fn rejects_short_key() {
        let encoded = Base64::encode_string(&[0u8; 31]);
        let err = BaseKey::from_base64(&encoded).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidKeyLength {
                expected: 32,
                got: 31
            }
        ));
    }

    #[test]
    fn rejects_long_key() {
        let encoded = Base64::encode_string(&[0u8; 33]);
        let err = BaseKey::from_base64(&encoded).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidKeyLength {
                expected: 32,
                got: 33
            }
        ));
    }

    #[test]
    fn rejects_non_base64_key() {
        let err = BaseKey::from_base64("not base64!!").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyEncoding(_)));
    }

    #[test]
    fn debug_redacts_key_material() {
        let base = random_base_key();
        let rendered = format!("{:?}", base);
        assert!(rendered.contains("REDACTED"));
    }
}
