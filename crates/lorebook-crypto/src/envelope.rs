//! Authenticated message envelopes for the client/API channel.
//!
//! Wire format v1 (dot-delimited text):
//! "1.<iv base64>.<ciphertext base64>.<mac hex>"
//!
//! The ciphertext is AES-256-CBC with PKCS#7 padding under the "enc"
//! subkey. The MAC is HMAC-SHA256 over "1.<iv>.<ciphertext>" under the
//! "auth" subkey and is verified before anything is decrypted.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constant_time::constant_time_eq;
use crate::error::CryptoError;
use crate::kdf::{derive_subkeys, BaseKey};
use crate::types::{CBC_IV_LENGTH, CURRENT_VERSION, SUPPORTED_VERSIONS};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// An envelope split into its four dot-separated fields.
///
/// `payload` is the received "version.iv.ciphertext" substring, kept
/// verbatim so the MAC is recomputed over the exact bytes on the wire.
struct ParsedEnvelope<'a> {
    version: u32,
    payload: &'a str,
    iv_b64: &'a str,
    ciphertext_b64: &'a str,
    mac_hex: &'a str,
}

fn parse_envelope(envelope: &str) -> Result<ParsedEnvelope<'_>, CryptoError> {
    let fields: Vec<&str> = envelope.split('.').collect();
    if fields.len() != 4 || fields.iter().any(|f| f.is_empty()) {
        return Err(CryptoError::MalformedEnvelope);
    }

    let version = fields[0]
        .parse::<u32>()
        .map_err(|_| CryptoError::MalformedEnvelope)?;
    let mac_hex = fields[3];
    let payload = &envelope[..envelope.len() - mac_hex.len() - 1];

    Ok(ParsedEnvelope {
        version,
        payload,
        iv_b64: fields[1],
        ciphertext_b64: fields[2],
        mac_hex,
    })
}

/// Generate a random 16-byte IV for AES-CBC.
///
/// A fresh IV per envelope is mandatory; reuse under the same key breaks
/// CBC confidentiality.
fn generate_iv() -> Result<[u8; CBC_IV_LENGTH], CryptoError> {
    let mut iv = [0u8; CBC_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}

/// HMAC-SHA256 over the dot-joined envelope prefix, lowercase hex.
fn compute_mac(payload: &str, auth_key: &[u8; 32]) -> String {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(auth_key).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Encrypt and authenticate a plaintext message.
///
/// # Arguments
/// * `plaintext` - UTF-8 message body (empty is legal)
/// * `base64_key` - base64-encoded 256-bit base key for this direction
///
/// # Returns
/// The v1 envelope string: "1.<iv b64>.<ciphertext b64>.<mac hex>"
pub fn encode(plaintext: &str, base64_key: &str) -> Result<String, CryptoError> {
    let base = BaseKey::from_base64(base64_key)?;
    encode_with_key(plaintext, &base)
}

pub(crate) fn encode_with_key(plaintext: &str, base: &BaseKey) -> Result<String, CryptoError> {
    let (enc_key, auth_key) = derive_subkeys(base);
    let iv = generate_iv()?;

    let ciphertext = Aes256CbcEnc::new(&enc_key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let payload = format!(
        "{}.{}.{}",
        CURRENT_VERSION,
        Base64::encode_string(&iv),
        Base64::encode_string(&ciphertext)
    );
    let mac = compute_mac(&payload, &auth_key);
    Ok(format!("{}.{}", payload, mac))
}

/// Verify and decrypt an envelope, returning the plaintext.
///
/// The MAC is checked in constant time before the IV or ciphertext are
/// even base64-decoded; unauthenticated input is never decrypted. Every
/// failure aborts the call with no partial output.
pub fn decode(envelope: &str, base64_key: &str) -> Result<String, CryptoError> {
    // Framing and version are checked before the key, so a malformed
    // envelope is reported as such even when the key is also bad.
    let parsed = parse_envelope(envelope)?;
    if !SUPPORTED_VERSIONS.contains(&parsed.version) {
        return Err(CryptoError::UnsupportedVersion(parsed.version));
    }
    let base = BaseKey::from_base64(base64_key)?;
    verify_and_decrypt(&parsed, &base)
}

pub(crate) fn decode_with_key(envelope: &str, base: &BaseKey) -> Result<String, CryptoError> {
    let parsed = parse_envelope(envelope)?;
    if !SUPPORTED_VERSIONS.contains(&parsed.version) {
        return Err(CryptoError::UnsupportedVersion(parsed.version));
    }
    verify_and_decrypt(&parsed, base)
}

fn verify_and_decrypt(parsed: &ParsedEnvelope<'_>, base: &BaseKey) -> Result<String, CryptoError> {
    let (enc_key, auth_key) = derive_subkeys(base);
    let expected_mac = compute_mac(parsed.payload, &auth_key);
    if !constant_time_eq(&expected_mac, parsed.mac_hex) {
        return Err(CryptoError::AuthenticationFailed);
    }

    let iv = Base64::decode_vec(parsed.iv_b64).map_err(|_| CryptoError::DecryptionFailed)?;
    let ciphertext =
        Base64::decode_vec(parsed.ciphertext_b64).map_err(|_| CryptoError::DecryptionFailed)?;
    if iv.len() != CBC_IV_LENGTH {
        return Err(CryptoError::DecryptionFailed);
    }

    let plaintext_bytes = Aes256CbcDec::new_from_slices(&enc_key, &iv)
        .map_err(|_| CryptoError::DecryptionFailed)?
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    let plaintext =
        String::from_utf8(plaintext_bytes).map_err(|_| CryptoError::DecryptionFailed)?;
    // An empty decrypted body is a failure signal on this channel, not a
    // valid message.
    if plaintext.is_empty() {
        return Err(CryptoError::DecryptionFailed);
    }
    Ok(plaintext)
}
