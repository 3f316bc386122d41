use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Key is not valid base64: {0}")]
    InvalidKeyEncoding(String),

    #[error("Malformed envelope")]
    MalformedEnvelope,

    #[error("Unsupported envelope version: {0}")]
    UnsupportedVersion(u32),

    // No payload on the two failure modes below: callers must not be able
    // to tell a MAC mismatch apart from a padding failure in any detail.
    #[error("Envelope authentication failed")]
    AuthenticationFailed,

    #[error("Envelope decryption failed")]
    DecryptionFailed,

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
