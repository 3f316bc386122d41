pub mod channel;
pub mod constant_time;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod types;

pub use channel::SecureChannel;
pub use constant_time::constant_time_eq;
pub use envelope::{decode, encode};
pub use error::CryptoError;
pub use kdf::{derive_key, derive_subkeys, BaseKey};
pub use types::{
    AES_KEY_LENGTH, CBC_IV_LENGTH, CURRENT_VERSION, MAC_HEX_LENGTH, SUPPORTED_VERSIONS,
};
