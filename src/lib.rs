//! Rust library to deal with PGP operations.
//!
//! The library builds and walks layered OpenPGP packet streams
//! (encryption, compression, literal data, one-pass signatures) on top
//! of the [`pgp`] codec crate. It exposes a small synchronous facade:
//!
//! - [`generate_key_pair`]: generates an armored public/secret key ring
//!   pair for a `name <email>` identity;
//! - [`encrypt`]: signs and/or encrypts a message to any number of
//!   recipients;
//! - [`decrypt`]: recovers the plaintext, the recipient key ids and the
//!   signature metadata of an incoming message;
//! - [`verify`]: checks recovered signature metadata against candidate
//!   public keys.
//!
//! All key material is passed explicitly as armored text; the library
//! keeps no state between calls.

pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod user_id;
pub mod utils;
pub mod verify;

pub use self::decrypt::{decrypt, DecryptResult, SignatureData, SignaturePackets};
pub use self::encrypt::{encrypt, EncryptParams, EncryptedMessage};
pub use self::error::{Error, Result};
pub use self::user_id::UserIdentity;
pub use self::utils::{
    export_public_key_ring, export_secret_key_ring, generate_key_pair, is_armored_public_key,
    is_armored_secret_key, is_pgp_message, key_id_bits, parse_public_key_ring,
    parse_secret_key_ring, KeyAlgorithm, KeyPairBundle, KeyPairParams,
};
pub use self::verify::{verify, VerifyResult, VerifyStatus};
