//! Module dedicated to the global `Error` enum of the library.
//!
//! Every operation returns the crate-wide [`Result`]. Callers that need
//! to branch on the failure kind (prompt for a new passphrase, reject the
//! input, pick another key…) can match on the dedicated variants instead
//! of inspecting error messages.

use pgp::{SecretKeyParamsBuilderError, SubkeyParamsBuilderError};
use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    /// The armor, checksum or packet structure of a key ring is invalid.
    #[error("cannot parse pgp key ring from armor")]
    MalformedKeyRing(#[source] pgp::errors::Error),
    /// A user id string does not follow the `name <email>` shape.
    #[error("cannot parse pgp user id {0:?}")]
    MalformedUserId(String),
    /// The passphrase does not unlock the secret key material.
    ///
    /// Distinct from [`Error::MalformedKeyRing`] so callers can prompt
    /// for re-entry instead of rejecting the key data.
    #[error("cannot unlock pgp secret key: wrong passphrase")]
    WrongPassphrase(#[source] pgp::errors::Error),
    /// None of the session key packets match a key of the secret ring.
    #[error("cannot decrypt pgp message: none of the secret keys match")]
    NoMatchingKey,
    /// A recipient key ring carries no encryption-capable key at all.
    #[error("cannot encrypt pgp message: key ring {0:016x} has no encryption-capable key")]
    NoEncryptionSubkey(u64),
    /// The integrity protection tag of the encrypted layer does not match.
    #[error("cannot decrypt pgp message: integrity protection check failed")]
    IntegrityCheckFailed,
    /// The packet stream is valid OpenPGP but not a shape this crate handles.
    #[error("unsupported pgp packet structure: {0}")]
    UnsupportedPacketStructure(String),

    #[error("cannot sign pgp message: no signer secret key provided")]
    MissingSignerSecretKey,
    #[error("cannot find issuer key id in pgp signature")]
    MissingSignatureKeyId,

    #[error("cannot build pgp secret key params")]
    BuildSecretKeyParams(#[source] SecretKeyParamsBuilderError),
    #[error("cannot build pgp subkey params")]
    BuildSubkeyParams(#[source] SubkeyParamsBuilderError),
    #[error("cannot generate pgp secret key")]
    GenerateSecretKey(#[source] pgp::errors::Error),
    #[error("cannot sign pgp secret key")]
    SignSecretKey(#[source] pgp::errors::Error),
    #[error("cannot verify pgp secret key")]
    VerifySecretKey(#[source] pgp::errors::Error),
    #[error("cannot sign pgp public key")]
    SignPublicKey(#[source] pgp::errors::Error),
    #[error("cannot verify pgp public key")]
    VerifyPublicKey(#[source] pgp::errors::Error),

    #[error("cannot import armored pgp message")]
    ImportMessageFromArmor(#[source] pgp::errors::Error),
    #[error("cannot sign pgp message")]
    SignMessage(#[source] pgp::errors::Error),
    #[error("cannot encrypt pgp message")]
    EncryptMessage(#[source] pgp::errors::Error),
    #[error("cannot decrypt pgp message")]
    DecryptMessage(#[source] pgp::errors::Error),
    #[error("cannot compress pgp message")]
    CompressMessage(#[source] pgp::errors::Error),
    #[error("cannot decompress pgp message")]
    DecompressMessage(#[source] pgp::errors::Error),
    #[error("cannot export pgp data as armored text")]
    ExportToArmor(#[source] pgp::errors::Error),
    #[error("cannot get pgp message content")]
    GetMessageContent(#[source] pgp::errors::Error),
    #[error("cannot get pgp message content: message is empty")]
    EmptyMessageContent,
    #[error("cannot decode pgp message content as utf-8")]
    NonUtf8MessageContent(#[source] std::string::FromUtf8Error),
}
