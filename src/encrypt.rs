//! # Encrypt
//!
//! Module dedicated to PGP encryption. This module exposes the
//! [`encrypt`] pipeline: it builds an output OpenPGP stream by wrapping
//! the message as literal data, signing it when requested, compressing
//! the stream and encrypting it to every recipient.

use pgp::{
    crypto::{hash::HashAlgorithm, sym::SymmetricKeyAlgorithm},
    types::{CompressionAlgorithm, KeyTrait},
    Message,
};
use rand::thread_rng;
use tracing::debug;

use crate::{
    utils::{self, PublicKeyOrSubkey},
    Error, Result,
};

/// Parameters for [`encrypt`].
///
/// `recipient_public_keys` may be empty: with `sign_enabled` the output
/// is then a clear-signed message, compressed but not encrypted. With
/// neither recipients nor signing there is nothing to build and the call
/// is rejected.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EncryptParams {
    pub message: String,
    /// Armored recipient key rings, in encryption order.
    pub recipient_public_keys: Vec<String>,
    pub sign_enabled: bool,
    /// Armored secret key ring of the signer. Required when
    /// `sign_enabled` is set.
    pub signer_secret_key: Option<String>,
    pub signer_passphrase: Option<String>,
}

/// An OpenPGP message produced by [`encrypt`], as armored bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedMessage(Vec<u8>);

impl EncryptedMessage {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` when the payload starts with the PGP message armor
    /// header or with a binary packet tag.
    pub fn is_pgp_message(&self) -> bool {
        utils::is_pgp_message(&self.0)
    }
}

impl From<String> for EncryptedMessage {
    fn from(armored: String) -> Self {
        Self(armored.into_bytes())
    }
}

impl From<Vec<u8>> for EncryptedMessage {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for EncryptedMessage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encrypts and/or signs the given message for the given recipients.
///
/// Layers are composed inside-out: literal data, then an optional
/// one-pass signature, then ZLIB compression, then one session key
/// encrypted to every recipient's encryption key, preserving recipient
/// order. The armored output differs run-to-run (session key and
/// signature nonce randomness); only the logical round trip through
/// [`crate::decrypt`] is stable.
pub fn encrypt(params: &EncryptParams) -> Result<EncryptedMessage> {
    if !params.sign_enabled && params.recipient_public_keys.is_empty() {
        return Err(Error::UnsupportedPacketStructure(
            "no recipients and signing disabled".into(),
        ));
    }

    let mut rng = thread_rng();

    let msg = Message::new_literal_bytes("", params.message.as_bytes());

    let msg = if params.sign_enabled {
        let armored = params
            .signer_secret_key
            .as_deref()
            .ok_or(Error::MissingSignerSecretKey)?;
        let passphrase = params.signer_passphrase.clone().unwrap_or_default();
        let skey = utils::parse_secret_key_ring(armored, &passphrase)?;

        debug!("signing message with key {:016x}", utils::key_id_bits(&skey.key_id()));
        msg.sign(&skey, || passphrase.clone(), HashAlgorithm::SHA2_256)
            .map_err(Error::SignMessage)?
    } else {
        msg
    };

    let msg = msg
        .compress(CompressionAlgorithm::ZLIB)
        .map_err(Error::CompressMessage)?;

    let msg = if params.recipient_public_keys.is_empty() {
        debug!("no recipients, leaving message unencrypted");
        msg
    } else {
        let rings = params
            .recipient_public_keys
            .iter()
            .map(utils::parse_public_key_ring)
            .collect::<Result<Vec<_>>>()?;

        let mut enc_keys: Vec<PublicKeyOrSubkey> = Vec::with_capacity(rings.len());
        for ring in &rings {
            let key = utils::find_encryption_key(ring)
                .ok_or_else(|| Error::NoEncryptionSubkey(utils::key_id_bits(&ring.key_id())))?;
            enc_keys.push(key);
        }
        let enc_keys_refs: Vec<&PublicKeyOrSubkey> = enc_keys.iter().collect();

        debug!("encrypting message to {} recipient(s)", enc_keys_refs.len());
        msg.encrypt_to_keys(&mut rng, SymmetricKeyAlgorithm::AES256, &enc_keys_refs)
            .map_err(Error::EncryptMessage)?
    };

    let armored = msg.to_armored_bytes(None).map_err(Error::ExportToArmor)?;

    Ok(EncryptedMessage::new(armored))
}
