//! # Decrypt
//!
//! Module dedicated to PGP decryption. The [`decrypt`] pipeline walks an
//! incoming OpenPGP stream layer by layer: it strips the encryption and
//! compression layers, records which recipient keys the message was
//! encrypted to, captures any signature packets for later verification
//! and recovers the literal plaintext.

use std::io::Cursor;

use pgp::{
    packet::{OnePassSignature, Signature},
    Deserializable, Esk, Message,
};
use tracing::debug;

use crate::{encrypt::EncryptedMessage, utils, Error, Result};

/// Signature packets recovered from a message.
///
/// A one-pass marker without its trailing signature is not a state this
/// type can represent.
#[derive(Clone, Debug)]
pub enum SignaturePackets {
    /// Trailing signature(s) of a clear-signed stream, with no one-pass
    /// component.
    Detached(Vec<Signature>),
    /// One-pass declaration(s) preceding the literal data, with the
    /// trailing signature(s) that close them.
    OnePass {
        one_pass: Vec<OnePassSignature>,
        signatures: Vec<Signature>,
    },
}

impl SignaturePackets {
    /// The trailing signature packet verification runs against.
    pub fn trailing_signature(&self) -> Option<&Signature> {
        match self {
            Self::Detached(signatures) | Self::OnePass { signatures, .. } => signatures.last(),
        }
    }

    pub fn signatures(&self) -> &[Signature] {
        match self {
            Self::Detached(signatures) | Self::OnePass { signatures, .. } => signatures,
        }
    }

    pub fn one_pass_signatures(&self) -> Option<&[OnePassSignature]> {
        match self {
            Self::Detached(_) => None,
            Self::OnePass { one_pass, .. } => Some(one_pass),
        }
    }
}

/// Signature metadata recovered by [`decrypt`], ready for
/// [`crate::verify`].
#[derive(Clone, Debug, Default)]
pub struct SignatureData {
    /// The literal-data bytes the trailing signature covers.
    pub signed_content: Vec<u8>,
    /// `None` when the message carried no signature.
    pub packets: Option<SignaturePackets>,
}

impl SignatureData {
    pub fn has_signature(&self) -> bool {
        self.packets.is_some()
    }
}

/// The outcome of [`decrypt`].
#[derive(Clone, Debug)]
pub struct DecryptResult {
    pub plaintext: String,
    /// Every recipient key id found in the session-key packets, in order
    /// of appearance — not only the one that matched the secret ring.
    pub included_recipient_key_ids: Vec<u64>,
    pub signature_data: SignatureData,
}

impl DecryptResult {
    pub fn has_signature(&self) -> bool {
        self.signature_data.has_signature()
    }
}

/// Decrypts the given message using the given secret key ring and its
/// passphrase.
///
/// Unencrypted (clear-signed) streams go through the same pipeline and
/// yield an empty recipient key id list.
pub fn decrypt(
    secret_key_armored: impl AsRef<str>,
    passphrase: impl ToString,
    message: &EncryptedMessage,
) -> Result<DecryptResult> {
    let passphrase = passphrase.to_string();
    let skey = utils::parse_secret_key_ring(secret_key_armored, &passphrase)?;

    let (msg, _) = Message::from_armor_single(Cursor::new(message.as_bytes()))
        .map_err(Error::ImportMessageFromArmor)?;

    let encrypted = matches!(msg, Message::Encrypted { .. });
    let included_recipient_key_ids = recipient_key_ids(&msg);

    let inner = if encrypted {
        debug!(
            "message encrypted to {} recipient key(s)",
            included_recipient_key_ids.len()
        );
        let (decrypter, _) = msg
            .decrypt(|| passphrase.clone(), &[&skey])
            .map_err(map_decrypt_err)?;
        let msgs = decrypter
            .collect::<pgp::errors::Result<Vec<_>>>()
            .map_err(map_decrypt_err)?;
        msgs.into_iter().next().ok_or(Error::EmptyMessageContent)?
    } else {
        debug!("message carries no encryption layer");
        msg
    };

    let inner = inner.decompress().map_err(Error::DecompressMessage)?;
    let (signed_content, packets) = take_content(inner, encrypted)?;

    let plaintext =
        String::from_utf8(signed_content.clone()).map_err(Error::NonUtf8MessageContent)?;

    Ok(DecryptResult {
        plaintext,
        included_recipient_key_ids,
        signature_data: SignatureData {
            signed_content,
            packets,
        },
    })
}

/// Collects the key id of every public-key session-key packet, keeping
/// the order they appear in on the wire.
fn recipient_key_ids(msg: &Message) -> Vec<u64> {
    match msg {
        Message::Encrypted { esk, .. } => esk
            .iter()
            .filter_map(|esk| match esk {
                Esk::PublicKeyEncryptedSessionKey(k) => Some(utils::key_id_bits(k.id())),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Extracts the literal-data bytes and the signature packets of a fully
/// unwrapped message.
///
/// A signed stream that was not wrapped in an encryption layer is a
/// clear-signed message: only its trailing signature is exposed, with no
/// one-pass component.
fn take_content(msg: Message, encrypted: bool) -> Result<(Vec<u8>, Option<SignaturePackets>)> {
    match msg {
        Message::Signed {
            message,
            one_pass_signature,
            signature,
        } => {
            let inner = message.ok_or_else(|| {
                Error::UnsupportedPacketStructure("signature packet without signed content".into())
            })?;
            let content = inner
                .get_content()
                .map_err(Error::GetMessageContent)?
                .ok_or(Error::EmptyMessageContent)?;

            let packets = match one_pass_signature {
                Some(one_pass) if encrypted => SignaturePackets::OnePass {
                    one_pass: vec![one_pass],
                    signatures: vec![signature],
                },
                _ => SignaturePackets::Detached(vec![signature]),
            };

            Ok((content, Some(packets)))
        }
        msg => {
            let content = msg
                .get_content()
                .map_err(Error::GetMessageContent)?
                .ok_or(Error::EmptyMessageContent)?;
            Ok((content, None))
        }
    }
}

fn map_decrypt_err(err: pgp::errors::Error) -> Error {
    match err {
        pgp::errors::Error::MissingKey => Error::NoMatchingKey,
        pgp::errors::Error::MdcError => Error::IntegrityCheckFailed,
        err => Error::DecryptMessage(err),
    }
}
