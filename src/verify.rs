//! # Verify
//!
//! Module dedicated to PGP signature verification. Given the signature
//! metadata recovered by [`crate::decrypt`] and a set of candidate
//! public keys, [`verify`] reports a [`VerifyStatus`].
//!
//! A cryptographically invalid signature is a normal result value
//! ([`VerifyStatus::SignatureBad`]), not an error: errors are reserved
//! for cases where no determination could be made at all.

use tracing::{debug, warn};

use crate::{decrypt::SignatureData, utils, Error, Result};

/// The outcome of a signature verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyStatus {
    /// The signature is valid for the matched public key.
    SignatureOk,
    /// A candidate key matched the signing key id but the signature does
    /// not verify.
    SignatureBad,
    /// The message carried no signature.
    NoSignature,
    /// No candidate key matches the signing key id.
    UnknownPublicKey,
}

/// A [`VerifyStatus`] plus the 64-bit id of the signing key, when the
/// signature names one and a candidate key matched it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyResult {
    pub status: VerifyStatus,
    pub key_id: Option<u64>,
}

/// Verifies the trailing signature of the given signature metadata
/// against the given armored candidate public key rings.
///
/// The candidate rings are searched for a master key or subkey matching
/// the signature's issuer key id; verification then runs over the
/// recovered literal-data bytes in one buffered step, which yields the
/// same result as streaming them in one-pass declaration order.
pub fn verify(
    signature_data: &SignatureData,
    candidate_public_keys: &[impl AsRef<str>],
) -> Result<VerifyResult> {
    let packets = match &signature_data.packets {
        Some(packets) => packets,
        None => {
            return Ok(VerifyResult {
                status: VerifyStatus::NoSignature,
                key_id: None,
            })
        }
    };

    let signature = packets.trailing_signature().ok_or_else(|| {
        Error::UnsupportedPacketStructure("signature list without a trailing signature".into())
    })?;
    let issuer = signature.issuer().ok_or(Error::MissingSignatureKeyId)?;

    for armored in candidate_public_keys {
        let ring = utils::parse_public_key_ring(armored.as_ref())?;
        let key = match utils::find_key_by_id(&ring, issuer) {
            Some(key) => key,
            None => continue,
        };

        let key_id = Some(utils::key_id_bits(issuer));
        return match signature.verify(&key, signature_data.signed_content.as_slice()) {
            Ok(()) => Ok(VerifyResult {
                status: VerifyStatus::SignatureOk,
                key_id,
            }),
            Err(err) => {
                warn!("cannot verify pgp signature: {err}");
                Ok(VerifyResult {
                    status: VerifyStatus::SignatureBad,
                    key_id,
                })
            }
        };
    }

    debug!("no candidate key matches signing key id {issuer:?}");
    Ok(VerifyResult {
        status: VerifyStatus::UnknownPublicKey,
        key_id: None,
    })
}

#[cfg(test)]
mod tests {
    use pgp::types::KeyTrait;

    use super::*;
    use crate::{
        decrypt::decrypt,
        encrypt::{encrypt, EncryptParams},
        utils::{generate_key_pair, key_id_bits, parse_public_key_ring, KeyPairBundle, KeyPairParams},
    };

    fn key_pair(name: &str, email: &str) -> KeyPairBundle {
        generate_key_pair(&KeyPairParams::new(name, email)).unwrap()
    }

    fn master_key_id(armored: &str) -> u64 {
        key_id_bits(&parse_public_key_ring(armored).unwrap().key_id())
    }

    #[test_log::test]
    fn verify_signed_message() {
        let alice = key_pair("alice", "alice@localhost");
        let bob = key_pair("bob", "bob@localhost");
        let carl = key_pair("carl", "carl@localhost");
        let pubkeys = vec![
            alice.public_key.clone(),
            bob.public_key.clone(),
            carl.public_key.clone(),
        ];

        let encrypted = encrypt(&EncryptParams {
            message: "Hello world!".into(),
            recipient_public_keys: pubkeys.clone(),
            sign_enabled: true,
            signer_secret_key: Some(alice.secret_key.clone()),
            signer_passphrase: None,
        })
        .unwrap();
        let result = decrypt(&bob.secret_key, "", &encrypted).unwrap();

        let verified = verify(&result.signature_data, &pubkeys).unwrap();
        assert_eq!(verified.status, VerifyStatus::SignatureOk);
        assert_eq!(verified.key_id, Some(master_key_id(&alice.public_key)));

        // same signer, unrelated candidate set
        let mallory = key_pair("mallory", "mallory@localhost");
        let verified = verify(&result.signature_data, &[mallory.public_key]).unwrap();
        assert_eq!(verified.status, VerifyStatus::UnknownPublicKey);
        assert_eq!(verified.key_id, None);
    }

    #[test_log::test]
    fn verify_clear_signed_message() {
        let alice = key_pair("alice", "alice@localhost");

        let clear_signed = encrypt(&EncryptParams {
            message: "Hello world!".into(),
            recipient_public_keys: vec![],
            sign_enabled: true,
            signer_secret_key: Some(alice.secret_key.clone()),
            signer_passphrase: None,
        })
        .unwrap();
        let result = decrypt(&alice.secret_key, "", &clear_signed).unwrap();

        let verified = verify(&result.signature_data, &[alice.public_key.clone()]).unwrap();
        assert_eq!(verified.status, VerifyStatus::SignatureOk);
        assert_eq!(verified.key_id, Some(master_key_id(&alice.public_key)));
    }

    #[test_log::test]
    fn verify_unsigned_message() {
        let alice = key_pair("alice", "alice@localhost");

        let encrypted = encrypt(&EncryptParams {
            message: "Hello world!".into(),
            recipient_public_keys: vec![alice.public_key.clone()],
            ..Default::default()
        })
        .unwrap();
        let result = decrypt(&alice.secret_key, "", &encrypted).unwrap();

        let verified = verify(&result.signature_data, &[alice.public_key]).unwrap();
        assert_eq!(verified.status, VerifyStatus::NoSignature);
        assert_eq!(verified.key_id, None);
    }

    #[test_log::test]
    fn verify_tampered_content() {
        let alice = key_pair("alice", "alice@localhost");

        let encrypted = encrypt(&EncryptParams {
            message: "Hello world!".into(),
            recipient_public_keys: vec![alice.public_key.clone()],
            sign_enabled: true,
            signer_secret_key: Some(alice.secret_key.clone()),
            signer_passphrase: None,
        })
        .unwrap();
        let result = decrypt(&alice.secret_key, "", &encrypted).unwrap();

        let mut tampered = result.signature_data.clone();
        tampered.signed_content = b"Hello world?".to_vec();

        let verified = verify(&tampered, &[alice.public_key.clone()]).unwrap();
        assert_eq!(verified.status, VerifyStatus::SignatureBad);
        assert_eq!(verified.key_id, Some(master_key_id(&alice.public_key)));
    }
}
