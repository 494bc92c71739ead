//! XChaCha20-Poly1305 cipher for configuration values
//!
//! Encrypted values are stored as `enc:v1:` followed by base64 of
//! `nonce || ciphertext`. The sealed plaintext always starts with the
//! `__ENV__::` marker, which is checked after decryption so that a value
//! decrypted under the wrong scheme is never mistaken for plaintext.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit, OsRng, rand_core::RngCore},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::CipherError;

/// Prefix tagging an encrypted configuration value
pub const CIPHER_PREFIX: &str = "enc:v1:";

/// Marker every sealed plaintext starts with
pub const VALUE_MARKER: &str = "__ENV__::";

/// Configuration key holding the process-wide passphrase
pub const CRYPTO_KEY_NAME: &str = "ENV_CRYPTO_KEY";

/// Passphrase used when `ENV_CRYPTO_KEY` is absent. Not a secret.
pub(crate) const FALLBACK_PASSPHRASE: &str = "msc_aes256_env_key_2026_q1_rotate_in_prod";

/// Nonce size for XChaCha20-Poly1305 (24 bytes)
const NONCE_SIZE: usize = 24;

/// blake3 key-derivation context
const KDF_CONTEXT: &str = "voicerelay 2026-01 configuration value encryption";

/// Encrypts and decrypts configuration values under a passphrase-derived key
#[derive(Clone)]
pub struct ConfigCipher {
    cipher: XChaCha20Poly1305,
}

impl std::fmt::Debug for ConfigCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigCipher")
            .field("cipher", &"[XChaCha20Poly1305]")
            .finish()
    }
}

impl ConfigCipher {
    /// Derive the 256-bit key from a passphrase
    #[must_use]
    pub fn from_passphrase(passphrase: &SecretString) -> Self {
        let key = blake3::derive_key(KDF_CONTEXT, passphrase.expose_secret().as_bytes());
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(&key)),
        }
    }

    /// Cipher keyed with the built-in fallback passphrase
    #[must_use]
    pub fn with_fallback_key() -> Self {
        Self::from_passphrase(&SecretString::from(FALLBACK_PASSPHRASE.to_string()))
    }

    /// Whether a raw configuration value is encrypted
    #[must_use]
    pub fn is_encrypted(raw: &str) -> bool {
        raw.starts_with(CIPHER_PREFIX)
    }

    /// Seal `plaintext` into a prefixed value suitable for the configuration store
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        self.seal(format!("{VALUE_MARKER}{plaintext}").as_bytes())
    }

    /// Open a prefixed value and verify its marker.
    ///
    /// Fails on a missing prefix, empty payload, bad encoding, wrong key,
    /// tampering or a missing marker; never returns partial plaintext.
    pub fn decrypt(&self, value: &str) -> Result<String, CipherError> {
        let payload = value
            .strip_prefix(CIPHER_PREFIX)
            .ok_or(CipherError::Encoding)?
            .trim();
        if payload.is_empty() {
            return Err(CipherError::Empty);
        }

        let bytes = STANDARD.decode(payload).map_err(|_| CipherError::Encoding)?;
        if bytes.len() < NONCE_SIZE {
            return Err(CipherError::Truncated);
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_SIZE);
        let opened = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| {
                warn!("Configuration value failed authentication");
                CipherError::Authentication
            })?;

        let text = String::from_utf8(opened).map_err(|_| CipherError::Utf8)?;
        let plaintext = text
            .strip_prefix(VALUE_MARKER)
            .ok_or(CipherError::MissingMarker)?;

        debug!(plaintext_len = plaintext.len(), "Decrypted configuration value");
        Ok(plaintext.to_string())
    }

    fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce), plaintext)
            .map_err(|_| CipherError::Encryption)?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok(format!("{CIPHER_PREFIX}{}", STANDARD.encode(sealed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher(passphrase: &str) -> ConfigCipher {
        ConfigCipher::from_passphrase(&SecretString::from(passphrase.to_string()))
    }

    #[test]
    fn sealed_value_opens_with_same_passphrase() {
        let sealed = cipher("team-key").encrypt("sk-live-123").unwrap();
        assert!(ConfigCipher::is_encrypted(&sealed));
        assert_eq!(cipher("team-key").decrypt(&sealed).unwrap(), "sk-live-123");
    }

    #[test]
    fn nonces_differ_between_encryptions() {
        let c = cipher("team-key");
        assert_ne!(c.encrypt("same").unwrap(), c.encrypt("same").unwrap());
    }

    #[test]
    fn wrong_passphrase_fails_authentication() {
        let sealed = cipher("right").encrypt("secret").unwrap();
        assert_eq!(cipher("wrong").decrypt(&sealed), Err(CipherError::Authentication));
    }

    #[test]
    fn markerless_plaintext_is_rejected() {
        let c = cipher("team-key");
        let sealed = c.seal(b"sk-live-123").unwrap();
        assert_eq!(c.decrypt(&sealed), Err(CipherError::MissingMarker));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert_eq!(cipher("k").decrypt("enc:v1:"), Err(CipherError::Empty));
        assert_eq!(cipher("k").decrypt("enc:v1:   "), Err(CipherError::Empty));
    }

    #[test]
    fn garbage_payloads_are_rejected() {
        let c = cipher("k");
        assert_eq!(c.decrypt("enc:v1:***"), Err(CipherError::Encoding));
        assert_eq!(
            c.decrypt(&format!("enc:v1:{}", STANDARD.encode([1u8; 8]))),
            Err(CipherError::Truncated)
        );
    }

    #[test]
    fn tampering_is_detected() {
        let c = cipher("k");
        let sealed = c.encrypt("value").unwrap();
        let mut bytes = STANDARD.decode(&sealed[CIPHER_PREFIX.len()..]).unwrap();
        if let Some(byte) = bytes.last_mut() {
            *byte ^= 0xFF;
        }
        let tampered = format!("{CIPHER_PREFIX}{}", STANDARD.encode(bytes));
        assert_eq!(c.decrypt(&tampered), Err(CipherError::Authentication));
    }
}
