//! Decrypt-on-read configuration accessor

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{instrument, warn};

use crate::cipher::{CRYPTO_KEY_NAME, ConfigCipher};
use crate::error::ConfigDecryptError;
use crate::source::ConfigSource;

/// Reads configuration values, decrypting `enc:v1:` values transparently.
///
/// The passphrase is read once from `ENV_CRYPTO_KEY` when the accessor is
/// built. Callers never need to know whether a value was stored encrypted.
pub struct ConfigAccessor {
    source: Arc<dyn ConfigSource>,
    cipher: ConfigCipher,
    uses_fallback_key: bool,
}

impl std::fmt::Debug for ConfigAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigAccessor")
            .field("uses_fallback_key", &self.uses_fallback_key)
            .finish_non_exhaustive()
    }
}

impl ConfigAccessor {
    /// Wrap a raw source, keying the cipher from its `ENV_CRYPTO_KEY`
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        let passphrase = source
            .raw(CRYPTO_KEY_NAME)
            .filter(|value| !value.trim().is_empty());

        let (cipher, uses_fallback_key) = match passphrase {
            Some(passphrase) => (
                ConfigCipher::from_passphrase(&SecretString::from(passphrase)),
                false,
            ),
            None => {
                warn!(
                    key = CRYPTO_KEY_NAME,
                    "Encryption key not configured, using built-in default key"
                );
                (ConfigCipher::with_fallback_key(), true)
            },
        };

        Self {
            source,
            cipher,
            uses_fallback_key,
        }
    }

    /// Plaintext value of `key`, or `None` when absent.
    ///
    /// Encrypted values are decrypted; anything else passes through unchanged.
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigDecryptError> {
        let Some(raw) = self.source.raw(key) else {
            return Ok(None);
        };

        if !ConfigCipher::is_encrypted(&raw) {
            return Ok(Some(raw));
        }

        self.cipher
            .decrypt(&raw)
            .map(Some)
            .map_err(|reason| ConfigDecryptError {
                key: key.to_string(),
                reason,
            })
    }

    /// Trimmed value of `key`, treating blank values as absent
    pub fn get_trimmed(&self, key: &str) -> Result<Option<String>, ConfigDecryptError> {
        Ok(self
            .get(key)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    /// Trimmed value of `key`, or `default` when absent or blank
    pub fn get_or(&self, key: &str, default: &str) -> Result<String, ConfigDecryptError> {
        Ok(self
            .get_trimmed(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Whether the built-in default passphrase is in use
    #[must_use]
    pub const fn uses_fallback_key(&self) -> bool {
        self.uses_fallback_key
    }

    /// Cipher bound to the accessor's passphrase
    #[must_use]
    pub const fn cipher(&self) -> &ConfigCipher {
        &self.cipher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::CIPHER_PREFIX;
    use crate::error::CipherError;
    use crate::source::MapConfigSource;

    fn accessor(source: MapConfigSource) -> ConfigAccessor {
        ConfigAccessor::new(Arc::new(source))
    }

    #[test]
    fn plain_values_pass_through() {
        let acc = accessor(MapConfigSource::from_iter([("DEEPGRAM_API_KEY", " dg ")]));
        assert_eq!(acc.get("DEEPGRAM_API_KEY").unwrap().as_deref(), Some(" dg "));
        assert_eq!(acc.get_trimmed("DEEPGRAM_API_KEY").unwrap().as_deref(), Some("dg"));
        assert_eq!(acc.get("MISSING").unwrap(), None);
    }

    #[test]
    fn encrypted_values_decrypt_with_configured_key() {
        let passphrase = SecretString::from("team-key".to_string());
        let sealed = ConfigCipher::from_passphrase(&passphrase)
            .encrypt("sk-123")
            .unwrap();
        let acc = accessor(
            MapConfigSource::new()
                .with("ENV_CRYPTO_KEY", "team-key")
                .with("OPENAI_API_KEY", sealed),
        );
        assert!(!acc.uses_fallback_key());
        assert_eq!(acc.get("OPENAI_API_KEY").unwrap().as_deref(), Some("sk-123"));
    }

    #[test]
    fn fallback_key_is_used_when_unconfigured() {
        let sealed = ConfigCipher::with_fallback_key().encrypt("gm-1").unwrap();
        let acc = accessor(
            MapConfigSource::new()
                .with("ENV_CRYPTO_KEY", "   ")
                .with("GEMINI_API_KEY", sealed),
        );
        assert!(acc.uses_fallback_key());
        assert_eq!(acc.get("GEMINI_API_KEY").unwrap().as_deref(), Some("gm-1"));
    }

    #[test]
    fn wrong_key_propagates_decrypt_error() {
        let sealed = ConfigCipher::with_fallback_key().encrypt("gm-1").unwrap();
        let acc = accessor(
            MapConfigSource::new()
                .with("ENV_CRYPTO_KEY", "other")
                .with("GEMINI_API_KEY", sealed),
        );
        let err = acc.get("GEMINI_API_KEY").unwrap_err();
        assert_eq!(err.key, "GEMINI_API_KEY");
        assert_eq!(err.reason, CipherError::Authentication);
    }

    #[test]
    fn empty_ciphertext_is_an_error_not_an_empty_string() {
        let acc = accessor(MapConfigSource::from_iter([("OPENAI_API_KEY", CIPHER_PREFIX)]));
        assert_eq!(acc.get("OPENAI_API_KEY").unwrap_err().reason, CipherError::Empty);
    }

    #[test]
    fn get_or_applies_default_for_blank_values() {
        let acc = accessor(MapConfigSource::from_iter([("AWS_TRANSCRIBE_PREFIX", "  ")]));
        assert_eq!(
            acc.get_or("AWS_TRANSCRIBE_PREFIX", "voice-inputs").unwrap(),
            "voice-inputs"
        );
    }
}
