//! Secure configuration access for VoiceRelay
//!
//! Every configuration read goes through [`ConfigAccessor`], which transparently
//! decrypts values carrying the `enc:v1:` prefix. [`CredentialGate`] decides
//! whether a provider has the keys it needs without touching the network.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use domain::ProviderId;
//! use secure_config::{ConfigAccessor, CredentialGate, MapConfigSource};
//!
//! let source = MapConfigSource::from_iter([("DEEPGRAM_API_KEY", "dg-key")]);
//! let accessor = Arc::new(ConfigAccessor::new(Arc::new(source)));
//! let gate = CredentialGate::new(accessor);
//!
//! assert!(gate.is_available(ProviderId::Deepgram.descriptor()));
//! assert!(!gate.is_available(ProviderId::Gemini.descriptor()));
//! ```

pub mod accessor;
pub mod cipher;
pub mod credentials;
pub mod error;
pub mod flags;
pub mod source;

pub use accessor::ConfigAccessor;
pub use cipher::{CIPHER_PREFIX, CRYPTO_KEY_NAME, ConfigCipher, VALUE_MARKER};
pub use credentials::{CredentialGate, ResolvedCredentials};
pub use error::{CipherError, ConfigDecryptError, CredentialError, CredentialMissingError};
pub use flags::ProviderFlags;
pub use source::{ConfigSource, EnvConfigSource, MapConfigSource};
