//! Content and key encrypters.
//!
//! Two implementations of one [`Encrypter`] capability: AES-256-GCM for the
//! payload and RSA PKCS#1 v1.5 for wrapping the one-time content key. The
//! envelope builder wires both concretely; no further dispatch is needed.

use aes_gcm::aead::KeyInit;
use aes_gcm::{AeadInPlace, Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rsa::Pkcs1v15Encrypt;

use crate::error::{CseError, Result};
use crate::key::WpPublicKey;

/// A one-shot byte encrypter.
pub trait Encrypter {
    /// Encrypts `data`, returning the cipher output.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::EncryptionFailure`] if the underlying primitive
    /// rejects its input.
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// AES-256-GCM content encrypter.
///
/// Output is `ciphertext || tag` with a fixed 128-bit tag; the caller splits
/// the trailing 16 bytes before serialization.
pub struct AesGcmEncrypter {
    key: [u8; 32],
    iv: [u8; 12],
    aad: Vec<u8>,
}

impl AesGcmEncrypter {
    /// Creates a content encrypter for a single use.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::EncryptionFailure`] if `key` is not 256 bits or
    /// `iv` is not 96 bits.
    pub fn new(key: &[u8], iv: &[u8], aad: Vec<u8>) -> Result<Self> {
        let key: [u8; 32] = key
            .try_into()
            .map_err(|_| CseError::EncryptionFailure("content key must be 256 bits".into()))?;
        let iv: [u8; 12] = iv
            .try_into()
            .map_err(|_| CseError::EncryptionFailure("IV must be 96 bits".into()))?;

        Ok(Self { key, iv, aad })
    }
}

/// Key material is never exposed through `Debug`.
impl std::fmt::Debug for AesGcmEncrypter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmEncrypter").finish_non_exhaustive()
    }
}

impl Encrypter for AesGcmEncrypter {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let nonce = Nonce::from_slice(&self.iv);

        let mut buffer = data.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(nonce, &self.aad, &mut buffer)
            .map_err(|e| CseError::EncryptionFailure(format!("AES-GCM encryption failed: {e}")))?;

        buffer.extend_from_slice(&tag);
        Ok(buffer)
    }
}

/// RSA PKCS#1 v1.5 key encrypter.
///
/// Wraps the 32-byte content key under the merchant's public key. The key
/// being wrapped is far below the padding limit of any ≥ 2048-bit modulus;
/// no chunking is implemented, so oversized inputs are a caller error.
#[derive(Debug)]
pub struct RsaEncrypter<'a> {
    key: &'a WpPublicKey,
}

impl<'a> RsaEncrypter<'a> {
    /// Creates a key encrypter for the given public key.
    #[must_use]
    pub fn new(key: &'a WpPublicKey) -> Self {
        Self { key }
    }
}

impl Encrypter for RsaEncrypter<'_> {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.key
            .key()
            .encrypt(&mut OsRng, Pkcs1v15Encrypt, data)
            .map_err(|e| CseError::EncryptionFailure(format!("RSA encryption failed: {e}")))
    }
}
