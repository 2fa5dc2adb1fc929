//! JWE protected header.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CseError, Result};

/// The JWE header carried as the first part of the compact envelope.
///
/// Serializes to a JSON object with a fixed field order:
///
/// ```json
/// {
///     "alg": "RSA1_5",
///     "enc": "A256GCM",
///     "kid": "<key sequence number>",
///     "com.worldpay.apiVersion": "1.0",
///     "com.worldpay.libVersion": "1.0.1",
///     "com.worldpay.channel": "rust"
/// }
/// ```
///
/// The base64url encoding of this JSON doubles as the AEAD additional
/// authenticated data, binding the exact wire representation of the header
/// to the ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JweHeader {
    /// Key-encryption algorithm identifier.
    pub alg: String,

    /// Content-encryption algorithm identifier.
    pub enc: String,

    /// Key identifier: the public key's sequence number.
    pub kid: String,

    /// Worldpay API version the payload conforms to.
    #[serde(rename = "com.worldpay.apiVersion")]
    pub api_version: String,

    /// Version of the encrypting library.
    #[serde(rename = "com.worldpay.libVersion")]
    pub lib_version: String,

    /// Platform channel that produced the envelope.
    #[serde(rename = "com.worldpay.channel")]
    pub channel: String,
}

impl JweHeader {
    /// Serializes the header to its canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::EncryptionFailure`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CseError::EncryptionFailure(format!("header serialization failed: {e}")))
    }

    /// Returns the unpadded base64url encoding of the canonical JSON form,
    /// as used both for the first envelope part and as the AAD.
    pub fn to_base64url(&self) -> Result<String> {
        Ok(URL_SAFE_NO_PAD.encode(self.to_json()?.as_bytes()))
    }
}
