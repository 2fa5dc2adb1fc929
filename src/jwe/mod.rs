//! Compact JWE-style envelope construction.
//!
//! This module builds the encrypted envelope submitted in place of plaintext
//! card data. The format follows JWE compact serialization
//! ([RFC 7516](https://www.rfc-editor.org/rfc/rfc7516)) for the one algorithm
//! combination the Worldpay decryptor accepts:
//!
//! - **Key encryption**: RSA PKCS#1 v1.5 (`RSA1_5`)
//! - **Content encryption**: AES-256-GCM (`A256GCM`), 96-bit IV, 128-bit tag
//!
//! No other JOSE algorithms, headers, or serializations are supported; this
//! is a fixed wire contract, not a general JWE implementation.
//!
//! # Envelope layout
//!
//! ```text
//! base64url(header).base64url(encryptedKey).base64url(iv).base64url(cipherText).base64url(authTag)
//! ```
//!
//! The header's *encoded* form is also the AEAD additional authenticated
//! data, so any alteration of the header on the wire invalidates the tag.

pub mod encrypter;
pub mod header;
pub mod keygen;

mod envelope;

pub use envelope::Envelope;
pub use header::JweHeader;
