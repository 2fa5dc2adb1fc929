//! Envelope assembly and compact serialization.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::Result;
use crate::jwe::encrypter::{AesGcmEncrypter, Encrypter, RsaEncrypter};
use crate::jwe::header::JweHeader;
use crate::jwe::keygen;
use crate::key::WpPublicKey;

/// A sealed five-part envelope.
///
/// Produced once per encryption call and never reused; the one-time IV and
/// content key are discarded when sealing completes. [`Envelope::serialize`]
/// emits the compact wire form consumed by the decrypting party:
///
/// ```text
/// b64url(header).b64url(encryptedKey).b64url(iv).b64url(cipherText).b64url(authTag)
/// ```
///
/// with every part unpadded.
#[derive(Debug, Clone)]
pub struct Envelope {
    header: String,
    encrypted_key: Vec<u8>,
    iv: Vec<u8>,
    cipher_text: Vec<u8>,
    auth_tag: Vec<u8>,
}

impl Envelope {
    /// Encrypts `payload` under a fresh content key wrapped with `key`.
    ///
    /// Steps:
    /// 1. generate a 96-bit IV and a 256-bit content key,
    /// 2. take the base64url-encoded header as AAD (the encoded form, so the
    ///    exact wire representation is authenticated, not just its content),
    /// 3. wrap the content key with RSA PKCS#1 v1.5,
    /// 4. AES-256-GCM encrypt the payload and split off the trailing 128-bit
    ///    authentication tag.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CseError::EncryptionFailure`] if either cipher
    /// primitive rejects its input. A failed seal produces no partial
    /// envelope.
    pub fn seal(header: &JweHeader, payload: &[u8], key: &WpPublicKey) -> Result<Self> {
        let iv = keygen::generate(keygen::IV_BIT_LENGTH);
        let content_key = keygen::generate(keygen::KEY_BIT_LENGTH);

        let encoded_header = header.to_base64url()?;
        let aad = encoded_header.clone().into_bytes();

        let key_encrypter = RsaEncrypter::new(key);
        let content_encrypter = AesGcmEncrypter::new(&content_key, &iv, aad)?;

        let encrypted_key = key_encrypter.encrypt(&content_key)?;
        let mut cipher_text = content_encrypter.encrypt(payload)?;

        let tag_len = keygen::AUTH_TAG_BIT_LENGTH / 8;
        let auth_tag = cipher_text.split_off(cipher_text.len() - tag_len);

        Ok(Self { header: encoded_header, encrypted_key, iv, cipher_text, auth_tag })
    }

    /// Serializes to the compact dot-joined form.
    #[must_use]
    pub fn serialize(&self) -> String {
        [
            self.header.clone(),
            URL_SAFE_NO_PAD.encode(&self.encrypted_key),
            URL_SAFE_NO_PAD.encode(&self.iv),
            URL_SAFE_NO_PAD.encode(&self.cipher_text),
            URL_SAFE_NO_PAD.encode(&self.auth_tag),
        ]
        .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_header() -> JweHeader {
        JweHeader {
            alg: "RSA1_5".to_owned(),
            enc: "A256GCM".to_owned(),
            kid: "1".to_owned(),
            api_version: "1.0".to_owned(),
            lib_version: "1.0.1".to_owned(),
            channel: "rust".to_owned(),
        }
    }

    fn test_key() -> WpPublicKey {
        "1#10001#bf49edcaba456c6357e4ace484c3fba212543e78bf\
         72a8c2238caaa1c7ed20262956caa61d74840598d9b0707bc8\
         2e66f18c8b369c77ae6be0429c93323bb7511fc73d9c7f6988\
         72a8384370cd77c7516caa25a195d48701e3e0462d61200983\
         ba26cc4a20bb059d5beda09270ea6dcf15dd92084c4d5867b6\
         0986151717a8022e4054462ee74ab8533dda77cee227a49fda\
         f58eaeb95df90cb8c05ee81f58bec95339b6262633aef216f3\
         ae503e8be0650350c48859eef406e63d4399994b147e45aaa1\
         4cf9936ac6fdd7d4ec5e66b527d041750ba63a8296b3e6e774\
         a02ee6025c6ee66ef54c3688e4844be8951a8435e6b6e8d676\
         3d9ee5f16521577e159d"
            .parse()
            .expect("test key should parse")
    }

    #[test]
    fn test_compact_form_has_five_parts() {
        let envelope = Envelope::seal(&test_header(), b"{\"cardNumber\":\"x\"}", &test_key())
            .expect("seal should succeed");
        let compact = envelope.serialize();

        let parts: Vec<&str> = compact.split('.').collect();
        assert_eq!(parts.len(), 5);
        assert!(parts.iter().all(|p| !p.is_empty()), "all parts non-empty: {compact}");
    }

    #[test]
    fn test_compact_form_is_unpadded_base64url() {
        let envelope =
            Envelope::seal(&test_header(), b"payload", &test_key()).expect("seal should succeed");
        let compact = envelope.serialize();

        assert!(!compact.contains('='), "no padding characters: {compact}");
        assert!(!compact.contains('+') && !compact.contains('/'), "url-safe alphabet only");
    }

    #[test]
    fn test_part_sizes_match_algorithm_parameters() {
        let payload = b"sixteen byte pay";
        let envelope =
            Envelope::seal(&test_header(), payload, &test_key()).expect("seal should succeed");

        assert_eq!(envelope.iv.len(), 12, "96-bit IV");
        assert_eq!(envelope.auth_tag.len(), 16, "128-bit tag");
        assert_eq!(envelope.cipher_text.len(), payload.len(), "GCM is length-preserving");
        assert_eq!(envelope.encrypted_key.len(), 256, "2048-bit RSA output");
    }

    #[test]
    fn test_header_part_is_the_encoded_header() {
        let header = test_header();
        let envelope =
            Envelope::seal(&header, b"payload", &test_key()).expect("seal should succeed");
        let compact = envelope.serialize();

        let first = compact.split('.').next().expect("has parts");
        assert_eq!(first, header.to_base64url().unwrap());
    }

    #[test]
    fn test_envelopes_are_single_use() {
        // Fresh IV and content key per seal: identical inputs must not
        // produce identical envelopes.
        let a = Envelope::seal(&test_header(), b"payload", &test_key()).unwrap().serialize();
        let b = Envelope::seal(&test_header(), b"payload", &test_key()).unwrap().serialize();

        assert_ne!(a, b);
    }
}
