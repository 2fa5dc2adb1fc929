//! Worldpay RSA public key container and parser.
//!
//! Merchant public keys are distributed in a plain text format rather than
//! PEM:
//!
//! ```text
//! <sequence>#<exponent-hex>#<modulus-hex>
//! ```
//!
//! The sequence number identifies the key version on the server side and is
//! carried in the JWE header as `kid` so the decryptor can pick the matching
//! private key.

use std::fmt;
use std::str::FromStr;

use rsa::{BigUint, RsaPublicKey};

use crate::error::{CseError, Result};

const SEPARATOR: char = '#';
const HEX_RADIX: u32 = 16;

/// A merchant RSA public key together with its sequence number.
///
/// # Examples
///
/// ```
/// use worldpay_cse::WpPublicKey;
///
/// let key: WpPublicKey = "1#10001#bf49edcaba456c6357e4ace484c3fba212543e78bf72a8c2238caaa1c7ed2026\
///     2956caa61d74840598d9b0707bc82e66f18c8b369c77ae6be0429c93323bb7511fc73d9c7f698872a8384370cd\
///     77c7516caa25a195d48701e3e0462d61200983ba26cc4a20bb059d5beda09270ea6dcf15dd92084c4d5867b609\
///     86151717a8022e4054462ee74ab8533dda77cee227a49fdaf58eaeb95df90cb8c05ee81f58bec95339b6262633\
///     aef216f3ae503e8be0650350c48859eef406e63d4399994b147e45aaa14cf9936ac6fdd7d4ec5e66b527d04175\
///     0ba63a8296b3e6e774a02ee6025c6ee66ef54c3688e4844be8951a8435e6b6e8d6763d9ee5f16521577e159d"
///     .parse()
///     .expect("well-formed key");
///
/// assert_eq!(key.key_seq_no(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpPublicKey {
    key: RsaPublicKey,
    key_seq_no: String,
}

impl WpPublicKey {
    /// Creates a key from an already-constructed [`RsaPublicKey`] and its
    /// sequence number.
    #[must_use]
    pub fn new(key: RsaPublicKey, key_seq_no: impl Into<String>) -> Self {
        Self { key, key_seq_no: key_seq_no.into() }
    }

    /// Parses the Worldpay plain text key format.
    ///
    /// The text must split into at least three `#`-separated components:
    /// sequence number, exponent and modulus (extra components are ignored).
    /// Exponent and modulus are unsigned hexadecimal integers without a `0x`
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::InvalidPublicKey`] if the component count is
    /// short, the sequence number is empty, either integer fails to parse,
    /// or the (modulus, exponent) pair is rejected as an RSA key.
    pub fn parse(plain_key: &str) -> Result<Self> {
        let mut components = plain_key.split(SEPARATOR);
        let (Some(seq_no), Some(exponent), Some(modulus)) =
            (components.next(), components.next(), components.next())
        else {
            return Err(CseError::InvalidPublicKey(
                "expected sequence#exponent#modulus".into(),
            ));
        };

        if seq_no.is_empty() {
            return Err(CseError::InvalidPublicKey("empty key sequence number".into()));
        }

        let exponent = parse_hex(exponent, "exponent")?;
        let modulus = parse_hex(modulus, "modulus")?;

        let key = RsaPublicKey::new(modulus, exponent)
            .map_err(|e| CseError::InvalidPublicKey(e.to_string()))?;

        Ok(Self { key, key_seq_no: seq_no.to_owned() })
    }

    /// Returns the underlying RSA public key.
    #[must_use]
    pub fn key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Returns the key sequence number, used as the JWE `kid`.
    #[must_use]
    pub fn key_seq_no(&self) -> &str {
        &self.key_seq_no
    }
}

/// Checks whether a plain text key parses, without surfacing the error.
///
/// Convenient for callers that want to validate a key before calling
/// [`crate::WorldpayCse::set_public_key`] without handling the failure.
///
/// # Examples
///
/// ```
/// use worldpay_cse::is_valid_public_key;
///
/// assert!(!is_valid_public_key("10001#bf49"));
/// ```
#[must_use]
pub fn is_valid_public_key(plain_key: &str) -> bool {
    match WpPublicKey::parse(plain_key) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(error = %e, "public key rejected");
            false
        }
    }
}

fn parse_hex(text: &str, component: &str) -> Result<BigUint> {
    BigUint::parse_bytes(text.as_bytes(), HEX_RADIX)
        .ok_or_else(|| CseError::InvalidPublicKey(format!("{component} is not a hex integer")))
}

impl FromStr for WpPublicKey {
    type Err = CseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Serializes back to the plain `sequence#exponent#modulus` format.
///
/// Hex components are lowercase and minimal length, so parsing and
/// re-serializing a well-formed key reproduces it exactly.
impl fmt::Display for WpPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use rsa::traits::PublicKeyParts;

        write!(
            f,
            "{seq}{sep}{e}{sep}{n}",
            seq = self.key_seq_no,
            sep = SEPARATOR,
            e = self.key.e().to_str_radix(HEX_RADIX),
            n = self.key.n().to_str_radix(HEX_RADIX),
        )
    }
}
