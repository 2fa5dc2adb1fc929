//! Payment card data record.
//!
//! [`CardData`] holds the five sensitive card fields exactly as collected
//! from the payer. The JSON field names and casing form the payload schema
//! consumed by the decrypting backend and must not change:
//!
//! ```json
//! {
//!     "cardNumber": "4444333322221111",
//!     "cvc": "123",
//!     "expiryMonth": "12",
//!     "expiryYear": "2030",
//!     "cardHolderName": "John Smith"
//! }
//! ```
//!
//! # Security
//!
//! - Never log card numbers, CVC, or expiry dates
//! - The `Debug` representation masks the PAN and omits the CVC
//! - PAN and CVC are zeroized on drop (PCI-DSS requirement)

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{CseError, Result};

/// Payment card data to be validated and encrypted.
///
/// All fields are plain strings as typed by the payer; validation happens in
/// [`crate::validation`], not on construction. The `cvc` field is optional:
/// an empty string means the payer did not supply one, and the field is then
/// omitted from the JSON payload.
///
/// # Examples
///
/// ```
/// use worldpay_cse::CardData;
///
/// let card = CardData {
///     card_number: "4444333322221111".to_owned(),
///     cvc: "123".to_owned(),
///     expiry_month: "12".to_owned(),
///     expiry_year: "2030".to_owned(),
///     card_holder_name: "John Smith".to_owned(),
/// };
///
/// assert_eq!(card.last_four(), "1111");
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardData {
    /// Card number (PAN), 12 to 20 digits.
    #[serde(rename = "cardNumber")]
    pub card_number: String,

    /// Card verification code, 3 or 4 digits. Empty when not supplied.
    #[serde(rename = "cvc", default, skip_serializing_if = "String::is_empty")]
    pub cvc: String,

    /// Expiry month in `MM` form (e.g. `09`).
    #[serde(rename = "expiryMonth")]
    pub expiry_month: String,

    /// Expiry year in `YYYY` form.
    #[serde(rename = "expiryYear")]
    pub expiry_year: String,

    /// Cardholder name as printed on the card, at most 30 characters.
    #[serde(rename = "cardHolderName")]
    pub card_holder_name: String,
}

impl CardData {
    /// Returns the last four digits of the card number for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use worldpay_cse::CardData;
    ///
    /// let card = CardData {
    ///     card_number: "4444333322221111".to_owned(),
    ///     cvc: String::new(),
    ///     expiry_month: "12".to_owned(),
    ///     expiry_year: "2030".to_owned(),
    ///     card_holder_name: "John Smith".to_owned(),
    /// };
    ///
    /// assert_eq!(card.last_four(), "1111");
    /// ```
    #[must_use]
    #[allow(clippy::string_slice, reason = "index comes from char_indices")]
    pub fn last_four(&self) -> &str {
        match self.card_number.char_indices().rev().nth(3) {
            Some((idx, _)) => &self.card_number[idx..],
            None => &self.card_number,
        }
    }

    /// Serializes the card data to its JSON payload form.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::EncryptionFailure`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CseError::EncryptionFailure(format!("card data serialization failed: {e}")))
    }

    /// Parses card data from its JSON payload form.
    ///
    /// Used by callers that verify a decrypted payload against the original
    /// input.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::EncryptionFailure`] if the JSON does not match the
    /// payload schema.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CseError::EncryptionFailure(format!("card data parsing failed: {e}")))
    }
}

/// Masks the PAN and omits the CVC so card data can never leak through logs.
impl fmt::Debug for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardData")
            .field("card_number", &format_args!("****{}", self.last_four()))
            .field("cvc", &"***")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("card_holder_name", &self.card_holder_name)
            .finish()
    }
}

impl Drop for CardData {
    fn drop(&mut self) {
        // Zeroize sensitive fields on drop (PCI-DSS requirement)
        self.card_number.zeroize();
        self.cvc.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_card() -> CardData {
        CardData {
            card_number: "4444333322221111".to_owned(),
            cvc: "123".to_owned(),
            expiry_month: "12".to_owned(),
            expiry_year: "2030".to_owned(),
            card_holder_name: "John Smith".to_owned(),
        }
    }

    #[test]
    fn test_serialization_uses_wire_field_names() {
        let json = test_card().to_json().unwrap();

        assert!(json.contains("\"cardNumber\":\"4444333322221111\""));
        assert!(json.contains("\"cvc\":\"123\""));
        assert!(json.contains("\"expiryMonth\":\"12\""));
        assert!(json.contains("\"expiryYear\":\"2030\""));
        assert!(json.contains("\"cardHolderName\":\"John Smith\""));
    }

    #[test]
    fn test_empty_cvc_omitted_from_payload() {
        let mut card = test_card();
        card.cvc = String::new();

        let json = card.to_json().unwrap();
        assert!(!json.contains("cvc"), "empty cvc must be omitted: {json}");
    }

    #[test]
    fn test_json_roundtrip() {
        let card = test_card();
        let json = card.to_json().unwrap();
        let parsed = CardData::from_json(&json).unwrap();

        assert_eq!(parsed, card);
    }

    #[test]
    fn test_from_json_missing_cvc_defaults_to_empty() {
        let json = r#"{
            "cardNumber": "4444333322221111",
            "expiryMonth": "12",
            "expiryYear": "2030",
            "cardHolderName": "John Smith"
        }"#;

        let card = CardData::from_json(json).unwrap();
        assert!(card.cvc.is_empty());
    }

    #[test]
    fn test_last_four() {
        assert_eq!(test_card().last_four(), "1111");

        let mut short = test_card();
        short.card_number = "123".to_owned();
        assert_eq!(short.last_four(), "123");
    }

    #[test]
    fn test_debug_masks_sensitive_fields() {
        let debug = format!("{:?}", test_card());

        assert!(!debug.contains("4444333322221111"), "PAN must be masked: {debug}");
        assert!(!debug.contains("123"), "CVC must be masked: {debug}");
        assert!(debug.contains("****1111"));
    }
}
