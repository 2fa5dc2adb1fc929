//! Worldpay Client Side Encryption (CSE) SDK
//!
//! Encrypts a payment card's sensitive fields under a merchant-supplied RSA
//! public key before transmission, so plaintext card data never reaches the
//! application's own network layer.
//!
//! # Overview
//!
//! The pipeline has three stages:
//!
//! 1. **Validation** — the five card fields are checked against format and
//!    semantic rules, producing a set of stable numeric error codes
//!    ([`validation`]).
//! 2. **Key parsing** — the merchant key arrives in the Worldpay plain text
//!    format `sequence#exponent#modulus` ([`WpPublicKey`]).
//! 3. **Envelope encryption** — the JSON card payload is sealed into a
//!    five-part compact JWE-style envelope using RSA1_5 key wrap and
//!    AES-256-GCM content encryption ([`jwe`]).
//!
//! Only encryption is implemented; the matching private key and decryptor
//! live on the Worldpay side.
//!
//! # Examples
//!
//! ```no_run
//! use worldpay_cse::{CardData, WorldpayCse};
//!
//! # fn example() -> worldpay_cse::Result<()> {
//! let card = CardData {
//!     card_number: "4444333322221111".to_owned(),
//!     cvc: "123".to_owned(),
//!     expiry_month: "11".to_owned(),
//!     expiry_year: "2030".to_owned(),
//!     card_holder_name: "John Smith".to_owned(),
//! };
//!
//! let mut cse = WorldpayCse::new();
//! cse.set_public_key("1#10001#121ad121...")?;
//! let encrypted = cse.encrypt(&card)?;
//! # Ok(())
//! # }
//! ```
//!
//! Validation errors carry every failing field's code so a UI can highlight
//! all of them at once:
//!
//! ```
//! use worldpay_cse::{validation, CardData, WorldpayCse};
//!
//! let card = CardData {
//!     card_number: String::new(),
//!     cvc: String::new(),
//!     expiry_month: "11".to_owned(),
//!     expiry_year: "2030".to_owned(),
//!     card_holder_name: "John Smith".to_owned(),
//! };
//!
//! let errors = WorldpayCse::validate(&card);
//! assert!(errors.contains(&validation::EMPTY_CARD_NUMBER));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod card;
pub mod cse;
pub mod error;
pub mod jwe;
pub mod key;
pub mod validation;

pub use card::CardData;
pub use cse::WorldpayCse;
pub use error::{CseError, Result};
pub use key::{is_valid_public_key, WpPublicKey};
