//! The main entry point of the Worldpay CSE SDK.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::card::CardData;
use crate::error::{CseError, Result};
use crate::jwe::{Envelope, JweHeader};
use crate::key::WpPublicKey;
use crate::validation;

/// Key-encryption algorithm identifier carried in the envelope header.
pub const RSA_1_5: &str = "RSA1_5";
/// Content-encryption algorithm identifier carried in the envelope header.
pub const A_256_GCM: &str = "A256GCM";
/// Worldpay API version the payload conforms to.
pub const API_VERSION: &str = "1.0";
/// Version of this library, reported in the envelope header.
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Channel identifier for envelopes produced by this library.
pub const CHANNEL: &str = "rust";

/// Validates and encrypts payment card data under a merchant public key.
///
/// The facade owns the current public key: it starts without one and
/// [`WorldpayCse::set_public_key`] replaces it wholesale. Encryption fails
/// cleanly while no key is set.
///
/// The struct is a plain value with no internal locking. Callers sharing one
/// instance across threads must synchronize externally (e.g. an `RwLock`),
/// or give each thread its own instance; every operation completes in
/// microseconds and performs no I/O.
///
/// # Examples
///
/// ```no_run
/// use worldpay_cse::{CardData, WorldpayCse};
///
/// # fn example() -> worldpay_cse::Result<()> {
/// let card = CardData {
///     card_number: "4444333322221111".to_owned(),
///     cvc: "123".to_owned(),
///     expiry_month: "11".to_owned(),
///     expiry_year: "2030".to_owned(),
///     card_holder_name: "John Smith".to_owned(),
/// };
///
/// let mut cse = WorldpayCse::new();
/// cse.set_public_key("1#10001#121ad121...")?;
/// let encrypted = cse.encrypt(&card)?;
///
/// // Submit `encrypted` for processing in place of the card fields.
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorldpayCse {
    public_key: Option<WpPublicKey>,
}

impl WorldpayCse {
    /// Creates a facade with no public key set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and sets the public key used by future
    /// [`WorldpayCse::encrypt`] calls.
    ///
    /// The key must be in the Worldpay plain text format
    /// `sequence#exponent#modulus` (see [`WpPublicKey::parse`]).
    ///
    /// # Errors
    ///
    /// Returns [`CseError::InvalidPublicKey`] if the text does not adhere to
    /// the format; the previously set key, if any, is left untouched.
    pub fn set_public_key(&mut self, plain_key: &str) -> Result<()> {
        self.public_key = Some(WpPublicKey::parse(plain_key)?);
        Ok(())
    }

    /// Sets an already-parsed public key.
    pub fn set_key(&mut self, key: WpPublicKey) {
        self.public_key = Some(key);
    }

    /// Returns the currently set public key, if any.
    #[must_use]
    pub fn public_key(&self) -> Option<&WpPublicKey> {
        self.public_key.as_ref()
    }

    /// Validates and encrypts the supplied card data.
    ///
    /// Returns the compact envelope string to be submitted for processing.
    ///
    /// # Errors
    ///
    /// - [`CseError::InvalidCardData`] with the full set of validation error
    ///   codes if any field is invalid; encryption is not attempted.
    /// - [`CseError::EncryptionError`] if no public key has been set.
    /// - [`CseError::EncryptionFailure`] if a cipher primitive rejects its
    ///   input (not expected under the fixed algorithm parameters).
    #[instrument(skip_all, fields(kid = tracing::field::Empty))]
    pub fn encrypt(&self, card_data: &CardData) -> Result<String> {
        let errors = validation::validate(card_data);
        if !errors.is_empty() {
            tracing::debug!(codes = ?errors, "card data rejected");
            return Err(CseError::InvalidCardData(errors));
        }

        let Some(public_key) = &self.public_key else {
            return Err(CseError::EncryptionError("Public key not set".into()));
        };
        tracing::Span::current().record("kid", public_key.key_seq_no());

        let header = JweHeader {
            alg: RSA_1_5.to_owned(),
            enc: A_256_GCM.to_owned(),
            kid: public_key.key_seq_no().to_owned(),
            api_version: API_VERSION.to_owned(),
            lib_version: LIB_VERSION.to_owned(),
            channel: CHANNEL.to_owned(),
        };

        let payload = card_data.to_json()?;
        let envelope = Envelope::seal(&header, payload.as_bytes(), public_key)?;
        Ok(envelope.serialize())
    }

    /// Validates the card field values and returns the set of error codes.
    ///
    /// Standalone counterpart of the check performed by
    /// [`WorldpayCse::encrypt`], for callers that want the errors without
    /// attempting encryption. An empty set means the data is valid. See
    /// [`crate::validation`] for the code meanings.
    #[must_use]
    pub fn validate(card_data: &CardData) -> BTreeSet<u32> {
        validation::validate(card_data)
    }
}
