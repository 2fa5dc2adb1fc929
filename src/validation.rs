//! Card data field validation.
//!
//! Validation is a pure function from a [`CardData`] to a set of numeric
//! error codes; an empty set means the input is valid. All applicable codes
//! accumulate into one set so a caller can highlight every invalid field at
//! once, but one field raises at most one code (first matching rule wins).
//!
//! The numeric values are a stable contract with calling UIs, which map them
//! to localized messages:
//!
//! | code | meaning |
//! |------|---------|
//! | 101  | Card number is empty |
//! | 102  | Card number must be 12 to 20 digits |
//! | 103  | Card number fails the Luhn check |
//! | 201  | Security code must be 3 or 4 digits (empty is valid) |
//! | 301  | Expiry month is empty |
//! | 302  | Expiry month must be two digits (e.g. `09`) |
//! | 303  | Expiry month must range from 01 to 12 |
//! | 304  | Expiry year is empty |
//! | 305  | Expiry year must be four digits |
//! | 306  | Expiry date must not be in the past |
//! | 401  | Cardholder name is empty |
//! | 402  | Cardholder name exceeds 30 characters |

use std::collections::BTreeSet;

use chrono::{Datelike, Local};

use crate::card::CardData;

/// Card number is empty. The card number is mandatory.
pub const EMPTY_CARD_NUMBER: u32 = 101;
/// Invalid card number; numbers only, between 12 and 20 digits.
pub const INVALID_CARD_NUMBER: u32 = 102;
/// Invalid card number; input does not verify the Luhn check.
pub const INVALID_CARD_NUMBER_BY_LUHN: u32 = 103;
/// Invalid security code; numbers only, between 3 and 4 digits.
pub const INVALID_CVC: u32 = 201;
/// Expiry month is empty. The expiry month is mandatory.
pub const EMPTY_EXPIRY_MONTH: u32 = 301;
/// Invalid expiry month; only numbers expected, in `MM` form (e.g. `09`).
pub const INVALID_EXPIRY_MONTH: u32 = 302;
/// Invalid expiry month; should range from 01 to 12.
pub const INVALID_EXPIRY_MONTH_OUT_RANGE: u32 = 303;
/// Expiry year is empty. The expiry year is mandatory.
pub const EMPTY_EXPIRY_YEAR: u32 = 304;
/// Invalid expiry year; only numbers expected.
pub const INVALID_EXPIRY_YEAR: u32 = 305;
/// Invalid expiry date; the expiry date should be in the future.
pub const INVALID_EXPIRY_DATE: u32 = 306;
/// Cardholder name is empty. The cardholder name is mandatory.
pub const EMPTY_CARD_HOLDER_NAME: u32 = 401;
/// Invalid cardholder name; must not exceed thirty characters.
pub const INVALID_CARD_HOLDER_NAME: u32 = 402;

/// Outcome of a single field check before mapping to a numeric code.
enum FieldCheck {
    Ok,
    Empty,
    Malformed,
}

/// Validates card data against the current local date.
///
/// # Examples
///
/// ```
/// use worldpay_cse::{validation, CardData};
///
/// let card = CardData {
///     card_number: String::new(),
///     cvc: String::new(),
///     expiry_month: "13".to_owned(),
///     expiry_year: "2030".to_owned(),
///     card_holder_name: "John Smith".to_owned(),
/// };
///
/// let errors = validation::validate(&card);
/// assert!(errors.contains(&validation::EMPTY_CARD_NUMBER));
/// assert!(errors.contains(&validation::INVALID_EXPIRY_MONTH_OUT_RANGE));
/// ```
#[must_use]
pub fn validate(card: &CardData) -> BTreeSet<u32> {
    let now = Local::now();
    validate_at(card, now.year(), now.month())
}

/// Validates card data against an explicit "now" (year and 1-based month).
///
/// The expiry-date rule (code 306) compares whole months: a card expiring
/// this month is still valid. Taking the clock as a parameter keeps the
/// function pure and lets tests pin the date.
#[must_use]
pub fn validate_at(card: &CardData, current_year: i32, current_month: u32) -> BTreeSet<u32> {
    let mut errors = BTreeSet::new();

    let checks = [
        validate_card_number(&card.card_number),
        validate_cvc(&card.cvc),
        validate_month(&card.expiry_month),
        validate_year(&card.expiry_year),
        validate_date(&card.expiry_month, &card.expiry_year, current_year, current_month),
        validate_card_holder_name(&card.card_holder_name),
    ];
    errors.extend(checks.into_iter().flatten());

    errors
}

/// Standard Luhn checksum: double every second digit from the right,
/// subtracting 9 from doubled digits above 9; valid when the sum is a
/// multiple of 10.
#[must_use]
pub fn luhn_check(value: &str) -> bool {
    let mut sum = 0u32;
    let mut alternate = false;

    for c in value.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

/// A field is empty when it is zero-length or consists solely of whitespace.
fn check_field(value: &str, is_well_formed: impl Fn(&str) -> bool) -> FieldCheck {
    if value.trim().is_empty() {
        FieldCheck::Empty
    } else if !is_well_formed(value) {
        FieldCheck::Malformed
    } else {
        FieldCheck::Ok
    }
}

fn is_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

fn validate_card_number(card_number: &str) -> Option<u32> {
    match check_field(card_number, |v| is_digits(v, 12, 20)) {
        FieldCheck::Empty => Some(EMPTY_CARD_NUMBER),
        FieldCheck::Malformed => Some(INVALID_CARD_NUMBER),
        FieldCheck::Ok if !luhn_check(card_number) => Some(INVALID_CARD_NUMBER_BY_LUHN),
        FieldCheck::Ok => None,
    }
}

fn validate_cvc(cvc: &str) -> Option<u32> {
    // The CVC is optional; only a present, malformed value is an error.
    match check_field(cvc, |v| is_digits(v, 3, 4)) {
        FieldCheck::Malformed => Some(INVALID_CVC),
        _ => None,
    }
}

fn validate_month(expiry_month: &str) -> Option<u32> {
    match check_field(expiry_month, |v| is_digits(v, 2, 2)) {
        FieldCheck::Empty => Some(EMPTY_EXPIRY_MONTH),
        FieldCheck::Malformed => Some(INVALID_EXPIRY_MONTH),
        FieldCheck::Ok => match expiry_month.parse::<u32>() {
            Ok(1..=12) => None,
            _ => Some(INVALID_EXPIRY_MONTH_OUT_RANGE),
        },
    }
}

fn validate_year(expiry_year: &str) -> Option<u32> {
    match check_field(expiry_year, |v| is_digits(v, 4, 4)) {
        FieldCheck::Empty => Some(EMPTY_EXPIRY_YEAR),
        FieldCheck::Malformed => Some(INVALID_EXPIRY_YEAR),
        FieldCheck::Ok => None,
    }
}

/// Only evaluated when month and year each pass their own rules; a field
/// that fails individually never also raises 306.
fn validate_date(
    expiry_month: &str,
    expiry_year: &str,
    current_year: i32,
    current_month: u32,
) -> Option<u32> {
    if validate_month(expiry_month).is_some() || validate_year(expiry_year).is_some() {
        return None;
    }

    // Both fields validated as numeric above.
    let month: i32 = expiry_month.parse().ok()?;
    let year: i32 = expiry_year.parse().ok()?;

    // Compare 0-based month ordinals; expiring this month is still valid.
    let expiry_ordinal = year * 12 + (month - 1);
    let current_ordinal = current_year * 12 + (current_month as i32 - 1);
    if expiry_ordinal < current_ordinal {
        return Some(INVALID_EXPIRY_DATE);
    }

    None
}

fn validate_card_holder_name(card_holder_name: &str) -> Option<u32> {
    match check_field(card_holder_name, |v| v.chars().count() <= 30) {
        FieldCheck::Empty => Some(EMPTY_CARD_HOLDER_NAME),
        FieldCheck::Malformed => Some(INVALID_CARD_HOLDER_NAME),
        FieldCheck::Ok => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str, cvc: &str, month: &str, year: &str, name: &str) -> CardData {
        CardData {
            card_number: number.to_owned(),
            cvc: cvc.to_owned(),
            expiry_month: month.to_owned(),
            expiry_year: year.to_owned(),
            card_holder_name: name.to_owned(),
        }
    }

    fn valid_card() -> CardData {
        card("4444333322221111", "123", "12", "2020", "John Smith")
    }

    #[test]
    fn test_valid_card_has_no_errors() {
        // Clock fixed before the card's 12/2020 expiry.
        let errors = validate_at(&valid_card(), 2019, 6);
        assert!(errors.is_empty(), "expected no errors, got {errors:?}");
    }

    #[test]
    fn test_all_fields_empty() {
        let errors = validate_at(&card("", "", "", "", ""), 2019, 6);

        // Empty CVC is not an error.
        assert_eq!(
            errors,
            BTreeSet::from([
                EMPTY_CARD_NUMBER,
                EMPTY_EXPIRY_MONTH,
                EMPTY_EXPIRY_YEAR,
                EMPTY_CARD_HOLDER_NAME
            ])
        );
    }

    #[test]
    fn test_whitespace_only_fields_are_empty() {
        let errors = validate_at(&card("  ", " ", "\t", "  ", "   "), 2019, 6);

        assert_eq!(
            errors,
            BTreeSet::from([
                EMPTY_CARD_NUMBER,
                EMPTY_EXPIRY_MONTH,
                EMPTY_EXPIRY_YEAR,
                EMPTY_CARD_HOLDER_NAME
            ])
        );
    }

    #[test]
    fn test_card_number_wrong_length() {
        let errors = validate_at(&card("12345678901", "123", "12", "2030", "J"), 2019, 6);
        assert!(errors.contains(&INVALID_CARD_NUMBER));
        assert!(!errors.contains(&INVALID_CARD_NUMBER_BY_LUHN));
    }

    #[test]
    fn test_card_number_non_numeric() {
        let errors = validate_at(&card("44443333222x1111", "123", "12", "2030", "J"), 2019, 6);
        assert!(errors.contains(&INVALID_CARD_NUMBER));
    }

    #[test]
    fn test_card_number_fails_luhn() {
        // Well-formed (16 digits) but off-by-one checksum.
        let errors = validate_at(&card("4444333322221112", "123", "12", "2030", "J"), 2019, 6);
        assert!(errors.contains(&INVALID_CARD_NUMBER_BY_LUHN));
        assert!(!errors.contains(&INVALID_CARD_NUMBER));
        assert!(!errors.contains(&EMPTY_CARD_NUMBER));
    }

    #[test]
    fn test_luhn_known_values() {
        assert!(luhn_check("4444333322221111"));
        assert!(luhn_check("4111111111111111"));
        assert!(luhn_check("79927398713"));
        assert!(!luhn_check("4444333322221112"));
        assert!(!luhn_check("79927398710"));
    }

    #[test]
    fn test_cvc_empty_is_valid() {
        let errors = validate_at(&card("4444333322221111", "", "12", "2030", "J"), 2019, 6);
        assert!(!errors.contains(&INVALID_CVC));
    }

    #[test]
    fn test_cvc_wrong_format() {
        for cvc in ["1", "12", "12345", "12a"] {
            let errors = validate_at(&card("4444333322221111", cvc, "12", "2030", "J"), 2019, 6);
            assert!(errors.contains(&INVALID_CVC), "cvc {cvc:?} should raise 201");
        }
    }

    #[test]
    fn test_month_single_digit_is_malformed() {
        let errors = validate_at(&card("4444333322221111", "123", "9", "2030", "J"), 2019, 6);
        assert!(errors.contains(&INVALID_EXPIRY_MONTH));
    }

    #[test]
    fn test_month_out_of_range() {
        for month in ["00", "13", "99"] {
            let errors =
                validate_at(&card("4444333322221111", "123", month, "2030", "J"), 2019, 6);
            assert!(
                errors.contains(&INVALID_EXPIRY_MONTH_OUT_RANGE),
                "month {month:?} should raise 303"
            );
            // An out-of-range month never also raises the date rule.
            assert!(!errors.contains(&INVALID_EXPIRY_DATE));
        }
    }

    #[test]
    fn test_year_wrong_format() {
        for year in ["20", "203", "20301", "20a0"] {
            let errors = validate_at(&card("4444333322221111", "123", "12", year, "J"), 2019, 6);
            assert!(errors.contains(&INVALID_EXPIRY_YEAR), "year {year:?} should raise 305");
            assert!(!errors.contains(&INVALID_EXPIRY_DATE));
        }
    }

    #[test]
    fn test_expiry_in_the_past() {
        let errors = validate_at(&valid_card(), 2021, 1);
        assert_eq!(errors, BTreeSet::from([INVALID_EXPIRY_DATE]));
    }

    #[test]
    fn test_expiry_current_month_is_valid() {
        // 12/2020 viewed from December 2020 is still acceptable.
        let errors = validate_at(&valid_card(), 2020, 12);
        assert!(errors.is_empty(), "expected no errors, got {errors:?}");
    }

    #[test]
    fn test_expiry_next_month_boundary() {
        // 12/2020 viewed from January 2021 is one month too late.
        let errors = validate_at(&valid_card(), 2021, 1);
        assert!(errors.contains(&INVALID_EXPIRY_DATE));
    }

    #[test]
    fn test_holder_name_too_long() {
        let name = "a".repeat(31);
        let errors = validate_at(&card("4444333322221111", "123", "12", "2030", &name), 2019, 6);
        assert_eq!(errors, BTreeSet::from([INVALID_CARD_HOLDER_NAME]));
    }

    #[test]
    fn test_holder_name_thirty_chars_is_valid() {
        let name = "a".repeat(30);
        let errors = validate_at(&card("4444333322221111", "123", "12", "2030", &name), 2019, 6);
        assert!(errors.is_empty(), "expected no errors, got {errors:?}");
    }

    #[test]
    fn test_one_code_per_field() {
        // Every field invalid in a different way still yields one code each.
        let errors = validate_at(&card("12", "1", "13", "20", &"a".repeat(40)), 2019, 6);
        assert_eq!(
            errors,
            BTreeSet::from([
                INVALID_CARD_NUMBER,
                INVALID_CVC,
                INVALID_EXPIRY_MONTH_OUT_RANGE,
                INVALID_EXPIRY_YEAR,
                INVALID_CARD_HOLDER_NAME
            ])
        );
    }
}
