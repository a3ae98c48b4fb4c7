//! Field validators
//!
//! Each validator receives the already formatted value of one field and
//! returns the user-facing message of the first rule it breaks. The messages
//! are part of the form's contract and must not change.

use crate::core::field::PaymentField;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Largest amount accepted in one payment
pub const MAX_AMOUNT: f64 = 10_000.0;

pub const MIN_CARD_DIGITS: usize = 13;
pub const MAX_CARD_DIGITS: usize = 19;

/// Validate one field against its rules
///
/// `today` is only read for the expiry date. The payment method never
/// produces an error.
pub fn validate_field(field: PaymentField, value: &str, today: NaiveDate) -> Option<String> {
    let result = match field {
        PaymentField::CardNumber => card_number(value),
        PaymentField::ExpiryDate => expiry_date(value, today),
        PaymentField::Cvv => cvv(value),
        PaymentField::CardholderName => cardholder_name(value),
        PaymentField::Email => email(value),
        PaymentField::Amount => amount(value),
        PaymentField::PaymentMethod => Ok(()),
    };
    result.err()
}

/// Validator: 13 to 19 digits, spaces ignored
pub fn card_number(value: &str) -> Result<(), String> {
    let clean: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let len = clean.chars().count();

    if clean.is_empty() {
        return Err("Card number is required".to_string());
    }
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&len) {
        return Err("Invalid card number length".to_string());
    }
    if !clean.chars().all(|c| c.is_ascii_digit()) {
        return Err("Card number must contain only digits".to_string());
    }
    Ok(())
}

/// Validator: `MM/YY`, not before the current month
pub fn expiry_date(value: &str, today: NaiveDate) -> Result<(), String> {
    static EXPIRY_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EXPIRY_REGEX.get_or_init(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").unwrap());

    if value.is_empty() {
        return Err("Expiry date is required".to_string());
    }
    if !regex.is_match(value) {
        return Err("Format: MM/YY".to_string());
    }

    // The shape check guarantees two ASCII digits on each side
    let month: u32 = value[..2].parse().unwrap_or(0);
    let year: i32 = value[3..].parse().unwrap_or(0);

    if !(1..=12).contains(&month) {
        return Err("Invalid month".to_string());
    }

    let current_year = today.year() % 100;
    let current_month = today.month();
    if year < current_year || (year == current_year && month < current_month) {
        return Err("Card has expired".to_string());
    }
    Ok(())
}

/// Validator: three or four digits
pub fn cvv(value: &str) -> Result<(), String> {
    static CVV_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CVV_REGEX.get_or_init(|| Regex::new(r"^[0-9]{3,4}$").unwrap());

    if value.is_empty() {
        return Err("CVV is required".to_string());
    }
    if !regex.is_match(value) {
        return Err("CVV must be 3-4 digits".to_string());
    }
    Ok(())
}

/// Validator: at least two characters, letters and whitespace only
pub fn cardholder_name(value: &str) -> Result<(), String> {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Cardholder name is required".to_string());
    }
    if trimmed.chars().count() < 2 {
        return Err("Name too short".to_string());
    }
    if !regex.is_match(value) {
        return Err("Name contains invalid characters".to_string());
    }
    Ok(())
}

/// Validator: `local@domain.tld` without whitespace
pub fn email(value: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

    if value.is_empty() {
        return Err("Email is required".to_string());
    }
    if !regex.is_match(value) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validator: positive number not above [`MAX_AMOUNT`]
pub fn amount(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Amount is required".to_string());
    }
    match parse_amount(value) {
        Some(amount) if amount > 0.0 => {
            if amount > MAX_AMOUNT {
                Err("Amount too large".to_string())
            } else {
                Ok(())
            }
        }
        _ => Err("Amount must be greater than 0".to_string()),
    }
}

/// Parse the leading decimal number of an amount string
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12abc"`
/// reads as 12. `"Infinity"` is accepted and later rejected as too large.
pub fn parse_amount(value: &str) -> Option<f64> {
    static NUMBER_PREFIX: OnceLock<Regex> = OnceLock::new();
    let regex = NUMBER_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(Infinity|[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?)")
            .unwrap()
    });

    let candidate = regex.find(value.trim_start())?.as_str();
    let parsed = if candidate.ends_with("Infinity") {
        if candidate.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    } else {
        candidate.parse::<f64>().ok()?
    };
    (!parsed.is_nan()).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn october_2026() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    // === card_number() ===

    #[test]
    fn test_card_number_empty_is_required() {
        assert_eq!(card_number("").unwrap_err(), "Card number is required");
        assert_eq!(card_number("   ").unwrap_err(), "Card number is required");
    }

    #[test]
    fn test_card_number_length_bounds() {
        assert_eq!(card_number("4242 4242 424").unwrap_err(), "Invalid card number length");
        assert!(card_number("4242 4242 4242 4").is_ok());
        assert!(card_number("4242424242424242424").is_ok());
        assert_eq!(
            card_number("42424242424242424242").unwrap_err(),
            "Invalid card number length"
        );
    }

    #[test]
    fn test_card_number_length_checked_before_digits() {
        assert_eq!(card_number("abcd").unwrap_err(), "Invalid card number length");
    }

    #[test]
    fn test_card_number_non_digit_in_range() {
        assert_eq!(
            card_number("4242 4242 4242 424x").unwrap_err(),
            "Card number must contain only digits"
        );
    }

    // === expiry_date() ===

    #[test]
    fn test_expiry_required() {
        assert_eq!(expiry_date("", october_2026()).unwrap_err(), "Expiry date is required");
    }

    #[test]
    fn test_expiry_format() {
        assert_eq!(expiry_date("1/27", october_2026()).unwrap_err(), "Format: MM/YY");
        assert_eq!(expiry_date("12/2", october_2026()).unwrap_err(), "Format: MM/YY");
        assert_eq!(expiry_date("1227", october_2026()).unwrap_err(), "Format: MM/YY");
    }

    #[test]
    fn test_expiry_month_range() {
        assert_eq!(expiry_date("00/99", october_2026()).unwrap_err(), "Invalid month");
        assert_eq!(expiry_date("13/30", october_2026()).unwrap_err(), "Invalid month");
    }

    #[test]
    fn test_expiry_previous_month_is_expired() {
        assert_eq!(expiry_date("09/26", october_2026()).unwrap_err(), "Card has expired");
    }

    #[test]
    fn test_expiry_previous_year_is_expired() {
        assert_eq!(expiry_date("12/25", october_2026()).unwrap_err(), "Card has expired");
    }

    #[test]
    fn test_expiry_current_month_is_valid() {
        assert!(expiry_date("10/26", october_2026()).is_ok());
    }

    #[test]
    fn test_expiry_future_is_valid() {
        assert!(expiry_date("01/27", october_2026()).is_ok());
        assert!(expiry_date("11/26", october_2026()).is_ok());
    }

    #[test]
    fn test_expiry_january_compares_against_previous_december() {
        let january = NaiveDate::from_ymd_opt(2027, 1, 5).unwrap();
        assert_eq!(expiry_date("12/26", january).unwrap_err(), "Card has expired");
        assert!(expiry_date("01/27", january).is_ok());
    }

    // === cvv() ===

    #[test]
    fn test_cvv_rules() {
        assert_eq!(cvv("").unwrap_err(), "CVV is required");
        assert_eq!(cvv("12").unwrap_err(), "CVV must be 3-4 digits");
        assert_eq!(cvv("12345").unwrap_err(), "CVV must be 3-4 digits");
        assert!(cvv("123").is_ok());
        assert!(cvv("1234").is_ok());
    }

    // === cardholder_name() ===

    #[test]
    fn test_name_required_after_trim() {
        assert_eq!(cardholder_name("").unwrap_err(), "Cardholder name is required");
        assert_eq!(cardholder_name("   ").unwrap_err(), "Cardholder name is required");
    }

    #[test]
    fn test_name_too_short() {
        assert_eq!(cardholder_name(" A ").unwrap_err(), "Name too short");
    }

    #[test]
    fn test_name_invalid_characters() {
        assert_eq!(
            cardholder_name("Ada L0velace").unwrap_err(),
            "Name contains invalid characters"
        );
        assert_eq!(
            cardholder_name("O'Brien").unwrap_err(),
            "Name contains invalid characters"
        );
    }

    #[test]
    fn test_name_valid() {
        assert!(cardholder_name("Ada Lovelace").is_ok());
        assert!(cardholder_name(" Jo ").is_ok());
    }

    // === email() ===

    #[test]
    fn test_email_rules() {
        assert_eq!(email("").unwrap_err(), "Email is required");
        assert_eq!(email("student").unwrap_err(), "Invalid email format");
        assert_eq!(email("a@b").unwrap_err(), "Invalid email format");
        assert_eq!(email("a@@b.co").unwrap_err(), "Invalid email format");
        assert_eq!(email("a b@c.co").unwrap_err(), "Invalid email format");
        assert!(email("student@school.edu").is_ok());
        assert!(email("first.last@mail.example.org").is_ok());
    }

    // === amount() ===

    #[test]
    fn test_amount_required() {
        assert_eq!(amount("").unwrap_err(), "Amount is required");
    }

    #[test]
    fn test_amount_not_positive() {
        for value in ["0", "-5", "abc", ".", "0.00"] {
            assert_eq!(
                amount(value).unwrap_err(),
                "Amount must be greater than 0",
                "value: {value}"
            );
        }
    }

    #[test]
    fn test_amount_upper_bound() {
        assert!(amount("10000").is_ok());
        assert_eq!(amount("10000.01").unwrap_err(), "Amount too large");
        assert_eq!(amount("Infinity").unwrap_err(), "Amount too large");
    }

    #[test]
    fn test_amount_reads_leading_number() {
        assert!(amount("99.99").is_ok());
        assert!(amount("12abc").is_ok());
        assert!(amount(" 5").is_ok());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("99.99"), Some(99.99));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
        assert_eq!(parse_amount(".5"), Some(0.5));
        assert_eq!(parse_amount("7."), Some(7.0));
        assert_eq!(parse_amount("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    // === validate_field() ===

    #[test]
    fn test_validate_field_dispatch() {
        let today = october_2026();
        assert_eq!(
            validate_field(PaymentField::Cvv, "12", today).as_deref(),
            Some("CVV must be 3-4 digits")
        );
        assert_eq!(validate_field(PaymentField::Cvv, "1234", today), None);
        assert_eq!(validate_field(PaymentField::PaymentMethod, "", today), None);
    }
}
