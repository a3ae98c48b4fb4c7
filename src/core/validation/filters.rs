//! Keystroke filters
//!
//! These filters turn raw input into the representation stored in the form.
//! `None` means the keystroke is rejected and the stored value stays as it was.

use crate::core::field::PaymentField;

/// Longest formatted card number: four groups of four plus separators
pub const MAX_CARD_NUMBER_LEN: usize = 19;

/// `MM/YY`
pub const MAX_EXPIRY_LEN: usize = 5;

pub const MAX_CVV_LEN: usize = 4;

/// Apply the input rule of `field` to `raw`
pub fn reformat(field: PaymentField, raw: &str) -> Option<String> {
    match field {
        PaymentField::CardNumber => format_card_number(raw),
        PaymentField::ExpiryDate => format_expiry_date(raw),
        PaymentField::Cvv => format_cvv(raw),
        _ => Some(raw.to_string()),
    }
}

/// Filter: group card number characters in blocks of four
pub fn format_card_number(raw: &str) -> Option<String> {
    let compact: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let formatted = compact
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");

    if formatted.chars().count() > MAX_CARD_NUMBER_LEN {
        None
    } else {
        Some(formatted)
    }
}

/// Filter: keep digits and insert `/` after the month
pub fn format_expiry_date(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    let formatted = if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    };

    if formatted.len() > MAX_EXPIRY_LEN {
        None
    } else {
        Some(formatted)
    }
}

/// Filter: keep digits only
pub fn format_cvv(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    if digits.len() > MAX_CVV_LEN {
        None
    } else {
        Some(digits)
    }
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // === format_card_number() ===

    #[test]
    fn test_card_number_grouped_by_four() {
        assert_eq!(
            format_card_number("4242424242424242").as_deref(),
            Some("4242 4242 4242 4242")
        );
    }

    #[test]
    fn test_card_number_partial_group_has_no_trailing_space() {
        assert_eq!(format_card_number("12345").as_deref(), Some("1234 5"));
        assert_eq!(format_card_number("1234").as_deref(), Some("1234"));
    }

    #[test]
    fn test_card_number_regroups_existing_spaces() {
        assert_eq!(format_card_number("12 3456 78").as_deref(), Some("1234 5678"));
    }

    #[test]
    fn test_card_number_idempotent() {
        for raw in ["4242424242424242", "1234 5", "4111 1111 1111 1", ""] {
            let once = format_card_number(raw).unwrap();
            assert_eq!(format_card_number(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn test_card_number_rejects_seventeenth_digit() {
        assert!(format_card_number("42424242424242421").is_none());
        assert!(format_card_number("4242 4242 4242 4242 1").is_none());
    }

    #[test]
    fn test_card_number_keeps_non_digits_for_validator() {
        assert_eq!(format_card_number("4242abcd").as_deref(), Some("4242 abcd"));
    }

    #[test]
    fn test_card_number_empty() {
        assert_eq!(format_card_number("").as_deref(), Some(""));
    }

    // === format_expiry_date() ===

    #[test]
    fn test_expiry_inserts_slash_after_month() {
        assert_eq!(format_expiry_date("1227").as_deref(), Some("12/27"));
        assert_eq!(format_expiry_date("122").as_deref(), Some("12/2"));
    }

    #[test]
    fn test_expiry_no_slash_until_third_digit() {
        assert_eq!(format_expiry_date("1").as_deref(), Some("1"));
        assert_eq!(format_expiry_date("12").as_deref(), Some("12"));
    }

    #[test]
    fn test_expiry_strips_non_digits() {
        assert_eq!(format_expiry_date("12/27").as_deref(), Some("12/27"));
        assert_eq!(format_expiry_date("1a2-2 7").as_deref(), Some("12/27"));
    }

    #[test]
    fn test_expiry_idempotent() {
        for raw in ["1227", "12/2", "1", ""] {
            let once = format_expiry_date(raw).unwrap();
            assert_eq!(format_expiry_date(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn test_expiry_rejects_fifth_digit() {
        assert!(format_expiry_date("12/271").is_none());
    }

    // === format_cvv() ===

    #[test]
    fn test_cvv_strips_non_digits() {
        assert_eq!(format_cvv("1a2b3").as_deref(), Some("123"));
    }

    #[test]
    fn test_cvv_rejects_fifth_digit() {
        assert_eq!(format_cvv("1234").as_deref(), Some("1234"));
        assert!(format_cvv("12345").is_none());
    }

    // === reformat() ===

    #[test]
    fn test_other_fields_pass_through() {
        assert_eq!(
            reformat(PaymentField::CardholderName, "  Ada Lovelace ").as_deref(),
            Some("  Ada Lovelace ")
        );
        assert_eq!(reformat(PaymentField::Amount, "12abc").as_deref(), Some("12abc"));
        assert_eq!(reformat(PaymentField::Email, "x@y").as_deref(), Some("x@y"));
    }

    #[test]
    fn test_reformat_dispatches_per_field() {
        assert_eq!(
            reformat(PaymentField::CardNumber, "12345678").as_deref(),
            Some("1234 5678")
        );
        assert_eq!(reformat(PaymentField::ExpiryDate, "0130").as_deref(), Some("01/30"));
        assert_eq!(reformat(PaymentField::Cvv, "12x").as_deref(), Some("12"));
    }
}
