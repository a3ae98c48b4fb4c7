//! Card brand detection and masked summaries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card network guessed from the leading digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Generic,
}

impl CardBrand {
    /// Detect the brand of a (possibly formatted) card number
    pub fn detect(card_number: &str) -> Self {
        let first = card_number.chars().find(|c| !c.is_whitespace());
        match first {
            Some('4') => CardBrand::Visa,
            Some('5') | Some('2') => CardBrand::Mastercard,
            Some('3') => CardBrand::Amex,
            _ => CardBrand::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Generic => "generic",
        }
    }

    /// Upper-cased name shown on receipts (`VISA`, `AMEX`, ...)
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last four digits of a (possibly formatted) card number
pub fn last_four(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_brands() {
        assert_eq!(CardBrand::detect("4242 4242 4242 4242"), CardBrand::Visa);
        assert_eq!(CardBrand::detect("5555 5555 5555 4444"), CardBrand::Mastercard);
        assert_eq!(CardBrand::detect("2223 0031 2200 3222"), CardBrand::Mastercard);
        assert_eq!(CardBrand::detect("3782 822463 10005"), CardBrand::Amex);
        assert_eq!(CardBrand::detect("6011 1111 1111 1117"), CardBrand::Generic);
        assert_eq!(CardBrand::detect(""), CardBrand::Generic);
    }

    #[test]
    fn test_detect_ignores_leading_whitespace() {
        assert_eq!(CardBrand::detect("  4111"), CardBrand::Visa);
    }

    #[test]
    fn test_label() {
        assert_eq!(CardBrand::Mastercard.label(), "MASTERCARD");
        assert_eq!(CardBrand::Generic.label(), "GENERIC");
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four("4242 4242 4242 1234"), "1234");
        assert_eq!(last_four("4242 4242 4242 4"), "2424");
        assert_eq!(last_four("12"), "12");
        assert_eq!(last_four(""), "");
    }
}
