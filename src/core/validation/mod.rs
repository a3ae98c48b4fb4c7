//! Field reformatting and validation
//!
//! Input goes through two pure steps: a filter turns the raw keystroke into
//! the stored representation ([`filters::reformat`]) and a validator checks
//! the stored value ([`validators::validate_field`]). Neither touches form
//! state, which lives in [`FormState`](crate::form::FormState).

pub mod filters;
pub mod validators;

pub use filters::reformat;
pub use validators::validate_field;

use crate::core::field::{PaymentField, PaymentFormData};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse map of field errors
///
/// A missing key means the field currently has no error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<PaymentField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or clear the error of one field
    pub fn set(&mut self, field: PaymentField, error: Option<String>) {
        match error {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn get(&self, field: PaymentField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: PaymentField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate over `(field, message)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (PaymentField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Validate every field except the payment method
pub fn validate_form(data: &PaymentFormData, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in PaymentField::VALIDATED {
        errors.set(field, validate_field(field, data.get(field), today));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_form() -> PaymentFormData {
        PaymentFormData {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/28".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..PaymentFormData::default()
        }
    }

    #[test]
    fn test_set_and_clear() {
        let mut errors = ValidationErrors::new();
        errors.set(PaymentField::Cvv, Some("CVV is required".to_string()));
        assert_eq!(errors.get(PaymentField::Cvv), Some("CVV is required"));
        assert_eq!(errors.len(), 1);

        errors.set(PaymentField::Cvv, None);
        assert!(errors.is_empty());
        assert!(!errors.contains(PaymentField::Cvv));
    }

    #[test]
    fn test_empty_form_has_five_errors_with_default_amount() {
        let errors = validate_form(&PaymentFormData::default(), today());
        assert_eq!(errors.len(), 5);
        assert!(!errors.contains(PaymentField::Amount));
    }

    #[test]
    fn test_fully_empty_form_has_six_errors() {
        let data = PaymentFormData::with_default_amount("");
        let errors = validate_form(&data, today());
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get(PaymentField::Amount), Some("Amount is required"));
        assert_eq!(errors.get(PaymentField::Email), Some("Email is required"));
        assert!(!errors.contains(PaymentField::PaymentMethod));
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate_form(&valid_form(), today()).is_empty());
    }

    #[test]
    fn test_iter_follows_display_order() {
        let data = PaymentFormData::with_default_amount("");
        let errors = validate_form(&data, today());
        let fields: Vec<PaymentField> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, PaymentField::VALIDATED.to_vec());
    }

    #[test]
    fn test_serializes_as_object() {
        let mut errors = ValidationErrors::new();
        errors.set(PaymentField::CardNumber, Some("Card number is required".into()));
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"cardNumber": "Card number is required"}));
    }
}
