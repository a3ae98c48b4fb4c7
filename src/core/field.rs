//! Form field identifiers, payment methods and the editable form record

use crate::core::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount shown in a freshly created form
pub const DEFAULT_AMOUNT: &str = "99.99";

/// Identifier of a single payment form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    CardNumber,
    ExpiryDate,
    Cvv,
    CardholderName,
    Email,
    Amount,
    PaymentMethod,
}

impl PaymentField {
    /// Fields checked on submit, in display order
    ///
    /// The payment method is chosen from a fixed list and is never validated.
    pub const VALIDATED: [PaymentField; 6] = [
        PaymentField::CardNumber,
        PaymentField::ExpiryDate,
        PaymentField::Cvv,
        PaymentField::CardholderName,
        PaymentField::Email,
        PaymentField::Amount,
    ];

    /// The user-facing field name (`cardNumber`, `expiryDate`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentField::CardNumber => "cardNumber",
            PaymentField::ExpiryDate => "expiryDate",
            PaymentField::Cvv => "cvv",
            PaymentField::CardholderName => "cardholderName",
            PaymentField::Email => "email",
            PaymentField::Amount => "amount",
            PaymentField::PaymentMethod => "paymentMethod",
        }
    }

    /// Whether the field goes through the validator
    pub fn is_validated(&self) -> bool {
        !matches!(self, PaymentField::PaymentMethod)
    }
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardNumber" => Ok(PaymentField::CardNumber),
            "expiryDate" => Ok(PaymentField::ExpiryDate),
            "cvv" => Ok(PaymentField::Cvv),
            "cardholderName" => Ok(PaymentField::CardholderName),
            "email" => Ok(PaymentField::Email),
            "amount" => Ok(PaymentField::Amount),
            "paymentMethod" => Ok(PaymentField::PaymentMethod),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// How the customer pays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Credit,
    Debit,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Paypal => "paypal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(PaymentMethod::Credit),
            "debit" => Ok(PaymentMethod::Debit),
            "paypal" => Ok(PaymentMethod::Paypal),
            other => Err(FormError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// The record the user edits
///
/// Card number, expiry date and CVV are stored in their formatted
/// representation (`4242 4242 4242 4242`, `12/27`, `123`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFormData {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
    pub email: String,
    pub amount: String,
    pub payment_method: PaymentMethod,
}

impl PaymentFormData {
    /// Empty form with the given amount prefilled
    pub fn with_default_amount(amount: impl Into<String>) -> Self {
        Self {
            card_number: String::new(),
            expiry_date: String::new(),
            cvv: String::new(),
            cardholder_name: String::new(),
            email: String::new(),
            amount: amount.into(),
            payment_method: PaymentMethod::default(),
        }
    }

    /// Get the current value of a field
    ///
    /// The payment method is returned as its lowercase name.
    pub fn get(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::CardNumber => &self.card_number,
            PaymentField::ExpiryDate => &self.expiry_date,
            PaymentField::Cvv => &self.cvv,
            PaymentField::CardholderName => &self.cardholder_name,
            PaymentField::Email => &self.email,
            PaymentField::Amount => &self.amount,
            PaymentField::PaymentMethod => self.payment_method.as_str(),
        }
    }

    /// Store a value for a field
    pub fn set(&mut self, field: PaymentField, value: String) -> Result<(), FormError> {
        match field {
            PaymentField::CardNumber => self.card_number = value,
            PaymentField::ExpiryDate => self.expiry_date = value,
            PaymentField::Cvv => self.cvv = value,
            PaymentField::CardholderName => self.cardholder_name = value,
            PaymentField::Email => self.email = value,
            PaymentField::Amount => self.amount = value,
            PaymentField::PaymentMethod => self.payment_method = value.parse()?,
        }
        Ok(())
    }
}

impl Default for PaymentFormData {
    fn default() -> Self {
        Self::with_default_amount(DEFAULT_AMOUNT)
    }
}
