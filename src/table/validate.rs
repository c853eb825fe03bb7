//! Field validators
//!
//! Contact fields are checked by a `Validator` per field, so adding a new
//! rule does not change the add/edit flow.

use crate::error::{FlatError, Result};

/// Number of digits a phone number must have
pub const PHONE_DIGITS: usize = 11;

/// Only accepted email domain
pub const EMAIL_DOMAIN: &str = "gmail.com";

/// Checks a single field value
pub trait Validator {
    /// Return `FlatError::Validation` if `value` is not acceptable for `field`
    fn validate(&self, field: &'static str, value: &str) -> Result<()>;
}

/// Built-in field rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidator {
    /// Exactly eleven ASCII digits
    ElevenDigits,

    /// `local@gmail.com`, local part drawn from `[A-Za-z0-9._%+-]`
    GmailAddress,
}

impl FieldValidator {
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            FieldValidator::ElevenDigits => {
                value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
            }
            FieldValidator::GmailAddress => {
                let Some(local) = value.strip_suffix(EMAIL_DOMAIN) else {
                    return false;
                };
                let Some(local) = local.strip_suffix('@') else {
                    return false;
                };
                !local.is_empty() && local.chars().all(is_local_part_char)
            }
        }
    }

    fn requirement(&self) -> &'static str {
        match self {
            FieldValidator::ElevenDigits => "must be exactly 11 digits",
            FieldValidator::GmailAddress => "must be a valid Gmail address",
        }
    }
}

impl Validator for FieldValidator {
    fn validate(&self, field: &'static str, value: &str) -> Result<()> {
        if self.is_valid(value) {
            return Ok(());
        }
        Err(FlatError::Validation {
            field,
            value: value.to_string(),
            reason: self.requirement().to_string(),
        })
    }
}

fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

/// Validators applied to contact fields on add and edit
pub struct ContactRules {
    pub phone: Box<dyn Validator>,
    pub email: Box<dyn Validator>,
}

impl ContactRules {
    /// Check phone first, then email
    pub fn check(&self, phone: &str, email: &str) -> Result<()> {
        self.phone.validate("phone", phone)?;
        self.email.validate("email", email)
    }
}

impl Default for ContactRules {
    fn default() -> Self {
        Self {
            phone: Box::new(FieldValidator::ElevenDigits),
            email: Box::new(FieldValidator::GmailAddress),
        }
    }
}
