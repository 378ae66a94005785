//! Contact form validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const MIN_NAME_LEN: usize = 2;
const MIN_MESSAGE_LEN: usize = 10;

/// Submitted contact form fields, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A single field rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Validate every field, collecting all failures in field order.
pub fn validate_contact_form(form: &ContactForm) -> Vec<FormError> {
    let mut errors = Vec::new();
    if form.name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FormError::NameTooShort);
    }
    if !is_valid_email(form.email.trim()) {
        errors.push(FormError::InvalidEmail);
    }
    if form.message.trim().chars().count() < MIN_MESSAGE_LEN {
        errors.push(FormError::MessageTooShort);
    }
    errors
}
