//! Form definitions backing the dashboard operations.

use std::borrow::Cow;

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

pub mod client;
pub mod login;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid birth date")]
    InvalidBirthDate,
}

impl FormError {
    /// Returns the first message for each invalid field, sorted by field name.
    pub fn field_messages(&self) -> Vec<(String, String)> {
        match self {
            FormError::Validation(errors) => {
                let mut messages: Vec<(String, String)> = errors
                    .field_errors()
                    .into_iter()
                    .filter_map(|(field, errors)| {
                        errors.first().map(|error| {
                            let message = error
                                .message
                                .as_ref()
                                .map(|message| message.to_string())
                                .unwrap_or_else(|| error.code.to_string());
                            (field.to_string(), message)
                        })
                    })
                    .collect();
                messages.sort();
                messages
            }
            FormError::InvalidBirthDate => {
                vec![("birth_date".to_string(), "Invalid birth date".to_string())]
            }
        }
    }
}

/// Builds a validation error carrying a user-facing message.
fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Rejects values that contain only whitespace.
fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("required", message))
    } else {
        Ok(())
    }
}
