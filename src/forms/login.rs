use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::forms::required;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Operator credentials entered on the sign-in screen.
pub struct LoginForm {
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    required(email, "Email is required")
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    required(password, "Password is required")
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
