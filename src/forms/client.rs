use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::client::{Client, ClientPayload};
use crate::domain::types::DATE_FORMAT;
use crate::forms::{FormError, invalid, required};

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Form data for adding or editing a client.
pub struct ClientForm {
    /// Full name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Contact email address.
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    /// Birth date as `YYYY-MM-DD`.
    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: String,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    required(name, "Name is required")
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    required(email, "Email is required")?;
    if email.trim().to_string().validate_email() {
        Ok(())
    } else {
        Err(invalid("email", "Invalid email"))
    }
}

fn validate_birth_date(birth_date: &str) -> Result<(), ValidationError> {
    required(birth_date, "Birth date is required")?;
    parse_birth_date(birth_date)
        .map(|_| ())
        .ok_or_else(|| invalid("date", "Invalid birth date"))
}

fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

impl ClientForm {
    /// Pre-fills the form with an existing client's data.
    ///
    /// An unknown birth date leaves the field blank.
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            birth_date: client
                .birth_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Validates the form and converts it into the backend payload.
    pub fn to_payload(&self) -> Result<ClientPayload, FormError> {
        self.validate()?;
        let birth_date = parse_birth_date(&self.birth_date).ok_or(FormError::InvalidBirthDate)?;
        Ok(ClientPayload::new(&self.name, &self.email, birth_date))
    }
}
