use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to the operator on login.
///
/// The authentication endpoint only returns a token, so the display identity
/// is fixed.
pub const OPERATOR_ID: i32 = 1;

/// Display name assigned to the operator on login.
pub const OPERATOR_NAME: &str = "Administrator";

/// Locally persisted proof of authentication.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub token: String,
}

impl Session {
    /// Builds the operator session for a freshly issued token.
    #[must_use]
    pub fn for_operator(email: &str, token: String) -> Self {
        Self {
            id: OPERATOR_ID,
            email: email.trim().to_string(),
            name: OPERATOR_NAME.to_string(),
            token,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let session = Session::for_operator("op@example.com", "secret-token".to_string());

        let printed = format!("{session:?}");

        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("op@example.com"));
    }
}
