use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::missing_letter::missing_letter;
use crate::domain::types::{ClientId, date_only};

/// Client record as held by the application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    /// `None` when the backend sent no readable birth date.
    #[serde(default, with = "date_only::option")]
    pub birth_date: Option<NaiveDate>,
    /// Creation date reported by the backend, if it sent one.
    #[serde(default, with = "date_only::option")]
    pub created_at: Option<NaiveDate>,
}

impl Client {
    /// First letter of the alphabet absent from the client's name.
    pub fn missing_letter(&self) -> char {
        missing_letter(&self.name)
    }
}

/// Body sent to the backend when creating or updating a client.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    pub name: String,
    pub email: String,
    #[serde(with = "date_only")]
    pub birth_date: NaiveDate,
}

impl ClientPayload {
    #[must_use]
    pub fn new(name: &str, email: &str, birth_date: NaiveDate) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            birth_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn client_deserializes_datetime_birth_date_and_missing_created_at() {
        let client: Client = serde_json::from_value(json!({
            "id": 7,
            "name": "Ana",
            "email": "ana@example.com",
            "birthDate": "1992-03-04T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(client.id.as_str(), "7");
        assert_eq!(client.birth_date, NaiveDate::from_ymd_opt(1992, 3, 4));
        assert_eq!(client.created_at, None);
        assert_eq!(client.missing_letter(), 'b');
    }

    #[test]
    fn unreadable_birth_date_keeps_the_record() {
        let client: Client = serde_json::from_value(json!({
            "id": "8",
            "name": "Bia",
            "email": "bia@example.com",
            "birthDate": "sometime"
        }))
        .unwrap();

        assert_eq!(client.name, "Bia");
        assert_eq!(client.birth_date, None);
    }

    #[test]
    fn payload_serializes_camel_case_date_only() {
        let payload = ClientPayload::new(
            "  Ana Souza ",
            " Ana@Example.com ",
            NaiveDate::from_ymd_opt(1992, 3, 4).unwrap(),
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Ana Souza",
                "email": "Ana@Example.com",
                "birthDate": "1992-03-04"
            })
        );
    }
}
