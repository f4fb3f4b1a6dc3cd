//! Reshaping of the client list payload into domain [`Client`] records.
//!
//! Listed records are first renested into [`RawClientRecord`], the shape the
//! roster views were written against, and then flattened back. The nested
//! record carries the optional creation date so it survives the round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::types::{ClientId, parse_date_prefix};
use crate::dto::api::{ApiClient, ClientListResponse};

/// Nested client record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawClientRecord {
    pub info: RawClientInfo,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawClientInfo {
    pub id: ClientId,
    pub nome_completo: String,
    pub detalhes: RawClientDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawClientDetails {
    pub email: String,
    /// Birth date without its time component.
    pub nascimento: String,
}

/// Keeps only the date part of an ISO date or date-time string.
fn date_component(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

impl From<ApiClient> for RawClientRecord {
    fn from(client: ApiClient) -> Self {
        let nascimento = client
            .birth_date
            .as_deref()
            .map(|value| date_component(value.trim()).to_string())
            .unwrap_or_default();
        let criado_em = client
            .created_at
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| date_component(value).to_string());

        Self {
            info: RawClientInfo {
                id: client.id,
                nome_completo: client.name,
                detalhes: RawClientDetails {
                    email: client.email,
                    nascimento,
                },
                criado_em,
            },
        }
    }
}

/// Reads a date field of one record; a blank or unreadable value becomes `None`.
fn record_date(client_id: &ClientId, field: &str, value: &str) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    match parse_date_prefix(value) {
        Ok(date) => Some(date),
        Err(err) => {
            log::warn!("Client {client_id} has an unreadable {field}: {err}");
            None
        }
    }
}

impl From<RawClientRecord> for Client {
    fn from(record: RawClientRecord) -> Self {
        let RawClientInfo {
            id,
            nome_completo,
            detalhes,
            criado_em,
        } = record.info;

        let birth_date = record_date(&id, "birth date", &detalhes.nascimento);
        let created_at = criado_em
            .as_deref()
            .and_then(|value| record_date(&id, "creation date", value));

        Client {
            id,
            name: nome_completo,
            email: detalhes.email,
            birth_date,
            created_at,
        }
    }
}

/// Converts a `GET /clients` response into the client roster.
///
/// A missing `data` or `clients` member yields an empty roster. Every listed
/// record yields exactly one client, in order, even when its dates are
/// unreadable.
pub fn normalize_client_list(response: ClientListResponse) -> Vec<Client> {
    response
        .data
        .and_then(|data| data.clients)
        .unwrap_or_default()
        .into_iter()
        .map(RawClientRecord::from)
        .map(Client::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: serde_json::Value) -> ClientListResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalizes_every_record_preserving_fields() {
        let payload = response(json!({
            "data": {
                "clients": [
                    {"id": "1", "name": "Ana Lima", "email": "ana@example.com", "birthDate": "1990-05-01T00:00:00.000Z"},
                    {"id": "2", "name": "Bruno", "email": "bruno@example.com", "birthDate": "1985-12-31"},
                    {"id": 3, "name": "Carla", "email": "carla@example.com", "birthDate": "2000-02-29"}
                ]
            }
        }));

        let clients = normalize_client_list(payload);

        assert_eq!(clients.len(), 3);
        assert_eq!(clients[0].id.as_str(), "1");
        assert_eq!(clients[0].name, "Ana Lima");
        assert_eq!(clients[0].email, "ana@example.com");
        assert_eq!(clients[0].birth_date, NaiveDate::from_ymd_opt(1990, 5, 1));
        assert_eq!(clients[1].name, "Bruno");
        assert_eq!(clients[1].birth_date, NaiveDate::from_ymd_opt(1985, 12, 31));
        assert_eq!(clients[2].id.as_str(), "3");
    }

    #[test]
    fn created_at_survives_when_backend_sends_it() {
        let payload = response(json!({
            "data": {
                "clients": [
                    {"id": "1", "name": "Ana", "email": "a@example.com", "birthDate": "1990-05-01", "createdAt": "2024-02-10T08:00:00Z"},
                    {"id": "2", "name": "Bia", "email": "b@example.com", "birthDate": "1991-06-02"}
                ]
            }
        }));

        let clients = normalize_client_list(payload);

        assert_eq!(
            clients[0].created_at,
            Some(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())
        );
        assert_eq!(clients[1].created_at, None);
    }

    #[test]
    fn renesting_truncates_birth_date() {
        let api_client = ApiClient {
            id: ClientId::new("9").unwrap(),
            name: "Davi".to_string(),
            email: "davi@example.com".to_string(),
            birth_date: Some("1999-09-09T23:59:59Z".to_string()),
            created_at: None,
        };

        let record = RawClientRecord::from(api_client);

        assert_eq!(record.info.nome_completo, "Davi");
        assert_eq!(record.info.detalhes.nascimento, "1999-09-09");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "info": {
                    "id": "9",
                    "nomeCompleto": "Davi",
                    "detalhes": {"email": "davi@example.com", "nascimento": "1999-09-09"}
                }
            })
        );
    }

    #[test]
    fn missing_data_yields_empty_list() {
        assert!(normalize_client_list(response(json!({}))).is_empty());
        assert!(normalize_client_list(response(json!({"data": {"clients": null}}))).is_empty());
    }

    #[test]
    fn unreadable_dates_do_not_drop_records() {
        let payload = response(json!({
            "data": {
                "clients": [
                    {"id": "1", "name": "Ana", "email": "a@example.com", "birthDate": "1990-05-01"},
                    {"id": "2", "name": "Bia", "email": "b@example.com", "birthDate": ""},
                    {"id": "3", "name": "Caio", "email": "c@example.com", "birthDate": "soon", "createdAt": "later"},
                    {"id": "4", "name": "Duda", "email": "d@example.com"}
                ]
            }
        }));

        let clients = normalize_client_list(payload);

        assert_eq!(clients.len(), 4);
        assert_eq!(clients[0].birth_date, NaiveDate::from_ymd_opt(1990, 5, 1));
        assert_eq!(clients[1].name, "Bia");
        assert_eq!(clients[1].birth_date, None);
        assert_eq!(clients[2].birth_date, None);
        assert_eq!(clients[2].created_at, None);
        assert_eq!(clients[3].id.as_str(), "4");
        assert_eq!(clients[3].birth_date, None);
    }
}
