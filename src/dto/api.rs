//! Request and response bodies exchanged with the backend API.

use serde::{Deserialize, Serialize};

use crate::domain::sales::SalesByDay;
use crate::domain::types::ClientId;

/// Body of `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /login`; the token is absent on rejected credentials.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// Returns the token when the backend issued a non-empty one.
    pub fn into_token(self) -> Option<String> {
        self.token.filter(|token| !token.trim().is_empty())
    }
}

/// Response of `GET /clients`.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListResponse {
    #[serde(default)]
    pub data: Option<ClientListData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClientListData {
    #[serde(default)]
    pub clients: Option<Vec<ApiClient>>,
}

/// Flat client record as listed by the backend.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClient {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `GET /sales/statistics/daily`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesResponse {
    #[serde(default)]
    pub sales_by_day: Vec<SalesByDay>,
}
