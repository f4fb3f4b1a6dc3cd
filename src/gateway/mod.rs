//! Backend gateway: async traits per concern plus the HTTP implementation.

use async_trait::async_trait;

use crate::domain::client::{Client, ClientPayload};
use crate::domain::sales::{SalesByDay, TopClients};
use crate::domain::types::ClientId;
use crate::dto::api::LoginResponse;
use crate::gateway::errors::GatewayResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpGateway;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token. Never sends a bearer credential.
    async fn authenticate(&self, email: &str, password: &str) -> GatewayResult<LoginResponse>;
}

#[async_trait]
pub trait ClientReader: Send + Sync {
    async fn list_clients(&self) -> GatewayResult<Vec<Client>>;
}

#[async_trait]
pub trait ClientWriter: Send + Sync {
    async fn create_client(&self, payload: &ClientPayload) -> GatewayResult<Client>;
    async fn update_client(&self, client_id: &ClientId, payload: &ClientPayload)
    -> GatewayResult<()>;
    async fn delete_client(&self, client_id: &ClientId) -> GatewayResult<()>;
}

#[async_trait]
pub trait SalesReader: Send + Sync {
    async fn daily_sales(&self) -> GatewayResult<Vec<SalesByDay>>;
    async fn top_clients(&self) -> GatewayResult<TopClients>;
}
