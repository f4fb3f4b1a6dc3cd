//! Mock gateway implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::client::{Client, ClientPayload};
use crate::domain::sales::{SalesByDay, TopClients};
use crate::domain::types::ClientId;
use crate::dto::api::LoginResponse;
use crate::gateway::errors::GatewayResult;
use crate::gateway::{AuthGateway, ClientReader, ClientWriter, SalesReader};

mock! {
    pub Gateway {}

    #[async_trait]
    impl AuthGateway for Gateway {
        async fn authenticate(&self, email: &str, password: &str) -> GatewayResult<LoginResponse>;
    }

    #[async_trait]
    impl ClientReader for Gateway {
        async fn list_clients(&self) -> GatewayResult<Vec<Client>>;
    }

    #[async_trait]
    impl ClientWriter for Gateway {
        async fn create_client(&self, payload: &ClientPayload) -> GatewayResult<Client>;
        async fn update_client(
            &self,
            client_id: &ClientId,
            payload: &ClientPayload,
        ) -> GatewayResult<()>;
        async fn delete_client(&self, client_id: &ClientId) -> GatewayResult<()>;
    }

    #[async_trait]
    impl SalesReader for Gateway {
        async fn daily_sales(&self) -> GatewayResult<Vec<SalesByDay>>;
        async fn top_clients(&self) -> GatewayResult<TopClients>;
    }
}
