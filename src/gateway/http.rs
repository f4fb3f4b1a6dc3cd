//! reqwest-backed gateway talking to the dashboard backend.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::domain::client::{Client, ClientPayload};
use crate::domain::sales::{SalesByDay, TopClients};
use crate::domain::types::ClientId;
use crate::dto::api::{ClientListResponse, DailySalesResponse, LoginRequest, LoginResponse};
use crate::dto::clients::normalize_client_list;
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::{AuthGateway, ClientReader, ClientWriter, SalesReader};
use crate::session::SessionHandle;

/// HTTP gateway bound to a fixed backend origin.
///
/// Requests other than [`AuthGateway::authenticate`] carry the session token
/// as a bearer credential whenever one is present. Transport defaults apply:
/// no retries and no timeout override.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
    session: SessionHandle,
}

impl HttpGateway {
    pub fn new(base_url: impl AsRef<str>, session: SessionHandle) -> GatewayResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Self::with_client(client, base_url, session)
    }

    /// Fails when `base_url` is not an absolute `http(s)` style origin.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl AsRef<str>,
        session: SessionHandle,
    ) -> GatewayResult<Self> {
        let raw = base_url.as_ref();
        let base_url =
            Url::parse(raw).map_err(|err| GatewayError::InvalidUrl(format!("{raw}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(raw.to_string()));
        }
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Appends each segment to the base path, percent-encoding it as one segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn client_url(&self, client_id: &ClientId) -> Url {
        self.url(&["clients", client_id.as_str()])
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and maps transport failures and error statuses.
    async fn execute(&self, request: RequestBuilder, context: &str) -> GatewayResult<Response> {
        let response = request.send().await.map_err(|err| {
            let err = GatewayError::from(err);
            log::error!("Failed to {context}: {err}");
            err
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = GatewayError::from_status(status, body);
        log::error!("Failed to {context}: {err}");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> GatewayResult<T> {
        response.json::<T>().await.map_err(|err| {
            let err = GatewayError::Decode(err.to_string());
            log::error!("Failed to {context}: {err}");
            err
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &[&str],
        context: &str,
    ) -> GatewayResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = self.execute(request, context).await?;
        Self::decode(response, context).await
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn authenticate(&self, email: &str, password: &str) -> GatewayResult<LoginResponse> {
        let context = "authenticate";
        let request = self
            .client
            .post(self.url(&["login"]))
            .json(&LoginRequest { email, password });
        let response = self.execute(request, context).await?;
        Self::decode(response, context).await
    }
}

#[async_trait]
impl ClientReader for HttpGateway {
    async fn list_clients(&self) -> GatewayResult<Vec<Client>> {
        let response: ClientListResponse = self.get_json(&["clients"], "list clients").await?;
        Ok(normalize_client_list(response))
    }
}

#[async_trait]
impl ClientWriter for HttpGateway {
    async fn create_client(&self, payload: &ClientPayload) -> GatewayResult<Client> {
        let context = "create client";
        let url = self.url(&["clients", "create"]);
        let request = self.authorize(self.client.post(url).json(payload));
        let response = self.execute(request, context).await?;
        Self::decode(response, context).await
    }

    async fn update_client(
        &self,
        client_id: &ClientId,
        payload: &ClientPayload,
    ) -> GatewayResult<()> {
        let request = self.authorize(self.client.put(self.client_url(client_id)).json(payload));
        self.execute(request, "update client").await?;
        Ok(())
    }

    async fn delete_client(&self, client_id: &ClientId) -> GatewayResult<()> {
        let request = self.authorize(self.client.delete(self.client_url(client_id)));
        self.execute(request, "delete client").await?;
        Ok(())
    }
}

#[async_trait]
impl SalesReader for HttpGateway {
    async fn daily_sales(&self) -> GatewayResult<Vec<SalesByDay>> {
        let response: DailySalesResponse = self
            .get_json(&["sales", "statistics", "daily"], "fetch daily sales")
            .await?;
        Ok(response.sales_by_day)
    }

    async fn top_clients(&self) -> GatewayResult<TopClients> {
        self.get_json(&["sales", "clients", "statistics"], "fetch top clients").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let gateway = HttpGateway::new("http://localhost:3333/", SessionHandle::default()).unwrap();

        assert_eq!(gateway.base_url(), "http://localhost:3333");
        assert_eq!(
            gateway.url(&["clients"]).as_str(),
            "http://localhost:3333/clients"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let gateway =
            HttpGateway::new("http://localhost:3333/api/", SessionHandle::default()).unwrap();

        assert_eq!(
            gateway.url(&["sales", "statistics", "daily"]).as_str(),
            "http://localhost:3333/api/sales/statistics/daily"
        );
    }

    #[test]
    fn client_id_stays_a_single_path_segment() {
        let gateway = HttpGateway::new("http://localhost:3333", SessionHandle::default()).unwrap();
        let client_id = ClientId::new("7/../../login?x=1#y").unwrap();

        assert_eq!(
            gateway.client_url(&client_id).as_str(),
            "http://localhost:3333/clients/7%2F..%2F..%2Flogin%3Fx=1%23y"
        );
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let result = HttpGateway::new("localhost:3333", SessionHandle::default());

        assert!(matches!(result, Err(GatewayError::InvalidUrl(_))));
    }
}
