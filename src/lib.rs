//! Client roster and sales dashboard backed by a remote HTTP API.
//!
//! The `data` feature exposes only the pure layers (`domain`, `dto`,
//! `forms`); the default `client` feature adds the HTTP gateway, the session
//! store and the service layer.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;

#[cfg(feature = "client")]
pub mod gateway;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;

#[cfg(feature = "client")]
use crate::gateway::HttpGateway;
#[cfg(feature = "client")]
use crate::gateway::errors::GatewayResult;
#[cfg(feature = "client")]
use crate::models::config::AppConfig;
#[cfg(feature = "client")]
use crate::session::{FileSessionStorage, SessionStore};

/// Everything a front end needs: the restored session and a gateway bound to it.
#[cfg(feature = "client")]
pub struct App {
    pub sessions: SessionStore<FileSessionStorage>,
    pub gateway: HttpGateway,
}

#[cfg(feature = "client")]
impl App {
    /// Restores the persisted session and wires the gateway to it.
    pub fn start(config: &AppConfig) -> GatewayResult<Self> {
        let sessions = SessionStore::new(FileSessionStorage::new(&config.session_dir));
        sessions.restore();
        let gateway = HttpGateway::new(config.api_base_url.clone(), sessions.handle())?;
        Ok(Self { sessions, gateway })
    }
}
