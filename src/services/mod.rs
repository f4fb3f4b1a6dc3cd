//! Operations consumed by a presentation layer.
//!
//! Every operation requires an active session and reports failures as a
//! [`ServiceError`] whose `Display` is the message shown to the operator.

use thiserror::Error;

use crate::domain::session::Session;
use crate::domain::types::ClientId;
use crate::forms::FormError;
use crate::gateway::errors::GatewayError;
use crate::session::SessionHandle;

pub mod clients;
pub mod dashboard;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Please sign in to continue")]
    Unauthorized,

    #[error("Please correct the highlighted fields")]
    Form(#[from] FormError),

    #[error("Client {0} was not found")]
    NotFound(ClientId),

    #[error("{action}")]
    Backend {
        action: &'static str,
        #[source]
        source: GatewayError,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Wraps a gateway failure under a generic banner; a rejected credential
    /// becomes [`ServiceError::Unauthorized`].
    pub fn backend(action: &'static str, err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized => ServiceError::Unauthorized,
            source => ServiceError::Backend { action, source },
        }
    }
}

/// Returns the active session or [`ServiceError::Unauthorized`].
pub fn require_session(session: &SessionHandle) -> ServiceResult<Session> {
    session.current().ok_or(ServiceError::Unauthorized)
}
