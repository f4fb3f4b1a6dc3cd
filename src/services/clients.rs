use crate::domain::client::Client;
use crate::domain::missing_letter::PANGRAM_SENTINEL;
use crate::domain::types::ClientId;
use crate::forms::client::ClientForm;
use crate::gateway::errors::GatewayError;
use crate::gateway::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult, require_session};
use crate::session::SessionHandle;

pub const LOAD_CLIENTS_FAILED: &str = "Failed to load clients";
pub const ADD_CLIENT_FAILED: &str = "Failed to add client";
pub const UPDATE_CLIENT_FAILED: &str = "Failed to update client";
pub const DELETE_CLIENT_FAILED: &str = "Failed to delete client";

/// Client paired with its missing-letter fingerprint.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientCard {
    pub client: Client,
    pub missing_letter: char,
}

impl ClientCard {
    pub fn new(client: Client) -> Self {
        let missing_letter = client.missing_letter();
        Self {
            client,
            missing_letter,
        }
    }

    /// Whether the client's name uses every letter of the alphabet.
    pub fn has_every_letter(&self) -> bool {
        self.missing_letter == PANGRAM_SENTINEL
    }
}

/// Data required to render the client roster.
#[derive(Debug, Default)]
pub struct ClientListPage {
    pub cards: Vec<ClientCard>,
}

impl ClientListPage {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn find(&self, client_id: &ClientId) -> Option<&ClientCard> {
        self.cards.iter().find(|card| &card.client.id == client_id)
    }
}

/// Loads the client roster with fingerprints.
pub async fn load_clients<R>(repo: &R, session: &SessionHandle) -> ServiceResult<ClientListPage>
where
    R: ClientReader + ?Sized,
{
    require_session(session)?;

    let clients = repo.list_clients().await.map_err(|err| {
        log::error!("Failed to load clients: {err}");
        ServiceError::backend(LOAD_CLIENTS_FAILED, err)
    })?;

    Ok(ClientListPage {
        cards: clients.into_iter().map(ClientCard::new).collect(),
    })
}

/// Validates the form and creates a new client.
pub async fn add_client<W>(
    repo: &W,
    session: &SessionHandle,
    form: &ClientForm,
) -> ServiceResult<Client>
where
    W: ClientWriter + ?Sized,
{
    require_session(session)?;

    let payload = form.to_payload().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form(err)
    })?;

    let client = repo.create_client(&payload).await.map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::backend(ADD_CLIENT_FAILED, err)
    })?;

    log::info!("Created client {}", client.id);
    Ok(client)
}

/// Validates the form and applies it to an existing client.
pub async fn edit_client<W>(
    repo: &W,
    session: &SessionHandle,
    client_id: &ClientId,
    form: &ClientForm,
) -> ServiceResult<()>
where
    W: ClientWriter + ?Sized,
{
    require_session(session)?;

    let payload = form.to_payload().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form(err)
    })?;

    repo.update_client(client_id, &payload)
        .await
        .map_err(|err| match err {
            GatewayError::NotFound => ServiceError::NotFound(client_id.clone()),
            err => {
                log::error!("Failed to update client {client_id}: {err}");
                ServiceError::backend(UPDATE_CLIENT_FAILED, err)
            }
        })
}

/// Deletion awaiting explicit confirmation. Dropping it cancels the request.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending deletion does nothing until confirmed"]
pub struct PendingDeletion {
    client_id: ClientId,
}

impl PendingDeletion {
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }
}

/// First phase of a deletion: records the intent without touching the backend.
pub fn request_delete(
    session: &SessionHandle,
    client_id: ClientId,
) -> ServiceResult<PendingDeletion> {
    require_session(session)?;
    Ok(PendingDeletion { client_id })
}

/// Second phase of a deletion: executes a confirmed request.
pub async fn confirm_delete<W>(
    repo: &W,
    session: &SessionHandle,
    pending: PendingDeletion,
) -> ServiceResult<()>
where
    W: ClientWriter + ?Sized,
{
    require_session(session)?;

    let PendingDeletion { client_id } = pending;
    match repo.delete_client(&client_id).await {
        Ok(()) => {
            log::info!("Deleted client {client_id}");
            Ok(())
        }
        Err(GatewayError::NotFound) => {
            log::warn!("Client {client_id} was already gone");
            Err(ServiceError::NotFound(client_id))
        }
        Err(err) => {
            log::error!("Failed to delete client {client_id}: {err}");
            Err(ServiceError::backend(DELETE_CLIENT_FAILED, err))
        }
    }
}
