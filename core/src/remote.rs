//! One-round-trip-per-call client for the remote users collection.
//!
//! # Design
//! `RemoteCollection` pairs the sans-IO `UsersClient` with a `Transport`.
//! It never retries and keeps nothing between calls, so two racing mutations
//! on the same id resolve however the remote resolves them; whichever
//! response the caller applies last wins in its snapshot.
//!
//! `list` swallows every failure and returns an empty vector, which keeps a
//! screen renderable but makes an outage look like "no users". Callers that
//! need to tell the two apart use `try_list`.

use tracing::{debug, warn};

use crate::client::UsersClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{User, UserInput};

#[derive(Debug, Clone)]
pub struct RemoteCollection<T = UreqTransport> {
    client: UsersClient,
    transport: T,
}

impl RemoteCollection<UreqTransport> {
    /// Client for `config.base_url` over a fresh `ureq` agent.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(UsersClient::new(&config.base_url), UreqTransport::new())
    }
}

impl<T: Transport> RemoteCollection<T> {
    pub fn new(client: UsersClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &UsersClient {
        &self.client
    }

    /// Fetch every user, degrading to an empty vector on any failure.
    pub fn list(&self) -> Vec<User> {
        match self.try_list() {
            Ok(users) => users,
            Err(error) => {
                warn!(%error, "listing users failed; returning an empty collection");
                Vec::new()
            }
        }
    }

    /// Fetch every user, surfacing failures.
    pub fn try_list(&self) -> Result<Vec<User>, ApiError> {
        let response = self.round_trip(self.client.build_list_users())?;
        self.client.parse_list_users(response)
    }

    /// Create a user; the remote assigns the id.
    pub fn create(&self, name: &str, email: &str) -> Result<User, ApiError> {
        let input = UserInput::new(name, email);
        input.validate()?;
        let response = self.round_trip(self.client.build_create_user(&input)?)?;
        self.client.parse_create_user(response)
    }

    /// Replace `name` and `email` on the user at `id`. Whether `id` exists is
    /// left to the remote to decide.
    pub fn update(&self, id: u64, name: &str, email: &str) -> Result<User, ApiError> {
        let input = UserInput::new(name, email);
        input.validate()?;
        let response = self.round_trip(self.client.build_update_user(id, &input)?)?;
        self.client.parse_update_user(response)
    }

    pub fn delete(&self, id: u64) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_user(id))?;
        self.client.parse_delete_user(response)
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.execute(request).inspect_err(|error| {
            debug!(%method, %path, %error, "request produced no response");
        })?;
        debug!(%method, %path, status = response.status, "round trip complete");
        Ok(response)
    }
}
