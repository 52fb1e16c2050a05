//! Login state held in the credential store.

use crate::api::auth::{AuthApi, LoginRequest, LoginResponse};
use crate::api::User;
use crate::client::{ClientError, ClientRegistry, ClientResult};

/// Writes and clears the token every client instance reads.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    registry: &'a ClientRegistry,
}

impl<'a> Session<'a> {
    pub fn new(registry: &'a ClientRegistry) -> Self {
        Self { registry }
    }

    /// Log in and store the returned token under the registry's storage key.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = AuthApi::new(self.registry.auth()?).login(&request).await?;

        self.registry
            .store()
            .set(self.registry.storage_key(), &response.access_token)
            .map_err(ClientError::StorageWrite)?;

        tracing::info!(user_id = response.user.id, role = %response.user.role, "Logged in");
        Ok(response)
    }

    /// Notify the server and drop the local token.
    ///
    /// The token is removed even when the server call fails; the server
    /// error is still returned.
    pub async fn logout(&self) -> ClientResult<()> {
        let server = AuthApi::new(self.registry.auth()?).logout().await;

        self.registry
            .store()
            .remove(self.registry.storage_key())
            .map_err(ClientError::StorageWrite)?;

        if let Err(e) = &server {
            tracing::warn!(error = %e, "Server logout failed; local token cleared");
        }
        server.map(|_| ())
    }

    /// Whether a non-empty token is currently stored.
    pub fn is_authenticated(&self) -> ClientResult<bool> {
        let token = self.registry.store().get(self.registry.storage_key())?;
        Ok(token.is_some_and(|t| !t.is_empty()))
    }

    pub async fn whoami(&self) -> ClientResult<User> {
        AuthApi::new(self.registry.auth()?).me().await
    }
}
