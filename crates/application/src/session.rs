//! Auth session
//!
//! Holds the administrator bearer credential, keeps it in durable storage,
//! installs it as a transport default header, and reacts to unauthorized
//! responses. The session owns no retry logic: a 401 is terminal for that
//! request and the caller re-issues after re-authentication.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::warn;

use crate::ports::{Clock, HttpTransport, KeyValueStore, Navigator, UnauthorizedHandler};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "admin_token";
/// Storage key of the token expiry timestamp (RFC 3339).
pub const TOKEN_EXPIRES_KEY: &str = "admin_token_expires";

/// Path prefix of the authenticated area.
const ADMIN_AREA: &str = "/admin";
/// Login entry point inside the authenticated area.
const LOGIN_PATH: &str = "/admin/login";

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// The process-wide auth session.
///
/// Created empty at startup; [`AuthSession::restore`] reloads a persisted
/// session, [`AuthSession::set_token`] installs a fresh one after login.
pub struct AuthSession<T, S, N, C> {
    transport: Arc<T>,
    storage: S,
    navigator: N,
    clock: C,
    state: RwLock<SessionState>,
}

impl<T, S, N, C> AuthSession<T, S, N, C>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
    C: Clock,
{
    /// Creates an empty session.
    pub fn new(transport: Arc<T>, storage: S, navigator: N, clock: C) -> Self {
        Self {
            transport,
            storage,
            navigator,
            clock,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Reloads a previously persisted session.
    ///
    /// A stored token that is still valid is installed as the transport's
    /// Authorization header; a stale one is discarded. Storage failures are
    /// logged and treated as "no session".
    pub async fn restore(&self) {
        let token = match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "failed to restore session token");
                return;
            }
        };
        let Some(token) = token else { return };

        let expires_at = match self.storage.get(TOKEN_EXPIRES_KEY).await {
            Ok(raw) => raw.and_then(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|t| t.with_timezone(&Utc))
                    .ok()
            }),
            Err(error) => {
                warn!(%error, "failed to restore session expiry");
                None
            }
        };

        if expires_at.is_some_and(|at| at <= self.clock.now()) {
            // Stale session: drop the stored keys rather than resurrect it.
            if let Err(error) = self.remove_stored().await {
                warn!(%error, "failed to drop stale session");
            }
            return;
        }

        self.install_header(&token).await;
        let mut state = self.state.write().await;
        state.token = Some(token);
        state.expires_at = expires_at;
    }

    /// Stores a new token and installs it on the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted; the header is
    /// installed regardless, so the running process stays authenticated.
    pub async fn set_token(
        &self,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), crate::ports::StorageError> {
        self.install_header(token).await;
        {
            let mut state = self.state.write().await;
            state.token = Some(token.to_string());
            state.expires_at = expires_at;
        }

        self.storage.set(TOKEN_KEY, token).await?;
        match expires_at {
            Some(at) => {
                self.storage
                    .set(TOKEN_EXPIRES_KEY, &at.to_rfc3339())
                    .await?;
            }
            None => self.storage.remove(TOKEN_EXPIRES_KEY).await?,
        }
        Ok(())
    }

    /// Clears the token from the transport, memory, and durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored entries cannot be removed.
    pub async fn clear_token(&self) -> Result<(), crate::ports::StorageError> {
        self.transport.remove_default_header("Authorization").await;
        {
            let mut state = self.state.write().await;
            state.token = None;
            state.expires_at = None;
        }
        self.remove_stored().await
    }

    /// Returns true when a token is held and its expiry, if any, is in the
    /// future.
    pub async fn is_valid(&self) -> bool {
        let state = self.state.read().await;
        match (&state.token, state.expires_at) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(at)) => at > self.clock.now(),
        }
    }

    /// The currently held token, if any.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    async fn install_header(&self, token: &str) {
        self.transport
            .set_default_header("Authorization", &format!("Bearer {token}"))
            .await;
    }

    async fn remove_stored(&self) -> Result<(), crate::ports::StorageError> {
        self.storage.remove(TOKEN_KEY).await?;
        self.storage.remove(TOKEN_EXPIRES_KEY).await
    }
}

#[async_trait]
impl<T, S, N, C> UnauthorizedHandler for AuthSession<T, S, N, C>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
    C: Clock,
{
    /// Drops the session and, inside the authenticated area, sends the user
    /// to the login entry point. Already being there suppresses the redirect
    /// so a burst of 401s cannot loop.
    async fn on_unauthorized(&self) {
        if let Err(error) = self.clear_token().await {
            warn!(%error, "failed to clear session after unauthorized response");
        }

        let path = self.navigator.current_path();
        if path.starts_with(ADMIN_AREA) && !path.starts_with(LOGIN_PATH) {
            self.navigator.navigate_to(LOGIN_PATH);
        }
    }
}
