//! The persisted credential and its storage boundary.
//!
//! A session is created at login, read before every authenticated request,
//! and destroyed on logout or when the server reports the credential invalid.
//! Storage is consumer-owned: the client only sees the [`TokenStore`] trait.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// The locally persisted credential pair enabling authenticated calls.
///
/// The refresh token is stored alongside the access token but is never
/// exchanged; an expired session always routes through a fresh login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential, sent as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Opaque renewal credential, kept for a future refresh flow.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Session {
    /// Create a session from an access token alone.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }

    /// Attach the refresh token returned at login.
    #[must_use]
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }
}

/// Consumer-provided credential persistence.
///
/// The mobile app keeps the pair in the platform secure store under the
/// `accessToken` / `refreshToken` entries; a consumer of this crate plugs in
/// whatever secure storage the host offers. Writes are rare (login sets,
/// logout and expiry clear) and last-write-wins; the backing primitive is
/// assumed atomic per entry, so no extra locking is required here.
///
/// # Example
///
/// ```rust,ignore
/// impl TokenStore for KeychainStore {
///     async fn load(&self) -> Result<Option<Session>, Box<dyn std::error::Error + Send + Sync>> {
///         Ok(self.keychain.read("accessToken")?.map(Session::new))
///     }
///     // save / clear analogous
/// }
/// ```
pub trait TokenStore: Send + Sync + 'static {
    /// Read the persisted session, if any.
    fn load(
        &self,
    ) -> impl Future<Output = Result<Option<Session>, Box<dyn std::error::Error + Send + Sync>>> + Send;

    /// Persist a session, replacing any previous one.
    fn save(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>> + Send;

    /// Delete the persisted session.
    fn clear(
        &self,
    ) -> impl Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>> + Send;
}

/// Object-safe wrapper for TokenStore (needed for Arc<dyn>).
pub(crate) trait TokenStoreDyn: Send + Sync {
    fn load_dyn(
        &self,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<
                    Output = Result<
                        Option<Session>,
                        Box<dyn std::error::Error + Send + Sync>,
                    >,
                > + Send
                + '_,
        >,
    >;

    fn save_dyn(
        &self,
        session: Session,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<
                    Output = Result<(), Box<dyn std::error::Error + Send + Sync>>,
                > + Send
                + '_,
        >,
    >;

    fn clear_dyn(
        &self,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<
                    Output = Result<(), Box<dyn std::error::Error + Send + Sync>>,
                > + Send
                + '_,
        >,
    >;
}

impl<T: TokenStore> TokenStoreDyn for T {
    fn load_dyn(
        &self,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<
                    Output = Result<
                        Option<Session>,
                        Box<dyn std::error::Error + Send + Sync>,
                    >,
                > + Send
                + '_,
        >,
    > {
        Box::pin(self.load())
    }

    fn save_dyn(
        &self,
        session: Session,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<
                    Output = Result<(), Box<dyn std::error::Error + Send + Sync>>,
                > + Send
                + '_,
        >,
    > {
        Box::pin(self.save(session))
    }

    fn clear_dyn(
        &self,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<
                    Output = Result<(), Box<dyn std::error::Error + Send + Sync>>,
                > + Send
                + '_,
        >,
    > {
        Box::pin(self.clear())
    }
}

/// In-process [`TokenStore`]. The client's default; suitable for tests and
/// short-lived tools, not for surviving a process restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(
        &self,
    ) -> impl Future<Output = Result<Option<Session>, Box<dyn std::error::Error + Send + Sync>>> + Send
    {
        let session = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        async move { Ok(session) }
    }

    fn save(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>> + Send {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
        async move { Ok(()) }
    }

    fn clear(
        &self,
    ) -> impl Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>> + Send {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        async move { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.unwrap().is_none());

        let session = Session::new("abc").with_refresh_token("def");
        store.save(session.clone()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_previous_session() {
        let store = MemoryTokenStore::new();
        store.save(Session::new("first")).await.unwrap();
        store.save(Session::new("second")).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "second");
        assert!(loaded.refresh_token.is_none());
    }

    #[test]
    fn session_serde_keeps_refresh_token_optional() {
        let parsed: Session = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(parsed, Session::new("abc"));
    }
}
