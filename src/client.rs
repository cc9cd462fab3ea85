use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::envelope::{classify_error, classify_public_error, decode_data};
use crate::error::Error;
use crate::session::{MemoryTokenStore, Session, TokenStore, TokenStoreDyn};
use crate::validate;

/// Production API root.
const DEFAULT_BASE_URL: &str = "http://ceprj.gachon.ac.kr:60001/api/api/v1";

/// Bookdam API configuration.
///
/// The default points at the production endpoint; override for staging or a
/// local stub server.
///
/// ```rust,ignore
/// use bookdam_client::ApiConfig;
///
/// let config = ApiConfig::new().with_base_url("http://localhost:8080/api/api/v1".parse()?);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ApiConfig {
    pub(crate) base_url: Url,
}

impl ApiConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.parse().expect("valid default URL"),
        }
    }

    /// Override the API root.
    #[must_use]
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = url;
        self
    }

    /// Create config from environment variables.
    ///
    /// # Optional env vars
    /// - `BOOKDAM_API_URL`: Override the API root (must be a valid URL).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `BOOKDAM_API_URL` is set but invalid.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::new();
        if let Ok(raw) = std::env::var("BOOKDAM_API_URL") {
            let url: Url = raw
                .parse()
                .map_err(|e| Error::Config(format!("BOOKDAM_API_URL: {e}")))?;
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    /// API root URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Credentials for the login exchange.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    nick_name: String,
    password: String,
}

impl LoginCredentials {
    /// Validates that both fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when either field is blank; nothing is
    /// sent in that case.
    pub fn new(nick_name: &str, password: &str) -> Result<Self, Error> {
        const MESSAGE: &str = "닉네임과 비밀번호를 입력하세요";
        Ok(Self {
            nick_name: validate::require(nick_name, MESSAGE)?,
            password: validate::require(password, MESSAGE)?,
        })
    }
}

/// Sign-up form for `POST /member/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    nick_name: String,
    password: String,
    phone_number: String,
    genre: String,
    job: String,
    birth: String,
}

impl Registration {
    /// Validates the sign-up form; every field is required and `birth` must
    /// be a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] on the first missing or malformed field.
    pub fn new(
        nick_name: &str,
        password: &str,
        phone_number: &str,
        genre: &str,
        job: &str,
        birth: &str,
    ) -> Result<Self, Error> {
        const MESSAGE: &str = "모든 항목을 입력해주세요.";
        Ok(Self {
            nick_name: validate::require(nick_name, MESSAGE)?,
            password: validate::require(password, MESSAGE)?,
            phone_number: validate::require(phone_number, MESSAGE)?,
            genre: validate::require(genre, MESSAGE)?,
            job: validate::require(job, MESSAGE)?,
            birth: validate::require_date(birth, MESSAGE)?,
        })
    }
}

/// Token pair returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Empty JSON object body for endpoints that take no payload.
#[derive(Serialize)]
pub(crate) struct Empty {}

/// Session-aware client for the Bookdam API.
///
/// Owns the credential lifecycle: obtains the token pair at login, attaches
/// `Authorization: Bearer` to every authenticated call, and reacts to an
/// invalid credential (HTTP 401) uniformly — the stored session is cleared
/// and the `on_unauthorized` hook fires, regardless of which operation
/// tripped it. Cloning is cheap; clones share the store and the HTTP pool.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
    store: Arc<dyn TokenStoreDyn>,
    on_unauthorized: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl ApiClient {
    /// Create a client backed by the in-process [`MemoryTokenStore`].
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            store: Arc::new(MemoryTokenStore::new()),
            on_unauthorized: None,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Use a custom credential store (platform secure storage).
    #[must_use]
    pub fn with_token_store<S: TokenStore>(mut self, store: S) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Install the expired-session hook.
    ///
    /// Fires after the stored credential has been cleared in response to an
    /// HTTP 401, once per failed call, from the task that made the call.
    /// Route the user to the login entry point here.
    #[must_use]
    pub fn with_on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    // ── Session lifecycle ──────────────────────────────────────────────

    /// Read the persisted session without touching the network.
    ///
    /// Screens call this on focus; `None` means never logged in (or logged
    /// out), and the screen must route to login instead of calling the API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the credential store fails.
    pub async fn credential(&self) -> Result<Option<Session>, Error> {
        self.store
            .load_dyn()
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    /// Exchange credentials for a session.
    ///
    /// On success both tokens are persisted and subsequent calls are
    /// authenticated. On failure any previously stored session is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] or [`Error::Fault`] when the server
    /// refuses the credentials, [`Error::Network`] when it is unreachable,
    /// and [`Error::Store`] when the new session cannot be persisted.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Session, Error> {
        let tokens: TokenPair = self
            .public_request(Method::POST, "/member/login", Some(&credentials))
            .await?
            .ok_or(Error::MissingData)?;

        let mut session = Session::new(tokens.access_token);
        if let Some(refresh) = tokens.refresh_token {
            session = session.with_refresh_token(refresh);
        }
        self.store
            .save_dyn(session.clone())
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(session)
    }

    /// Create an account. The caller routes to login afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`]/[`Error::Fault`] on server refusal and
    /// [`Error::Network`] when the server is unreachable.
    pub async fn register(&self, registration: Registration) -> Result<(), Error> {
        self.public_request::<_, serde_json::Value>(
            Method::POST,
            "/member/register",
            Some(&registration),
        )
        .await?;
        Ok(())
    }

    /// End the session.
    ///
    /// The server is informed best-effort; the local credential is deleted
    /// unconditionally afterwards, so logout is never blocked by network
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] only when deleting the local credential
    /// fails. Server-side failures are logged and swallowed.
    pub async fn logout(&self) -> Result<(), Error> {
        match self.store.load_dyn().await {
            Ok(Some(session)) => {
                let result = self
                    .http
                    .post(self.endpoint("/member/logout"))
                    .bearer_auth(&session.access_token)
                    .json(&Empty {})
                    .send()
                    .await;
                match result {
                    Ok(response) if !response.status().is_success() => {
                        tracing::warn!(
                            status = response.status().as_u16(),
                            "server logout failed"
                        );
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "server logout unreachable");
                    }
                    Ok(_) => {}
                }
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(error = %error, "could not read stored session for logout");
            }
        }

        self.store
            .clear_dyn()
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    // ── Request plumbing ───────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.config.base_url.clone();
        let base = self.config.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{base}{path}"));
        url
    }

    /// Unauthenticated call (login, register). A 401 here is an ordinary
    /// rejection, not an expired session.
    async fn public_request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, Error> {
        let mut request = self.http.request(method, self.endpoint(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(classify_public_error(status, &bytes));
        }
        decode_data(&bytes)
    }

    /// The contract every operation goes through: read the token (absent
    /// means no network call at all), attach the bearer header, send, and
    /// map the response through the envelope convention.
    pub(crate) async fn authorized_request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Option<T>, Error> {
        let session = self.credential().await?.ok_or(Error::NotLoggedIn)?;

        let mut url = self.endpoint(path);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&session.access_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session().await;
            return Err(Error::SessionExpired);
        }
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(classify_error(status, &bytes));
        }
        decode_data(&bytes)
    }

    /// The 401 policy: one uniform effect no matter which call tripped it.
    async fn expire_session(&self) {
        if let Err(error) = self.store.clear_dyn().await {
            tracing::error!(error = %error, "failed to clear expired session");
        }
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, Error> {
        self.authorized_request::<(), T>(Method::GET, path, &[], None)
            .await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, Error> {
        self.authorized_request::<(), T>(Method::GET, path, query, None)
            .await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, Error> {
        self.authorized_request(Method::POST, path, &[], Some(body))
            .await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, Error> {
        self.authorized_request(Method::POST, path, &[], Some(&Empty {}))
            .await
    }

    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, Error> {
        self.authorized_request(Method::POST, path, query, Some(&Empty {}))
            .await
    }

    /// POST where only success/failure matters.
    pub(crate) async fn post_unit(&self, path: &str) -> Result<(), Error> {
        self.post_empty::<serde_json::Value>(path).await?;
        Ok(())
    }

    pub(crate) async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, Error> {
        self.authorized_request(Method::PATCH, path, &[], Some(body))
            .await
    }

    pub(crate) async fn patch_empty(&self, path: &str) -> Result<(), Error> {
        self.authorized_request::<_, serde_json::Value>(
            Method::PATCH,
            path,
            &[],
            Some(&Empty {}),
        )
        .await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        self.authorized_request::<(), serde_json::Value>(Method::DELETE, path, &[], None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_production() {
        let config = ApiConfig::default();
        assert_eq!(
            config.base_url().as_str(),
            "http://ceprj.gachon.ac.kr:60001/api/api/v1"
        );
    }

    #[test]
    fn endpoint_appends_the_operation_path() {
        let client = ApiClient::new(ApiConfig::new());
        let url = client.endpoint("/book/info");
        assert_eq!(
            url.as_str(),
            "http://ceprj.gachon.ac.kr:60001/api/api/v1/book/info"
        );
    }

    #[test]
    fn endpoint_tolerates_a_trailing_slash_on_the_base() {
        let config =
            ApiConfig::new().with_base_url("http://localhost:9000/api/api/v1/".parse().unwrap());
        let client = ApiClient::new(config);
        assert_eq!(
            client.endpoint("/member/login").as_str(),
            "http://localhost:9000/api/api/v1/member/login"
        );
    }

    #[test]
    fn login_credentials_require_both_fields() {
        assert!(LoginCredentials::new("nick", "pw").is_ok());

        let err = LoginCredentials::new("", "pw").unwrap_err();
        assert_eq!(err.to_string(), "닉네임과 비밀번호를 입력하세요");
        assert!(LoginCredentials::new("nick", "   ").is_err());
    }

    #[test]
    fn login_payload_uses_the_wire_field_names() {
        let credentials = LoginCredentials::new("달밤", "secret").unwrap();
        let json = serde_json::to_value(&credentials).unwrap();
        assert_eq!(json["nickName"], "달밤");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn registration_requires_every_field() {
        assert!(Registration::new("n", "p", "010-1234-5678", "소설", "학생", "2000-01-02").is_ok());
        assert!(Registration::new("n", "p", "", "소설", "학생", "2000-01-02").is_err());
        assert!(Registration::new("n", "p", "010", "소설", "학생", "not-a-date").is_err());
    }

    #[test]
    fn token_pair_tolerates_a_missing_refresh_token() {
        let pair: TokenPair = serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        assert_eq!(pair.access_token, "abc");
        assert!(pair.refresh_token.is_none());
    }
}
