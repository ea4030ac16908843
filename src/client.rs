//! MyAnimeList API client.
//!
//! Low-level HTTP client that owns the credentials, selects the
//! authentication header and maps upstream statuses to [`MalError`].
//! Endpoint methods live next to the model types they return.

use std::env;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{HeaderName, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{MalError, Result};

/// Public MyAnimeList v2 API root.
pub const DEFAULT_API_URL: &str = "https://api.myanimelist.net/v2";
const USER_AGENT: &str = concat!("malapi/", env!("CARGO_PKG_VERSION"));

/// Header used by the client-id authentication scheme.
pub const CLIENT_ID_HEADER: &str = "x-mal-client-id";

/// Client configuration: the application client id and an optional OAuth
/// access token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    access_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("has_access_token", &self.has_access_token())
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Create credentials from a client id and an optional access token.
    pub fn new(client_id: &str, access_token: Option<&str>) -> Self {
        Self {
            client_id: client_id.to_string(),
            access_token: access_token.map(str::to_string),
        }
    }

    /// The application client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The access token, if one is set. An empty token counts as unset.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether an access token is set.
    pub fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }

    /// Select the authentication scheme for the next request.
    ///
    /// A bearer token wins whenever one is set; the client id is only sent
    /// otherwise. Never both.
    pub fn auth_scheme(&self) -> AuthScheme {
        match self.access_token() {
            Some(token) => AuthScheme::Bearer(token.to_string()),
            None => AuthScheme::ClientId(self.client_id.clone()),
        }
    }
}

/// The single authentication header attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `X-MAL-CLIENT-ID: <id>`
    ClientId(String),
}

impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(..)"),
            Self::ClientId(_) => f.write_str("ClientId(..)"),
        }
    }
}

impl AuthScheme {
    /// The header name for this scheme.
    pub fn header_name(&self) -> HeaderName {
        match self {
            Self::Bearer(_) => AUTHORIZATION,
            Self::ClientId(_) => HeaderName::from_static(CLIENT_ID_HEADER),
        }
    }

    /// The header value for this scheme.
    pub fn header_value(&self) -> String {
        match self {
            Self::Bearer(token) => format!("Bearer {token}"),
            Self::ClientId(id) => id.clone(),
        }
    }
}

/// Low-level MyAnimeList API client.
///
/// This struct is cheaply cloneable. Clones share the connection pool and the
/// credentials, so a setter called on one clone is seen by all of them.
///
/// # Example
///
/// ```no_run
/// use malapi::MalClient;
///
/// # fn example() -> malapi::Result<()> {
/// // Create from environment variables
/// let client = MalClient::from_env()?;
///
/// // Or configure manually
/// let client = MalClient::new("your-client-id", None)?;
/// client.set_access_token("oauth-token");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MalClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Arc<RwLock<Credentials>>,
}

impl fmt::Debug for MalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MalClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl MalClient {
    /// Create a client from environment variables.
    ///
    /// Uses `MAL_CLIENT_ID`, optionally `MAL_ACCESS_TOKEN`, and optionally
    /// `MAL_API_URL` for the base URL (defaults to
    /// `https://api.myanimelist.net/v2`).
    ///
    /// # Errors
    ///
    /// Returns an error if `MAL_CLIENT_ID` is not set.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("MAL_CLIENT_ID").map_err(|_| {
            MalError::ConfigMissing("MAL_CLIENT_ID environment variable not set".to_string())
        })?;
        let access_token = env::var("MAL_ACCESS_TOKEN").ok();
        let base_url = env::var("MAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::with_base_url(&client_id, access_token.as_deref(), &base_url)
    }

    /// Create a client against the public MyAnimeList API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(client_id: &str, access_token: Option<&str>) -> Result<Self> {
        Self::with_base_url(client_id, access_token, DEFAULT_API_URL)
    }

    /// Create a client against a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_base_url(
        client_id: &str,
        access_token: Option<&str>,
        base_url: &str,
    ) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to build HTTP client");
                MalError::Network
            })?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Arc::new(RwLock::new(Credentials::new(client_id, access_token))),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Replace the access token used by subsequent calls.
    pub fn set_access_token(&self, token: &str) {
        self.write_credentials(|c| c.access_token = Some(token.to_string()));
    }

    /// Remove the access token; subsequent calls authenticate by client id.
    pub fn clear_access_token(&self) {
        self.write_credentials(|c| c.access_token = None);
    }

    /// Replace the client id used by subsequent calls.
    pub fn set_client_id(&self, id: &str) {
        self.write_credentials(|c| c.client_id = id.to_string());
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write_credentials(&self, update: impl FnOnce(&mut Credentials)) {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut guard);
    }

    /// Resolve an endpoint path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Statuses are mapped through [`MalError::from_status`] without reading
    /// the body. Anything that goes wrong before a status is known, while
    /// reading the body, or while decoding it becomes [`MalError::Network`].
    #[tracing::instrument(skip(self, url, auth), fields(url = %url))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: Url, auth: &AuthScheme) -> Result<T> {
        tracing::debug!("sending request");

        let response = self
            .http
            .get(url)
            .header(auth.header_name(), auth.header_value())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "request failed");
                MalError::Network
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "upstream rejected request");
            return Err(MalError::from_status(status));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read response body");
            MalError::Network
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "response body is not the expected JSON");
            MalError::Network
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = MalClient::new("test-client-id", Some("secret-token")).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("MalClient"));
        assert!(debug.contains("base_url"));
        // Credentials should not be in debug output
        assert!(!debug.contains("test-client-id"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = MalClient::with_base_url("id", None, "https://api.myanimelist.net/v2").unwrap();
        let client2 =
            MalClient::with_base_url("id", None, "https://api.myanimelist.net/v2/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(
            client1.endpoint("anime/ranking").unwrap().as_str(),
            "https://api.myanimelist.net/v2/anime/ranking"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = MalClient::with_base_url("id", None, "not a url").unwrap_err();
        assert!(matches!(err, MalError::MalformedUrl(_)));
    }

    #[test]
    fn test_auth_scheme_prefers_bearer() {
        let creds = Credentials::new("client", Some("token"));
        let scheme = creds.auth_scheme();
        assert_eq!(scheme, AuthScheme::Bearer("token".to_string()));
        assert_eq!(scheme.header_name(), AUTHORIZATION);
        assert_eq!(scheme.header_value(), "Bearer token");
    }

    #[test]
    fn test_auth_scheme_falls_back_to_client_id() {
        let creds = Credentials::new("client", None);
        let scheme = creds.auth_scheme();
        assert_eq!(scheme, AuthScheme::ClientId("client".to_string()));
        assert_eq!(scheme.header_name().as_str(), "x-mal-client-id");
        assert_eq!(scheme.header_value(), "client");
    }

    #[test]
    fn test_empty_token_counts_as_unset() {
        let creds = Credentials::new("client", Some(""));
        assert!(!creds.has_access_token());
        assert_eq!(creds.auth_scheme(), AuthScheme::ClientId("client".to_string()));
    }

    #[test]
    fn test_setters_are_visible_to_clones() {
        let client = MalClient::new("first", None).unwrap();
        let clone = client.clone();

        client.set_access_token("token");
        client.set_client_id("second");
        let creds = clone.credentials();
        assert_eq!(creds.client_id(), "second");
        assert_eq!(creds.access_token(), Some("token"));

        clone.clear_access_token();
        assert!(!client.credentials().has_access_token());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let client = MalClient::new("client", Some("old")).unwrap();
        let snapshot = client.credentials();
        client.set_access_token("new");
        assert_eq!(snapshot.access_token(), Some("old"));
        assert_eq!(client.credentials().access_token(), Some("new"));
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let debug = format!("{:?}", Credentials::new("client-id", Some("s3cr3t")));
        assert!(!debug.contains("client-id"));
        assert!(!debug.contains("s3cr3t"));
        let debug = format!("{:?}", AuthScheme::Bearer("s3cr3t".to_string()));
        assert_eq!(debug, "Bearer(..)");
    }
}
