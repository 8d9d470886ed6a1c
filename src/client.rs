use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::errors::{Result, VictorOpsError};

/// Header carrying the API id on every public-API request
pub const API_ID_HEADER: &str = "X-VO-Api-Id";
/// Header carrying the API key on every public-API request
pub const API_KEY_HEADER: &str = "X-VO-Api-Key";

/// Every public-API endpoint lives under this prefix
const PUBLIC_API_PREFIX: &str = "/api-public/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Serializes to `{}`. The public API expects a JSON body even on reads.
#[derive(Serialize)]
pub(crate) struct EmptyBody {}

/// Request/response envelope returned alongside every decoded result
///
/// Captures the raw exchange for diagnostics: the status code, the full
/// response body text, the final request URL (query string included) and
/// the serialized request body. The client never interprets the status
/// code or the body; callers inspect these themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDetails {
    /// HTTP status code of the response
    pub status_code: u16,
    /// Raw response body text
    pub response_body: String,
    /// Final URL the request was sent to
    pub request_url: String,
    /// JSON body that was sent with the request
    pub request_body: String,
}

impl RequestDetails {
    /// Decode the captured response body into the expected shape
    pub(crate) fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.response_body).map_err(|source| VictorOpsError::Decode {
            source,
            details: Box::new(self.clone()),
        })
    }
}

/// Client for the VictorOps (Splunk On-Call) public REST API
///
/// # Example
///
/// ```rust,no_run
/// use victorops_api::VictorOpsClient;
/// use url::Url;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = VictorOpsClient::new(
///         "my-api-id",
///         "my-api-key",
///         Url::parse("https://api.victorops.com")?,
///     )?;
///
///     let (user, details) = client.get_user("jdoe").await?;
///     println!("{:?} (HTTP {})", user, details.status_code);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct VictorOpsClient {
    client: ClientWithMiddleware,
    base_url: Url,
    api_id: String,
    api_key: String,
}

impl VictorOpsClient {
    /// Create a new client with the default 30 second timeout
    ///
    /// # Arguments
    ///
    /// * `api_id` - API id issued by VictorOps
    /// * `api_key` - API key issued by VictorOps
    /// * `base_url` - Base URL of the API (e.g. `https://api.victorops.com`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Url,
    ) -> Result<Self> {
        Self::with_timeout(api_id, api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom request timeout
    ///
    /// Each call blocks on network I/O for at most `timeout`.
    pub fn with_timeout(
        api_id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Url,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(VictorOpsError::BuildHttpClient)?;

        let client = ClientBuilder::new(client).build();

        Ok(Self::with_client(client, api_id, api_key, base_url))
    }

    /// Create a new client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (logging, etc.)
    pub fn with_client(
        client: ClientWithMiddleware,
        api_id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Url,
    ) -> Self {
        Self {
            client,
            base_url,
            api_id: api_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Get the base API URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform one request against the public API and capture the exchange
    ///
    /// Joins `endpoint` onto the base URL under `/api-public/`, appends
    /// `query` with standard percent-encoding, attaches the two auth
    /// headers and a JSON content type, sends `body` as JSON and reads the
    /// whole response body.
    ///
    /// Status codes are not inspected here. A non-2xx response is still an
    /// `Ok` envelope; only URL construction, send and body-read failures
    /// are errors.
    #[instrument(
        name = "VictorOpsClient::make_public_api_call",
        skip_all,
        fields(method = %method, endpoint = %endpoint)
    )]
    pub(crate) async fn make_public_api_call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
        query: &[(&str, String)],
    ) -> Result<RequestDetails> {
        let mut url = self
            .base_url
            .join(&format!("{PUBLIC_API_PREFIX}{endpoint}"))
            .map_err(VictorOpsError::Url)?;

        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let request_body = serde_json::to_string(body).map_err(VictorOpsError::Serialize)?;

        debug!(url = %url, "Sending public API request");

        let request = self
            .client
            .request(method, url.clone())
            .header(API_ID_HEADER, &self.api_id)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(request_body.clone())
            .build()
            .map_err(VictorOpsError::BuildRequest)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(VictorOpsError::Request)?;

        let status_code = response.status().as_u16();
        let response_body = response.text().await.map_err(VictorOpsError::ReadBody)?;

        debug!(status = status_code, "Received public API response");

        Ok(RequestDetails {
            status_code,
            response_body,
            request_url: url.into(),
            request_body,
        })
    }
}

impl std::fmt::Debug for VictorOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key is deliberately not printed
        f.debug_struct("VictorOpsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_id", &self.api_id)
            .finish_non_exhaustive()
    }
}

/// Form-encode a user-supplied path segment (usernames, slugs)
pub(crate) fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
