//! Binance REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{AbortRegistration, Abortable, Aborted};
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::auth::{Credentials, CredentialsProvider, SystemClock, TimestampProvider, sign_request};
use crate::error::{ApiError, BinanceError};
use crate::rest::endpoints::BINANCE_BASE_URL;
use crate::rest::request::{Request, SecurityType};

/// The Binance REST API client.
///
/// The client handles authentication and request signing. It holds no
/// per-call state: each dispatch is an independent unit of work, so a single
/// client can be cloned and shared across any number of concurrent tasks.
///
/// Retry and backoff policy deliberately live with the caller - a failed
/// dispatch is surfaced exactly once and never retried internally.
///
/// # Example
///
/// ```rust,no_run
/// use binance_api_client::rest::RestClient;
/// use binance_api_client::rest::wallet::WithdrawHistoryRequest;
/// use binance_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = RestClient::builder().credentials(credentials).build();
///
///     let withdraws = client
///         .list_withdraws(&WithdrawHistoryRequest::new().coin("ETH"))
///         .await?;
///     println!("{} withdrawals", withdraws.len());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    clock: Arc<dyn TimestampProvider>,
    recv_window: Option<u64>,
}

impl RestClient {
    /// Create a new client with default settings and no credentials.
    ///
    /// Use [`RestClient::builder()`] to configure credentials for the wallet
    /// endpoints, which are all signed.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// Dispatch a request descriptor and decode the response as `T`.
    ///
    /// Signed requests get `timestamp` (and `recvWindow`, when configured)
    /// injected into their parameter set; the signature is computed over the
    /// exact encoded bytes that are transmitted.
    pub async fn dispatch<T>(&self, request: Request) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(request).await?;
        self.parse_response(response).await
    }

    /// Dispatch a request that the caller can abort mid-flight.
    ///
    /// Create a pair with [`futures_util::future::AbortHandle::new_pair`] and
    /// pass the registration here. Calling `abort()` on the handle aborts the
    /// underlying I/O and yields [`BinanceError::Cancelled`]; a cancelled
    /// dispatch never returns a partial result.
    pub async fn dispatch_abortable<T>(
        &self,
        request: Request,
        registration: AbortRegistration,
    ) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
    {
        match Abortable::new(self.dispatch(request), registration).await {
            Ok(result) => result,
            Err(Aborted) => Err(BinanceError::Cancelled),
        }
    }

    fn require_credentials(&self) -> Result<&Credentials, BinanceError> {
        self.credentials
            .as_ref()
            .map(|provider| provider.get_credentials())
            .ok_or(BinanceError::MissingCredentials)
    }

    /// Serialize a descriptor into an HTTP request and send it.
    async fn send(&self, request: Request) -> Result<reqwest::Response, BinanceError> {
        let Request {
            method,
            endpoint,
            security,
            mut params,
        } = request;

        tracing::debug!(%method, %endpoint, ?security, "dispatching request");

        let mut api_key = None;
        let payload = match security {
            SecurityType::None => params.encode(),
            SecurityType::ApiKey => {
                api_key = Some(self.require_credentials()?.api_key.clone());
                params.encode()
            }
            SecurityType::Signed => {
                let credentials = self.require_credentials()?;
                api_key = Some(credentials.api_key.clone());

                params.set("timestamp", self.clock.now_millis() as i64);
                if let Some(window) = self.recv_window {
                    params.set("recvWindow", window as i64);
                }

                // The digest covers the exact bytes sent: encode once, sign
                // that string, and append the signature to it verbatim.
                let encoded = params.encode();
                let signature = sign_request(credentials, &encoded)?;
                if encoded.is_empty() {
                    format!("signature={signature}")
                } else {
                    format!("{encoded}&signature={signature}")
                }
            }
        };

        let has_body = method == Method::POST || method == Method::PUT;
        let url = if has_body || payload.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, payload)
        };

        let mut builder = self.http_client.request(method, &url);
        if let Some(key) = api_key {
            builder = builder.header("X-MBX-APIKEY", key);
        }
        if has_body {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(payload);
        }

        builder.send().await.map_err(|e| match e {
            reqwest_middleware::Error::Reqwest(inner) if inner.is_timeout() => BinanceError::Timeout,
            other => BinanceError::HttpMiddleware(other),
        })
    }

    /// Parse a response from the Binance API.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        // 429 = request weight exceeded, 418 = auto-ban for ignoring 429s.
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::IM_A_TEAPOT {
            let retry_after_ms = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .map(|seconds| seconds * 1000);
            return Err(BinanceError::RateLimitExceeded { retry_after_ms });
        }

        let body = response.text().await?;

        // Binance signals business-level failure as {"code": <nonzero>, "msg": ...},
        // sometimes with HTTP 200. Check for it before the status code.
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            if envelope.code != 0 {
                return Err(BinanceError::Api(ApiError::new(envelope.code, envelope.msg)));
            }
        }

        if !status.is_success() {
            return Err(BinanceError::HttpStatus { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            BinanceError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
        })
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    clock: Option<Arc<dyn TimestampProvider>>,
    recv_window: Option<u64>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BINANCE_BASE_URL.to_string(),
            credentials: None,
            clock: None,
            recv_window: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, clock: Arc<dyn TimestampProvider>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the `recvWindow` tolerance in milliseconds for signed requests.
    ///
    /// When unset, the server applies its default of 5000ms.
    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    /// Set a timeout applied to each request.
    ///
    /// Elapsed timeouts surface as [`BinanceError::Timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> RestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("binance-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("binance-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        RestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            clock,
            recv_window: self.recv_window,
        }
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Error envelope returned by the Binance API on business-level failures.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    code: i64,
    msg: String,
}
