//! Shared reqwest plumbing for the managed backend.
//!
//! Owns transport details only: URL construction, service-key headers,
//! timeouts and mapping HTTP outcomes into a small fault classification that
//! the port adapters translate into their own error enums.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

use super::dto::ErrorBodyDto;

/// Postgres `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// Auth API code for a duplicate email.
const EMAIL_EXISTS: &str = "email_exists";

/// Connection settings for the managed backend.
#[derive(Clone)]
pub struct ManagedBackendConfig {
    /// Project URL, for example `https://abc.supabase.co`.
    pub base_url: Url,
    /// Service-role key sent as `apikey` and bearer token. Wiped on drop.
    pub service_key: Zeroizing<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for ManagedBackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedBackendConfig")
            .field("base_url", &self.base_url.as_str())
            .field("service_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Outcome classes shared by the data and auth APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FaultKind {
    Connection,
    Conflict,
    Rejected,
}

/// A failed managed-backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Fault {
    pub(super) kind: FaultKind,
    pub(super) message: String,
}

impl Fault {
    fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Authenticated HTTP client for one managed backend project.
#[derive(Clone)]
pub struct ManagedBackendClient {
    http: Client,
    base_url: Url,
    service_key: Zeroizing<String>,
}

impl fmt::Debug for ManagedBackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedBackendClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ManagedBackendClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ManagedBackendConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            service_key: config.service_key,
        })
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, Fault> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|error| {
            Fault::new(
                FaultKind::Connection,
                format!("invalid backend URL {raw}: {error}"),
            )
        })
    }

    pub(super) fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.service_key.as_str())
            .bearer_auth(self.service_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    pub(super) fn http(&self) -> &Client {
        &self.http
    }

    /// Send `request` and decode a successful JSON body.
    pub(super) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, Fault> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body).map_err(|error| {
            Fault::new(
                FaultKind::Rejected,
                format!("unexpected response body: {error}"),
            )
        })
    }

    /// Send `request` and discard a successful body.
    pub(super) async fn send_empty(&self, request: RequestBuilder) -> Result<(), Fault> {
        self.send(request).await.map(drop)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Fault> {
        let response = self
            .authorised(request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, &body))
    }
}

fn map_transport_error(error: reqwest::Error) -> Fault {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    Fault::new(FaultKind::Connection, message)
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> Fault {
    let parsed: ErrorBodyDto = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message()
        .map(str::to_owned)
        .unwrap_or_else(|| fallback_message(status, body));
    let duplicate = parsed.has_code(UNIQUE_VIOLATION) || parsed.has_code(EMAIL_EXISTS);

    let kind = if status == StatusCode::CONFLICT || duplicate {
        FaultKind::Conflict
    } else if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::TOO_MANY_REQUESTS {
        FaultKind::Connection
    } else if status.is_client_error() {
        FaultKind::Rejected
    } else {
        FaultKind::Connection
    };
    Fault::new(kind, message)
}

fn fallback_message(status: StatusCode, body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.is_empty() {
        return format!("status {}", status.as_u16());
    }
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    format!("status {}: {preview}", status.as_u16())
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for status mapping and URL joining.

    use super::*;
    use rstest::rstest;

    fn client(base: &str) -> ManagedBackendClient {
        ManagedBackendClient::new(ManagedBackendConfig {
            base_url: Url::parse(base).expect("base url"),
            service_key: Zeroizing::new("service-key".to_owned()),
            timeout: Duration::from_secs(1),
        })
        .expect("client")
    }

    #[rstest]
    #[case::conflict(StatusCode::CONFLICT, "{}", FaultKind::Conflict)]
    #[case::unique_violation(
        StatusCode::BAD_REQUEST,
        r#"{"code":"23505","message":"duplicate key"}"#,
        FaultKind::Conflict
    )]
    #[case::email_exists(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"code":422,"error_code":"email_exists","msg":"already registered"}"#,
        FaultKind::Conflict
    )]
    #[case::bad_request(
        StatusCode::BAD_REQUEST,
        r#"{"code":"22P02","message":"bad uuid"}"#,
        FaultKind::Rejected
    )]
    #[case::forbidden(StatusCode::FORBIDDEN, "", FaultKind::Rejected)]
    #[case::throttled(StatusCode::TOO_MANY_REQUESTS, "", FaultKind::Connection)]
    #[case::server_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>", FaultKind::Connection)]
    fn classifies_statuses(#[case] status: StatusCode, #[case] body: &str, #[case] kind: FaultKind) {
        assert_eq!(map_status_error(status, body.as_bytes()).kind, kind);
    }

    #[rstest]
    fn prefers_the_collaborator_message() {
        let fault = map_status_error(
            StatusCode::CONFLICT,
            br#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#,
        );
        assert_eq!(
            fault.message,
            "duplicate key value violates unique constraint"
        );
    }

    #[rstest]
    fn falls_back_to_a_body_preview() {
        let fault = map_status_error(StatusCode::BAD_GATEWAY, b"upstream\n  down");
        assert_eq!(fault.message, "status 502: upstream down");
        let empty = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(empty.message, "status 503");
    }

    #[rstest]
    #[case("https://abc.example.co", "rest/v1/schools")]
    #[case("https://abc.example.co/", "/rest/v1/schools")]
    fn joins_paths_without_double_slashes(#[case] base: &str, #[case] path: &str) {
        let url = client(base).endpoint(path).expect("endpoint");
        assert_eq!(url.as_str(), "https://abc.example.co/rest/v1/schools");
    }

    #[rstest]
    fn requests_carry_the_service_key_while_debug_hides_it() {
        let config = ManagedBackendConfig {
            base_url: Url::parse("https://abc.example.co").expect("base url"),
            service_key: Zeroizing::new("service-key".to_owned()),
            timeout: Duration::from_secs(1),
        };
        assert!(!format!("{config:?}").contains("service-key"));

        let client = ManagedBackendClient::new(config).expect("client");
        let url = client.endpoint("rest/v1/schools").expect("endpoint");
        let request = client
            .authorised(client.http().get(url))
            .build()
            .expect("request");
        let headers = request.headers();
        assert_eq!(headers["apikey"], "service-key");
        assert_eq!(headers[reqwest::header::AUTHORIZATION], "Bearer service-key");
        assert!(!format!("{client:?}").contains("service-key"));
    }
}
