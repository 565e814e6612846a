// Storage client module: a small blocking HTTP client for the Paimon Cloud
// Storage server. Each operation is one self-contained request/response
// exchange; nothing is cached or shared between calls.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

/// Cloud service the server relays uploads to when the caller does not pick
/// one explicitly.
pub const DEFAULT_SERVICE: &str = "mega";

/// Per-request timeout applied by `StorageClient::new`. A stalled exchange
/// past this point is reported as a transport failure rather than hanging.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the upload credential. The server accepts no other auth
/// mechanism.
const AUTH_HEADER: &str = "X-Auth-Token";

/// Client for one storage server, holding the base URL and the HTTP handle.
/// No session, connection or token state survives between calls, so a single
/// client can issue independent operations from several threads at once.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
}

/// Outcome of a liveness probe against `/ping`.
#[derive(Debug, Clone)]
pub struct PingResult {
    /// True when the HTTP exchange completed, whatever the status code. Even
    /// a 500 answer means something is listening at the address.
    pub reachable: bool,
    /// The response body as opaque text; empty when unreachable.
    pub raw_body: String,
    /// Describes what broke at the transport level, when something did.
    pub transport_error: Option<String>,
}

/// One file upload, consumed by `StorageClient::upload`.
///
/// `service` defaults to [`DEFAULT_SERVICE`]; use `with_service` to pick a
/// different backend. The token is forwarded as-is: whether it is valid
/// (or even non-empty) is the server's call, not the client's.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub auth_token: String,
    pub file_path: PathBuf,
    pub service: String,
}

impl UploadRequest {
    /// Build a request for `file_path` authenticated by `auth_token`, with
    /// the default service.
    pub fn new(auth_token: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        UploadRequest {
            auth_token: auth_token.into(),
            file_path: file_path.into(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }

    /// Override the cloud service the server should relay to.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }
}

/// Outcome of an upload attempt. Exactly one of two shapes: a transport
/// failure (`http_status` is `None`, `transport_error` says what broke), or
/// a completed exchange carrying the server's verdict verbatim. A rejection
/// such as a 401 is the second shape, a normal result for the caller to
/// inspect, not an error.
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Status code of the response, absent when no response was received.
    pub http_status: Option<u16>,
    /// The complete response payload as opaque text.
    pub raw_body: String,
    /// True exactly when the server answered HTTP 200.
    pub success: bool,
    /// Describes what broke at the transport level, when something did.
    pub transport_error: Option<String>,
}

/// Server self-description from `/status`. Field names mirror the server's
/// JSON keys.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub version: String,
    pub service: String,
    pub temp_dir: String,
    pub supported_services: Vec<String>,
}

impl StorageClient {
    /// Create a client for the server at `base_url` (no trailing path) with
    /// the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout. Exceeding it
    /// aborts the exchange and surfaces as a transport failure.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(StorageClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client configured from the environment variable
    /// `PAIMON_SERVER_URL`, or fall back to `http://localhost:8080`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PAIMON_SERVER_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into());
        Self::new(base_url)
    }

    /// The server base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the server's `/ping` endpoint.
    ///
    /// Reachability is transport-level only: any completed exchange counts,
    /// whatever the status code. Transport failures are folded into the
    /// result; this method never returns an error and never panics.
    pub fn ping(&self) -> PingResult {
        match self.try_ping() {
            Ok(body) => PingResult {
                reachable: true,
                raw_body: body,
                transport_error: None,
            },
            Err(e) => PingResult {
                reachable: false,
                raw_body: String::new(),
                transport_error: Some(format!("{:#}", e)),
            },
        }
    }

    fn try_ping(&self) -> Result<String> {
        let url = format!("{}/ping", &self.base_url);
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to send ping request")?;
        // Reading the body is still part of the exchange: a connection cut
        // mid-body is a transport failure, not a reachable server.
        res.text().context("Failed to read ping response")
    }

    /// Upload the file described by `req` through `/upload`.
    ///
    /// The request is consumed: one `UploadRequest`, one exchange. Failures
    /// come back in two tiers. A transport failure leaves `http_status`
    /// empty and fills `transport_error`, while a completed exchange reports
    /// the server's status verbatim with `success` true only for HTTP 200.
    /// No retries, no per-status handling; the caller decides what a
    /// rejection means.
    pub fn upload(&self, req: UploadRequest) -> UploadResult {
        match self.try_upload(&req) {
            Ok(result) => result,
            Err(e) => UploadResult {
                http_status: None,
                raw_body: String::new(),
                success: false,
                transport_error: Some(format!("{:#}", e)),
            },
        }
    }

    fn try_upload(&self, req: &UploadRequest) -> Result<UploadResult> {
        let url = self.upload_url(&req.service);

        // Open the file before touching the network: an unreadable path is a
        // local failure and no request goes out for it.
        let file = File::open(&req.file_path)
            .with_context(|| format!("Failed to open file {}", req.file_path.display()))?;
        let length = file
            .metadata()
            .context("Failed to read file metadata")?
            .len();

        // The part is named `file` and keeps the file's own name, which the
        // server uses for the stored object.
        let file_name = req
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        let part = multipart::Part::reader_with_length(file, length).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .header(AUTH_HEADER, req.auth_token.as_str())
            .multipart(form)
            .send()
            .context("Failed to send upload request")?;

        let status = res.status().as_u16();
        let body = res.text().context("Failed to read upload response")?;

        Ok(UploadResult {
            http_status: Some(status),
            raw_body: body,
            success: status == 200,
            transport_error: None,
        })
    }

    /// Fetch the server's `/status` report as typed data.
    ///
    /// Unlike `ping` and `upload` this is a plain fallible call: transport
    /// problems and non-2xx answers both surface as errors, with the status
    /// and body text preserved in the message.
    pub fn status(&self) -> Result<StatusReport> {
        let url = format!("{}/status", &self.base_url);
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to send status request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Status check failed: {} - {}", status, txt);
        }
        let body = res.text().context("Failed to read status response")?;
        let report = serde_json::from_str(&body).context("Parsing status response json")?;
        Ok(report)
    }

    /// The query parameter is always present; the value is percent-encoded
    /// so an unusual service name cannot mangle the query string.
    fn upload_url(&self, service: &str) -> String {
        format!(
            "{}/upload?service={}",
            &self.base_url,
            urlencoding::encode(service)
        )
    }
}
