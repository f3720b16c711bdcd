//! Client seam, HTTP implementation, session context, and CLI error types.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use paddleflow_api_models::{ErrorResponse, LoginRequest, LoginResponse};
use paddleflow_config::{ConfigError, ServerEndpoint};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::output::OutputFormat;

pub(crate) const API_PREFIX: &str = "/api/paddleflow/v1";
pub(crate) const HEADER_AUTHORIZATION: &str = "x-pf-authorization";
pub(crate) const HEADER_REQUEST_ID: &str = "x-pf-request-id";
pub(crate) const EXIT_FAILURE: i32 = 1;

/// CLI-level error type. Every variant is fatal and exits with status 1.
#[derive(Debug)]
pub(crate) enum CliError {
    Config(ConfigError),
    Authentication(anyhow::Error),
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn authentication(error: impl Into<anyhow::Error>) -> Self {
        Self::Authentication(error.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Authentication(_) | Self::Validation(_) | Self::Failure(_) => {
                EXIT_FAILURE
            }
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Config(error) => error.to_string(),
            Self::Validation(message) => message.clone(),
            Self::Authentication(error) | Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

/// Operations the command handlers need from the remote service.
///
/// Paths are relative to the versioned API prefix, e.g. `/queue`.
#[async_trait]
pub(crate) trait PaddleflowClient: Send + Sync {
    /// Authenticate and keep the issued token for later calls.
    async fn login(&mut self, name: &str, password: &str) -> CliResult<()>;
    async fn get(&self, path: &str, query: &[(&str, String)]) -> CliResult<Value>;
    async fn post(&self, path: &str, body: &Value) -> CliResult<Value>;
    async fn put(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> CliResult<Value>;
    async fn delete(&self, path: &str) -> CliResult<()>;
}

/// Settings applied to every request issued by [`HttpClient`].
#[derive(Debug, Clone)]
pub(crate) struct ClientOptions<'a> {
    pub(crate) timeout: Duration,
    pub(crate) trace_id: &'a str,
}

/// `reqwest`-backed client bound to a single paddleflow server.
pub(crate) struct HttpClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpClient {
    /// Build an unauthenticated client for `endpoint`.
    pub(crate) fn new(endpoint: &ServerEndpoint, options: &ClientOptions<'_>) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(options.trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let http = Client::builder()
            .timeout(options.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: endpoint.base_url.clone(),
            token: None,
        })
    }

    #[cfg(test)]
    pub(crate) const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `API_PREFIX` and `path` to the base URL one segment at a time,
    /// keeping any path the server address already carries. Each segment is
    /// percent-encoded, so `#`, `?` and `%` stay inside it.
    fn api_url(&self, path: &str, query: &[(&str, String)]) -> CliResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                CliError::failure(anyhow!("server address {} cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty();
            for segment in API_PREFIX
                .split('/')
                .chain(path.split('/'))
                .filter(|segment| !segment.is_empty())
            {
                segments.push(segment);
            }
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> CliResult<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| CliError::failure(anyhow!("client is not logged in")))?;
        Ok(builder.header(HEADER_AUTHORIZATION, token))
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> CliResult<Response> {
        let response = self
            .authorized(builder)?
            .send()
            .await
            .map_err(|err| CliError::failure(anyhow!("request to {path} failed: {err}")))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(classify_problem(response).await)
        }
    }
}

#[async_trait]
impl PaddleflowClient for HttpClient {
    async fn login(&mut self, name: &str, password: &str) -> CliResult<()> {
        let url = self.api_url("/login", &[])?;
        let payload = LoginRequest {
            username: name.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                CliError::authentication(anyhow!(
                    "login failed with server {}: {err}",
                    self.base_url
                ))
            })?;

        if !response.status().is_success() {
            let (_, message) = describe_problem(response).await;
            return Err(CliError::authentication(anyhow!("login failed: {message}")));
        }

        let body = response.json::<LoginResponse>().await.map_err(|err| {
            CliError::authentication(anyhow!("failed to parse login response: {err}"))
        })?;
        self.token = Some(body.authorization);
        debug!(user = name, "login succeeded");
        Ok(())
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> CliResult<Value> {
        let url = self.api_url(path, query)?;
        let response = self.send(self.http.get(url), path).await?;
        read_json(response, path).await
    }

    async fn post(&self, path: &str, body: &Value) -> CliResult<Value> {
        let url = self.api_url(path, &[])?;
        let response = self.send(self.http.post(url).json(body), path).await?;
        read_json(response, path).await
    }

    async fn put(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> CliResult<Value> {
        let url = self.api_url(path, query)?;
        let builder = match body {
            Some(body) => self.http.put(url).json(body),
            None => self.http.put(url),
        };
        let response = self.send(builder, path).await?;
        read_json(response, path).await
    }

    async fn delete(&self, path: &str) -> CliResult<()> {
        let url = self.api_url(path, &[])?;
        self.send(self.http.delete(url), path).await?;
        Ok(())
    }
}

/// Per-invocation state handed to every command handler.
pub(crate) struct SessionContext {
    pub(crate) client: Box<dyn PaddleflowClient>,
    pub(crate) output: OutputFormat,
}

impl SessionContext {
    pub(crate) fn new(client: Box<dyn PaddleflowClient>, output: OutputFormat) -> Self {
        Self { client, output }
    }
}

async fn read_json(response: Response, path: &str) -> CliResult<Value> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to read {path} response: {err}")))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::failure(anyhow!("failed to parse {path} response: {err}")))
}

/// Render a non-success response as a single-line message.
pub(crate) async fn describe_problem(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.bytes().await.map_err(|err| err.to_string());
    let message = problem_message(status, body.as_deref().map_err(String::as_str));
    (status, message)
}

fn problem_message(status: StatusCode, body: Result<&[u8], &str>) -> String {
    let bytes = match body {
        Ok(bytes) => bytes,
        Err(read_error) => {
            return format!(
                "request failed with status {status}; reading the response failed: {read_error}"
            );
        }
    };
    let body_text = String::from_utf8_lossy(bytes).trim().to_string();

    match serde_json::from_slice::<ErrorResponse>(bytes) {
        Ok(problem) if problem.code.is_empty() => {
            format!("{} (status {})", problem.message, status.as_u16())
        }
        Ok(problem) => format!(
            "{} (code {}, status {})",
            problem.message,
            problem.code,
            status.as_u16()
        ),
        Err(_) if !body_text.is_empty() => format!("{body_text} (status {})", status.as_u16()),
        Err(_) => format!("request failed with status {status}"),
    }
}

/// Classify an HTTP response into a CLI error.
pub(crate) async fn classify_problem(response: Response) -> CliError {
    let (status, message) = describe_problem(response).await;
    if matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        CliError::validation(message)
    } else {
        CliError::failure(anyhow!(message))
    }
}
