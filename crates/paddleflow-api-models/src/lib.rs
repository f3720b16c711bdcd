#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the paddleflow REST API.
//!
//! Only the payloads the CLI interprets are typed here. Resource listings stay
//! as raw JSON objects because each group renders its own columns from them.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Successful `POST /login` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Token sent back on every authenticated request.
    pub authorization: String,
}

/// Error document returned by the service on non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Server-side request identifier, when echoed back.
    #[serde(rename = "requestID", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// Body of `POST /user`.
pub type UserCreateRequest = LoginRequest;

/// Body of `PUT /user/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordUpdateRequest {
    /// Replacement password.
    pub password: String,
}

/// Body of `PUT /run/{id}?action=stop`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunStopRequest {
    /// Stop the run without waiting for running steps to finish.
    pub stop_force: bool,
}

/// One page of a marker-paginated resource listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePage {
    /// Marker the page started from.
    pub marker: Option<String>,
    /// Whether more entries are available.
    pub truncated: bool,
    /// Marker to request the next page with.
    pub next_marker: Option<String>,
    /// Raw resource objects.
    pub items: Vec<Value>,
}

impl ResourcePage {
    /// Extract a page from a listing response whose entries live under
    /// `list_field` (e.g. `queueList`). A missing or `null` list reads as an
    /// empty page; a non-array list yields `None`.
    #[must_use]
    pub fn from_value(value: &Value, list_field: &str) -> Option<Self> {
        let items = match value.get(list_field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => return None,
        };
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|marker| !marker.is_empty())
                .map(str::to_string)
        };
        Some(Self {
            marker: text("marker"),
            truncated: value
                .get("truncated")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            next_marker: text("nextMarker"),
            items,
        })
    }
}

/// Response of `GET /log/run/{runID}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunLogResponse {
    /// Run identifier.
    #[serde(rename = "runID")]
    pub run_id: String,
    /// Current run status.
    #[serde(default)]
    pub status: String,
    /// Number of submission loops the run went through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_loop_num: Option<i64>,
    /// Per-job log pages.
    #[serde(default)]
    pub run_log: Vec<JobLog>,
}

/// Log page for a single job of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobLog {
    /// Job identifier.
    #[serde(rename = "jobID", default)]
    pub job_id: String,
    /// Task identifier within the job.
    #[serde(rename = "taskID", default)]
    pub task_id: String,
    /// Whether another page of the log exists.
    #[serde(default)]
    pub has_next_page: bool,
    /// Whether this page was truncated.
    #[serde(default)]
    pub truncated: bool,
    /// Page number returned.
    #[serde(default)]
    pub page_no: i64,
    /// Page size used.
    #[serde(default)]
    pub page_size: i64,
    /// Log content.
    #[serde(default)]
    pub log_info: String,
    /// Additional status information.
    #[serde(default)]
    pub info: String,
}
