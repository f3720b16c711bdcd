//! Helpers shared by unit tests that talk to an `httpmock` server.

use std::time::Duration;

use anyhow::{Result, anyhow};
use httpmock::prelude::*;
use paddleflow_config::ServerEndpoint;
use serde_json::json;

use crate::client::{ClientOptions, HttpClient, PaddleflowClient, SessionContext};
use crate::output::OutputFormat;

pub(crate) const TOKEN: &str = "token-abc";

pub(crate) fn endpoint_for(server: &MockServer) -> Result<ServerEndpoint> {
    ServerEndpoint::new(&server.host(), server.port()).map_err(|err| anyhow!(err))
}

pub(crate) fn mock_login(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST).path("/api/paddleflow/v1/login");
        then.status(200).json_body(json!({"authorization": TOKEN}));
    });
}

pub(crate) async fn logged_in_client(server: &MockServer) -> Result<HttpClient> {
    let options = ClientOptions {
        timeout: Duration::from_secs(5),
        trace_id: "test-trace",
    };
    let mut client = HttpClient::new(&endpoint_for(server)?, &options)?;
    client.login("root", "paddleflow").await?;
    Ok(client)
}

/// Session backed by a real HTTP client that has logged in against `server`.
pub(crate) async fn session_for(server: &MockServer, output: OutputFormat) -> Result<SessionContext> {
    mock_login(server);
    let client = logged_in_client(server).await?;
    Ok(SessionContext::new(Box::new(client), output))
}
