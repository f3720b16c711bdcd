use clap::Subcommand;

use crate::client::{CliResult, SessionContext};
use crate::commands::resource::{
    ListArgs, ResourceKind, TargetArg, delete_resource, list_resources, show_resource,
};
use crate::output::Column;

pub(crate) const QUEUES: ResourceKind = ResourceKind {
    noun: "queue",
    path: "/queue",
    list_field: "queueList",
    columns: &[
        Column::new("NAME", "name"),
        Column::new("NAMESPACE", "namespace"),
        Column::new("CLUSTER", "clusterName"),
        Column::new("STATUS", "status"),
        Column::new("CREATED", "createTime"),
    ],
};

#[derive(Subcommand, Debug)]
pub(crate) enum QueueCommand {
    /// List queues.
    List(ListArgs),
    /// Show one queue.
    Show(TargetArg),
    /// Delete a queue.
    Delete(TargetArg),
}

impl QueueCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Delete(_) => "delete",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: QueueCommand) -> CliResult<()> {
    match command {
        QueueCommand::List(args) => list_resources(session, &QUEUES, &args, Vec::new()).await,
        QueueCommand::Show(target) => show_resource(session, &QUEUES, &target).await,
        QueueCommand::Delete(target) => delete_resource(session, &QUEUES, &target).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CliError, HEADER_AUTHORIZATION};
    use crate::output::OutputFormat;
    use crate::test_support::{TOKEN, session_for};
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_sends_token_and_paging_params() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/paddleflow/v1/queue")
                .header(HEADER_AUTHORIZATION, TOKEN)
                .query_param("maxKeys", "10")
                .query_param("marker", "abc");
            then.status(200).json_body(json!({
                "marker": "abc",
                "truncated": false,
                "queueList": [{"name": "default-queue", "status": "open"}]
            }));
        });
        let session = session_for(&server, OutputFormat::Table).await?;

        handle(
            &session,
            QueueCommand::List(ListArgs {
                maxkeys: Some(10),
                marker: Some("abc".to_string()),
            }),
        )
        .await?;

        list.assert();
        Ok(())
    }

    #[tokio::test]
    async fn show_surfaces_not_found() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/paddleflow/v1/queue/gpu");
            then.status(404).json_body(json!({
                "code": "QueueNotFound",
                "message": "queue gpu not found"
            }));
        });
        let session = session_for(&server, OutputFormat::Json).await?;

        let err = handle(&session, QueueCommand::Show(TargetArg { id: "gpu".into() }))
            .await
            .err();
        assert!(matches!(err, Some(CliError::Failure(_))));
        Ok(())
    }
}
