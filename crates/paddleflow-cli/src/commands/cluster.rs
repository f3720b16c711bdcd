use clap::Subcommand;

use crate::client::{CliResult, SessionContext};
use crate::commands::resource::{
    ListArgs, ResourceKind, TargetArg, delete_resource, list_resources, show_resource,
};
use crate::output::Column;

pub(crate) const CLUSTERS: ResourceKind = ResourceKind {
    noun: "cluster",
    path: "/cluster",
    list_field: "clusterList",
    columns: &[
        Column::new("NAME", "clusterName"),
        Column::new("TYPE", "clusterType"),
        Column::new("STATUS", "status"),
        Column::new("CREATED", "createTime"),
    ],
};

#[derive(Subcommand, Debug)]
pub(crate) enum ClusterCommand {
    /// List clusters (root only).
    List(ListArgs),
    /// Show one cluster.
    Show(TargetArg),
    /// Delete a cluster.
    Delete(TargetArg),
}

impl ClusterCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Delete(_) => "delete",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: ClusterCommand) -> CliResult<()> {
    match command {
        ClusterCommand::List(args) => list_resources(session, &CLUSTERS, &args, Vec::new()).await,
        ClusterCommand::Show(target) => show_resource(session, &CLUSTERS, &target).await,
        ClusterCommand::Delete(target) => delete_resource(session, &CLUSTERS, &target).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CliError;
    use crate::output::OutputFormat;
    use crate::test_support::session_for;
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_renders_cluster_page() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/paddleflow/v1/cluster");
            then.status(200).json_body(json!({
                "truncated": true,
                "nextMarker": "next-1",
                "clusterList": [{"clusterName": "default-cluster", "clusterType": "kubernetes"}]
            }));
        });
        let session = session_for(&server, OutputFormat::Table).await?;

        handle(&session, ClusterCommand::List(ListArgs::default())).await?;
        list.assert();
        Ok(())
    }

    #[tokio::test]
    async fn forbidden_delete_is_a_failure() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/api/paddleflow/v1/cluster/c1");
            then.status(403).json_body(json!({
                "code": "AccessDenied",
                "message": "only root is allowed"
            }));
        });
        let session = session_for(&server, OutputFormat::Table).await?;

        let err = handle(&session, ClusterCommand::Delete(TargetArg { id: "c1".into() }))
            .await
            .err();
        let Some(err) = err else {
            return Err(anyhow::anyhow!("delete should fail"));
        };
        assert!(matches!(err, CliError::Failure(_)));
        assert_eq!(
            err.display_message(),
            "only root is allowed (code AccessDenied, status 403)"
        );
        Ok(())
    }
}
