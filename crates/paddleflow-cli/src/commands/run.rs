//! Workflow run operations.

use clap::{Args, Subcommand};
use paddleflow_api_models::RunStopRequest;
use serde_json::Value;

use crate::client::{CliError, CliResult, SessionContext};
use crate::commands::resource::{
    ListArgs, ResourceKind, TargetArg, delete_resource, list_resources, show_resource,
};
use crate::output::{Column, render_ack};

pub(crate) const RUNS: ResourceKind = ResourceKind {
    noun: "run",
    path: "/run",
    list_field: "runList",
    columns: &[
        Column::new("ID", "runID"),
        Column::new("NAME", "name"),
        Column::new("USER", "username"),
        Column::new("FS", "fsName"),
        Column::new("STATUS", "status"),
        Column::new("CREATED", "createTime"),
    ],
};

#[derive(Subcommand, Debug)]
pub(crate) enum RunCommand {
    /// List runs.
    List(RunListArgs),
    /// Show one run.
    Show(TargetArg),
    /// Stop a run.
    Stop(RunStopArgs),
    /// Retry a failed or terminated run.
    Retry(TargetArg),
    /// Delete a run.
    Delete(TargetArg),
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct RunListArgs {
    #[command(flatten)]
    pub(crate) paging: ListArgs,
    /// Only runs on these file systems (comma separated).
    #[arg(long)]
    pub(crate) fsname: Option<String>,
    /// Only runs of these users (comma separated).
    #[arg(long)]
    pub(crate) username: Option<String>,
    /// Only these run ids (comma separated).
    #[arg(long)]
    pub(crate) runid: Option<String>,
    /// Only runs with these names (comma separated).
    #[arg(long)]
    pub(crate) name: Option<String>,
}

impl RunListArgs {
    fn filters(&self) -> Vec<(&'static str, String)> {
        [
            ("fsname", &self.fsname),
            ("username", &self.username),
            ("runFilter", &self.runid),
            ("name", &self.name),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| (key, value.to_string()))
        })
        .collect()
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RunStopArgs {
    #[command(flatten)]
    pub(crate) target: TargetArg,
    /// Stop without waiting for running steps.
    #[arg(long, short = 'f')]
    pub(crate) force: bool,
}

impl RunCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Stop(_) => "stop",
            Self::Retry(_) => "retry",
            Self::Delete(_) => "delete",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: RunCommand) -> CliResult<()> {
    match command {
        RunCommand::List(args) => {
            list_resources(session, &RUNS, &args.paging, args.filters()).await
        }
        RunCommand::Show(target) => show_resource(session, &RUNS, &target).await,
        RunCommand::Stop(args) => handle_stop(session, args).await,
        RunCommand::Retry(target) => handle_retry(session, target).await,
        RunCommand::Delete(target) => delete_resource(session, &RUNS, &target).await,
    }
}

async fn handle_stop(session: &SessionContext, args: RunStopArgs) -> CliResult<()> {
    let path = RUNS.item_path(&args.target.id)?;
    let body = serde_json::to_value(RunStopRequest {
        stop_force: args.force,
    })
    .map_err(|err| CliError::failure(anyhow::anyhow!("failed to encode stop request: {err}")))?;
    session
        .client
        .put(&path, &[("action", "stop".to_string())], Some(&body))
        .await?;
    render_ack(&format!("run {} stopping", args.target.id.trim()));
    Ok(())
}

async fn handle_retry(session: &SessionContext, target: TargetArg) -> CliResult<()> {
    let path = RUNS.item_path(&target.id)?;
    let response = session
        .client
        .put(&path, &[("action", "retry".to_string())], None)
        .await?;
    match response.get("runID").and_then(Value::as_str) {
        Some(new_id) => render_ack(&format!("run {} retried as {new_id}", target.id.trim())),
        None => render_ack(&format!("run {} retried", target.id.trim())),
    }
    Ok(())
}
