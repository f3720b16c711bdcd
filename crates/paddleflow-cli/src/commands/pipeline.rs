use clap::Subcommand;

use crate::client::{CliResult, SessionContext};
use crate::commands::resource::{
    ListArgs, ResourceKind, TargetArg, delete_resource, list_resources, show_resource,
};
use crate::output::Column;

pub(crate) const PIPELINES: ResourceKind = ResourceKind {
    noun: "pipeline",
    path: "/pipeline",
    list_field: "pipelineList",
    columns: &[
        Column::new("ID", "pipelineID"),
        Column::new("NAME", "name"),
        Column::new("USER", "username"),
        Column::new("DESC", "desc"),
        Column::new("UPDATED", "updateTime"),
    ],
};

#[derive(Subcommand, Debug)]
pub(crate) enum PipelineCommand {
    /// List pipelines.
    List(ListArgs),
    /// Show a pipeline and its versions.
    Show(TargetArg),
    /// Delete a pipeline.
    Delete(TargetArg),
}

impl PipelineCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Delete(_) => "delete",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: PipelineCommand) -> CliResult<()> {
    match command {
        PipelineCommand::List(args) => {
            list_resources(session, &PIPELINES, &args, Vec::new()).await
        }
        PipelineCommand::Show(target) => show_resource(session, &PIPELINES, &target).await,
        PipelineCommand::Delete(target) => delete_resource(session, &PIPELINES, &target).await,
    }
}
