use clap::{Args, Subcommand};

use crate::client::{CliResult, SessionContext};
use crate::commands::resource::{
    ListArgs, ResourceKind, TargetArg, delete_resource, list_resources, show_resource,
};
use crate::output::Column;

pub(crate) const FILESYSTEMS: ResourceKind = ResourceKind {
    noun: "fs",
    path: "/fs",
    list_field: "fsList",
    columns: &[
        Column::new("NAME", "name"),
        Column::new("OWNER", "username"),
        Column::new("TYPE", "type"),
        Column::new("SERVER", "serverAddress"),
        Column::new("SUBPATH", "subPath"),
    ],
};

#[derive(Subcommand, Debug)]
pub(crate) enum FsCommand {
    /// List file systems.
    List(FsListArgs),
    /// Show one file system.
    Show(TargetArg),
    /// Delete a file system.
    Delete(TargetArg),
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FsListArgs {
    #[command(flatten)]
    pub(crate) paging: ListArgs,
    /// List the file systems of another user (root only).
    #[arg(long)]
    pub(crate) username: Option<String>,
}

impl FsCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Delete(_) => "delete",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: FsCommand) -> CliResult<()> {
    match command {
        FsCommand::List(args) => {
            let filters = args
                .username
                .filter(|name| !name.trim().is_empty())
                .map(|name| vec![("username", name)])
                .unwrap_or_default();
            list_resources(session, &FILESYSTEMS, &args.paging, filters).await
        }
        FsCommand::Show(target) => show_resource(session, &FILESYSTEMS, &target).await,
        FsCommand::Delete(target) => delete_resource(session, &FILESYSTEMS, &target).await,
    }
}
