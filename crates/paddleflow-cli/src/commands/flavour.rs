use clap::Subcommand;

use crate::client::{CliResult, SessionContext};
use crate::commands::resource::{
    ListArgs, ResourceKind, TargetArg, delete_resource, list_resources, show_resource,
};
use crate::output::Column;

pub(crate) const FLAVOURS: ResourceKind = ResourceKind {
    noun: "flavour",
    path: "/flavour",
    list_field: "flavourList",
    columns: &[
        Column::new("NAME", "name"),
        Column::new("CPU", "cpu"),
        Column::new("MEM", "mem"),
        Column::new("CLUSTER", "clusterName"),
    ],
};

#[derive(Subcommand, Debug)]
pub(crate) enum FlavourCommand {
    /// List flavours.
    List(ListArgs),
    /// Show one flavour.
    Show(TargetArg),
    /// Delete a flavour.
    Delete(TargetArg),
}

impl FlavourCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Delete(_) => "delete",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: FlavourCommand) -> CliResult<()> {
    match command {
        FlavourCommand::List(args) => list_resources(session, &FLAVOURS, &args, Vec::new()).await,
        FlavourCommand::Show(target) => show_resource(session, &FLAVOURS, &target).await,
        FlavourCommand::Delete(target) => delete_resource(session, &FLAVOURS, &target).await,
    }
}
