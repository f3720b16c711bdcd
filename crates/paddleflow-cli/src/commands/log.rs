use anyhow::anyhow;
use clap::{Args, Subcommand};
use paddleflow_api_models::RunLogResponse;

use crate::client::{CliError, CliResult, SessionContext};
use crate::commands::resource::ResourceKind;
use crate::output::render_run_log;

const RUN_LOGS: ResourceKind = ResourceKind {
    noun: "run",
    path: "/log/run",
    list_field: "runLog",
    columns: &[],
};

#[derive(Subcommand, Debug)]
pub(crate) enum LogCommand {
    /// Show the logs of a run.
    Show(LogShowArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct LogShowArgs {
    /// Run identifier.
    pub(crate) run_id: String,
    /// Only this job of the run.
    #[arg(long)]
    pub(crate) jobid: Option<String>,
    /// Page number, starting at 1.
    #[arg(long)]
    pub(crate) pageno: Option<u32>,
    /// Lines per page.
    #[arg(long)]
    pub(crate) pagesize: Option<u32>,
    /// Read from the start (`begin`) or end (`end`) of the log file.
    #[arg(long)]
    pub(crate) logfileposition: Option<String>,
}

impl LogShowArgs {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(job_id) = self.jobid.as_deref().filter(|id| !id.is_empty()) {
            query.push(("jobID", job_id.to_string()));
        }
        if let Some(page_no) = self.pageno {
            query.push(("pageNo", page_no.to_string()));
        }
        if let Some(page_size) = self.pagesize {
            query.push(("pageSize", page_size.to_string()));
        }
        if let Some(position) = self.logfileposition.as_deref() {
            query.push(("logFilePosition", position.to_string()));
        }
        query
    }
}

impl LogCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::Show(_) => "show",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: LogCommand) -> CliResult<()> {
    match command {
        LogCommand::Show(args) => handle_show(session, args).await,
    }
}

async fn handle_show(session: &SessionContext, args: LogShowArgs) -> CliResult<()> {
    if let Some(position) = args.logfileposition.as_deref()
        && position != "begin"
        && position != "end"
    {
        return Err(CliError::validation(format!(
            "logfileposition must be 'begin' or 'end', got '{position}'"
        )));
    }
    let path = RUN_LOGS.item_path(&args.run_id)?;
    let body = session.client.get(&path, &args.query()).await?;
    let log: RunLogResponse = serde_json::from_value(body)
        .map_err(|err| CliError::failure(anyhow!("failed to parse run log: {err}")))?;
    render_run_log(&log, session.output)
}
