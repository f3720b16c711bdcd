//! Argument parsing, session bootstrap, and command dispatch.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use paddleflow_config::{ServerEndpoint, load_config, resolve_config_path};
use paddleflow_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::client::{
    CliResult, ClientOptions, EXIT_FAILURE, HttpClient, PaddleflowClient, SessionContext,
};
use crate::commands::{self, cluster, flavour, fs, log, pipeline, queue, user};
use crate::output::OutputFormat;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(
    name = "paddleflow",
    version,
    about = "Command-line client for the paddleflow service",
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) global: GlobalArgs,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GlobalArgs {
    /// Config file to read instead of `$HOME/.paddleflow/config`.
    #[arg(
        long = "pf_config",
        global = true,
        env = "PADDLEFLOW_PF_CONFIG",
        value_name = "PATH"
    )]
    pub(crate) pf_config: Option<PathBuf>,
    #[arg(
        long = "output",
        global = true,
        value_enum,
        env = "PADDLEFLOW_OUTPUT",
        default_value_t = OutputFormat::default(),
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    /// Per-request HTTP timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "PADDLEFLOW_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    /// Log filter directive; `RUST_LOG` takes precedence.
    #[arg(
        long,
        global = true,
        env = "PADDLEFLOW_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    /// Log line format: plain, pretty, or json.
    #[arg(
        long,
        global = true,
        env = "PADDLEFLOW_LOG_FORMAT",
        default_value_t = LogFormat::default()
    )]
    pub(crate) log_format: LogFormat,
}

/// The command registry: one variant per subcommand group.
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Manage user accounts.
    #[command(subcommand)]
    User(user::UserCommand),
    /// Manage queues.
    #[command(subcommand)]
    Queue(queue::QueueCommand),
    /// Manage shared file systems.
    #[command(subcommand)]
    Fs(fs::FsCommand),
    /// Manage workflow runs.
    #[command(subcommand)]
    Run(commands::run::RunCommand),
    /// Manage pipelines.
    #[command(subcommand)]
    Pipeline(pipeline::PipelineCommand),
    /// Manage clusters.
    #[command(subcommand)]
    Cluster(cluster::ClusterCommand),
    /// Manage resource flavours.
    #[command(subcommand)]
    Flavour(flavour::FlavourCommand),
    /// Read run logs.
    #[command(subcommand)]
    Log(log::LogCommand),
}

/// Parses the process arguments, executes the requested command, and returns
/// the process exit code.
pub async fn run() -> i32 {
    let home = env::var_os("HOME").map(PathBuf::from);
    run_from(env::args_os(), home.as_deref()).await
}

/// Like [`run`], with explicit arguments (including the program name) and
/// home directory.
pub async fn run_from<I, T>(args: I, home: Option<&Path>) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(&err),
    };

    let logging = LoggingConfig {
        level: &cli.global.log_level,
        format: cli.global.log_format,
    };
    if let Err(err) = init_logging(&logging) {
        warn!(error = %err, "keeping previously installed logging");
    }

    execute(cli, home).await
}

fn report_parse_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            print!("{}", err.render());
            0
        }
        _ => {
            let _ = err.print();
            EXIT_FAILURE
        }
    }
}

async fn execute(cli: Cli, home: Option<&Path>) -> i32 {
    let Cli { global, command } = cli;
    let (group, operation) = command_label(&command);
    let trace_id = Uuid::new_v4().to_string();
    let span = info_span!("command", group, operation, trace_id = %trace_id);

    let result = async {
        let session = bootstrap(&global, home, &trace_id, HttpClient::new).await?;
        dispatch(&session, command).await
    }
    .instrument(span)
    .await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

/// Load the config, log in, and build the session every handler runs against.
pub(crate) async fn bootstrap<C, F>(
    global: &GlobalArgs,
    home: Option<&Path>,
    trace_id: &str,
    connect: F,
) -> CliResult<SessionContext>
where
    C: PaddleflowClient + 'static,
    F: FnOnce(&ServerEndpoint, &ClientOptions<'_>) -> CliResult<C>,
{
    let path = resolve_config_path(global.pf_config.as_deref(), home)?;
    let config = load_config(&path)?;

    let options = ClientOptions {
        timeout: Duration::from_secs(global.timeout),
        trace_id,
    };
    let mut client = connect(&config.server, &options)?;
    client
        .login(&config.credentials.name, &config.credentials.password)
        .await?;
    debug!(
        user = %config.credentials.name,
        server = %config.server.base_url,
        "session established"
    );

    Ok(SessionContext::new(Box::new(client), global.output))
}

async fn dispatch(session: &SessionContext, command: Command) -> CliResult<()> {
    match command {
        Command::User(command) => user::handle(session, command).await,
        Command::Queue(command) => queue::handle(session, command).await,
        Command::Fs(command) => fs::handle(session, command).await,
        Command::Run(command) => commands::run::handle(session, command).await,
        Command::Pipeline(command) => pipeline::handle(session, command).await,
        Command::Cluster(command) => cluster::handle(session, command).await,
        Command::Flavour(command) => flavour::handle(session, command).await,
        Command::Log(command) => log::handle(session, command).await,
    }
}

const fn command_label(command: &Command) -> (&'static str, &'static str) {
    match command {
        Command::User(command) => ("user", command.label()),
        Command::Queue(command) => ("queue", command.label()),
        Command::Fs(command) => ("fs", command.label()),
        Command::Run(command) => ("run", command.label()),
        Command::Pipeline(command) => ("pipeline", command.label()),
        Command::Cluster(command) => ("cluster", command.label()),
        Command::Flavour(command) => ("flavour", command.label()),
        Command::Log(command) => ("log", command.label()),
    }
}
