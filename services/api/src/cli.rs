use crate::commands::{run_batch, run_evaluate, run_schema, BatchArgs, EvaluateArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sme_underwriting::config::AppConfig;
use sme_underwriting::error::AppError;
use sme_underwriting::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "SME Underwriting",
    about = "Run the SME loan decisioning service or evaluate applications from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single application described by flags
    Evaluate(EvaluateArgs),
    /// Evaluate every application in a CSV export
    Batch(BatchArgs),
    /// Print the underwriter narrative schema as JSON
    Schema,
    /// Walk sample applications through the engine and the narrative loop
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args, &prepare()?),
        Command::Batch(args) => run_batch(args, &prepare()?),
        Command::Schema => run_schema(),
        Command::Demo(args) => run_demo(args, &prepare()?).await,
    }
}

/// Loads configuration and installs the subscriber for one-shot commands. `serve` does its own
/// setup after applying host and port overrides.
fn prepare() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}
