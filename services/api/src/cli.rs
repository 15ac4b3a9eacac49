use crate::report::{run_check, run_cohort, run_drives, CheckArgs, CohortArgs, DrivesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_ai::config::AppConfig;
use placement_ai::error::AppError;
use placement_ai::telemetry;
use placement_ai::workflows::placement::BatchOptions;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Eligibility Service",
    about = "Evaluate student eligibility for campus recruitment drives",
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
    /// Explain one student's eligibility per rule, with suggestions
    Check(CheckArgs),
    /// Count eligible, partially eligible, and ineligible students for a drive
    Cohort(CohortArgs),
    /// Group the open drives for a student by eligibility
    Drives(DrivesArgs),
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
        Command::Check(args) => run_check(args, report_options()?),
        Command::Cohort(args) => run_cohort(args, report_options()?),
        Command::Drives(args) => run_drives(args, report_options()?),
    }
}

/// Report commands log to stderr so warnings never interleave with the report.
fn report_options() -> Result<BatchOptions, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;
    Ok(BatchOptions {
        parallel: config.evaluation.parallel,
    })
}
