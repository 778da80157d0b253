//! Command implementations for the Sparkify ETL CLI.

use crate::app::models::RunStats;
use crate::cli::args::{Args, Commands, InitDbArgs, RunArgs};
use crate::db::queries::StatementRegistry;
use crate::db::{self, schema};
use crate::error::Result;
use crate::pipeline::Pipeline;
use colored::*;
use tracing::{debug, info};

/// Main command runner: dispatches to the subcommand handlers.
pub fn run(args: Args) -> Result<RunStats> {
    match args.get_command() {
        Commands::Run(run_args) => run_pipeline(run_args),
        Commands::InitDb(init_args) => run_init_db(init_args),
    }
}

/// Execute the full ETL pipeline.
fn run_pipeline(args: RunArgs) -> Result<RunStats> {
    setup_logging(args.get_log_level());
    info!("Starting Sparkify ETL");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = args.to_config();
    let mut pipeline = Pipeline::new(config)?;
    pipeline.run()
}

/// Drop and recreate the destination schema, and make sure the staging
/// directory exists.
fn run_init_db(args: InitDbArgs) -> Result<RunStats> {
    setup_logging(args.get_log_level());

    let conn = db::connect(&args.database)?;
    let registry = StatementRegistry::new();
    schema::drop_schema(&conn, &registry)?;
    schema::create_schema(&conn, &registry)?;
    println!(
        "{} {}",
        "Schema created in".bright_green(),
        args.database.display()
    );

    if !args.staging_dir.is_dir() {
        std::fs::create_dir_all(&args.staging_dir)?;
        println!(
            "{} {}",
            "Staging directory created at".bright_green(),
            args.staging_dir.display()
        );
    }

    Ok(RunStats::default())
}

/// Initialize the tracing subscriber from the CLI verbosity.
fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sparkify_etl={log_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
