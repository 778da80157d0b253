use clap::Parser;
use sparkify_etl::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is given
fn show_help_and_commands() {
    println!("Sparkify ETL - song and log data loader");
    println!("=======================================");
    println!();
    println!("Load Sparkify song-catalog and listening-log NDJSON data into a");
    println!("relational star schema, with bulk staging loads and row-count");
    println!("reconciliation checks.");
    println!();
    println!("USAGE:");
    println!("    sparkify-etl <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    init-db     Drop and recreate the destination schema");
    println!("    run         Run the full ETL pipeline (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Bootstrap the schema, then run with default paths:");
    println!("    sparkify-etl init-db");
    println!("    sparkify-etl run");
    println!();
    println!("    # Run with custom corpus and database locations:");
    println!("    sparkify-etl run --song-data data/song_data --log-data data/log_data \\");
    println!("                     --database sparkify.db");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sparkify-etl <COMMAND> --help");
}
