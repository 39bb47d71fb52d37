use clap::Parser;
use std::process;
use trip_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {error:#}");
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Trip Processor - NYC Taxi Data Cleaning and Loading");
    println!("===================================================");
    println!();
    println!("Clean NYC yellow taxi trip records from CSV, derive analytical");
    println!("features, and bulk-load the result into a queryable SQLite store.");
    println!();
    println!("USAGE:");
    println!("    trip-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Clean, enrich, and load trip data (main command)");
    println!("    validate    Dry-run validation of an input file, no outputs written");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Full pipeline with default output paths:");
    println!("    trip-processor process -i yellow_tripdata_2019-01.csv -z taxi_zone_lookup.csv");
    println!();
    println!("    # Custom database and batch size:");
    println!("    trip-processor process -i trips.csv -z zones.csv \\");
    println!("                           --database nyc_taxi.db --batch-size 5000");
    println!();
    println!("    # Check an input file before processing:");
    println!("    trip-processor validate -i yellow_tripdata_2019-01.csv --profile");
    println!();
    println!("For detailed help on any command, use:");
    println!("    trip-processor <COMMAND> --help");
}
