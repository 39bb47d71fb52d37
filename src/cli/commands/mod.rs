//! Command implementations for the trip processor CLI
//!
//! Each subcommand lives in its own module; `run` dispatches based on the
//! parsed arguments.

pub mod process;
pub mod shared;
pub mod validate;

pub use process::ProcessingSummary;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch the parsed command line to its implementation
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Process(process_args)) => {
            process::run_process(process_args)?;
            Ok(())
        }
        Some(Commands::Validate(validate_args)) => {
            validate::run_validate(validate_args)?;
            Ok(())
        }
        None => Err(Error::configuration("No command specified".to_string())),
    }
}
