use clap::Parser;
use error_stack::{Result, ResultExt};
use std::path::PathBuf;
use std::process::ExitCode;
use user_record::{config::Config, types::User};

use super::CliError;

/// Read a user record and print it back in canonical form
#[derive(Debug, Parser)]
pub struct NormalizeCommand {
    /// File to read, `-` for stdin (the default)
    pub file: Option<PathBuf>,
}

pub fn run(args: &NormalizeCommand, config: &Config) -> Result<ExitCode, CliError> {
    let path = args.file.clone().unwrap_or_else(super::stdin_path);
    let name = super::input_name(&path);
    let bytes = super::read_input(&path)?;

    let user = User::from_slice(&bytes)
        .change_context(CliError)
        .attach_printable_lazy(|| format!("in {name}"))?;

    tracing::debug!(input = %name, id = ?user.id, "normalized user record");
    if config.pretty {
        super::print_line(&user.to_json_pretty())?;
    } else {
        super::print_line(&user.to_json())?;
    }

    Ok(ExitCode::SUCCESS)
}
