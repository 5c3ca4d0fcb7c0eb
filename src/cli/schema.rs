use error_stack::{Result, ResultExt};
use std::process::ExitCode;
use user_record::{config::Config, schema};

use super::CliError;

pub fn run(config: &Config) -> Result<ExitCode, CliError> {
    let schema = schema::schema();
    let output = if config.pretty {
        serde_json::to_string_pretty(schema)
    } else {
        serde_json::to_string(schema)
    };

    let output = output
        .change_context(CliError)
        .attach_printable("could not serialize schema")?;

    super::print_line(&output)?;
    Ok(ExitCode::SUCCESS)
}
