use clap::Parser;
use error_stack::{Result, ResultExt};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use user_record::{config::Config, schema::Validator};

use super::CliError;

/// Validate JSON inputs against the user schema, printing one
/// portable error per line
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Files to validate, `-` for stdin (the default)
    pub files: Vec<PathBuf>,
}

pub fn run(args: &CheckCommand, config: &Config) -> Result<ExitCode, CliError> {
    let validator = Validator::new().max_errors(config.max_errors);
    let files = if args.files.is_empty() {
        vec![super::stdin_path()]
    } else {
        args.files.clone()
    };

    let mut failed = false;
    for path in &files {
        let name = super::input_name(path);
        let instance = super::read_input(path).and_then(|bytes| {
            serde_json::from_slice::<Value>(&bytes)
                .change_context(CliError)
                .attach_printable_lazy(|| format!("{name} is not valid JSON"))
        });

        let instance = match instance {
            Ok(instance) => instance,
            Err(report) => {
                eprintln!("{report:?}");
                failed = true;
                continue;
            },
        };

        let errors = validator.validate(&instance);
        if errors.is_empty() {
            tracing::info!(input = %name, "input is valid");
            continue;
        }

        tracing::warn!(input = %name, errors = errors.len(), "input is invalid");
        failed = true;
        for error in &errors {
            let line = serde_json::to_string(error)
                .change_context(CliError)
                .attach_printable("could not serialize validation error")?;
            super::print_line(&line)?;
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
