use clap::Parser;
use error_stack::{Result, ResultExt};
use std::fs;
use std::io::{self, Read, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use user_record::{config::Config, logging};

mod check;
mod normalize;
mod schema;

#[derive(Debug, Error)]
#[error("Failed to run user-record")]
pub struct CliError;

/// Command line options for user-record.
#[derive(Debug, Parser)]
#[command(
    about = "Validate and normalize JSON user records",
    version,
    author,
    long_about
)]
pub struct Cli {
    /// Pretty-print JSON output
    #[clap(long, global = true)]
    pub pretty: bool,
    /// Stop validating an input after this many errors
    #[clap(long, global = true)]
    pub max_errors: Option<NonZeroUsize>,
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Cli {
    pub fn run(self) -> Result<ExitCode, CliError> {
        let mut config = Config::load().change_context(CliError)?;
        self.override_config(&mut config);

        logging::init(&config.log).change_context(CliError)?;
        tracing::debug!(?config, "loaded configuration");

        match self.subcommand {
            Subcommand::Check(args) => self::check::run(&args, &config),
            Subcommand::Normalize(args) => self::normalize::run(&args, &config),
            Subcommand::Schema => self::schema::run(&config),
        }
    }

    fn override_config(&self, config: &mut Config) {
        // override configurations if set by the cli
        if self.pretty {
            config.pretty = true;
        }

        if let Some(max_errors) = self.max_errors {
            config.max_errors = Some(max_errors);
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Check(self::check::CheckCommand),
    Normalize(self::normalize::NormalizeCommand),
    /// Print the JSON Typedef schema of user records
    Schema,
}

/// Reads a whole input; `-` stands for stdin.
fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .change_context(CliError)
            .attach_printable("could not read from stdin")?;
        return Ok(buffer);
    }

    fs::read(path)
        .change_context(CliError)
        .attach_printable_lazy(|| format!("could not read {}", path.display()))
}

fn input_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".into()
    } else {
        path.display().to_string()
    }
}

fn stdin_path() -> PathBuf {
    PathBuf::from("-")
}

fn print_line(line: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")
        .change_context(CliError)
        .attach_printable("could not write to stdout")
}
