use error_stack::Result;
use serde::Deserialize;
use std::num::NonZeroUsize;
use thiserror::Error;

use crate::util::figment::FigmentResultExt;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;

/// Settings of the `user-record` command line tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Stop validating an input after this many errors.
    pub max_errors: Option<NonZeroUsize>,
    /// Logging filter directives, ignored if `RUST_LOG` is set.
    pub log: String,
}

impl Config {
    const DEFAULT_CONFIG_FILE: &'static str = "user-record.toml";
    const ENV_PREFIX: &'static str = "USER_RECORD_";

    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Self::from_figment(&Self::figment())
    }

    pub(crate) fn from_figment(figment: &figment::Figment) -> Result<Self, ParseError> {
        figment.extract::<Self>().into_report(ParseError)
    }

    /// Creates a default [`Figment`] object to load the configuration
    /// from `user-record.toml` then `USER_RECORD_*` variables.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }
}
