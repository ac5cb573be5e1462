use crate::{
    config::Config,
    error::{CliError, CliResult},
};
use geocql::prelude::Filter;

///
/// Context
/// Resolved configuration shared by every command.
///

pub struct Context {
    pub config: Config,
    pub debug: bool,
}

impl Context {
    pub const fn new(config: Config, debug: bool) -> Self {
        Self { config, debug }
    }

    pub fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            eprintln!("[debug] {}", s.as_ref());
        }
    }

    /// Compile CQL with the configured parse options.
    pub fn parse(&self, cql: &str) -> CliResult<Filter> {
        let filter =
            geocql::parse_with(cql, &self.config.parse).map_err(|e| CliError::cql(cql, e))?;
        self.debug_log(format!("parsed: {filter}"));

        Ok(filter)
    }
}
