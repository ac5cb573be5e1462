use crate::error::{CliError, CliResult};
use geocql::ParseOptions;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "geocql.toml";

///
/// Config
///
/// Contents of `geocql.toml`. Every section is optional.
///
/// ```toml
/// [records]
/// id_field = "fid"
/// geometry_field = "geom"
///
/// [parse]
/// max_depth = 32
///
/// [shell]
/// history_file = ".geocql_history"
/// history_size = 500
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub records: RecordConfig,
    pub parse: ParseOptions,
    pub shell: ShellConfig,
}

impl Config {
    /// Load an explicit config file, or `geocql.toml` when it exists.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::read(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|detail| CliError::ConfigParse {
            path: path.to_path_buf(),
            detail,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(content).map_err(|e| e.to_string())
    }
}

///
/// RecordConfig
/// How JSON-lines input maps onto records.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordConfig {
    /// Field holding the feature id used by `IN (...)` id filters.
    pub id_field: Option<String>,

    /// Field holding WKT text for the default geometry.
    pub geometry_field: Option<String>,
}

///
/// ShellConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
}

impl ShellConfig {
    pub const DEFAULT_HISTORY_SIZE: usize = 1000;
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            history_size: Self::DEFAULT_HISTORY_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("  \n").expect("parse"), Config::default());
    }

    #[test]
    fn sections_are_optional() {
        let config = Config::from_toml(
            r#"
            [records]
            geometry_field = "geom"
            "#,
        )
        .expect("parse");

        assert_eq!(config.records.geometry_field.as_deref(), Some("geom"));
        assert_eq!(config.records.id_field, None);
        assert_eq!(config.parse.max_depth, ParseOptions::DEFAULT_MAX_DEPTH);
        assert_eq!(config.shell.history_size, ShellConfig::DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn full_config_parses() {
        let config = Config::from_toml(
            r#"
            [records]
            id_field = "fid"
            geometry_field = "wkt"

            [parse]
            max_depth = 8

            [shell]
            history_file = ".geocql_history"
            history_size = 50
            "#,
        )
        .expect("parse");

        assert_eq!(config.records.id_field.as_deref(), Some("fid"));
        assert_eq!(config.parse.max_depth, 8);
        assert_eq!(
            config.shell.history_file.as_deref(),
            Some(Path::new(".geocql_history"))
        );
        assert_eq!(config.shell.history_size, 50);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("[records]\nid = \"fid\"\n").expect_err("unknown key");
        assert!(err.contains("id"));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let err = Config::load(Some(Path::new("/nonexistent/geocql.toml"))).expect_err("missing");
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }
}
