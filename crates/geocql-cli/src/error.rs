use rustyline::error::ReadlineError;
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

pub type CliResult<T> = Result<T, CliError>;

///
/// CliError
///
/// Everything the CLI can fail with. Filter syntax failures keep the
/// source text so they can be rendered with a caret under the offset.
///

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("{}", render_syntax(.text, .error))]
    Cql { text: String, error: geocql::Error },

    #[error("input line {line}: {message}")]
    Input { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

impl CliError {
    pub fn cql(text: &str, error: geocql::Error) -> Self {
        Self::Cql {
            text: text.to_string(),
            error,
        }
    }

    pub fn input(line: usize, message: impl Into<String>) -> Self {
        Self::Input {
            line,
            message: message.into(),
        }
    }
}

/// Render a filter error as the message plus the source with a caret
/// under the failing offset.
pub fn render_syntax(source: &str, error: &geocql::Error) -> String {
    let Some(offset) = error.offset() else {
        return error.to_string();
    };

    // offsets are byte positions; the caret is placed by character
    let column = source
        .char_indices()
        .take_while(|(i, _)| *i < offset)
        .count();

    format!("{error}\n  {source}\n  {}^", " ".repeat(column))
}
