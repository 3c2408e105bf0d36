//! All error types for the langtool crate.
//!
//! These are returned from all fallible operations (parsing, serialization, export, import).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{format} parse error at line {line}: {message}")]
    Parse {
        format: &'static str,
        line: usize,
        message: String,
    },

    #[error("PO catalog error: {0}")]
    Po(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("unsupported language `{0}`")]
    UnsupportedLanguage(String),

    #[error("missing translation for `{key}` in language `{language}`")]
    MissingTranslation { language: String, key: String },

    #[error("external command failed: {command} (exit={exit_code})")]
    ExternalTool { command: String, exit_code: i32 },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new parse error for the given format and 1-based line number.
    pub fn parse_error(format: &'static str, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            format,
            line,
            message: message.into(),
        }
    }

    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Process exit code to use when this error terminates a run.
    ///
    /// A failing external tool propagates its own exit code; everything else exits with 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ExternalTool { exit_code, .. } => *exit_code,
            _ => 1,
        }
    }
}
