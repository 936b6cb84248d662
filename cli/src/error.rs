use command_config::ConfigError;
use std::fmt;

/// Main error type for the command-config CLI
#[derive(Debug)]
pub enum CliError {
    /// Errors raised by the config command itself
    Config(ConfigError),
    /// File I/O errors outside the config store
    Io(std::io::Error),
    /// Command registration or dispatch errors
    Command(String),
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "Configuration error: {err}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Command(msg) => write!(f, "Command error: {msg}"),
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(err) => Some(err),
            CliError::Io(err) => Some(err),
            CliError::Other(err) => Some(err.as_ref()),
            CliError::Command(_) => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(ConfigError::Io { .. }) => 3,
            CliError::Config(_) => 2,
            CliError::Io(_) => 3,
            CliError::Command(_) => 5,
            CliError::Other(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(err.into())
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
