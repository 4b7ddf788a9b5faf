use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse dashboard config JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Could not run command `{command}`: {source}")]
    CommandLaunchError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command} (exit status {status:?})\n{stderr}")]
    CommandFailedError { command: String, status: Option<i32>, stderr: String },

    #[error("Invalid dashboard configuration: {0}")]
    ConfigError(String),
}

impl Error {
    /// True when the error comes from running one of the external status tools.
    pub fn is_acquisition(&self) -> bool {
        matches!(self, Error::CommandLaunchError { .. } | Error::CommandFailedError { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
