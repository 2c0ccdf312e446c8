use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Please select a folder first.")]
    MissingRoot,

    #[error("No {0} file found in the selected directory.")]
    NoKeysFile(String),

    #[error("{0} not found in the selected directory or its subdirectories.")]
    NoExecutable(String),

    #[error("No script files found. Generate scripts first or select a folder with existing scripts.")]
    NoScripts,

    #[error("Video file for {prefix} {index} not found")]
    UnmatchedJob { prefix: String, index: usize },

    #[error("Error writing file {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error opening {}: {reason}", .path.display())]
    LaunchFailure { path: PathBuf, reason: String },

    #[error("Error arranging window {index}: {reason}")]
    ArrangeFailure { index: usize, reason: String },

    #[error("Unable to list windows: {0}")]
    WindowList(String),
}

impl Error {
    /// Precondition errors abort the whole operation; everything else is
    /// reported per item.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::MissingRoot | Error::NoKeysFile(_) | Error::NoExecutable(_) | Error::NoScripts
        )
    }
}
