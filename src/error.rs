//! Error types for zfstools operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZfsToolsError>;

#[derive(Error, Debug)]
pub enum ZfsToolsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset {dataset} does not exist")]
    DatasetNotFound { dataset: String },

    #[error("zfs command failed ({command}): {message}")]
    ZfsCommand { command: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("String conversion error: {0}")]
    StringConversion(#[from] std::string::FromUtf8Error),
}

impl ZfsToolsError {
    pub fn dataset_not_found(dataset: impl Into<String>) -> Self {
        Self::DatasetNotFound {
            dataset: dataset.into(),
        }
    }

    pub fn zfs_command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ZfsCommand {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
