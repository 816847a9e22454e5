use thiserror::Error;
use serde::Serialize;

#[derive(Error, Debug, Serialize)]
pub enum AnsibleError {
    #[error("Failed to spawn {program}: {message}")]
    SpawnError { program: String, message: String },

    #[error("Command timed out after {0} ms")]
    TimedOut(u128),

    #[error("File operation failed: {0}")]
    FileOperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_yaml::Error> for AnsibleError {
    fn from(error: serde_yaml::Error) -> Self {
        AnsibleError::SerializationError(error.to_string())
    }
}

impl From<serde_json::Error> for AnsibleError {
    fn from(error: serde_json::Error) -> Self {
        AnsibleError::SerializationError(error.to_string())
    }
}
