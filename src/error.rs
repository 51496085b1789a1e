use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal pipeline failures. Malformed data lines are never errors: both
/// stages silently skip them and keep going (the stage stats record how
/// many). The only conditions that abort a run are I/O failures on the
/// underlying streams and unusable command-line arguments.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stats serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
