use thiserror::Error;

/// Errors raised while building or loading template data
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("Invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
}
