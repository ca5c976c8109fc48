//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Model error: {0}")]
    Model(#[from] mailcraft_model::ModelError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),
}
