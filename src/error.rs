use thiserror::Error;

#[derive(Debug, Error)]
pub enum HppError {
    #[error("Recipe name must not be empty")]
    EmptyRecipeName,

    #[error("Recipe not found: {0}")]
    RecipeNotFound(u64),

    #[error("Row not found: {0}")]
    RowNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, HppError>;
