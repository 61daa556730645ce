use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Day not found in plan: {0}")]
    DayNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No recipes available for {0}")]
    NoRecipesAvailable(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
