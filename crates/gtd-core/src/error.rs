use thiserror::Error;

#[derive(Debug, Error)]
pub enum GtdError {
    #[error("not initialized: run 'gtd init'")]
    NotInitialized,

    #[error("{0}")]
    EntityNotFound(String),

    #[error("rule violation: {0}")]
    RuleViolation(String),

    #[error("store error: {0}")]
    Store(String),

    #[error(
        "database {} is held by another gtd process; stop `gtd serve` or make changes through its HTTP API",
        .0.display()
    )]
    StoreLocked(std::path::PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GtdError>;
