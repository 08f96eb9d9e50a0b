use locale_collate_core::CoreError;
use locale_collate_runtime::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("collation is disabled for locale {0}")]
    Disabled(String),
}

impl CliAppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliAppError::Usage(_) => 2,
            _ => 1,
        }
    }
}
