use locale_collate_core::{Category, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Format(#[from] CoreError),
    #[error("no {category} data for locale {name}")]
    NotFound { category: Category, name: String },
    #[error("collation tables are not loaded")]
    Disabled,
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl RuntimeError {
    pub fn is_format(&self) -> bool {
        matches!(self, RuntimeError::Format(CoreError::InvalidFormat(_)))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RuntimeError::NotFound { .. })
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, RuntimeError::Format(CoreError::OutOfMemory(_)))
    }
}
