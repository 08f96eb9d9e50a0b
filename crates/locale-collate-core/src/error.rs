use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    InvalidFormat(&'static str),
    OutOfMemory(&'static str),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn is_format(&self) -> bool {
        matches!(self, CoreError::InvalidFormat(_))
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidFormat(message) => write!(f, "invalid format: {message}"),
            CoreError::OutOfMemory(message) => write!(f, "out of memory: {message}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
