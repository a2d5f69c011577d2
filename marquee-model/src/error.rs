use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug)]
pub enum ModelError {
    InvalidId(String),
    UnknownVariant { kind: &'static str, value: String },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidId(msg) => write!(f, "invalid id: {msg}"),
            ModelError::UnknownVariant { kind, value } => {
                write!(f, "unknown {kind}: {value}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
