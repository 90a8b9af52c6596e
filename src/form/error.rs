use thiserror::Error;

/// A validation failure attached to a single field.
///
/// `Display` yields the inline message shown beside the control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{message}")]
    Required { message: String },
    #[error("{message}")]
    Range { message: String },
}

impl FieldError {
    pub fn required(message: impl Into<String>) -> Self {
        FieldError::Required {
            message: message.into(),
        }
    }

    pub fn range(message: impl Into<String>) -> Self {
        FieldError::Range {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FieldError::Required { message } | FieldError::Range { message } => message,
        }
    }
}

/// A write through the store interface that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldWriteError {
    #[error(transparent)]
    Path(#[from] PathParseError),
    #[error("schedule slot {index} does not exist (schedule has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("{path}: expected {expected} value")]
    TypeMismatch { path: String, expected: &'static str },
    #[error("{path}: '{value}' is not one of the offered options")]
    InvalidOption { path: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("unknown field path '{0}'")]
    Unknown(String),
    #[error("invalid schedule index in '{0}'")]
    BadIndex(String),
}
