//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is missing or empty
    Empty { field: &'static str },

    /// Field is shorter than the minimum length
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match the expected format (e.g., numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be parsed into the expected shape
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::MalformedBody { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooShort {
            field: "password",
            min: 4,
        };
        assert_eq!(err.to_string(), "password must be at least 4 characters");

        let err = ValidationError::Empty { field: "username" };
        assert_eq!(err.to_string(), "username is required");
    }
}
