use std::fmt::Display;

use error_stack::{Context, Report};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    OutOfStock,
    AlreadyReturned,
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    /// Starts a report whose [`ErrorMessage`] is meant to be shown to the client.
    pub fn with_message(self, message: impl Into<String>) -> Report<KernelError> {
        Report::new(self).attach_printable(ErrorMessage::new(message))
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid input"),
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::Unauthorized => write!(f, "Access denied"),
            KernelError::Forbidden => write!(f, "Access denied"),
            KernelError::Conflict => write!(f, "Conflicting state"),
            KernelError::OutOfStock => write!(f, "Movie not in stock"),
            KernelError::AlreadyReturned => write!(f, "Rental already processed"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
