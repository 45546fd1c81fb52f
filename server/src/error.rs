use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_stack::Report;

use kernel::{ErrorMessage, KernelError};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let context = self.0.current_context();
        let status = match context {
            KernelError::Validation | KernelError::OutOfStock | KernelError::AlreadyReturned => {
                StatusCode::BAD_REQUEST
            }
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Unauthorized => StatusCode::UNAUTHORIZED,
            KernelError::Forbidden => StatusCode::FORBIDDEN,
            KernelError::Conflict | KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{status}: {context}");
        }
        let message = self
            .0
            .downcast_ref::<ErrorMessage>()
            .map(ToString::to_string)
            .unwrap_or_else(|| context.to_string());
        (status, message).into_response()
    }
}
