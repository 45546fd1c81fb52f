use std::str::FromStr;

use error_stack::ResultExt;
use kernel::KernelError;

use crate::error::ConvertError;

pub mod auth;
pub mod database;
pub mod error;

/// Reads a required setting from the environment or a `.env` file.
pub fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .attach_printable_lazy(|| format!("Missing environment variable: {key}"))
}

pub fn env_or<T>(key: &str, default: T) -> error_stack::Result<T, KernelError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match dotenvy::var(key) {
        Ok(value) => value
            .parse::<T>()
            .change_context(KernelError::Internal)
            .attach_printable_lazy(|| format!("Invalid value for {key}: {value}")),
        Err(_) => Ok(default),
    }
}
