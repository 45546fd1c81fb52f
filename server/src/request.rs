use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use error_stack::Report;
use uuid::Uuid;

use kernel::KernelError;

use crate::error::ErrorStatus;

pub use self::{customer::*, genre::*, movie::*, rental::*, user::*};

mod customer;
mod genre;
mod movie;
mod rental;
mod user;

/// JSON body whose rejections answer with `400` and a plain-text reason.
pub struct Payload<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| KernelError::Validation.with_message(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Ids in paths that do not parse point at nothing.
fn parse_path_id(id: &str, entity: &str) -> Result<Uuid, Report<KernelError>> {
    Uuid::parse_str(id).map_err(|_| {
        KernelError::NotFound.with_message(format!("The {entity} with the given ID was not found."))
    })
}

/// Body ids have already passed validation.
fn parse_body_id(id: &str) -> Result<Uuid, Report<KernelError>> {
    Uuid::parse_str(id).map_err(|_| KernelError::Validation.with_message("Invalid id."))
}
