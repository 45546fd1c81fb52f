use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use application::transfer::GenreDto;
use kernel::KernelError;

use crate::controller::Exhaust;
use crate::error::ErrorStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreResponse {
    id: Uuid,
    name: String,
}

impl From<GenreDto> for GenreResponse {
    fn from(value: GenreDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl IntoResponse for GenreResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct GenrePresenter;

impl Exhaust<GenreDto> for GenrePresenter {
    type To = GenreResponse;
    fn emit(&self, input: GenreDto) -> Self::To {
        GenreResponse::from(input)
    }
}

impl Exhaust<Option<GenreDto>> for GenrePresenter {
    type To = Result<GenreResponse, ErrorStatus>;
    fn emit(&self, input: Option<GenreDto>) -> Self::To {
        input.map(GenreResponse::from).ok_or_else(|| {
            KernelError::NotFound
                .with_message("The genre with the given ID was not found.")
                .into()
        })
    }
}

impl Exhaust<Vec<GenreDto>> for GenrePresenter {
    type To = axum::Json<Vec<GenreResponse>>;
    fn emit(&self, input: Vec<GenreDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(GenreResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}
