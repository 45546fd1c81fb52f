use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use application::transfer::MovieDto;
use kernel::KernelError;

use crate::controller::Exhaust;
use crate::error::ErrorStatus;
use crate::response::GenreResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: Uuid,
    title: String,
    genre: GenreResponse,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

impl From<MovieDto> for MovieResponse {
    fn from(value: MovieDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            genre: GenreResponse::from(value.genre),
            number_in_stock: value.number_in_stock,
            daily_rental_rate: value.daily_rental_rate,
        }
    }
}

impl IntoResponse for MovieResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct MoviePresenter;

impl Exhaust<MovieDto> for MoviePresenter {
    type To = MovieResponse;
    fn emit(&self, input: MovieDto) -> Self::To {
        MovieResponse::from(input)
    }
}

impl Exhaust<Option<MovieDto>> for MoviePresenter {
    type To = Result<MovieResponse, ErrorStatus>;
    fn emit(&self, input: Option<MovieDto>) -> Self::To {
        input.map(MovieResponse::from).ok_or_else(|| {
            KernelError::NotFound
                .with_message("The movie with the given ID was not found.")
                .into()
        })
    }
}

impl Exhaust<Vec<MovieDto>> for MoviePresenter {
    type To = axum::Json<Vec<MovieResponse>>;
    fn emit(&self, input: Vec<MovieDto>) -> Self::To {
        axum::Json::from(input.into_iter().map(MovieResponse::from).collect::<Vec<_>>())
    }
}
