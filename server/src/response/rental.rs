use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{RentalCustomerDto, RentalDto, RentalMovieDto};
use kernel::KernelError;

use crate::controller::Exhaust;
use crate::error::ErrorStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalMovieResponse {
    id: Uuid,
    title: String,
    daily_rental_rate: i32,
}

impl From<RentalMovieDto> for RentalMovieResponse {
    fn from(value: RentalMovieDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            daily_rental_rate: value.daily_rental_rate,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCustomerResponse {
    id: Uuid,
    name: String,
    phone: String,
    is_gold: bool,
}

impl From<RentalCustomerDto> for RentalCustomerResponse {
    fn from(value: RentalCustomerDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
            is_gold: value.is_gold,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: Uuid,
    customer: RentalCustomerResponse,
    movie: RentalMovieResponse,
    #[serde(with = "time::serde::rfc3339")]
    date_out: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<i64>,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            customer: RentalCustomerResponse::from(value.customer),
            movie: RentalMovieResponse::from(value.movie),
            date_out: value.date_out,
            date_returned: value.date_returned,
            rental_fee: value.rental_fee,
        }
    }
}

impl IntoResponse for RentalResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct RentalPresenter;

impl Exhaust<RentalDto> for RentalPresenter {
    type To = RentalResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        RentalResponse::from(input)
    }
}

impl Exhaust<Option<RentalDto>> for RentalPresenter {
    type To = Result<RentalResponse, ErrorStatus>;
    fn emit(&self, input: Option<RentalDto>) -> Self::To {
        input
            .map(RentalResponse::from)
            .ok_or_else(|| KernelError::NotFound.with_message("Rental not found.").into())
    }
}

impl Exhaust<Vec<RentalDto>> for RentalPresenter {
    type To = axum::Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        axum::Json::from(input.into_iter().map(RentalResponse::from).collect::<Vec<_>>())
    }
}
