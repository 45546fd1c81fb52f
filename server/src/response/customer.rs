use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use application::transfer::CustomerDto;
use kernel::KernelError;

use crate::controller::Exhaust;
use crate::error::ErrorStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    id: Uuid,
    name: String,
    phone: String,
    is_gold: bool,
}

impl From<CustomerDto> for CustomerResponse {
    fn from(value: CustomerDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
            is_gold: value.is_gold,
        }
    }
}

impl IntoResponse for CustomerResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct CustomerPresenter;

impl Exhaust<CustomerDto> for CustomerPresenter {
    type To = CustomerResponse;
    fn emit(&self, input: CustomerDto) -> Self::To {
        CustomerResponse::from(input)
    }
}

impl Exhaust<Option<CustomerDto>> for CustomerPresenter {
    type To = Result<CustomerResponse, ErrorStatus>;
    fn emit(&self, input: Option<CustomerDto>) -> Self::To {
        input.map(CustomerResponse::from).ok_or_else(|| {
            KernelError::NotFound
                .with_message("The customer with the given ID was not found.")
                .into()
        })
    }
}

impl Exhaust<Vec<CustomerDto>> for CustomerPresenter {
    type To = axum::Json<Vec<CustomerResponse>>;
    fn emit(&self, input: Vec<CustomerDto>) -> Self::To {
        axum::Json::from(
            input
                .into_iter()
                .map(CustomerResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}
