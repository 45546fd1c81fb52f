use axum::response::{IntoResponse, Response};
use axum_extra::TypedHeader;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{RegisteredUserDto, UserDto};

use crate::auth::XAuthToken;
use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    id: Uuid,
    name: String,
    email: String,
    is_admin: bool,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            is_admin: value.is_admin,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

/// The new user in the body, its token in `x-auth-token`.
pub struct RegisteredResponse {
    user: UserResponse,
    token: String,
}

impl IntoResponse for RegisteredResponse {
    fn into_response(self) -> Response {
        (TypedHeader(XAuthToken(self.token)), self.user).into_response()
    }
}

pub struct UserPresenter;

impl Exhaust<UserDto> for UserPresenter {
    type To = UserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        UserResponse::from(input)
    }
}

impl Exhaust<RegisteredUserDto> for UserPresenter {
    type To = RegisteredResponse;
    fn emit(&self, input: RegisteredUserDto) -> Self::To {
        RegisteredResponse {
            user: UserResponse::from(input.user),
            token: input.token,
        }
    }
}

impl Exhaust<String> for UserPresenter {
    type To = String;
    fn emit(&self, input: String) -> Self::To {
        input
    }
}
