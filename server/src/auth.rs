use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue};
use axum_extra::headers::{self, Header};
use axum_extra::TypedHeader;

use kernel::interface::auth::Authenticator;
use kernel::prelude::entity::{Identity, Role};
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};

static X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

/// The `x-auth-token` header, read from requests and written on registration.
#[derive(Debug, Clone)]
pub struct XAuthToken(pub String);

impl Header for XAuthToken {
    fn name() -> &'static HeaderName {
        &X_AUTH_TOKEN
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|value| value.to_str().ok())
            .map(|value| XAuthToken(value.to_string()))
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

/// Any caller holding a valid token.
pub struct Authenticated(pub Identity);

#[axum::async_trait]
impl<Db: Database> FromRequestParts<AppModule<Db>> for Authenticated {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule<Db>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(XAuthToken(token)) =
            TypedHeader::<XAuthToken>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    KernelError::Unauthorized.with_message("Access denied. No token provided.")
                })?;
        let identity = state.authenticator().authenticate(&token)?;
        Ok(Self(identity))
    }
}

/// A caller whose token carries the admin flag.
pub struct Admin(pub Identity);

#[axum::async_trait]
impl<Db: Database> FromRequestParts<AppModule<Db>> for Admin {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule<Db>,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(identity) = Authenticated::from_request_parts(parts, state).await?;
        identity.authorize(Role::Admin)?;
        Ok(Self(identity))
    }
}
