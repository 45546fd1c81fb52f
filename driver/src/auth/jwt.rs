use error_stack::Report;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::auth::Authenticator;
use kernel::prelude::entity::{AuthToken, Identity, IsAdmin, UserId};
use kernel::{ErrorMessage, KernelError};

use crate::error::ConvertError;
use crate::{env, env_or};

static JWT_PRIVATE_KEY: &str = "JWT_PRIVATE_KEY";
static JWT_TTL_SECONDS: &str = "JWT_TTL_SECONDS";

const DEFAULT_TTL_SECONDS: i64 = 60 * 60 * 24;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    sub: Uuid,
    is_admin: bool,
    exp: i64,
}

/// HS256 tokens carrying the user id and the admin flag.
pub struct JwtAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtAuthenticator {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let secret = env(JWT_PRIVATE_KEY)?;
        let ttl = env_or(JWT_TTL_SECONDS, DEFAULT_TTL_SECONDS)?;
        Ok(Self::new(secret.as_bytes(), Duration::seconds(ttl)))
    }
}

impl Authenticator for JwtAuthenticator {
    fn issue(&self, identity: &Identity) -> error_stack::Result<AuthToken, KernelError> {
        let claims = Claims {
            sub: *identity.user_id().as_ref(),
            is_admin: *identity.is_admin().as_ref(),
            exp: (OffsetDateTime::now_utc() + self.ttl).unix_timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .convert_error()?;
        Ok(AuthToken::new(token))
    }

    fn authenticate(&self, token: &str) -> error_stack::Result<Identity, KernelError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|error| {
                Report::new(error)
                    .change_context(KernelError::Unauthorized)
                    .attach_printable(ErrorMessage::new("Invalid token."))
            })?;
        Ok(Identity::new(
            UserId::new(data.claims.sub),
            IsAdmin::new(data.claims.is_admin),
        ))
    }
}

impl<T> ConvertError for Result<T, jsonwebtoken::errors::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}

#[cfg(test)]
mod test {
    use time::Duration;
    use uuid::Uuid;

    use kernel::interface::auth::Authenticator;
    use kernel::prelude::entity::{Identity, IsAdmin, UserId};
    use kernel::KernelError;

    use super::JwtAuthenticator;

    #[test]
    fn issued_token_authenticates() -> error_stack::Result<(), KernelError> {
        let authenticator = JwtAuthenticator::new(b"secret", Duration::minutes(5));
        let identity = Identity::new(UserId::new(Uuid::new_v4()), IsAdmin::new(true));

        let token = authenticator.issue(&identity)?;
        let verified = authenticator.authenticate(token.as_ref())?;
        assert_eq!(verified, identity);
        Ok(())
    }

    #[test]
    fn foreign_signature_is_rejected() -> error_stack::Result<(), KernelError> {
        let ours = JwtAuthenticator::new(b"secret", Duration::minutes(5));
        let theirs = JwtAuthenticator::new(b"another", Duration::minutes(5));
        let identity = Identity::new(UserId::new(Uuid::new_v4()), IsAdmin::new(false));

        let token = theirs.issue(&identity)?;
        let report = ours
            .authenticate(token.as_ref())
            .expect_err("signed with another key");
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> error_stack::Result<(), KernelError> {
        let authenticator = JwtAuthenticator::new(b"secret", Duration::minutes(-10));
        let identity = Identity::new(UserId::new(Uuid::new_v4()), IsAdmin::new(false));

        let token = authenticator.issue(&identity)?;
        let report = authenticator
            .authenticate(token.as_ref())
            .expect_err("token is expired");
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        let authenticator = JwtAuthenticator::new(b"secret", Duration::minutes(5));
        let report = authenticator
            .authenticate("not-a-token")
            .expect_err("not a jwt");
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
    }
}
