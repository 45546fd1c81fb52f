use error_stack::Report;

use kernel::interface::auth::PasswordHasher;
use kernel::prelude::entity::PasswordHash;
use kernel::KernelError;

use crate::env_or;
use crate::error::ConvertError;

static BCRYPT_COST: &str = "BCRYPT_COST";

pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Ok(Self::new(env_or(BCRYPT_COST, bcrypt::DEFAULT_COST)?))
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait::async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> error_stack::Result<PasswordHash, KernelError> {
        let password = password.to_string();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .convert_error()?
            .convert_error()?;
        Ok(PasswordHash::new(hash))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> error_stack::Result<bool, KernelError> {
        let password = password.to_string();
        let hash = hash.as_ref().to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .convert_error()?
            .convert_error()
    }
}

impl<T> ConvertError for Result<T, bcrypt::BcryptError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::auth::PasswordHasher;
    use kernel::KernelError;

    use super::BcryptPasswordHasher;

    #[tokio::test]
    async fn verify_matches_only_the_hashed_password() -> error_stack::Result<(), KernelError> {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("12345").await?;

        assert_ne!(hash.as_ref(), "12345");
        assert!(hasher.verify("12345", &hash).await?);
        assert!(!hasher.verify("54321", &hash).await?);
        Ok(())
    }
}
