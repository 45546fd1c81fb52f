use crate::entity::{AuthToken, Identity, PasswordHash};
use crate::KernelError;

/// Issues and verifies the credential carried by clients.
pub trait Authenticator: 'static + Sync + Send {
    fn issue(&self, identity: &Identity) -> error_stack::Result<AuthToken, KernelError>;
    /// Fails with [`KernelError::Unauthorized`] for malformed, forged or expired credentials.
    fn authenticate(&self, token: &str) -> error_stack::Result<Identity, KernelError>;
}

/// Hashing is slow on purpose, so implementations keep it off the async workers.
#[async_trait::async_trait]
pub trait PasswordHasher: 'static + Sync + Send {
    async fn hash(&self, password: &str) -> error_stack::Result<PasswordHash, KernelError>;
    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> error_stack::Result<bool, KernelError>;
}
