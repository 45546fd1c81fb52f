use std::sync::Arc;

use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{User, UserEmail, UserId};
use kernel::KernelError;

use crate::database::memory::{MemoryDatabase, MemoryTransaction};

pub struct MemoryUserRepository;

#[async_trait::async_trait]
impl UserQuery for MemoryUserRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.staged.users.get(id.as_ref()).cloned())
    }

    async fn find_by_email(
        &self,
        con: &mut MemoryTransaction,
        email: &UserEmail,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let found = con
            .staged
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned();
        Ok(found)
    }
}

#[async_trait::async_trait]
impl UserModifier for MemoryUserRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        if con.staged.users.values().any(|stored| stored.email() == user.email()) {
            return Err(KernelError::Conflict.with_message("User already registered."));
        }
        Arc::make_mut(&mut con.staged.users).insert(*user.id().as_ref(), user.clone());
        Ok(())
    }
}

impl DependOnUserQuery for MemoryDatabase {
    type UserQuery = MemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &MemoryUserRepository
    }
}

impl DependOnUserModifier for MemoryDatabase {
    type UserModifier = MemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &MemoryUserRepository
    }
}
