mod admin;
mod email;
mod id;
mod name;
mod password;
mod token;

pub use self::{admin::*, email::*, id::*, name::*, password::*, token::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    password: PasswordHash,
    is_admin: IsAdmin,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        password: PasswordHash,
        is_admin: IsAdmin,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            is_admin,
        }
    }
}
