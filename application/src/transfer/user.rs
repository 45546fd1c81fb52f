use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, User};

/// A user as shown to clients. The password hash never leaves the service layer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            is_admin,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            is_admin: is_admin.into(),
        }
    }
}

pub struct RegisterUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisteredUserDto {
    pub user: UserDto,
    pub token: String,
}

pub struct LoginDto {
    pub email: String,
    pub password: String,
}
