use error_stack::Report;
use garde::Validate;
use serde::Deserialize;

use application::transfer::{LoginDto, RegisterUserDto};
use application::validation::validate;
use kernel::KernelError;

use crate::controller::TryIntake;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[garde(length(chars, min = 5, max = 50))]
    name: String,
    #[garde(email, length(chars, min = 5, max = 255))]
    email: String,
    #[garde(length(chars, min = 5, max = 255))]
    password: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(email, length(chars, min = 5, max = 255))]
    email: String,
    #[garde(length(chars, min = 5, max = 255))]
    password: String,
}

pub struct UserTransformer;

impl TryIntake<RegisterRequest> for UserTransformer {
    type To = RegisterUserDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: RegisterRequest) -> Result<Self::To, Self::Error> {
        validate(&input)?;
        Ok(RegisterUserDto {
            name: input.name,
            email: input.email,
            password: input.password,
        })
    }
}

impl TryIntake<LoginRequest> for UserTransformer {
    type To = LoginDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: LoginRequest) -> Result<Self::To, Self::Error> {
        validate(&input)?;
        Ok(LoginDto {
            email: input.email,
            password: input.password,
        })
    }
}
