use error_stack::Report;
use garde::Validate;
use serde::Deserialize;

use application::transfer::{
    CreateRentalDto, GetRentalDto, LookupRentalDto, ReturnRentalByIdDto, ReturnRentalDto,
};
use application::validation::validate;
use kernel::KernelError;

use crate::controller::TryIntake;
use crate::request::{parse_body_id, parse_path_id};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    #[garde(custom(application::validation::uuid))]
    customer_id: String,
    #[garde(custom(application::validation::uuid))]
    movie_id: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    #[garde(custom(application::validation::uuid))]
    customer_id: String,
    #[garde(custom(application::validation::uuid))]
    movie_id: String,
}

/// Query of `GET /rentals/lookup`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LookupRentalRequest {
    #[garde(custom(application::validation::uuid))]
    customer_id: String,
    #[garde(custom(application::validation::uuid))]
    movie_id: String,
}

#[derive(Debug)]
pub struct ReturnRentalByIdRequest {
    id: String,
}

impl ReturnRentalByIdRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetRentalRequest {
    id: String,
}

impl GetRentalRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct RentalTransformer;

impl TryIntake<RentalRequest> for RentalTransformer {
    type To = CreateRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: RentalRequest) -> Result<Self::To, Self::Error> {
        validate(&input)?;
        Ok(CreateRentalDto {
            customer_id: parse_body_id(&input.customer_id)?,
            movie_id: parse_body_id(&input.movie_id)?,
        })
    }
}

impl TryIntake<ReturnRequest> for RentalTransformer {
    type To = ReturnRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: ReturnRequest) -> Result<Self::To, Self::Error> {
        validate(&input)?;
        Ok(ReturnRentalDto {
            customer_id: parse_body_id(&input.customer_id)?,
            movie_id: parse_body_id(&input.movie_id)?,
        })
    }
}

impl TryIntake<GetRentalRequest> for RentalTransformer {
    type To = GetRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GetRentalRequest) -> Result<Self::To, Self::Error> {
        Ok(GetRentalDto {
            id: parse_path_id(&input.id, "rental")?,
        })
    }
}

impl TryIntake<LookupRentalRequest> for RentalTransformer {
    type To = LookupRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: LookupRentalRequest) -> Result<Self::To, Self::Error> {
        validate(&input)?;
        Ok(LookupRentalDto {
            customer_id: parse_body_id(&input.customer_id)?,
            movie_id: parse_body_id(&input.movie_id)?,
        })
    }
}

impl TryIntake<ReturnRentalByIdRequest> for RentalTransformer {
    type To = ReturnRentalByIdDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: ReturnRentalByIdRequest) -> Result<Self::To, Self::Error> {
        Ok(ReturnRentalByIdDto {
            id: parse_path_id(&input.id, "rental")?,
        })
    }
}
