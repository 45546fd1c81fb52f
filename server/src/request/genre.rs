use error_stack::Report;
use garde::Validate;
use serde::Deserialize;

use application::transfer::{CreateGenreDto, DeleteGenreDto, GetGenreDto, UpdateGenreDto};
use application::validation::validate;
use kernel::KernelError;

use crate::controller::TryIntake;
use crate::request::parse_path_id;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenreRequest {
    #[garde(length(chars, min = 1, max = 50))]
    name: String,
}

#[derive(Debug)]
pub struct GetGenreRequest {
    id: String,
}

impl GetGenreRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteGenreRequest {
    id: String,
}

impl DeleteGenreRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct GenreTransformer;

impl TryIntake<GenreRequest> for GenreTransformer {
    type To = CreateGenreDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GenreRequest) -> Result<Self::To, Self::Error> {
        validate(&input)?;
        Ok(CreateGenreDto { name: input.name })
    }
}

impl TryIntake<(String, GenreRequest)> for GenreTransformer {
    type To = UpdateGenreDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (String, GenreRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        let id = parse_path_id(&id, "genre")?;
        validate(&input)?;
        Ok(UpdateGenreDto {
            id,
            name: input.name,
        })
    }
}

impl TryIntake<GetGenreRequest> for GenreTransformer {
    type To = GetGenreDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GetGenreRequest) -> Result<Self::To, Self::Error> {
        Ok(GetGenreDto {
            id: parse_path_id(&input.id, "genre")?,
        })
    }
}

impl TryIntake<DeleteGenreRequest> for GenreTransformer {
    type To = DeleteGenreDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: DeleteGenreRequest) -> Result<Self::To, Self::Error> {
        Ok(DeleteGenreDto {
            id: parse_path_id(&input.id, "genre")?,
        })
    }
}
