use error_stack::Report;
use garde::Validate;
use serde::Deserialize;

use application::transfer::{CreateMovieDto, DeleteMovieDto, GetMovieDto, UpdateMovieDto};
use application::validation::validate;
use kernel::KernelError;

use crate::controller::TryIntake;
use crate::request::{parse_body_id, parse_path_id};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    #[garde(length(chars, min = 5, max = 255))]
    title: String,
    #[garde(custom(application::validation::uuid))]
    genre_id: String,
    #[garde(range(min = 0, max = 255))]
    number_in_stock: i32,
    #[garde(range(min = 0, max = 255))]
    daily_rental_rate: i32,
}

impl MovieRequest {
    /// Titles are stored and measured without surrounding whitespace.
    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            ..self
        }
    }
}

#[derive(Debug)]
pub struct GetMovieRequest {
    id: String,
}

impl GetMovieRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteMovieRequest {
    id: String,
}

impl DeleteMovieRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct MovieTransformer;

impl TryIntake<MovieRequest> for MovieTransformer {
    type To = CreateMovieDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: MovieRequest) -> Result<Self::To, Self::Error> {
        let input = input.trimmed();
        validate(&input)?;
        Ok(CreateMovieDto {
            title: input.title,
            genre_id: parse_body_id(&input.genre_id)?,
            number_in_stock: input.number_in_stock,
            daily_rental_rate: input.daily_rental_rate,
        })
    }
}

impl TryIntake<(String, MovieRequest)> for MovieTransformer {
    type To = UpdateMovieDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (String, MovieRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        let id = parse_path_id(&id, "movie")?;
        let input = input.trimmed();
        validate(&input)?;
        Ok(UpdateMovieDto {
            id,
            title: input.title,
            genre_id: parse_body_id(&input.genre_id)?,
            number_in_stock: input.number_in_stock,
            daily_rental_rate: input.daily_rental_rate,
        })
    }
}

impl TryIntake<GetMovieRequest> for MovieTransformer {
    type To = GetMovieDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GetMovieRequest) -> Result<Self::To, Self::Error> {
        Ok(GetMovieDto {
            id: parse_path_id(&input.id, "movie")?,
        })
    }
}

impl TryIntake<DeleteMovieRequest> for MovieTransformer {
    type To = DeleteMovieDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: DeleteMovieRequest) -> Result<Self::To, Self::Error> {
        Ok(DeleteMovieDto {
            id: parse_path_id(&input.id, "movie")?,
        })
    }
}
