use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnGenreQuery, DependOnMovieQuery, GenreQuery, MovieQuery};
use kernel::interface::update::{DependOnMovieModifier, MovieModifier};
use kernel::prelude::entity::{
    DailyRentalRate, GenreId, Movie, MovieId, MovieTitle, NumberInStock,
};
use kernel::KernelError;

use crate::transfer::{CreateMovieDto, DeleteMovieDto, GetMovieDto, MovieDto, UpdateMovieDto};

fn movie_not_found() -> Report<KernelError> {
    KernelError::NotFound.with_message("The movie with the given ID was not found.")
}

fn invalid_genre() -> Report<KernelError> {
    KernelError::Validation.with_message("Invalid genre.")
}

#[async_trait::async_trait]
pub trait GetMovieService: 'static + Sync + Send + DependOnMovieQuery {
    #[tracing::instrument(skip(self))]
    async fn get_all_movies(&self) -> error_stack::Result<Vec<MovieDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let movies = self.movie_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_movie(&self, dto: GetMovieDto) -> error_stack::Result<Option<MovieDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &MovieId::new(dto.id))
            .await?;
        connection.commit().await?;
        Ok(movie.map(MovieDto::from))
    }
}

impl<T> GetMovieService for T where T: DependOnMovieQuery {}

#[async_trait::async_trait]
pub trait CreateMovieService:
    'static + Sync + Send + DependOnGenreQuery + DependOnMovieModifier
{
    /// The genre is copied into the movie as it is now.
    #[tracing::instrument(skip(self))]
    async fn create_movie(&self, dto: CreateMovieDto) -> error_stack::Result<MovieDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &GenreId::new(dto.genre_id))
            .await?
            .ok_or_else(invalid_genre)?;

        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new(dto.title),
            genre,
            NumberInStock::new(dto.number_in_stock),
            DailyRentalRate::new(dto.daily_rental_rate),
        );
        self.movie_modifier().create(&mut connection, &movie).await?;
        connection.commit().await?;
        Ok(MovieDto::from(movie))
    }
}

impl<T> CreateMovieService for T where T: DependOnGenreQuery + DependOnMovieModifier {}

#[async_trait::async_trait]
pub trait UpdateMovieService:
    'static + Sync + Send + DependOnGenreQuery + DependOnMovieQuery + DependOnMovieModifier
{
    #[tracing::instrument(skip(self))]
    async fn update_movie(&self, dto: UpdateMovieDto) -> error_stack::Result<MovieDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &GenreId::new(dto.genre_id))
            .await?
            .ok_or_else(invalid_genre)?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &MovieId::new(dto.id))
            .await?
            .ok_or_else(movie_not_found)?;

        let movie = movie.reconstruct(|m| {
            m.title = MovieTitle::new(dto.title);
            m.genre = genre;
            m.number_in_stock = NumberInStock::new(dto.number_in_stock);
            m.daily_rental_rate = DailyRentalRate::new(dto.daily_rental_rate);
        });
        self.movie_modifier().update(&mut connection, &movie).await?;
        connection.commit().await?;
        Ok(MovieDto::from(movie))
    }
}

impl<T> UpdateMovieService for T where
    T: DependOnGenreQuery + DependOnMovieQuery + DependOnMovieModifier
{
}

#[async_trait::async_trait]
pub trait DeleteMovieService:
    'static + Sync + Send + DependOnMovieQuery + DependOnMovieModifier
{
    #[tracing::instrument(skip(self))]
    async fn delete_movie(&self, dto: DeleteMovieDto) -> error_stack::Result<MovieDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = MovieId::new(dto.id);
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(movie_not_found)?;

        self.movie_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        Ok(MovieDto::from(movie))
    }
}

impl<T> DeleteMovieService for T where T: DependOnMovieQuery + DependOnMovieModifier {}
