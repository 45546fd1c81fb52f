use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{DependOnMovieQuery, MovieQuery};
use kernel::interface::update::{DependOnMovieModifier, MovieModifier};
use kernel::prelude::entity::{
    DailyRentalRate, Genre, GenreId, GenreName, Movie, MovieId, MovieTitle, NumberInStock,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for PostgresMovieRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        PgMovieInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        PgMovieInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl MovieModifier for PostgresMovieRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::create(con, movie).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::update(con, movie).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::delete(con, movie_id).await
    }

    async fn decrement_stock(
        &self,
        con: &mut PostgresTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::decrement_stock(con, movie_id).await
    }

    async fn increment_stock(
        &self,
        con: &mut PostgresTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::increment_stock(con, movie_id).await
    }
}

impl DependOnMovieQuery for PostgresDatabase {
    type MovieQuery = PostgresMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &PostgresMovieRepository
    }
}

impl DependOnMovieModifier for PostgresDatabase {
    type MovieModifier = PostgresMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &PostgresMovieRepository
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    genre_id: Uuid,
    genre_name: String,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie::new(
            MovieId::new(value.id),
            MovieTitle::new(value.title),
            Genre::new(GenreId::new(value.genre_id), GenreName::new(value.genre_name)),
            NumberInStock::new(value.number_in_stock),
            DailyRentalRate::new(value.daily_rental_rate),
        )
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Movie>, KernelError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, genre_id, genre_name, number_in_stock, daily_rental_rate
            FROM movies
            ORDER BY title
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, genre_id, genre_name, number_in_stock, daily_rental_rate
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Movie::from))
    }

    async fn create(con: &mut PgConnection, movie: &Movie) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO movies (id, title, genre_id, genre_name, number_in_stock, daily_rental_rate)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.genre().id().as_ref())
        .bind(movie.genre().name().as_ref())
        .bind(movie.number_in_stock().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, movie: &Movie) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, genre_id = $3, genre_name = $4, number_in_stock = $5, daily_rental_rate = $6
            WHERE id = $1
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.genre().id().as_ref())
        .bind(movie.genre().name().as_ref())
        .bind(movie.number_in_stock().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, movie_id: &MovieId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(movie_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn decrement_stock(
        con: &mut PgConnection,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock - 1
            WHERE id = $1 AND number_in_stock > 0
            "#,
        )
        .bind(movie_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(KernelError::OutOfStock.with_message("Movie not in stock."));
        }
        Ok(())
    }

    async fn increment_stock(
        con: &mut PgConnection,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock + 1
            WHERE id = $1 AND number_in_stock < $2
            "#,
        )
        .bind(movie_id.as_ref())
        .bind(NumberInStock::MAX)
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            tracing::debug!("stock of movie {} left unchanged", movie_id.as_ref());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::MovieQuery;
    use kernel::interface::update::MovieModifier;
    use kernel::prelude::entity::{
        DailyRentalRate, Genre, GenreId, GenreName, Movie, MovieId, MovieTitle, NumberInStock,
    };
    use kernel::KernelError;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::PostgresMovieRepository;

    fn movie(id: MovieId, stock: i32) -> Movie {
        Movie::new(
            id,
            MovieTitle::new("Terminator"),
            Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Action")),
            NumberInStock::new(stock),
            DailyRentalRate::new(2),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = MovieId::new(Uuid::new_v4());

        let movie = movie(id, 3);
        PostgresMovieRepository.create(&mut con, &movie).await?;

        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(movie.clone()));

        let movie = movie.reconstruct(|m| m.title = MovieTitle::new("Alien"));
        PostgresMovieRepository.update(&mut con, &movie).await?;

        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(movie));

        PostgresMovieRepository.delete(&mut con, &id).await?;
        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        con.roll_back().await
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn stock_moves_within_bounds() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = MovieId::new(Uuid::new_v4());
        PostgresMovieRepository.create(&mut con, &movie(id, 1)).await?;

        PostgresMovieRepository.decrement_stock(&mut con, &id).await?;
        let report = PostgresMovieRepository
            .decrement_stock(&mut con, &id)
            .await
            .expect_err("stock is empty");
        assert_eq!(report.current_context(), &KernelError::OutOfStock);

        PostgresMovieRepository.increment_stock(&mut con, &id).await?;
        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(
            found.map(|movie| *movie.number_in_stock()),
            Some(NumberInStock::new(1))
        );

        con.roll_back().await
    }
}
