use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnGenreQuery, GenreQuery};
use kernel::interface::update::{DependOnGenreModifier, GenreModifier};
use kernel::prelude::entity::{Genre, GenreId, GenreName};
use kernel::KernelError;

use crate::transfer::{CreateGenreDto, DeleteGenreDto, GenreDto, GetGenreDto, UpdateGenreDto};

fn genre_not_found() -> Report<KernelError> {
    KernelError::NotFound.with_message("The genre with the given ID was not found.")
}

#[async_trait::async_trait]
pub trait GetGenreService: 'static + Sync + Send + DependOnGenreQuery {
    #[tracing::instrument(skip(self))]
    async fn get_all_genres(&self) -> error_stack::Result<Vec<GenreDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genres = self.genre_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(genres.into_iter().map(GenreDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_genre(&self, dto: GetGenreDto) -> error_stack::Result<Option<GenreDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &GenreId::new(dto.id))
            .await?;
        connection.commit().await?;
        Ok(genre.map(GenreDto::from))
    }
}

impl<T> GetGenreService for T where T: DependOnGenreQuery {}

#[async_trait::async_trait]
pub trait CreateGenreService: 'static + Sync + Send + DependOnGenreModifier {
    #[tracing::instrument(skip(self))]
    async fn create_genre(&self, dto: CreateGenreDto) -> error_stack::Result<GenreDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genre = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new(dto.name));
        self.genre_modifier().create(&mut connection, &genre).await?;
        connection.commit().await?;
        Ok(GenreDto::from(genre))
    }
}

impl<T> CreateGenreService for T where T: DependOnGenreModifier {}

#[async_trait::async_trait]
pub trait UpdateGenreService:
    'static + Sync + Send + DependOnGenreQuery + DependOnGenreModifier
{
    #[tracing::instrument(skip(self))]
    async fn update_genre(&self, dto: UpdateGenreDto) -> error_stack::Result<GenreDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &GenreId::new(dto.id))
            .await?
            .ok_or_else(genre_not_found)?;

        let genre = genre.reconstruct(|g| g.name = GenreName::new(dto.name));
        self.genre_modifier().update(&mut connection, &genre).await?;
        connection.commit().await?;
        Ok(GenreDto::from(genre))
    }
}

impl<T> UpdateGenreService for T where T: DependOnGenreQuery + DependOnGenreModifier {}

#[async_trait::async_trait]
pub trait DeleteGenreService:
    'static + Sync + Send + DependOnGenreQuery + DependOnGenreModifier
{
    #[tracing::instrument(skip(self))]
    async fn delete_genre(&self, dto: DeleteGenreDto) -> error_stack::Result<GenreDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = GenreId::new(dto.id);
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(genre_not_found)?;

        self.genre_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        Ok(GenreDto::from(genre))
    }
}

impl<T> DeleteGenreService for T where T: DependOnGenreQuery + DependOnGenreModifier {}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use driver::database::MemoryDatabase;
    use kernel::KernelError;

    use crate::service::{
        CreateGenreService, DeleteGenreService, GetGenreService, UpdateGenreService,
    };
    use crate::transfer::{CreateGenreDto, DeleteGenreDto, GetGenreDto, UpdateGenreDto};

    #[tokio::test]
    async fn genres_are_listed_by_name() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        for name in ["Thriller", "Action", "Drama"] {
            db.create_genre(CreateGenreDto { name: name.into() }).await?;
        }

        let names = db
            .get_all_genres()
            .await?
            .into_iter()
            .map(|genre| genre.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Action", "Drama", "Thriller"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let created = db.create_genre(CreateGenreDto { name: "Action".into() }).await?;

        let updated = db
            .update_genre(UpdateGenreDto {
                id: created.id,
                name: "Adventure".into(),
            })
            .await?;
        assert_eq!(updated.name, "Adventure");

        let deleted = db.delete_genre(DeleteGenreDto { id: created.id }).await?;
        assert_eq!(deleted, updated);

        let found = db.get_genre(GetGenreDto { id: created.id }).await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn absent_genre_is_not_found() {
        let db = MemoryDatabase::new();
        let report = db
            .update_genre(UpdateGenreDto {
                id: Uuid::new_v4(),
                name: "Adventure".into(),
            })
            .await
            .expect_err("nothing to update");
        assert_eq!(report.current_context(), &KernelError::NotFound);

        let report = db
            .delete_genre(DeleteGenreDto { id: Uuid::new_v4() })
            .await
            .expect_err("nothing to delete");
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }
}
