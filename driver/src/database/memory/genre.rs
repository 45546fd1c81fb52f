use std::sync::Arc;

use kernel::interface::query::{DependOnGenreQuery, GenreQuery};
use kernel::interface::update::{DependOnGenreModifier, GenreModifier};
use kernel::prelude::entity::{Genre, GenreId};
use kernel::KernelError;

use crate::database::memory::{MemoryDatabase, MemoryTransaction};

pub struct MemoryGenreRepository;

#[async_trait::async_trait]
impl GenreQuery for MemoryGenreRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Genre>, KernelError> {
        let mut genres = con.staged.genres.values().cloned().collect::<Vec<_>>();
        genres.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(genres)
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &GenreId,
    ) -> error_stack::Result<Option<Genre>, KernelError> {
        Ok(con.staged.genres.get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl GenreModifier for MemoryGenreRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        genre: &Genre,
    ) -> error_stack::Result<(), KernelError> {
        Arc::make_mut(&mut con.staged.genres).insert(*genre.id().as_ref(), genre.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        genre: &Genre,
    ) -> error_stack::Result<(), KernelError> {
        let genres = Arc::make_mut(&mut con.staged.genres);
        if let Some(stored) = genres.get_mut(genre.id().as_ref()) {
            *stored = genre.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        genre_id: &GenreId,
    ) -> error_stack::Result<(), KernelError> {
        Arc::make_mut(&mut con.staged.genres).remove(genre_id.as_ref());
        Ok(())
    }
}

impl DependOnGenreQuery for MemoryDatabase {
    type GenreQuery = MemoryGenreRepository;
    fn genre_query(&self) -> &Self::GenreQuery {
        &MemoryGenreRepository
    }
}

impl DependOnGenreModifier for MemoryDatabase {
    type GenreModifier = MemoryGenreRepository;
    fn genre_modifier(&self) -> &Self::GenreModifier {
        &MemoryGenreRepository
    }
}
