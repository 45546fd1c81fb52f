use std::sync::Arc;

use kernel::interface::query::{DependOnMovieQuery, MovieQuery};
use kernel::interface::update::{DependOnMovieModifier, MovieModifier};
use kernel::prelude::entity::{Movie, MovieId};
use kernel::KernelError;

use crate::database::memory::{MemoryDatabase, MemoryTransaction};

pub struct MemoryMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for MemoryMovieRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        let mut movies = con.staged.movies.values().cloned().collect::<Vec<_>>();
        movies.sort_by(|a, b| a.title().as_ref().cmp(b.title().as_ref()));
        Ok(movies)
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        Ok(con.staged.movies.get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl MovieModifier for MemoryMovieRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        Arc::make_mut(&mut con.staged.movies).insert(*movie.id().as_ref(), movie.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        let movies = Arc::make_mut(&mut con.staged.movies);
        if let Some(stored) = movies.get_mut(movie.id().as_ref()) {
            *stored = movie.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        Arc::make_mut(&mut con.staged.movies).remove(movie_id.as_ref());
        Ok(())
    }

    async fn decrement_stock(
        &self,
        con: &mut MemoryTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        let movie = Arc::make_mut(&mut con.staged.movies).get_mut(movie_id.as_ref());
        match movie.and_then(|movie| movie.number_in_stock().take().map(|stock| (movie, stock))) {
            Some((movie, stock)) => {
                movie.substitute(|movie| *movie.number_in_stock = stock);
                Ok(())
            }
            None => Err(KernelError::OutOfStock.with_message("Movie not in stock.")),
        }
    }

    async fn increment_stock(
        &self,
        con: &mut MemoryTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        match Arc::make_mut(&mut con.staged.movies).get_mut(movie_id.as_ref()) {
            Some(movie) => {
                let stock = movie.number_in_stock().put_back();
                movie.substitute(|movie| *movie.number_in_stock = stock);
            }
            None => tracing::debug!("stock of movie {} left unchanged", movie_id.as_ref()),
        }
        Ok(())
    }
}

impl DependOnMovieQuery for MemoryDatabase {
    type MovieQuery = MemoryMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &MemoryMovieRepository
    }
}

impl DependOnMovieModifier for MemoryDatabase {
    type MovieModifier = MemoryMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &MemoryMovieRepository
    }
}
