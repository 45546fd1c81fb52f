use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Movie, MovieId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Sorted by title.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Movie>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError>;
}

pub trait DependOnMovieQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type MovieQuery: MovieQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn movie_query(&self) -> &Self::MovieQuery;
}
