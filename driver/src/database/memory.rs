use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{Customer, Genre, Movie, Rental, User};
use kernel::KernelError;

pub use self::{customer::*, genre::*, movie::*, rental::*, user::*};

mod customer;
mod genre;
mod movie;
mod rental;
mod user;

type Table<T> = Arc<HashMap<Uuid, T>>;

/// Tables are shared with the staged copy and cloned on first write (`Arc::make_mut`).
#[derive(Debug, Clone, Default)]
struct Tables {
    genres: Table<Genre>,
    movies: Table<Movie>,
    customers: Table<Customer>,
    rentals: Table<Rental>,
    users: Table<User>,
}

/// Process-local store for development runs without a database url and for the tests.
/// Nothing survives a restart.
///
/// A transaction holds the only lock on the tables and works on a staged copy of them,
/// so transactions run one after another and a dropped transaction leaves nothing behind.
/// Read-only transactions never copy a table.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<MemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let staged = guard.clone();
        Ok(MemoryTransaction { guard, staged })
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        *self.guard = self.staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::GenreQuery;
    use kernel::interface::update::GenreModifier;
    use kernel::prelude::entity::{Genre, GenreId, GenreName};
    use kernel::KernelError;

    use crate::database::{MemoryDatabase, MemoryGenreRepository};

    #[tokio::test]
    async fn only_committed_changes_are_kept() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let kept = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Action"));
        let dropped = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Drama"));

        let mut con = db.transact().await?;
        MemoryGenreRepository.create(&mut con, &kept).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        MemoryGenreRepository.create(&mut con, &dropped).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        MemoryGenreRepository.create(&mut con, &dropped).await?;
        drop(con);

        let mut con = db.transact().await?;
        let all = MemoryGenreRepository.find_all(&mut con).await?;
        assert_eq!(all, vec![kept]);
        Ok(())
    }

    #[tokio::test]
    async fn reads_share_the_committed_tables() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let genre = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Action"));
        let mut con = db.transact().await?;
        MemoryGenreRepository.create(&mut con, &genre).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        MemoryGenreRepository.find_all(&mut con).await?;
        assert!(Arc::ptr_eq(&con.staged.genres, &con.guard.genres));

        MemoryGenreRepository.delete(&mut con, genre.id()).await?;
        assert!(!Arc::ptr_eq(&con.staged.genres, &con.guard.genres));
        assert_eq!(con.guard.genres.len(), 1);
        Ok(())
    }
}
