use std::sync::Arc;

use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{CustomerId, MovieId, Rental, RentalId};
use kernel::KernelError;

use crate::database::memory::{MemoryDatabase, MemoryTransaction};

pub struct MemoryRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for MemoryRentalRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con.staged.rentals.values().cloned().collect::<Vec<_>>();
        rentals.sort_by(|a, b| b.date_out().as_ref().cmp(a.date_out().as_ref()));
        Ok(rentals)
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.staged.rentals.get(id.as_ref()).cloned())
    }

    async fn lookup(
        &self,
        con: &mut MemoryTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let found = con
            .staged
            .rentals
            .values()
            .filter(|rental| {
                rental.customer().id() == customer_id && rental.movie().id() == movie_id
            })
            .max_by_key(|rental| (rental.is_open(), *rental.date_out().as_ref()))
            .cloned();
        Ok(found)
    }
}

#[async_trait::async_trait]
impl RentalModifier for MemoryRentalRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        let taken = con.staged.rentals.values().any(|stored| {
            stored.is_open()
                && stored.customer().id() == rental.customer().id()
                && stored.movie().id() == rental.movie().id()
        });
        if taken {
            return Err(KernelError::Conflict
                .with_message("The customer already has this movie rented out."));
        }
        Arc::make_mut(&mut con.staged.rentals).insert(*rental.id().as_ref(), rental.clone());
        tracing::debug!("opened rental {}", rental.id().as_ref());
        Ok(())
    }

    async fn close(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        match Arc::make_mut(&mut con.staged.rentals).get_mut(rental.id().as_ref()) {
            Some(stored) if stored.is_open() => {
                *stored = rental.clone();
                tracing::debug!("closed rental {}", rental.id().as_ref());
                Ok(())
            }
            _ => Err(KernelError::AlreadyReturned.with_message("Return already processed.")),
        }
    }
}

impl DependOnRentalQuery for MemoryDatabase {
    type RentalQuery = MemoryRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &MemoryRentalRepository
    }
}

impl DependOnRentalModifier for MemoryDatabase {
    type RentalModifier = MemoryRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &MemoryRentalRepository
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut,
        DateReturned, Genre, GenreId, GenreName, IsGold, Movie, MovieId, MovieTitle,
        NumberInStock, Rental, RentalId,
    };
    use kernel::KernelError;

    use crate::database::{MemoryDatabase, MemoryRentalRepository};

    fn fixtures() -> (Movie, Customer) {
        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("Terminator"),
            Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Action")),
            NumberInStock::new(3),
            DailyRentalRate::new(2),
        );
        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new("Mosh"),
            CustomerPhone::new("12345"),
            IsGold::new(false),
        );
        (movie, customer)
    }

    fn open(movie: &Movie, customer: &Customer, date_out: OffsetDateTime) -> Rental {
        Rental::open(
            RentalId::new(Uuid::new_v4()),
            movie,
            customer,
            DateOut::new(date_out),
        )
    }

    #[tokio::test]
    async fn one_open_rental_per_pair() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let (movie, customer) = fixtures();
        let now = OffsetDateTime::now_utc();

        let first = open(&movie, &customer, now);
        MemoryRentalRepository.create(&mut con, &first).await?;
        let report = MemoryRentalRepository
            .create(&mut con, &open(&movie, &customer, now))
            .await
            .expect_err("pair already rented");
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let closed = first.close(DateReturned::new(now))?;
        MemoryRentalRepository.close(&mut con, &closed).await?;
        MemoryRentalRepository
            .create(&mut con, &open(&movie, &customer, now))
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn close_only_applies_once() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let (movie, customer) = fixtures();
        let now = OffsetDateTime::now_utc();

        let rental = open(&movie, &customer, now - Duration::days(1));
        MemoryRentalRepository.create(&mut con, &rental).await?;
        let closed = rental.close(DateReturned::new(now))?;
        MemoryRentalRepository.close(&mut con, &closed).await?;

        let report = MemoryRentalRepository
            .close(&mut con, &closed)
            .await
            .expect_err("already closed");
        assert_eq!(report.current_context(), &KernelError::AlreadyReturned);
        Ok(())
    }

    #[tokio::test]
    async fn lookup_prefers_open_then_latest() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let (movie, customer) = fixtures();
        let now = OffsetDateTime::now_utc();

        let older = open(&movie, &customer, now - Duration::days(5))
            .close(DateReturned::new(now - Duration::days(4)))?;
        let newer = open(&movie, &customer, now - Duration::days(3))
            .close(DateReturned::new(now - Duration::days(2)))?;
        MemoryRentalRepository.create(&mut con, &older).await?;
        MemoryRentalRepository.create(&mut con, &newer).await?;

        let found = MemoryRentalRepository
            .lookup(&mut con, customer.id(), movie.id())
            .await?;
        assert_eq!(found, Some(newer));

        let current = open(&movie, &customer, now - Duration::days(6));
        MemoryRentalRepository.create(&mut con, &current).await?;
        let found = MemoryRentalRepository
            .lookup(&mut con, customer.id(), movie.id())
            .await?;
        assert_eq!(found, Some(current));
        Ok(())
    }
}
