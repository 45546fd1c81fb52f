use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnMovieQuery, DependOnRentalQuery, MovieQuery,
    RentalQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{
    CustomerId, DateOut, DateReturned, MovieId, Rental, RentalId,
};
use kernel::KernelError;

use crate::transfer::{
    CreateRentalDto, GetRentalDto, LookupRentalDto, RentalDto, ReturnRentalByIdDto,
    ReturnRentalDto,
};

fn rental_not_found() -> Report<KernelError> {
    KernelError::NotFound.with_message("Rental not found.")
}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalQuery {
    #[tracing::instrument(skip(self))]
    async fn get_all_rentals(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let rentals = self.rental_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &RentalId::new(dto.id))
            .await?;
        connection.commit().await?;
        Ok(rental.map(RentalDto::from))
    }

    #[tracing::instrument(skip(self))]
    async fn lookup_rental(
        &self,
        dto: LookupRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let rental = self
            .rental_query()
            .lookup(
                &mut connection,
                &CustomerId::new(dto.customer_id),
                &MovieId::new(dto.movie_id),
            )
            .await?;
        connection.commit().await?;
        Ok(rental.map(RentalDto::from))
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery {}

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnMovieQuery
    + DependOnCustomerQuery
    + DependOnRentalModifier
    + DependOnMovieModifier
{
    /// Opens a rental and takes one copy off the shelf in the same transaction.
    #[tracing::instrument(skip(self))]
    async fn create_rental(
        &self,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &MovieId::new(dto.movie_id))
            .await?
            .ok_or_else(|| {
                KernelError::NotFound.with_message("The movie with the given ID was not found.")
            })?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &CustomerId::new(dto.customer_id))
            .await?
            .ok_or_else(|| {
                KernelError::NotFound
                    .with_message("The customer with the given ID was not found.")
            })?;
        if !movie.number_in_stock().is_available() {
            return Err(KernelError::OutOfStock.with_message("Movie not in stock."));
        }

        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            &movie,
            &customer,
            DateOut::new(OffsetDateTime::now_utc()),
        );
        self.rental_modifier().create(&mut connection, &rental).await?;
        self.movie_modifier()
            .decrement_stock(&mut connection, movie.id())
            .await?;
        connection.commit().await?;
        Ok(RentalDto::from(rental))
    }
}

impl<T> CreateRentalService for T where
    T: DependOnMovieQuery + DependOnCustomerQuery + DependOnRentalModifier + DependOnMovieModifier
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static + Sync + Send + DependOnRentalQuery + DependOnRentalModifier + DependOnMovieModifier
{
    /// Closes the rental of `movie_id` held by `customer_id` and puts the copy back.
    #[tracing::instrument(skip(self))]
    async fn return_rental(
        &self,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let rental = self
            .rental_query()
            .lookup(
                &mut connection,
                &CustomerId::new(dto.customer_id),
                &MovieId::new(dto.movie_id),
            )
            .await?
            .ok_or_else(rental_not_found)?;

        let rental = rental.close(DateReturned::new(OffsetDateTime::now_utc()))?;
        self.rental_modifier().close(&mut connection, &rental).await?;
        self.movie_modifier()
            .increment_stock(&mut connection, rental.movie().id())
            .await?;
        connection.commit().await?;
        Ok(RentalDto::from(rental))
    }

    #[tracing::instrument(skip(self))]
    async fn return_rental_by_id(
        &self,
        dto: ReturnRentalByIdDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &RentalId::new(dto.id))
            .await?
            .ok_or_else(rental_not_found)?;

        let rental = rental.close(DateReturned::new(OffsetDateTime::now_utc()))?;
        self.rental_modifier().close(&mut connection, &rental).await?;
        self.movie_modifier()
            .increment_stock(&mut connection, rental.movie().id())
            .await?;
        connection.commit().await?;
        Ok(RentalDto::from(rental))
    }
}

impl<T> ReturnRentalService for T where
    T: DependOnRentalQuery + DependOnRentalModifier + DependOnMovieModifier
{
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use driver::database::MemoryDatabase;
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{DependOnMovieQuery, MovieQuery};
    use kernel::interface::update::{
        CustomerModifier, DependOnCustomerModifier, DependOnGenreModifier, DependOnMovieModifier,
        DependOnRentalModifier, GenreModifier, MovieModifier, RentalModifier,
    };
    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut, Genre,
        GenreId, GenreName, IsGold, Movie, MovieId, MovieTitle, NumberInStock, Rental, RentalId,
    };
    use kernel::KernelError;

    use crate::service::{
        CreateRentalService, GetRentalService, ReturnRentalService, UpdateMovieService,
    };
    use crate::transfer::{
        CreateRentalDto, GetRentalDto, LookupRentalDto, ReturnRentalByIdDto, ReturnRentalDto,
        UpdateMovieDto,
    };

    async fn seed(
        db: &MemoryDatabase,
        stock: i32,
    ) -> error_stack::Result<(Movie, Customer), KernelError> {
        let genre = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Action"));
        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("Terminator"),
            genre.clone(),
            NumberInStock::new(stock),
            DailyRentalRate::new(2),
        );
        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new("Mosh Hamedani"),
            CustomerPhone::new("12345"),
            IsGold::new(false),
        );
        let mut con = db.transact().await?;
        db.genre_modifier().create(&mut con, &genre).await?;
        db.movie_modifier().create(&mut con, &movie).await?;
        db.customer_modifier().create(&mut con, &customer).await?;
        con.commit().await?;
        Ok((movie, customer))
    }

    async fn stock(db: &MemoryDatabase, movie: &Movie) -> error_stack::Result<i32, KernelError> {
        let mut con = db.transact().await?;
        let found = db.movie_query().find_by_id(&mut con, movie.id()).await?;
        Ok(found.map(|movie| *movie.number_in_stock().as_ref()).unwrap_or(-1))
    }

    fn pair(movie: &Movie, customer: &Customer) -> CreateRentalDto {
        CreateRentalDto {
            customer_id: *customer.id().as_ref(),
            movie_id: *movie.id().as_ref(),
        }
    }

    fn returning(movie: &Movie, customer: &Customer) -> ReturnRentalDto {
        ReturnRentalDto {
            customer_id: *customer.id().as_ref(),
            movie_id: *movie.id().as_ref(),
        }
    }

    #[tokio::test]
    async fn create_then_return_restores_stock() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (movie, customer) = seed(&db, 3).await?;

        let rental = db.create_rental(pair(&movie, &customer)).await?;
        assert_eq!(stock(&db, &movie).await?, 2);
        assert_eq!(rental.movie.daily_rental_rate, 2);
        assert_eq!(rental.customer.name, "Mosh Hamedani");
        assert!(rental.date_returned.is_none());

        let returned = db.return_rental(returning(&movie, &customer)).await?;
        assert_eq!(returned.id, rental.id);
        assert_eq!(returned.rental_fee, Some(0));
        assert!(returned.date_returned.is_some());
        assert_eq!(stock(&db, &movie).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn fee_uses_elapsed_days_and_rate_at_creation() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (movie, customer) = seed(&db, 2).await?;

        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            &movie,
            &customer,
            DateOut::new(OffsetDateTime::now_utc() - Duration::days(3)),
        );
        let mut con = db.transact().await?;
        db.rental_modifier().create(&mut con, &rental).await?;
        db.movie_modifier()
            .decrement_stock(&mut con, movie.id())
            .await?;
        con.commit().await?;

        db.update_movie(UpdateMovieDto {
            id: *movie.id().as_ref(),
            title: "Terminator".into(),
            genre_id: *movie.genre().id().as_ref(),
            number_in_stock: 1,
            daily_rental_rate: 10,
        })
        .await?;

        let returned = db
            .return_rental_by_id(ReturnRentalByIdDto {
                id: *rental.id().as_ref(),
            })
            .await?;
        assert_eq!(returned.rental_fee, Some(6));
        assert_eq!(stock(&db, &movie).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn second_return_changes_nothing() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (movie, customer) = seed(&db, 3).await?;
        let rental = db.create_rental(pair(&movie, &customer)).await?;
        let first = db.return_rental(returning(&movie, &customer)).await?;

        let report = db
            .return_rental(returning(&movie, &customer))
            .await
            .expect_err("already returned");
        assert_eq!(report.current_context(), &KernelError::AlreadyReturned);

        let stored = db.get_rental(GetRentalDto { id: rental.id }).await?;
        assert_eq!(stored, Some(first));
        assert_eq!(stock(&db, &movie).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn empty_shelf_creates_nothing() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (movie, customer) = seed(&db, 0).await?;

        let report = db
            .create_rental(pair(&movie, &customer))
            .await
            .expect_err("out of stock");
        assert_eq!(report.current_context(), &KernelError::OutOfStock);
        assert!(db.get_all_rentals().await?.is_empty());
        assert_eq!(stock(&db, &movie).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (movie, customer) = seed(&db, 1).await?;

        let report = db
            .create_rental(CreateRentalDto {
                customer_id: Uuid::new_v4(),
                movie_id: *movie.id().as_ref(),
            })
            .await
            .expect_err("customer does not exist");
        assert_eq!(report.current_context(), &KernelError::NotFound);

        let report = db
            .return_rental(returning(&movie, &customer))
            .await
            .expect_err("nothing rented");
        assert_eq!(report.current_context(), &KernelError::NotFound);

        let found = db
            .lookup_rental(LookupRentalDto {
                customer_id: *customer.id().as_ref(),
                movie_id: *movie.id().as_ref(),
            })
            .await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn open_pair_conflicts() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (movie, customer) = seed(&db, 3).await?;
        db.create_rental(pair(&movie, &customer)).await?;

        let report = db
            .create_rental(pair(&movie, &customer))
            .await
            .expect_err("already rented out");
        assert_eq!(report.current_context(), &KernelError::Conflict);
        assert_eq!(stock(&db, &movie).await?, 2);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn last_copy_goes_to_one_customer() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (movie, first) = seed(&db, 1).await?;
        let (_, second) = seed(&db, 1).await?;

        let a = tokio::spawn({
            let db = db.clone();
            let dto = pair(&movie, &first);
            async move { db.create_rental(dto).await }
        });
        let b = tokio::spawn({
            let db = db.clone();
            let dto = pair(&movie, &second);
            async move { db.create_rental(dto).await }
        });
        let results = [a.await, b.await];

        let succeeded = results
            .iter()
            .filter(|result| matches!(result, Ok(Ok(_))))
            .count();
        assert_eq!(succeeded, 1);
        for result in results.iter() {
            if let Ok(Err(report)) = result {
                assert_eq!(report.current_context(), &KernelError::OutOfStock);
            }
        }
        assert_eq!(db.get_all_rentals().await?.len(), 1);
        assert_eq!(stock(&db, &movie).await?, 0);
        Ok(())
    }
}
