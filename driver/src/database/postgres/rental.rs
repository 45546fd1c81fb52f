use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut, DateReturned, IsGold,
    MovieId, MovieTitle, Rental, RentalCustomer, RentalFee, RentalId, RentalMovie,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn lookup(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::lookup(con, customer_id, movie_id).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn close(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::close(con, rental).await
    }
}

impl DependOnRentalQuery for PostgresDatabase {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier for PostgresDatabase {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &PostgresRentalRepository
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    customer_phone: String,
    customer_is_gold: bool,
    movie_id: Uuid,
    movie_title: String,
    movie_daily_rental_rate: i32,
    date_out: OffsetDateTime,
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<i64>,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            RentalMovie::new(
                MovieId::new(value.movie_id),
                MovieTitle::new(value.movie_title),
                DailyRentalRate::new(value.movie_daily_rental_rate),
            ),
            RentalCustomer::new(
                CustomerId::new(value.customer_id),
                CustomerName::new(value.customer_name),
                CustomerPhone::new(value.customer_phone),
                IsGold::new(value.customer_is_gold),
            ),
            DateOut::new(value.date_out),
            value.date_returned.map(DateReturned::new),
            value.rental_fee.map(RentalFee::new),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, customer_id, customer_name, customer_phone, customer_is_gold,
                   movie_id, movie_title, movie_daily_rental_rate,
                   date_out, date_returned, rental_fee
            FROM rentals
            ORDER BY date_out DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, customer_id, customer_name, customer_phone, customer_is_gold,
                   movie_id, movie_title, movie_daily_rental_rate,
                   date_out, date_returned, rental_fee
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn lookup(
        con: &mut PgConnection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, customer_id, customer_name, customer_phone, customer_is_gold,
                   movie_id, movie_title, movie_daily_rental_rate,
                   date_out, date_returned, rental_fee
            FROM rentals
            WHERE customer_id = $1 AND movie_id = $2
            ORDER BY (date_returned IS NULL) DESC, date_out DESC
            LIMIT 1
            "#,
        )
        .bind(customer_id.as_ref())
        .bind(movie_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            INSERT INTO rentals (id, customer_id, customer_name, customer_phone, customer_is_gold,
                                 movie_id, movie_title, movie_daily_rental_rate,
                                 date_out, date_returned, rental_fee)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (customer_id, movie_id) WHERE date_returned IS NULL DO NOTHING
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.customer().id().as_ref())
        .bind(rental.customer().name().as_ref())
        .bind(rental.customer().phone().as_ref())
        .bind(rental.customer().is_gold().as_ref())
        .bind(rental.movie().id().as_ref())
        .bind(rental.movie().title().as_ref())
        .bind(rental.movie().daily_rental_rate().as_ref())
        .bind(rental.date_out().as_ref())
        .bind(rental.date_returned().map(|date| *date.as_ref()))
        .bind(rental.rental_fee().map(|fee| *fee.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(KernelError::Conflict
                .with_message("The customer already has this movie rented out."));
        }
        tracing::debug!("opened rental {}", rental.id().as_ref());
        Ok(())
    }

    async fn close(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET date_returned = $2, rental_fee = $3
            WHERE id = $1 AND date_returned IS NULL
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.date_returned().map(|date| *date.as_ref()))
        .bind(rental.rental_fee().map(|fee| *fee.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(KernelError::AlreadyReturned.with_message("Return already processed."));
        }
        tracing::debug!("closed rental {}", rental.id().as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut,
        DateReturned, Genre, GenreId, GenreName, IsGold, Movie, MovieId, MovieTitle,
        NumberInStock, Rental, RentalId,
    };
    use kernel::KernelError;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::PostgresRentalRepository;

    fn now() -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        now.replace_nanosecond(0).unwrap_or(now)
    }

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

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let (movie, customer) = fixtures();
        let out = now() - Duration::days(3);

        let rental = Rental::open(RentalId::new(Uuid::new_v4()), &movie, &customer, DateOut::new(out));
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let duplicate = Rental::open(RentalId::new(Uuid::new_v4()), &movie, &customer, DateOut::new(out));
        let report = PostgresRentalRepository
            .create(&mut con, &duplicate)
            .await
            .expect_err("pair already rented");
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let found = PostgresRentalRepository
            .lookup(&mut con, customer.id(), movie.id())
            .await?;
        assert_eq!(found, Some(rental.clone()));

        let closed = rental.close(DateReturned::new(now()))?;
        PostgresRentalRepository.close(&mut con, &closed).await?;
        let found = PostgresRentalRepository.find_by_id(&mut con, closed.id()).await?;
        assert_eq!(found, Some(closed.clone()));

        let report = PostgresRentalRepository
            .close(&mut con, &closed)
            .await
            .expect_err("already closed");
        assert_eq!(report.current_context(), &KernelError::AlreadyReturned);

        con.roll_back().await
    }
}
