use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{customer::*, genre::*, movie::*, rental::*, user::*};

mod customer;
mod genre;
mod movie;
mod rental;
mod user;

static DATABASE_URL: &str = "DATABASE_URL";

const SCHEMA: [&str; 6] = [
    // language=postgresql
    r#"
    CREATE TABLE IF NOT EXISTS genres (
        id   UUID PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    // language=postgresql
    r#"
    CREATE TABLE IF NOT EXISTS movies (
        id                UUID PRIMARY KEY,
        title             TEXT    NOT NULL,
        genre_id          UUID    NOT NULL,
        genre_name        TEXT    NOT NULL,
        number_in_stock   INTEGER NOT NULL CHECK (number_in_stock BETWEEN 0 AND 255),
        daily_rental_rate INTEGER NOT NULL CHECK (daily_rental_rate BETWEEN 0 AND 255)
    )
    "#,
    // language=postgresql
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id      UUID PRIMARY KEY,
        name    TEXT    NOT NULL,
        phone   TEXT    NOT NULL,
        is_gold BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    // language=postgresql
    r#"
    CREATE TABLE IF NOT EXISTS rentals (
        id                      UUID PRIMARY KEY,
        customer_id             UUID        NOT NULL,
        customer_name           TEXT        NOT NULL,
        customer_phone          TEXT        NOT NULL,
        customer_is_gold        BOOLEAN     NOT NULL,
        movie_id                UUID        NOT NULL,
        movie_title             TEXT        NOT NULL,
        movie_daily_rental_rate INTEGER     NOT NULL,
        date_out                TIMESTAMPTZ NOT NULL,
        date_returned           TIMESTAMPTZ,
        rental_fee              BIGINT
    )
    "#,
    // language=postgresql
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS rentals_open_pair
        ON rentals (customer_id, movie_id)
        WHERE date_returned IS NULL
    "#,
    // language=postgresql
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id       UUID PRIMARY KEY,
        name     TEXT    NOT NULL,
        email    TEXT    NOT NULL UNIQUE,
        password TEXT    NOT NULL,
        is_admin BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
];

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(DATABASE_URL)?;
        Self::connect(&url).await
    }

    /// Connects and makes sure every table exists.
    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let pool = PgPoolOptions::new().connect(url).await.convert_error()?;
        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .convert_error()?;
        }
        tracing::info!("database schema is ready");
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(e) if e.code().as_deref() == Some("40001") => {
                    KernelError::Concurrency
                }
                Error::Database(e) if e.code().as_deref() == Some("23505") => {
                    KernelError::Conflict
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
