use std::ops::Deref;
use std::sync::Arc;

use driver::auth::{BcryptPasswordHasher, JwtAuthenticator};
use driver::database::{MemoryDatabase, PostgresDatabase};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    DependOnCustomerQuery, DependOnGenreQuery, DependOnMovieQuery, DependOnRentalQuery,
    DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnCustomerModifier, DependOnGenreModifier, DependOnMovieModifier,
    DependOnRentalModifier, DependOnUserModifier,
};
use kernel::KernelError;

/// Every store the routes can be served from.
pub trait Database:
    DatabaseConnection
    + DependOnGenreQuery
    + DependOnGenreModifier
    + DependOnMovieQuery
    + DependOnMovieModifier
    + DependOnCustomerQuery
    + DependOnCustomerModifier
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnUserQuery
    + DependOnUserModifier
{
}

impl<T> Database for T where
    T: DatabaseConnection
        + DependOnGenreQuery
        + DependOnGenreModifier
        + DependOnMovieQuery
        + DependOnMovieModifier
        + DependOnCustomerQuery
        + DependOnCustomerModifier
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnUserQuery
        + DependOnUserModifier
{
}

pub struct AppModule<Db>(Arc<Handler<Db>>);

impl<Db> AppModule<Db> {
    pub fn new(handler: Handler<Db>) -> Self {
        Self(Arc::new(handler))
    }
}

impl<Db> Clone for AppModule<Db> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<Db> Deref for AppModule<Db> {
    type Target = Handler<Db>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<Db> {
    database: Db,
    authenticator: JwtAuthenticator,
    hasher: BcryptPasswordHasher,
}

impl<Db> Handler<Db> {
    pub fn new(database: Db, authenticator: JwtAuthenticator, hasher: BcryptPasswordHasher) -> Self {
        Self {
            database,
            authenticator,
            hasher,
        }
    }

    pub fn database(&self) -> &Db {
        &self.database
    }

    pub fn authenticator(&self) -> &JwtAuthenticator {
        &self.authenticator
    }

    pub fn hasher(&self) -> &BcryptPasswordHasher {
        &self.hasher
    }
}

impl Handler<PostgresDatabase> {
    pub async fn init(url: &str) -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::connect(url).await?;
        Ok(Self::new(
            database,
            JwtAuthenticator::from_env()?,
            BcryptPasswordHasher::from_env()?,
        ))
    }
}

impl Handler<MemoryDatabase> {
    pub fn init_in_memory() -> error_stack::Result<Self, KernelError> {
        Ok(Self::new(
            MemoryDatabase::new(),
            JwtAuthenticator::from_env()?,
            BcryptPasswordHasher::from_env()?,
        ))
    }
}
