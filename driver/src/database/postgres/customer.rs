use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{Customer, CustomerId, CustomerName, CustomerPhone, IsGold};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for PostgresCustomerRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        PgCustomerInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        PgCustomerInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl CustomerModifier for PostgresCustomerRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::create(con, customer).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::update(con, customer).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::delete(con, customer_id).await
    }
}

impl DependOnCustomerQuery for PostgresDatabase {
    type CustomerQuery = PostgresCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &PostgresCustomerRepository
    }
}

impl DependOnCustomerModifier for PostgresDatabase {
    type CustomerModifier = PostgresCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &PostgresCustomerRepository
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    phone: String,
    is_gold: bool,
}

impl From<CustomerRow> for Customer {
    fn from(value: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(value.id),
            CustomerName::new(value.name),
            CustomerPhone::new(value.phone),
            IsGold::new(value.is_gold),
        )
    }
}

pub(in crate::database) struct PgCustomerInternal;

impl PgCustomerInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Customer>, KernelError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, name, phone, is_gold
            FROM customers
            ORDER BY name
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, name, phone, is_gold
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }

    async fn create(
        con: &mut PgConnection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, phone, is_gold)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.is_gold().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, phone = $3, is_gold = $4
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.is_gold().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::CustomerQuery;
    use kernel::interface::update::CustomerModifier;
    use kernel::prelude::entity::{Customer, CustomerId, CustomerName, CustomerPhone, IsGold};
    use kernel::KernelError;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::PostgresCustomerRepository;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = CustomerId::new(Uuid::new_v4());

        let customer = Customer::new(
            id,
            CustomerName::new("Mosh"),
            CustomerPhone::new("12345"),
            IsGold::new(false),
        );
        PostgresCustomerRepository.create(&mut con, &customer).await?;

        let found = PostgresCustomerRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(customer.clone()));

        let customer = customer.reconstruct(|c| c.is_gold = IsGold::new(true));
        PostgresCustomerRepository.update(&mut con, &customer).await?;

        let found = PostgresCustomerRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(customer));

        PostgresCustomerRepository.delete(&mut con, &id).await?;
        let found = PostgresCustomerRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        con.roll_back().await
    }
}
