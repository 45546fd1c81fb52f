use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{Customer, CustomerId, CustomerName, CustomerPhone, IsGold};
use kernel::KernelError;

use crate::transfer::{
    CreateCustomerDto, CustomerDto, DeleteCustomerDto, GetCustomerDto, UpdateCustomerDto,
};

fn customer_not_found() -> Report<KernelError> {
    KernelError::NotFound.with_message("The customer with the given ID was not found.")
}

#[async_trait::async_trait]
pub trait GetCustomerService: 'static + Sync + Send + DependOnCustomerQuery {
    #[tracing::instrument(skip(self))]
    async fn get_all_customers(&self) -> error_stack::Result<Vec<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let customers = self.customer_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_customer(
        &self,
        dto: GetCustomerDto,
    ) -> error_stack::Result<Option<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &CustomerId::new(dto.id))
            .await?;
        connection.commit().await?;
        Ok(customer.map(CustomerDto::from))
    }
}

impl<T> GetCustomerService for T where T: DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait CreateCustomerService: 'static + Sync + Send + DependOnCustomerModifier {
    #[tracing::instrument(skip(self))]
    async fn create_customer(
        &self,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new(dto.name),
            CustomerPhone::new(dto.phone),
            IsGold::new(dto.is_gold),
        );
        self.customer_modifier()
            .create(&mut connection, &customer)
            .await?;
        connection.commit().await?;
        Ok(CustomerDto::from(customer))
    }
}

impl<T> CreateCustomerService for T where T: DependOnCustomerModifier {}

#[async_trait::async_trait]
pub trait UpdateCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    #[tracing::instrument(skip(self))]
    async fn update_customer(
        &self,
        dto: UpdateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &CustomerId::new(dto.id))
            .await?
            .ok_or_else(customer_not_found)?;

        let customer = customer.reconstruct(|c| {
            c.name = CustomerName::new(dto.name);
            c.phone = CustomerPhone::new(dto.phone);
            c.is_gold = IsGold::new(dto.is_gold);
        });
        self.customer_modifier()
            .update(&mut connection, &customer)
            .await?;
        connection.commit().await?;
        Ok(CustomerDto::from(customer))
    }
}

impl<T> UpdateCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}

#[async_trait::async_trait]
pub trait DeleteCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    #[tracing::instrument(skip(self))]
    async fn delete_customer(
        &self,
        dto: DeleteCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = CustomerId::new(dto.id);
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(customer_not_found)?;

        self.customer_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        Ok(CustomerDto::from(customer))
    }
}

impl<T> DeleteCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use driver::database::MemoryDatabase;
    use kernel::KernelError;

    use crate::service::{
        CreateCustomerService, DeleteCustomerService, GetCustomerService, UpdateCustomerService,
    };
    use crate::transfer::{
        CreateCustomerDto, DeleteCustomerDto, GetCustomerDto, UpdateCustomerDto,
    };

    #[tokio::test]
    async fn customer_lifecycle() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let created = db
            .create_customer(CreateCustomerDto {
                name: "Mosh Hamedani".into(),
                phone: "12345".into(),
                is_gold: false,
            })
            .await?;
        assert!(!created.is_gold);

        let updated = db
            .update_customer(UpdateCustomerDto {
                id: created.id,
                name: created.name.clone(),
                phone: "54321".into(),
                is_gold: true,
            })
            .await?;
        assert_eq!(updated.phone, "54321");
        assert!(updated.is_gold);

        let found = db.get_customer(GetCustomerDto { id: created.id }).await?;
        assert_eq!(found, Some(updated.clone()));
        assert_eq!(db.get_all_customers().await?, vec![updated.clone()]);

        let deleted = db
            .delete_customer(DeleteCustomerDto { id: created.id })
            .await?;
        assert_eq!(deleted, updated);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_absent_customer_is_not_found() {
        let db = MemoryDatabase::new();
        let report = db
            .delete_customer(DeleteCustomerDto { id: Uuid::new_v4() })
            .await
            .expect_err("nothing to delete");
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }
}
