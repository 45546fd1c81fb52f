use std::sync::Arc;

use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{Customer, CustomerId};
use kernel::KernelError;

use crate::database::memory::{MemoryDatabase, MemoryTransaction};

pub struct MemoryCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for MemoryCustomerRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        let mut customers = con.staged.customers.values().cloned().collect::<Vec<_>>();
        customers.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(customers)
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con.staged.customers.get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl CustomerModifier for MemoryCustomerRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        Arc::make_mut(&mut con.staged.customers)
            .insert(*customer.id().as_ref(), customer.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        let customers = Arc::make_mut(&mut con.staged.customers);
        if let Some(stored) = customers.get_mut(customer.id().as_ref()) {
            *stored = customer.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        Arc::make_mut(&mut con.staged.customers).remove(customer_id.as_ref());
        Ok(())
    }
}

impl DependOnCustomerQuery for MemoryDatabase {
    type CustomerQuery = MemoryCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &MemoryCustomerRepository
    }
}

impl DependOnCustomerModifier for MemoryDatabase {
    type CustomerModifier = MemoryCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &MemoryCustomerRepository
    }
}
