use std::collections::btree_map::Entry;

use northwind_core::{Customer, CustomerId, CustomerService, Page, ServiceResult};

use super::{MemoryStore, row_count};

impl CustomerService for MemoryStore {
    async fn list_customers(&self, page: Page) -> ServiceResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        Ok(page.apply(tables.customers.values()).cloned().collect())
    }

    async fn get_customer(&self, id: &CustomerId) -> ServiceResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.get(id).cloned())
    }

    async fn create_customer(&self, customer: Customer) -> ServiceResult<Option<CustomerId>> {
        let mut tables = self.tables.write().await;
        match tables.customers.entry(customer.id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let id = customer.id.clone();
                slot.insert(customer);
                Ok(Some(id))
            }
        }
    }

    async fn update_customer(&self, id: &CustomerId, customer: Customer) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.customers.get_mut(id) else {
            return Ok(false);
        };
        stored.overwrite_with(customer);
        Ok(true)
    }

    async fn delete_customer(&self, id: &CustomerId) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.customers.remove(id).is_some())
    }

    async fn count_customers(&self) -> ServiceResult<u64> {
        let tables = self.tables.read().await;
        Ok(row_count(&tables.customers))
    }
}
