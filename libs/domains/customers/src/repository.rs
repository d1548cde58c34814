use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{Customer, NewCustomer};

/// Persistence port for customers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert and return the stored row. A unique-email violation is
    /// reported as `DuplicateEmail`.
    async fn create(&self, input: NewCustomer) -> CustomerResult<Customer>;

    async fn get_by_id(&self, id: i64) -> CustomerResult<Option<Customer>>;

    async fn get_by_email(&self, email: &str) -> CustomerResult<Option<Customer>>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    customers: BTreeMap<i64, Customer>,
}

/// In-memory implementation of CustomerRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, input: NewCustomer) -> CustomerResult<Customer> {
        let mut store = self.store.write().await;

        if store.customers.values().any(|c| c.email == input.email) {
            return Err(CustomerError::DuplicateEmail(input.email));
        }

        store.next_id += 1;
        let now = Utc::now();
        let customer = Customer {
            id: store.next_id,
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };
        store.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_by_id(&self, id: i64) -> CustomerResult<Option<Customer>> {
        Ok(self.store.read().await.customers.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> CustomerResult<Option<Customer>> {
        let store = self.store.read().await;
        Ok(store.customers.values().find(|c| c.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str, email: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let repo = InMemoryCustomerRepository::new();

        let first = repo.create(new_customer("ebuka", "ebuka@x.com")).await.unwrap();
        let second = repo.create(new_customer("ada", "ada@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_by_email("ada@x.com").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_under_lock() {
        let repo = InMemoryCustomerRepository::new();
        repo.create(new_customer("ebuka", "ebuka@x.com")).await.unwrap();

        let result = repo.create(new_customer("someone else", "ebuka@x.com")).await;
        assert!(matches!(result, Err(CustomerError::DuplicateEmail(_))));
        assert!(repo.get_by_id(2).await.unwrap().is_none());
    }
}
