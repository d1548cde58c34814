use std::sync::Arc;

use crate::{
    error::{CustomerError, CustomerResult},
    models::{Customer, NewCustomer},
    repository::CustomerRepository,
};

/// Customer use cases
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a customer from untrusted input.
    ///
    /// Checks run in order: blank name, blank email, existing email. The
    /// unique index still backs the email check, so a concurrent signup that
    /// slips past the lookup fails with the same conflict.
    pub async fn create_customer(&self, name: &str, email: &str) -> CustomerResult<Customer> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(CustomerError::Validation("name cannot be empty".to_string()));
        }
        if email.is_empty() {
            return Err(CustomerError::Validation("email cannot be empty".to_string()));
        }

        if self.repository.get_by_email(email).await?.is_some() {
            return Err(CustomerError::DuplicateEmail(email.to_string()));
        }

        let customer = self
            .repository
            .create(NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;

        tracing::info!(customer_id = customer.id, "Created customer");
        Ok(customer)
    }

    pub async fn get_customer_by_id(&self, id: i64) -> CustomerResult<Customer> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }
}
