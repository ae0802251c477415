//! # Customer Repository
//!
//! Backend operations for the customer directory.

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::dto::CustomerDto;
use crate::error::ClientResult;
use sitebill_core::Customer;

/// Repository for customer operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    client: ApiClient,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(client: ApiClient) -> Self {
        CustomerRepository { client }
    }

    /// Fetches all customers.
    pub async fn list(&self) -> ClientResult<Vec<Customer>> {
        debug!("Listing customers");

        let dtos: Vec<CustomerDto> = self.client.get_json("/api/customers").await?;
        Ok(dtos.into_iter().map(CustomerDto::into_domain).collect())
    }

    /// Creates a customer.
    pub async fn create(&self, customer: &Customer) -> ClientResult<Customer> {
        debug!(name = %customer.name, "Creating customer");

        let created: CustomerDto = self
            .client
            .post_json("/api/customers", &CustomerDto::from_domain(customer))
            .await?;

        info!(name = %customer.name, "Customer created");
        Ok(created.into_domain())
    }

    /// Updates an existing customer.
    pub async fn update(&self, customer: &Customer) -> ClientResult<Customer> {
        debug!(customer_id = %customer.id, "Updating customer");

        let updated: CustomerDto = self
            .client
            .patch_json(
                &format!("/api/customers/{}", customer.id),
                &CustomerDto::from_domain(customer),
            )
            .await?;

        Ok(updated.into_domain())
    }

    /// Deletes a customer.
    pub async fn delete(&self, customer_id: &str) -> ClientResult<()> {
        debug!(customer_id = %customer_id, "Deleting customer");

        self.client
            .delete(&format!("/api/customers/{}", customer_id))
            .await
    }
}
