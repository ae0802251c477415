//! # Contract Repository
//!
//! Backend operations for contracts.
//!
//! Contract parsing (turning an uploaded contract into orders and line
//! items) happens backend-side; this repository only reads and maintains
//! the contract records themselves.

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::dto::ContractDto;
use crate::error::ClientResult;
use sitebill_core::Contract;

/// Repository for contract operations.
#[derive(Debug, Clone)]
pub struct ContractRepository {
    client: ApiClient,
}

impl ContractRepository {
    /// Creates a new ContractRepository.
    pub fn new(client: ApiClient) -> Self {
        ContractRepository { client }
    }

    /// Fetches all contracts.
    pub async fn list(&self) -> ClientResult<Vec<Contract>> {
        debug!("Listing contracts");

        let dtos: Vec<ContractDto> = self.client.get_json("/api/contracts").await?;
        Ok(dtos.into_iter().map(ContractDto::into_domain).collect())
    }

    /// Creates a contract.
    pub async fn create(&self, contract: &Contract) -> ClientResult<Contract> {
        debug!(contract_number = %contract.contract_number, "Creating contract");

        let created: ContractDto = self
            .client
            .post_json("/api/contracts", &ContractDto::from_domain(contract))
            .await?;

        info!(contract_number = %contract.contract_number, "Contract created");
        Ok(created.into_domain())
    }

    /// Updates an existing contract.
    pub async fn update(&self, contract: &Contract) -> ClientResult<Contract> {
        debug!(contract_id = %contract.id, "Updating contract");

        let updated: ContractDto = self
            .client
            .patch_json(
                &format!("/api/contracts/{}", contract.id),
                &ContractDto::from_domain(contract),
            )
            .await?;

        Ok(updated.into_domain())
    }

    /// Deletes a contract.
    pub async fn delete(&self, contract_id: &str) -> ClientResult<()> {
        debug!(contract_id = %contract_id, "Deleting contract");

        self.client
            .delete(&format!("/api/contracts/{}", contract_id))
            .await
    }
}
