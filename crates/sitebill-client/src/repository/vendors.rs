//! # Vendor Repository
//!
//! Backend operations for the vendor/subcontractor directory.

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::dto::VendorDto;
use crate::error::ClientResult;
use sitebill_core::Vendor;

/// Repository for vendor operations.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    client: ApiClient,
}

impl VendorRepository {
    /// Creates a new VendorRepository.
    pub fn new(client: ApiClient) -> Self {
        VendorRepository { client }
    }

    /// Fetches all vendors.
    pub async fn list(&self) -> ClientResult<Vec<Vendor>> {
        debug!("Listing vendors");

        let dtos: Vec<VendorDto> = self.client.get_json("/api/vendors").await?;
        Ok(dtos.into_iter().map(VendorDto::into_domain).collect())
    }

    /// Creates a vendor.
    pub async fn create(&self, vendor: &Vendor) -> ClientResult<Vendor> {
        debug!(name = %vendor.name, "Creating vendor");

        let created: VendorDto = self
            .client
            .post_json("/api/vendors", &VendorDto::from_domain(vendor))
            .await?;

        info!(name = %vendor.name, "Vendor created");
        Ok(created.into_domain())
    }

    /// Updates an existing vendor.
    pub async fn update(&self, vendor: &Vendor) -> ClientResult<Vendor> {
        debug!(vendor_id = %vendor.id, "Updating vendor");

        let updated: VendorDto = self
            .client
            .patch_json(
                &format!("/api/vendors/{}", vendor.id),
                &VendorDto::from_domain(vendor),
            )
            .await?;

        Ok(updated.into_domain())
    }

    /// Deletes a vendor.
    pub async fn delete(&self, vendor_id: &str) -> ClientResult<()> {
        debug!(vendor_id = %vendor_id, "Deleting vendor");

        self.client
            .delete(&format!("/api/vendors/{}", vendor_id))
            .await
    }
}
