//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::InsightlyClient;
use crate::endpoints::Operation;
use crate::error::Result;
use crate::traits::Record;

/// Delete an entity by ID.
///
/// Deletion does not touch any local copy of the entity.
#[async_trait]
pub trait Delete: Record {
    /// Delete the entity with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    #[tracing::instrument(skip(client))]
    async fn delete(client: &InsightlyClient, id: i64) -> Result<()> {
        let endpoint = Self::RESOURCE.endpoint(Operation::Delete)?;
        client.request(endpoint.method.clone(), &endpoint.path_for(id)).await?;

        tracing::info!("Deleted {} {}", Self::ENTITY, id);
        Ok(())
    }
}
