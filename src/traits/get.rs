//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::InsightlyClient;
use crate::endpoints::Operation;
use crate::error::Result;
use crate::traits::Record;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use insightly::{InsightlyClient, Contact, Get};
///
/// let client = InsightlyClient::from_env()?;
/// let contact = Contact::get(&client, 1234).await?;
/// ```
#[async_trait]
pub trait Get: Record {
    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InsightlyError::NotFound`] if the entity does not
    /// exist, or another error if the request fails.
    #[tracing::instrument(skip(client))]
    async fn get(client: &InsightlyClient, id: i64) -> Result<Self> {
        let endpoint = Self::RESOURCE.endpoint(Operation::Get)?;
        let response = client.request(endpoint.method.clone(), &endpoint.path_for(id)).await?;
        response.into_json()
    }
}
