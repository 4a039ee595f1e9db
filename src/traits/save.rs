//! Save trait for creating, updating and refreshing entities.

use async_trait::async_trait;

use crate::client::InsightlyClient;
use crate::endpoints::Operation;
use crate::error::{InsightlyError, Result};
use crate::traits::Record;

/// Persist local changes to an entity, or refresh it from the server.
///
/// # Example
///
/// ```ignore
/// use insightly::{InsightlyClient, Organisation, Save};
///
/// let client = InsightlyClient::from_env()?;
/// let mut org = Organisation::new("Acme Ltd");
/// org.save(&client).await?; // created, id assigned
///
/// org.website = Some("https://acme.example".to_string());
/// org.save(&client).await?; // updated
/// ```
#[async_trait]
pub trait Save: Record {
    /// Replace local state with the server's copy.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::MissingId`] for an entity that was never
    /// saved, or an error if the request fails.
    async fn fetch(&mut self, client: &InsightlyClient) -> Result<()> {
        let id = self.require_id()?;
        let endpoint = Self::RESOURCE.endpoint(Operation::Get)?;

        let response = client.request(endpoint.method.clone(), &endpoint.path_for(id)).await?;
        *self = response.into_json()?;
        Ok(())
    }

    /// Create the entity if it has no ID, otherwise update it.
    ///
    /// The whole entity is sent as the request body. Local state is
    /// replaced with the server's response, which includes the assigned ID
    /// and any server-populated defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a create response carries
    /// no identifier.
    async fn save(&mut self, client: &InsightlyClient) -> Result<()> {
        let body = self.to_json()?;

        let saved: Self = match self.id() {
            None => {
                let endpoint = Self::RESOURCE.endpoint(Operation::Add)?;
                let response = client.send_json(endpoint.method, endpoint.path, &body).await?;
                let saved: Self = response.into_json()?;
                if saved.is_new() {
                    return Err(InsightlyError::UnexpectedResponse(format!(
                        "created {} has no identifier",
                        Self::ENTITY
                    )));
                }
                tracing::debug!("Created {} {:?}", Self::ENTITY, saved.id());
                saved
            }
            Some(id) => {
                let endpoint = Self::RESOURCE.endpoint(Operation::Update)?;
                let response = client
                    .send_json(endpoint.method.clone(), &endpoint.path_for(id), &body)
                    .await?;
                response.into_json()?
            }
        };

        *self = saved;
        Ok(())
    }
}
