//! Search trait for filtered queries.

use async_trait::async_trait;

use crate::client::InsightlyClient;
use crate::endpoints::Operation;
use crate::error::Result;
use crate::filter::SearchFilter;
use crate::traits::Record;

/// Query a resource's `Search` endpoint with field filters.
///
/// # Example
///
/// ```ignore
/// use insightly::{InsightlyClient, Contact, Search, SearchFilter};
///
/// let client = InsightlyClient::from_env()?;
/// let filter = SearchFilter::new().with("email", "jane@example.com");
/// let contacts = Contact::search(&client, &filter).await?;
/// ```
#[async_trait]
pub trait Search: Record {
    /// Issue a single search request. Results are not paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(client))]
    async fn search(client: &InsightlyClient, filter: &SearchFilter) -> Result<Vec<Self>> {
        let endpoint = Self::RESOURCE.endpoint(Operation::Search)?;
        let path = format!("{}?{}", endpoint.path, filter.to_query_string());

        let response = client.request(endpoint.method, &path).await?;
        response.into_json()
    }
}
