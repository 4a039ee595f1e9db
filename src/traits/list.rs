//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::InsightlyClient;
use crate::endpoints::{Operation, DEFAULT_TOP};
use crate::error::Result;
use crate::pagination::{collect_all, Page, PaginationParams};
use crate::traits::Record;

/// List entities from a `GetAll` endpoint.
///
/// Endpoints with a page size paginate with `skip`/`top`; the others
/// return the whole collection from one request.
///
/// # Example
///
/// ```ignore
/// use insightly::{InsightlyClient, Contact, List};
///
/// let client = InsightlyClient::from_env()?;
///
/// // Fetch a single page
/// let page = Contact::list_page(&client, 0, 50).await?;
///
/// // Fetch all pages
/// let all_contacts = Contact::list_all(&client).await?;
/// ```
#[async_trait]
pub trait List: Record {
    /// Page size configured for this resource's `GetAll` endpoint.
    fn page_size() -> Result<u32> {
        let endpoint = Self::RESOURCE.endpoint(Operation::GetAll)?;
        Ok(endpoint.default_top.unwrap_or(DEFAULT_TOP))
    }

    /// Fetch one page of entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(client))]
    async fn list_page(client: &InsightlyClient, skip: u32, top: u32) -> Result<Page<Self>> {
        let endpoint = Self::RESOURCE.endpoint(Operation::GetAll)?;
        let params = PaginationParams::window(skip, top);

        let response = client.get_with_query(endpoint.path, &params).await?;
        let items: Vec<Self> = response.into_json()?;

        Ok(Page::new(items, skip, top))
    }

    /// Fetch every entity.
    ///
    /// Paginated endpoints are read one page at a time, stopping at the
    /// first page that is empty or shorter than the page size.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails.
    async fn list_all(client: &InsightlyClient) -> Result<Vec<Self>> {
        let endpoint = Self::RESOURCE.endpoint(Operation::GetAll)?;

        match endpoint.default_top {
            Some(top) => collect_all(top, |skip, top| Self::list_page(client, skip, top)).await,
            None => client.get(endpoint.path).await?.into_json(),
        }
    }
}
