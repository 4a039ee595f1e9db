//! Insightly CRM API client library.
//!
//! A Rust library for the Insightly REST API (v2.x). Entities are plain
//! serde structs; each operation an endpoint supports (Get, List, Search,
//! Save, Delete) is a trait with a default implementation driven by the
//! endpoint table in [`endpoints`].
//!
//! # Quick Start
//!
//! ```no_run
//! use insightly::{Contact, Get, InsightlyClient, List, Save, SearchFilter};
//!
//! #[tokio::main]
//! async fn main() -> insightly::Result<()> {
//!     // Create client from environment variables
//!     let client = InsightlyClient::from_env()?;
//!
//!     // Fetch one contact and change it
//!     let mut contact = Contact::get(&client, 1234).await?;
//!     contact.title = Some("CTO".to_string());
//!     contact.save(&client).await?;
//!
//!     // Read every organisation, page by page
//!     let organisations = client.list_organisations(None).await?;
//!     println!("Found {} organisations", organisations.len());
//!
//!     // Search
//!     let filter = SearchFilter::new().with("email", "jane@example.com");
//!     let matches = client.list_contacts(Some(&filter)).await?;
//!     println!("Found {} matching contacts", matches.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`InsightlyClient`]: authenticated transport, one request at a time
//! - [`Get`], [`List`], [`Search`], [`Save`], [`Delete`]: per-operation traits
//! - [`Contact`], [`Organisation`], [`Opportunity`]: editable entities with
//!   link management
//! - [`User`], [`Relationship`], [`OpportunityCategory`]: read-only lists
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `INSIGHTLY_API_KEY` (required) - Your Insightly API key
//! - `INSIGHTLY_API_URL` (optional) - Base URL template, `{version}` is
//!   replaced (defaults to `https://api.insight.ly/v{version}/`)
//! - `INSIGHTLY_API_VERSION` (optional) - API version (defaults to `2.3`)

mod client;
pub mod endpoints;
mod error;
mod facade;
mod filter;
mod models;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ApiResponse, FilePayload, InsightlyClient};
pub use error::{InsightlyError, Result};
pub use facade::Fields;
pub use filter::SearchFilter;
pub use pagination::{collect_all, Page, PaginationParams};

// Re-export traits
pub use traits::{Delete, Get, List, Record, Save, Search};

// Re-export models
pub use models::{
    timestamp,
    // Shared value types
    Address,
    // Contacts
    Contact,
    ContactLink,
    CustomField,
    // Links
    Link,
    LinkTarget,
    LinkUpdate,
    // Opportunities
    Opportunity,
    OpportunityCategory,
    OpportunityLink,
    OpportunityState,
    // Organisations
    Organisation,
    OrganisationLink,
    PeerLinkUpdate,
    // Read-only lists
    Relationship,
    Tag,
    User,
    Visibility,
};
