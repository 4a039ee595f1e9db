//! Resource-level convenience operations on [`InsightlyClient`].
//!
//! These wrap the entity traits with the list/get/add/delete calls most
//! scripts need, choosing between pagination and search and applying the
//! create-time field allow-lists.

use serde_json::{Map, Value};

use crate::client::InsightlyClient;
use crate::endpoints::Operation;
use crate::error::Result;
use crate::filter::SearchFilter;
use crate::models::{
    Contact, Opportunity, OpportunityCategory, Organisation, Relationship, User,
};
use crate::traits::{Delete, Get, List, Record, Search};

/// Optional fields for a create call, keyed by wire name (e.g. `"BACKGROUND"`).
pub type Fields = Map<String, Value>;

impl InsightlyClient {
    /// List contacts, or search them when a non-empty filter is given.
    pub async fn list_contacts(&self, filter: Option<&SearchFilter>) -> Result<Vec<Contact>> {
        list_or_search(self, filter).await
    }

    pub async fn get_contact(&self, contact_id: i64) -> Result<Contact> {
        Contact::get(self, contact_id).await
    }

    /// Create a contact.
    ///
    /// `fields` not accepted for contacts are dropped with a warning.
    pub async fn add_contact(
        &self,
        first_name: &str,
        last_name: &str,
        owner_user_id: i64,
        fields: Fields,
    ) -> Result<Contact> {
        let mut body = Fields::new();
        body.insert("FIRST_NAME".to_string(), first_name.into());
        body.insert("LAST_NAME".to_string(), last_name.into());
        body.insert("OWNER_USER_ID".to_string(), owner_user_id.into());
        create(self, body, fields).await
    }

    pub async fn delete_contact(&self, contact_id: i64) -> Result<()> {
        Contact::delete(self, contact_id).await
    }

    /// List organisations, or search them when a non-empty filter is given.
    pub async fn list_organisations(
        &self,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<Organisation>> {
        list_or_search(self, filter).await
    }

    pub async fn get_organisation(&self, organisation_id: i64) -> Result<Organisation> {
        Organisation::get(self, organisation_id).await
    }

    /// Create an organisation.
    ///
    /// `fields` not accepted for organisations are dropped with a warning.
    pub async fn add_organisation(
        &self,
        name: &str,
        owner_user_id: i64,
        fields: Fields,
    ) -> Result<Organisation> {
        let mut body = Fields::new();
        body.insert("ORGANISATION_NAME".to_string(), name.into());
        body.insert("OWNER_USER_ID".to_string(), owner_user_id.into());
        create(self, body, fields).await
    }

    pub async fn delete_organisation(&self, organisation_id: i64) -> Result<()> {
        Organisation::delete(self, organisation_id).await
    }

    /// List opportunities, or search them when a non-empty filter is given.
    pub async fn list_opportunities(
        &self,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<Opportunity>> {
        list_or_search(self, filter).await
    }

    pub async fn get_opportunity(&self, opportunity_id: i64) -> Result<Opportunity> {
        Opportunity::get(self, opportunity_id).await
    }

    /// Create an opportunity.
    ///
    /// `fields` not accepted for opportunities are dropped with a warning.
    pub async fn add_opportunity(
        &self,
        name: &str,
        owner_user_id: i64,
        fields: Fields,
    ) -> Result<Opportunity> {
        let mut body = Fields::new();
        body.insert("OPPORTUNITY_NAME".to_string(), name.into());
        body.insert("OWNER_USER_ID".to_string(), owner_user_id.into());
        create(self, body, fields).await
    }

    pub async fn delete_opportunity(&self, opportunity_id: i64) -> Result<()> {
        Opportunity::delete(self, opportunity_id).await
    }

    /// All opportunity categories, read page by page.
    pub async fn list_opportunity_categories(&self) -> Result<Vec<OpportunityCategory>> {
        OpportunityCategory::list_all(self).await
    }

    /// All relationship types, in one request.
    pub async fn list_relationships(&self) -> Result<Vec<Relationship>> {
        Relationship::list_all(self).await
    }

    /// All users, in one request.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        User::list_all(self).await
    }
}

async fn list_or_search<T: List + Search>(
    client: &InsightlyClient,
    filter: Option<&SearchFilter>,
) -> Result<Vec<T>> {
    match filter {
        Some(filter) if !filter.is_empty() => T::search(client, filter).await,
        _ => T::list_all(client).await,
    }
}

async fn create<T: Record>(client: &InsightlyClient, mut body: Fields, fields: Fields) -> Result<T> {
    let resource = T::RESOURCE;

    for (key, value) in fields {
        if resource.accepts(&key) {
            body.insert(key, value);
        } else {
            tracing::warn!(resource = %resource, field = %key, "Field not accepted, ignored");
        }
    }

    let endpoint = resource.endpoint(Operation::Add)?;
    let response = client.send_json(endpoint.method, endpoint.path, &body).await?;
    let created: T = response.into_json()?;

    tracing::debug!("Created {} {:?}", T::ENTITY, created.id());
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::Resource;

    #[test]
    fn test_required_create_fields_are_accepted() {
        for (resource, field) in [
            (Resource::Contacts, "FIRST_NAME"),
            (Resource::Contacts, "OWNER_USER_ID"),
            (Resource::Organisations, "ORGANISATION_NAME"),
            (Resource::Opportunities, "OPPORTUNITY_NAME"),
        ] {
            assert!(resource.accepts(field), "{resource} {field}");
        }
    }

    #[test]
    fn test_allow_list_is_case_sensitive() {
        assert!(Resource::Contacts.accepts("BACKGROUND"));
        assert!(!Resource::Contacts.accepts("background"));
        assert!(!Resource::Contacts.accepts("NOT_A_FIELD"));
    }
}
