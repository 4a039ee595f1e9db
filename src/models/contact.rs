//! Contact model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InsightlyClient;
use crate::endpoints::{Operation, Resource};
use crate::error::{InsightlyError, Result};
use crate::models::common::{address_accessors, Tag, Visibility};
use crate::models::custom_field::{self, CustomField};
use crate::models::link::{
    replace_or_push, send_link, ContactLink, Link, LinkTarget, LinkUpdate, PeerLinkUpdate,
};
use crate::models::timestamp;
use crate::traits::{Delete, Get, List, Record, Save, Search};

/// An Insightly contact.
///
/// Contacts carry two postal addresses (mail and other), custom fields,
/// tags, and links to organisations, opportunities and other contacts.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    pub salutation: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub background: Option<String>,
    pub date_of_birth: Option<String>,
    pub email_address: Option<String>,
    pub image_url: Option<String>,

    pub organisation_id: Option<i64>,
    pub default_linked_organisation: Option<i64>,
    pub owner_user_id: Option<i64>,

    pub phone: Option<String>,
    pub phone_fax: Option<String>,
    pub phone_home: Option<String>,
    pub phone_mobile: Option<String>,
    pub phone_other: Option<String>,
    pub phone_assistant: Option<String>,
    pub assistant_name: Option<String>,

    pub social_facebook: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_twitter: Option<String>,

    pub address_mail_street: Option<String>,
    pub address_mail_city: Option<String>,
    pub address_mail_state: Option<String>,
    pub address_mail_postcode: Option<String>,
    pub address_mail_country: Option<String>,
    pub address_other_street: Option<String>,
    pub address_other_city: Option<String>,
    pub address_other_state: Option<String>,
    pub address_other_postcode: Option<String>,
    pub address_other_country: Option<String>,

    pub visible_to: Option<Visibility>,
    pub visible_team_id: Option<i64>,
    pub visible_user_ids: Option<String>,
    pub can_edit: Option<bool>,
    pub can_delete: Option<bool>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "CUSTOMFIELDS")]
    pub custom_fields: Vec<CustomField>,
    #[serde_as(as = "DefaultOnNull")]
    pub tags: Vec<Tag>,
    #[serde_as(as = "DefaultOnNull")]
    pub dates: Vec<Value>,
    #[serde_as(as = "DefaultOnNull")]
    pub links: Vec<Link>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "CONTACTLINKS")]
    pub contact_links: Vec<ContactLink>,

    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_updated_utc: Option<DateTime<Utc>>,
}

impl Contact {
    /// A new, unsaved contact.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Default::default()
        }
    }

    /// First and last name joined with a space, skipping missing parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    address_accessors!(
        mail_address,
        set_mail_address,
        address_mail_street,
        address_mail_city,
        address_mail_state,
        address_mail_postcode,
        address_mail_country
    );

    address_accessors!(
        other_address,
        set_other_address,
        address_other_street,
        address_other_city,
        address_other_state,
        address_other_postcode,
        address_other_country
    );

    /// Look up a custom field by ID.
    pub fn custom_field(&self, id: &str) -> Option<&CustomField> {
        custom_field::find(&self.custom_fields, id)
    }

    /// Set a custom field locally. Call [`Save::save`] to persist it.
    pub fn set_custom_field(&mut self, id: &str, value: impl Into<Value>) {
        custom_field::upsert(&mut self.custom_fields, id, value.into());
    }

    /// Look up a cached [`Link`] by ID.
    pub fn link(&self, link_id: i64) -> Option<&Link> {
        self.links.iter().find(|l| l.link_id == Some(link_id))
    }

    /// Look up a cached [`ContactLink`] by ID.
    pub fn contact_link(&self, contact_link_id: i64) -> Option<&ContactLink> {
        self.contact_links
            .iter()
            .find(|l| l.contact_link_id == Some(contact_link_id))
    }

    /// Link this contact to an organisation.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::MissingId`] if the contact was never saved,
    /// or an error if the request fails.
    pub async fn add_organisation_link(
        &mut self,
        client: &InsightlyClient,
        organisation_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Result<Link> {
        self.add_link(client, LinkTarget::Organisation, organisation_id, role, details)
            .await
    }

    /// Change a cached organisation link.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::DoesNotExist`] if the link is not in
    /// [`Contact::links`] as an organisation link.
    pub async fn update_organisation_link(
        &mut self,
        client: &InsightlyClient,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        self.update_link(client, LinkTarget::Organisation, link_id, update)
            .await
    }

    /// Link this contact to an opportunity.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::MissingId`] if the contact was never saved,
    /// or an error if the request fails.
    pub async fn add_opportunity_link(
        &mut self,
        client: &InsightlyClient,
        opportunity_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Result<Link> {
        self.add_link(client, LinkTarget::Opportunity, opportunity_id, role, details)
            .await
    }

    /// Change a cached opportunity link.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::DoesNotExist`] if the link is not in
    /// [`Contact::links`] as an opportunity link.
    pub async fn update_opportunity_link(
        &mut self,
        client: &InsightlyClient,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        self.update_link(client, LinkTarget::Opportunity, link_id, update)
            .await
    }

    /// Relate two contacts. `relationship_id` defaults to
    /// [`DEFAULT_RELATIONSHIP_ID`](crate::endpoints::DEFAULT_RELATIONSHIP_ID).
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::MissingId`] if the contact was never saved,
    /// or an error if the request fails.
    pub async fn add_contact_link(
        &mut self,
        client: &InsightlyClient,
        parent_id: i64,
        child_id: i64,
        relationship_id: Option<i64>,
        details: Option<String>,
    ) -> Result<ContactLink> {
        let id = self.require_id()?;
        let link = ContactLink::new(parent_id, child_id, relationship_id, details);

        let saved =
            send_link(client, Resource::Contacts, Operation::AddContactLink, id, &link).await?;
        self.contact_links.push(saved.clone());
        Ok(saved)
    }

    /// Change a cached contact link.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::DoesNotExist`] if the link is not in
    /// [`Contact::contact_links`].
    pub async fn update_contact_link(
        &mut self,
        client: &InsightlyClient,
        contact_link_id: i64,
        update: PeerLinkUpdate,
    ) -> Result<ContactLink> {
        let id = self.require_id()?;
        let link = self
            .contact_link(contact_link_id)
            .ok_or(InsightlyError::DoesNotExist {
                entity: "Contact Link",
                id: contact_link_id,
            })?
            .merged(update);

        let saved =
            send_link(client, Resource::Contacts, Operation::UpdateContactLink, id, &link).await?;
        replace_or_push(&mut self.contact_links, saved.clone(), |l| {
            l.contact_link_id == Some(contact_link_id)
        });
        Ok(saved)
    }

    async fn add_link(
        &mut self,
        client: &InsightlyClient,
        target: LinkTarget,
        target_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Result<Link> {
        let id = self.require_id()?;
        let link = Link::between(LinkTarget::Contact, id, target, target_id, role, details);

        let saved = send_link(client, Resource::Contacts, Operation::AddLink, id, &link).await?;
        self.links.push(saved.clone());
        Ok(saved)
    }

    async fn update_link(
        &mut self,
        client: &InsightlyClient,
        target: LinkTarget,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        let id = self.require_id()?;
        let link = self
            .link(link_id)
            .filter(|l| l.target_id(target).is_some())
            .ok_or(InsightlyError::DoesNotExist {
                entity: target.name(),
                id: link_id,
            })?
            .merged(target, update);

        let saved = send_link(client, Resource::Contacts, Operation::UpdateLink, id, &link).await?;
        replace_or_push(&mut self.links, saved.clone(), |l| l.link_id == Some(link_id));
        Ok(saved)
    }
}

impl Record for Contact {
    const RESOURCE: Resource = Resource::Contacts;
    const ENTITY: &'static str = "Contact";

    fn id(&self) -> Option<i64> {
        self.contact_id
    }
}

impl Get for Contact {}
impl List for Contact {}
impl Search for Contact {}
impl Delete for Contact {}
impl Save for Contact {}
