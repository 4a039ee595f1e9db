//! Organisation model and trait implementations.

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
    replace_or_push, send_link, Link, LinkTarget, LinkUpdate, OrganisationLink, PeerLinkUpdate,
};
use crate::models::timestamp;
use crate::traits::{Delete, Get, List, Record, Save, Search};

/// An Insightly organisation.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Organisation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<i64>,
    pub organisation_name: Option<String>,
    pub background: Option<String>,
    pub image_url: Option<String>,
    pub owner_user_id: Option<i64>,

    pub phone: Option<String>,
    pub phone_fax: Option<String>,
    pub website: Option<String>,

    pub social_facebook: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_twitter: Option<String>,

    pub address_billing_street: Option<String>,
    pub address_billing_city: Option<String>,
    pub address_billing_state: Option<String>,
    pub address_billing_postcode: Option<String>,
    pub address_billing_country: Option<String>,
    pub address_ship_street: Option<String>,
    pub address_ship_city: Option<String>,
    pub address_ship_state: Option<String>,
    pub address_ship_postcode: Option<String>,
    pub address_ship_country: Option<String>,

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
    #[serde(rename = "EMAILDOMAINS")]
    pub email_domains: Vec<Value>,
    #[serde_as(as = "DefaultOnNull")]
    pub links: Vec<Link>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ORGANISATIONLINKS")]
    pub organisation_links: Vec<OrganisationLink>,

    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_updated_utc: Option<DateTime<Utc>>,
}

impl Organisation {
    /// A new, unsaved organisation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            organisation_name: Some(name.into()),
            ..Default::default()
        }
    }

    address_accessors!(
        billing_address,
        set_billing_address,
        address_billing_street,
        address_billing_city,
        address_billing_state,
        address_billing_postcode,
        address_billing_country
    );

    address_accessors!(
        shipping_address,
        set_shipping_address,
        address_ship_street,
        address_ship_city,
        address_ship_state,
        address_ship_postcode,
        address_ship_country
    );

    pub fn custom_field(&self, id: &str) -> Option<&CustomField> {
        custom_field::find(&self.custom_fields, id)
    }

    pub fn set_custom_field(&mut self, id: &str, value: impl Into<Value>) {
        custom_field::upsert(&mut self.custom_fields, id, value.into());
    }

    pub fn link(&self, link_id: i64) -> Option<&Link> {
        self.links.iter().find(|l| l.link_id == Some(link_id))
    }

    pub fn organisation_link(&self, org_link_id: i64) -> Option<&OrganisationLink> {
        self.organisation_links
            .iter()
            .find(|l| l.org_link_id == Some(org_link_id))
    }

    /// Link a contact to this organisation.
    pub async fn add_contact_link(
        &mut self,
        client: &InsightlyClient,
        contact_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Result<Link> {
        self.add_link(client, LinkTarget::Contact, contact_id, role, details)
            .await
    }

    /// Change a cached contact link.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::DoesNotExist`] if the link is not in
    /// [`Organisation::links`] as a contact link.
    pub async fn update_contact_link(
        &mut self,
        client: &InsightlyClient,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        self.update_link(client, LinkTarget::Contact, link_id, update)
            .await
    }

    /// Link an opportunity to this organisation.
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
    /// [`Organisation::links`] as an opportunity link.
    pub async fn update_opportunity_link(
        &mut self,
        client: &InsightlyClient,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        self.update_link(client, LinkTarget::Opportunity, link_id, update)
            .await
    }

    /// Relate two organisations, for example a parent and its subsidiary.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::MissingId`] if the organisation was never
    /// saved, or an error if the request fails.
    pub async fn add_organisation_link(
        &mut self,
        client: &InsightlyClient,
        parent_id: i64,
        child_id: i64,
        relationship_id: Option<i64>,
        details: Option<String>,
    ) -> Result<OrganisationLink> {
        let id = self.require_id()?;
        let link = OrganisationLink::new(parent_id, child_id, relationship_id, details);

        let saved = send_link(
            client,
            Resource::Organisations,
            Operation::AddOrganisationLink,
            id,
            &link,
        )
        .await?;
        self.organisation_links.push(saved.clone());
        Ok(saved)
    }

    /// Change a cached organisation link.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::DoesNotExist`] if the link is not in
    /// [`Organisation::organisation_links`].
    pub async fn update_organisation_link(
        &mut self,
        client: &InsightlyClient,
        org_link_id: i64,
        update: PeerLinkUpdate,
    ) -> Result<OrganisationLink> {
        let id = self.require_id()?;
        let link = self
            .organisation_link(org_link_id)
            .ok_or(InsightlyError::DoesNotExist {
                entity: "Organisation Link",
                id: org_link_id,
            })?
            .merged(update);

        let saved = send_link(
            client,
            Resource::Organisations,
            Operation::UpdateOrganisationLink,
            id,
            &link,
        )
        .await?;
        replace_or_push(&mut self.organisation_links, saved.clone(), |l| {
            l.org_link_id == Some(org_link_id)
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
        let link = Link::between(LinkTarget::Organisation, id, target, target_id, role, details);

        let saved =
            send_link(client, Resource::Organisations, Operation::AddLink, id, &link).await?;
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

        let saved =
            send_link(client, Resource::Organisations, Operation::UpdateLink, id, &link).await?;
        replace_or_push(&mut self.links, saved.clone(), |l| l.link_id == Some(link_id));
        Ok(saved)
    }
}

impl Record for Organisation {
    const RESOURCE: Resource = Resource::Organisations;
    const ENTITY: &'static str = "Organisation";

    fn id(&self) -> Option<i64> {
        self.organisation_id
    }
}

impl Get for Organisation {}
impl List for Organisation {}
impl Search for Organisation {}
impl Delete for Organisation {}
impl Save for Organisation {}
